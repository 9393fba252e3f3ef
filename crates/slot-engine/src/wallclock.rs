//! Civil wall-clock to instant conversion.
//!
//! Converts a civil date + time-of-day, interpreted in a named IANA
//! timezone, into the absolute UTC instant, using the zone's UTC offset
//! *at that specific date* so daylight-saving transitions land correctly.
//! Also determines the civil weekday of a date within a zone.
//!
//! All functions take explicit inputs (no system clock access), keeping
//! them pure and testable: the same arguments always produce the same
//! instant.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::error::{Result, SlotError};

// ── wall_time_to_instant ────────────────────────────────────────────────────

/// Convert a civil wall-clock time in a named timezone to its absolute instant.
///
/// # Arguments
///
/// * `date` — A civil date string (`YYYY-MM-DD`)
/// * `time` — A civil time-of-day string (`HH:MM`, 24-hour)
/// * `timezone` — An IANA timezone name (e.g., `"Europe/Paris"`)
///
/// # Algorithm
///
/// A **carrier instant** is built by reading the civil fields as if they
/// were already UTC. Rendering that carrier in the target zone and
/// reinterpreting the rendered fields as UTC yields a reconstructed
/// instant whose distance from the carrier equals the zone's UTC offset
/// at the carrier instant, DST included. Subtracting that offset from the
/// carrier gives the true instant for the requested wall-clock time.
///
/// # DST transitions
///
/// A local time skipped or repeated at a DST transition is not specially
/// disambiguated: both resolve through the zone offset sampled at the
/// carrier instant, which is the post-transition offset.
///
/// # Errors
///
/// Returns [`SlotError::InvalidDate`] or [`SlotError::InvalidTime`] if the
/// civil fields cannot be parsed or do not name a valid calendar instant
/// (e.g., `2026-13-40`), and [`SlotError::InvalidTimezone`] if the
/// timezone name is not a valid IANA timezone.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use slot_engine::wall_time_to_instant;
///
/// // July in Paris is CEST (UTC+2): 09:00 wall clock = 07:00 UTC.
/// let instant = wall_time_to_instant("2026-07-15", "09:00", "Europe/Paris").unwrap();
/// assert_eq!(instant, Utc.with_ymd_and_hms(2026, 7, 15, 7, 0, 0).unwrap());
/// ```
pub fn wall_time_to_instant(date: &str, time: &str, timezone: &str) -> Result<DateTime<Utc>> {
    let tz = parse_timezone(timezone)?;
    let date = parse_civil_date(date)?;
    let time = parse_civil_time(time)?;
    Ok(wall_time_to_instant_in(date, time, tz))
}

/// Typed core of [`wall_time_to_instant`]; the resolver's per-day loop
/// calls this so parsing happens once per request, not once per day.
pub(crate) fn wall_time_to_instant_in(date: NaiveDate, time: NaiveTime, tz: Tz) -> DateTime<Utc> {
    // The civil fields read as if they were already UTC.
    let carrier = date.and_time(time).and_utc();

    // Render the carrier's wall-clock fields as observed in the target
    // zone, then reinterpret them as UTC. The gap between the two is the
    // zone's UTC offset at the carrier instant.
    let reconstructed = carrier.with_timezone(&tz).naive_local().and_utc();
    let offset = reconstructed - carrier;

    carrier - offset
}

// ── weekday_in_zone ─────────────────────────────────────────────────────────

/// Determine the civil weekday of a date within a named timezone.
///
/// Returns the weekday number per the `0=Sunday..6=Saturday` convention.
///
/// # Errors
///
/// Returns [`SlotError::InvalidDate`] if the date cannot be parsed, or
/// [`SlotError::InvalidTimezone`] for an unknown IANA name.
pub fn weekday_in_zone(date: &str, timezone: &str) -> Result<u8> {
    let tz = parse_timezone(timezone)?;
    let date = parse_civil_date(date)?;
    weekday_in_zone_on(date, tz).ok_or_else(|| SlotError::InvalidDate(format!("'{date}'")))
}

/// Typed core of [`weekday_in_zone`].
pub(crate) fn weekday_in_zone_on(date: NaiveDate, tz: Tz) -> Option<u8> {
    // Anchor at civil noon so the zone's offset cannot pull the calendar
    // date across midnight when rendered in the target zone.
    let noon = date.and_hms_opt(12, 0, 0)?.and_utc();
    let local = noon.with_timezone(&tz);
    Some(local.weekday().num_days_from_sunday() as u8)
}

// ── Parsing helpers ─────────────────────────────────────────────────────────

/// Parse a civil date string (`YYYY-MM-DD`) into `NaiveDate`.
pub(crate) fn parse_civil_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| SlotError::InvalidDate(format!("'{s}': {e}")))
}

/// Parse a civil time-of-day string (`HH:MM`, 24-hour) into `NaiveTime`.
pub(crate) fn parse_civil_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|e| SlotError::InvalidTime(format!("'{s}': {e}")))
}

/// Parse an IANA timezone string into `Tz`.
pub(crate) fn parse_timezone(s: &str) -> Result<Tz> {
    s.parse::<Tz>()
        .map_err(|_| SlotError::InvalidTimezone(format!("'{s}'")))
}

// ── Tests ───────────────────────────────────────────────────────────────────
