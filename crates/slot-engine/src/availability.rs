//! The availability resolver.
//!
//! A pure function from (schedule, civil date range, existing bookings,
//! lead time, delivery modes) to the ordered list of bookable slots,
//! expressed as absolute UTC instants. No I/O, no shared state: the
//! caller provides the "now" anchor, and identical inputs always produce
//! identical output.
//!
//! The output is advisory. Two callers computing availability from stale
//! booking snapshots can both see the same slot as free; at-most-one
//! booking per slot is the write path's job, enforced against live data
//! at commit time.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::schedule::{Booking, DeliveryMode, ScheduleConfig, TimeWindow};
use crate::wallclock::{
    parse_civil_date, parse_civil_time, parse_timezone, wall_time_to_instant_in,
    weekday_in_zone_on,
};

/// Capacity of one slot. The engine models a single bookable unit per
/// slot; multi-resource capacity belongs to the write path.
const SLOT_CAPACITY: u32 = 1;

// ── Output and options ──────────────────────────────────────────────────────

/// One bookable unit of time, as absolute UTC instants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySlot {
    /// Slot start (RFC 3339 UTC when serialized).
    pub start: DateTime<Utc>,
    /// Slot end, always `start + duration_min`.
    pub end: DateTime<Utc>,
    /// Slot length in minutes, equal to the generating config's
    /// `slot_duration_min`.
    pub duration_min: u32,
    /// Delivery modes passed through from the request.
    pub delivery: Vec<DeliveryMode>,
    /// Capacity remaining in this slot, always 1.
    pub remaining: u32,
}

/// Options for [`resolve_availability_with_options`].
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Minimum number of hours between the `now` anchor and a bookable
    /// slot's start.
    pub min_lead_hours: i64,
    /// Delivery mode tags copied onto every returned slot.
    pub delivery: Vec<DeliveryMode>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            min_lead_hours: 24,
            delivery: vec![DeliveryMode::Virtual],
        }
    }
}

// ── resolve_availability ────────────────────────────────────────────────────

/// Resolve the bookable slots in a civil date range.
///
/// Uses the default options: 24-hour lead time, virtual delivery. For
/// explicit lead time or delivery modes, use
/// [`resolve_availability_with_options`].
///
/// # Arguments
///
/// * `now` — The reference "now" instant (typically `Utc::now()`)
/// * `schedule` — The operator's schedule; `None` applies the engine
///   default ([`ScheduleConfig::default`])
/// * `range_start`, `range_end` — Civil date strings (`YYYY-MM-DD`),
///   iterated inclusive of both ends; `range_end` must be strictly after
///   `range_start`
/// * `bookings` — Existing reservations in the queried range
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use slot_engine::resolve_availability;
///
/// let now = Utc.with_ymd_and_hms(2026, 7, 1, 12, 0, 0).unwrap();
/// let slots = resolve_availability(now, None, "2026-07-15", "2026-07-16", &[]);
/// // Default schedule: Mon-Fri, 09:00-17:00 Europe/Paris (CEST in July).
/// assert_eq!(
///     slots[0].start,
///     Utc.with_ymd_and_hms(2026, 7, 15, 7, 0, 0).unwrap()
/// );
/// ```
pub fn resolve_availability(
    now: DateTime<Utc>,
    schedule: Option<&ScheduleConfig>,
    range_start: &str,
    range_end: &str,
    bookings: &[Booking],
) -> Vec<AvailabilitySlot> {
    resolve_availability_with_options(
        now,
        schedule,
        range_start,
        range_end,
        bookings,
        &ResolveOptions::default(),
    )
}

/// Resolve the bookable slots in a civil date range, with options.
///
/// Never fails: every degenerate condition degrades to an empty list,
/// since "no availability" is a valid real-world answer. Specifically:
/// an unparsable or inverted range, a zero slot duration, and an unknown
/// schedule timezone each yield no slots; a malformed window is skipped
/// while the rest of the schedule is still processed.
///
/// The returned list is ordered by `start`: the day loop and the
/// window/slot loops proceed in forward chronological order, so no sort
/// step is needed. Callers may rely on this ordering.
pub fn resolve_availability_with_options(
    now: DateTime<Utc>,
    schedule: Option<&ScheduleConfig>,
    range_start: &str,
    range_end: &str,
    bookings: &[Booking],
    options: &ResolveOptions,
) -> Vec<AvailabilitySlot> {
    let default_schedule;
    let schedule = match schedule {
        Some(config) => config,
        None => {
            default_schedule = ScheduleConfig::default();
            &default_schedule
        }
    };

    // A zero-length unit could never advance the candidate cursor.
    if schedule.slot_duration_min == 0 {
        return Vec::new();
    }

    let start_date = match parse_civil_date(range_start) {
        Ok(date) => date,
        Err(_) => return Vec::new(),
    };
    let end_date = match parse_civil_date(range_end) {
        Ok(date) => date,
        Err(_) => return Vec::new(),
    };
    if end_date <= start_date {
        return Vec::new();
    }

    let tz = match parse_timezone(&schedule.timezone) {
        Ok(tz) => tz,
        Err(_) => return Vec::new(),
    };

    let earliest_bookable = now + Duration::hours(options.min_lead_hours);

    // Cancelled and no-show reservations do not block new slots.
    let conflicts: Vec<(DateTime<Utc>, DateTime<Utc>)> = bookings
        .iter()
        .filter(|booking| booking.status.is_blocking())
        .map(|booking| (booking.start, booking.end))
        .collect();

    let slot_len = Duration::minutes(i64::from(schedule.slot_duration_min));
    let step = Duration::minutes(
        i64::from(schedule.slot_duration_min) + i64::from(schedule.buffer_min),
    );
    let buffer = Duration::minutes(i64::from(schedule.buffer_min));

    let mut slots = Vec::new();

    // Date-only cursor, never a zone-aware instant: buffer and DST
    // arithmetic on instants must not be able to drift the day loop.
    let mut day = start_date;
    loop {
        if day_is_open(schedule, day, tz) {
            for window in &schedule.windows {
                let (window_start, window_end) = match window_bounds(window, day, tz) {
                    Some(bounds) => bounds,
                    // Malformed window: skipped, not fatal.
                    None => continue,
                };

                let mut cursor = window_start;
                while cursor + slot_len <= window_end {
                    let slot_end = cursor + slot_len;
                    // A booking excludes candidates overlapping its
                    // interval expanded by the buffer on both sides.
                    let conflicted = conflicts.iter().any(|&(booked_start, booked_end)| {
                        cursor < booked_end + buffer && slot_end > booked_start - buffer
                    });
                    if cursor > earliest_bookable && !conflicted {
                        slots.push(AvailabilitySlot {
                            start: cursor,
                            end: slot_end,
                            duration_min: schedule.slot_duration_min,
                            delivery: options.delivery.clone(),
                            remaining: SLOT_CAPACITY,
                        });
                    }
                    cursor += step;
                }
            }
        }

        if day == end_date {
            break;
        }
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    slots
}

// ── first_available ─────────────────────────────────────────────────────────

/// The earliest bookable slot in a civil date range, with default options.
pub fn first_available(
    now: DateTime<Utc>,
    schedule: Option<&ScheduleConfig>,
    range_start: &str,
    range_end: &str,
    bookings: &[Booking],
) -> Option<AvailabilitySlot> {
    first_available_with_options(
        now,
        schedule,
        range_start,
        range_end,
        bookings,
        &ResolveOptions::default(),
    )
}

/// The earliest bookable slot in a civil date range, with options.
///
/// `None` when the range holds no bookable slot at all.
pub fn first_available_with_options(
    now: DateTime<Utc>,
    schedule: Option<&ScheduleConfig>,
    range_start: &str,
    range_end: &str,
    bookings: &[Booking],
    options: &ResolveOptions,
) -> Option<AvailabilitySlot> {
    resolve_availability_with_options(now, schedule, range_start, range_end, bookings, options)
        .into_iter()
        .next()
}

// ── Internal helpers ────────────────────────────────────────────────────────

/// Whether a civil date takes bookings at all: not blocked, and its
/// weekday in the schedule's zone is an available day.
fn day_is_open(schedule: &ScheduleConfig, day: NaiveDate, tz: Tz) -> bool {
    if schedule.blocked_dates.contains(&day) {
        return false;
    }
    match weekday_in_zone_on(day, tz) {
        Some(weekday) => schedule.available_days.contains(&weekday),
        None => false,
    }
}

/// Convert a window's wall-clock bounds on a given date to instants.
/// `None` when either time string fails to parse.
fn window_bounds(
    window: &TimeWindow,
    day: NaiveDate,
    tz: Tz,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = parse_civil_time(&window.start).ok()?;
    let end = parse_civil_time(&window.end).ok()?;
    Some((
        wall_time_to_instant_in(day, start, tz),
        wall_time_to_instant_in(day, end, tz),
    ))
}

// ── Tests ───────────────────────────────────────────────────────────────────
