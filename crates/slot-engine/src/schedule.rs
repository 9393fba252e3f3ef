//! Schedule configuration and booking input types.
//!
//! These are the caller-supplied shapes the resolver consumes: a recurring
//! weekly schedule, the list of already-booked intervals, and the delivery
//! mode tags passed through to the output. Everything here is transient
//! and immutable once constructed; the resolver retains no reference to
//! any of it after returning.
//!
//! The wire shape follows the caller-facing JSON convention (camelCase
//! keys, kebab-case enum values), and every config field overlays an
//! explicit default, so a partial configuration deserializes into the
//! documented engine defaults.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ── Schedule configuration ──────────────────────────────────────────────────

/// One open interval within an available day, as civil `HH:MM` wall-clock
/// strings in the schedule's timezone.
///
/// Windows are independent: a day may carry several (split shifts), and
/// overlap between them is tolerated rather than validated. A window
/// whose `start` does not precede its `end` simply yields no slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: String,
    pub end: String,
}

impl TimeWindow {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// A recurring weekly schedule: which days are open, the wall-clock
/// windows within those days, and how slots are cut from the windows.
///
/// # Field defaults
///
/// | field | default |
/// |---|---|
/// | `available_days` | Monday..Friday (`1..=5`) |
/// | `windows` | one window, 09:00..17:00 |
/// | `slot_duration_min` | 60 |
/// | `buffer_min` | 15 |
/// | `timezone` | `Europe/Paris` |
/// | `blocked_dates` | empty |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleConfig {
    /// Weekday numbers on which bookings are allowed, 0=Sunday..6=Saturday.
    pub available_days: BTreeSet<u8>,
    /// Ordered open windows within an available day.
    pub windows: Vec<TimeWindow>,
    /// Length of one bookable unit in minutes. A zero duration makes the
    /// schedule unusable and resolves to no slots.
    pub slot_duration_min: u32,
    /// Minimum gap in minutes enforced between generated slots and around
    /// existing bookings. Zero means back-to-back slots.
    pub buffer_min: u32,
    /// IANA timezone name; all window times are civil times in this zone.
    pub timezone: String,
    /// Civil dates fully excluded regardless of weekday.
    pub blocked_dates: BTreeSet<NaiveDate>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            available_days: BTreeSet::from([1, 2, 3, 4, 5]),
            windows: vec![TimeWindow::new("09:00", "17:00")],
            slot_duration_min: 60,
            buffer_min: 15,
            timezone: "Europe/Paris".to_string(),
            blocked_dates: BTreeSet::new(),
        }
    }
}

// ── Bookings ────────────────────────────────────────────────────────────────

/// Lifecycle state of an existing reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl BookingStatus {
    /// Whether a reservation in this status occupies its interval.
    /// Cancelled and no-show reservations do not block new slots.
    pub fn is_blocking(self) -> bool {
        !matches!(self, BookingStatus::Cancelled | BookingStatus::NoShow)
    }
}

/// An existing reservation, as absolute instants (not civil times).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
}

// ── Delivery modes ──────────────────────────────────────────────────────────

/// How a booked session is delivered. A pure pass-through tag: the
/// resolver copies the requested modes onto every slot and never computes
/// with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryMode {
    Virtual,
    InPerson,
}

// ── Tests ───────────────────────────────────────────────────────────────────
