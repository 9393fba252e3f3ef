//! # slot-engine
//!
//! Timezone-correct availability resolution for booking calendars.
//!
//! Given a recurring weekly schedule (open days, wall-clock windows, slot
//! length, buffer), the set of already-booked intervals, and a lead-time
//! rule, the engine computes the exact ordered list of bookable slots in
//! a civil date range, expressed as absolute UTC instants.
//!
//! The computation is pure and deterministic: the caller provides the
//! "now" anchor, and the crate performs no I/O and reads no system clock.
//! The output is advisory (read path only); at-most-one booking per slot
//! is enforced by the booking write path against live data.
//!
//! ## Modules
//!
//! - [`wallclock`]: civil wall-clock to instant conversion, DST-safe
//! - [`schedule`]: schedule configuration and booking input types
//! - [`availability`]: the availability resolver
//! - [`error`]: error types

pub mod availability;
pub mod error;
pub mod schedule;
pub mod wallclock;

pub use availability::{
    first_available, first_available_with_options, resolve_availability,
    resolve_availability_with_options, AvailabilitySlot, ResolveOptions,
};
pub use error::SlotError;
pub use schedule::{Booking, BookingStatus, DeliveryMode, ScheduleConfig, TimeWindow};
pub use wallclock::{wall_time_to_instant, weekday_in_zone};
