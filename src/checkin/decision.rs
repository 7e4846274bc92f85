use chrono::Timelike;

use crate::utils::geo::{distance_km, is_within_radius, Coordinate};
use crate::utils::time_window::is_within_check_in_window;

/// Radius of the geofence around the work location
pub const MAX_DISTANCE_KM: f64 = 1.0;

/// Why an attempt was turned down.
///
/// Range and time failures share one variant: the caller is only told that
/// at least one of them failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("no work location set")]
    NoWorkLocationSet,
    #[error("out of range or outside the check-in window")]
    OutOfRangeOrOutsideWindow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(Rejection),
}

/// Decide whether a check-in attempt is accepted
pub fn evaluate<T: Timelike>(current: Coordinate, work: Option<Coordinate>, now: &T) -> Verdict {
    let Some(work) = work else {
        return Verdict::Rejected(Rejection::NoWorkLocationSet);
    };

    let within_range = is_within_radius(current, work, MAX_DISTANCE_KM);
    let within_time = is_within_check_in_window(now);

    tracing::debug!(
        distance_km = distance_km(current, work),
        within_range,
        within_time,
        current = %current,
        work = %work,
        "Evaluated check-in attempt"
    );

    if within_range && within_time {
        Verdict::Accepted
    } else {
        Verdict::Rejected(Rejection::OutOfRangeOrOutsideWindow)
    }
}
