use chrono::Timelike;

/// First minute of the morning check-in window (08:30)
pub const WINDOW_OPENS: (u32, u32) = (8, 30);

/// The window also admits exactly the 09:00 minute, nothing after it
pub const WINDOW_CLOSES: (u32, u32) = (9, 0);

/// Whether a local wall-clock time falls in the morning check-in window.
///
/// Accepts every minute from 08:30 through 08:59 plus the single minute
/// 09:00. Seconds are ignored, so 09:00:59 is still inside while 09:01:00
/// is not. No timezone conversion happens here; pass local time.
pub fn is_within_check_in_window<T: Timelike>(time: &T) -> bool {
    let (hour, minute) = (time.hour(), time.minute());
    (hour == WINDOW_OPENS.0 && minute >= WINDOW_OPENS.1)
        || (hour == WINDOW_CLOSES.0 && minute == WINDOW_CLOSES.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn at(hour: u32, minute: u32, second: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, second).unwrap()
    }

    #[test]
    fn test_window_boundaries() {
        assert!(!is_within_check_in_window(&at(8, 29, 0)));
        assert!(is_within_check_in_window(&at(8, 30, 0)));
        assert!(is_within_check_in_window(&at(8, 45, 0)));
        assert!(is_within_check_in_window(&at(8, 59, 0)));
        assert!(is_within_check_in_window(&at(9, 0, 0)));
        assert!(!is_within_check_in_window(&at(9, 1, 0)));
    }

    #[test]
    fn test_seconds_are_ignored() {
        assert!(!is_within_check_in_window(&at(8, 29, 59)));
        assert!(is_within_check_in_window(&at(9, 0, 30)));
        assert!(is_within_check_in_window(&at(9, 0, 59)));
    }

    #[test]
    fn test_other_hours_rejected() {
        assert!(!is_within_check_in_window(&at(0, 0, 0)));
        assert!(!is_within_check_in_window(&at(9, 30, 0)));
        assert!(!is_within_check_in_window(&at(10, 0, 0)));
        assert!(!is_within_check_in_window(&at(20, 45, 0)));
    }
}
