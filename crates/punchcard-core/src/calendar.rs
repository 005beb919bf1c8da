use chrono::{Datelike, Duration, Local, NaiveDate};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn yesterday() -> NaiveDate {
    today() - Duration::days(1)
}

/// The unique Sunday falling within the seven days before `today`.
///
/// When `today` is itself a Sunday this is the Sunday a full week back,
/// so "last week" never includes the current day.
pub fn previous_week_start(today: NaiveDate) -> NaiveDate {
    let days_back = match today.weekday().num_days_from_sunday() {
        0 => 7,
        n => i64::from(n),
    };
    today - Duration::days(days_back)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_previous_week_start_from_midweek() {
        // 2025-06-11 was a Wednesday; the Sunday before it is 2025-06-08.
        assert_eq!(d(2025, 6, 11).weekday(), Weekday::Wed);
        assert_eq!(previous_week_start(d(2025, 6, 11)), d(2025, 6, 8));
    }

    #[test]
    fn test_previous_week_start_from_sunday_goes_a_full_week_back() {
        assert_eq!(d(2025, 6, 8).weekday(), Weekday::Sun);
        assert_eq!(previous_week_start(d(2025, 6, 8)), d(2025, 6, 1));
    }

    #[test]
    fn test_previous_week_start_is_always_a_recent_sunday() {
        let mut day = d(2026, 1, 1);
        for _ in 0..30 {
            let start = previous_week_start(day);
            assert_eq!(start.weekday(), Weekday::Sun);
            assert!(start < day);
            assert!(day - start <= Duration::days(7));
            day += Duration::days(1);
        }
    }
}
