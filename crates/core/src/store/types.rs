use chrono::{Datelike, NaiveDate};

/// Returns the first day of the month containing `day`.
pub fn start_of_month(day: NaiveDate) -> NaiveDate {
    day.with_day(1).expect("every month has a day 1")
}

/// Returns the last day of the month containing `day`, leap-year aware.
pub fn end_of_month(day: NaiveDate) -> NaiveDate {
    let first_of_next = if day.month() == 12 {
        NaiveDate::from_ymd_opt(day.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(day.year(), day.month() + 1, 1)
    }
    .expect("first day of the next month");

    first_of_next
        .pred_opt()
        .expect("day before a first-of-month")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_of_month_mid_month() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        assert_eq!(
            start_of_month(day),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_start_of_month_is_identity_on_first() {
        let first = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        assert_eq!(start_of_month(first), first);
    }

    #[test]
    fn test_end_of_month_february_leap_year() {
        let day = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();

        assert_eq!(
            end_of_month(day),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_end_of_month_february_non_leap_year() {
        let day = NaiveDate::from_ymd_opt(2023, 2, 10).unwrap();

        assert_eq!(
            end_of_month(day),
            NaiveDate::from_ymd_opt(2023, 2, 28).unwrap()
        );
    }

    #[test]
    fn test_end_of_month_december_rolls_into_next_year() {
        let day = NaiveDate::from_ymd_opt(2024, 12, 5).unwrap();

        assert_eq!(
            end_of_month(day),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
        );
    }
}
