//! UTC calendar helpers.

use time::{Date, Month, OffsetDateTime, UtcOffset};

/// 1-based ordinal day of `date` within its year.
///
/// Counts whole days from January 1 of the same year, so leap years fall
/// out of the date arithmetic without a special case.
pub fn day_of_year(date: Date) -> u16 {
    match Date::from_calendar_date(date.year(), Month::January, 1) {
        Ok(start) => ((date - start).whole_days() + 1) as u16,
        // January 1 exists for every year `Date` can hold.
        Err(_) => date.ordinal(),
    }
}

/// Day of year for an instant, evaluated on the UTC calendar.
pub fn day_of_year_utc(instant: OffsetDateTime) -> u16 {
    day_of_year(instant.to_offset(UtcOffset::UTC).date())
}
