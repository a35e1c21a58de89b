use time::Month;

/// The number of days in `month` of `year`.
///
/// `month` is zero-indexed, so 0 is January and 11 is December. Values
/// above 11 wrap around.
pub fn days_in_month(year: i32, month: u8) -> u8 {
    Month::January.nth_next(month).length(year)
}
