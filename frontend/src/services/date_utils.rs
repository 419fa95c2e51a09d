use chrono::NaiveDate;
use shared::calendar::month_name;

/// Today's calendar date from the browser clock. This is the only place
/// the real clock is read; everything in `shared` takes `today` as a
/// parameter.
pub fn today() -> NaiveDate {
    use js_sys::Date;
    let now = Date::new_0();
    let year = now.get_full_year() as i32;
    let month = now.get_month() + 1; // JavaScript months are 0-indexed
    let day = now.get_date();
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(1970, 1, 1).unwrap())
}

/// Format a date for display, e.g. "January 20, 2025".
pub fn format_date_for_display(date: NaiveDate) -> String {
    use chrono::Datelike;
    format!("{} {}, {}", month_name(date.month()), date.day(), date.year())
}

/// YYYY-MM-DD, the format the persistence API expects for start dates.
pub fn format_date_for_api(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
