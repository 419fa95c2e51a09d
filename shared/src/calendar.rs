use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::Weekday;

/// Minimum number of days between today and the earliest selectable
/// service-start date.
pub const MINIMUM_LEAD_DAYS: i64 = 14;

/// Earliest allowed start date: scan forward from `today + lead_days`, one
/// day at a time, to the first date on the target weekday. With no target
/// (unrecognized weekday fallback) the cutoff itself is the earliest date.
pub fn earliest_start_date(
    today: NaiveDate,
    target: Option<Weekday>,
    lead_days: i64,
) -> NaiveDate {
    let mut candidate = today + Duration::days(lead_days);
    if let Some(target) = target {
        while !target.matches(candidate) {
            candidate += Duration::days(1);
        }
    }
    candidate
}

/// Whether a day cell can be picked. A date is disabled when it falls
/// inside the lead-time window or misses the target weekday; without a
/// recognized target only the lead-time constraint applies.
pub fn is_disabled(
    date: NaiveDate,
    today: NaiveDate,
    target: Option<Weekday>,
    lead_days: i64,
) -> bool {
    if date < today + Duration::days(lead_days) {
        return true;
    }
    match target {
        Some(target) => !target.matches(date),
        None => false,
    }
}

/// Type of calendar day cell for explicit rendering logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalendarDayType {
    /// Blank cell before the first of the month, aligning day 1 to its
    /// weekday column.
    PaddingBefore,
    /// Actual day within the month.
    MonthDay,
    /// Blank cell after the last of the month, completing the final week.
    PaddingAfter,
}

/// One cell of the rendered month grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub day: u32,
    pub date: Option<NaiveDate>,
    pub day_type: CalendarDayType,
    pub disabled: bool,
    pub selected: bool,
    /// Matches the real current date, independent of selectability.
    pub today: bool,
}

/// A month of day cells plus the column offset of day 1 (0 = Sunday).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub first_day_of_week: u32,
    pub days: Vec<CalendarDay>,
}

fn blank_cell(day_type: CalendarDayType) -> CalendarDay {
    CalendarDay {
        day: 0,
        date: None,
        day_type,
        disabled: true,
        selected: false,
        today: false,
    }
}

/// Build the grid for one visible month, tagging every real day with its
/// `disabled` / `selected` / `today` flags.
pub fn month_grid(
    year: i32,
    month: u32,
    today: NaiveDate,
    target: Option<Weekday>,
    selected: Option<NaiveDate>,
    lead_days: i64,
) -> CalendarMonth {
    let first = match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(date) => date,
        None => {
            return CalendarMonth {
                year,
                month,
                first_day_of_week: 0,
                days: Vec::new(),
            }
        }
    };

    let first_day_of_week = first.weekday().num_days_from_sunday();
    let mut days = Vec::new();

    for _ in 0..first_day_of_week {
        days.push(blank_cell(CalendarDayType::PaddingBefore));
    }

    for day in 1..=days_in_month(year, month) {
        let date = first + Duration::days((day - 1) as i64);
        days.push(CalendarDay {
            day,
            date: Some(date),
            day_type: CalendarDayType::MonthDay,
            disabled: is_disabled(date, today, target, lead_days),
            selected: selected == Some(date),
            today: date == today,
        });
    }

    while days.len() % 7 != 0 {
        days.push(blank_cell(CalendarDayType::PaddingAfter));
    }

    CalendarMonth {
        year,
        month,
        first_day_of_week,
        days,
    }
}

/// Days in a month, accounting for leap years.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub fn month_of(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}

pub fn prev_month((year, month): (i32, u32)) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

pub fn next_month((year, month): (i32, u32)) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "January",
    }
}

/// State of the constrained start-date picker: the chosen date plus the
/// month currently being browsed. Browsing never changes the selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarSelection {
    pub target_weekday: Option<Weekday>,
    pub minimum_lead_days: i64,
    pub selected_date: Option<NaiveDate>,
    pub visible_month: (i32, u32),
}

impl CalendarSelection {
    /// Initialize with the earliest valid date already selected and in view.
    pub fn new(today: NaiveDate, target: Option<Weekday>) -> CalendarSelection {
        let default_date = earliest_start_date(today, target, MINIMUM_LEAD_DAYS);
        CalendarSelection {
            target_weekday: target,
            minimum_lead_days: MINIMUM_LEAD_DAYS,
            selected_date: Some(default_date),
            visible_month: month_of(default_date),
        }
    }

    /// Re-run the default-date scan for a new target weekday. The previous
    /// selection is discarded since it no longer lands on a pickup day.
    pub fn retarget(&mut self, today: NaiveDate, target: Option<Weekday>) {
        *self = CalendarSelection::new(today, target);
    }

    /// Attempt to select a date. Disabled dates are a silent no-op and
    /// return false so the widget knows to stay open.
    pub fn select(&mut self, date: NaiveDate, today: NaiveDate) -> bool {
        if is_disabled(date, today, self.target_weekday, self.minimum_lead_days) {
            return false;
        }
        self.selected_date = Some(date);
        self.visible_month = month_of(date);
        true
    }

    pub fn show_prev_month(&mut self) {
        self.visible_month = prev_month(self.visible_month);
    }

    pub fn show_next_month(&mut self) {
        self.visible_month = next_month(self.visible_month);
    }

    /// Snap the view back to the selection (or today); used when the
    /// dropdown opens.
    pub fn show_selection(&mut self, today: NaiveDate) {
        self.visible_month = month_of(self.selected_date.unwrap_or(today));
    }

    /// Grid for the month currently in view.
    pub fn grid(&self, today: NaiveDate) -> CalendarMonth {
        let (year, month) = self.visible_month;
        month_grid(
            year,
            month,
            today,
            self.target_weekday,
            self.selected_date,
            self.minimum_lead_days,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_earliest_start_date_example() {
        // 2025-01-01 is a Wednesday; cutoff is 2025-01-15; first Monday at
        // or after the cutoff is 2025-01-20.
        let today = date(2025, 1, 1);
        let earliest = earliest_start_date(today, Some(Weekday::Monday), MINIMUM_LEAD_DAYS);
        assert_eq!(earliest, date(2025, 1, 20));
    }

    #[test]
    fn test_earliest_start_date_is_minimal() {
        let today = date(2025, 1, 1);
        for target in Weekday::all() {
            let earliest = earliest_start_date(today, Some(target), MINIMUM_LEAD_DAYS);
            assert!(target.matches(earliest));
            assert!(earliest >= today + Duration::days(MINIMUM_LEAD_DAYS));
            // No earlier date satisfies both constraints.
            let mut probe = today + Duration::days(MINIMUM_LEAD_DAYS);
            while probe < earliest {
                assert!(!target.matches(probe));
                probe += Duration::days(1);
            }
        }
    }

    #[test]
    fn test_earliest_start_date_without_target() {
        let today = date(2025, 3, 10);
        let earliest = earliest_start_date(today, None, MINIMUM_LEAD_DAYS);
        assert_eq!(earliest, date(2025, 3, 24));
    }

    #[test]
    fn test_default_date_is_never_disabled() {
        for target in Weekday::all() {
            let today = date(2024, 12, 28);
            let earliest = earliest_start_date(today, Some(target), MINIMUM_LEAD_DAYS);
            assert!(!is_disabled(
                earliest,
                today,
                Some(target),
                MINIMUM_LEAD_DAYS
            ));
        }
    }

    #[test]
    fn test_is_disabled_lead_time_and_weekday() {
        let today = date(2025, 1, 1);
        // Monday inside the lead window.
        assert!(is_disabled(
            date(2025, 1, 6),
            today,
            Some(Weekday::Monday),
            MINIMUM_LEAD_DAYS
        ));
        // Past the window but a Tuesday.
        assert!(is_disabled(
            date(2025, 1, 21),
            today,
            Some(Weekday::Monday),
            MINIMUM_LEAD_DAYS
        ));
        // First valid Monday.
        assert!(!is_disabled(
            date(2025, 1, 20),
            today,
            Some(Weekday::Monday),
            MINIMUM_LEAD_DAYS
        ));
        // Relaxed mode only enforces the window.
        assert!(!is_disabled(date(2025, 1, 21), today, None, MINIMUM_LEAD_DAYS));
        assert!(is_disabled(date(2025, 1, 14), today, None, MINIMUM_LEAD_DAYS));
    }

    #[test]
    fn test_month_grid_alignment() {
        // June 2025 starts on a Sunday: no leading padding, 30 days, five
        // trailing blanks to finish the week.
        let grid = month_grid(2025, 6, date(2025, 6, 15), None, None, MINIMUM_LEAD_DAYS);
        assert_eq!(grid.first_day_of_week, 0);
        assert_eq!(grid.days.len(), 35);
        assert_eq!(grid.days[0].day_type, CalendarDayType::MonthDay);
        assert_eq!(grid.days[0].day, 1);
        assert_eq!(grid.days[34].day_type, CalendarDayType::PaddingAfter);

        // August 2025 starts on a Friday: five leading blanks.
        let grid = month_grid(2025, 8, date(2025, 8, 1), None, None, MINIMUM_LEAD_DAYS);
        assert_eq!(grid.first_day_of_week, 5);
        assert_eq!(grid.days[4].day_type, CalendarDayType::PaddingBefore);
        assert_eq!(grid.days[5].day, 1);
        assert_eq!(grid.days.len() % 7, 0);
    }

    #[test]
    fn test_month_grid_flags() {
        let today = date(2025, 1, 1);
        let selected = Some(date(2025, 1, 20));
        let grid = month_grid(
            2025,
            1,
            today,
            Some(Weekday::Monday),
            selected,
            MINIMUM_LEAD_DAYS,
        );
        let day = |n: u32| {
            grid.days
                .iter()
                .find(|cell| cell.day == n && cell.day_type == CalendarDayType::MonthDay)
                .unwrap()
        };
        assert!(day(1).today);
        assert!(day(1).disabled);
        assert!(day(20).selected);
        assert!(!day(20).disabled);
        // Monday the 13th is still inside the lead window.
        assert!(day(13).disabled);
        // Monday the 27th is selectable but not selected.
        assert!(!day(27).disabled);
        assert!(!day(27).selected);
    }

    #[test]
    fn test_lead_time_past_month_end_disables_whole_month() {
        // Today near the end of January: cutoff lands in February, so every
        // day of January's grid is disabled and February's target weekdays
        // past the cutoff are selectable.
        let today = date(2025, 1, 20);
        let january = month_grid(
            2025,
            1,
            today,
            Some(Weekday::Monday),
            None,
            MINIMUM_LEAD_DAYS,
        );
        assert!(january.days.iter().all(|cell| cell.disabled));

        let february = month_grid(
            2025,
            2,
            today,
            Some(Weekday::Monday),
            None,
            MINIMUM_LEAD_DAYS,
        );
        let selectable: Vec<u32> = february
            .days
            .iter()
            .filter(|cell| !cell.disabled)
            .map(|cell| cell.day)
            .collect();
        // Cutoff is 2025-02-03, itself a Monday.
        assert_eq!(selectable, vec![3, 10, 17, 24]);
    }

    #[test]
    fn test_month_cursor_wraps_year() {
        assert_eq!(prev_month((2025, 1)), (2024, 12));
        assert_eq!(next_month((2024, 12)), (2025, 1));
        assert_eq!(next_month((2025, 6)), (2025, 7));
        assert_eq!(prev_month((2025, 7)), (2025, 6));
    }

    #[test]
    fn test_days_in_month_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 12), 31);
    }

    #[test]
    fn test_selection_lifecycle() {
        let today = date(2025, 1, 1);
        let mut selection = CalendarSelection::new(today, Some(Weekday::Monday));
        assert_eq!(selection.selected_date, Some(date(2025, 1, 20)));
        assert_eq!(selection.visible_month, (2025, 1));

        // Browsing does not change the selection.
        selection.show_next_month();
        assert_eq!(selection.visible_month, (2025, 2));
        assert_eq!(selection.selected_date, Some(date(2025, 1, 20)));

        // Picking a disabled date is a no-op.
        assert!(!selection.select(date(2025, 2, 4), today));
        assert_eq!(selection.selected_date, Some(date(2025, 1, 20)));

        // Picking a later Monday works and snaps the view to it.
        assert!(selection.select(date(2025, 2, 10), today));
        assert_eq!(selection.selected_date, Some(date(2025, 2, 10)));
        assert_eq!(selection.visible_month, (2025, 2));
    }

    #[test]
    fn test_selection_retarget_rescans() {
        let today = date(2025, 1, 1);
        let mut selection = CalendarSelection::new(today, Some(Weekday::Monday));
        selection.retarget(today, Some(Weekday::Friday));
        // First Friday at or after 2025-01-15 is the 17th.
        assert_eq!(selection.selected_date, Some(date(2025, 1, 17)));
        assert!(Weekday::Friday.matches(selection.selected_date.unwrap()));
    }
}
