use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// The three residential pickup streams a property can sign up for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    Trash,
    Recycling,
    Compost,
}

impl ServiceKind {
    pub fn all() -> [ServiceKind; 3] {
        [ServiceKind::Trash, ServiceKind::Recycling, ServiceKind::Compost]
    }

    /// Display label for breakdown rows and form headings.
    pub fn label(&self) -> &'static str {
        match self {
            ServiceKind::Trash => "Trash",
            ServiceKind::Recycling => "Recycling",
            ServiceKind::Compost => "Compost",
        }
    }

    /// Stable lowercase key, used for form element ids and as part of the
    /// schedule's natural key on the persistence side.
    pub fn key(&self) -> &'static str {
        match self {
            ServiceKind::Trash => "trash",
            ServiceKind::Recycling => "recycling",
            ServiceKind::Compost => "compost",
        }
    }
}

/// Pickup cadence. `None` means the service is inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Weekly,
    Biweekly,
    Monthly,
    None,
}

impl Frequency {
    /// Flat monthly per-can rate for this cadence.
    pub fn unit_price(&self) -> f64 {
        match self {
            Frequency::Weekly => 10.00,
            Frequency::Biweekly => 5.00,
            Frequency::Monthly => 2.50,
            Frequency::None => 0.00,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Weekly => "Weekly",
            Frequency::Biweekly => "Every other week",
            Frequency::Monthly => "Monthly",
            Frequency::None => "No pickup",
        }
    }

    /// Parse a form select value. Anything unrecognized is treated as "no
    /// pickup" rather than an error.
    pub fn parse(value: &str) -> Frequency {
        match value.trim().to_lowercase().as_str() {
            "weekly" => Frequency::Weekly,
            "biweekly" => Frequency::Biweekly,
            "monthly" => Frequency::Monthly,
            _ => Frequency::None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Frequency::Weekly => "weekly",
            Frequency::Biweekly => "biweekly",
            Frequency::Monthly => "monthly",
            Frequency::None => "none",
        }
    }
}

/// Day of week, indexed 0 = Sunday through 6 = Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub fn all() -> [Weekday; 7] {
        [
            Weekday::Sunday,
            Weekday::Monday,
            Weekday::Tuesday,
            Weekday::Wednesday,
            Weekday::Thursday,
            Weekday::Friday,
            Weekday::Saturday,
        ]
    }

    pub fn index(&self) -> u32 {
        match self {
            Weekday::Sunday => 0,
            Weekday::Monday => 1,
            Weekday::Tuesday => 2,
            Weekday::Wednesday => 3,
            Weekday::Thursday => 4,
            Weekday::Friday => 5,
            Weekday::Saturday => 6,
        }
    }

    pub fn from_index(index: u32) -> Option<Weekday> {
        Weekday::all().get(index as usize).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }

    /// Parse a form select value, case-insensitively. Returns `None` for
    /// anything that is not a weekday name so callers can fall back to the
    /// relaxed calendar behavior.
    pub fn parse(value: &str) -> Option<Weekday> {
        match value.trim().to_lowercase().as_str() {
            "sunday" => Some(Weekday::Sunday),
            "monday" => Some(Weekday::Monday),
            "tuesday" => Some(Weekday::Tuesday),
            "wednesday" => Some(Weekday::Wednesday),
            "thursday" => Some(Weekday::Thursday),
            "friday" => Some(Weekday::Friday),
            "saturday" => Some(Weekday::Saturday),
            _ => None,
        }
    }

    pub fn from_chrono(day: chrono::Weekday) -> Weekday {
        match day {
            chrono::Weekday::Sun => Weekday::Sunday,
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
        }
    }

    /// Whether `date` falls on this weekday.
    pub fn matches(&self, date: NaiveDate) -> bool {
        Weekday::from_chrono(date.weekday()) == *self
    }
}

/// Form state for one service stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSelection {
    pub kind: ServiceKind,
    pub enabled: bool,
    pub frequency: Frequency,
    pub quantity: u32,
    pub pickup_weekday: Option<Weekday>,
}

impl ServiceSelection {
    /// An untouched, inactive selection: no cadence, no cans.
    pub fn disabled(kind: ServiceKind) -> ServiceSelection {
        ServiceSelection {
            kind,
            enabled: false,
            frequency: Frequency::None,
            quantity: 0,
            pickup_weekday: None,
        }
    }

    /// Whether this selection actually charges and schedules anything.
    /// Ignores `enabled`: without a cadence and at least one can, nothing
    /// is billed regardless of the checkbox.
    pub fn is_active(&self) -> bool {
        self.frequency != Frequency::None && self.quantity > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_index_round_trip() {
        for day in Weekday::all() {
            assert_eq!(Weekday::from_index(day.index()), Some(day));
        }
        assert_eq!(Weekday::from_index(7), None);
    }

    #[test]
    fn test_weekday_parse() {
        assert_eq!(Weekday::parse("Monday"), Some(Weekday::Monday));
        assert_eq!(Weekday::parse("  friday "), Some(Weekday::Friday));
        assert_eq!(Weekday::parse(""), None);
        assert_eq!(Weekday::parse("Funday"), None);
    }

    #[test]
    fn test_weekday_matches() {
        // 2025-01-01 was a Wednesday.
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert!(Weekday::Wednesday.matches(date));
        assert!(!Weekday::Monday.matches(date));
    }

    #[test]
    fn test_frequency_parse_defaults_to_none() {
        assert_eq!(Frequency::parse("weekly"), Frequency::Weekly);
        assert_eq!(Frequency::parse("BIWEEKLY"), Frequency::Biweekly);
        assert_eq!(Frequency::parse("fortnightly"), Frequency::None);
        assert_eq!(Frequency::parse(""), Frequency::None);
    }

    #[test]
    fn test_unit_prices_decrease_with_cadence() {
        assert!(Frequency::Weekly.unit_price() > Frequency::Biweekly.unit_price());
        assert!(Frequency::Biweekly.unit_price() > Frequency::Monthly.unit_price());
        assert_eq!(Frequency::None.unit_price(), 0.0);
    }

    #[test]
    fn test_disabled_selection_is_inactive() {
        let selection = ServiceSelection::disabled(ServiceKind::Trash);
        assert!(!selection.is_active());
        assert_eq!(selection.quantity, 0);
        assert_eq!(selection.frequency, Frequency::None);
    }

    #[test]
    fn test_is_active_ignores_enabled_flag() {
        let mut selection = ServiceSelection::disabled(ServiceKind::Recycling);
        selection.enabled = true;
        // Enabled but no cadence: still charges nothing.
        assert!(!selection.is_active());

        selection.frequency = Frequency::Weekly;
        selection.quantity = 1;
        selection.enabled = false;
        // Cadence and quantity present: active regardless of the checkbox.
        assert!(selection.is_active());
    }
}
