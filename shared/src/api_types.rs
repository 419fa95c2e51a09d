//! Request/response types for the three external collaborators: the
//! persistence API, the notification API, and the checkout API. Wire
//! details beyond these shapes belong to the services that own them;
//! conflict resolution on the persistence side is upsert-by-natural-key
//! (profile: email; schedule: profile + service kind).

use serde::{Deserialize, Serialize};

use crate::model::{Frequency, ServiceKind, Weekday};
use crate::verification::ContactMethod;

/// Profile fields, upserted by email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpsertRequest {
    pub email: String,
    pub name: String,
    pub phone: String,
    pub street_address: Option<String>,
    /// Preferred channel for pickup-day reminders.
    pub reminder_method: Option<ContactMethod>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub phone: String,
    pub street_address: Option<String>,
    pub reminder_method: Option<ContactMethod>,
    /// RFC 3339 timestamps.
    pub created_at: String,
    pub updated_at: String,
}

/// Schedule row, upserted by profile email + service kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleUpsertRequest {
    pub profile_email: String,
    pub service: ServiceKind,
    pub frequency: Frequency,
    pub quantity: u32,
    pub pickup_weekday: Weekday,
    /// First pickup date, YYYY-MM-DD.
    pub start_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSchedule {
    pub id: String,
    pub profile_id: String,
    pub service: ServiceKind,
    pub frequency: Frequency,
    pub quantity: u32,
    pub pickup_weekday: Weekday,
    pub start_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// A schedule joined with its profile, due for a reminder on the queried
/// weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DueReminder {
    pub schedule: ServiceSchedule,
    pub profile: Profile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DueRemindersResponse {
    pub reminders: Vec<DueReminder>,
}

/// Audit row written after each reminder send attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderLogRequest {
    pub schedule_id: String,
    pub template: NotificationTemplate,
    pub recipient: String,
    pub delivered: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionInsertRequest {
    pub profile_email: String,
    pub monthly_total: f64,
    /// Opaque reference handed back by the checkout provider, if any.
    pub checkout_reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub profile_id: String,
    pub monthly_total: f64,
    pub started_at: String,
}

/// The two message templates this client sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationTemplate {
    VerificationCode,
    ServiceReminder,
}

impl NotificationTemplate {
    pub fn id(&self) -> &'static str {
        match self {
            NotificationTemplate::VerificationCode => "verification-code",
            NotificationTemplate::ServiceReminder => "service-reminder",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRecipient {
    pub id: String,
    pub email: Option<String>,
    pub number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub template: NotificationTemplate,
    pub recipient: NotificationRecipient,
    /// Template substitutions, e.g. {"code": "042117"}.
    pub merge_fields: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationResponse {
    pub success: bool,
    pub message: Option<String>,
}

/// One checkout line, priced server-side by plan id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutItem {
    pub plan: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub mode: String,
    pub items: Vec<CheckoutItem>,
    pub success_url: String,
    pub cancel_url: String,
    pub customer_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutApiError {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub error: Option<CheckoutApiError>,
    /// Where the provider wants the browser sent.
    pub redirect_url: Option<String>,
}

/// Result of the serviceability lookup, handed between pages via browser
/// storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressCheck {
    pub street: String,
    pub zip: String,
    pub serviceable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_ids() {
        assert_eq!(NotificationTemplate::VerificationCode.id(), "verification-code");
        assert_eq!(NotificationTemplate::ServiceReminder.id(), "service-reminder");
    }

    #[test]
    fn test_template_serializes_as_kebab_case() {
        let json = serde_json::to_string(&NotificationTemplate::VerificationCode).unwrap();
        assert_eq!(json, "\"verification-code\"");
    }

    #[test]
    fn test_schedule_upsert_carries_natural_key() {
        let request = ScheduleUpsertRequest {
            profile_email: "pat@example.com".to_string(),
            service: ServiceKind::Trash,
            frequency: Frequency::Weekly,
            quantity: 1,
            pickup_weekday: Weekday::Monday,
            start_date: Some("2025-01-20".to_string()),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["profile_email"], "pat@example.com");
        assert_eq!(json["service"], "trash");
        assert_eq!(json["pickup_weekday"], "monday");
    }
}
