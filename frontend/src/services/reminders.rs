use serde_json::json;
use shared::{
    ContactInfo, ContactMethod, NotificationTemplate, ReminderLogRequest, Weekday,
};

use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::notify::{recipient_for, NotificationClient};

/// Outcome of one dispatch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSummary {
    pub sent: usize,
    pub failed: usize,
}

/// Send pickup-day reminders for every schedule due on the given weekday.
/// Each send is best-effort and individually logged; one bad recipient
/// never aborts the run.
pub async fn dispatch_due_reminders(
    api: &ApiClient,
    notify: &NotificationClient,
    weekday: Weekday,
) -> Result<DispatchSummary, String> {
    let due = api.query_due_reminders(weekday).await?;
    let mut summary = DispatchSummary { sent: 0, failed: 0 };

    for reminder in &due.reminders {
        let method = reminder
            .profile
            .reminder_method
            .unwrap_or(ContactMethod::Email);
        let contact = ContactInfo {
            method,
            value: match method {
                ContactMethod::Email => reminder.profile.email.clone(),
                ContactMethod::Sms => reminder.profile.phone.clone(),
            },
        };

        let outcome = notify
            .send(
                NotificationTemplate::ServiceReminder,
                recipient_for(&contact),
                json!({
                    "name": reminder.profile.name,
                    "service": reminder.schedule.service.label(),
                    "pickup_day": weekday.name(),
                }),
            )
            .await;

        let delivered = outcome.is_ok();
        if delivered {
            summary.sent += 1;
        } else {
            summary.failed += 1;
            Logger::warn_with_component(
                "reminders",
                &format!(
                    "Reminder send failed for schedule {}: {}",
                    reminder.schedule.id,
                    outcome.unwrap_err()
                ),
            );
        }

        let log = ReminderLogRequest {
            schedule_id: reminder.schedule.id.clone(),
            template: NotificationTemplate::ServiceReminder,
            recipient: contact.value.clone(),
            delivered,
        };
        if let Err(e) = api.insert_reminder_log(log).await {
            Logger::warn_with_component(
                "reminders",
                &format!("Failed to log reminder send: {}", e),
            );
        }
    }

    Ok(summary)
}
