use gloo::net::http::Request;
use serde_json::json;
use shared::{
    ContactInfo, ContactMethod, NotificationRecipient, NotificationRequest,
    NotificationResponse, NotificationTemplate, SignupConfig,
};
use uuid::Uuid;

/// Client for the notification API. One call per user action; the caller
/// decides whether a failure blocks (verification codes) or is ignored
/// (welcome messages).
#[derive(Clone, PartialEq)]
pub struct NotificationClient {
    base_url: String,
}

impl NotificationClient {
    pub fn new(config: &SignupConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
        }
    }

    pub async fn send(
        &self,
        template: NotificationTemplate,
        recipient: NotificationRecipient,
        merge_fields: serde_json::Value,
    ) -> Result<(), String> {
        let url = format!("{}/api/notifications/send", self.base_url);
        let request = NotificationRequest {
            template,
            recipient,
            merge_fields,
        };

        match Request::post(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<NotificationResponse>().await {
                        Ok(data) if data.success => Ok(()),
                        Ok(data) => Err(data
                            .message
                            .unwrap_or_else(|| "Notification was rejected".to_string())),
                        Err(e) => Err(format!("Failed to parse response: {}", e)),
                    }
                } else {
                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    Err(error_text)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Deliver a one-time verification code over the chosen channel.
    pub async fn send_verification_code(
        &self,
        contact: &ContactInfo,
        code: &str,
    ) -> Result<(), String> {
        self.send(
            NotificationTemplate::VerificationCode,
            recipient_for(contact),
            json!({ "code": code }),
        )
        .await
    }

    /// Welcome/reminder message; callers treat failures as best-effort.
    pub async fn send_welcome(&self, contact: &ContactInfo, name: &str) -> Result<(), String> {
        self.send(
            NotificationTemplate::ServiceReminder,
            recipient_for(contact),
            json!({ "name": name, "kind": "welcome" }),
        )
        .await
    }
}

/// Build a recipient with a client-minted id; the notification API wants
/// a stable id per send but has no account concept for signups.
pub fn recipient_for(contact: &ContactInfo) -> NotificationRecipient {
    let (email, number) = match contact.method {
        ContactMethod::Email => (Some(contact.value.clone()), None),
        ContactMethod::Sms => (None, Some(contact.value.clone())),
    };
    NotificationRecipient {
        id: Uuid::new_v4().to_string(),
        email,
        number,
    }
}
