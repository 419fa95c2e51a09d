use gloo::net::http::Request;
use shared::{
    DueRemindersResponse, Profile, ProfileUpsertRequest, ReminderLogRequest,
    ScheduleUpsertRequest, ServiceSchedule, SignupConfig, Subscription,
    SubscriptionInsertRequest, Weekday,
};

/// Client for the persistence API. Profiles upsert by email, schedules by
/// profile + service kind, so retrying a failed completion overwrites
/// rather than duplicates.
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &SignupConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
        }
    }

    /// Create or update the profile keyed by its email.
    pub async fn upsert_profile(&self, request: ProfileUpsertRequest) -> Result<Profile, String> {
        let url = format!("{}/api/profiles", self.base_url);

        match Request::post(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<Profile>().await {
                        Ok(data) => Ok(data),
                        Err(e) => Err(format!("Failed to parse profile: {}", e)),
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

    /// Create or update one service schedule row.
    pub async fn upsert_service_schedule(
        &self,
        request: ScheduleUpsertRequest,
    ) -> Result<ServiceSchedule, String> {
        let url = format!("{}/api/schedules", self.base_url);

        match Request::post(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<ServiceSchedule>().await {
                        Ok(data) => Ok(data),
                        Err(e) => Err(format!("Failed to parse schedule: {}", e)),
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

    /// Schedules (joined with their profiles) whose pickup lands on the
    /// given weekday.
    pub async fn query_due_reminders(
        &self,
        weekday: Weekday,
    ) -> Result<DueRemindersResponse, String> {
        let url = format!(
            "{}/api/reminders/due?weekday={}",
            self.base_url,
            weekday.index()
        );

        match Request::get(&url).send().await {
            Ok(response) => match response.json::<DueRemindersResponse>().await {
                Ok(data) => Ok(data),
                Err(e) => Err(format!("Failed to parse due reminders: {}", e)),
            },
            Err(e) => Err(format!("Failed to fetch due reminders: {}", e)),
        }
    }

    /// Append a reminder-send audit row.
    pub async fn insert_reminder_log(&self, request: ReminderLogRequest) -> Result<(), String> {
        let url = format!("{}/api/reminders/log", self.base_url);

        match Request::post(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    Ok(())
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

    /// Record a billed subscription after checkout completes.
    pub async fn insert_service_subscription(
        &self,
        request: SubscriptionInsertRequest,
    ) -> Result<Subscription, String> {
        let url = format!("{}/api/subscriptions", self.base_url);

        match Request::post(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<Subscription>().await {
                        Ok(data) => Ok(data),
                        Err(e) => Err(format!("Failed to parse subscription: {}", e)),
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
}
