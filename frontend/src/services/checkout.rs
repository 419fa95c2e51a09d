use gloo::net::http::Request;
use shared::{
    CheckoutItem, CheckoutRequest, CheckoutResponse, Frequency, PricingBreakdown, SignupConfig,
};

/// Client for the checkout API. Creating a session navigates the browser
/// away on success, so callers must park any state they need afterwards
/// in session storage before calling.
#[derive(Clone)]
pub struct CheckoutClient {
    base_url: String,
    success_url: String,
    cancel_url: String,
}

impl CheckoutClient {
    pub fn new(config: &SignupConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            success_url: config.checkout_success_url.clone(),
            cancel_url: config.checkout_cancel_url.clone(),
        }
    }

    /// Create a checkout session and send the browser to it. Only returns
    /// on failure; the error string is already user-facing copy.
    pub async fn redirect_to_checkout(
        &self,
        items: Vec<CheckoutItem>,
        customer_email: Option<String>,
    ) -> Result<(), String> {
        let url = format!("{}/api/checkout/session", self.base_url);
        let request = CheckoutRequest {
            mode: "subscription".to_string(),
            items,
            success_url: self.success_url.clone(),
            cancel_url: self.cancel_url.clone(),
            customer_email,
        };

        let response = match Request::post(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return Err(format!("Network error: {}", e)),
        };

        if !response.ok() {
            return Err(error_copy("unavailable").to_string());
        }

        let session = match response.json::<CheckoutResponse>().await {
            Ok(data) => data,
            Err(e) => return Err(format!("Failed to parse checkout response: {}", e)),
        };

        if let Some(error) = session.error {
            return Err(error_copy(&error.code).to_string());
        }

        match session.redirect_url {
            Some(redirect_url) => {
                let window = web_sys::window().ok_or("No window available")?;
                window
                    .location()
                    .set_href(&redirect_url)
                    .map_err(|_| "Failed to navigate to checkout".to_string())
            }
            None => Err(error_copy("unavailable").to_string()),
        }
    }
}

/// Build the checkout lines from a pricing breakdown: one base-fee line
/// plus one plan line per active service, priced server-side by plan id.
pub fn checkout_items(breakdown: &PricingBreakdown) -> Vec<CheckoutItem> {
    let mut items = Vec::new();
    if breakdown.has_charges() {
        items.push(CheckoutItem {
            plan: "base-service-fee".to_string(),
            quantity: 1,
        });
    }
    for line in &breakdown.line_items {
        if let Some(plan) = plan_for(line.frequency) {
            items.push(CheckoutItem {
                plan: format!("{}-{}", line.service.key(), plan),
                quantity: line.quantity,
            });
        }
    }
    items
}

fn plan_for(frequency: Frequency) -> Option<&'static str> {
    match frequency {
        Frequency::Weekly => Some("weekly"),
        Frequency::Biweekly => Some("biweekly"),
        Frequency::Monthly => Some("monthly"),
        Frequency::None => None,
    }
}

/// Map the checkout provider's error codes to fixed user-facing copy;
/// unknown codes get the generic retry message.
pub fn error_copy(code: &str) -> &'static str {
    match code {
        "card_declined" => "Your card was declined. Please try a different payment method.",
        "invalid_email" => "That email address doesn't look right — please check it and try again.",
        "rate_limited" => "Too many attempts — please wait a minute and try again.",
        _ => "Something went wrong — please try again.",
    }
}
