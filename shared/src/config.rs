use serde::{Deserialize, Serialize};

/// Client configuration for the signup flows. Everything here is about
/// where the external collaborators live; domain constants (lead time,
/// quantity bounds, attempt caps) stay with the modules that own them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupConfig {
    /// Base URL of the persistence/notification API gateway.
    pub api_base_url: String,
    /// Where checkout sends the browser after payment.
    pub checkout_success_url: String,
    /// Where checkout sends the browser on cancel.
    pub checkout_cancel_url: String,
}

impl Default for SignupConfig {
    fn default() -> Self {
        SignupConfig {
            api_base_url: "http://localhost:3000".to_string(),
            checkout_success_url: "http://localhost:8080/?checkout=success".to_string(),
            checkout_cancel_url: "http://localhost:8080/?checkout=cancel".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_urls_are_absolute() {
        let config = SignupConfig::default();
        assert!(config.api_base_url.starts_with("http"));
        assert!(config.checkout_success_url.contains("checkout=success"));
        assert!(config.checkout_cancel_url.contains("checkout=cancel"));
    }
}
