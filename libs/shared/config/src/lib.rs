use std::env;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:4000";
pub const DEFAULT_CHECKOUT_NAME: &str = "Appointment Payment";
pub const DEFAULT_CHECKOUT_DESCRIPTION: &str = "Doctor appointment payment";
pub const DEFAULT_THEME_COLOR: &str = "#0f172a";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    pub backend_url: String,
    pub razorpay_key_id: String,
    pub checkout_name: String,
    pub checkout_description: String,
    pub theme_color: String,
}

impl PortalConfig {
    pub fn from_env() -> Self {
        let config = Self {
            backend_url: env::var("PORTAL_BACKEND_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| {
                    warn!("PORTAL_BACKEND_URL not set, using default");
                    DEFAULT_BACKEND_URL.to_string()
                }),
            razorpay_key_id: env::var("RAZORPAY_KEY_ID")
                .unwrap_or_else(|_| {
                    warn!("RAZORPAY_KEY_ID not set, using empty value");
                    String::new()
                }),
            checkout_name: env::var("PORTAL_CHECKOUT_NAME")
                .unwrap_or_else(|_| DEFAULT_CHECKOUT_NAME.to_string()),
            checkout_description: env::var("PORTAL_CHECKOUT_DESCRIPTION")
                .unwrap_or_else(|_| DEFAULT_CHECKOUT_DESCRIPTION.to_string()),
            theme_color: env::var("PORTAL_THEME_COLOR")
                .unwrap_or_else(|_| DEFAULT_THEME_COLOR.to_string()),
        };

        if !config.is_payment_configured() {
            warn!("Online payment not configured - missing RAZORPAY_KEY_ID");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.backend_url.is_empty()
    }

    pub fn is_payment_configured(&self) -> bool {
        self.is_configured() && !self.razorpay_key_id.is_empty()
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            razorpay_key_id: String::new(),
            checkout_name: DEFAULT_CHECKOUT_NAME.to_string(),
            checkout_description: DEFAULT_CHECKOUT_DESCRIPTION.to_string(),
            theme_color: DEFAULT_THEME_COLOR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_not_payment_ready() {
        let config = PortalConfig::default();
        assert!(config.is_configured());
        assert!(!config.is_payment_configured());
        assert_eq!(config.theme_color, "#0f172a");
    }

    #[test]
    fn test_payment_configured_with_key() {
        let config = PortalConfig {
            razorpay_key_id: "rzp_test_key".to_string(),
            ..PortalConfig::default()
        };
        assert!(config.is_payment_configured());
    }

    #[test]
    fn test_empty_backend_url_is_unconfigured() {
        let config = PortalConfig {
            backend_url: String::new(),
            razorpay_key_id: "rzp_test_key".to_string(),
            ..PortalConfig::default()
        };
        assert!(!config.is_configured());
        assert!(!config.is_payment_configured());
    }
}
