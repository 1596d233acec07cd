use async_trait::async_trait;
use serde_json::Value;

use crate::models::{CheckoutError, CheckoutOptions};

/// Route of the appointment list view.
pub const APPOINTMENTS_ROUTE: &str = "/my-appointments";

/// User-visible notices (toasts, status lines).
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Moves the presentation layer to a route. Navigating to the current route
/// must be a no-op.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

/// Keeps dependent doctor listings fresh after a slot is released.
#[async_trait]
pub trait DoctorRoster: Send + Sync {
    async fn refresh(&self);
}

/// Hosted checkout. Resolves with the provider's raw completion payload,
/// which is forwarded to the backend untouched for signature verification.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn open_checkout(&self, options: CheckoutOptions) -> Result<Value, CheckoutError>;
}
