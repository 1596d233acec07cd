// libs/appointment-cell/src/services/payment.rs
use std::sync::Arc;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use shared_config::PortalConfig;

use crate::collaborators::PaymentProvider;
use crate::models::{
    AppointmentError, CheckoutOptions, CheckoutTheme, PaymentOrder, PaymentOutcome,
};
use crate::services::user_api::UserApi;

/// Bridges backend payment orders and the hosted checkout.
#[derive(Clone)]
pub struct PaymentSessionAdapter {
    api: UserApi,
    provider: Arc<dyn PaymentProvider>,
    key: String,
    name: String,
    description: String,
    theme_color: String,
}

impl PaymentSessionAdapter {
    pub fn new(config: &PortalConfig, api: UserApi, provider: Arc<dyn PaymentProvider>) -> Self {
        if !config.is_payment_configured() {
            warn!("Payment provider key missing; checkout sessions will be rejected by the provider");
        }

        Self {
            api,
            provider,
            key: config.razorpay_key_id.clone(),
            name: config.checkout_name.clone(),
            description: config.checkout_description.clone(),
            theme_color: config.theme_color.clone(),
        }
    }

    pub async fn create_order(
        &self,
        auth_token: &str,
        appointment_id: &str,
    ) -> Result<PaymentOrder, AppointmentError> {
        debug!("Requesting payment order for appointment {}", appointment_id);

        let order = self.api.create_payment_order(auth_token, appointment_id).await?;

        info!(
            "Payment order {} created for appointment {} ({} {})",
            order.id, appointment_id, order.amount, order.currency
        );
        Ok(order)
    }

    pub fn checkout_options(&self, order: &PaymentOrder) -> CheckoutOptions {
        CheckoutOptions {
            key: self.key.clone(),
            amount: order.amount,
            currency: order.currency.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            order_id: order.id.clone(),
            receipt: order.receipt.clone(),
            theme: CheckoutTheme {
                color: self.theme_color.clone(),
            },
        }
    }

    /// Waits for the patient to finish the hosted checkout.
    pub async fn open_session(&self, options: CheckoutOptions) -> Result<Value, AppointmentError> {
        let order_id = options.order_id.clone();
        debug!("Opening checkout for order {}", order_id);

        self.provider.open_checkout(options).await.map_err(|e| {
            error!("Checkout for order {} ended without a payment: {}", order_id, e);
            AppointmentError::from(e)
        })
    }

    pub async fn verify(&self, auth_token: &str, provider_payload: &Value) -> Result<(), AppointmentError> {
        self.api.verify_payment(auth_token, provider_payload).await.map_err(|e| {
            error!("Payment verification failed: {}", e);
            e
        })
    }
}

/// Handle on a running checkout. The session keeps going if the handle is
/// dropped; call [`PaymentTask::abort`] to stop it.
#[derive(Debug)]
pub struct PaymentTask {
    order_id: String,
    handle: JoinHandle<PaymentOutcome>,
}

impl PaymentTask {
    pub(crate) fn new(order_id: String, handle: JoinHandle<PaymentOutcome>) -> Self {
        Self { order_id, handle }
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn abort(&self) {
        self.handle.abort();
    }

    pub async fn outcome(self) -> PaymentOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                if !e.is_cancelled() {
                    error!("Payment task for order {} panicked: {}", self.order_id, e);
                }
                PaymentOutcome::Aborted
            }
        }
    }
}
