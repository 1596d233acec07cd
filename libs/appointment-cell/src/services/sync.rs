// libs/appointment-cell/src/services/sync.rs
use std::sync::Arc;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use shared_config::PortalConfig;

use crate::collaborators::{DoctorRoster, Navigator, Notifier, PaymentProvider, APPOINTMENTS_ROUTE};
use crate::models::{Appointment, AppointmentError, CheckoutError, CheckoutOptions, PaymentOutcome};
use crate::services::payment::{PaymentSessionAdapter, PaymentTask};
use crate::services::session::SessionContext;
use crate::services::store::AppointmentStore;
use crate::services::user_api::UserApi;

pub const FETCH_FAILED: &str = "Failed to fetch appointments.";
pub const CANCEL_SUCCEEDED: &str = "Appointment cancelled";
pub const CANCEL_FAILED: &str = "An error occurred.";
pub const PAYMENT_INIT_REJECTED: &str = "Payment initiation failed";
pub const PAYMENT_INIT_ERROR: &str = "Error initiating payment";
pub const PAYMENT_SUCCEEDED: &str = "Payment successful";
pub const PAYMENT_VERIFICATION_FAILED: &str = "Payment verification failed";
pub const LOGIN_REQUIRED: &str = "Please log in to continue.";

/// Presentation-side collaborators the controller reports to.
#[derive(Clone)]
pub struct Collaborators {
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
    pub roster: Arc<dyn DoctorRoster>,
    pub payment_provider: Arc<dyn PaymentProvider>,
}

/// Orchestrates fetch, cancel and pay against the backend.
///
/// Every mutating action ends with a full re-fetch; the store is only ever
/// written from a backend listing.
#[derive(Clone)]
pub struct SyncController {
    session: Arc<SessionContext>,
    store: Arc<AppointmentStore>,
    api: UserApi,
    payments: PaymentSessionAdapter,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    roster: Arc<dyn DoctorRoster>,
}

impl SyncController {
    pub fn new(config: &PortalConfig, session: Arc<SessionContext>, collaborators: Collaborators) -> Self {
        let api = UserApi::new(config);
        let payments = PaymentSessionAdapter::new(config, api.clone(), collaborators.payment_provider);

        Self {
            session,
            store: Arc::new(AppointmentStore::new()),
            api,
            payments,
            notifier: collaborators.notifier,
            navigator: collaborators.navigator,
            roster: collaborators.roster,
        }
    }

    pub fn store(&self) -> &AppointmentStore {
        &self.store
    }

    /// Initial load when the view comes up.
    pub async fn mount(&self) {
        if self.session.has_credential() {
            let _ = self.fetch_appointments().await;
        } else {
            debug!("No credential at mount; skipping appointment sync");
        }
    }

    /// Swaps the credential and re-syncs if it changed to a present value.
    pub async fn set_credential(&self, credential: Option<String>) {
        if self.session.set_credential(credential) && self.session.has_credential() {
            let _ = self.fetch_appointments().await;
        }
    }

    pub fn teardown(&self) {
        self.session.teardown();
    }

    /// Reloads the store from the backend and returns what it now holds.
    ///
    /// On any failure the previous list is kept and a notice is raised.
    pub async fn fetch_appointments(&self) -> Result<Vec<Appointment>, AppointmentError> {
        let Some(token) = self.session.credential() else {
            debug!("No credential; appointment fetch not attempted");
            return Err(AppointmentError::MissingCredential);
        };

        let ticket = self.store.begin_fetch();
        debug!("Fetching appointments (#{})", ticket.seq());

        match self.api.list_appointments(&token).await {
            Ok(appointments) => {
                if self.store.replace(&ticket, appointments) {
                    info!("Appointment store refreshed: {} appointments", self.store.len());
                }
                Ok(self.store.snapshot())
            }
            Err(e) => {
                error!("Failed to fetch appointments: {}", e);
                self.notifier.error(&e.user_message(FETCH_FAILED));
                Err(e)
            }
        }
    }

    /// Asks the backend to cancel. Whether the appointment can still be
    /// cancelled is the backend's call; no local state is consulted.
    pub async fn cancel_appointment(&self, appointment_id: &str) -> Result<(), AppointmentError> {
        let identity = self.session.advisory_identity();
        let token = self.session.credential();

        let (token, user_id) = match (token, identity) {
            (Some(token), Some(identity)) if !appointment_id.is_empty() => (token, identity.id),
            _ => {
                warn!("Cancel requested without appointment id or user identity");
                let err = AppointmentError::MissingIdentifier;
                self.notifier.error(&err.user_message(CANCEL_FAILED));
                return Err(err);
            }
        };

        match self.api.cancel_appointment(&token, appointment_id, &user_id).await {
            Ok(message) => {
                info!("Appointment {} cancelled", appointment_id);
                let message = message.filter(|m| !m.is_empty());
                self.notifier.success(message.as_deref().unwrap_or(CANCEL_SUCCEEDED));

                let _ = tokio::join!(self.fetch_appointments(), self.roster.refresh());
                Ok(())
            }
            Err(e) => {
                error!("Cancel of appointment {} failed: {}", appointment_id, e);
                self.notifier.error(&e.user_message(CANCEL_FAILED));
                Err(e)
            }
        }
    }

    /// Creates a payment order and opens the checkout on a background task.
    ///
    /// Returns once the checkout is open; the returned task resolves when the
    /// patient finishes and the backend has ruled on the payment.
    pub async fn request_payment_order(&self, appointment_id: &str) -> Result<PaymentTask, AppointmentError> {
        let Some(token) = self.session.credential() else {
            warn!("Payment requested without a credential");
            self.notifier.error(LOGIN_REQUIRED);
            return Err(AppointmentError::MissingCredential);
        };

        let order = match self.payments.create_order(&token, appointment_id).await {
            Ok(order) => order,
            Err(e) => {
                error!("Payment order for appointment {} failed: {}", appointment_id, e);
                let fallback = match &e {
                    AppointmentError::Rejected { .. } => PAYMENT_INIT_REJECTED,
                    _ => PAYMENT_INIT_ERROR,
                };
                self.notifier.error(&e.user_message(fallback));
                return Err(e);
            }
        };

        let options = self.payments.checkout_options(&order);
        let generation = self.session.generation();
        let controller = self.clone();

        let handle = tokio::spawn(async move {
            controller.complete_payment(token, options, generation).await
        });

        Ok(PaymentTask::new(order.id, handle))
    }

    async fn complete_payment(self, token: String, options: CheckoutOptions, generation: u64) -> PaymentOutcome {
        let order_id = options.order_id.clone();

        let payload: Value = match self.payments.open_session(options).await {
            Ok(payload) => payload,
            Err(AppointmentError::Checkout(CheckoutError::Dismissed)) => {
                info!("Checkout for order {} dismissed", order_id);
                return PaymentOutcome::Dismissed;
            }
            Err(_) => {
                if self.session.is_current(generation) {
                    self.notifier.error(PAYMENT_VERIFICATION_FAILED);
                }
                return PaymentOutcome::SessionFailed;
            }
        };

        if let Err(e) = self.payments.verify(&token, &payload).await {
            if self.session.is_current(generation) {
                self.notifier.error(&e.user_message(PAYMENT_VERIFICATION_FAILED));
            } else {
                info!("Payment for order {} rejected after its session ended", order_id);
            }
            return PaymentOutcome::VerificationFailed;
        }

        if !self.session.is_current(generation) {
            info!("Payment for order {} verified after its session ended; not refreshing", order_id);
            return PaymentOutcome::Stale;
        }

        info!("Payment for order {} verified", order_id);
        self.notifier.success(PAYMENT_SUCCEEDED);
        let _ = self.fetch_appointments().await;
        self.navigator.navigate(APPOINTMENTS_ROUTE);

        PaymentOutcome::Verified
    }
}
