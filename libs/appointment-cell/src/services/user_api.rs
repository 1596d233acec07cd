// libs/appointment-cell/src/services/user_api.rs
use serde_json::Value;
use tracing::{debug, warn};

use shared_backend::BackendClient;
use shared_config::PortalConfig;
use shared_models::error::ApiError;

use crate::models::{
    AckResponse, Appointment, AppointmentError, AppointmentsResponse,
    CancelAppointmentRequest, PaymentOrder, PaymentOrderRequest, PaymentOrderResponse,
};

pub const APPOINTMENTS_PATH: &str = "/api/user/appointments";
pub const CANCEL_PATH: &str = "/api/user/cancel-appointment";
pub const PAYMENT_ORDER_PATH: &str = "/api/user/payment-razorpay";
pub const VERIFY_PAYMENT_PATH: &str = "/api/user/verifyRazorpay";

/// Patient endpoints of the backend. A `success: false` envelope is turned
/// into an error here so callers only deal with `Result`.
#[derive(Clone)]
pub struct UserApi {
    backend: BackendClient,
}

impl UserApi {
    pub fn new(config: &PortalConfig) -> Self {
        Self {
            backend: BackendClient::new(config),
        }
    }

    /// Appointments in backend (insertion) order.
    pub async fn list_appointments(&self, auth_token: &str) -> Result<Vec<Appointment>, AppointmentError> {
        let response: AppointmentsResponse = self.backend.get(APPOINTMENTS_PATH, auth_token).await?;

        if !response.success {
            warn!("Appointment listing rejected: {:?}", response.message);
            return Err(AppointmentError::Rejected { message: response.message });
        }

        debug!("Backend returned {} appointments", response.appointments.len());
        Ok(response.appointments)
    }

    /// Returns the backend's confirmation message, if it sent one.
    pub async fn cancel_appointment(
        &self,
        auth_token: &str,
        appointment_id: &str,
        user_id: &str,
    ) -> Result<Option<String>, AppointmentError> {
        let request = CancelAppointmentRequest {
            appointment_id: appointment_id.to_string(),
            user_id: user_id.to_string(),
        };

        let response: AckResponse = self.backend.post(CANCEL_PATH, auth_token, &request).await?;

        if !response.success {
            return Err(AppointmentError::Rejected { message: response.message });
        }

        Ok(response.message)
    }

    pub async fn create_payment_order(
        &self,
        auth_token: &str,
        appointment_id: &str,
    ) -> Result<PaymentOrder, AppointmentError> {
        let request = PaymentOrderRequest {
            appointment_id: appointment_id.to_string(),
        };

        let response: PaymentOrderResponse = self.backend.post(PAYMENT_ORDER_PATH, auth_token, &request).await?;

        if !response.success {
            return Err(AppointmentError::Rejected { message: response.message });
        }

        response.order.ok_or_else(|| {
            AppointmentError::Api(ApiError::Decode("payment order missing from response".to_string()))
        })
    }

    /// Forwards the provider's completion payload verbatim.
    pub async fn verify_payment(&self, auth_token: &str, provider_payload: &Value) -> Result<(), AppointmentError> {
        let response: AckResponse = self.backend.post(VERIFY_PAYMENT_PATH, auth_token, provider_payload).await?;

        if !response.success {
            return Err(AppointmentError::VerificationFailed { message: response.message });
        }

        Ok(())
    }
}
