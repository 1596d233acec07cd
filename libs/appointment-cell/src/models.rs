// libs/appointment-cell/src/models.rs
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use shared_models::error::ApiError;

use crate::services::{lifecycle, schedule};

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub line1: String,
    #[serde(default)]
    pub line2: String,
}

/// Doctor details copied onto the appointment when it was booked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DoctorSnapshot {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub speciality: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub address: Address,
    pub degree: Option<String>,
    pub experience: Option<String>,
    pub about: Option<String>,
    pub fees: Option<f64>,
    pub available: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub user_id: Option<String>,
    pub doc_id: Option<String>,
    #[serde(default)]
    pub slot_date: String,
    #[serde(default)]
    pub slot_time: String,
    #[serde(rename = "docData", default)]
    pub doctor: DoctorSnapshot,
    pub amount: Option<f64>,
    /// Booking time, epoch milliseconds.
    pub date: Option<i64>,
    #[serde(default)]
    pub payment: bool,
    #[serde(default)]
    pub cancelled: bool,
    #[serde(default)]
    pub is_completed: bool,
}

impl Appointment {
    pub fn stage(&self) -> LifecycleStage {
        lifecycle::derive_stage(self.payment, self.cancelled, self.is_completed)
    }

    pub fn available_actions(&self) -> &'static [AppointmentAction] {
        lifecycle::available_actions(self.stage())
    }

    /// `"5 Mar 2025 | 10:30 AM"`
    pub fn schedule_label(&self) -> String {
        format!("{} | {}", schedule::format_slot_date(&self.slot_date), self.slot_time)
    }

    pub fn booked_at(&self) -> Option<DateTime<Utc>> {
        self.date.and_then(|millis| Utc.timestamp_millis_opt(millis).single())
    }
}

/// Presentation state derived from the backend's boolean flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStage {
    Cancelled,
    Completed,
    PaidAwaitingCompletion,
    Actionable,
}

impl LifecycleStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, LifecycleStage::Cancelled | LifecycleStage::Completed)
    }

    /// Status badge shown in place of action buttons.
    pub fn badge(&self) -> Option<&'static str> {
        match self {
            LifecycleStage::Cancelled => Some("Appointment Cancelled"),
            LifecycleStage::Completed => Some("Appointment Completed"),
            LifecycleStage::PaidAwaitingCompletion => Some("Paid"),
            LifecycleStage::Actionable => None,
        }
    }
}

impl fmt::Display for LifecycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleStage::Cancelled => write!(f, "cancelled"),
            LifecycleStage::Completed => write!(f, "completed"),
            LifecycleStage::PaidAwaitingCompletion => write!(f, "paid_awaiting_completion"),
            LifecycleStage::Actionable => write!(f, "actionable"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentAction {
    Pay,
    Cancel,
}

impl AppointmentAction {
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentAction::Pay => "Pay Online",
            AppointmentAction::Cancel => "Cancel appointment",
        }
    }
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentsResponse {
    pub success: bool,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelAppointmentRequest {
    pub appointment_id: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOrderRequest {
    pub appointment_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AckResponse {
    pub success: bool,
    pub message: Option<String>,
}

/// Order created by the backend with the payment provider, amounts in the
/// currency's smallest unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentOrder {
    pub id: String,
    pub amount: u64,
    pub currency: String,
    pub receipt: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentOrderResponse {
    pub success: bool,
    pub order: Option<PaymentOrder>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DoctorListResponse {
    pub success: bool,
    #[serde(default)]
    pub doctors: Vec<DoctorSnapshot>,
    pub message: Option<String>,
}

// ==============================================================================
// PAYMENT SESSION MODELS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutTheme {
    pub color: String,
}

/// Options handed to the hosted checkout. The completion handler is not part
/// of the payload; it is the future returned by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutOptions {
    pub key: String,
    pub amount: u64,
    pub currency: String,
    pub name: String,
    pub description: String,
    pub order_id: String,
    pub receipt: Option<String>,
    pub theme: CheckoutTheme,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CheckoutError {
    #[error("Payment provider unavailable: {0}")]
    Unavailable(String),

    #[error("Checkout dismissed by the patient")]
    Dismissed,

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}

/// Terminal state of a payment session task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Verified,
    /// Verified by the backend after the session that started it was torn down.
    Stale,
    VerificationFailed,
    SessionFailed,
    Dismissed,
    Aborted,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppointmentError {
    #[error("appointmentId and userId are required.")]
    MissingIdentifier,

    #[error("No credential for this session")]
    MissingCredential,

    #[error("Rejected by backend: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { message: Option<String> },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Payment session failed: {0}")]
    Checkout(#[from] CheckoutError),

    #[error("Payment verification failed: {}", .message.as_deref().unwrap_or("no message"))]
    VerificationFailed { message: Option<String> },
}

impl AppointmentError {
    pub fn is_precondition(&self) -> bool {
        matches!(self, AppointmentError::MissingIdentifier | AppointmentError::MissingCredential)
    }

    /// Notice text: the backend's own message when it sent one, otherwise the
    /// operation's generic fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        let backend = match self {
            AppointmentError::MissingIdentifier => return self.to_string(),
            AppointmentError::Rejected { message }
            | AppointmentError::VerificationFailed { message } => message.as_deref(),
            AppointmentError::Api(err) => err.backend_message(),
            AppointmentError::MissingCredential | AppointmentError::Checkout(_) => None,
        };

        backend
            .filter(|m| !m.is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_appointment_deserializes_backend_shape() {
        let appointment: Appointment = serde_json::from_value(json!({
            "_id": "66f1c2",
            "userId": "u1",
            "docId": "d1",
            "slotDate": "05_3_2025",
            "slotTime": "10:30 AM",
            "docData": {
                "name": "Dr. Richard James",
                "speciality": "General physician",
                "image": "img.png",
                "address": { "line1": "17th Cross", "line2": "Ring Road" }
            },
            "amount": 50,
            "date": 1735689600000_i64,
            "payment": false,
            "cancelled": false,
            "isCompleted": true
        }))
        .unwrap();

        assert_eq!(appointment.id, "66f1c2");
        assert_eq!(appointment.doctor.address.line2, "Ring Road");
        assert!(appointment.is_completed);
        assert_eq!(appointment.stage(), LifecycleStage::Completed);
        assert_eq!(appointment.schedule_label(), "5 Mar 2025 | 10:30 AM");
        assert_eq!(
            appointment.booked_at().map(|d| d.to_rfc3339()),
            Some("2025-01-01T00:00:00+00:00".to_string())
        );
    }

    #[test]
    fn test_missing_flags_default_to_false() {
        let appointment: Appointment = serde_json::from_value(json!({
            "_id": "a",
            "slotDate": "1_1_2026"
        }))
        .unwrap();

        assert!(!appointment.payment && !appointment.cancelled && !appointment.is_completed);
        assert_eq!(appointment.stage(), LifecycleStage::Actionable);
        assert_eq!(appointment.available_actions(), &[AppointmentAction::Pay, AppointmentAction::Cancel]);
    }

    #[test]
    fn test_row_without_slot_date_still_loads() {
        let listing: AppointmentsResponse = serde_json::from_value(json!({
            "success": true,
            "appointments": [
                { "_id": "a", "slotDate": "05_3_2025", "slotTime": "10:30 AM" },
                { "_id": "b", "slotTime": "11:00 AM" }
            ]
        }))
        .unwrap();

        assert_eq!(listing.appointments.len(), 2);
        assert_eq!(listing.appointments[1].slot_date, "");
        assert_eq!(listing.appointments[1].schedule_label(), " | 11:00 AM");
    }

    #[test]
    fn test_user_message_prefers_backend_text() {
        let err = AppointmentError::Rejected { message: Some("Slot already cancelled".to_string()) };
        assert_eq!(err.user_message("An error occurred."), "Slot already cancelled");

        let err = AppointmentError::Rejected { message: None };
        assert_eq!(err.user_message("An error occurred."), "An error occurred.");

        let err = AppointmentError::Api(ApiError::Transport("connection reset".to_string()));
        assert_eq!(err.user_message("Failed to fetch appointments."), "Failed to fetch appointments.");

        let err = AppointmentError::Api(ApiError::Status {
            status: 401,
            message: Some("Not Authorized Login Again".to_string()),
        });
        assert_eq!(err.user_message("Failed to fetch appointments."), "Not Authorized Login Again");
    }

    #[test]
    fn test_precondition_message_is_fixed() {
        let err = AppointmentError::MissingIdentifier;
        assert!(err.is_precondition());
        assert_eq!(err.user_message("ignored"), "appointmentId and userId are required.");
    }

    #[test]
    fn test_checkout_options_wire_shape() {
        let options = CheckoutOptions {
            key: "rzp_test_key".to_string(),
            amount: 5000,
            currency: "INR".to_string(),
            name: "Appointment Payment".to_string(),
            description: "Doctor appointment payment".to_string(),
            order_id: "order_1".to_string(),
            receipt: Some("receipt-1".to_string()),
            theme: CheckoutTheme { color: "#0f172a".to_string() },
        };

        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(value["order_id"], json!("order_1"));
        assert_eq!(value["theme"]["color"], json!("#0f172a"));
    }
}
