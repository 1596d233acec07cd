use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use base64::{Engine as _, engine::general_purpose};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::PortalConfig;
use shared_models::auth::UserIdentity;

pub struct TestConfig {
    pub backend_url: String,
    pub razorpay_key_id: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:4000".to_string(),
            razorpay_key_id: "rzp_test_key".to_string(),
        }
    }
}

impl TestConfig {
    pub fn with_backend(backend_url: &str) -> Self {
        Self {
            backend_url: backend_url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_portal_config(&self) -> PortalConfig {
        PortalConfig {
            backend_url: self.backend_url.clone(),
            razorpay_key_id: self.razorpay_key_id.clone(),
            ..PortalConfig::default()
        }
    }
}

pub struct TestUser {
    pub id: String,
    pub email: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            email: "test@example.com".to_string(),
        }
    }
}

impl TestUser {
    pub fn patient(email: &str) -> Self {
        Self {
            email: email.to_string(),
            ..Self::default()
        }
    }

    pub fn to_identity(&self) -> UserIdentity {
        UserIdentity {
            id: self.id.clone(),
            email: Some(self.email.clone()),
        }
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(exp_hours.unwrap_or(24));

        Self::create_token_with_claims(
            &json!({
                "_id": user.id,
                "email": user.email,
                "iat": now.timestamp(),
                "exp": exp.timestamp()
            }),
            secret,
        )
    }

    pub fn create_token_with_claims(claims: &Value, secret: &str) -> String {
        let header = json!({
            "alg": "HS256",
            "typ": "JWT"
        });

        let header_encoded = general_purpose::URL_SAFE_NO_PAD.encode(header.to_string());
        let payload_encoded = general_purpose::URL_SAFE_NO_PAD.encode(claims.to_string());

        let signing_input = format!("{}.{}", header_encoded, payload_encoded);

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();
        let signature_encoded = general_purpose::URL_SAFE_NO_PAD.encode(signature);

        format!("{}.{}", signing_input, signature_encoded)
    }

    pub fn create_invalid_signature_token(user: &TestUser) -> String {
        Self::create_test_token(user, "wrong-secret", Some(24))
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }
}

pub struct MockBackendResponses;

impl MockBackendResponses {
    pub fn doctor_snapshot(name: &str, speciality: &str) -> Value {
        json!({
            "name": name,
            "speciality": speciality,
            "image": "https://cdn.example.com/doctors/portrait.png",
            "degree": "MBBS",
            "experience": "4 Years",
            "fees": 50,
            "address": {
                "line1": "17th Cross, Richmond",
                "line2": "Circle, Ring Road, London"
            }
        })
    }

    pub fn appointment(id: &str, slot_date: &str, payment: bool, cancelled: bool, is_completed: bool) -> Value {
        json!({
            "_id": id,
            "userId": "user-1",
            "docId": "doc-1",
            "slotDate": slot_date,
            "slotTime": "10:30 AM",
            "docData": Self::doctor_snapshot("Dr. Richard James", "General physician"),
            "amount": 50,
            "date": 1_735_689_600_000_i64,
            "payment": payment,
            "cancelled": cancelled,
            "isCompleted": is_completed
        })
    }

    pub fn appointments_response(appointments: Vec<Value>) -> Value {
        json!({
            "success": true,
            "appointments": appointments
        })
    }

    pub fn payment_order_response(order_id: &str, amount: u64) -> Value {
        json!({
            "success": true,
            "order": {
                "id": order_id,
                "entity": "order",
                "amount": amount,
                "currency": "INR",
                "receipt": "receipt-apt",
                "status": "created"
            }
        })
    }

    pub fn provider_payload(order_id: &str) -> Value {
        json!({
            "razorpay_order_id": order_id,
            "razorpay_payment_id": "pay_29QQoUBi66xm2f",
            "razorpay_signature": "9ef4dffbfd84f1318f6739a3ce19f9d85851857ae648f114332d8401e0949a3d"
        })
    }

    pub fn success_response(message: &str) -> Value {
        json!({
            "success": true,
            "message": message
        })
    }

    pub fn error_response(message: &str) -> Value {
        json!({
            "success": false,
            "message": message
        })
    }
}
