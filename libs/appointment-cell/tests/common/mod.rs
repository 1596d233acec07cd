#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use mockall::mock;
use serde_json::Value;
use tokio::sync::Notify;

use appointment_cell::{
    CheckoutError, CheckoutOptions, Collaborators, DoctorRoster, Navigator, Notifier,
    PaymentProvider, SessionContext, SyncController,
};
use shared_utils::test_utils::{JwtTestUtils, TestConfig, TestUser};

mock! {
    pub Nav {}
    impl Navigator for Nav {
        fn navigate(&self, route: &str);
    }
}

mock! {
    pub Roster {}
    #[async_trait]
    impl DoctorRoster for Roster {
        async fn refresh(&self);
    }
}

mock! {
    pub Checkout {}
    #[async_trait]
    impl PaymentProvider for Checkout {
        async fn open_checkout(&self, options: CheckoutOptions) -> Result<Value, CheckoutError>;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Success(String),
    Error(String),
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter_map(|n| match n {
                Notice::Error(message) => Some(message),
                Notice::Success(_) => None,
            })
            .collect()
    }

    pub fn successes(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter_map(|n| match n {
                Notice::Success(message) => Some(message),
                Notice::Error(_) => None,
            })
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.notices.lock().unwrap().push(Notice::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.notices.lock().unwrap().push(Notice::Error(message.to_string()));
    }
}

/// Checkout that stays open until the test releases it.
pub struct GatedCheckout {
    pub gate: Notify,
    pub payload: Value,
}

impl GatedCheckout {
    pub fn new(payload: Value) -> Self {
        Self {
            gate: Notify::new(),
            payload,
        }
    }

    pub fn complete(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl PaymentProvider for GatedCheckout {
    async fn open_checkout(&self, _options: CheckoutOptions) -> Result<Value, CheckoutError> {
        self.gate.notified().await;
        Ok(self.payload.clone())
    }
}

pub struct Harness {
    pub controller: SyncController,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn patient_token(user: &TestUser) -> String {
    JwtTestUtils::create_test_token(user, "test-secret", Some(24))
}

pub fn idle_navigator() -> MockNav {
    let mut navigator = MockNav::new();
    navigator.expect_navigate().never();
    navigator
}

pub fn idle_roster() -> MockRoster {
    let mut roster = MockRoster::new();
    roster.expect_refresh().never();
    roster
}

pub fn idle_checkout() -> MockCheckout {
    let mut checkout = MockCheckout::new();
    checkout.expect_open_checkout().never();
    checkout
}

pub fn build_harness(
    backend_url: &str,
    credential: Option<String>,
    navigator: MockNav,
    roster: MockRoster,
    payment_provider: Arc<dyn PaymentProvider>,
) -> Harness {
    let notifier = Arc::new(RecordingNotifier::default());
    let config = TestConfig::with_backend(backend_url).to_portal_config();

    let controller = SyncController::new(
        &config,
        Arc::new(SessionContext::new(credential)),
        Collaborators {
            notifier: notifier.clone(),
            navigator: Arc::new(navigator),
            roster: Arc::new(roster),
            payment_provider,
        },
    );

    Harness { controller, notifier }
}

pub fn stored_ids(controller: &SyncController) -> Vec<String> {
    controller.store().snapshot().into_iter().map(|a| a.id).collect()
}
