use std::sync::Mutex;
use async_trait::async_trait;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use appointment_cell::{CheckoutError, CheckoutOptions, Navigator, Notifier, PaymentProvider};

pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn success(&self, message: &str) {
        println!("[ok] {}", message);
    }

    fn error(&self, message: &str) {
        eprintln!("[error] {}", message);
    }
}

/// Remembers the current route so repeated navigation is a no-op.
pub struct TerminalNavigator {
    current: Mutex<String>,
}

impl TerminalNavigator {
    pub fn new(initial_route: &str) -> Self {
        Self {
            current: Mutex::new(initial_route.to_string()),
        }
    }

    pub fn current(&self) -> String {
        self.current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: &str) {
        let mut current = self.current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if *current == route {
            debug!("Already on {}", route);
            return;
        }

        info!("Navigating to {}", route);
        *current = route.to_string();
    }
}

/// Prints the checkout options as JSON for an external checkout page and
/// reads the provider's completion payload back as one JSON line on stdin.
/// An empty line means the patient closed the checkout.
pub struct StdinCheckout;

#[async_trait]
impl PaymentProvider for StdinCheckout {
    async fn open_checkout(&self, options: CheckoutOptions) -> Result<Value, CheckoutError> {
        let rendered = serde_json::to_string_pretty(&options)
            .map_err(|e| CheckoutError::Unavailable(e.to_string()))?;

        println!("Open the checkout with these options:\n{}", rendered);
        println!("Paste the payment response JSON (empty line to cancel):");

        let mut line = String::new();
        BufReader::new(tokio::io::stdin())
            .read_line(&mut line)
            .await
            .map_err(|e| CheckoutError::Unavailable(e.to_string()))?;

        parse_provider_response(&line)
    }
}

fn parse_provider_response(line: &str) -> Result<Value, CheckoutError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(CheckoutError::Dismissed);
    }

    let payload: Value = serde_json::from_str(line)
        .map_err(|e| CheckoutError::InvalidResponse(e.to_string()))?;

    if !payload.is_object() {
        return Err(CheckoutError::InvalidResponse("expected a JSON object".to_string()));
    }

    Ok(payload)
}
