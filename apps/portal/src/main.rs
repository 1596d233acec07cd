use std::sync::Arc;
use anyhow::{bail, Result};
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod terminal;
mod view;

use appointment_cell::{
    Collaborators, DoctorRosterClient, PaymentOutcome, SessionContext, SyncController,
    APPOINTMENTS_ROUTE,
};
use shared_config::PortalConfig;

use terminal::{StdinCheckout, TerminalNavigator, TerminalNotifier};

enum Command {
    List,
    Cancel(String),
    Pay(String),
}

fn parse_command(args: &[String]) -> Result<Command> {
    match args {
        [] => Ok(Command::List),
        [cmd] if cmd == "list" => Ok(Command::List),
        [cmd, id] if cmd == "cancel" => Ok(Command::Cancel(id.clone())),
        [cmd, id] if cmd == "pay" => Ok(Command::Pay(id.clone())),
        _ => bail!("usage: amae-patient-portal [list | cancel <appointment-id> | pay <appointment-id>]"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Logs go to stderr so the rendered list stays clean on stdout
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_command(&args)?;

    info!("Starting Amae patient portal");

    let config = PortalConfig::from_env();
    let session = Arc::new(SessionContext::new(std::env::var("PORTAL_TOKEN").ok()));

    if !session.has_credential() {
        info!("PORTAL_TOKEN not set; nothing to sync");
    }

    let controller = SyncController::new(
        &config,
        session,
        Collaborators {
            notifier: Arc::new(TerminalNotifier),
            navigator: Arc::new(TerminalNavigator::new(APPOINTMENTS_ROUTE)),
            roster: Arc::new(DoctorRosterClient::new(&config)),
            payment_provider: Arc::new(StdinCheckout),
        },
    );

    controller.mount().await;

    match command {
        Command::List => {}
        Command::Cancel(id) => {
            let _ = controller.cancel_appointment(&id).await;
        }
        Command::Pay(id) => {
            if let Ok(task) = controller.request_payment_order(&id).await {
                let outcome = task.outcome().await;
                if outcome != PaymentOutcome::Verified {
                    info!("Payment finished without verification: {:?}", outcome);
                }
            }
        }
    }

    print!("{}", view::render(controller.store()));

    controller.teardown();
    Ok(())
}
