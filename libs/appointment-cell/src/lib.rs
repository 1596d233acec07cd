// libs/appointment-cell/src/lib.rs
//! # Appointment Cell
//!
//! Patient-side view of the appointment platform: keeps a local list of the
//! patient's appointments in step with the backend and drives the cancel and
//! online payment workflows.
//!
//! ```text
//! +-----------------------------------------------------+
//! |                Appointment Cell                     |
//! +-----------------------------------------------------+
//! |  models.rs        |  Wire types, stages, errors     |
//! |  collaborators.rs |  Notifier, Navigator, roster,   |
//! |                   |  payment provider seams         |
//! |  services/        |                                 |
//! |    schedule.rs    |  Slot date labels               |
//! |    lifecycle.rs   |  Stage derivation               |
//! |    store.rs       |  Appointment store              |
//! |    session.rs     |  Credential + generation        |
//! |    user_api.rs    |  /api/user/* endpoints          |
//! |    payment.rs     |  Payment session adapter        |
//! |    roster.rs      |  Doctor roster client           |
//! |    sync.rs        |  Sync controller                |
//! +-----------------------------------------------------+
//! ```
//!
//! The store is never edited locally: cancel and payment both end with a
//! full re-fetch, so what is rendered is always what the backend last said.

pub mod collaborators;
pub mod models;
pub mod services;

pub use collaborators::*;
pub use models::*;
pub use services::*;
