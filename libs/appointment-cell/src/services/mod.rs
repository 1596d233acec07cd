// libs/appointment-cell/src/services/mod.rs

pub mod lifecycle;
pub mod payment;
pub mod roster;
pub mod schedule;
pub mod session;
pub mod store;
pub mod sync;
pub mod user_api;

pub use payment::{PaymentSessionAdapter, PaymentTask};
pub use roster::DoctorRosterClient;
pub use schedule::format_slot_date;
pub use session::SessionContext;
pub use store::AppointmentStore;
pub use sync::{Collaborators, SyncController};
pub use user_api::UserApi;
