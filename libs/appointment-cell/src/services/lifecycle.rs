// libs/appointment-cell/src/services/lifecycle.rs
use crate::models::{AppointmentAction, LifecycleStage};

const ACTIONABLE: &[AppointmentAction] = &[AppointmentAction::Pay, AppointmentAction::Cancel];

/// Resolves the backend flags into one stage. Rules are checked in order and
/// the first match wins: a recorded cancellation masks completion, and
/// completion masks payment.
pub fn derive_stage(payment: bool, cancelled: bool, is_completed: bool) -> LifecycleStage {
    if cancelled {
        LifecycleStage::Cancelled
    } else if is_completed {
        LifecycleStage::Completed
    } else if payment {
        LifecycleStage::PaidAwaitingCompletion
    } else {
        LifecycleStage::Actionable
    }
}

pub fn available_actions(stage: LifecycleStage) -> &'static [AppointmentAction] {
    match stage {
        LifecycleStage::Actionable => ACTIONABLE,
        LifecycleStage::Cancelled
        | LifecycleStage::Completed
        | LifecycleStage::PaidAwaitingCompletion => &[],
    }
}
