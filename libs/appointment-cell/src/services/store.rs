// libs/appointment-cell/src/services/store.rs
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use crate::models::Appointment;

#[derive(Default)]
struct StoreState {
    appointments: Vec<Appointment>,
    last_applied: u64,
}

/// Newest-first list of the patient's appointments plus the loading flag.
///
/// Readers take snapshots. Only the sync controller writes, and only with a
/// [`FetchTicket`]: a completion older than the last applied one is dropped,
/// so overlapping fetches settle on the most recently issued request.
#[derive(Default)]
pub struct AppointmentStore {
    state: RwLock<StoreState>,
    in_flight: AtomicUsize,
    issued: AtomicU64,
}

/// Marks a fetch as in flight until dropped.
pub struct FetchTicket<'a> {
    store: &'a AppointmentStore,
    seq: u64,
}

impl FetchTicket<'_> {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

impl Drop for FetchTicket<'_> {
    fn drop(&mut self) {
        self.store.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl AppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn snapshot(&self) -> Vec<Appointment> {
        self.read().appointments.clone()
    }

    pub fn get(&self, appointment_id: &str) -> Option<Appointment> {
        self.read()
            .appointments
            .iter()
            .find(|a| a.id == appointment_id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.read().appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().appointments.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub(crate) fn begin_fetch(&self) -> FetchTicket<'_> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        FetchTicket { store: self, seq }
    }

    /// Replaces the whole list with the backend's, reversed to newest-first.
    /// Returns false when a newer fetch has already been applied.
    pub(crate) fn replace(&self, ticket: &FetchTicket<'_>, mut backend_order: Vec<Appointment>) -> bool {
        let mut state = self.write();

        if ticket.seq <= state.last_applied {
            debug!(
                "Discarding fetch #{} (already applied #{})",
                ticket.seq, state.last_applied
            );
            return false;
        }

        backend_order.reverse();
        state.appointments = backend_order;
        state.last_applied = ticket.seq;
        true
    }
}
