// libs/appointment-cell/src/services/roster.rs
use std::sync::RwLock;
use async_trait::async_trait;
use tracing::{debug, warn};

use shared_backend::BackendClient;
use shared_config::PortalConfig;

use crate::collaborators::DoctorRoster;
use crate::models::{DoctorListResponse, DoctorSnapshot};

pub const DOCTOR_LIST_PATH: &str = "/api/doctor/list";

/// Cached public doctor listing, refreshed when an appointment frees a slot.
pub struct DoctorRosterClient {
    backend: BackendClient,
    doctors: RwLock<Vec<DoctorSnapshot>>,
}

impl DoctorRosterClient {
    pub fn new(config: &PortalConfig) -> Self {
        Self {
            backend: BackendClient::new(config),
            doctors: RwLock::new(Vec::new()),
        }
    }

    pub fn doctors(&self) -> Vec<DoctorSnapshot> {
        self.doctors
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl DoctorRoster for DoctorRosterClient {
    async fn refresh(&self) {
        match self.backend.get_public::<DoctorListResponse>(DOCTOR_LIST_PATH).await {
            Ok(response) if response.success => {
                debug!("Doctor roster refreshed: {} doctors", response.doctors.len());
                *self.doctors
                    .write()
                    .unwrap_or_else(|poisoned| poisoned.into_inner()) = response.doctors;
            }
            Ok(response) => {
                warn!("Doctor roster refresh rejected: {:?}", response.message);
            }
            Err(e) => {
                warn!("Doctor roster refresh failed: {}", e);
            }
        }
    }
}
