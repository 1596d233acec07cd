use serde::{Deserialize, Serialize};

/// Claims read from the patient credential without signature verification.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CredentialClaims {
    #[serde(rename = "_id")]
    pub object_id: Option<String>,
    pub id: Option<String>,
    pub email: Option<String>,
    pub exp: Option<u64>,
    pub iat: Option<u64>,
}

impl CredentialClaims {
    pub fn user_id(&self) -> Option<&str> {
        [self.object_id.as_deref(), self.id.as_deref()]
            .into_iter()
            .flatten()
            .find(|id| !id.is_empty())
    }
}

/// Client-side identity hint. The backend re-derives and re-validates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    pub email: Option<String>,
}
