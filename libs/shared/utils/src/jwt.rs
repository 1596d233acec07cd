use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use tracing::debug;
use shared_models::auth::{CredentialClaims, UserIdentity};

/// Reads the user identifier out of a credential token.
///
/// The signature is NOT checked. The result is an advisory hint the backend
/// re-validates; never use it for an authorization decision.
pub fn decode_identity(token: &str) -> Result<UserIdentity, String> {
    let claims = decode_claims(token)?;

    let id = claims
        .user_id()
        .ok_or_else(|| "Token carries no user identifier".to_string())?
        .to_string();

    Ok(UserIdentity {
        id,
        email: claims.email,
    })
}

pub fn decode_claims(token: &str) -> Result<CredentialClaims, String> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err("Invalid token format".to_string());
    }

    // Some issuers pad the segments; the no-pad engine rejects '='.
    let claims_b64 = parts[1].trim_end_matches('=');

    let claims_json = match URL_SAFE_NO_PAD.decode(claims_b64) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(json_str) => json_str,
            Err(_) => return Err("Invalid claims encoding".to_string()),
        },
        Err(e) => {
            debug!("Failed to decode claims: {}", e);
            return Err("Invalid claims encoding".to_string());
        }
    };

    serde_json::from_str(&claims_json).map_err(|e| {
        debug!("Failed to parse claims: {}", e);
        "Invalid claims format".to_string()
    })
}
