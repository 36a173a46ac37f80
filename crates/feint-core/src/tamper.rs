//! Opaque bearer-token decode, mutation, and re-encode.
//!
//! The target's token is standard base64 over a JSON object. Mutations
//! operate on the decoded mapping in place and are independently optional.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Utc;
use serde_json::Value;

use crate::error::TamperError;
use crate::Claims;

/// Sentinel written over the `sign` field.
pub const SIGN_SENTINEL: &str = "deadbeef";

/// How far into the past `expire_back` moves the expiry.
pub const EXPIRE_BACK_SECS: i64 = 60;

/// Right-pad with `=` to a multiple of 4 characters.
pub fn fix_padding(token: &str) -> String {
    match token.len() % 4 {
        0 => token.to_string(),
        rem => format!("{}{}", token, "=".repeat(4 - rem)),
    }
}

/// Decode a base64 token into its claim mapping.
pub fn decode_token(token: &str) -> Result<Claims, TamperError> {
    let raw = STANDARD.decode(fix_padding(token.trim()))?;
    match serde_json::from_slice(&raw)? {
        Value::Object(map) => Ok(map),
        _ => Err(TamperError::NotAnObject),
    }
}

/// Re-encode a claim mapping as a base64 token.
pub fn encode_token(claims: &Claims) -> Result<String, TamperError> {
    Ok(STANDARD.encode(serde_json::to_vec(claims)?))
}

/// Which mutations to apply to a decoded token.
#[derive(Debug, Clone, Default)]
pub struct TamperPlan {
    /// Set the expiry to one minute ago. Wins over `custom_expires`.
    pub expire_back: bool,
    /// Set the expiry to an exact epoch value.
    pub custom_expires: Option<i64>,
    /// Overwrite the `sign` field with [`SIGN_SENTINEL`].
    pub corrupt_sign: bool,
    /// Override the `uuid` field.
    pub uuid: Option<String>,
}

impl TamperPlan {
    pub fn is_noop(&self) -> bool {
        !self.expire_back
            && self.custom_expires.is_none()
            && !self.corrupt_sign
            && self.uuid.is_none()
    }

    /// Apply the selected mutations in place.
    ///
    /// The target stores expiry as a decimal string, so both expiry
    /// mutations write strings.
    pub fn apply(&self, claims: &mut Claims) {
        if self.expire_back {
            let past = Utc::now().timestamp() - EXPIRE_BACK_SECS;
            claims.insert("expires".into(), Value::from(past.to_string()));
        } else if let Some(epoch) = self.custom_expires {
            claims.insert("expires".into(), Value::from(epoch.to_string()));
        }
        if self.corrupt_sign {
            claims.insert("sign".into(), Value::from(SIGN_SENTINEL));
        }
        if let Some(uuid) = &self.uuid {
            claims.insert("uuid".into(), Value::from(uuid.clone()));
        }
    }
}
