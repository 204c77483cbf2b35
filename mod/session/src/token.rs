use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::model::Claims;

/// Decode the claims payload of a compact bearer token.
///
/// The token must have the standard three dot-separated segments; only the
/// middle one is read. The payload is base64url-decoded and parsed as a JSON
/// object. The signature is never checked here; verification belongs to the
/// services that accept the token.
///
/// Returns None for anything malformed: wrong segment count, invalid
/// base64, invalid JSON. Never panics.
pub fn decode_claims(token: &str) -> Option<Claims> {
    let mut segments = token.split('.');
    segments.next()?; // header
    let payload = segments.next()?;
    segments.next()?; // signature
    if segments.next().is_some() {
        return None;
    }

    // Issuers disagree on padding; the unpadded alphabet plus a trim
    // accepts both forms.
    let payload = payload.trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    serde_json::from_slice(&bytes).ok()
}

#[cfg(test)]
mod tests {
    use base64::Engine as _;

    use super::*;
    use crate::model::Role;

    fn token_from_json(payload: &[u8]) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        format!("{}.{}.signature", header, URL_SAFE_NO_PAD.encode(payload))
    }

    #[test]
    fn decodes_wellformed_token() {
        let payload = serde_json::json!({
            "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier": "u-42",
            "http://schemas.microsoft.com/ws/2008/06/identity/claims/role": "SalesManager",
            "exp": 1_900_000_000,
        });
        let token = token_from_json(payload.to_string().as_bytes());

        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.subject.as_deref(), Some("u-42"));
        assert_eq!(claims.role, Some(Role::SalesManager));
        assert_eq!(claims.expires_at_millis(), Some(1_900_000_000_000));
    }

    #[test]
    fn accepts_padded_payload() {
        use base64::engine::general_purpose::URL_SAFE;

        let payload = br#"{"exp":12}"#;
        let padded = URL_SAFE.encode(payload);
        assert!(padded.ends_with('='));

        let token = format!("h.{}.s", padded);
        assert_eq!(decode_claims(&token).unwrap().exp, Some(12));
    }

    #[test]
    fn rejects_wrong_segment_count() {
        assert!(decode_claims("").is_none());
        assert!(decode_claims("only-one-segment").is_none());
        assert!(decode_claims("two.segments").is_none());
        assert!(decode_claims("a.b.c.d").is_none());
    }

    #[test]
    fn rejects_invalid_base64_payload() {
        assert!(decode_claims("header.!!not-base64!!.sig").is_none());
    }

    #[test]
    fn rejects_non_json_payload() {
        let token = token_from_json(b"hello world");
        assert!(decode_claims(&token).is_none());
    }

    #[test]
    fn rejects_non_object_payload() {
        assert!(decode_claims(&token_from_json(b"42")).is_none());
        assert!(decode_claims(&token_from_json(b"[1,2]")).is_none());
        assert!(decode_claims(&token_from_json(b"null")).is_none());
    }

    #[test]
    fn empty_payload_segment_is_malformed() {
        assert!(decode_claims("header..sig").is_none());
    }

    #[test]
    fn unknown_claims_are_ignored() {
        let payload = serde_json::json!({"exp": 7, "iss": "someone", "custom": [1, 2]});
        let token = token_from_json(payload.to_string().as_bytes());
        assert_eq!(decode_claims(&token).unwrap().exp, Some(7));
    }
}
