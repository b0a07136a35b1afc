//! Pieces of the password reset link.
//!
//! A link carries the account id encoded as URL-safe base64 and a signed
//! token bound to a fingerprint of the account's password hash. Changing
//! the password changes the fingerprint, so old links stop working.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};

use sitehub_core::types::AccountId;

/// Encode an account id for a reset link.
pub fn encode_uid(id: AccountId) -> String {
    URL_SAFE_NO_PAD.encode(id.to_string())
}

/// Decode the account id of a reset link.
pub fn decode_uid(uidb64: &str) -> Option<AccountId> {
    let bytes = URL_SAFE_NO_PAD.decode(uidb64).ok()?;
    let text = String::from_utf8(bytes).ok()?;
    text.parse().ok()
}

/// Fingerprint of a password hash, embedded in reset tokens.
pub fn password_fingerprint(password_hash: &str) -> String {
    let digest = Sha256::digest(password_hash.as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Build the frontend URL of a reset link.
pub fn reset_link(frontend_url: &str, uidb64: &str, token: &str) -> String {
    format!(
        "{}/admin/forgot-password/{uidb64}/{token}",
        frontend_url.trim_end_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uid_roundtrip() {
        let id = AccountId::new();
        assert_eq!(decode_uid(&encode_uid(id)), Some(id));
        assert_eq!(decode_uid("not base64!"), None);
        assert_eq!(decode_uid(&URL_SAFE_NO_PAD.encode("garbage")), None);
    }

    #[test]
    fn test_fingerprint_tracks_hash() {
        assert_eq!(password_fingerprint("a"), password_fingerprint("a"));
        assert_ne!(password_fingerprint("a"), password_fingerprint("b"));
    }

    #[test]
    fn test_reset_link() {
        assert_eq!(
            reset_link("https://site.test/", "dWlk", "tok"),
            "https://site.test/admin/forgot-password/dWlk/tok"
        );
    }
}
