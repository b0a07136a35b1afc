//! Cache key builders.
//!
//! The Redis provider adds the configured key prefix on top of these.

/// Key marking a revoked token by its `jti`.
pub fn jwt_blocklist(jti: &str) -> String {
    format!("jwt:blocklist:{jti}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocklist_key() {
        assert_eq!(jwt_blocklist("abc"), "jwt:blocklist:abc");
    }
}
