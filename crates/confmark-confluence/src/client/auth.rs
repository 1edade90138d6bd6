//! `Authorization` header selection.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use confmark_config::AuthConfig;

/// Build the `Authorization` header value for `auth`.
pub(super) fn header_value(auth: &AuthConfig) -> String {
    match auth {
        AuthConfig::Basic {
            username,
            api_token,
        } => format!("Basic {}", STANDARD.encode(format!("{username}:{api_token}"))),
        AuthConfig::Bearer { token } => format!("Bearer {token}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_header() {
        let auth = AuthConfig::Basic {
            username: "me@example.com".to_owned(),
            api_token: "secret".to_owned(),
        };
        // base64("me@example.com:secret")
        assert_eq!(header_value(&auth), "Basic bWVAZXhhbXBsZS5jb206c2VjcmV0");
    }

    #[test]
    fn test_bearer_header() {
        let auth = AuthConfig::Bearer {
            token: "pat-123".to_owned(),
        };
        assert_eq!(header_value(&auth), "Bearer pat-123");
    }
}
