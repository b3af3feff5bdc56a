use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::{SellyError, SellyResult};

#[derive(Serialize, Deserialize, Clone)]
/// Credentials for the client.
pub struct Credentials {
    /// The email address of the Selly account.
    pub email: String,
    /// The API key of the Selly account.
    pub api_key: String,
}

impl Credentials {
    /// Creates a new `Credentials` struct.
    ///
    /// Fails if either the email or the API key is empty.
    pub fn new(email: &str, api_key: &str) -> SellyResult<Credentials> {
        if email.is_empty() {
            return Err(SellyError::MissingCredential("email"));
        }
        if api_key.is_empty() {
            return Err(SellyError::MissingCredential("api_key"));
        }

        Ok(Credentials {
            email: email.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Returns the value of the `Authorization` header for these credentials.
    pub fn authorization(&self) -> String {
        let pair = format!("{}:{}", self.email, self.api_key);
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(pair)
        )
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("api_key", &"[redacted]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorization_is_basic_over_email_and_key() {
        let credentials = Credentials::new("user@example.com", "secret").unwrap();
        // base64("user@example.com:secret")
        assert_eq!(
            credentials.authorization(),
            "Basic dXNlckBleGFtcGxlLmNvbTpzZWNyZXQ="
        );
    }

    #[test]
    fn empty_credentials_are_rejected() {
        assert!(matches!(
            Credentials::new("", "key"),
            Err(SellyError::MissingCredential("email"))
        ));
        assert!(matches!(
            Credentials::new("user@example.com", ""),
            Err(SellyError::MissingCredential("api_key"))
        ));
    }

    #[test]
    fn debug_output_hides_the_key() {
        let credentials = Credentials::new("user@example.com", "secret").unwrap();
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("user@example.com"));
        assert!(!debug.contains("secret"));
    }
}
