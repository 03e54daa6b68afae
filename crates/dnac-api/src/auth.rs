// Token authentication
//
// `POST /dna/system/api/v1/auth/token` with HTTP Basic credentials returns
// `{"Token": "..."}`. The token is cached in the client's `Session` and sent
// as `X-Auth-Token` on every intent API call.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

use crate::client::DnacClient;
use crate::error::Error;

const TOKEN_PATH: &str = "/dna/system/api/v1/auth/token";

/// Username and password for HTTP Basic authentication against the
/// controller's token endpoint.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<SecretString>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Cached bearer token for the lifetime of the process.
///
/// Starts empty, is only ever filled by a successful [`DnacClient::authenticate`]
/// and is never cleared by a failed call.
#[derive(Debug, Default)]
pub struct Session {
    token: Option<SecretString>,
}

impl Session {
    /// The cached token, if one has been obtained.
    pub fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The token, or [`Error::NotAuthenticated`].
    pub(crate) fn require(&self) -> Result<&SecretString, Error> {
        self.token.as_ref().ok_or(Error::NotAuthenticated)
    }

    fn store(&mut self, token: SecretString) -> &SecretString {
        self.token.insert(token)
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    #[serde(rename = "Token")]
    token: Option<String>,
}

impl DnacClient {
    /// Request a token with the configured credentials and cache it.
    ///
    /// Returns the cached token so the caller can choose to reveal it. On any
    /// failure the session keeps whatever token it held before.
    pub async fn authenticate(&mut self) -> Result<&SecretString, Error> {
        let url = self.endpoint(TOKEN_PATH)?;
        debug!("requesting auth token at {}", url);

        let resp = self
            .http()
            .post(url)
            .basic_auth(
                &self.credentials().username,
                Some(self.credentials().password.expose_secret()),
            )
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("token request failed (HTTP {status}): {}", preview(&body)),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        let parsed: TokenResponse =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: format!("{e} (body preview: {:?})", preview(&body)),
                body: body.clone(),
            })?;

        let token = parsed
            .token
            .filter(|t| !t.is_empty())
            .ok_or(Error::MissingField { field: "Token" })?;

        debug!("authentication successful");
        Ok(self.session_mut().store(SecretString::from(token)))
    }
}

/// First 200 bytes of a response body, cut on a char boundary.
pub(crate) fn preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_has_no_token() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert!(matches!(session.require(), Err(Error::NotAuthenticated)));
    }

    #[test]
    fn stored_token_is_required_value() {
        let mut session = Session::default();
        session.store(SecretString::from("abc123".to_owned()));
        assert!(session.is_authenticated());
        let token = session.require().ok().map(|t| t.expose_secret().to_owned());
        assert_eq!(token.as_deref(), Some("abc123"));
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let body = "é".repeat(150);
        let cut = preview(&body);
        assert!(cut.len() <= 200);
        assert!(cut.chars().all(|c| c == 'é'));
        assert_eq!(preview("short"), "short");
    }
}
