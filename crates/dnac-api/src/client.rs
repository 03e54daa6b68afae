// Controller HTTP client
//
// Wraps `reqwest::Client` with URL construction, `X-Auth-Token` injection and
// `{"response": [...]}` envelope unwrapping. Endpoint operations live in
// sibling modules (auth, devices, interfaces) as inherent methods.

use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::{Credentials, Session, preview};
use crate::error::Error;
use crate::models::ListResponse;
use crate::transport::TransportConfig;

const AUTH_HEADER: &str = "X-Auth-Token";

/// HTTP client for a single Catalyst Center controller.
///
/// Holds the credentials used to obtain a token and the [`Session`] that
/// caches it. Calls are independent of each other; nothing is retried.
pub struct DnacClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
    session: Session,
}

impl DnacClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is the controller root, e.g. `https://sandboxdnac.cisco.com:443/`.
    pub fn new(
        base_url: Url,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url, credentials))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, credentials: Credentials) -> Self {
        Self {
            http,
            base_url,
            credentials,
            session: Session::default(),
        }
    }

    /// The controller base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The cached token state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub(crate) fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an absolute API path, keeping any path prefix
    /// the base URL carries (e.g. a reverse proxy mount point).
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send an authenticated GET and unwrap the `response` envelope.
    ///
    /// Fails with [`Error::NotAuthenticated`] before touching the network if
    /// no token has been cached.
    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, Error> {
        let token = self.session.require()?;
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .header(AUTH_HEADER, token.expose_secret())
            .query(query)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_list(resp).await
    }

    /// Check the status and decode `{"response": [...]}`.
    async fn parse_list<T: DeserializeOwned>(resp: reqwest::Response) -> Result<Vec<T>, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: "token expired or invalid (HTTP 401)".into(),
            });
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: preview(&body).to_owned(),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        let envelope: ListResponse<T> =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: format!("{e} (body preview: {:?})", preview(&body)),
                body: body.clone(),
            })?;

        Ok(envelope.into_items())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> DnacClient {
        DnacClient::with_client(
            reqwest::Client::new(),
            Url::parse(base).unwrap(),
            Credentials::new("devnetuser", "secret".to_owned()),
        )
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let c = client("https://10.10.20.85:443/");
        assert_eq!(
            c.endpoint("/dna/intent/api/v1/network-device")
                .unwrap()
                .as_str(),
            "https://10.10.20.85/dna/intent/api/v1/network-device"
        );
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let c = client("https://proxy.example.com:8443/dnac/");
        assert_eq!(
            c.endpoint("/api/v1/interface").unwrap().as_str(),
            "https://proxy.example.com:8443/dnac/api/v1/interface"
        );
    }

    #[test]
    fn new_client_is_unauthenticated() {
        let c = client("https://10.10.20.85/");
        assert!(!c.is_authenticated());
        assert!(c.session().token().is_none());
    }
}
