//! Full-replace synchronization of the catalog with the remote registry.
//!
//! One PUT overwrites the application's whole command set: commands missing
//! from the catalog are deleted by the registry, the rest are overwritten.
//! There is no diffing and no retry.

use crate::catalog::Catalog;
use crate::error::RegistrarError;
use crate::Result;
use bingo_types::Command;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v10";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("bingo-register/", env!("CARGO_PKG_VERSION"));

/// Secrets needed to talk to the registry.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub application_id: String,
}

impl Credentials {
    pub fn new(token: impl Into<String>, application_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            application_id: application_id.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("application_id", &self.application_id)
            .finish()
    }
}

/// Raw status and body returned by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryResponse {
    pub status: u16,
    pub body: String,
}

impl RegistryResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one authenticated JSON PUT and hands back whatever came back.
///
/// Only failures to get any response at all map to [`RegistrarError::Transport`];
/// status interpretation is left to the [`Synchronizer`].
pub trait RegistryTransport {
    fn put_json(
        &self,
        url: &Url,
        token: &str,
        body: Vec<u8>,
    ) -> impl Future<Output = Result<RegistryResponse>> + Send;
}

/// reqwest-backed transport with a bounded request timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

impl RegistryTransport for HttpTransport {
    async fn put_json(&self, url: &Url, token: &str, body: Vec<u8>) -> Result<RegistryResponse> {
        let response = self
            .client
            .put(url.clone())
            .header(AUTHORIZATION, format!("Bot {}", token))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RegistryResponse { status, body })
    }
}

/// A successful replace, echoing what was submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registered {
    pub status: u16,
    pub commands: Vec<Command>,
}

/// Replaces the registry's catalog for an application.
pub struct Synchronizer<T> {
    transport: T,
    api_base: Url,
}

impl<T: RegistryTransport> Synchronizer<T> {
    pub fn new(transport: T, api_base: &str) -> Result<Self> {
        let api_base = Url::parse(api_base).map_err(|e| {
            RegistrarError::Configuration(format!("invalid API base '{}': {}", api_base, e))
        })?;
        if api_base.cannot_be_a_base() {
            return Err(RegistrarError::Configuration(format!(
                "API base '{}' cannot carry a path",
                api_base
            )));
        }
        Ok(Self { transport, api_base })
    }

    /// `{api_base}/applications/{application_id}/commands`
    pub fn endpoint(&self, application_id: &str) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["applications", application_id, "commands"]);
        }
        url
    }

    /// Submit the whole catalog in a single PUT.
    pub async fn synchronize(&self, catalog: &Catalog, credentials: &Credentials) -> Result<Registered> {
        let url = self.endpoint(&credentials.application_id);
        let body = serde_json::to_vec(catalog)?;

        info!(
            target: "bingo::sync",
            "Replacing {} commands for application {}",
            catalog.len(),
            credentials.application_id
        );
        debug!(target: "bingo::sync", "PUT {} ({} bytes)", url, body.len());

        let response = self
            .transport
            .put_json(&url, &credentials.token, body)
            .await
            .inspect_err(|e| warn!(target: "bingo::sync", "Registry unreachable: {}", e))?;

        if !response.is_success() {
            warn!(
                target: "bingo::sync",
                "Registry rejected commands with status {}",
                response.status
            );
            return Err(RegistrarError::Registry {
                status: response.status,
                body: response.body,
            });
        }

        info!(target: "bingo::sync", "Registry accepted commands (status {})", response.status);
        Ok(Registered {
            status: response.status,
            commands: catalog.commands().to_vec(),
        })
    }
}
