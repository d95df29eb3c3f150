//! Bot authorization (invite) link derivation.

use crate::error::RegistrarError;
use crate::Result;

pub const DEFAULT_AUTHORIZE_URL: &str = "https://discord.com/oauth2/authorize";
pub const DEFAULT_PERMISSIONS: u64 = 2147485696;
pub const DEFAULT_SCOPES: [&str; 2] = ["bot", "applications.commands"];

/// Inputs for an authorization link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteLink {
    pub application_id: String,
    pub permissions: u64,
    pub scopes: Vec<String>,
}

impl InviteLink {
    /// Invite link with the bot's default permissions and scopes.
    pub fn new(application_id: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into(),
            permissions: DEFAULT_PERMISSIONS,
            scopes: DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_permissions(mut self, permissions: u64) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Render against the default authorize endpoint.
    pub fn url(&self) -> Result<String> {
        self.url_with_base(DEFAULT_AUTHORIZE_URL)
    }

    /// Render against `base`. Query order is `client_id`, `scope`, `permissions`.
    pub fn url_with_base(&self, base: &str) -> Result<String> {
        self.validate()?;

        let scope = self.scopes.join(" ");
        let permissions = self.permissions.to_string();
        let query = [
            ("client_id", self.application_id.as_str()),
            ("scope", scope.as_str()),
            ("permissions", permissions.as_str()),
        ]
        .iter()
        .map(|(key, value)| format!("{}={}", key, encode(value)))
        .collect::<Vec<_>>()
        .join("&");

        Ok(format!("{}?{}", base, query))
    }

    fn validate(&self) -> Result<()> {
        if !is_snowflake(&self.application_id) {
            return Err(RegistrarError::Validation(format!(
                "application id '{}' must be a non-empty string of digits",
                self.application_id
            )));
        }
        if self.scopes.is_empty() {
            return Err(RegistrarError::Validation("at least one scope is required".into()));
        }
        if let Some(bad) = self
            .scopes
            .iter()
            .find(|s| s.is_empty() || s.chars().any(char::is_whitespace))
        {
            return Err(RegistrarError::Validation(format!(
                "scope '{}' must be non-empty and contain no whitespace",
                bad
            )));
        }
        Ok(())
    }
}

/// Whether `id` looks like a platform identifier (decimal digits only).
pub fn is_snowflake(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}

/// Everything except RFC 3986 unreserved characters gets `%XX` encoded,
/// so a space becomes `%20` rather than `+`.
fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
