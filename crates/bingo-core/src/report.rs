//! The structured report printed when a run finishes.

use crate::error::RegistrarError;
use crate::sync::Registered;
use bingo_types::Command;
use serde::{Deserialize, Serialize};

pub const SUCCESS_MESSAGE: &str = "Successfully registered commands!";

/// Outcome of the synchronization step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Echo of the submitted catalog
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<Command>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Raw registry response body, unmodified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub dry_run: bool,
}

impl SyncOutcome {
    pub fn registered(registered: Registered) -> Self {
        Self {
            success: true,
            message: Some(SUCCESS_MESSAGE.to_string()),
            commands: Some(registered.commands),
            error: None,
            status: Some(registered.status),
            response: None,
            dry_run: false,
        }
    }

    pub fn failed(error: &RegistrarError) -> Self {
        let (status, response) = match error {
            RegistrarError::Registry { status, body } => (Some(*status), Some(body.clone())),
            _ => (None, None),
        };
        Self {
            success: false,
            message: None,
            commands: None,
            error: Some(error.to_string()),
            status,
            response,
            dry_run: false,
        }
    }

    /// Catalog that would have been submitted, with no remote call made.
    pub fn dry_run(commands: Vec<Command>) -> Self {
        Self {
            success: true,
            message: Some(format!("Dry run: {} commands not submitted", commands.len())),
            commands: Some(commands),
            error: None,
            status: None,
            response: None,
            dry_run: true,
        }
    }
}

impl From<crate::Result<Registered>> for SyncOutcome {
    fn from(result: crate::Result<Registered>) -> Self {
        match result {
            Ok(registered) => SyncOutcome::registered(registered),
            Err(e) => SyncOutcome::failed(&e),
        }
    }
}

/// Combined result of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commands_status: Option<SyncOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_error: Option<String>,
}

impl Report {
    /// Report for a run that stopped before synchronizing.
    pub fn failure(error: &RegistrarError) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
            commands_status: None,
            invite_url: None,
            invite_error: None,
        }
    }

    /// Report for a run that reached synchronization. Success follows the
    /// sync outcome only; an invite link failure is reported alongside.
    pub fn completed(outcome: SyncOutcome, invite: crate::Result<String>) -> Self {
        let (invite_url, invite_error) = match invite {
            Ok(url) => (Some(url), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            success: outcome.success,
            error: None,
            commands_status: Some(outcome),
            invite_url,
            invite_error,
        }
    }

    pub fn exit_code(&self) -> u8 {
        if self.success { 0 } else { 1 }
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
