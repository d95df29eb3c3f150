//! The linear registration run: credentials, catalog, sync, invite link, report.

use crate::config::{self, Config};
use bingo_core::{
    catalog, HttpTransport, InviteLink, RegistrarError, Report, Synchronizer, SyncOutcome,
};
use tracing::{error, info, warn};

/// Per-run switches from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Build and report the catalog without calling the registry
    pub dry_run: bool,
}

/// Run once with credentials read through `lookup`.
///
/// Every failure ends up in the returned report; nothing is retried.
pub async fn run<F>(config: &Config, lookup: F, options: RunOptions) -> Report
where
    F: Fn(&str) -> Option<String>,
{
    let credentials = match config::credentials_from(lookup) {
        Ok(credentials) => credentials,
        Err(e) => {
            error!(target: "bingo::startup", "{}", e);
            return Report::failure(&e);
        }
    };

    let catalog = match catalog::build() {
        Ok(catalog) => catalog,
        Err(e) => {
            error!(target: "bingo::catalog", "{}", e);
            return Report::failure(&RegistrarError::from(e));
        }
    };
    info!(target: "bingo::catalog", "Built catalog with {} commands", catalog.len());

    let outcome = if options.dry_run {
        info!(target: "bingo::sync", "Dry run, registry not contacted");
        SyncOutcome::dry_run(catalog.commands().to_vec())
    } else {
        let synchronizer = HttpTransport::new(config.timeout())
            .and_then(|transport| Synchronizer::new(transport, &config.api_base));
        match synchronizer {
            Ok(synchronizer) => synchronizer.synchronize(&catalog, &credentials).await.into(),
            Err(e) => {
                error!(target: "bingo::sync", "{}", e);
                SyncOutcome::failed(&e)
            }
        }
    };

    let invite = InviteLink::new(credentials.application_id.as_str())
        .with_permissions(config.invite_permissions)
        .with_scopes(config.invite_scopes.iter().cloned())
        .url_with_base(&config.authorize_url)
        .inspect_err(|e| warn!(target: "bingo::invite", "{}", e));

    Report::completed(outcome, invite)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{APP_ID_VAR, TOKEN_VAR};

    fn lookup(key: &str) -> Option<String> {
        match key {
            TOKEN_VAR => Some("tok".into()),
            APP_ID_VAR => Some("1234".into()),
            _ => None,
        }
    }

    #[tokio::test]
    async fn test_missing_credentials_short_circuit() {
        let report = run(&Config::default(), |_| None, RunOptions::default()).await;
        assert!(!report.success);
        assert!(report.commands_status.is_none());
        assert!(report.error.unwrap().contains("DISCORD_BOT_TOKEN"));
    }

    #[tokio::test]
    async fn test_dry_run_reports_catalog_and_link() {
        let report = run(&Config::default(), lookup, RunOptions { dry_run: true }).await;
        assert!(report.success);
        assert_eq!(report.exit_code(), 0);

        let status = report.commands_status.unwrap();
        assert!(status.dry_run);
        assert_eq!(status.commands.unwrap().len(), catalog::build().unwrap().len());
        assert_eq!(
            report.invite_url.as_deref(),
            Some("https://discord.com/oauth2/authorize?client_id=1234&scope=bot%20applications.commands&permissions=2147485696")
        );
    }

    #[tokio::test]
    async fn test_non_numeric_app_id_only_fails_invite() {
        let lookup = |key: &str| match key {
            TOKEN_VAR => Some("tok".to_string()),
            APP_ID_VAR => Some("my-app".to_string()),
            _ => None,
        };
        let report = run(&Config::default(), lookup, RunOptions { dry_run: true }).await;
        assert!(report.success);
        assert!(report.invite_url.is_none());
        assert!(report.invite_error.is_some());
    }

    #[tokio::test]
    async fn test_bad_api_base_is_reported() {
        let config = Config {
            api_base: "nowhere".into(),
            ..Config::default()
        };
        let report = run(&config, lookup, RunOptions::default()).await;
        assert!(!report.success);
        let status = report.commands_status.unwrap();
        assert!(status.error.unwrap().starts_with("Configuration error"));
    }
}
