use anyhow::{Context, Result};

use crate::core::admin::{AdminClient, AdminError};
use crate::core::config::AppConfig;
use crate::core::session::{AdminSession, TokenSource};

/// Open a client for the configured node.
pub fn connect() -> Result<AdminClient> {
    let config = AppConfig::load().context("Failed to load config")?;
    let session = AdminSession::from_config(&config);
    tracing::debug!(base_url = session.base_url(), "connecting to node");
    Ok(AdminClient::new(session)?)
}

/// Convert an admin API error for the CLI. A rejected token that came from
/// the config file is removed from it, ending the session.
pub fn on_admin_error(client: &AdminClient, err: AdminError) -> anyhow::Error {
    if !err.is_unauthorized() {
        return err.into();
    }

    match client.session().token_source() {
        TokenSource::Config => match end_session() {
            Ok(()) => anyhow::anyhow!(
                "{}. Stored token removed; run `routstr-admin config login --token <TOKEN>`",
                err
            ),
            Err(e) => {
                tracing::warn!(error = %e, "failed to remove rejected token");
                err.into()
            }
        },
        TokenSource::Env => anyhow::anyhow!(
            "{}. Check {}",
            err,
            crate::core::session::TOKEN_ENV
        ),
        TokenSource::None => err.into(),
    }
}

fn end_session() -> Result<()> {
    let mut config = AppConfig::load()?;
    if config.clear_token() {
        config.save()?;
        tracing::info!("cleared rejected admin token from config");
    }
    Ok(())
}
