// One report run: config, login, the three inventory sections, logout

use crate::config::{AppConfig, EndpointConfig};
use crate::error::{Error, Result};
use crate::inventory;
use crate::report::Report;
use crate::vim::{Client, SessionCache};
use std::io::Write;
use tokio_util::sync::CancellationToken;

/// Runs one report against the endpoint named by `env` (GOVMOMI_* lookup),
/// writing sections to `out`.
///
/// Configuration problems are reported before any network activity. A session
/// from the session cache is reused and kept for the next run. Otherwise the
/// session is logged out on every exit path after login, which also frees views
/// whose creation was interrupted.
pub async fn run<W: Write>(
    env: impl Fn(&str) -> Option<String>,
    out: W,
    cancel: &CancellationToken,
) -> Result<Report<W>> {
    let app_config = AppConfig::load_with(&env).map_err(config_error)?;
    let endpoint =
        EndpointConfig::from_lookup(&env, app_config.client).map_err(config_error)?;
    tracing::info!(
        endpoint = %endpoint.url,
        user = %endpoint.credentials.username,
        insecure = endpoint.client.insecure,
        session_cache = ?endpoint.session_dir,
        "connecting"
    );

    let cache = endpoint
        .session_dir
        .as_deref()
        .map(|dir| SessionCache::new(dir, &endpoint.url, &endpoint.credentials.username));
    let client = Client::from_endpoint(&endpoint)?;
    let session = cancel
        .run_until_cancelled(client.connect(&endpoint.credentials, cache.as_ref()))
        .await
        .ok_or(Error::Cancelled)?
        .map_err(|e| {
            if e.is_auth_failure() {
                Error::Auth(e)
            } else {
                Error::Endpoint(e)
            }
        })?;

    let mut report = Report::new(out);
    let result = inventory::collect(&session, &mut report, cancel).await;

    if session.is_persisted() {
        tracing::debug!("session kept for reuse");
    } else if let Err(e) = session.logout().await {
        tracing::warn!(error = %e, "logout failed; session left to expire");
    }
    result.map(|()| report)
}

fn config_error(e: anyhow::Error) -> Error {
    Error::Config(format!("{e:#}"))
}
