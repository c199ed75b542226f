// Inventory pipeline: per kind, open a container view, fetch summaries, render, release

mod fetch;
mod kinds;
mod scope;

pub use fetch::fetch;
pub use scope::{InventoryScope, with_scope};

use crate::error::{Error, Result};
use crate::models::{DatastoreSummary, HostSummary, ObjectKind, VmSummary};
use crate::report::Report;
use crate::vim::ViewApi;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::io::Write;
use tabled::Tabled;
use tokio_util::sync::CancellationToken;

/// Per-kind behaviour: which vim25 type to scope, which property to fetch and
/// how one object becomes a table row. Implemented only for the summaries in
/// [`crate::models`].
pub trait Inventory: DeserializeOwned + kinds::Sealed {
    const KIND: ObjectKind;
    /// The single aggregate property retrieved for this kind.
    const PROPERTY: &'static str = "summary";

    type Row: Tabled;

    /// Derives metrics and maps fields to columns.
    fn row(&self) -> Self::Row;
}

/// Runs hosts, datastores and virtual machines in that order within one
/// session. Stops at the first failure; sections already written stay written.
pub async fn collect<A, W>(
    api: &A,
    report: &mut Report<W>,
    cancel: &CancellationToken,
) -> Result<()>
where
    A: ViewApi,
    W: Write,
{
    collect_kind::<HostSummary, _, _>(api, report, cancel).await?;
    collect_kind::<DatastoreSummary, _, _>(api, report, cancel).await?;
    collect_kind::<VmSummary, _, _>(api, report, cancel).await
}

async fn collect_kind<K, A, W>(
    api: &A,
    report: &mut Report<W>,
    cancel: &CancellationToken,
) -> Result<()>
where
    K: Inventory,
    A: ViewApi,
    W: Write,
{
    with_scope(api, K::KIND, cancel, async |scope| {
        let items = fetch::<K, A>(api, scope, cancel).await?;
        tracing::info!(kind = %K::KIND, objects = items.len(), "retrieved summaries");
        report.write_section(&items)?;
        Ok(())
    })
    .await
}

/// Awaits `fut` unless `cancel` fires first. Nothing is started once the
/// token is already cancelled.
async fn cancellable<T>(cancel: &CancellationToken, fut: impl Future<Output = T>) -> Result<T> {
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }
    cancel.run_until_cancelled(fut).await.ok_or(Error::Cancelled)
}
