// Container view lifetime: open recursively under the root folder, always destroy

use crate::error::{Error, Result};
use crate::models::ObjectKind;
use crate::vim::{ManagedObjectReference, ViewApi};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// A live server-side container view over one object kind.
///
/// Release with [`InventoryScope::close`], which consumes the scope. Dropping
/// an unreleased scope only logs: the view then lives until the session ends.
#[derive(Debug)]
pub struct InventoryScope {
    kind: ObjectKind,
    view: ManagedObjectReference,
    released: bool,
}

impl InventoryScope {
    /// Recursive view of `kind` rooted at the inventory root folder.
    pub async fn open<A: ViewApi>(
        api: &A,
        kind: ObjectKind,
        cancel: &CancellationToken,
    ) -> Result<Self> {
        let view = super::cancellable(
            cancel,
            api.create_container_view(api.root_folder(), &[kind.type_name()], true),
        )
        .await?
        .map_err(|source| Error::ScopeCreation { kind, source })?;
        debug!(%kind, %view, "container view created");
        Ok(Self {
            kind,
            view,
            released: false,
        })
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn view(&self) -> &ManagedObjectReference {
        &self.view
    }

    /// Destroys the view. Not subject to cancellation so an interrupted run
    /// still releases it; failure is logged, not returned.
    pub async fn close<A: ViewApi>(mut self, api: &A) {
        self.released = true;
        match api.destroy_view(&self.view).await {
            Ok(()) => debug!(kind = %self.kind, view = %self.view, "container view destroyed"),
            Err(e) => warn!(
                kind = %self.kind,
                view = %self.view,
                error = %e,
                "failed to destroy container view"
            ),
        }
    }
}

impl Drop for InventoryScope {
    fn drop(&mut self) {
        if !self.released {
            warn!(kind = %self.kind, view = %self.view, "container view dropped without release");
        }
    }
}

/// Opens a scope, runs `body` with it and closes it on every exit path
/// (success, error or cancellation). Returns the body's result.
pub async fn with_scope<A, T, F>(
    api: &A,
    kind: ObjectKind,
    cancel: &CancellationToken,
    body: F,
) -> Result<T>
where
    A: ViewApi,
    F: AsyncFnOnce(&InventoryScope) -> Result<T>,
{
    let scope = InventoryScope::open(api, kind, cancel).await?;
    let result = body(&scope).await;
    scope.close(api).await;
    result
}
