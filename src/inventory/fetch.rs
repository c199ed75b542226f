// One RetrieveProperties round trip per kind, decoded into typed summaries

use super::{Inventory, InventoryScope};
use crate::error::{Error, Result};
use crate::vim::{EndpointError, ViewApi};
use tokio_util::sync::CancellationToken;

/// Retrieves `K::PROPERTY` for every object in `scope`, in endpoint order.
/// Objects the endpoint returned without the property are skipped.
pub async fn fetch<K, A>(
    api: &A,
    scope: &InventoryScope,
    cancel: &CancellationToken,
) -> Result<Vec<K>>
where
    K: Inventory,
    A: ViewApi,
{
    let retrieval_error = |source| Error::Retrieval {
        kind: K::KIND,
        source,
    };

    let contents = super::cancellable(
        cancel,
        api.retrieve_properties(scope.view(), K::KIND.type_name(), &[K::PROPERTY]),
    )
    .await?
    .map_err(retrieval_error)?;

    let mut items = Vec::with_capacity(contents.len());
    for content in &contents {
        let Some(value) = content.property(K::PROPERTY) else {
            tracing::debug!(
                kind = %K::KIND,
                obj = %content.obj,
                "object returned without {}",
                K::PROPERTY
            );
            continue;
        };
        let item = K::deserialize(value).map_err(|e| retrieval_error(EndpointError::Decode(e)))?;
        items.push(item);
    }
    Ok(items)
}
