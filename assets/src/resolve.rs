use rigdash_api::{AssetSource, Result};
use rigdash_cache::{AssetCache, LoadAssets};
use rigdash_models::{Asset, AssetId, AssetTypes};
use tracing::{debug, trace, warn};

use crate::projection::{resolved_asset, Resolved};

fn needs_resolving(types: &AssetTypes, asset: &Asset) -> bool {
    types.is_resolvable(asset.asset_type.as_str()) && asset.active_child.is_not_attempted()
}

/// Resolves `asset_id` to the asset that should be shown for it.
///
/// A cached asset that is either not resolvable or already resolved is
/// answered from the cache. Otherwise the asset and its chain of active
/// children are fetched one after another and merged in a single batch.
/// A failed fetch leaves the cache untouched. A resolvable asset without an
/// active child and a link to an asset missing from the cache come back as
/// different [`Resolved`] cases.
#[tracing::instrument(skip(cache, types, source))]
pub async fn resolve_asset<S: AssetSource + ?Sized>(
    cache: &AssetCache,
    types: &AssetTypes,
    source: &S,
    asset_id: AssetId,
) -> Result<Resolved> {
    if let Some(cached) = cache.asset(asset_id) {
        if !needs_resolving(types, &cached) {
            trace!("Answering from cache");
            return Ok(resolved_asset(cache, types, asset_id));
        }
    }

    let chain = fetch_chain(types, source, asset_id).await?;
    debug!(length = chain.len(), "Fetched asset chain");
    cache.update(&LoadAssets(chain));

    Ok(resolved_asset(cache, types, asset_id))
}

async fn fetch_chain<S: AssetSource + ?Sized>(
    types: &AssetTypes,
    source: &S,
    asset_id: AssetId,
) -> Result<Vec<Asset>> {
    let mut chain = vec![source.fetch_asset_by_id(asset_id).await?];

    while let Some(parent) = chain.last_mut() {
        if !needs_resolving(types, parent) {
            break;
        }

        match source.fetch_active_child(parent.id).await? {
            Some(child) => {
                trace!(parent = %parent.id, child = %child.id, "Found active child");
                *parent = parent.with_active_child(Some(child.id));
                if chain.iter().any(|a| a.id == child.id) {
                    warn!(child = %child.id, "Active child is already part of the chain");
                    break;
                }
                chain.push(child);
            }
            None => {
                trace!(parent = %parent.id, "No active child");
                *parent = parent.with_active_child(None);
                break;
            }
        }
    }

    Ok(chain)
}
