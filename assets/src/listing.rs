use rigdash_api::{AssetSource, Result};
use rigdash_cache::{AssetCache, LoadAssets};
use rigdash_models::{Asset, AssetList, AssetTypes, AssetView, ListParams, SortKey, SortOrder};
use std::{cmp::Ordering, sync::Arc};
use tracing::debug;

use crate::projection::collect_parents;

/// The type shown as "recent" in navigation
pub const RECENT_ASSET_TYPE: &str = "rig";
pub const RECENT_ASSET_LIMIT: usize = 7;

/// Filters and sorts the cached assets of one type. Never touches the remote API.
pub fn list_assets(
    cache: &AssetCache,
    types: &AssetTypes,
    asset_type: &str,
    params: &ListParams,
) -> AssetList {
    let parent_types = types.parent_types(asset_type);
    let needle = params.needle();

    let mut keyed = cache
        .assets_of_type(asset_type)
        .into_iter()
        .filter(|a| {
            needle
                .as_deref()
                .map_or(true, |n| a.name.to_lowercase().contains(n))
        })
        .map(|asset| {
            let parents = collect_parents(cache, &asset);
            let view = AssetView {
                asset,
                parents,
                parent: None,
            };
            (view.sort_key(&params.sort_field), view)
        })
        .collect::<Vec<_>>();

    // sort_by is stable, equal keys keep the cache order
    keyed.sort_by(|(a, _), (b, _)| compare_keys(a.as_ref(), b.as_ref(), params.sort_order));

    AssetList {
        assets: keyed.into_iter().map(|(_, view)| view).collect(),
        parent_types,
    }
}

/// Assets without a key go last in either order
fn compare_keys(a: Option<&SortKey>, b: Option<&SortKey>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match order {
            SortOrder::Asc => a.cmp(b),
            SortOrder::Desc => b.cmp(a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// A few rigs for navigation, sorted by name
pub fn recent_assets(cache: &AssetCache) -> Vec<Arc<Asset>> {
    let mut recent = cache
        .assets_of_type(RECENT_ASSET_TYPE)
        .into_iter()
        .take(RECENT_ASSET_LIMIT)
        .collect::<Vec<_>>();
    recent.sort_by(|a, b| a.name.cmp(&b.name));
    recent
}

/// Loads every asset of `asset_type` and of all its ancestor types in one request.
/// Returns the number of cache entries that changed.
#[tracing::instrument(skip(cache, types, source))]
pub async fn load_assets_of_type<S: AssetSource + ?Sized>(
    cache: &AssetCache,
    types: &AssetTypes,
    source: &S,
    asset_type: &str,
) -> Result<usize> {
    let chain = types.ancestor_chain(asset_type);
    let assets = source.fetch_assets_by_types(&chain).await?;
    debug!(types = chain.len(), assets = assets.len(), "Loaded assets");
    Ok(cache.update(&LoadAssets(assets)))
}
