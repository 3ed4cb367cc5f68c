#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::must_use_candidate
)]

pub mod listing;
pub mod projection;
pub mod resolve;

use rigdash_api::{AssetSource, Result};
use rigdash_cache::AssetCache;
use rigdash_models::{Asset, AssetId, AssetList, AssetTypes, AssetView, ListParams};
use std::sync::Arc;

pub use listing::{list_assets, load_assets_of_type, recent_assets};
pub use projection::{
    active_descendant, collect_parents, current_asset, resolved_asset, Descendant, Resolved,
};
pub use resolve::resolve_asset;

/// Bundles the cache, the type registry and the remote source the engines work against
#[derive(Clone)]
pub struct AssetEngine<S> {
    cache: AssetCache,
    types: Arc<AssetTypes>,
    source: S,
}

impl<S: AssetSource> AssetEngine<S> {
    pub fn new(cache: AssetCache, types: Arc<AssetTypes>, source: S) -> Self {
        Self {
            cache,
            types,
            source,
        }
    }

    pub fn cache(&self) -> &AssetCache {
        &self.cache
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn resolve_asset(&self, asset_id: AssetId) -> Result<Resolved> {
        resolve_asset(&self.cache, &self.types, &self.source, asset_id).await
    }

    pub async fn load_assets_of_type(&self, asset_type: &str) -> Result<usize> {
        load_assets_of_type(&self.cache, &self.types, &self.source, asset_type).await
    }

    pub fn current_asset(&self, asset_id: AssetId) -> Option<AssetView> {
        current_asset(&self.cache, &self.types, asset_id)
    }

    pub fn list_assets(&self, asset_type: &str, params: &ListParams) -> AssetList {
        list_assets(&self.cache, &self.types, asset_type, params)
    }

    pub fn recent_assets(&self) -> Vec<Arc<Asset>> {
        recent_assets(&self.cache)
    }
}
