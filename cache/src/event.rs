use rigdash_models::Asset;
use tracing::trace;

use super::AssetCache;

pub trait UpdateCache {
    fn update(&self, cache: &AssetCache) -> usize;
}

/// A batch of assets fetched from the remote API
#[derive(Clone, Debug, Default)]
pub struct LoadAssets(pub Vec<Asset>);

impl UpdateCache for LoadAssets {
    fn update(&self, c: &AssetCache) -> usize {
        trace!(count = self.0.len(), "Received assets to load");
        c.merge(self.0.iter().cloned())
    }
}
