#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_panics_doc
)]

mod event;

use dashmap::{mapref::entry::Entry, DashMap};
use rigdash_models::{Asset, AssetId};
use std::{
    hash::Hash,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

pub use event::{LoadAssets, UpdateCache};

/// A stored asset together with the position it was first inserted at
#[derive(Debug, Clone)]
struct CachedAsset {
    seq: u64,
    asset: Arc<Asset>,
}

/// Insert or replace an asset, keeping the original position of replaced entries.
/// Returns whether the stored value changed.
fn upsert_item<K: Eq + Hash>(
    map: &DashMap<K, CachedAsset>,
    next_seq: &AtomicU64,
    k: K,
    v: Asset,
) -> bool {
    match map.entry(k) {
        Entry::Occupied(e) if *e.get().asset == v => false,
        Entry::Occupied(mut e) => {
            e.get_mut().asset = Arc::new(v);
            true
        }
        Entry::Vacant(e) => {
            let seq = next_seq.fetch_add(1, Ordering::SeqCst);
            e.insert(CachedAsset {
                seq,
                asset: Arc::new(v),
            });
            true
        }
    }
}

pub struct CacheRef {
    assets: DashMap<AssetId, CachedAsset>,
    next_seq: AtomicU64,
}

/// A wrapper around the asset map allowing it to be shared across tasks.
///
/// Entries are only ever inserted or replaced by id, never removed.
#[derive(Clone)]
pub struct AssetCache(Arc<CacheRef>);

impl Default for AssetCache {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetCache {
    #[must_use]
    pub fn new() -> Self {
        Self(Arc::new(CacheRef {
            assets: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }))
    }

    /// Get an immutable reference to an asset
    pub fn asset(&self, asset_id: AssetId) -> Option<Arc<Asset>> {
        self.0
            .assets
            .get(&asset_id)
            .map(|a| Arc::clone(&a.value().asset))
    }

    pub fn contains(&self, asset_id: AssetId) -> bool {
        self.0.assets.contains_key(&asset_id)
    }

    /// Get a snapshot of every asset, in the order they were first loaded
    pub fn assets(&self) -> Vec<Arc<Asset>> {
        let mut entries = self
            .0
            .assets
            .iter()
            .map(|e| (e.seq, Arc::clone(&e.asset)))
            .collect::<Vec<_>>();
        entries.sort_unstable_by_key(|(seq, _)| *seq);
        entries.into_iter().map(|(_, a)| a).collect()
    }

    /// Get a snapshot of the assets of one type, in load order
    pub fn assets_of_type(&self, asset_type: &str) -> Vec<Arc<Asset>> {
        self.assets()
            .into_iter()
            .filter(|a| a.asset_type == asset_type)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.assets.is_empty()
    }

    /// Insert or overwrite every asset by id. Returns the number of entries that changed.
    pub fn merge(&self, assets: impl IntoIterator<Item = Asset>) -> usize {
        let mut received = 0;
        let mut changed = 0;
        for asset in assets {
            received += 1;
            if upsert_item(&self.0.assets, &self.0.next_seq, asset.id, asset) {
                changed += 1;
            }
        }
        tracing::debug!(received, changed, total = self.len(), "Merged assets");
        changed
    }

    /// Apply an event to the cache
    pub fn update<T: UpdateCache>(&self, value: &T) -> usize {
        value.update(self)
    }
}
