use rigdash_cache::AssetCache;
use rigdash_models::{ActiveChild, Asset, AssetId, AssetTypeCode, AssetTypes, AssetView};
use std::{
    collections::{BTreeMap, HashSet},
    sync::Arc,
};
use tracing::warn;

/// Where following `activeChildId` links from an asset ends up
#[derive(Clone, Debug, PartialEq)]
pub enum Descendant {
    /// A non-resolvable asset at the end of the links
    Found(Arc<Asset>),
    /// A resolvable asset was resolved and has no active child
    NoActiveChild,
    /// A resolvable asset on the way has not been resolved yet
    Unresolved,
    /// A link points at an asset that is not in the cache
    NotLoaded,
}

impl Descendant {
    pub fn found(self) -> Option<Arc<Asset>> {
        match self {
            Descendant::Found(asset) => Some(asset),
            _ => None,
        }
    }
}

pub fn active_descendant(cache: &AssetCache, types: &AssetTypes, asset_id: AssetId) -> Descendant {
    let mut asset = match cache.asset(asset_id) {
        Some(asset) => asset,
        None => return Descendant::NotLoaded,
    };
    let mut visited = HashSet::new();

    while types.is_resolvable(asset.asset_type.as_str()) {
        if !visited.insert(asset.id) {
            warn!(asset = %asset_id, at = %asset.id, "Active child links form a cycle");
            return Descendant::NotLoaded;
        }
        asset = match asset.active_child {
            ActiveChild::NotAttempted => return Descendant::Unresolved,
            ActiveChild::None => return Descendant::NoActiveChild,
            ActiveChild::Some(child_id) => match cache.asset(child_id) {
                Some(child) => child,
                None => return Descendant::NotLoaded,
            },
        };
    }

    Descendant::Found(asset)
}

/// What resolving an asset against the cache ends up with
#[derive(Clone, Debug, PartialEq)]
pub enum Resolved {
    /// The asset to display, with its immediate parent attached
    Found(AssetView),
    /// A resolvable asset on the way reported no active child
    NoActiveChild,
    /// A resolvable asset on the way has not been resolved yet
    Unresolved,
    /// A link points at an asset that is not in the cache yet
    NotLoaded,
}

impl Resolved {
    pub fn found(self) -> Option<AssetView> {
        match self {
            Resolved::Found(view) => Some(view),
            _ => None,
        }
    }

    pub fn view(&self) -> Option<&AssetView> {
        match self {
            Resolved::Found(view) => Some(view),
            _ => None,
        }
    }
}

pub fn resolved_asset(cache: &AssetCache, types: &AssetTypes, asset_id: AssetId) -> Resolved {
    match active_descendant(cache, types, asset_id) {
        Descendant::Found(asset) => {
            let parent = asset.parent_id.and_then(|parent_id| cache.asset(parent_id));
            let mut view = AssetView::new(asset);
            view.parent = parent;
            Resolved::Found(view)
        }
        Descendant::NoActiveChild => Resolved::NoActiveChild,
        Descendant::Unresolved => Resolved::Unresolved,
        Descendant::NotLoaded => Resolved::NotLoaded,
    }
}

/// The asset to display for `asset_id`: its active descendant with the immediate parent attached
pub fn current_asset(cache: &AssetCache, types: &AssetTypes, asset_id: AssetId) -> Option<AssetView> {
    resolved_asset(cache, types, asset_id).found()
}

/// Walks `parent_id` links upwards, keyed by the type of each ancestor.
///
/// A link to an asset that is not loaded ends the walk. When two ancestors
/// share a type the farther one is kept.
pub fn collect_parents(cache: &AssetCache, asset: &Asset) -> BTreeMap<AssetTypeCode, Arc<Asset>> {
    let mut parents = BTreeMap::new();
    let mut visited = HashSet::new();
    visited.insert(asset.id);

    let mut next = asset.parent_id;
    while let Some(parent_id) = next {
        if !visited.insert(parent_id) {
            break;
        }
        let parent = match cache.asset(parent_id) {
            Some(parent) => parent,
            None => break,
        };
        next = parent.parent_id;
        parents.insert(parent.asset_type.clone(), parent);
    }

    parents
}
