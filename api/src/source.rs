use async_trait::async_trait;
use rigdash_models::{Asset, AssetId, AssetTypeCode};
use std::sync::Arc;

use crate::Result;

/// The remote operations the asset engines depend on
#[async_trait]
pub trait AssetSource: Send + Sync {
    /// Fails with [`crate::error::Error::NotFound`] when there is no such asset
    async fn fetch_asset_by_id(&self, asset_id: AssetId) -> Result<Asset>;

    /// `None` when the parent currently has no active child
    async fn fetch_active_child(&self, parent_id: AssetId) -> Result<Option<Asset>>;

    /// Every asset whose type is one of `types`
    async fn fetch_assets_by_types(&self, types: &[AssetTypeCode]) -> Result<Vec<Asset>>;
}

#[async_trait]
impl<S: AssetSource + ?Sized> AssetSource for Arc<S> {
    async fn fetch_asset_by_id(&self, asset_id: AssetId) -> Result<Asset> {
        (**self).fetch_asset_by_id(asset_id).await
    }

    async fn fetch_active_child(&self, parent_id: AssetId) -> Result<Option<Asset>> {
        (**self).fetch_active_child(parent_id).await
    }

    async fn fetch_assets_by_types(&self, types: &[AssetTypeCode]) -> Result<Vec<Asset>> {
        (**self).fetch_assets_by_types(types).await
    }
}
