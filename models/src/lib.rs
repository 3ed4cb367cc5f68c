#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_precision_loss,
    clippy::missing_errors_doc,
    clippy::must_use_candidate
)]

pub mod asset;
pub mod asset_type;
pub mod id;
pub mod list;

pub use asset::{ActiveChild, Asset, AssetView, SortKey};
pub use asset_type::{AssetType, AssetTypeCode, AssetTypes, RegistryError, ASSET_TYPES};
pub use id::AssetId;
pub use list::{AssetList, ListParams, SortOrder};
