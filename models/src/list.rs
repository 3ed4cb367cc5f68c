use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, str::FromStr};

use crate::{
    asset::AssetView,
    asset_type::{AssetType, AssetTypeCode},
};

pub const DEFAULT_SORT_FIELD: &str = "name";

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = std::convert::Infallible;

    /// Only an explicit `desc` reverses the order
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("desc") {
            Ok(SortOrder::Desc)
        } else {
            Ok(SortOrder::Asc)
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ListParams {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default = "default_sort_field", rename = "sortField")]
    pub sort_field: String,
    #[serde(default, rename = "sortOrder")]
    pub sort_order: SortOrder,
}

fn default_sort_field() -> String {
    DEFAULT_SORT_FIELD.to_string()
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            search: None,
            sort_field: default_sort_field(),
            sort_order: SortOrder::Asc,
        }
    }
}

impl ListParams {
    #[must_use]
    pub fn search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    #[must_use]
    pub fn sort_by(mut self, field: &str, order: SortOrder) -> Self {
        self.sort_field = field.to_string();
        self.sort_order = order;
        self
    }

    /// The trimmed, lowercased search term, if there is one
    pub fn needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AssetList {
    pub assets: Vec<AssetView>,
    #[serde(rename = "parentTypes")]
    pub parent_types: BTreeMap<AssetTypeCode, AssetType>,
}
