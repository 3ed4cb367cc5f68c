use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::{
    cmp::Ordering,
    collections::BTreeMap,
    ops::Deref,
    sync::Arc,
};

use crate::{asset_type::AssetTypeCode, id::AssetId};

/// Outcome of resolving a resolvable asset to its active child
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ActiveChild {
    /// Resolution has not run yet. Absent on the wire.
    #[default]
    NotAttempted,
    /// Resolution ran and the remote system reported no active child. `null` on the wire.
    None,
    Some(AssetId),
}

impl ActiveChild {
    pub fn is_not_attempted(&self) -> bool {
        matches!(self, ActiveChild::NotAttempted)
    }

    pub fn id(self) -> Option<AssetId> {
        match self {
            ActiveChild::Some(id) => Some(id),
            _ => None,
        }
    }
}

impl From<Option<AssetId>> for ActiveChild {
    fn from(child: Option<AssetId>) -> Self {
        child.map_or(ActiveChild::None, ActiveChild::Some)
    }
}

impl Serialize for ActiveChild {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ActiveChild::Some(id) => serializer.serialize_some(id),
            _ => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for ActiveChild {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<AssetId>::deserialize(deserializer).map(ActiveChild::from)
    }
}

/// An asset record as returned by the remote API.
///
/// Records in the store are immutable. Resolution produces a new version via
/// [`Asset::with_active_child`] instead of mutating the stored one.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Asset {
    pub id: AssetId,
    #[serde(rename = "type")]
    pub asset_type: AssetTypeCode,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<AssetId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(
        default,
        rename = "activeChildId",
        skip_serializing_if = "ActiveChild::is_not_attempted"
    )]
    pub active_child: ActiveChild,
    /// Any other field the API sends along
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Asset {
    pub fn new(id: u64, asset_type: &str, name: &str) -> Self {
        Self {
            id: AssetId(id),
            asset_type: asset_type.into(),
            name: name.to_string(),
            parent_id: None,
            status: None,
            active_child: ActiveChild::NotAttempted,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_parent(mut self, parent_id: u64) -> Self {
        self.parent_id = Some(AssetId(parent_id));
        self
    }

    #[must_use]
    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(name.to_string(), value.into());
        self
    }

    /// The version of this asset after its active child has been looked up
    #[must_use]
    pub fn with_active_child(&self, child: Option<AssetId>) -> Self {
        Self {
            active_child: child.into(),
            ..self.clone()
        }
    }

    /// Looks up a record-level field for sorting.
    ///
    /// Empty strings, `null`, `false` and zero count as missing so the caller
    /// falls back to the parent lookup.
    pub fn field(&self, name: &str) -> Option<SortKey> {
        let key = match name {
            "id" => SortKey::Int(self.id.0),
            "type" => SortKey::Text(self.asset_type.0.clone()),
            "name" => SortKey::Text(self.name.clone()),
            "parent_id" => SortKey::Int(self.parent_id?.0),
            "status" => SortKey::Text(self.status.clone()?),
            "activeChildId" => SortKey::Int(self.active_child.id()?.0),
            other => SortKey::from_value(self.extra.get(other)?)?,
        };
        key.is_present().then_some(key)
    }
}

/// A sortable field value
#[derive(Clone, Debug)]
pub enum SortKey {
    /// Unsigned integers such as ids, compared exactly
    Int(u64),
    Number(f64),
    Text(String),
}

impl SortKey {
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n
                .as_u64()
                .map(SortKey::Int)
                .or_else(|| n.as_f64().map(SortKey::Number)),
            Value::String(s) => Some(SortKey::Text(s.clone())),
            Value::Bool(true) => Some(SortKey::Int(1)),
            _ => None,
        }
    }

    fn is_present(&self) -> bool {
        match self {
            SortKey::Int(n) => *n != 0,
            SortKey::Number(n) => *n != 0.0 && !n.is_nan(),
            SortKey::Text(s) => !s.is_empty(),
        }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Int(a), SortKey::Int(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Int(a), SortKey::Number(b)) => (*a as f64).total_cmp(b),
            (SortKey::Number(a), SortKey::Int(b)) => a.total_cmp(&(*b as f64)),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Text(_), _) => Ordering::Greater,
            (_, SortKey::Text(_)) => Ordering::Less,
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

/// An asset decorated with data derived from the store at read time.
///
/// Views are handed to callers only and never written back.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AssetView {
    #[serde(flatten)]
    pub asset: Arc<Asset>,
    /// Ancestors keyed by their asset type
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub parents: BTreeMap<AssetTypeCode, Arc<Asset>>,
    /// The immediate parent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Arc<Asset>>,
}

impl AssetView {
    pub fn new(asset: Arc<Asset>) -> Self {
        Self {
            asset,
            parents: BTreeMap::new(),
            parent: None,
        }
    }

    /// The record field, or the name of the ancestor whose type code is `field`
    pub fn sort_key(&self, field: &str) -> Option<SortKey> {
        self.asset.field(field).or_else(|| {
            self.parents
                .get(field)
                .filter(|p| !p.name.is_empty())
                .map(|p| SortKey::Text(p.name.clone()))
        })
    }
}

impl Deref for AssetView {
    type Target = Asset;

    fn deref(&self) -> &Self::Target {
        &self.asset
    }
}
