use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::{
    borrow::Borrow,
    collections::{BTreeMap, HashMap, HashSet},
    error::Error as StdError,
    fmt::{Display, Formatter, Result as FmtResult},
};

lazy_static! {
    /// The drilling hierarchy every dashboard ships with
    pub static ref ASSET_TYPES: AssetTypes = AssetTypes::drilling();
}

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct AssetTypeCode(pub String);

impl AssetTypeCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AssetTypeCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetTypeCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl Borrow<str> for AssetTypeCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for AssetTypeCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for AssetTypeCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AssetType {
    pub code: AssetTypeCode,
    /// The type one level up the hierarchy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_type: Option<AssetTypeCode>,
    /// Whether an asset of this type stands in for its currently active descendant
    #[serde(default, rename = "isResolvedToActiveChild")]
    pub is_resolved_to_active_child: bool,
}

impl AssetType {
    pub fn root(code: &str) -> Self {
        Self {
            code: code.into(),
            parent_type: None,
            is_resolved_to_active_child: false,
        }
    }

    pub fn child_of(code: &str, parent: &str) -> Self {
        Self {
            code: code.into(),
            parent_type: Some(parent.into()),
            is_resolved_to_active_child: false,
        }
    }

    #[must_use]
    pub fn resolved_to_active_child(mut self) -> Self {
        self.is_resolved_to_active_child = true;
        self
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum RegistryError {
    Duplicate(AssetTypeCode),
    UnknownParent {
        code: AssetTypeCode,
        parent: AssetTypeCode,
    },
    Cycle(AssetTypeCode),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RegistryError::Duplicate(code) => write!(f, "Asset type `{}` is registered twice", code),
            RegistryError::UnknownParent { code, parent } => write!(
                f,
                "Asset type `{}` names unknown parent type `{}`",
                code, parent
            ),
            RegistryError::Cycle(code) => {
                write!(f, "Asset type `{}` is its own ancestor", code)
            }
        }
    }
}

impl StdError for RegistryError {}

/// Static mapping from asset type code to its descriptor.
///
/// Construction checks that every parent chain is acyclic and ends at a root,
/// so all the ancestor walks below terminate.
#[derive(Clone, Debug)]
pub struct AssetTypes {
    types: HashMap<AssetTypeCode, AssetType>,
}

impl AssetTypes {
    pub fn new(types: impl IntoIterator<Item = AssetType>) -> Result<Self, RegistryError> {
        let mut map = HashMap::new();
        for asset_type in types {
            if map.contains_key(&asset_type.code) {
                return Err(RegistryError::Duplicate(asset_type.code));
            }
            map.insert(asset_type.code.clone(), asset_type);
        }

        for asset_type in map.values() {
            let mut seen = HashSet::new();
            seen.insert(&asset_type.code);
            let mut current = asset_type;
            while let Some(parent) = &current.parent_type {
                if !seen.insert(parent) {
                    return Err(RegistryError::Cycle(asset_type.code.clone()));
                }
                current = map.get(parent).ok_or_else(|| RegistryError::UnknownParent {
                    code: current.code.clone(),
                    parent: parent.clone(),
                })?;
            }
        }

        Ok(Self { types: map })
    }

    /// `program` <- `rig` <- `well`, where a rig proxies to the well it is currently drilling
    pub fn drilling() -> Self {
        let mut types = HashMap::new();
        for asset_type in [
            AssetType::root("program"),
            AssetType::child_of("rig", "program").resolved_to_active_child(),
            AssetType::child_of("well", "rig"),
        ] {
            types.insert(asset_type.code.clone(), asset_type);
        }
        Self { types }
    }

    pub fn get(&self, code: &str) -> Option<&AssetType> {
        self.types.get(code)
    }

    /// Unknown codes are never resolvable
    pub fn is_resolvable(&self, code: &str) -> bool {
        self.get(code).map_or(false, |t| t.is_resolved_to_active_child)
    }

    pub fn parent_of(&self, code: &str) -> Option<&AssetType> {
        self.get(code)
            .and_then(|t| t.parent_type.as_ref())
            .and_then(|p| self.get(p.as_str()))
    }

    /// Every ancestor of `code`, keyed by code. `code` itself is not included.
    pub fn parent_types(&self, code: &str) -> BTreeMap<AssetTypeCode, AssetType> {
        let mut parents = BTreeMap::new();
        let mut next = self.parent_of(code);
        while let Some(parent) = next {
            parents.insert(parent.code.clone(), parent.clone());
            next = self.parent_of(parent.code.as_str());
        }
        parents
    }

    /// `code` followed by its ancestors, immediate parent first
    pub fn ancestor_chain(&self, code: &str) -> Vec<AssetTypeCode> {
        let mut chain = vec![AssetTypeCode::new(code)];
        let mut next = self.parent_of(code);
        while let Some(parent) = next {
            chain.push(parent.code.clone());
            next = self.parent_of(parent.code.as_str());
        }
        chain
    }
}

impl Default for AssetTypes {
    fn default() -> Self {
        Self::drilling()
    }
}
