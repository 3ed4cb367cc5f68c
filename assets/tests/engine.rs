use async_trait::async_trait;
use rigdash_api::{AssetSource, Error, Result, StatusCode};
use rigdash_assets::{AssetEngine, Resolved};
use rigdash_cache::AssetCache;
use rigdash_models::{
    ActiveChild, Asset, AssetId, AssetType, AssetTypeCode, AssetTypes, ListParams, SortOrder,
};
use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

#[derive(Clone, Debug, PartialEq)]
enum Call {
    ById(AssetId),
    ActiveChild(AssetId),
    ByTypes(Vec<AssetTypeCode>),
}

/// In-memory remote API that records every call
#[derive(Default)]
struct MockSource {
    assets: HashMap<AssetId, Asset>,
    active_children: HashMap<AssetId, AssetId>,
    unavailable: HashSet<AssetId>,
    calls: Mutex<Vec<Call>>,
}

impl MockSource {
    fn with(mut self, asset: Asset) -> Self {
        self.assets.insert(asset.id, asset);
        self
    }

    fn active_child(mut self, parent: u64, child: u64) -> Self {
        self.active_children.insert(AssetId(parent), AssetId(child));
        self
    }

    fn unavailable(mut self, asset_id: u64) -> Self {
        self.unavailable.insert(AssetId(asset_id));
        self
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl AssetSource for MockSource {
    async fn fetch_asset_by_id(&self, asset_id: AssetId) -> Result<Asset> {
        self.record(Call::ById(asset_id));
        self.assets
            .get(&asset_id)
            .cloned()
            .ok_or(Error::NotFound(asset_id))
    }

    async fn fetch_active_child(&self, parent_id: AssetId) -> Result<Option<Asset>> {
        self.record(Call::ActiveChild(parent_id));
        if self.unavailable.contains(&parent_id) {
            return Err(Error::APIError(StatusCode::SERVICE_UNAVAILABLE));
        }
        Ok(self
            .active_children
            .get(&parent_id)
            .and_then(|child| self.assets.get(child))
            .cloned())
    }

    async fn fetch_assets_by_types(&self, types: &[AssetTypeCode]) -> Result<Vec<Asset>> {
        self.record(Call::ByTypes(types.to_vec()));
        let mut assets = self
            .assets
            .values()
            .filter(|a| types.contains(&a.asset_type))
            .cloned()
            .collect::<Vec<_>>();
        assets.sort_by_key(|a| a.id);
        Ok(assets)
    }
}

fn engine(source: MockSource) -> (AssetEngine<Arc<MockSource>>, Arc<MockSource>) {
    engine_with_types(source, AssetTypes::drilling())
}

fn engine_with_types(
    source: MockSource,
    types: AssetTypes,
) -> (AssetEngine<Arc<MockSource>>, Arc<MockSource>) {
    let source = Arc::new(source);
    let engine = AssetEngine::new(AssetCache::new(), Arc::new(types), Arc::clone(&source));
    (engine, source)
}

#[tokio::test]
async fn resolves_rig_to_active_well() {
    let source = MockSource::default()
        .with(Asset::new(5, "rig", "Rig 5"))
        .with(Asset::new(9, "well", "Alpha-1").with_parent(5))
        .active_child(5, 9);
    let (engine, source) = engine(source);

    let view = engine.resolve_asset(AssetId(5)).await.unwrap().found().unwrap();
    assert_eq!(view.id, AssetId(9));
    assert_eq!(view.parent.as_ref().map(|p| p.id), Some(AssetId(5)));

    let rig = engine.cache().asset(AssetId(5)).unwrap();
    assert_eq!(rig.active_child, ActiveChild::Some(AssetId(9)));
    let well = engine.cache().asset(AssetId(9)).unwrap();
    assert_eq!(well.active_child, ActiveChild::NotAttempted);
    assert_eq!(engine.cache().len(), 2);

    assert_eq!(
        source.calls(),
        vec![Call::ById(AssetId(5)), Call::ActiveChild(AssetId(5))]
    );
}

#[tokio::test]
async fn resolved_rig_is_answered_from_cache() {
    let source = MockSource::default()
        .with(Asset::new(5, "rig", "Rig 5"))
        .with(Asset::new(9, "well", "Alpha-1").with_parent(5))
        .active_child(5, 9);
    let (engine, source) = engine(source);

    engine.resolve_asset(AssetId(5)).await.unwrap();
    let view = engine.resolve_asset(AssetId(5)).await.unwrap().found().unwrap();

    assert_eq!(view.id, AssetId(9));
    assert_eq!(source.calls().len(), 2);
}

#[tokio::test]
async fn non_resolvable_asset_passes_through_without_fetching() {
    let (engine, source) = engine(MockSource::default());
    engine.cache().merge([
        Asset::new(5, "rig", "Rig 5"),
        Asset::new(9, "well", "Alpha-1").with_parent(5),
    ]);

    let view = engine.resolve_asset(AssetId(9)).await.unwrap().found().unwrap();

    assert_eq!(*view.asset, *engine.cache().asset(AssetId(9)).unwrap());
    assert_eq!(view.parent.as_ref().map(|p| p.name.as_str()), Some("Rig 5"));
    assert!(source.calls().is_empty());
}

#[tokio::test]
async fn uncached_non_resolvable_asset_takes_one_fetch() {
    let source = MockSource::default().with(Asset::new(9, "well", "Alpha-1").with_parent(5));
    let (engine, source) = engine(source);

    let view = engine.resolve_asset(AssetId(9)).await.unwrap().found().unwrap();

    assert_eq!(view.id, AssetId(9));
    assert!(view.parent.is_none());
    assert_eq!(source.calls(), vec![Call::ById(AssetId(9))]);
}

#[tokio::test]
async fn rig_without_active_child_is_resolved_once() {
    let source = MockSource::default().with(Asset::new(6, "rig", "Rig 6"));
    let (engine, source) = engine(source);

    assert_eq!(
        engine.resolve_asset(AssetId(6)).await.unwrap(),
        Resolved::NoActiveChild
    );
    let rig = engine.cache().asset(AssetId(6)).unwrap();
    assert_eq!(rig.active_child, ActiveChild::None);

    assert_eq!(
        engine.resolve_asset(AssetId(6)).await.unwrap(),
        Resolved::NoActiveChild
    );
    assert_eq!(
        source.calls(),
        vec![Call::ById(AssetId(6)), Call::ActiveChild(AssetId(6))]
    );
}

#[tokio::test]
async fn walks_nested_resolvable_types() {
    let types = AssetTypes::new([
        AssetType::root("fleet").resolved_to_active_child(),
        AssetType::child_of("rig", "fleet").resolved_to_active_child(),
        AssetType::child_of("well", "rig"),
    ])
    .unwrap();
    let source = MockSource::default()
        .with(Asset::new(1, "fleet", "North"))
        .with(Asset::new(5, "rig", "Rig 5").with_parent(1))
        .with(Asset::new(9, "well", "Alpha-1").with_parent(5))
        .active_child(1, 5)
        .active_child(5, 9);
    let (engine, source) = engine_with_types(source, types);

    let view = engine.resolve_asset(AssetId(1)).await.unwrap().found().unwrap();

    assert_eq!(view.id, AssetId(9));
    assert_eq!(source.calls().len(), 3);
    assert_eq!(
        engine.cache().asset(AssetId(1)).unwrap().active_child,
        ActiveChild::Some(AssetId(5))
    );
    assert_eq!(
        engine.cache().asset(AssetId(5)).unwrap().active_child,
        ActiveChild::Some(AssetId(9))
    );
}

#[tokio::test]
async fn cyclic_active_children_terminate() {
    let types = AssetTypes::new([AssetType::root("rig").resolved_to_active_child()]).unwrap();
    let source = MockSource::default()
        .with(Asset::new(1, "rig", "A"))
        .with(Asset::new(2, "rig", "B"))
        .active_child(1, 2)
        .active_child(2, 1);
    let (engine, source) = engine_with_types(source, types);

    let resolved = engine.resolve_asset(AssetId(1)).await.unwrap();

    assert_eq!(resolved, Resolved::NotLoaded);
    assert_eq!(source.calls().len(), 3);
}

#[tokio::test]
async fn cached_outcomes_stay_distinct() {
    let (engine, source) = engine(MockSource::default());
    engine.cache().merge([
        Asset::new(5, "rig", "Rig 5").with_active_child(None),
        Asset::new(6, "rig", "Rig 6").with_active_child(Some(AssetId(99))),
        Asset::new(7, "rig", "Rig 7").with_active_child(Some(AssetId(9))),
        Asset::new(9, "well", "Alpha-1").with_parent(7),
    ]);

    let no_child = engine.resolve_asset(AssetId(5)).await.unwrap();
    let not_loaded = engine.resolve_asset(AssetId(6)).await.unwrap();
    let found = engine.resolve_asset(AssetId(7)).await.unwrap();

    assert_eq!(no_child, Resolved::NoActiveChild);
    assert_eq!(not_loaded, Resolved::NotLoaded);
    assert_ne!(no_child, not_loaded);
    assert_eq!(found.view().map(|v| v.id), Some(AssetId(9)));
    assert!(source.calls().is_empty());
}

#[tokio::test]
async fn unknown_asset_fails_and_leaves_cache_untouched() {
    let (engine, _) = engine(MockSource::default());

    let err = engine.resolve_asset(AssetId(404)).await.unwrap_err();

    assert!(err.is_not_found());
    assert!(engine.cache().is_empty());
}

#[tokio::test]
async fn failed_child_fetch_merges_nothing() {
    let source = MockSource::default()
        .with(Asset::new(5, "rig", "Rig 5"))
        .unavailable(5);
    let (engine, _) = engine(source);

    let err = engine.resolve_asset(AssetId(5)).await.unwrap_err();

    assert!(matches!(err, Error::APIError(StatusCode::SERVICE_UNAVAILABLE)));
    assert!(engine.cache().is_empty());
}

fn drilling_source() -> MockSource {
    MockSource::default()
        .with(Asset::new(1, "program", "Permian"))
        .with(Asset::new(2, "rig", "Rig A").with_parent(1))
        .with(Asset::new(3, "rig", "Rig B").with_parent(1))
        .with(Asset::new(10, "well", "").with_parent(2))
        .with(Asset::new(11, "well", "").with_parent(3))
        .with(Asset::new(20, "well", "Alpha-1").with_parent(2))
        .with(Asset::new(21, "well", "Beta-2").with_parent(3))
        .with(Asset::new(22, "well", "alpha-3").with_parent(3))
}

#[tokio::test]
async fn loads_type_and_ancestors_in_one_request() {
    let (engine, source) = engine(drilling_source());

    engine.load_assets_of_type("well").await.unwrap();

    assert_eq!(
        source.calls(),
        vec![Call::ByTypes(vec![
            "well".into(),
            "rig".into(),
            "program".into()
        ])]
    );
    assert_eq!(engine.cache().len(), 8);

    assert_eq!(engine.load_assets_of_type("well").await.unwrap(), 0);
    assert_eq!(engine.cache().len(), 8);
}

#[tokio::test]
async fn search_is_case_insensitive() {
    let (engine, source) = engine(drilling_source());
    engine.load_assets_of_type("well").await.unwrap();

    let list = engine.list_assets("well", &ListParams::default().search("Alpha"));
    let names = list.assets.iter().map(|a| a.name.clone()).collect::<HashSet<_>>();

    assert_eq!(names, HashSet::from(["Alpha-1".to_string(), "alpha-3".to_string()]));
    assert!(list.assets.iter().all(|a| a.parents.contains_key("program")));
    assert_eq!(source.calls().len(), 1);
}

#[tokio::test]
async fn sorts_nameless_wells_by_rig_name() {
    let (engine, _) = engine(drilling_source());
    engine.load_assets_of_type("well").await.unwrap();

    let list = engine.list_assets("well", &ListParams::default().sort_by("rig", SortOrder::Asc));
    let unnamed = list
        .assets
        .iter()
        .filter(|a| a.name.is_empty())
        .map(|a| a.id)
        .collect::<Vec<_>>();
    assert_eq!(unnamed, vec![AssetId(10), AssetId(11)]);

    let list = engine.list_assets("well", &ListParams::default());
    let ids = list.assets.iter().map(|a| a.id.0).collect::<Vec<_>>();
    assert_eq!(ids, vec![20, 21, 22, 10, 11]);
}

#[tokio::test]
async fn listing_reads_only_the_cache() {
    let (engine, source) = engine(drilling_source());

    let list = engine.list_assets("well", &ListParams::default());

    assert!(list.assets.is_empty());
    assert_eq!(list.parent_types.len(), 2);
    assert!(source.calls().is_empty());
}
