//! In-memory doubles for the menu service, the search index, the cache
//! store and probes.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use menuscan_backends::{
    BackendError, CacheError, CacheStore, MenuBackend, ProcessImageRequest, SearchError,
    SearchIndex,
};
use menuscan_core::search::{SearchHit, SearchQuery, SearchResult};
use menuscan_core::{Dependency, DependencyStatus, LookupOptions, ResourceKind};
use menuscan_server::health::HealthProbe;
use serde_json::{Value, json};

/// Menu service double that counts calls.
pub struct FakeMenuBackend {
    dishes: Mutex<HashMap<String, Result<Value, BackendError>>>,
    menus: Mutex<HashMap<String, Result<Value, BackendError>>>,
    panicking_dishes: Mutex<HashSet<String>>,
    image_result: Mutex<Result<Value, BackendError>>,
    dish_calls: AtomicUsize,
    menu_calls: AtomicUsize,
    image_calls: AtomicUsize,
    last_dish_request: Mutex<Option<(String, bool)>>,
    last_image_request: Mutex<Option<ProcessImageRequest>>,
}

impl FakeMenuBackend {
    pub fn new() -> Self {
        Self {
            dishes: Mutex::new(HashMap::new()),
            menus: Mutex::new(HashMap::new()),
            panicking_dishes: Mutex::new(HashSet::new()),
            image_result: Mutex::new(Ok(json!({"menu_id": "menu-1", "dishes": []}))),
            dish_calls: AtomicUsize::new(0),
            menu_calls: AtomicUsize::new(0),
            image_calls: AtomicUsize::new(0),
            last_dish_request: Mutex::new(None),
            last_image_request: Mutex::new(None),
        }
    }

    pub fn put_dish(&self, id: &str, result: Result<Value, BackendError>) {
        self.dishes.lock().unwrap().insert(id.to_string(), result);
    }

    /// Answers menu fetches for `id`. Unknown menus are `NotFound`.
    pub fn put_menu(&self, id: &str, result: Result<Value, BackendError>) {
        self.menus.lock().unwrap().insert(id.to_string(), result);
    }

    /// Makes `get_dish(id)` panic, standing in for a handler bug.
    pub fn panic_on_dish(&self, id: &str) {
        self.panicking_dishes.lock().unwrap().insert(id.to_string());
    }

    pub fn set_image_result(&self, result: Result<Value, BackendError>) {
        *self.image_result.lock().unwrap() = result;
    }

    pub fn dish_calls(&self) -> usize {
        self.dish_calls.load(Ordering::SeqCst)
    }

    pub fn menu_calls(&self) -> usize {
        self.menu_calls.load(Ordering::SeqCst)
    }

    pub fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }

    pub fn last_dish_request(&self) -> Option<(String, bool)> {
        self.last_dish_request.lock().unwrap().clone()
    }

    pub fn last_image_request(&self) -> Option<ProcessImageRequest> {
        self.last_image_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl MenuBackend for FakeMenuBackend {
    async fn process_menu_image(&self, request: ProcessImageRequest) -> Result<Value, BackendError> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_image_request.lock().unwrap() = Some(request);
        self.image_result.lock().unwrap().clone()
    }

    async fn get_dish(&self, dish_id: &str, include_similar: bool) -> Result<Value, BackendError> {
        self.dish_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_dish_request.lock().unwrap() = Some((dish_id.to_string(), include_similar));
        let panics = self.panicking_dishes.lock().unwrap().contains(dish_id);
        if panics {
            panic!("dish {} blew up", dish_id);
        }
        self.dishes
            .lock()
            .unwrap()
            .get(dish_id)
            .cloned()
            .unwrap_or_else(|| Err(BackendError::not_found(format!("Dish {} not found", dish_id))))
    }

    async fn fetch(
        &self,
        kind: ResourceKind,
        id: &str,
        options: &LookupOptions,
    ) -> Result<Value, BackendError> {
        match kind {
            ResourceKind::Dish => self.get_dish(id, options.include_similar).await,
            ResourceKind::Menu => {
                self.menu_calls.fetch_add(1, Ordering::SeqCst);
                self.menus
                    .lock()
                    .unwrap()
                    .get(id)
                    .cloned()
                    .unwrap_or_else(|| Err(BackendError::not_found(format!("Menu {} not found", id))))
            },
        }
    }

    fn name(&self) -> &str {
        "fake-menu-service"
    }
}

/// Search index double.
pub struct FakeIndex {
    result: Mutex<Result<SearchResult, String>>,
    calls: AtomicUsize,
    last_query: Mutex<Option<SearchQuery>>,
}

impl FakeIndex {
    pub fn new() -> Self {
        Self {
            result: Mutex::new(Ok(SearchResult {
                hits: Vec::new(),
                total: 0,
                took: None,
            })),
            calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        }
    }

    pub fn set_hits(&self, hits: Vec<SearchHit>, total: u64) {
        *self.result.lock().unwrap() = Ok(SearchResult {
            hits,
            total,
            took: None,
        });
    }

    pub fn fail_with(&self, message: &str) {
        *self.result.lock().unwrap() = Err(message.to_string());
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<SearchQuery> {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchIndex for FakeIndex {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResult, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.clone());
        self.result
            .lock()
            .unwrap()
            .clone()
            .map_err(SearchError::Transport)
    }

    async fn cluster_health(&self) -> Result<String, SearchError> {
        Ok("green".to_string())
    }

    fn name(&self) -> &str {
        "fake-index"
    }
}

/// Cache store whose every command fails, as if Redis were down.
pub struct FailingStore;

#[async_trait]
impl CacheStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Err(CacheError::Unavailable {
            reason: "connection refused".to_string(),
        })
    }

    async fn set_ex(&self, _key: &str, _value: Vec<u8>, _ttl: Duration) -> Result<(), CacheError> {
        Err(CacheError::Command("READONLY".to_string()))
    }

    async fn ping(&self) -> Result<(), CacheError> {
        Err(CacheError::Unavailable {
            reason: "connection refused".to_string(),
        })
    }

    fn name(&self) -> &str {
        "failing-store"
    }
}

/// Probe with a fixed answer.
pub struct FixedProbe(pub Dependency, pub DependencyStatus);

#[async_trait]
impl HealthProbe for FixedProbe {
    fn dependency(&self) -> Dependency {
        self.0
    }

    async fn check(&self) -> DependencyStatus {
        self.1.clone()
    }
}
