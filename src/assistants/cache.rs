use std::collections::{HashMap, VecDeque};
use tokio::sync::Mutex;
use tracing::info;

/// Process-lifetime store of caller phone number -> assistant description.
/// Entries never expire; everything is lost on restart. A real deployment
/// would back this with a database or Redis, but an in-memory map is enough
/// for the call volumes this server sees.
///
/// Constructed once in `main` and shared through `AppState`; the single
/// mutex gives last-write-wins semantics under concurrent webhooks.
pub struct AssistantCache {
    inner: Mutex<CacheInner>,
}

struct CacheInner {
    descriptions: HashMap<String, String>,
    // Insertion order, used only when a capacity is configured.
    order: VecDeque<String>,
    capacity: Option<usize>,
}

impl AssistantCache {
    /// `capacity: None` keeps the cache unbounded. With `Some(n)`, inserting
    /// a new caller at capacity evicts the oldest entry first.
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                descriptions: HashMap::new(),
                order: VecDeque::new(),
                capacity,
            }),
        }
    }

    pub async fn get(&self, caller_number: &str) -> Option<String> {
        self.inner.lock().await.descriptions.get(caller_number).cloned()
    }

    /// Unconditional upsert. The empty caller number is a valid key; whether
    /// a caller identity is required at all is decided upstream.
    pub async fn put(&self, caller_number: &str, description: &str) {
        let mut inner = self.inner.lock().await;

        if inner.descriptions.contains_key(caller_number) {
            inner
                .descriptions
                .insert(caller_number.to_string(), description.to_string());
            return;
        }

        while inner.capacity.is_some_and(|cap| inner.descriptions.len() >= cap) {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            info!("assistant cache full, evicting entry for {}", oldest);
            inner.descriptions.remove(&oldest);
        }

        inner.order.push_back(caller_number.to_string());
        inner
            .descriptions
            .insert(caller_number.to_string(), description.to_string());
    }
}
