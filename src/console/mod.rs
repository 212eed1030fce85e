//! Console-side state: per-kind list views and the dashboard.

pub mod dashboard;
pub mod list_view;

use std::fmt;

pub use dashboard::{load_stats, DashboardStats};
pub use list_view::{ConsoleError, ListView, LoadState, View};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Short user-facing outcome of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            NoticeLevel::Success => write!(f, "ok: {}", self.message),
            NoticeLevel::Error => write!(f, "error: {}", self.message),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use biblioteca_http::{ApiError, ApiResult, CatalogService};
    use biblioteca_kernel::{CatalogEntity, EntityId};

    /// In-memory backend recording every call it receives.
    pub(crate) struct MemoryService<E> {
        items: Mutex<Vec<E>>,
        failure: Mutex<Option<(u16, &'static str)>>,
        calls: Mutex<Vec<&'static str>>,
        next_id: AtomicI64,
    }

    impl<E: CatalogEntity> MemoryService<E> {
        pub(crate) fn with(items: Vec<E>) -> Self {
            let next_id = items.iter().filter_map(|e| e.id()).max().unwrap_or(0) + 1;
            Self {
                items: Mutex::new(items),
                failure: Mutex::new(None),
                calls: Mutex::new(Vec::new()),
                next_id: AtomicI64::new(next_id),
            }
        }

        /// Every following call fails with `status` and a JSON `message` body.
        pub(crate) fn fail_with(&self, status: u16, body: &'static str) {
            *self.failure.lock().unwrap() = Some((status, body));
        }

        pub(crate) fn recover(&self) {
            *self.failure.lock().unwrap() = None;
        }

        pub(crate) fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        pub(crate) fn count(&self, call: &str) -> usize {
            self.calls().iter().filter(|c| **c == call).count()
        }

        fn enter(&self, call: &'static str) -> ApiResult<()> {
            self.calls.lock().unwrap().push(call);
            match *self.failure.lock().unwrap() {
                Some((status, body)) => Err(ApiError::from_status(status, body.as_bytes())),
                None => Ok(()),
            }
        }

        fn with_id(entity: &E, id: EntityId) -> E {
            let mut value = serde_json::to_value(entity).unwrap();
            value["id"] = serde_json::json!(id);
            serde_json::from_value(value).unwrap()
        }
    }

    #[async_trait]
    impl<E: CatalogEntity> CatalogService<E> for MemoryService<E> {
        async fn list(&self) -> ApiResult<Vec<E>> {
            self.enter("list")?;
            Ok(self.items.lock().unwrap().clone())
        }

        async fn get(&self, id: EntityId) -> ApiResult<E> {
            self.enter("get")?;
            self.items
                .lock()
                .unwrap()
                .iter()
                .find(|e| e.id() == Some(id))
                .cloned()
                .ok_or_else(|| ApiError::from_status(404, b""))
        }

        async fn create(&self, entity: &E) -> ApiResult<E> {
            self.enter("create")?;
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            let created = Self::with_id(entity, id);
            self.items.lock().unwrap().push(created.clone());
            Ok(created)
        }

        async fn update(&self, id: EntityId, entity: &E) -> ApiResult<E> {
            self.enter("update")?;
            let updated = Self::with_id(entity, id);
            let mut items = self.items.lock().unwrap();
            let slot = items
                .iter_mut()
                .find(|e| e.id() == Some(id))
                .ok_or_else(|| ApiError::from_status(404, b""))?;
            *slot = updated.clone();
            Ok(updated)
        }

        async fn delete(&self, id: EntityId) -> ApiResult<()> {
            self.enter("delete")?;
            self.items.lock().unwrap().retain(|e| e.id() != Some(id));
            Ok(())
        }
    }
}
