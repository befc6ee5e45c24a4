//! Lazily loaded views.
//!
//! # Responsibilities
//! - Hold the single-write cache cell for one lazy route
//! - Coalesce concurrent first loads into one in-flight load
//! - Enforce the optional load timeout
//!
//! # Design Decisions
//! - One shared in-flight load per route: every caller waiting on it gets
//!   its outcome, success or `LoadError`
//! - The in-flight slot is cleared when the load settles; a failed load
//!   leaves the cell empty, so only a later navigation tries again
//! - The load runs in a spawned task that owns the cell, so a caller that
//!   stops waiting does not cancel it; the result still fills the cache
//! - Must be driven from within a Tokio runtime

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::{Mutex, OnceCell};

use crate::observability::metrics;
use crate::views::error::LoadError;
use crate::views::loader::ViewLoader;
use crate::views::view::View;

type PendingLoad = Shared<BoxFuture<'static, Result<Arc<View>, LoadError>>>;

/// A view fetched on first use and cached for the life of the process.
///
/// Clones share the same cell.
#[derive(Clone)]
pub struct LazyView {
    component: Arc<str>,
    loader: Arc<dyn ViewLoader>,
    cell: Arc<OnceCell<Arc<View>>>,
    in_flight: Arc<Mutex<Option<PendingLoad>>>,
    timeout: Option<Duration>,
}

impl LazyView {
    pub fn new(component: impl Into<String>, loader: Arc<dyn ViewLoader>) -> Self {
        Self {
            component: Arc::from(component.into()),
            loader,
            cell: Arc::new(OnceCell::new()),
            in_flight: Arc::new(Mutex::new(None)),
            timeout: None,
        }
    }

    /// Fail loads that take longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    /// The cached view, if a load has already succeeded.
    pub fn get(&self) -> Option<Arc<View>> {
        self.cell.get().cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// Return the cached view, or load it.
    ///
    /// Callers arriving while a load is in flight wait for that load and
    /// share its outcome instead of starting another.
    pub async fn load(&self) -> Result<Arc<View>, LoadError> {
        if let Some(view) = self.cell.get() {
            return Ok(view.clone());
        }

        let pending = {
            let mut in_flight = self.in_flight.lock().await;
            if let Some(view) = self.cell.get() {
                return Ok(view.clone());
            }
            match in_flight.as_ref() {
                Some(pending) => pending.clone(),
                None => {
                    let pending = self.start_load();
                    *in_flight = Some(pending.clone());
                    pending
                }
            }
        };

        pending.await
    }

    /// Spawn the load task. Caller must hold the in-flight lock.
    fn start_load(&self) -> PendingLoad {
        let component = self.component.clone();
        let task = tokio::spawn(materialize(
            self.cell.clone(),
            self.in_flight.clone(),
            self.loader.clone(),
            self.component.clone(),
            self.timeout,
        ));

        async move {
            match task.await {
                Ok(result) => result,
                Err(_) => Err(LoadError::Aborted {
                    component: component.to_string(),
                }),
            }
        }
        .boxed()
        .shared()
    }
}

async fn materialize(
    cell: Arc<OnceCell<Arc<View>>>,
    in_flight: Arc<Mutex<Option<PendingLoad>>>,
    loader: Arc<dyn ViewLoader>,
    component: Arc<str>,
    timeout: Option<Duration>,
) -> Result<Arc<View>, LoadError> {
    tracing::debug!(component = %component, "Loading lazy view");
    let result = fetch(loader.as_ref(), &component, timeout).await;
    metrics::record_view_load(&component, result.is_ok());

    let result = result.map(Arc::new);
    if let Ok(view) = &result {
        // Only one load runs at a time, so the cell is still empty here.
        let _ = cell.set(view.clone());
    }
    *in_flight.lock().await = None;
    result
}

async fn fetch(
    loader: &dyn ViewLoader,
    component: &str,
    timeout: Option<Duration>,
) -> Result<View, LoadError> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, loader.load(component))
            .await
            .map_err(|_| LoadError::Timeout {
                component: component.to_string(),
                timeout_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
            })?,
        None => loader.load(component).await,
    }
}

impl fmt::Debug for LazyView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyView")
            .field("component", &self.component)
            .field("loaded", &self.cell.initialized())
            .field("timeout", &self.timeout)
            .finish()
    }
}
