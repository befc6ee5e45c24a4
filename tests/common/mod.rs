//! Shared utilities for route table integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use brainrefresh_router::routing::{Route, RouteTable};
use brainrefresh_router::views::{LoadError, View, ViewLoader, ViewRef};
use futures_util::future::{BoxFuture, FutureExt};

/// A loader that counts calls, waits before answering, and can fail the
/// first few attempts.
#[derive(Debug)]
pub struct CountingLoader {
    calls: AtomicUsize,
    delay: Duration,
    failures_left: AtomicUsize,
}

impl CountingLoader {
    pub fn new(delay: Duration) -> Arc<Self> {
        Self::failing(delay, 0)
    }

    pub fn failing(delay: Duration, failures: usize) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            delay,
            failures_left: AtomicUsize::new(failures),
        })
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ViewLoader for CountingLoader {
    fn load<'a>(&'a self, component: &'a str) -> BoxFuture<'a, Result<View, LoadError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        async move {
            tokio::time::sleep(self.delay).await;
            let fail = self
                .failures_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if fail {
                Err(LoadError::Failed {
                    component: component.to_string(),
                    message: "chunk server unavailable".to_string(),
                })
            } else {
                Ok(View::with_source(component, format!("// {component} chunk")))
            }
        }
        .boxed()
    }
}

/// The application's route table with `about` loaded through `loader`.
#[allow(dead_code)]
pub fn app_table(loader: Arc<dyn ViewLoader>) -> RouteTable {
    let eager = |component: &str| ViewRef::eager(View::new(component));
    RouteTable::new(vec![
        Route::new("home", "/", eager("HomeView")).unwrap(),
        Route::new("about", "/about/", ViewRef::lazy("AboutView", loader, None)).unwrap(),
        Route::new("question", "/questions/:uuid/", eager("QuestionView")).unwrap(),
        Route::new("tags", "/tags/", eager("HomeView")).unwrap(),
        Route::new("tag", "/tags/:slug/", eager("HomeView")).unwrap(),
    ])
    .unwrap()
}
