//! Views and view references.

use std::sync::Arc;
use std::time::Duration;

use crate::views::error::LoadError;
use crate::views::lazy::LazyView;
use crate::views::loader::ViewLoader;

/// A materialized view, ready for the host to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    component: String,
    source: Option<String>,
}

impl View {
    /// A view that is bundled with the application (no chunk to fetch).
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            source: None,
        }
    }

    /// A view materialized from a separately fetched chunk.
    pub fn with_source(component: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            source: Some(source.into()),
        }
    }

    /// Component name, e.g. `HomeView`.
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Loaded chunk source, for lazily fetched views.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

/// How a route obtains its view.
#[derive(Debug, Clone)]
pub enum ViewRef {
    /// Available synchronously.
    Eager(Arc<View>),
    /// Fetched on first navigation, then cached.
    Lazy(LazyView),
}

impl ViewRef {
    pub fn eager(view: View) -> Self {
        ViewRef::Eager(Arc::new(view))
    }

    pub fn lazy(
        component: impl Into<String>,
        loader: Arc<dyn ViewLoader>,
        timeout: Option<Duration>,
    ) -> Self {
        let lazy = LazyView::new(component, loader);
        ViewRef::Lazy(match timeout {
            Some(limit) => lazy.with_timeout(limit),
            None => lazy,
        })
    }

    pub fn component(&self) -> &str {
        match self {
            ViewRef::Eager(view) => view.component(),
            ViewRef::Lazy(lazy) => lazy.component(),
        }
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self, ViewRef::Lazy(_))
    }

    /// The view if it is available without waiting.
    pub fn get(&self) -> Option<Arc<View>> {
        match self {
            ViewRef::Eager(view) => Some(view.clone()),
            ViewRef::Lazy(lazy) => lazy.get(),
        }
    }

    /// Obtain the view, loading it first if needed.
    pub async fn resolve(&self) -> Result<Arc<View>, LoadError> {
        match self {
            ViewRef::Eager(view) => Ok(view.clone()),
            ViewRef::Lazy(lazy) => lazy.load().await,
        }
    }
}
