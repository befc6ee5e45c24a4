//! View loaders.
//!
//! # Responsibilities
//! - Define the seam used to materialize lazy views
//! - Provide the on-disk chunk loader used by the binary
//!
//! # Design Decisions
//! - Loaders are shared (`Arc<dyn ViewLoader>`) across all lazy routes
//! - Loaders do not cache; caching belongs to the per-route cell
//! - Loaders do not retry
//! - Component names are identifiers; anything else never reaches the disk

use std::fmt;
use std::path::{Path, PathBuf};

use futures_util::future::{BoxFuture, FutureExt};

use crate::views::error::LoadError;
use crate::views::view::View;

/// Materializes the view for a component name.
pub trait ViewLoader: Send + Sync + fmt::Debug {
    fn load<'a>(&'a self, component: &'a str) -> BoxFuture<'a, Result<View, LoadError>>;
}

/// Returns true if `component` can name a chunk file.
///
/// Component names double as chunk file stems, so they are kept to
/// identifiers: an ASCII letter followed by ASCII alphanumerics or `_`.
pub fn is_component_name(component: &str) -> bool {
    let mut chars = component.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Loads view chunks from `<chunk_dir>/<Component>.js`.
#[derive(Debug, Clone)]
pub struct ChunkDirLoader {
    chunk_dir: PathBuf,
}

impl ChunkDirLoader {
    pub fn new(chunk_dir: impl Into<PathBuf>) -> Self {
        Self {
            chunk_dir: chunk_dir.into(),
        }
    }

    pub fn chunk_dir(&self) -> &Path {
        &self.chunk_dir
    }

    /// Where the chunk for `component` is expected.
    pub fn chunk_path(&self, component: &str) -> PathBuf {
        self.chunk_dir.join(format!("{}.js", component))
    }
}

impl ViewLoader for ChunkDirLoader {
    fn load<'a>(&'a self, component: &'a str) -> BoxFuture<'a, Result<View, LoadError>> {
        async move {
            if !is_component_name(component) {
                return Err(LoadError::Failed {
                    component: component.to_string(),
                    message: "invalid component name".to_string(),
                });
            }

            let path = self.chunk_path(component);
            match tokio::fs::read_to_string(&path).await {
                Ok(source) => Ok(View::with_source(component, source)),
                Err(e) => Err(LoadError::Io {
                    component: component.to_string(),
                    path,
                    message: e.to_string(),
                }),
            }
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_chunk_dir_loader_reads_chunk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("AboutView.js"), "export default {}").unwrap();

        let loader = ChunkDirLoader::new(dir.path());
        let view = loader.load("AboutView").await.unwrap();
        assert_eq!(view.component(), "AboutView");
        assert_eq!(view.source(), Some("export default {}"));
    }

    #[tokio::test]
    async fn test_chunk_dir_loader_refuses_paths_outside_dir() {
        let root = tempfile::tempdir().unwrap();
        let chunks = root.path().join("chunks");
        std::fs::create_dir(&chunks).unwrap();
        std::fs::write(root.path().join("secret.js"), "outside").unwrap();

        let loader = ChunkDirLoader::new(&chunks);
        for component in ["../secret", "/etc/passwd", "", "About.View"] {
            let err = loader.load(component).await.unwrap_err();
            assert!(
                matches!(err, LoadError::Failed { .. }),
                "{component:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_component_names() {
        assert!(is_component_name("AboutView"));
        assert!(is_component_name("Question_View2"));
        assert!(!is_component_name(""));
        assert!(!is_component_name("2View"));
        assert!(!is_component_name("views/About"));
        assert!(!is_component_name("../AboutView"));
    }

    #[tokio::test]
    async fn test_chunk_dir_loader_missing_chunk() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ChunkDirLoader::new(dir.path());

        let err = loader.load("AboutView").await.unwrap_err();
        match err {
            LoadError::Io { component, path, .. } => {
                assert_eq!(component, "AboutView");
                assert_eq!(path, dir.path().join("AboutView.js"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
