//! Optional backends loaded once at startup.
//!
//! A backend that fails to load becomes `Capability::Unavailable` with the reason.
//! Callers branch on it instead of holding a nullable global. Teardown is just
//! dropping the last `Arc`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{info, warn};

/// Errors raised while loading a backend artifact from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid artifact: {0}")]
    Invalid(String),
}

/// Reads and deserializes a JSON artifact.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// A shared backend, or the reason it is absent.
pub enum Capability<T: ?Sized> {
    Available(Arc<T>),
    Unavailable { reason: String },
}

impl<T: ?Sized> Clone for Capability<T> {
    fn clone(&self) -> Self {
        match self {
            Capability::Available(backend) => Capability::Available(Arc::clone(backend)),
            Capability::Unavailable { reason } => Capability::Unavailable {
                reason: reason.clone(),
            },
        }
    }
}

impl<T: ?Sized> fmt::Debug for Capability<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Available(_) => f.write_str("Available"),
            Capability::Unavailable { reason } => {
                f.debug_struct("Unavailable").field("reason", reason).finish()
            }
        }
    }
}

impl<T: ?Sized> Capability<T> {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Capability::Unavailable {
            reason: reason.into(),
        }
    }

    /// Loads a backend from an optional artifact path, logging the outcome once.
    ///
    /// No path configured and a failed load both yield `Unavailable`.
    pub fn load<E, F>(name: &str, path: Option<&Path>, loader: F) -> Self
    where
        E: fmt::Display,
        F: FnOnce(&Path) -> Result<Arc<T>, E>,
    {
        let Some(path) = path else {
            info!("{name}: no artifact configured; running without it");
            return Capability::unavailable(format!("{name} is not configured"));
        };

        match loader(path) {
            Ok(backend) => {
                info!("{name} loaded from {}", path.display());
                Capability::Available(backend)
            }
            Err(e) => {
                warn!("{name} failed to load from {}: {e}", path.display());
                Capability::unavailable(format!("{name} failed to load: {e}"))
            }
        }
    }

    pub fn get(&self) -> Option<&Arc<T>> {
        match self {
            Capability::Available(backend) => Some(backend),
            Capability::Unavailable { .. } => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Capability::Available(_))
    }

    /// "available" or "unavailable", for status payloads.
    pub fn status(&self) -> &'static str {
        if self.is_available() {
            "available"
        } else {
            "unavailable"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }

    struct Hello;

    impl Greeter for Hello {
        fn greet(&self) -> String {
            "hello".to_string()
        }
    }

    #[test]
    fn test_load_without_path_is_unavailable() {
        let cap: Capability<dyn Greeter> =
            Capability::load("greeter", None, |_| Ok::<_, LoadError>(Arc::new(Hello) as Arc<dyn Greeter>));
        assert!(!cap.is_available());
        assert_eq!(cap.status(), "unavailable");
    }

    #[test]
    fn test_load_failure_keeps_reason() {
        let cap: Capability<dyn Greeter> = Capability::load(
            "greeter",
            Some(Path::new("/nonexistent")),
            |_| Err::<Arc<dyn Greeter>, _>(LoadError::Invalid("boom".to_string())),
        );
        match cap {
            Capability::Unavailable { reason } => assert!(reason.contains("boom")),
            Capability::Available(_) => panic!("expected unavailable"),
        }
    }

    #[test]
    fn test_load_success_is_available() {
        let cap: Capability<dyn Greeter> = Capability::load(
            "greeter",
            Some(Path::new("unused")),
            |_| Ok::<_, LoadError>(Arc::new(Hello) as Arc<dyn Greeter>),
        );
        assert_eq!(cap.get().map(|g| g.greet()), Some("hello".to_string()));
        assert_eq!(cap.clone().status(), "available");
    }

    #[test]
    fn test_read_json_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = read_json::<serde_json::Value>(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));

        let err = read_json::<serde_json::Value>(Path::new("/definitely/missing.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
