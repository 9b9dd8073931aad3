//! Document loading from disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::dsl::config::{decode_config_with, Config};
use crate::dsl::error::DecodeError;
use crate::dsl::registry::PolicyRegistry;
use crate::hcl::{parse, ParseError};

/// Error type for document loading.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("{}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
}

impl LoadError {
    pub fn path(&self) -> &Path {
        match self {
            LoadError::Io { path, .. }
            | LoadError::Parse { path, .. }
            | LoadError::Decode { path, .. } => path,
        }
    }

    /// The decode failure, when the document parsed but did not decode.
    pub fn decode_error(&self) -> Option<&DecodeError> {
        match self {
            LoadError::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Read, parse and decode the document at `path` with the built-in registry.
pub fn load_document(path: &Path) -> Result<Config, LoadError> {
    load_document_with(path, PolicyRegistry::builtin())
}

pub fn load_document_with(path: &Path, registry: &PolicyRegistry) -> Result<Config, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_str_with(path, &content, registry)
}

/// Parse and decode `source`; `path` only labels errors.
pub fn load_str(path: impl AsRef<Path>, source: &str) -> Result<Config, LoadError> {
    load_str_with(path, source, PolicyRegistry::builtin())
}

fn load_str_with(
    path: impl AsRef<Path>,
    source: &str,
    registry: &PolicyRegistry,
) -> Result<Config, LoadError> {
    let path = path.as_ref();
    let root = parse(source).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), items = root.len(), "parsed document");

    decode_config_with(&root, registry).map_err(|source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
