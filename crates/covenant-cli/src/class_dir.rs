//! # Directory-Backed Class Byte Source
//!
//! Resolves class names against a directory of canonical byte files: one
//! file per class, named by its fully-qualified class name (dots and all,
//! no extension). This is the CLI's stand-in for the platform's byte
//! extractor — release pipelines dump canonical class bytes into such a
//! directory before registration.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use covenant_core::{
    CanonicalBytes, CanonicalizationError, ClassBytesSource, ClassName,
};

/// A [`ClassBytesSource`] over a directory of class byte files.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Create a source rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Enumerate the classes present in the directory, in lexicographic
    /// order. Subdirectories are ignored; a file whose name is not a valid
    /// qualified class name is an error rather than silently skipped.
    pub fn class_names(&self) -> Result<Vec<ClassName>> {
        let entries = std::fs::read_dir(&self.root)
            .with_context(|| format!("failed to read class directory {}", self.root.display()))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry
                .with_context(|| format!("failed to read class directory {}", self.root.display()))?;
            if !entry.path().is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                bail!("class file name is not valid UTF-8: {:?}", file_name);
            };
            let class = ClassName::new(name)
                .with_context(|| format!("class file name is not a qualified class name: {name}"))?;
            names.push(class);
        }
        names.sort();
        Ok(names)
    }

    /// Load the canonical bytes of every class in the directory — the
    /// "live class set" used for verification.
    pub fn load_all(&self) -> Result<BTreeMap<ClassName, CanonicalBytes>> {
        let mut live = BTreeMap::new();
        for class in self.class_names()? {
            let bytes = self.canonical_bytes(&class)?;
            live.insert(class, bytes);
        }
        Ok(live)
    }
}

impl ClassBytesSource for DirectorySource {
    fn canonical_bytes(&self, class: &ClassName) -> Result<CanonicalBytes, CanonicalizationError> {
        let path = self.root.join(class.as_str());
        let bytes = std::fs::read(&path).map_err(|e| CanonicalizationError::SourceUnavailable {
            class: class.as_str().to_string(),
            reason: format!("{}: {e}", path.display()),
        })?;
        CanonicalBytes::new(class, bytes)
    }
}
