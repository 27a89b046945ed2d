//! `icons` manifest fragment for the generated files
//!
//! The badge set is shipped inside a browser extension, whose manifest lists
//! every icon under an `icons` key mapping the edge length to a path relative
//! to the extension root. This module builds that fragment so it can be
//! pasted (or merged) into `manifest.json`.

use anyhow::{Context, Result};
use serde::Serialize;
use std::{collections::BTreeMap, path::Path};

/// File name of the fragment written next to the icons.
pub const MANIFEST_FILE: &str = "icons.json";

/// Root of the manifest fragment
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct IconManifest {
    /// Edge length to path. Integer keys keep numeric order and are written
    /// as JSON strings, the way manifests spell them.
    pub icons: BTreeMap<u32, String>,

    /// Directory prefix prepended to each file name
    #[serde(skip)]
    prefix: String,
}

impl IconManifest {
    /// Create an empty manifest whose paths live under `prefix`
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            icons: BTreeMap::new(),
            prefix: prefix.into(),
        }
    }

    /// Register a generated icon
    pub fn add_icon(&mut self, size: u32, file_name: &str) {
        let path = if self.prefix.is_empty() {
            file_name.to_string()
        } else {
            format!("{}/{}", self.prefix.trim_end_matches('/'), file_name)
        };
        self.icons.insert(size, path);
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize icon manifest")
    }
}

/// Write the manifest fragment into `dir`
pub fn write_manifest(dir: &Path, manifest: &IconManifest) -> Result<()> {
    let path = dir.join(MANIFEST_FILE);
    let json = manifest.to_json()?;

    std::fs::write(&path, json)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::debug!("wrote manifest with {} entries", manifest.icons.len());
    Ok(())
}
