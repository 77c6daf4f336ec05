// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stackflow contributors

//! Project configuration
//!
//! The project identifier comes from the Pulumi project file in the working
//! directory.

use serde::Deserialize;
use std::path::Path;

use crate::errors::StackflowError;

/// Name of the Pulumi project file
pub const PROJECT_CONFIG_FILE: &str = "Pulumi.yaml";

/// Subset of the Pulumi project file that stackflow reads
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    /// Project identifier
    pub name: String,
}

impl ProjectConfig {
    /// Load `Pulumi.yaml` from the given directory
    pub fn load(dir: &Path) -> Result<Self, StackflowError> {
        Self::from_file(&dir.join(PROJECT_CONFIG_FILE))
    }

    /// Load from an explicit file path
    pub fn from_file(path: &Path) -> Result<Self, StackflowError> {
        let content = std::fs::read_to_string(path).map_err(|e| StackflowError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| StackflowError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Parse from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, StackflowError> {
        serde_yaml::from_str(yaml).map_err(Into::into)
    }
}
