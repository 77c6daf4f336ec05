// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stackflow contributors

//! Merging of stringified JSON task outputs
//!
//! Stack tasks pass their outputs downstream as JSON-object strings. Before
//! they are handed to the automation entrypoint they are folded into a single
//! object, later inputs overriding earlier ones per key.

use serde_json::{Map, Value};
use tracing::warn;

use crate::errors::StackflowError;

/// Fold a sequence of JSON-object strings into a single JSON-object string.
///
/// Input order defines override order: for a key present in several inputs,
/// the value from the later input wins. A collision is logged rather than
/// rejected, since upstream tasks are allowed to emit the same key.
pub fn merge_input_strings(inputs: &[String]) -> Result<String, StackflowError> {
    let mut merged = Map::new();

    for input in inputs {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| StackflowError::Parse { message: e.to_string() })?;

        let Value::Object(fields) = value else {
            return Err(StackflowError::Parse {
                message: format!("expected a JSON object, got '{input}'"),
            });
        };

        for (key, value) in fields {
            if merged.insert(key.clone(), value).is_some() {
                warn!("merge input overrides earlier value for key '{key}'");
            }
        }
    }

    serde_json::to_string(&merged).map_err(Into::into)
}
