// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed wrappers over kubectl output

use crate::error::{Result, VerifierError};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// The `items` of a `kubectl get ... -o json` list
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceList {
    items: Vec<Value>,
}

impl ResourceList {
    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| VerifierError::parse("resource list", e, raw))
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `metadata.name` of every item, skipping items without one
    pub fn names(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|item| item.pointer("/metadata/name").and_then(Value::as_str))
            .collect()
    }
}

/// Top-level fields of the first object in `kubectl describe` output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Description {
    fields: BTreeMap<String, String>,
}

impl Description {
    pub fn parse(raw: &str) -> Self {
        let mut fields = BTreeMap::new();

        for line in raw.lines() {
            // Indented lines continue the previous field or belong to a nested section
            if line.starts_with(char::is_whitespace) {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            // A second Name: starts the next described object
            if key == "Name" && fields.contains_key("Name") {
                break;
            }
            fields
                .entry(key.to_string())
                .or_insert_with(|| value.trim().to_string());
        }

        Self { fields }
    }

    pub fn field(&self, name: &str) -> Result<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| VerifierError::missing_field(name, "describe output"))
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }
}
