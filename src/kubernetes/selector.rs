// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Label selector extraction and formatting

use crate::error::{Result, VerifierError};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use serde_json::Value;
use std::collections::BTreeMap;

/// Read `spec.selector` from a resource's JSON and render it for `--selector`.
///
/// Workloads carry a `LabelSelector`; services carry a plain label map.
pub fn selector_from_resource(raw: &str) -> Result<String> {
    let resource: Value =
        serde_json::from_str(raw).map_err(|e| VerifierError::parse("resource", e, raw))?;

    let name = resource
        .pointer("/metadata/name")
        .and_then(Value::as_str)
        .unwrap_or("<unnamed>");

    let Some(selector) = resource.pointer("/spec/selector") else {
        return Err(VerifierError::missing_field("spec.selector", name));
    };

    let is_label_selector = selector.get("matchLabels").is_some()
        || selector.get("matchExpressions").is_some();

    let selector = if is_label_selector {
        serde_json::from_value::<LabelSelector>(selector.clone())
            .map_err(|e| VerifierError::parse("spec.selector", e, raw))?
    } else {
        let labels = serde_json::from_value::<BTreeMap<String, String>>(selector.clone())
            .map_err(|e| VerifierError::parse("spec.selector", e, raw))?;
        LabelSelector {
            match_labels: Some(labels),
            match_expressions: None,
        }
    };

    let formatted = format_label_selector(&selector)?;
    if formatted.is_empty() {
        return Err(VerifierError::missing_field("spec.selector", name));
    }
    Ok(formatted)
}

/// Render a label selector in kubectl's `--selector` syntax
pub fn format_label_selector(selector: &LabelSelector) -> Result<String> {
    let mut parts: Vec<String> = selector
        .match_labels
        .iter()
        .flatten()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect();

    for requirement in selector.match_expressions.iter().flatten() {
        let values = requirement.values.as_deref().unwrap_or_default().join(",");
        let part = match requirement.operator.as_str() {
            "In" => format!("{} in ({})", requirement.key, values),
            "NotIn" => format!("{} notin ({})", requirement.key, values),
            "Exists" => requirement.key.clone(),
            "DoesNotExist" => format!("!{}", requirement.key),
            other => {
                return Err(VerifierError::parse(
                    "label selector",
                    format!("unknown operator '{}'", other),
                    &requirement.key,
                ))
            }
        };
        parts.push(part);
    }

    Ok(parts.join(","))
}
