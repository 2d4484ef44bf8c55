// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Plain-text feature files: a `Feature:` with `Scenario:` blocks of
//! Given/When/Then steps.

use crate::error::{Result, VerifierError};
use std::path::Path;
use tracing::debug;

const STEP_KEYWORDS: &[&str] = &["Given ", "When ", "Then ", "And ", "But ", "* "];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    /// Step sentences without their keyword, background steps first
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    pub name: String,
    pub scenarios: Vec<Scenario>,
}

enum Section {
    None,
    Background,
    Scenario,
}

fn strip_step_keyword(line: &str) -> Option<&str> {
    STEP_KEYWORDS
        .iter()
        .find_map(|keyword| line.strip_prefix(keyword))
        .map(str::trim)
}

impl Feature {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| VerifierError::IoError {
            path: path.display().to_string(),
            source,
        })?;

        let feature = Self::parse(&content)?;
        debug!(
            "Loaded feature '{}' with {} scenarios from {}",
            feature.name,
            feature.scenarios.len(),
            path.display()
        );
        Ok(feature)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut name: Option<String> = None;
        let mut background: Vec<String> = Vec::new();
        let mut scenarios: Vec<Scenario> = Vec::new();
        let mut section = Section::None;

        for (number, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('@') {
                continue;
            }

            if let Some(rest) = line.strip_prefix("Feature:") {
                if name.is_some() {
                    return Err(VerifierError::FeatureError(format!(
                        "line {}: only one Feature is allowed per file",
                        number + 1
                    )));
                }
                name = Some(rest.trim().to_string());
            } else if line.starts_with("Scenario Outline:") || line.starts_with("Examples:") {
                return Err(VerifierError::FeatureError(format!(
                    "line {}: scenario outlines are not supported",
                    number + 1
                )));
            } else if line.starts_with("Background:") {
                if !scenarios.is_empty() {
                    return Err(VerifierError::FeatureError(format!(
                        "line {}: Background must come before the first Scenario",
                        number + 1
                    )));
                }
                section = Section::Background;
            } else if let Some(rest) = line.strip_prefix("Scenario:") {
                scenarios.push(Scenario {
                    name: rest.trim().to_string(),
                    steps: background.clone(),
                });
                section = Section::Scenario;
            } else if let Some(step) = strip_step_keyword(line) {
                match section {
                    Section::Background => background.push(step.to_string()),
                    Section::Scenario => {
                        if let Some(scenario) = scenarios.last_mut() {
                            scenario.steps.push(step.to_string());
                        }
                    }
                    Section::None => {
                        return Err(VerifierError::FeatureError(format!(
                            "line {}: step outside of a Scenario: {}",
                            number + 1,
                            line
                        )))
                    }
                }
            } else if matches!(section, Section::None) {
                // Free-form description below the Feature title
                continue;
            } else {
                return Err(VerifierError::FeatureError(format!(
                    "line {}: expected a step, found: {}",
                    number + 1,
                    line
                )));
            }
        }

        let name = name.ok_or_else(|| VerifierError::FeatureError("missing Feature:".to_string()))?;
        Ok(Self { name, scenarios })
    }
}
