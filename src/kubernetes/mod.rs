// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster queries through kubectl and parsing of its output.

pub mod kubectl;
pub mod output;
pub mod selector;

pub use kubectl::Kubectl;
pub use output::{Description, ResourceList};
