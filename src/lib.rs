// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod config;
pub mod constants;
pub mod error;
pub mod feature;
pub mod helm;
pub mod kind;
pub mod kubernetes;
pub mod runner;
pub mod shell;
pub mod suite;

#[cfg(test)]
pub mod test_utils;
