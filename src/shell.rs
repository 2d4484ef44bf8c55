// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Subprocess execution for the external cluster, kubectl and helm tools.

use crate::error::{Result, VerifierError};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Runs an external program and returns its combined output.
///
/// A non-zero exit status is always an error; the caller decides whether
/// that is fatal.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, working_dir: &str, program: &str, args: &[String]) -> Result<String>;
}

/// Render a program and its arguments the way they would be typed
pub fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Executor backed by real processes
#[derive(Debug, Clone, Default)]
pub struct ShellExecutor;

#[async_trait]
impl Executor for ShellExecutor {
    #[instrument(skip(self, args), fields(command = %command_line(program, args)))]
    async fn execute(&self, working_dir: &str, program: &str, args: &[String]) -> Result<String> {
        let output = Command::new(program)
            .args(args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| VerifierError::SpawnError {
                program: program.to_string(),
                source,
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            return Err(VerifierError::CommandFailed {
                command: command_line(program, args),
                status: output.status.to_string(),
                output: combined,
            });
        }

        debug!("Command succeeded");
        Ok(combined)
    }
}

/// Build an owned argument list from string slices
pub fn args<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}
