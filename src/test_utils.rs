// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for scripting the output of external commands.

use crate::error::{Result, VerifierError};
use crate::shell::{command_line, Executor};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

type Response = std::result::Result<String, String>;

/// A mock executor that returns predefined output based on the command line.
///
/// Responses are matched on the full command line first, then on the longest
/// registered prefix; later registrations win. Every executed command is
/// recorded in order.
#[derive(Clone, Default)]
pub struct MockExecutor {
    responses: Arc<Mutex<Vec<(String, VecDeque<Response>)>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Succeed with `output` for commands starting with `command`
    pub fn on(self, command: &str, output: &str) -> Self {
        self.script(command, vec![Ok(output.to_string())])
    }

    /// Exit non-zero with `output` for commands starting with `command`
    pub fn on_fail(self, command: &str, output: &str) -> Self {
        self.script(command, vec![Err(output.to_string())])
    }

    /// Succeed with each of `outputs` in turn, repeating the last one
    pub fn on_each(self, command: &str, outputs: &[&str]) -> Self {
        self.script(command, outputs.iter().map(|o| Ok(o.to_string())).collect())
    }

    /// Answer with each of `responses` in turn, repeating the last one;
    /// `Err` entries exit non-zero with their output
    pub fn on_sequence(
        self,
        command: &str,
        responses: &[std::result::Result<&str, &str>],
    ) -> Self {
        let responses = responses
            .iter()
            .map(|r| match r {
                Ok(output) => Ok(output.to_string()),
                Err(output) => Err(output.to_string()),
            })
            .collect();
        self.script(command, responses)
    }

    fn script(self, command: &str, responses: Vec<Response>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push((command.to_string(), responses.into()));
        self
    }

    /// All command lines executed so far
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Position of the first executed command starting with `prefix`
    pub fn position(&self, prefix: &str) -> Option<usize> {
        self.calls().iter().position(|c| c.starts_with(prefix))
    }

    fn find_response(&self, line: &str) -> Option<Response> {
        let mut responses = self.responses.lock().unwrap();

        let queue = match responses.iter().rposition(|(c, _)| c == line) {
            Some(exact) => &mut responses[exact].1,
            None => {
                let (_, queue) = responses
                    .iter_mut()
                    .filter(|(c, _)| line.starts_with(c.as_str()))
                    .max_by_key(|(c, _)| c.len())?;
                queue
            }
        };

        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl Executor for MockExecutor {
    async fn execute(&self, _working_dir: &str, program: &str, args: &[String]) -> Result<String> {
        let line = command_line(program, args);
        self.calls.lock().unwrap().push(line.clone());

        match self.find_response(&line) {
            Some(Ok(output)) => Ok(output),
            Some(Err(output)) => Err(VerifierError::CommandFailed {
                command: line,
                status: "exit status: 1".to_string(),
                output,
            }),
            None => Err(VerifierError::CommandFailed {
                command: line.clone(),
                status: "exit status: 127".to_string(),
                output: format!("no scripted response for `{}`", line),
            }),
        }
    }
}

/// Create a kubectl list JSON response with the given object names
pub fn list_json(names: &[&str]) -> String {
    let items: Vec<_> = names
        .iter()
        .map(|name| serde_json::json!({ "metadata": { "name": name } }))
        .collect();

    serde_json::json!({
        "apiVersion": "v1",
        "kind": "List",
        "items": items,
    })
    .to_string()
}

/// Create a deployment JSON response carrying a match-labels selector
pub fn deployment_json(name: &str, labels: &[(&str, &str)]) -> String {
    let match_labels: serde_json::Map<_, _> = labels
        .iter()
        .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
        .collect();

    serde_json::json!({
        "apiVersion": "apps/v1",
        "kind": "Deployment",
        "metadata": { "name": name },
        "spec": { "selector": { "matchLabels": match_labels } }
    })
    .to_string()
}
