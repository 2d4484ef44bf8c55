// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Runs feature scenarios against the suite with its lifecycle hooks

use crate::error::{Result, VerifierError};
use crate::feature::{Feature, Scenario};
use crate::kind::ClusterState;
use crate::suite::{Step, Suite, TestContext};
use std::fmt;
use tracing::{error, info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    /// The step that failed and why; later steps were skipped
    Failed { step: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioReport {
    pub feature: String,
    pub scenario: String,
    pub outcome: Outcome,
}

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Passed => write!(f, "PASSED {} / {}", self.feature, self.scenario),
            Outcome::Failed { step, reason } => write!(
                f,
                "FAILED {} / {}\n  step: {}\n  reason: {}",
                self.feature, self.scenario, step, reason
            ),
        }
    }
}

/// Scenario results, plus the fatal errors that cut the run short or broke
/// teardown. Results of finished scenarios are kept either way.
#[derive(Debug, Default)]
pub struct RunReport {
    pub scenarios: Vec<ScenarioReport>,
    /// Fatal error that stopped the remaining scenarios
    pub aborted: Option<VerifierError>,
    /// Cluster destroy failure after the scenarios ran
    pub teardown: Option<VerifierError>,
}

impl RunReport {
    pub fn passed(&self) -> usize {
        self.scenarios
            .iter()
            .filter(|s| s.outcome == Outcome::Passed)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.scenarios.len() - self.passed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0 && self.aborted.is_none() && self.teardown.is_none()
    }
}

pub struct Runner {
    suite: Suite,
    ctx: TestContext,
}

impl Runner {
    pub fn new(suite: Suite, ctx: TestContext) -> Self {
        Self { suite, ctx }
    }

    /// Bring the suite up, run every scenario and tear the suite down.
    ///
    /// Only a failed suite setup is returned as an error. Assertion failures,
    /// a fatal error during the scenarios and a failed cluster destroy are all
    /// recorded in the report next to the scenarios that already finished.
    pub async fn run(&mut self, features: &[Feature]) -> Result<RunReport> {
        if let Err(e) = self.suite.before_suite(&self.ctx).await {
            error!("Could not prepare the suite: {}", e);
            if self.suite.cluster().state() != ClusterState::Absent {
                if let Err(destroy) = self.suite.after_suite().await {
                    error!("{}", destroy);
                }
            }
            return Err(e);
        }

        let mut report = RunReport::default();

        'features: for feature in features {
            for scenario in &feature.scenarios {
                let (scenario_report, fatal) = self.run_scenario(feature, scenario).await;
                report.scenarios.push(scenario_report);
                if let Some(e) = fatal {
                    error!("Aborting the run: {}", e);
                    report.aborted = Some(e);
                    break 'features;
                }
            }
        }

        info!(
            "{} scenarios passed, {} failed",
            report.passed(),
            report.failed()
        );

        if let Err(e) = self.suite.after_suite().await {
            error!("{}", e);
            report.teardown = Some(e);
        }

        Ok(report)
    }

    /// Run the steps of one scenario until the first failure.
    ///
    /// The fatal error, if the failing step raised one, is handed back next to
    /// the report; the chart is deleted either way.
    #[instrument(skip(self, feature, scenario), fields(scenario = %scenario.name))]
    async fn run_scenario(
        &mut self,
        feature: &Feature,
        scenario: &Scenario,
    ) -> (ScenarioReport, Option<VerifierError>) {
        let mut outcome = Outcome::Passed;
        let mut fatal = None;

        for sentence in &scenario.steps {
            let result = match Step::parse(sentence) {
                Ok(step) => step.run(&self.suite, &mut self.ctx).await,
                Err(e) => Err(e),
            };

            if let Err(e) = result {
                warn!("Step '{}' failed: {}", sentence, e);
                outcome = Outcome::Failed {
                    step: sentence.clone(),
                    reason: e.to_string(),
                };
                if e.is_fatal() {
                    fatal = Some(e);
                }
                break;
            }
        }

        self.suite.after_scenario(&mut self.ctx).await;

        let report = ScenarioReport {
            feature: feature.name.clone(),
            scenario: scenario.name.clone(),
            outcome,
        };
        info!("{}", report);

        (report, fatal)
    }
}
