// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use chart_verifier::config::Config;
use chart_verifier::feature::Feature;
use chart_verifier::runner::Runner;
use chart_verifier::shell::ShellExecutor;
use chart_verifier::suite::Suite;

/// Verify Elastic Helm charts on an ephemeral kind cluster
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Feature files with the scenarios to run
    #[arg(required = true)]
    features: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    // Load configuration
    let config = Config::from_env();
    info!(
        "Configuration loaded: helm_version={}, chart_version={}, kubernetes_version={}",
        config.helm_version, config.chart_version, config.kubernetes_version
    );

    let features = args
        .features
        .iter()
        .map(|path| {
            Feature::from_file(path)
                .with_context(|| format!("Failed to load feature file {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let (suite, ctx) = Suite::from_config(&config, Arc::new(ShellExecutor))
        .context("Failed to set up the test suite")?;
    let mut runner = Runner::new(suite, ctx);

    let mut report = runner.run(&features).await?;
    for scenario in &report.scenarios {
        println!("{}", scenario);
    }
    println!(
        "{} scenarios passed, {} failed",
        report.passed(),
        report.failed()
    );

    if let Some(e) = report.aborted.take() {
        return Err(e).context("The run was aborted");
    }
    if let Some(e) = report.teardown.take() {
        return Err(e).context("The cluster could not be torn down");
    }
    if report.failed() > 0 {
        bail!(
            "{} of {} scenarios failed",
            report.failed(),
            report.scenarios.len()
        );
    }

    info!("All {} scenarios passed", report.passed());
    Ok(())
}
