// File: ./src/runner.rs
//! Orchestrates one check pass: load, fetch, reconcile, render.
//!
//! Each phase failure is contextualized with the phase name so the
//! binary can print a single diagnostic line that tells automation which
//! stage broke, as opposed to the content being at fault.

use crate::client::CatalogClient;
use crate::config::Config;
use crate::loader;
use crate::reconcile;
use crate::report::{self, BlockingPolicy, OutputFormat};
use anyhow::{Context, Result};
use std::time::Duration;

#[derive(Debug)]
pub struct CheckOutcome {
    pub report: String,
    pub blocking: bool,
}

pub async fn run_check(config: &Config, token: &str, format: OutputFormat) -> Result<CheckOutcome> {
    let client = CatalogClient::new(
        &config.api_url,
        token,
        Duration::from_secs(config.request_timeout_secs),
    )
    .context("initializing the catalog client")?;

    let articles =
        loader::load_articles(&config.articles_dir).context("loading local articles")?;
    let catalog = client
        .fetch_catalog()
        .await
        .context("fetching the remote catalog")?;

    let reconciliation =
        reconcile::reconcile(articles, catalog).context("reconciling against the catalog")?;

    let policy = BlockingPolicy::from_config(config);
    let blocking = report::has_blocking_issues(&reconciliation, policy);
    let rendered =
        report::render(&reconciliation, policy, format).context("rendering the report")?;

    Ok(CheckOutcome {
        report: rendered,
        blocking,
    })
}
