// File: ./src/report.rs
// Turns a reconciliation outcome into a report and a blocking signal.
//
// The renderer is pure: it produces a string and a boolean, writing them
// anywhere is the driver's responsibility. Only non-OK dispositions get a
// line of their own; untracked remote entries are informational.

use crate::config::Config;
use crate::reconcile::{DispositionKind, Reconciliation};
use anyhow::Result;
use serde_json::json;
use std::fmt::Write as _;
use std::str::FromStr;
use strum::IntoEnumIterator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

/// Which disposition kinds fail the run. INVALID and ORPHANED always
/// block; DRIFTED and NEW are configurable.
#[derive(Debug, Clone, Copy)]
pub struct BlockingPolicy {
    pub drifted: bool,
    pub new: bool,
}

impl BlockingPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            drifted: config.block_drifted,
            new: config.block_new,
        }
    }

    pub fn blocks(&self, kind: DispositionKind) -> bool {
        match kind {
            DispositionKind::Invalid | DispositionKind::Orphaned => true,
            DispositionKind::Drifted => self.drifted,
            DispositionKind::New => self.new,
            DispositionKind::Ok => false,
        }
    }
}

pub fn has_blocking_issues(reconciliation: &Reconciliation, policy: BlockingPolicy) -> bool {
    reconciliation
        .dispositions
        .iter()
        .any(|d| policy.blocks(d.kind))
}

pub fn render(
    reconciliation: &Reconciliation,
    policy: BlockingPolicy,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(reconciliation)),
        OutputFormat::Json => {
            let doc = json_document(reconciliation, policy);
            Ok(format!("{}\n", serde_json::to_string_pretty(&doc)?))
        }
    }
}

fn render_text(reconciliation: &Reconciliation) -> String {
    let mut out = String::new();

    for disposition in &reconciliation.dispositions {
        if disposition.kind == DispositionKind::Ok {
            continue;
        }
        let _ = writeln!(
            out,
            "{:<9} {}: {}",
            disposition.kind.to_string(),
            disposition.local.path.display(),
            disposition.details.join("; ")
        );
    }

    for remote in &reconciliation.untracked {
        let _ = writeln!(
            out,
            "UNTRACKED remote \"{}\" (\"{}\") has no local file",
            remote.id, remote.title
        );
    }

    let _ = writeln!(out, "{}", summary_line(reconciliation));
    out
}

fn summary_line(reconciliation: &Reconciliation) -> String {
    let counts = DispositionKind::iter()
        .map(|kind| {
            format!(
                "{} {}",
                reconciliation.count(kind),
                kind.to_string().to_lowercase()
            )
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "checked {} local articles: {}; {} untracked remote",
        reconciliation.dispositions.len(),
        counts,
        reconciliation.untracked.len()
    )
}

fn json_document(reconciliation: &Reconciliation, policy: BlockingPolicy) -> serde_json::Value {
    let articles: Vec<serde_json::Value> = reconciliation
        .dispositions
        .iter()
        .map(|d| {
            json!({
                "path": d.local.path.to_string_lossy(),
                "kind": d.kind,
                "remote_id": d.local.remote_id,
                "details": d.details,
            })
        })
        .collect();

    let untracked: Vec<serde_json::Value> = reconciliation
        .untracked
        .iter()
        .map(|r| {
            json!({
                "id": r.id,
                "title": r.title,
                "updated_at": r.updated_at,
            })
        })
        .collect();

    let mut summary = serde_json::Map::new();
    for kind in DispositionKind::iter() {
        summary.insert(
            kind.to_string().to_lowercase(),
            reconciliation.count(kind).into(),
        );
    }

    json!({
        "articles": articles,
        "untracked": untracked,
        "summary": summary,
        "blocking": has_blocking_issues(reconciliation, policy),
    })
}
