// File: ./src/reconcile.rs
// Matches local articles against the fetched remote catalog and computes
// one disposition per local record.
//
// Classifications are data, not errors; the only failure the engine
// itself can raise is a catalog integrity violation (duplicate remote
// id), which means the fetcher or the remote service broke the catalog's
// uniqueness invariant and nothing downstream can be trusted.

use crate::model::{LocalArticle, RemoteArticle};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use strum::EnumIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum DispositionKind {
    /// Local and remote agree on the required fields.
    Ok,
    /// No remote id yet: an unpublished draft.
    New,
    /// The local remote id has no matching catalog entry.
    Orphaned,
    /// The local record fails structural validation.
    Invalid,
    /// Matched pair whose title or tag set differ.
    Drifted,
}

impl fmt::Display for DispositionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispositionKind::Ok => write!(f, "OK"),
            DispositionKind::New => write!(f, "NEW"),
            DispositionKind::Orphaned => write!(f, "ORPHANED"),
            DispositionKind::Invalid => write!(f, "INVALID"),
            DispositionKind::Drifted => write!(f, "DRIFTED"),
        }
    }
}

/// The reconciliation result for one local article. Owns its records and
/// no mutable state after creation.
#[derive(Debug, Clone)]
pub struct Disposition {
    pub kind: DispositionKind,
    pub local: LocalArticle,
    pub remote: Option<RemoteArticle>,
    /// Human-readable specifics: validation problems, the missing id, or
    /// the fields that drifted.
    pub details: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
#[error(
    "duplicate remote article id \"{id}\" in catalog; refusing to reconcile against an inconsistent catalog"
)]
pub struct CatalogIntegrityError {
    pub id: String,
}

/// The full outcome of one reconciliation pass.
///
/// `dispositions` preserves loader order so reports are deterministic and
/// diff-friendly. `untracked` lists remote entries no local file claims
/// (informational only), ordered by id.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub dispositions: Vec<Disposition>,
    pub untracked: Vec<RemoteArticle>,
}

impl Reconciliation {
    pub fn count(&self, kind: DispositionKind) -> usize {
        self.dispositions.iter().filter(|d| d.kind == kind).count()
    }
}

pub fn reconcile(
    local_articles: Vec<LocalArticle>,
    catalog: Vec<RemoteArticle>,
) -> Result<Reconciliation, CatalogIntegrityError> {
    let mut index: HashMap<String, RemoteArticle> = HashMap::with_capacity(catalog.len());
    for article in catalog {
        let id = article.id.clone();
        if index.insert(id.clone(), article).is_some() {
            return Err(CatalogIntegrityError { id });
        }
    }

    let mut claimed: HashSet<String> = HashSet::new();
    let mut dispositions = Vec::with_capacity(local_articles.len());

    for local in local_articles {
        let problems = local.validation_errors();

        let disposition = if !problems.is_empty() {
            Disposition {
                kind: DispositionKind::Invalid,
                remote: None,
                details: problems,
                local,
            }
        } else if let Some(id) = local.remote_id.clone() {
            match index.get(&id) {
                None => Disposition {
                    kind: DispositionKind::Orphaned,
                    remote: None,
                    details: vec![format!("remote id \"{}\" not found in catalog", id)],
                    local,
                },
                Some(remote) => {
                    claimed.insert(id);
                    let diffs = field_diffs(&local, remote);
                    let kind = if diffs.is_empty() {
                        DispositionKind::Ok
                    } else {
                        DispositionKind::Drifted
                    };
                    Disposition {
                        kind,
                        remote: Some(remote.clone()),
                        details: diffs,
                        local,
                    }
                }
            }
        } else {
            Disposition {
                kind: DispositionKind::New,
                remote: None,
                details: vec!["no remote id (unpublished draft)".to_string()],
                local,
            }
        };

        dispositions.push(disposition);
    }

    let mut untracked: Vec<RemoteArticle> = index
        .into_values()
        .filter(|r| !claimed.contains(&r.id))
        .collect();
    untracked.sort_by(|a, b| a.id.cmp(&b.id));

    Ok(Reconciliation {
        dispositions,
        untracked,
    })
}

/// Compare the fields a publish would care about. Title is exact; tags
/// are compared as sets, order-insensitive.
fn field_diffs(local: &LocalArticle, remote: &RemoteArticle) -> Vec<String> {
    let mut diffs = Vec::new();

    if local.title != remote.title {
        diffs.push(format!(
            "title differs: local \"{}\", remote \"{}\"",
            local.title, remote.title
        ));
    }

    let local_tags: BTreeSet<&str> = local.tags.iter().map(String::as_str).collect();
    let remote_tags = remote.tag_names();
    if local_tags != remote_tags {
        diffs.push(format!(
            "tags differ: local {}, remote {}",
            format_tag_set(&local_tags),
            format_tag_set(&remote_tags)
        ));
    }

    diffs
}

fn format_tag_set(tags: &BTreeSet<&str>) -> String {
    let joined = tags.iter().copied().collect::<Vec<_>>().join(", ");
    format!("[{}]", joined)
}
