// File: ./src/loader.rs
// Discovers and parses locally authored article files.
//
// The loader is strictly read-only. Per-file failures (unreadable file,
// malformed front matter) are demoted to records carrying the error so
// the reconciliation engine can classify them as INVALID; only a missing
// or unreadable root directory aborts the run.

use crate::model::LocalArticle;
use crate::model::parser::parse_document;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const ARTICLE_EXTENSION: &str = "md";

/// Produce one `LocalArticle` per eligible file under `root`, ordered
/// lexicographically by relative path so output is reproducible across
/// runs on an unchanged corpus.
pub fn load_articles(root: &Path) -> Result<Vec<LocalArticle>> {
    let mut paths = Vec::new();
    collect_article_paths(root, &mut paths)
        .with_context(|| format!("Failed to scan articles directory '{}'", root.display()))?;

    // Sort on the relative path, which is also what the records carry.
    let mut entries: Vec<(PathBuf, PathBuf)> = paths
        .into_iter()
        .map(|abs| {
            let rel = abs.strip_prefix(root).unwrap_or(&abs).to_path_buf();
            (rel, abs)
        })
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let articles = entries
        .into_iter()
        .map(|(rel, abs)| load_one(rel, &abs))
        .collect();
    Ok(articles)
}

fn collect_article_paths(dir: &Path, out: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_article_paths(&path, out)?;
        } else if let Some(ext) = path.extension()
            && ext == ARTICLE_EXTENSION
        {
            out.push(path);
        }
    }
    Ok(())
}

fn load_one(rel: PathBuf, abs: &Path) -> LocalArticle {
    let content = match fs::read_to_string(abs) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("unreadable article file {}: {}", abs.display(), e);
            return LocalArticle::failed(rel, format!("unreadable file: {}", e));
        }
    };

    match parse_document(&content) {
        Ok((front, body_present)) => LocalArticle {
            path: rel,
            remote_id: front.id,
            title: front.title.unwrap_or_default(),
            tags: front.tags,
            body_present,
            parse_error: None,
        },
        Err(e) => LocalArticle::failed(rel, e.to_string()),
    }
}
