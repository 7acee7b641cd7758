// File: ./src/model/parser.rs
// Parses an article file into front matter and a body-present flag.
//
// Articles are Markdown files with a TOML front matter block delimited by
// `+++` lines:
//
//   +++
//   id = "c686397e4a0f4f11683d"
//   title = "Some title"
//   tags = ["rust", "ci"]
//   +++
//   body text...
//
// `id` is absent for drafts that have never been published. The parser
// only reports failures it can pin to the file itself; field-level
// validation (missing title, empty tags) is the reconciliation engine's
// business so that it can classify rather than abort.

use serde::Deserialize;

pub const FRONT_MATTER_DELIMITER: &str = "+++";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FrontMatter {
    pub id: Option<String>,
    pub title: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("no front matter block (expected a leading '{FRONT_MATTER_DELIMITER}' line)")]
    MissingFrontMatter,

    #[error("unterminated front matter block (missing closing '{FRONT_MATTER_DELIMITER}')")]
    Unterminated,

    #[error("invalid front matter: {0}")]
    InvalidToml(String),

    #[error("id is present but empty")]
    EmptyId,
}

/// Split a document into its front matter and whether a non-empty body
/// follows it.
pub fn parse_document(content: &str) -> Result<(FrontMatter, bool), ParseError> {
    let mut lines = content.lines();

    // The opening delimiter must be the first non-blank line.
    let opened = loop {
        match lines.next() {
            Some(line) if line.trim().is_empty() => continue,
            Some(line) => break line.trim() == FRONT_MATTER_DELIMITER,
            None => break false,
        }
    };
    if !opened {
        return Err(ParseError::MissingFrontMatter);
    }

    let mut block = String::new();
    let mut terminated = false;
    let mut body = String::new();
    for line in lines {
        if !terminated && line.trim() == FRONT_MATTER_DELIMITER {
            terminated = true;
            continue;
        }
        if terminated {
            body.push_str(line);
            body.push('\n');
        } else {
            block.push_str(line);
            block.push('\n');
        }
    }
    if !terminated {
        return Err(ParseError::Unterminated);
    }

    let front: FrontMatter =
        toml::from_str(&block).map_err(|e| ParseError::InvalidToml(e.to_string()))?;

    if let Some(id) = &front.id
        && id.trim().is_empty()
    {
        return Err(ParseError::EmptyId);
    }

    let body_present = !body.trim().is_empty();
    Ok((front, body_present))
}
