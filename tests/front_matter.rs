// Tests for article front matter parsing.
use pubcheck::model::parser::{ParseError, parse_document};

#[test]
fn parses_full_front_matter() {
    let doc = "+++\n\
               id = \"c686397e4a0f4f11683d\"\n\
               title = \"Deploying with confidence\"\n\
               tags = [\"rust\", \"ci\"]\n\
               +++\n\
               Some body text.\n";
    let (front, body_present) = parse_document(doc).unwrap();
    assert_eq!(front.id.as_deref(), Some("c686397e4a0f4f11683d"));
    assert_eq!(front.title.as_deref(), Some("Deploying with confidence"));
    assert_eq!(front.tags, vec!["rust".to_string(), "ci".to_string()]);
    assert!(body_present);
}

#[test]
fn id_is_optional_for_drafts() {
    let doc = "+++\ntitle = \"Draft\"\ntags = [\"notes\"]\n+++\nbody\n";
    let (front, _) = parse_document(doc).unwrap();
    assert!(front.id.is_none());
}

#[test]
fn missing_title_is_not_a_parse_error() {
    // Field-level validation belongs to the reconciliation engine; the
    // parser only rejects files it cannot decode at all.
    let doc = "+++\ntags = [\"rust\"]\n+++\nbody\n";
    let (front, _) = parse_document(doc).unwrap();
    assert!(front.title.is_none());
    assert_eq!(front.tags, vec!["rust".to_string()]);
}

#[test]
fn empty_body_is_reported_absent() {
    let doc = "+++\ntitle = \"T\"\ntags = [\"a\"]\n+++\n\n   \n";
    let (_, body_present) = parse_document(doc).unwrap();
    assert!(!body_present);
}

#[test]
fn leading_blank_lines_before_front_matter_are_allowed() {
    let doc = "\n\n+++\ntitle = \"T\"\n+++\nbody\n";
    let (front, body_present) = parse_document(doc).unwrap();
    assert_eq!(front.title.as_deref(), Some("T"));
    assert!(body_present);
}

#[test]
fn document_without_front_matter_is_rejected() {
    let err = parse_document("just a plain markdown file\n").unwrap_err();
    assert!(matches!(err, ParseError::MissingFrontMatter));
}

#[test]
fn unterminated_front_matter_is_rejected() {
    let err = parse_document("+++\ntitle = \"T\"\n").unwrap_err();
    assert!(matches!(err, ParseError::Unterminated));
}

#[test]
fn invalid_toml_is_rejected_with_detail() {
    let err = parse_document("+++\ntitle = not quoted\n+++\n").unwrap_err();
    match err {
        ParseError::InvalidToml(msg) => assert!(!msg.is_empty()),
        other => panic!("expected InvalidToml, got {:?}", other),
    }
}

#[test]
fn empty_id_is_rejected() {
    let err = parse_document("+++\nid = \"  \"\ntitle = \"T\"\n+++\n").unwrap_err();
    assert!(matches!(err, ParseError::EmptyId));
}
