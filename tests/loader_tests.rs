// Tests for local article discovery and parsing.
use pubcheck::context::TestContext;
use pubcheck::loader::load_articles;
use std::fs;
use std::path::{Path, PathBuf};

fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn article(title: &str, id: Option<&str>) -> String {
    let id_line = match id {
        Some(id) => format!("id = \"{}\"\n", id),
        None => String::new(),
    };
    format!(
        "+++\n{}title = \"{}\"\ntags = [\"rust\"]\n+++\nbody\n",
        id_line, title
    )
}

#[test]
fn loads_articles_in_lexicographic_path_order() {
    let ctx = TestContext::new();
    let root = ctx.root.join("articles");
    write_file(&root, "b.md", &article("B", None));
    write_file(&root, "a.md", &article("A", Some("id-a")));
    write_file(&root, "nested/c.md", &article("C", None));

    let articles = load_articles(&root).unwrap();
    let paths: Vec<PathBuf> = articles.iter().map(|a| a.path.clone()).collect();
    assert_eq!(
        paths,
        vec![
            PathBuf::from("a.md"),
            PathBuf::from("b.md"),
            PathBuf::from("nested/c.md"),
        ]
    );
    assert_eq!(articles[0].remote_id.as_deref(), Some("id-a"));
    assert_eq!(articles[0].title, "A");
    assert!(articles[0].body_present);
}

#[test]
fn ignores_files_without_the_article_extension() {
    let ctx = TestContext::new();
    let root = ctx.root.join("articles");
    write_file(&root, "a.md", &article("A", None));
    write_file(&root, "notes.txt", "not an article");
    write_file(&root, "image.png", "binary-ish");

    let articles = load_articles(&root).unwrap();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].path, PathBuf::from("a.md"));
}

#[test]
fn malformed_file_is_demoted_not_fatal() {
    let ctx = TestContext::new();
    let root = ctx.root.join("articles");
    write_file(&root, "bad.md", "no front matter here\n");
    write_file(&root, "good.md", &article("Good", None));

    let articles = load_articles(&root).unwrap();
    assert_eq!(articles.len(), 2);

    let bad = &articles[0];
    assert_eq!(bad.path, PathBuf::from("bad.md"));
    assert!(bad.parse_error.is_some());
    assert!(!bad.validation_errors().is_empty());

    let good = &articles[1];
    assert!(good.parse_error.is_none());
    assert!(good.validation_errors().is_empty());
}

#[test]
fn missing_root_directory_is_fatal() {
    let ctx = TestContext::new();
    let missing = ctx.root.join("does-not-exist");
    let err = load_articles(&missing).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to scan articles directory"));
}

#[test]
fn structural_problems_surface_as_validation_errors() {
    let ctx = TestContext::new();
    let root = ctx.root.join("articles");
    write_file(&root, "untitled.md", "+++\ntags = [\"rust\"]\n+++\nbody\n");
    write_file(&root, "untagged.md", "+++\ntitle = \"T\"\n+++\nbody\n");

    let articles = load_articles(&root).unwrap();
    let untagged = &articles[0];
    let untitled = &articles[1];

    assert_eq!(
        untitled.validation_errors(),
        vec!["title is missing or empty".to_string()]
    );
    assert_eq!(
        untagged.validation_errors(),
        vec!["tag list is empty".to_string()]
    );
}
