//! Integration tests for the export command

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{notepub_cmd, sample_collection, write_note};

#[test]
fn test_export_tab_delimited_with_suppression() {
    let temp = TempDir::new().unwrap();
    notepub_cmd().arg("init").arg(temp.path()).assert().success();
    write_note(temp.path(), "one.txt", &[("Title", "One"), ("Tags", "a.b")], "first");
    write_note(temp.path(), "two.txt", &[("Title", "Two"), ("Tags", "a.b")], "second");

    notepub_cmd()
        .current_dir(temp.path())
        .args(["export", "tab", "out/notes.tab", "--suppress", "b"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 notes as Tab-Delimited"));

    let content = fs::read_to_string(temp.path().join("out/notes.tab")).unwrap();
    let rows: Vec<Vec<&str>> = content.lines().map(|l| l.split('\t').collect()).collect();
    assert_eq!(rows[0][..3], ["Title", "Tags", "Body"]);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1][1], "a");
    assert_eq!(rows[2][1], "a");

    let source = fs::read_to_string(temp.path().join("one.txt")).unwrap();
    assert!(source.contains("Tags: a.b"));
}

#[test]
fn test_export_xml_long_and_short_bodies() {
    let temp = TempDir::new().unwrap();
    notepub_cmd().arg("init").arg(temp.path()).assert().success();
    let long_body = "word ".repeat(20).trim_end().to_string();
    write_note(temp.path(), "long.txt", &[("Title", "Long"), ("Tags", "t")], &long_body);
    write_note(temp.path(), "short.txt", &[("Title", "Short"), ("Tags", "t")], "ten chars!");

    notepub_cmd()
        .current_dir(temp.path())
        .args(["export", "xml", "notes.xml"])
        .assert()
        .success();

    let xml = fs::read_to_string(temp.path().join("notes.xml")).unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<notes>\n"));
    assert!(xml.contains(&format!("    <body>\n{}\n    </body>\n", long_body)));
    assert!(xml.contains("    <body>ten chars!</body>\n"));
}

#[test]
fn test_export_opml_outline() {
    let temp = sample_collection();

    notepub_cmd()
        .current_dir(temp.path())
        .args(["export", "opml", "notes.opml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 5 notes as OPML"));

    let opml = fs::read_to_string(temp.path().join("notes.opml")).unwrap();
    assert!(opml.contains("<outline text=\"Favorites\">"));
    assert!(opml.contains("<outline text=\"Finance\">"));
    assert!(opml.contains("url=\"https://go.dev\""));
    assert_eq!(
        opml.matches("<outline").count() - opml.matches("/>").count(),
        opml.matches("</outline>").count()
    );
}

#[test]
fn test_export_bookmarks_with_selection() {
    let temp = sample_collection();

    notepub_cmd()
        .current_dir(temp.path())
        .args(["export", "bookmarks", "bookmarks.html", "--select", "favorites"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 3 notes"));

    let html = fs::read_to_string(temp.path().join("bookmarks.html")).unwrap();
    assert!(html.starts_with("<!DOCTYPE NETSCAPE-Bookmark-file-1>"));
    assert!(html.contains("    <DT><H3>Favorites</H3>\n"));
    assert!(html.contains("            <DT><A HREF=\"https://ziglang.org\""));
    assert!(!html.contains("Work"));
    assert_eq!(html.matches("<DL>").count(), html.matches("</DL>").count());
}

#[test]
fn test_export_outline_and_url_union() {
    let temp = sample_collection();

    notepub_cmd()
        .current_dir(temp.path())
        .args(["export", "outline", "outline.html"])
        .assert()
        .success();
    notepub_cmd()
        .current_dir(temp.path())
        .args(["export", "url-union", "urls.html"])
        .assert()
        .success();

    let outline = fs::read_to_string(temp.path().join("outline.html")).unwrap();
    assert!(outline.contains("<span class=\"tag\">Tech</span>"));
    assert!(outline.contains("<a href=\"https://www.rust-lang.org\">Rust</a>"));

    let urls = fs::read_to_string(temp.path().join("urls.html")).unwrap();
    assert_eq!(urls.matches("<dt>").count(), 5);
    assert!(urls.contains("<dd class=\"tags\">Tags: Work.Finance</dd>"));
    assert!(urls.contains("<p>Simple and fast.</p>"));
}

#[test]
fn test_export_notenik_folder() {
    let temp = sample_collection();
    let out = TempDir::new().unwrap();
    let dest = out.path().join("copy");

    notepub_cmd()
        .current_dir(temp.path())
        .args(["export", "notenik"])
        .arg(&dest)
        .args(["--select", "work"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 notes as Notenik"));

    assert!(dest.join("Budget.txt").exists());
    let report = fs::read_to_string(dest.join("Quarterly Report.txt")).unwrap();
    assert!(report.starts_with("Title: Quarterly Report\n\n"));
    assert!(report.ends_with("Body:\n\nNumbers.\n"));
}

#[test]
fn test_export_favorites_single_column() {
    let temp = sample_collection();
    notepub_cmd()
        .current_dir(temp.path())
        .args(["config", "favorites.columns", "1"])
        .assert()
        .success();
    notepub_cmd()
        .current_dir(temp.path())
        .args(["config", "favorites.max_rows", "10"])
        .assert()
        .success();

    notepub_cmd()
        .current_dir(temp.path())
        .args(["export", "favorites", "fav"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 3 notes as Favorites"));

    let files: Vec<_> = fs::read_dir(temp.path().join("fav")).unwrap().collect();
    assert_eq!(files.len(), 1);

    let html = fs::read_to_string(temp.path().join("fav/favorites.html")).unwrap();
    assert_eq!(html.matches("<h2>Tech</h2>").count(), 1);
    assert_eq!(html.matches("class=\"favorite\"").count(), 3);
    assert!(!html.contains("Budget"));
    assert!(!html.contains("Quarterly Report"));
}

#[test]
fn test_export_favorites_none_found() {
    let temp = sample_collection();

    notepub_cmd()
        .current_dir(temp.path())
        .args(["config", "favorites.tags", "Starred"])
        .assert()
        .success();

    notepub_cmd()
        .current_dir(temp.path())
        .args(["export", "favorites", "fav"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No favorites found (looked for Starred)"))
        .stdout(predicate::str::contains("Exported").not());

    assert!(!temp.path().join("fav").exists());
}

#[test]
fn test_export_warns_about_unreadable_note() {
    let temp = TempDir::new().unwrap();
    notepub_cmd().arg("init").arg(temp.path()).assert().success();
    write_note(temp.path(), "good.txt", &[("Title", "Good")], "fine");
    fs::write(temp.path().join("bad.txt"), [0xff, 0xfe, 0x00, 0x41]).unwrap();

    notepub_cmd()
        .current_dir(temp.path())
        .args(["export", "tab", "notes.tab"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 notes"))
        .stderr(predicate::str::contains("Skipping note"))
        .stderr(predicate::str::contains("bad.txt"));
}

#[test]
fn test_export_invalid_format() {
    let temp = sample_collection();

    notepub_cmd()
        .current_dir(temp.path())
        .args(["export", "docx", "out.docx"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Valid formats"));
}
