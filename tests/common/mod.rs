#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub fn notepub_cmd() -> Command {
    let mut cmd = Command::cargo_bin("notepub").unwrap();
    cmd.env_remove("NOTEPUB_ROOT");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Write a note file with the given fields, `Body` last
pub fn write_note(dir: &Path, file: &str, fields: &[(&str, &str)], body: &str) {
    let mut text = String::new();
    for (name, value) in fields {
        text.push_str(&format!("{}: {}\n\n", name, value));
    }
    text.push_str(&format!("Body:\n\n{}\n", body));
    fs::write(dir.join(file), text).unwrap();
}

/// An initialized collection with a few tagged notes
pub fn sample_collection() -> TempDir {
    let temp = TempDir::new().unwrap();
    notepub_cmd().arg("init").arg(temp.path()).assert().success();

    write_note(
        temp.path(),
        "rust.txt",
        &[
            ("Title", "Rust"),
            ("Tags", "Favorites.Tech"),
            ("Link", "https://www.rust-lang.org"),
        ],
        "A language empowering everyone.",
    );
    write_note(
        temp.path(),
        "go.txt",
        &[
            ("Title", "Go"),
            ("Tags", "Favorites.Tech"),
            ("Link", "https://go.dev"),
        ],
        "Simple and fast.",
    );
    write_note(
        temp.path(),
        "zig.txt",
        &[
            ("Title", "Zig"),
            ("Tags", "Favorites.Tech"),
            ("Link", "https://ziglang.org"),
        ],
        "",
    );
    write_note(
        temp.path(),
        "report.txt",
        &[("Title", "Quarterly Report"), ("Tags", "Work")],
        "Numbers.",
    );
    write_note(
        temp.path(),
        "budget.txt",
        &[("Title", "Budget"), ("Tags", "Work.Finance")],
        "More numbers.",
    );
    temp
}
