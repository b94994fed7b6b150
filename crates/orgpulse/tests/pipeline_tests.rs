// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! End-to-end tests: collect from an organization, then write reports


use std::time::Duration;

use fixtures::{FakeOrg, ORG, at_minute, commit, window};
use orgpulse::collect::{CollectOptions, Collector};
use orgpulse_report::{ReportBundle, ReportWriter};
use similar_asserts::assert_eq;
use test_utils::TempTestDir;

fn sample_org() -> FakeOrg {
    FakeOrg::new()
        .member("alice")
        .member("bob")
        .repo("svc", &["main", "dev"])
        .repo("web", &["main"])
        .listed(commit("abc12345aaaa", "svc", "main", "alice", 10))
        .listed(commit("abc12345aaaa", "svc", "dev", "alice", 10))
        .listed(commit("def67890bbbb", "web", "main", "bob", 45))
}

#[test]
fn test_collect_and_write_full_report() {
    let temp = TempTestDir::new();
    let org = sample_org();

    let collection = Collector::new(&org, CollectOptions::default())
        .collect(&window())
        .expect("collection should succeed");
    let bundle = ReportBundle::new(
        window(),
        collection.commits,
        at_minute(62),
        Duration::from_millis(1500),
    );
    let written = ReportWriter::new(temp.path())
        .write(&bundle)
        .expect("write should succeed");

    assert_eq!(written.dir, temp.path().join("20260301_09"));
    assert_eq!(
        temp.list("20260301_09"),
        vec![
            format!("{ORG}_commits_0902.csv"),
            format!("{ORG}_commits_0902.json"),
            format!("{ORG}_summary_0902.md"),
            "commits".to_string(),
            "metadata.txt".to_string(),
        ]
    );
    assert_eq!(written.commit_files.len(), 2);

    let csv = std::fs::read_to_string(written.table.expect("csv written")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("web,main,def67890bbbb,"));
    assert!(lines[2].starts_with("svc,\"main, dev\",abc12345aaaa,"));

    let summary = std::fs::read_to_string(written.summary.expect("summary written")).unwrap();
    assert!(summary.contains("**Total Commits:** 2 (unique)"));
    let svc = summary.find("## Repository: [svc]").expect("svc section");
    let web = summary.find("## Repository: [web]").expect("web section");
    assert!(svc < web);

    let metadata = std::fs::read_to_string(&written.metadata).unwrap();
    assert!(metadata.contains("Total Commits: 2\n"));
    assert!(metadata.contains("Collection Duration: 1.5s\n"));
}

#[test]
fn test_collect_without_details_writes_no_narratives() {
    let temp = TempTestDir::new();
    let org = sample_org();

    let collection = Collector::new(&org, CollectOptions::default().without_details())
        .collect(&window())
        .expect("collection should succeed");
    let bundle = ReportBundle::new(window(), collection.commits, at_minute(62), Duration::ZERO);
    let written = ReportWriter::new(temp.path())
        .write(&bundle)
        .expect("write should succeed");

    assert!(written.commit_files.is_empty());
    assert!(!written.dir.join("commits").exists());

    let csv = std::fs::read_to_string(written.table.expect("csv written")).unwrap();
    assert!(csv.lines().skip(1).all(|line| line.ends_with(",0,0,0,0")));
}
