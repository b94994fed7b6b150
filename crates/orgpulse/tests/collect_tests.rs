// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Integration tests for organization traversal and deduplication
//!
//! These tests drive `Collector` against an in-memory organization and
//! check deduplication, failure isolation and filtering end to end.


use std::time::Duration;

use fixtures::{FakeOrg, ORG, anonymous_commit, at_minute, commit, window};
use orgpulse::collect::{CollectError, CollectOptions, Collector};
use orgpulse_report::ReportBundle;
use similar_asserts::assert_eq;

fn collect(org: &FakeOrg, options: CollectOptions) -> orgpulse::Collection {
    Collector::new(org, options)
        .collect(&window())
        .expect("collection should succeed")
}

fn shas(collection: &orgpulse::Collection) -> Vec<String> {
    collection.commits.iter().map(|c| c.sha.clone()).collect()
}

// ============================================================================
// Deduplication
// ============================================================================

#[test]
fn test_commit_on_two_branches_is_collected_once() {
    let org = FakeOrg::new()
        .member("alice")
        .repo("svc", &["main", "dev"])
        .listed(commit("abc12345", "svc", "main", "alice", 10))
        .listed(commit("abc12345", "svc", "dev", "alice", 10));

    let collection = collect(&org, CollectOptions::default());

    assert_eq!(collection.commits.len(), 1);
    let unique = &collection.commits[0];
    assert_eq!(unique.branches, vec!["main".to_string(), "dev".to_string()]);
    assert!(unique.detail.is_some());
    assert_eq!(org.detail_calls("abc12345"), 1);

    assert_eq!(collection.stats.observations, 2);
    assert_eq!(collection.stats.unique_commits, 1);
    assert_eq!(collection.stats.multi_branch_commits, 1);
    assert_eq!(collection.stats.detail_fetches, 1);
}

#[test]
fn test_same_sha_in_two_repositories_keeps_first_repo() {
    let org = FakeOrg::new()
        .member("alice")
        .repo("svc", &["main"])
        .repo("fork", &["main"])
        .listed(commit("abc12345", "svc", "main", "alice", 10))
        .listed(commit("abc12345", "fork", "main", "alice", 10));

    let collection = collect(&org, CollectOptions::default());

    assert_eq!(collection.commits.len(), 1);
    assert_eq!(collection.commits[0].repo, "svc");
    assert_eq!(collection.commits[0].branches, vec!["main".to_string()]);
}

#[test]
fn test_commits_are_exported_newest_first() {
    let org = FakeOrg::new()
        .member("alice")
        .repo("svc", &["main"])
        .repo("web", &["main"])
        .listed(commit("aaa00001", "svc", "main", "alice", 5))
        .listed(commit("bbb00002", "svc", "main", "alice", 40))
        .listed(commit("ccc00003", "web", "main", "alice", 20));

    let collection = collect(&org, CollectOptions::default());

    assert_eq!(shas(&collection), vec!["bbb00002", "ccc00003", "aaa00001"]);
}

// ============================================================================
// Traversal order
// ============================================================================

#[test]
fn test_traversal_is_sequential_in_enumeration_order() {
    let org = FakeOrg::new()
        .member("alice")
        .repo("svc", &["main", "dev"])
        .repo("web", &["main"])
        .listed(commit("abc12345", "svc", "main", "alice", 10))
        .listed(commit("abc12345", "svc", "dev", "alice", 10));

    collect(&org, CollectOptions::default());

    assert_eq!(
        org.calls(),
        vec![
            format!("members:{ORG}"),
            format!("repositories:{ORG}"),
            "branches:svc".to_string(),
            "commits:svc/main".to_string(),
            "detail:svc/abc12345".to_string(),
            "commits:svc/dev".to_string(),
            "branches:web".to_string(),
            "commits:web/main".to_string(),
        ]
    );
}

// ============================================================================
// Failure isolation
// ============================================================================

#[test]
fn test_branch_listing_failure_skips_only_that_repository() {
    let org = FakeOrg::new()
        .member("alice")
        .repo("infra", &["main"])
        .repo("svc", &["main"])
        .broken_repo("infra")
        .listed(commit("abc12345", "svc", "main", "alice", 10));

    let collection = collect(&org, CollectOptions::default());

    assert_eq!(shas(&collection), vec!["abc12345"]);
    assert_eq!(collection.stats.repositories, 2);
    assert_eq!(collection.stats.failed_scopes, 1);
    assert!(org.calls().contains(&"branches:svc".to_string()));
}

#[test]
fn test_commit_listing_failure_keeps_partial_results() {
    let org = FakeOrg::new()
        .member("alice")
        .repo("svc", &["main", "dev"])
        .listed(commit("aaa00001", "svc", "main", "alice", 30))
        .listed(commit("bbb00002", "svc", "main", "alice", 20))
        .listed(commit("ccc00003", "svc", "main", "alice", 10))
        .listed(commit("ddd00004", "svc", "dev", "alice", 5))
        .broken_branch("svc", "main", 2);

    let collection = collect(&org, CollectOptions::default());

    assert_eq!(shas(&collection), vec!["aaa00001", "bbb00002", "ddd00004"]);
    assert_eq!(collection.stats.failed_scopes, 1);
    assert_eq!(collection.stats.branches, 2);
}

#[test]
fn test_detail_failure_keeps_commit_without_detail() {
    let org = FakeOrg::new()
        .member("alice")
        .repo("svc", &["main"])
        .listed(commit("aaa00001", "svc", "main", "alice", 30))
        .listed(commit("bbb00002", "svc", "main", "alice", 20))
        .broken_detail("aaa00001");

    let collection = collect(&org, CollectOptions::default());

    assert_eq!(collection.commits.len(), 2);
    assert!(collection.commits[0].detail.is_none());
    assert!(collection.commits[1].detail.is_some());
    assert_eq!(collection.stats.detail_fetches, 2);
    assert_eq!(collection.stats.detail_failures, 1);
    assert_eq!(collection.stats.failed_scopes, 0);
}

#[test]
fn test_member_listing_failure_aborts_before_repositories() {
    let org = FakeOrg::without_member_access().repo("svc", &["main"]);

    let result = Collector::new(&org, CollectOptions::default()).collect(&window());

    assert!(matches!(result, Err(CollectError::Members(_))));
    assert_eq!(org.calls(), vec![format!("members:{ORG}")]);
}

#[test]
fn test_member_listing_not_needed_for_all_users() {
    let org = FakeOrg::without_member_access()
        .repo("svc", &["main"])
        .listed(commit("abc12345", "svc", "main", "mallory", 10));

    let collection = collect(&org, CollectOptions::default().all_users());

    assert_eq!(collection.commits.len(), 1);
    assert!(!org.calls().contains(&format!("members:{ORG}")));
}

// ============================================================================
// Filtering
// ============================================================================

#[test]
fn test_membership_filter_drops_outsiders_and_anonymous() {
    let org = FakeOrg::new()
        .member("alice")
        .repo("svc", &["main"])
        .listed(commit("aaa00001", "svc", "main", "alice", 30))
        .listed(commit("bbb00002", "svc", "main", "mallory", 20))
        .listed(anonymous_commit("ccc00003", "svc", "main", 10));

    let members_only = collect(&org, CollectOptions::default());
    assert_eq!(shas(&members_only), vec!["aaa00001"]);

    let everyone = collect(&org, CollectOptions::default().all_users());
    assert_eq!(shas(&everyone), vec!["aaa00001", "bbb00002", "ccc00003"]);
}

#[test]
fn test_window_is_half_open() {
    let org = FakeOrg::new()
        .member("alice")
        .repo("svc", &["main"])
        .listed(commit("late0001", "svc", "main", "alice", 60))
        .listed(commit("last0002", "svc", "main", "alice", 59))
        .listed(commit("first003", "svc", "main", "alice", 0))
        .listed(commit("early004", "svc", "main", "alice", -1));

    let collection = collect(&org, CollectOptions::default());

    assert_eq!(shas(&collection), vec!["last0002", "first003"]);
    assert!(collection.commits.iter().all(|c| c.timestamp < at_minute(60)));
}

#[test]
fn test_repository_allow_list() {
    let org = FakeOrg::new()
        .member("alice")
        .repo("svc", &["main"])
        .repo("web", &["main"])
        .listed(commit("aaa00001", "svc", "main", "alice", 30))
        .listed(commit("bbb00002", "web", "main", "alice", 20));

    let collection = collect(&org, CollectOptions::default().only_repositories(["web"]));

    assert_eq!(shas(&collection), vec!["bbb00002"]);
    assert_eq!(collection.stats.repositories, 1);
    assert!(!org.calls().contains(&"branches:svc".to_string()));
}

#[test]
fn test_details_disabled() {
    let org = FakeOrg::new()
        .member("alice")
        .repo("svc", &["main"])
        .listed(commit("aaa00001", "svc", "main", "alice", 30));

    let collection = collect(&org, CollectOptions::default().without_details());

    assert_eq!(collection.commits.len(), 1);
    assert!(collection.commits[0].detail.is_none());
    assert_eq!(org.total_detail_calls(), 0);
    assert_eq!(collection.stats.detail_fetches, 0);
}

// ============================================================================
// Empty runs
// ============================================================================

#[test]
fn test_zero_commits_produces_empty_bundle() {
    let org = FakeOrg::new()
        .member("alice")
        .repo("svc", &["main"])
        .listed(commit("old00001", "svc", "main", "alice", -120));

    let collection = collect(&org, CollectOptions::default());
    assert!(collection.commits.is_empty());
    assert_eq!(collection.stats.unique_commits, 0);

    let bundle = ReportBundle::new(
        window(),
        collection.commits,
        at_minute(61),
        Duration::from_secs(2),
    );
    assert!(bundle.rows().is_empty());
    assert!(bundle.summary().starts_with(&format!("No commits found for {ORG}")));
    assert_eq!(bundle.metadata().total_commits, 0);
}
