//! End-to-end tests of the review workflow against real repositories.
//!
//! These drive `run_review` with a scripted surface and a fake generator,
//! and check the resulting commits with git2.

mod common;

use common::{FakeGenerator, ScriptedSurface, TestRepo};

use gitscribe::commit::{ChangeCollector, CommitExecutor};
use gitscribe::git::{Git2Backend, GitBackend, RepositoryHandle};
use gitscribe::review::{ReviewAction, ReviewOutcome, run_review};
use gitscribe::{CommitError, CommitMessageDraft, GenerationError, ReviewError};

fn backend_for(repo: &TestRepo) -> Git2Backend {
    Git2Backend::new(RepositoryHandle::new(repo.path()))
}

/// Repository with one commit and a staged modification of `README.md`.
fn repo_with_staged_change() -> TestRepo {
    let repo = TestRepo::new();
    repo.commit_file("README.md", "# Project\n", "Initial commit");
    repo.write("README.md", "# Project\n\nUsage notes.\n");
    repo.stage("README.md");
    repo
}

#[test]
fn test_collector_reads_only_staged_files() {
    let repo = TestRepo::new();
    repo.commit_file("README.md", "# Project\n", "Initial commit");
    repo.commit_file("src/lib.rs", "pub fn a() {}\n", "Add lib");
    repo.write("README.md", "# Project\n\nUsage notes.\n");
    repo.stage("README.md");
    repo.write("notes.txt", "scratch\n");
    repo.write("src/lib.rs", "pub fn a() {}\npub fn b() {}\n");

    let backend = backend_for(&repo);
    let patch = ChangeCollector::new(&backend).collect_patch_content().unwrap();

    assert!(patch.contains("README.md"));
    assert!(patch.contains("+Usage notes."));
    assert!(!patch.contains("notes.txt"), "untracked file leaked: {patch}");
    assert!(!patch.contains("pub fn b"), "worktree edit leaked: {patch}");
}

#[test]
fn test_collector_empty_when_nothing_staged() {
    let repo = TestRepo::new();
    repo.commit_file("README.md", "# Project\n", "Initial commit");
    repo.write("README.md", "# Changed\n");
    repo.write("new.txt", "untracked\n");

    let backend = backend_for(&repo);
    let patch = ChangeCollector::new(&backend).collect_patch_content().unwrap();

    assert_eq!(patch, "");
}

#[test]
fn test_collector_includes_staged_file_with_later_worktree_edit() {
    let repo = repo_with_staged_change();
    repo.write("README.md", "# Project\n\nUsage notes.\nUnstaged line.\n");

    let backend = backend_for(&repo);
    let patch = ChangeCollector::new(&backend).collect_patch_content().unwrap();

    assert!(patch.contains("+Usage notes."));
    assert!(!patch.contains("Unstaged line."));
}

#[test]
fn test_collector_keeps_status_order_with_deletion() {
    let repo = TestRepo::new();
    repo.commit_file("old.txt", "legacy\n", "Initial commit");
    repo.stage_removal("old.txt");
    repo.write("a.txt", "alpha\n");
    repo.stage("a.txt");

    let backend = backend_for(&repo);
    let patch = ChangeCollector::new(&backend).collect_patch_content().unwrap();

    let added = patch.find("+alpha").expect("added file missing");
    let removed = patch.find("-legacy").expect("deleted file missing");
    assert!(added < removed, "status order not preserved: {patch}");
}

#[test]
fn test_collector_handles_unborn_branch() {
    let repo = TestRepo::new();
    repo.write("first.txt", "hello\n");
    repo.stage("first.txt");

    let backend = backend_for(&repo);
    let patch = ChangeCollector::new(&backend).collect_patch_content().unwrap();

    assert!(patch.contains("+hello"));
}

#[tokio::test]
async fn test_review_commit_first_draft() {
    let repo = repo_with_staged_change();
    let backend = backend_for(&repo);
    let patch = ChangeCollector::new(&backend).collect_patch_content().unwrap();

    let generator = FakeGenerator::with_drafts(&[("Document usage", "Add usage notes to README")]);
    let executor = CommitExecutor::new(&backend);
    let mut surface = ScriptedSurface::new(&[ReviewAction::Commit]);

    let outcome = run_review(&patch, &generator, &executor, &mut surface)
        .await
        .unwrap();

    match outcome {
        ReviewOutcome::Committed { commit_id, draft } => {
            assert_eq!(commit_id.len(), 40);
            assert_eq!(draft, CommitMessageDraft::new("Document usage", "Add usage notes to README"));
        }
        other => panic!("Expected commit, got {other:?}"),
    }
    assert_eq!(repo.commit_count(), 2);
    assert_eq!(repo.head_message(), "Document usage\n\nAdd usage notes to README");
    assert!(generator.prompts()[0].contains("+Usage notes."));
    assert_eq!(
        surface.notices.last().map(String::as_str),
        Some("Changes committed successfully.")
    );
}

#[tokio::test]
async fn test_review_regenerate_edit_then_commit() {
    let repo = repo_with_staged_change();
    let backend = backend_for(&repo);
    let patch = ChangeCollector::new(&backend).collect_patch_content().unwrap();

    let generator = FakeGenerator::with_drafts(&[("Title 1", "Body 1"), ("Title 2", "Body 2")]);
    let executor = CommitExecutor::new(&backend);
    let mut surface = ScriptedSurface::new(&[
        ReviewAction::Regenerate,
        ReviewAction::Edit,
        ReviewAction::Commit,
    ])
    .with_edit("", "New body");

    let outcome = run_review(&patch, &generator, &executor, &mut surface)
        .await
        .unwrap();

    assert!(matches!(outcome, ReviewOutcome::Committed { .. }));
    assert_eq!(generator.call_count(), 2);
    assert_eq!(repo.head_message(), "Title 2\n\nNew body");
    assert_eq!(
        surface.shown.last(),
        Some(&CommitMessageDraft::new("Title 2", "New body"))
    );
}

#[tokio::test]
async fn test_review_commit_with_empty_description() {
    let repo = repo_with_staged_change();
    let backend = backend_for(&repo);
    let patch = ChangeCollector::new(&backend).collect_patch_content().unwrap();

    let generator = FakeGenerator::new(vec![Ok("Commit title: Update README".to_string())]);
    let executor = CommitExecutor::new(&backend);
    let mut surface = ScriptedSurface::new(&[ReviewAction::Commit]);

    run_review(&patch, &generator, &executor, &mut surface)
        .await
        .unwrap();

    assert_eq!(repo.head_message().trim_end(), "Update README");
}

#[tokio::test]
async fn test_review_discard_leaves_repository_untouched() {
    let repo = repo_with_staged_change();
    let backend = backend_for(&repo);
    let patch = ChangeCollector::new(&backend).collect_patch_content().unwrap();

    let generator = FakeGenerator::with_drafts(&[("Title", "Body")]);
    let executor = CommitExecutor::new(&backend);
    let mut surface = ScriptedSurface::new(&[ReviewAction::Discard]);

    let outcome = run_review(&patch, &generator, &executor, &mut surface)
        .await
        .unwrap();

    assert_eq!(outcome, ReviewOutcome::Discarded);
    assert_eq!(repo.commit_count(), 1);
    assert!(
        backend
            .list_changes()
            .unwrap()
            .iter()
            .any(|c| c.status.is_staged()),
        "staged changes should survive a discard"
    );
}

#[tokio::test]
async fn test_review_without_staged_changes_never_calls_backend() {
    let repo = TestRepo::new();
    repo.commit_file("README.md", "# Project\n", "Initial commit");
    repo.write("README.md", "# Unstaged\n");

    let backend = backend_for(&repo);
    let patch = ChangeCollector::new(&backend).collect_patch_content().unwrap();

    let generator = FakeGenerator::with_drafts(&[("Title", "Body")]);
    let executor = CommitExecutor::new(&backend);
    let mut surface = ScriptedSurface::new(&[]);

    let outcome = run_review(&patch, &generator, &executor, &mut surface)
        .await
        .unwrap();

    assert_eq!(outcome, ReviewOutcome::NoChanges);
    assert_eq!(generator.call_count(), 0);
    assert_eq!(surface.notices, vec!["No relevant changes detected."]);
}

#[tokio::test]
async fn test_review_recovers_from_generation_failure() {
    let repo = repo_with_staged_change();
    let backend = backend_for(&repo);
    let patch = ChangeCollector::new(&backend).collect_patch_content().unwrap();

    let generator = FakeGenerator::new(vec![
        Err(GenerationError::RateLimited("slow down".to_string())),
        Ok("Commit title: Retry worked\nCommit description: Second attempt".to_string()),
    ]);
    let executor = CommitExecutor::new(&backend);
    let mut surface = ScriptedSurface::new(&[ReviewAction::Regenerate, ReviewAction::Commit]);

    run_review(&patch, &generator, &executor, &mut surface)
        .await
        .unwrap();

    assert!(surface.notices[0].contains("slow down"));
    assert_eq!(repo.head_message(), "Retry worked\n\nSecond attempt");
}

#[tokio::test]
async fn test_review_fails_when_index_emptied_during_review() {
    let repo = TestRepo::new();
    repo.commit_file("README.md", "# Project\n", "Initial commit");
    repo.write("added.txt", "new file\n");
    repo.stage("added.txt");

    let backend = backend_for(&repo);
    let patch = ChangeCollector::new(&backend).collect_patch_content().unwrap();
    assert!(patch.contains("+new file"));

    // Someone unstages everything while the draft is on screen.
    repo.unstage_all();

    let generator = FakeGenerator::with_drafts(&[("Add file", "Body")]);
    let executor = CommitExecutor::new(&backend);
    let mut surface = ScriptedSurface::new(&[ReviewAction::Commit]);

    let err = run_review(&patch, &generator, &executor, &mut surface)
        .await
        .unwrap_err();

    assert!(matches!(err, ReviewError::Commit(CommitError::NoChanges)));
    assert_eq!(repo.commit_count(), 1);
}

#[tokio::test]
async fn test_review_invalid_input_reprompts() {
    let repo = repo_with_staged_change();
    let backend = backend_for(&repo);
    let patch = ChangeCollector::new(&backend).collect_patch_content().unwrap();

    let generator = FakeGenerator::with_drafts(&[("Title", "Body")]);
    let executor = CommitExecutor::new(&backend);
    let mut surface = ScriptedSurface::new(&[
        ReviewAction::from_input("x"),
        ReviewAction::Discard,
    ]);

    let outcome = run_review(&patch, &generator, &executor, &mut surface)
        .await
        .unwrap();

    assert_eq!(outcome, ReviewOutcome::Discarded);
    assert!(surface.notices.iter().any(|n| n.starts_with("Invalid input.")));
    assert_eq!(generator.call_count(), 1);
}
