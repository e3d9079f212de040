//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use git2::{Oid, Repository, Signature};

use gitscribe::commit::CommitMessageDraft;
use gitscribe::error::GenerationError;
use gitscribe::llm::MessageGenerator;
use gitscribe::review::{ReviewAction, ReviewSurface};

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository with a configured identity.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        {
            let mut config = repo.config().expect("Failed to open config");
            config
                .set_str("user.name", "Test User")
                .expect("Failed to set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Failed to set user.email");
        }
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file in the working tree without staging it.
    pub fn write(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(path, content).expect("Failed to write test file");
    }

    /// Add a file's current content to the index.
    pub fn stage(&self, name: &str) {
        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(name)).expect("Failed to add file");
        index.write().expect("Failed to write index");
    }

    /// Remove a file from the index and the working tree.
    pub fn stage_removal(&self, name: &str) {
        std::fs::remove_file(self.dir.path().join(name)).expect("Failed to delete file");
        let mut index = self.repo.index().expect("Failed to get index");
        index
            .remove_path(Path::new(name))
            .expect("Failed to remove path");
        index.write().expect("Failed to write index");
    }

    /// Reset the index to HEAD, unstaging everything.
    pub fn unstage_all(&self) {
        let head = self
            .repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("Failed to resolve HEAD");
        self.repo
            .reset(head.as_object(), git2::ResetType::Mixed, None)
            .expect("Failed to reset index");
    }

    /// Write, stage, and commit a file. Returns the commit OID.
    pub fn commit_file(&self, name: &str, content: &str, message: &str) -> Oid {
        self.write(name, content);
        self.stage(name);

        let mut index = self.repo.index().expect("Failed to get index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");
        let sig = Signature::now("Test User", "test@example.com").expect("Failed to create signature");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Message of the commit HEAD points to.
    pub fn head_message(&self) -> String {
        self.repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("Failed to resolve HEAD")
            .message()
            .unwrap_or_default()
            .to_string()
    }

    /// Number of commits reachable from HEAD.
    pub fn commit_count(&self) -> usize {
        let mut walk = self.repo.revwalk().expect("Failed to create revwalk");
        if walk.push_head().is_err() {
            return 0;
        }
        walk.count()
    }
}

/// Generator that replays canned replies and records prompts.
pub struct FakeGenerator {
    replies: Mutex<VecDeque<Result<String, GenerationError>>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicU32,
}

impl FakeGenerator {
    pub fn new(replies: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicU32::new(0),
        }
    }

    /// Generator answering "Commit title: <t>\nCommit description: <d>" for each pair.
    pub fn with_drafts(drafts: &[(&str, &str)]) -> Self {
        Self::new(
            drafts
                .iter()
                .map(|(t, d)| Ok(format!("Commit title: {t}\nCommit description: {d}")))
                .collect(),
        )
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(GenerationError::EmptyResponse))
    }
}

/// Surface that replays scripted input and records output.
#[derive(Default)]
pub struct ScriptedSurface {
    pub actions: VecDeque<ReviewAction>,
    pub edits: VecDeque<(String, String)>,
    pub shown: Vec<CommitMessageDraft>,
    pub notices: Vec<String>,
}

impl ScriptedSurface {
    pub fn new(actions: &[ReviewAction]) -> Self {
        Self {
            actions: actions.iter().copied().collect(),
            ..Default::default()
        }
    }

    pub fn with_edit(mut self, title: &str, description: &str) -> Self {
        self.edits
            .push_back((title.to_string(), description.to_string()));
        self
    }
}

impl ReviewSurface for ScriptedSurface {
    fn show_draft(&mut self, draft: &CommitMessageDraft) {
        self.shown.push(draft.clone());
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }

    fn read_action(&mut self) -> io::Result<ReviewAction> {
        self.actions
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }

    fn read_edit(&mut self, _current: &CommitMessageDraft) -> io::Result<(String, String)> {
        self.edits
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no edit scripted"))
    }
}
