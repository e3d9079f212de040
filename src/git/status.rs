//! Per-file change status as reported by the repository.

use std::collections::BTreeSet;
use std::fmt;

/// What happened to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChangeKind {
    Modified,
    Renamed,
    TypeChanged,
    Added,
    Deleted,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Modified => "modified",
            ChangeKind::Renamed => "renamed",
            ChangeKind::TypeChanged => "type-changed",
            ChangeKind::Added => "added",
            ChangeKind::Deleted => "deleted",
        }
    }
}

/// Where the change lives: already in the index, or only in the working tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChangeArea {
    Staged,
    Unstaged,
}

/// A single (kind, area) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChangeFlag {
    pub kind: ChangeKind,
    pub area: ChangeArea,
}

impl ChangeFlag {
    pub fn staged(kind: ChangeKind) -> Self {
        Self { kind, area: ChangeArea::Staged }
    }

    pub fn unstaged(kind: ChangeKind) -> Self {
        Self { kind, area: ChangeArea::Unstaged }
    }
}

impl fmt::Display for ChangeFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.area {
            ChangeArea::Staged => write!(f, "{} (staged)", self.kind.as_str()),
            ChangeArea::Unstaged => write!(f, "{} (unstaged)", self.kind.as_str()),
        }
    }
}

/// The set of flags describing one changed file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeStatus {
    flags: BTreeSet<ChangeFlag>,
}

impl ChangeStatus {
    pub fn new(flags: impl IntoIterator<Item = ChangeFlag>) -> Self {
        Self {
            flags: flags.into_iter().collect(),
        }
    }

    /// Map libgit2 status bits onto our flag set.
    ///
    /// Bits with no counterpart (ignored, conflicted) are dropped, so the
    /// result may be empty.
    pub fn from_git2(status: git2::Status) -> Self {
        const MAPPING: [(git2::Status, ChangeKind, ChangeArea); 10] = [
            (git2::Status::INDEX_MODIFIED, ChangeKind::Modified, ChangeArea::Staged),
            (git2::Status::INDEX_RENAMED, ChangeKind::Renamed, ChangeArea::Staged),
            (git2::Status::INDEX_TYPECHANGE, ChangeKind::TypeChanged, ChangeArea::Staged),
            (git2::Status::INDEX_NEW, ChangeKind::Added, ChangeArea::Staged),
            (git2::Status::INDEX_DELETED, ChangeKind::Deleted, ChangeArea::Staged),
            (git2::Status::WT_MODIFIED, ChangeKind::Modified, ChangeArea::Unstaged),
            (git2::Status::WT_RENAMED, ChangeKind::Renamed, ChangeArea::Unstaged),
            (git2::Status::WT_TYPECHANGE, ChangeKind::TypeChanged, ChangeArea::Unstaged),
            (git2::Status::WT_NEW, ChangeKind::Added, ChangeArea::Unstaged),
            (git2::Status::WT_DELETED, ChangeKind::Deleted, ChangeArea::Unstaged),
        ];

        Self::new(
            MAPPING
                .iter()
                .filter(|(bit, _, _)| status.contains(*bit))
                .map(|&(_, kind, area)| ChangeFlag { kind, area }),
        )
    }

    pub fn contains(&self, flag: ChangeFlag) -> bool {
        self.flags.contains(&flag)
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// True when any part of the change is already in the index.
    pub fn is_staged(&self) -> bool {
        self.flags.iter().any(|f| f.area == ChangeArea::Staged)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChangeFlag> {
        self.flags.iter()
    }
}

impl FromIterator<ChangeFlag> for ChangeStatus {
    fn from_iter<I: IntoIterator<Item = ChangeFlag>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.flags.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join(", "))
    }
}

/// One changed file from a status query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEntry {
    pub path: String,
    pub status: ChangeStatus,
}

impl ChangeEntry {
    pub fn new(path: impl Into<String>, status: ChangeStatus) -> Self {
        Self {
            path: path.into(),
            status,
        }
    }
}
