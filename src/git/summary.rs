//! Commit summary extraction using git2.

use std::collections::BTreeMap;

use chrono::{SecondsFormat, TimeZone, Utc};
use git2::{Commit, Patch, Repository};
use serde::{Deserialize, Serialize};

use crate::error::GitError;

use super::range::{resolve_range, resolve_reference};

/// Display threshold: diff summaries list at most this many files.
pub const MAX_SUMMARY_FILES: usize = 10;

/// Hard character cap for the diff summary digest.
pub const MAX_SUMMARY_CHARS: usize = 4000;

/// Marker appended when the digest hits the character cap.
const TRUNCATION_MARKER: &str = "[summary truncated]";

/// Line-change counts for a single file in a commit or range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub path: String,
    pub insertions: usize,
    pub deletions: usize,
}

impl FileChange {
    /// Render as `path (+a/-d)`, the shape used in digests and prompts.
    pub fn stat_line(&self) -> String {
        format!("{} (+{}/-{})", self.path, self.insertions, self.deletions)
    }
}

/// Structured summary of a commit or commit range.
///
/// Immutable once built. `insertions`/`deletions`/`files_count` are always
/// the sums/count over `files_changed`, and `short_hash` is a prefix of
/// `commit_hash`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSummary {
    pub commit_hash: String,
    pub short_hash: String,
    pub message: String,
    pub author: String,
    pub date: String,
    pub files_changed: Vec<FileChange>,
    pub insertions: usize,
    pub deletions: usize,
    pub files_count: usize,
    pub diff_summary: String,
}

impl CommitSummary {
    /// First line of the message.
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// All changed files as newline-joined `path (+a/-d)` lines.
    pub fn files_changed_lines(&self) -> String {
        self.files_changed
            .iter()
            .map(FileChange::stat_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Extract a summary for a single commit reference.
///
/// Per-file stats come from the commit's diff against its first parent, or
/// against the empty tree for a root commit.
pub fn extract_commit(repo: &Repository, reference: &str) -> Result<CommitSummary, GitError> {
    let oid = resolve_reference(repo, reference)?;
    let commit = repo.find_commit(oid).map_err(GitError::ParseCommit)?;

    let files = file_changes(repo, &commit)?;
    let message = commit.message().unwrap_or("").trim().to_string();

    build_summary(&commit, message, files)
}

/// Extract an aggregated summary for a `<from>..<to>` range.
///
/// Per-file stats are summed across all commits in the range, deduplicated
/// by path and sorted by path. The message is synthesized from the subject
/// lines of the walked commits (newest first); hash, author, and date come
/// from the range tip.
pub fn extract_range(repo: &Repository, range_spec: &str) -> Result<CommitSummary, GitError> {
    let range = resolve_range(repo, range_spec)?;

    let mut revwalk = repo.revwalk().map_err(GitError::RevwalkError)?;
    revwalk.push(range.to).map_err(GitError::RevwalkError)?;
    revwalk.hide(range.from).map_err(GitError::RevwalkError)?;

    let mut merged: BTreeMap<String, FileChange> = BTreeMap::new();
    let mut subjects = Vec::new();

    for oid_result in revwalk {
        let oid = oid_result.map_err(GitError::RevwalkError)?;
        let commit = repo.find_commit(oid).map_err(GitError::ParseCommit)?;

        subjects.push(commit.summary().unwrap_or("").to_string());

        for change in file_changes(repo, &commit)? {
            merged
                .entry(change.path.clone())
                .and_modify(|existing| {
                    existing.insertions += change.insertions;
                    existing.deletions += change.deletions;
                })
                .or_insert(change);
        }
    }

    if subjects.is_empty() {
        return Err(GitError::EmptyRange(range_spec.to_string()));
    }

    let tip = repo.find_commit(range.to).map_err(GitError::ParseCommit)?;
    let message = subjects.join("\n");

    build_summary(&tip, message, merged.into_values().collect())
}

/// Assemble a [`CommitSummary`] from a commit and its per-file stats.
fn build_summary(
    commit: &Commit,
    message: String,
    files: Vec<FileChange>,
) -> Result<CommitSummary, GitError> {
    let commit_hash = commit.id().to_string();
    let short_hash = commit_hash.chars().take(7).collect();
    let author = signature_display(commit);
    let date = commit_date(commit)?;

    let insertions = files.iter().map(|f| f.insertions).sum();
    let deletions = files.iter().map(|f| f.deletions).sum();
    let files_count = files.len();
    let diff_summary = build_diff_summary(&files);

    Ok(CommitSummary {
        commit_hash,
        short_hash,
        message,
        author,
        date,
        files_changed: files,
        insertions,
        deletions,
        files_count,
        diff_summary,
    })
}

/// Per-file insertion/deletion counts for a commit against its first parent.
fn file_changes(repo: &Repository, commit: &Commit) -> Result<Vec<FileChange>, GitError> {
    let tree = commit.tree().map_err(GitError::ParseCommit)?;
    let parent_tree = match commit.parent(0) {
        Ok(parent) => Some(parent.tree().map_err(GitError::ParseCommit)?),
        // Root commit: diff against the empty tree
        Err(_) => None,
    };

    let diff = repo
        .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)
        .map_err(GitError::DiffFailed)?;

    let mut changes = Vec::new();

    for idx in 0..diff.deltas().len() {
        let Some(delta) = diff.get_delta(idx) else {
            continue;
        };

        let path = delta
            .new_file()
            .path()
            .or_else(|| delta.old_file().path())
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default();

        if path.is_empty() {
            continue;
        }

        // Binary deltas have no patch; count them as 0/0
        let (insertions, deletions) = match Patch::from_diff(&diff, idx)
            .map_err(GitError::DiffFailed)?
        {
            Some(patch) => {
                let (_, ins, del) = patch.line_stats().map_err(GitError::DiffFailed)?;
                (ins, del)
            }
            None => (0, 0),
        };

        changes.push(FileChange {
            path,
            insertions,
            deletions,
        });
    }

    Ok(changes)
}

/// Render the commit author as `Name <email>`.
fn signature_display(commit: &Commit) -> String {
    let author = commit.author();
    format!(
        "{} <{}>",
        author.name().unwrap_or("unknown"),
        author.email().unwrap_or("")
    )
}

/// Commit timestamp as an ISO-8601 UTC string.
fn commit_date(commit: &Commit) -> Result<String, GitError> {
    let seconds = commit.time().seconds();
    let timestamp = Utc
        .timestamp_opt(seconds, 0)
        .single()
        .ok_or_else(|| GitError::InvalidTimestamp {
            hash: commit.id().to_string(),
            seconds,
        })?;

    Ok(timestamp.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Build the bounded human-readable digest of the changed files.
///
/// Lists `path (+a/-d)` per file. Above [`MAX_SUMMARY_FILES`], keeps the top
/// files by total changed lines (ties broken by path) and appends an
/// `…and N more files` marker. The digest never exceeds
/// [`MAX_SUMMARY_CHARS`]: when a line would cross the cap, it stops at the
/// previous whole line and appends an explicit truncation marker.
fn build_diff_summary(files: &[FileChange]) -> String {
    let mut lines: Vec<String> = if files.len() > MAX_SUMMARY_FILES {
        let mut ranked: Vec<&FileChange> = files.iter().collect();
        ranked.sort_by(|a, b| {
            (b.insertions + b.deletions)
                .cmp(&(a.insertions + a.deletions))
                .then_with(|| a.path.cmp(&b.path))
        });

        let mut top: Vec<String> = ranked[..MAX_SUMMARY_FILES]
            .iter()
            .map(|f| f.stat_line())
            .collect();
        top.push(format!("…and {} more files", files.len() - MAX_SUMMARY_FILES));
        top
    } else {
        files.iter().map(FileChange::stat_line).collect()
    };

    // Reserve room for the truncation marker plus its separating newline
    let budget = MAX_SUMMARY_CHARS - TRUNCATION_MARKER.chars().count() - 1;

    let mut out = String::new();
    let mut used = 0usize;

    for line in lines.drain(..) {
        let line_chars = line.chars().count();
        let sep = usize::from(!out.is_empty());

        if used + sep + line_chars > budget {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(TRUNCATION_MARKER);
            break;
        }

        if sep == 1 {
            out.push('\n');
        }
        out.push_str(&line);
        used += sep + line_chars;
    }

    out
}
