//! Reference and commit range resolution.

use git2::{Oid, Repository};

use crate::error::GitError;

/// Resolved commit range with start and end OIDs.
#[derive(Debug, Clone)]
pub struct CommitRange {
    pub from: Oid,
    pub to: Oid,
    pub from_ref: String,
    pub to_ref: String,
}

/// Open the repository containing `path`, searching parent directories.
pub fn open_repository(path: &std::path::Path) -> Result<Repository, GitError> {
    Repository::discover(path).map_err(|_| GitError::NotARepository {
        path: path.display().to_string(),
    })
}

/// Parse and resolve a `<from>..<to>` range string.
///
/// Both sides must be present and resolvable. Three-dot ranges are not
/// supported.
pub fn resolve_range(repo: &Repository, range_spec: &str) -> Result<CommitRange, GitError> {
    let Some((from_str, to_str)) = range_spec.split_once("..") else {
        return Err(GitError::InvalidRange(range_spec.to_string()));
    };

    if from_str.is_empty() || to_str.is_empty() || to_str.starts_with('.') {
        return Err(GitError::InvalidRange(range_spec.to_string()));
    }

    let from = resolve_reference(repo, from_str)?;
    let to = resolve_reference(repo, to_str)?;

    Ok(CommitRange {
        from,
        to,
        from_ref: from_str.to_string(),
        to_ref: to_str.to_string(),
    })
}

/// Resolve a reference (tag, branch, commit hash) to a commit OID.
pub fn resolve_reference(repo: &Repository, reference: &str) -> Result<Oid, GitError> {
    // Try as a direct OID first
    if let Ok(oid) = Oid::from_str(reference) {
        if repo.find_commit(oid).is_ok() {
            return Ok(oid);
        }
    }

    // Try as a reference (branch, tag, HEAD, rev expressions like HEAD~2)
    match repo.revparse_single(reference) {
        Ok(obj) => Ok(obj.peel_to_commit().map_err(GitError::ParseCommit)?.id()),
        Err(e) => Err(GitError::InvalidReference(reference.to_string(), e)),
    }
}
