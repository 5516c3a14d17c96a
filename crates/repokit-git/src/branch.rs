//! [`BranchRef`] -- a branch name with an optional remote.

use std::fmt;

/// A branch, optionally on a remote.
///
/// No validation is done on either part. An empty remote string is still a
/// remote as far as [`BranchRef::remote_qualified_name`] is concerned; only
/// [`RepoClient::fetch_commit`](crate::client::RepoClient::fetch_commit)
/// treats it as "no remote" when deciding whether to refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRef {
    name: String,
    remote: Option<String>,
}

impl BranchRef {
    /// A branch with an explicit (possibly absent) remote.
    pub fn new(name: impl Into<String>, remote: Option<String>) -> Self {
        Self {
            name: name.into(),
            remote,
        }
    }

    /// A local branch.
    pub fn local(name: impl Into<String>) -> Self {
        Self::new(name, None)
    }

    /// A branch on `remote`.
    pub fn on_remote(remote: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(name, Some(remote.into()))
    }

    /// The bare branch name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The remote, if one was given.
    pub fn remote(&self) -> Option<&str> {
        self.remote.as_deref()
    }

    /// `remote/name` when a remote is set, otherwise `name`.
    pub fn remote_qualified_name(&self) -> String {
        match &self.remote {
            Some(remote) => format!("{remote}/{}", self.name),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for BranchRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.remote_qualified_name())
    }
}
