//! git::gateway
//!
//! Git gateway implementation using git2.
//!
//! This module is the **single doorway** to the remote menu repository. All
//! repository interactions flow through [`Gateway`], which owns the on-disk
//! working copy and normalizes every git2 failure into a typed category.
//!
//! # Architecture
//!
//! One `Gateway` is constructed at startup and lives for the process
//! lifetime. No other module imports `git2`. The gateway is deliberately
//! synchronous: callers that live on an async runtime move calls onto the
//! blocking pool, which also guarantees an in-flight commit/push cannot be
//! cancelled mid-transaction by a dropped request.
//!
//! `git2::Repository` is `Send` but not `Sync`, so a shared gateway must sit
//! behind a mutex. The service layer owns that mutex and holds it for whole
//! load-mutate-save transactions.
//!
//! # Error Handling
//!
//! Failures are categorized into typed variants:
//! - [`GitError::Init`]: open/clone/first-pull failed at startup
//! - [`GitError::Sync`]: network or auth failure while fetching
//! - [`GitError::MergeConflict`]: local and remote histories diverged
//! - [`GitError::Push`]: the local commit landed but the remote rejected it
//! - [`GitError::DocumentMissing`]: the configured document is absent
//! - [`GitError::Closed`]: the gateway was closed
//!
//! # Example
//!
//! ```ignore
//! use carta::git::{Gateway, GatewayConfig};
//!
//! let gateway = Gateway::initialize(config)?;
//! let bytes = gateway.read_document()?;
//! gateway.write_document(&bytes)?;
//! gateway.commit_and_push("Update menu")?;
//! ```

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, Instant};

use git2::build::{CheckoutBuilder, RepoBuilder};
use git2::{Cred, FetchOptions, PushOptions, RebaseOptions, RemoteCallbacks, Signature};
use thiserror::Error;
use tracing::{error, info, warn};

/// Errors from gateway operations.
///
/// The categorization is what higher layers key off: domain callers treat
/// `Sync`/`Push`/`MergeConflict` as retryable store outages, while `Init`
/// is fatal at startup.
#[derive(Debug, Error)]
pub enum GitError {
    /// Opening, cloning, or the initial pull failed at startup.
    #[error("repository initialization failed: {message}")]
    Init {
        /// Description of the failure
        message: String,
    },

    /// Network or authentication failure while talking to the remote.
    #[error("sync failed: {message}")]
    Sync {
        /// Description of the failure
        message: String,
    },

    /// Local and remote histories have diverged and cannot be
    /// fast-forwarded or replayed cleanly. Never auto-resolved.
    #[error("merge conflict: {message}")]
    MergeConflict {
        /// Description of the divergence
        message: String,
    },

    /// The commit landed locally but the push was rejected or failed.
    ///
    /// The local commit remains; `reconcile` is the recovery path.
    #[error("push failed for local commit {commit}: {message}")]
    Push {
        /// Abbreviated id of the stranded local commit
        commit: String,
        /// Description of the failure
        message: String,
    },

    /// The configured document does not exist in the working copy.
    #[error("menu document not found: {path}")]
    DocumentMissing {
        /// Absolute path that was checked
        path: PathBuf,
    },

    /// Filesystem error in the working copy.
    #[error("working copy io error: {message}")]
    Io {
        /// Description of the error
        message: String,
    },

    /// The gateway has been closed.
    #[error("gateway is closed")]
    Closed,

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    /// Create an Internal error from a git2::Error with richer context.
    fn internal(context: &str, err: &git2::Error) -> Self {
        GitError::Internal {
            message: format!("{context}: {}", err.message()),
        }
    }
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::Internal {
            message: err.message().to_string(),
        }
    }
}

/// Everything the gateway needs to reach and identify the remote.
#[derive(Clone)]
pub struct GatewayConfig {
    /// Remote repository URL (https or file).
    pub url: String,
    /// Branch holding the menu document.
    pub branch: String,
    /// Username for smart-HTTP authentication.
    pub username: String,
    /// Token or password for smart-HTTP authentication.
    pub token: String,
    /// Directory for the local working copy.
    pub clone_dir: PathBuf,
    /// Path of the menu document, relative to the repository root.
    pub file_path: PathBuf,
    /// Deadline for any single network operation.
    pub network_timeout: Duration,
    /// Committer identity recorded on every commit.
    pub committer_name: String,
    /// Committer email recorded on every commit.
    pub committer_email: String,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("url", &self.url)
            .field("branch", &self.branch)
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .field("clone_dir", &self.clone_dir)
            .field("file_path", &self.file_path)
            .field("network_timeout", &self.network_timeout)
            .finish()
    }
}

/// Result of a `pull`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullOutcome {
    /// Local branch already matched the remote.
    UpToDate,
    /// Local branch was fast-forwarded to the remote tip.
    FastForwarded,
}

/// Result of a `reconcile`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Nothing to do: local and remote already agree.
    InSync,
    /// Local branch was behind and has been fast-forwarded.
    FastForwarded,
    /// Local commits were (re)played onto the remote tip and pushed.
    Pushed {
        /// Number of local commits that reached the remote
        commits: usize,
    },
}

/// The gateway to the menu repository working copy.
///
/// Construct with [`Gateway::initialize`], which opens an existing working
/// copy (pulling the latest remote state) or clones a fresh one.
pub struct Gateway {
    /// The underlying repository; `None` after `close`.
    repo: Option<git2::Repository>,
    workdir: PathBuf,
    branch: String,
    document_path: PathBuf,
    username: String,
    token: String,
    committer_name: String,
    committer_email: String,
    network_timeout: Duration,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("workdir", &self.workdir)
            .field("branch", &self.branch)
            .field("closed", &self.repo.is_none())
            .finish()
    }
}

impl Gateway {
    // =========================================================================
    // Initialization and Lifecycle
    // =========================================================================

    /// Open or clone the working copy and bring it up to date.
    ///
    /// If `clone_dir` already holds a repository it is opened and pulled;
    /// otherwise the remote is cloned at the configured branch. Every
    /// failure on this path is fatal, reported as [`GitError::Init`].
    pub fn initialize(config: GatewayConfig) -> Result<Self, GitError> {
        if config.file_path.is_absolute() {
            return Err(GitError::Init {
                message: format!(
                    "document path must be relative to the repository root, got {}",
                    config.file_path.display()
                ),
            });
        }

        let existing = config.clone_dir.join(".git").exists();
        if existing {
            let repo = git2::Repository::open(&config.clone_dir).map_err(|e| GitError::Init {
                message: format!(
                    "failed to open working copy at {}: {}",
                    config.clone_dir.display(),
                    e.message()
                ),
            })?;
            let gateway = Self::from_parts(repo, config)?;
            info!(
                workdir = %gateway.workdir.display(),
                branch = %gateway.branch,
                "opened existing working copy"
            );
            match gateway.pull() {
                Ok(_) => {}
                // Stranded local commits from an earlier failed push must
                // not keep the server down; `reconcile` recovers them at
                // runtime.
                Err(GitError::MergeConflict { message }) => {
                    warn!(%message, "working copy ahead of remote at startup");
                }
                Err(e) => {
                    return Err(GitError::Init {
                        message: format!("initial pull failed: {e}"),
                    });
                }
            }
            Ok(gateway)
        } else {
            if let Some(parent) = config.clone_dir.parent() {
                std::fs::create_dir_all(parent).map_err(|e| GitError::Init {
                    message: format!("failed to create {}: {e}", parent.display()),
                })?;
            }

            info!(url = %config.url, branch = %config.branch, "cloning menu repository");
            let started = Instant::now();
            let mut fetch = FetchOptions::new();
            fetch.remote_callbacks(Self::make_callbacks(
                config.username.clone(),
                config.token.clone(),
                started + config.network_timeout,
            ));
            let repo = RepoBuilder::new()
                .branch(&config.branch)
                .fetch_options(fetch)
                .clone(&config.url, &config.clone_dir)
                .map_err(|e| GitError::Init {
                    message: format!("clone failed: {}", e.message()),
                })?;

            let gateway = Self::from_parts(repo, config)?;
            info!(workdir = %gateway.workdir.display(), "clone complete");
            Ok(gateway)
        }
    }

    fn from_parts(repo: git2::Repository, config: GatewayConfig) -> Result<Self, GitError> {
        let workdir = repo
            .workdir()
            .ok_or_else(|| GitError::Init {
                message: "working copy is bare".to_string(),
            })?
            .to_path_buf();

        Ok(Self {
            repo: Some(repo),
            workdir,
            branch: config.branch,
            document_path: config.file_path,
            username: config.username,
            token: config.token,
            committer_name: config.committer_name,
            committer_email: config.committer_email,
            network_timeout: config.network_timeout,
        })
    }

    /// Release the repository handle.
    ///
    /// Idempotent. Every operation after `close` fails with
    /// [`GitError::Closed`].
    pub fn close(&mut self) {
        if let Some(repo) = self.repo.take() {
            info!(workdir = %self.workdir.display(), "closing gateway");
            drop(repo);
        }
    }

    /// Whether `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.repo.is_none()
    }

    /// The branch this gateway tracks.
    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// The working copy directory.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Access the repository, failing once the gateway is closed.
    fn repo(&self) -> Result<&git2::Repository, GitError> {
        self.repo.as_ref().ok_or(GitError::Closed)
    }

    // =========================================================================
    // Document Access
    // =========================================================================

    /// Absolute path of the menu document inside the working copy.
    pub fn document_path(&self) -> PathBuf {
        self.workdir.join(&self.document_path)
    }

    /// Read the raw bytes of the menu document.
    pub fn read_document(&self) -> Result<Vec<u8>, GitError> {
        // A closed gateway refuses filesystem access too.
        self.repo()?;

        let path = self.document_path();
        if !path.is_file() {
            return Err(GitError::DocumentMissing { path });
        }
        std::fs::read(&path).map_err(|e| GitError::Io {
            message: format!("failed to read {}: {e}", path.display()),
        })
    }

    /// Replace the menu document contents in the working copy.
    ///
    /// Writes to a temporary sibling first and renames into place, so a
    /// crash mid-write never leaves a truncated document behind. Durability
    /// comes from the commit, not from this write.
    pub fn write_document(&self, bytes: &[u8]) -> Result<(), GitError> {
        self.repo()?;

        let path = self.document_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| GitError::Io {
                message: format!("failed to create {}: {e}", parent.display()),
            })?;
        }

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, bytes).map_err(|e| GitError::Io {
            message: format!("failed to write {}: {e}", tmp.display()),
        })?;
        std::fs::rename(&tmp, &path).map_err(|e| GitError::Io {
            message: format!("failed to move {} into place: {e}", tmp.display()),
        })?;
        Ok(())
    }

    // =========================================================================
    // Synchronization
    // =========================================================================

    /// Fetch the tracked branch and fast-forward the local branch.
    ///
    /// # Errors
    ///
    /// - [`GitError::Sync`] on network or auth failure (including timeout)
    /// - [`GitError::MergeConflict`] if local commits exist that the remote
    ///   does not have; a pull never merges or rebases
    pub fn pull(&self) -> Result<PullOutcome, GitError> {
        let repo = self.repo()?;
        let started = Instant::now();

        self.fetch_tracking(repo, started)?;

        let remote_oid = repo
            .refname_to_id(&self.tracking_refname())
            .map_err(|e| GitError::internal("remote tracking branch missing after fetch", &e))?;

        let local_refname = self.local_refname();
        let Ok(local_oid) = repo.refname_to_id(&local_refname) else {
            // Local branch does not exist yet (fresh repository or a branch
            // switch in configuration). Create it at the remote tip.
            repo.reference(&local_refname, remote_oid, true, "pull: create branch")?;
            self.checkout_branch(repo)?;
            info!(branch = %self.branch, tip = %short(remote_oid), "created local branch from remote");
            return Ok(PullOutcome::FastForwarded);
        };

        if local_oid == remote_oid {
            return Ok(PullOutcome::UpToDate);
        }

        let (ahead, behind) = repo
            .graph_ahead_behind(local_oid, remote_oid)
            .map_err(|e| GitError::internal("failed to compare histories", &e))?;

        if ahead > 0 {
            return Err(GitError::MergeConflict {
                message: format!(
                    "local branch has {ahead} commit(s) the remote does not; reconcile required"
                ),
            });
        }

        let mut reference = repo.find_reference(&local_refname)?;
        reference.set_target(remote_oid, "pull: fast-forward")?;
        self.checkout_branch(repo)?;
        info!(branch = %self.branch, commits = behind, tip = %short(remote_oid), "fast-forwarded");
        Ok(PullOutcome::FastForwarded)
    }

    /// Stage the menu document, commit, and push the branch.
    ///
    /// Returns the new commit id. If the push is rejected or fails after
    /// the commit succeeded, the error is [`GitError::Push`] and the local
    /// commit remains for a later [`Gateway::reconcile`].
    pub fn commit_and_push(&self, message: &str) -> Result<String, GitError> {
        let repo = self.repo()?;

        let mut index = repo
            .index()
            .map_err(|e| GitError::internal("failed to open index", &e))?;
        index
            .add_path(&self.document_path)
            .map_err(|e| GitError::internal("failed to stage document", &e))?;
        index
            .write()
            .map_err(|e| GitError::internal("failed to write index", &e))?;
        let tree_oid = index
            .write_tree()
            .map_err(|e| GitError::internal("failed to write tree", &e))?;
        let tree = repo.find_tree(tree_oid)?;

        let signature = self.signature()?;
        let mut parents = Vec::new();
        if let Ok(head) = repo.head() {
            parents.push(head.peel_to_commit()?);
        }
        let parents: Vec<_> = parents.iter().collect();

        let commit_oid = repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .map_err(|e| GitError::internal("commit failed", &e))?;
        info!(commit = %short(commit_oid), message, "committed");

        let started = Instant::now();
        if let Err(push_err) = self.push_branch(repo, started) {
            let ahead = self.ahead_of_remote().unwrap_or(0);
            error!(
                commit = %short(commit_oid),
                ahead,
                error = %push_err,
                "push failed; local commit retained, reconcile to recover"
            );
            return Err(GitError::Push {
                commit: short(commit_oid),
                message: self.network_failure("push", &push_err, started),
            });
        }

        info!(commit = %short(commit_oid), branch = %self.branch, "pushed");
        Ok(commit_oid.to_string())
    }

    /// Count local commits not present on the remote-tracking branch.
    ///
    /// A non-zero value means a commit landed locally but never reached the
    /// remote; `reconcile` is the recovery path.
    pub fn ahead_of_remote(&self) -> Result<usize, GitError> {
        let repo = self.repo()?;
        let local = match repo.refname_to_id(&self.local_refname()) {
            Ok(oid) => oid,
            Err(_) => return Ok(0),
        };
        let remote = match repo.refname_to_id(&self.tracking_refname()) {
            Ok(oid) => oid,
            Err(_) => return Ok(0),
        };
        let (ahead, _behind) = repo
            .graph_ahead_behind(local, remote)
            .map_err(|e| GitError::internal("failed to compare histories", &e))?;
        Ok(ahead)
    }

    /// Bring local and remote back into agreement after a failed push.
    ///
    /// Fetches, then:
    /// - already in agreement: nothing to do
    /// - local strictly behind: fast-forward
    /// - local strictly ahead: push
    /// - diverged: replay the local commits onto the remote tip, then push.
    ///   A conflicting replay is aborted and reported as
    ///   [`GitError::MergeConflict`], leaving the local branch as it was.
    pub fn reconcile(&self) -> Result<ReconcileOutcome, GitError> {
        let repo = self.repo()?;
        let started = Instant::now();

        self.fetch_tracking(repo, started)?;

        let remote_oid = repo
            .refname_to_id(&self.tracking_refname())
            .map_err(|e| GitError::internal("remote tracking branch missing after fetch", &e))?;
        let local_oid = repo
            .refname_to_id(&self.local_refname())
            .map_err(|e| GitError::internal("local branch missing", &e))?;

        if local_oid == remote_oid {
            return Ok(ReconcileOutcome::InSync);
        }

        let (ahead, behind) = repo
            .graph_ahead_behind(local_oid, remote_oid)
            .map_err(|e| GitError::internal("failed to compare histories", &e))?;

        if ahead == 0 {
            let mut reference = repo.find_reference(&self.local_refname())?;
            reference.set_target(remote_oid, "reconcile: fast-forward")?;
            self.checkout_branch(repo)?;
            info!(branch = %self.branch, commits = behind, "reconcile: fast-forwarded");
            return Ok(ReconcileOutcome::FastForwarded);
        }

        if behind > 0 {
            self.rebase_onto_remote(repo, ahead)?;
        }

        let push_started = Instant::now();
        self.push_branch(repo, push_started).map_err(|e| {
            let local = repo
                .refname_to_id(&self.local_refname())
                .map(short)
                .unwrap_or_else(|_| "unknown".to_string());
            GitError::Push {
                commit: local,
                message: self.network_failure("push", &e, push_started),
            }
        })?;

        info!(branch = %self.branch, commits = ahead, "reconcile: pushed local commits");
        Ok(ReconcileOutcome::Pushed { commits: ahead })
    }

    // =========================================================================
    // Internal Plumbing
    // =========================================================================

    fn local_refname(&self) -> String {
        format!("refs/heads/{}", self.branch)
    }

    fn tracking_refname(&self) -> String {
        format!("refs/remotes/origin/{}", self.branch)
    }

    fn signature(&self) -> Result<Signature<'_>, GitError> {
        Signature::now(&self.committer_name, &self.committer_email)
            .map_err(|e| GitError::internal("invalid committer identity", &e))
    }

    /// Force-checkout the tracked branch so HEAD and the worktree match it.
    ///
    /// The worktree is disposable state here: every save rewrites the
    /// document in full, so discarding stray local edits is safe.
    fn checkout_branch(&self, repo: &git2::Repository) -> Result<(), GitError> {
        repo.set_head(&self.local_refname())
            .map_err(|e| GitError::internal("failed to set HEAD", &e))?;
        let mut checkout = CheckoutBuilder::new();
        checkout.force();
        repo.checkout_head(Some(&mut checkout))
            .map_err(|e| GitError::internal("checkout failed", &e))?;
        Ok(())
    }

    /// Fetch the tracked branch into its remote-tracking ref.
    ///
    /// The explicit refspec keeps the tracking ref authoritative, so ahead
    /// and behind counts never depend on FETCH_HEAD bookkeeping.
    fn fetch_tracking(&self, repo: &git2::Repository, started: Instant) -> Result<(), GitError> {
        let mut remote = repo
            .find_remote("origin")
            .map_err(|e| GitError::internal("remote 'origin' not found", &e))?;
        let mut options = FetchOptions::new();
        options.remote_callbacks(self.callbacks(started));

        let refspec = format!(
            "+refs/heads/{0}:refs/remotes/origin/{0}",
            self.branch
        );
        remote
            .fetch(&[refspec.as_str()], Some(&mut options), None)
            .map_err(|e| GitError::Sync {
                message: self.network_failure("fetch", &e, started),
            })
    }

    /// Push the local branch and update its remote-tracking ref on success.
    fn push_branch(&self, repo: &git2::Repository, started: Instant) -> Result<(), git2::Error> {
        let mut remote = repo.find_remote("origin")?;

        // libgit2 reports per-ref rejections through a callback rather than
        // the push return value, so collect them explicitly.
        let rejection: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
        let mut callbacks = self.callbacks(started);
        {
            let rejection = Rc::clone(&rejection);
            callbacks.push_update_reference(move |refname, status| {
                if let Some(status) = status {
                    *rejection.borrow_mut() = Some(format!("{refname}: {status}"));
                }
                Ok(())
            });
        }

        let mut options = PushOptions::new();
        options.remote_callbacks(callbacks);

        let refspec = format!("refs/heads/{0}:refs/heads/{0}", self.branch);
        remote.push(&[refspec.as_str()], Some(&mut options))?;

        if let Some(status) = rejection.borrow_mut().take() {
            return Err(git2::Error::from_str(&format!(
                "remote rejected update: {status}"
            )));
        }

        // Keep the tracking ref authoritative without another fetch.
        if let Ok(local) = repo.refname_to_id(&self.local_refname()) {
            repo.reference(
                &self.tracking_refname(),
                local,
                true,
                "push: update tracking",
            )?;
        }
        Ok(())
    }

    /// Replay local commits onto the remote tip.
    fn rebase_onto_remote(&self, repo: &git2::Repository, ahead: usize) -> Result<(), GitError> {
        warn!(
            branch = %self.branch,
            ahead,
            "histories diverged, replaying local commits onto remote tip"
        );

        // Start from a pristine worktree; see checkout_branch.
        self.checkout_branch(repo)?;

        let upstream_ref = repo.find_reference(&self.tracking_refname())?;
        let upstream = repo
            .reference_to_annotated_commit(&upstream_ref)
            .map_err(|e| GitError::internal("failed to resolve remote tip", &e))?;
        let local_ref = repo.find_reference(&self.local_refname())?;
        let local = repo
            .reference_to_annotated_commit(&local_ref)
            .map_err(|e| GitError::internal("failed to resolve local branch", &e))?;

        let signature = self.signature()?;
        let mut options = RebaseOptions::new();
        let mut rebase = repo
            .rebase(Some(&local), Some(&upstream), None, Some(&mut options))
            .map_err(|e| GitError::internal("failed to start replay", &e))?;

        while let Some(operation) = rebase.next() {
            operation.map_err(|e| GitError::internal("replay step failed", &e))?;

            let index = repo
                .index()
                .map_err(|e| GitError::internal("failed to open index", &e))?;
            if index.has_conflicts() {
                let _ = rebase.abort();
                return Err(GitError::MergeConflict {
                    message: format!(
                        "local changes to {} conflict with the remote; manual resolution required",
                        self.document_path.display()
                    ),
                });
            }

            rebase
                .commit(None, &signature, None)
                .map_err(|e| GitError::internal("failed to commit replayed change", &e))?;
        }

        rebase
            .finish(Some(&signature))
            .map_err(|e| GitError::internal("failed to finish replay", &e))?;
        Ok(())
    }

    /// Remote callbacks carrying credentials and the network deadline.
    ///
    /// The deadline is enforced by returning `false` from progress
    /// callbacks, which makes libgit2 abort the transfer instead of
    /// hanging on a dead connection.
    fn callbacks(&self, started: Instant) -> RemoteCallbacks<'static> {
        Self::make_callbacks(
            self.username.clone(),
            self.token.clone(),
            started + self.network_timeout,
        )
    }

    fn make_callbacks(
        username: String,
        token: String,
        deadline: Instant,
    ) -> RemoteCallbacks<'static> {
        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(move |_url, username_from_url, _allowed| {
            let user = username_from_url.unwrap_or(username.as_str());
            Cred::userpass_plaintext(user, &token)
        });
        callbacks.transfer_progress(move |_| Instant::now() < deadline);
        callbacks.sideband_progress(move |_| Instant::now() < deadline);
        callbacks
    }

    /// Describe a failed network operation, naming the timeout if the
    /// configured deadline had passed.
    fn network_failure(&self, operation: &str, err: &git2::Error, started: Instant) -> String {
        if started.elapsed() >= self.network_timeout {
            format!(
                "{operation} timed out after {}s",
                self.network_timeout.as_secs()
            )
        } else {
            format!("{operation} failed: {}", err.message())
        }
    }
}

fn short(oid: git2::Oid) -> String {
    let full = oid.to_string();
    full[..7.min(full.len())].to_string()
}
