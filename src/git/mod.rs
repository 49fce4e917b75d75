//! git
//!
//! Single interface for all repository operations.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to the remote menu repository. Every
//! read and write of the working copy flows through [`Gateway`]; no other
//! module imports `git2`. All remote traffic goes through libgit2 (no
//! shelling out to the git CLI).
//!
//! # Responsibilities
//!
//! - Opening or cloning the working copy at startup
//! - Pulling (fetch + fast-forward) the tracked branch
//! - Staging, committing, and pushing the menu document
//! - Tracking local-ahead-of-remote divergence and reconciling it
//! - Cross-process exclusion on the clone directory ([`WorkdirLock`])
//!
//! # Invariants
//!
//! - Pulls never merge or rebase; divergence is reported, not resolved
//! - A failed push leaves the local commit in place for `reconcile`
//! - A closed gateway refuses every operation
//!
//! # Example
//!
//! ```ignore
//! use carta::git::{Gateway, WorkdirLock};
//!
//! let _lock = WorkdirLock::acquire(&config.clone_dir)?;
//! let gateway = Gateway::initialize(config)?;
//! let bytes = gateway.read_document()?;
//! ```

mod gateway;
mod lock;

pub use gateway::{Gateway, GatewayConfig, GitError, PullOutcome, ReconcileOutcome};
pub use lock::{LockError, WorkdirLock};
