//! fwdport - forward-port hotfix commits into a develop branch
//!
//! Commits are taken one at a time, oldest first. Each becomes a merge commit
//! on the target branch whose message records where it came from. Changes
//! tagged `@branch-specific` are recorded as merged without applying them.

pub mod config;
pub mod error;
pub mod history;
pub mod integrate;
pub mod message;
pub mod pending;
pub mod types;
