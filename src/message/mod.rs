//! Provenance commit messages
//!
//! Merge commits are recognized from their body text and unwrapped to the
//! authored change they carry; the result is flattened into an oldest-first
//! change log.

mod compose;
mod pattern;

pub use compose::{ComposedMessage, MessageSection, compose};
pub use pattern::{
    BRANCH_MERGE_PREFIX, BRANCH_SPECIFIC_TAG, COMMIT_MERGE_PREFIX, MergeKind,
    PULL_REQUEST_MERGE_PREFIX, classify,
};
