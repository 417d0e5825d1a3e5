//! Skip decision

use crate::error::Result;
use crate::history::HistoryAccessor;
use crate::message::{BRANCH_SPECIFIC_TAG, compose};
use crate::types::CommitId;

/// Decide whether `commit` should be skipped when integrating on top of `base`
///
/// First match wins:
/// 1. `force_skip` skips
/// 2. `force_merge` merges
/// 3. the unprefixed composed message has a line equal to `@branch-specific`
/// 4. otherwise merge
pub fn should_skip<H>(
    history: &H,
    commit: &CommitId,
    base: &CommitId,
    force_skip: bool,
    force_merge: bool,
) -> Result<bool>
where
    H: HistoryAccessor + ?Sized,
{
    if force_skip {
        return Ok(true);
    }
    if force_merge {
        return Ok(false);
    }
    let message = compose(history, "", commit, base)?;
    Ok(message.has_line(BRANCH_SPECIFIC_TAG))
}
