//! Composition of integration commit messages

use super::pattern::classify;
use crate::error::{Error, Result};
use crate::history::HistoryAccessor;
use crate::types::CommitId;
use std::fmt;
use tracing::debug;

/// One block of a composed message body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSection {
    /// Heading line (`Commit '<abbrev>'`), absent for a single commit's body
    pub label: Option<String>,
    /// Text of the section, kept verbatim
    pub text: String,
}

/// An integration commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedMessage {
    /// First line of the message, including the caller's prefix
    pub subject: String,
    /// Body sections, oldest commit first
    pub sections: Vec<MessageSection>,
}

impl ComposedMessage {
    /// Render as commit message text
    pub fn render(&self) -> String {
        let mut out = self.subject.clone();
        for section in &self.sections {
            match &section.label {
                // Remaining lines of a single body continue right after the subject
                None => {
                    out.push('\n');
                    out.push_str(&section.text);
                }
                Some(label) => {
                    out.push_str("\n\n");
                    out.push_str(label);
                    if !section.text.is_empty() {
                        out.push('\n');
                        out.push_str(&section.text);
                    }
                }
            }
        }
        out
    }

    /// Whether any line of the rendered message is exactly `line`
    pub fn has_line(&self, line: &str) -> bool {
        self.render().lines().any(|l| l == line)
    }
}

impl fmt::Display for ComposedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Compose the message for integrating `commit` on top of `base`
///
/// Merge commits recognized by [`classify`] carry no content of their own, so
/// they are unwrapped to their second parent until an authored commit is
/// reached. That commit's not-yet-integrated first-parent history then
/// decides the shape:
/// - one commit: `prefix` + its body
/// - several: `prefix` + comma-joined abbreviations, then one labeled section
///   per commit, oldest first
pub fn compose<H>(
    history: &H,
    prefix: &str,
    commit: &CommitId,
    base: &CommitId,
) -> Result<ComposedMessage>
where
    H: HistoryAccessor + ?Sized,
{
    let mut current = commit.clone();
    let mut body = history.body(&current)?;

    loop {
        let kind = classify(&body);
        if !kind.is_merge() {
            break;
        }
        let second = history
            .parents(&current)?
            .into_iter()
            .nth(1)
            .ok_or_else(|| Error::MissingSecondParent(current.to_string()))?;
        debug!(merge = %current, ?kind, into = %second, "unwrapping merge commit");
        body = history.body(&second)?;
        current = second;
    }

    let mut not_integrated = history.commits_not_in(&current, base)?;

    match not_integrated.len() {
        0 => Err(Error::InconsistentHistory {
            commit: current.to_string(),
            base: base.to_string(),
        }),
        1 => Ok(single_commit_message(prefix, &body)),
        _ => {
            // History comes back newest first; the change log reads oldest first
            not_integrated.reverse();
            let mut abbrevs = Vec::with_capacity(not_integrated.len());
            let mut sections = Vec::with_capacity(not_integrated.len());
            for id in &not_integrated {
                let abbrev = history.abbrev(id)?;
                sections.push(MessageSection {
                    label: Some(format!("Commit '{abbrev}'")),
                    text: history.body(id)?,
                });
                abbrevs.push(abbrev);
            }
            Ok(ComposedMessage {
                subject: format!("{prefix}{}", abbrevs.join(",")),
                sections,
            })
        }
    }
}

fn single_commit_message(prefix: &str, body: &str) -> ComposedMessage {
    let (first, rest) = body.split_once('\n').unwrap_or((body, ""));
    let sections = if rest.is_empty() {
        Vec::new()
    } else {
        vec![MessageSection {
            label: None,
            text: rest.to_string(),
        }]
    };
    ComposedMessage {
        subject: format!("{prefix}{first}"),
        sections,
    }
}
