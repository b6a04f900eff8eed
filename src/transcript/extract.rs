//! Change extraction over a decoded transcript.

use super::model::{ToolInvocation, Transcript};
use std::collections::BTreeSet;

/// Collect the distinct paths touched by write, edit and multi-edit invocations.
///
/// Blank paths are ignored. The result is sorted for deterministic output.
pub fn extract_changed_files(transcript: &Transcript) -> BTreeSet<String> {
    let mut changed = BTreeSet::new();
    for invocation in transcript.invocations() {
        for path in invocation.touched_paths() {
            let path = path.trim();
            if !path.is_empty() {
                changed.insert(path.to_string());
            }
        }
    }
    changed
}

/// Whether the session delegated work to the named sub-agent.
pub fn delegated_to(transcript: &Transcript, agent: &str) -> bool {
    transcript.invocations().any(|invocation| {
        matches!(invocation, ToolInvocation::Delegate { ref subagent_type } if subagent_type == agent)
    })
}
