//! Session transcript decoding and change extraction.
//!
//! The host hands aftercare a JSON payload on stdin. Its transcript is a list
//! of loosely shaped events; this module decodes each event once into typed
//! tool invocations and skips anything that does not fit. Extraction itself
//! never fails.

mod extract;
mod model;


pub use extract::{delegated_to, extract_changed_files};
pub use model::{ContentItem, HookPayload, ToolInvocation, Transcript, TranscriptEvent};
