//! Typed transcript model.

use crate::error::{AftercareError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Tool names that modify files.
pub const WRITE_TOOL: &str = "Write";
pub const EDIT_TOOL: &str = "Edit";
pub const MULTI_EDIT_TOOL: &str = "MultiEdit";

/// Tool name used to delegate work to a sub-agent.
pub const DELEGATE_TOOL: &str = "Task";

/// Payload read from stdin at start-up.
#[derive(Debug, Clone, Deserialize)]
pub struct HookPayload {
    /// Host session identifier.
    pub session_id: String,

    /// Inline transcript events.
    #[serde(default)]
    pub transcript: Option<Vec<Value>>,

    /// Path to a JSON-lines transcript file, one event per line.
    #[serde(default)]
    pub transcript_path: Option<PathBuf>,
}

impl HookPayload {
    /// Parse the stdin payload.
    pub fn from_json(input: &str) -> Result<Self> {
        if input.trim().is_empty() {
            return Err(AftercareError::Payload("empty input".to_string()));
        }
        serde_json::from_str(input).map_err(|e| AftercareError::Payload(e.to_string()))
    }

    /// Resolve the transcript, preferring inline events over the file path.
    ///
    /// A missing or unreadable transcript yields an empty transcript.
    pub fn transcript(&self) -> Transcript {
        if let Some(events) = &self.transcript {
            return Transcript::from_values(events);
        }

        match &self.transcript_path {
            Some(path) => Transcript::load_jsonl(path).unwrap_or_else(|e| {
                log::debug!("transcript unavailable: {e}");
                Transcript::default()
            }),
            None => Transcript::default(),
        }
    }
}

/// A decoded transcript: only the events that matched the expected shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    pub events: Vec<TranscriptEvent>,
}

impl Transcript {
    /// Decode raw event values, skipping malformed ones.
    pub fn from_values(values: &[Value]) -> Self {
        Self {
            events: values.iter().filter_map(TranscriptEvent::from_value).collect(),
        }
    }

    /// Decode a JSON-lines transcript. Unparsable lines are skipped.
    pub fn from_jsonl(content: &str) -> Self {
        let values: Vec<Value> = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match serde_json::from_str(line) {
                Ok(value) => Some(value),
                Err(e) => {
                    log::debug!("skipping transcript line: {e}");
                    None
                }
            })
            .collect();
        Self::from_values(&values)
    }

    pub fn load_jsonl(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AftercareError::io("failed to read transcript", path, e))?;
        Ok(Self::from_jsonl(&content))
    }

    /// Every tool invocation in transcript order.
    pub fn invocations(&self) -> impl Iterator<Item = ToolInvocation> + '_ {
        self.events
            .iter()
            .flat_map(|event| event.items.iter())
            .filter_map(ContentItem::invocation)
    }
}

/// One session event with its content items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranscriptEvent {
    /// Event kind (`assistant`, `user`, ...) when present.
    pub kind: Option<String>,
    pub items: Vec<ContentItem>,
}

impl TranscriptEvent {
    /// Decode an event. Content is read from `message.content` or `content`.
    /// Returns `None` when the value is not an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let kind = object.get("type").and_then(Value::as_str).map(String::from);

        let content = object
            .get("message")
            .and_then(|m| m.get("content"))
            .or_else(|| object.get("content"));

        let items = match content {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| serde_json::from_value::<ContentItem>(item.clone()).ok())
                .collect(),
            _ => Vec::new(),
        };

        Some(Self { kind, items })
    }
}

/// A single content item inside an event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentItem {
    ToolUse {
        name: String,
        #[serde(default)]
        input: Value,
    },
    Text {
        #[serde(default)]
        text: String,
    },
    #[serde(other)]
    Other,
}

impl ContentItem {
    /// The typed invocation, if this item is a well-formed tool use.
    pub fn invocation(&self) -> Option<ToolInvocation> {
        match self {
            ContentItem::ToolUse { name, input } => ToolInvocation::decode(name, input),
            _ => None,
        }
    }
}

/// A recorded tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolInvocation {
    /// Whole-file write.
    Write { file_path: String },
    /// In-place edit of one file.
    Edit { file_path: String },
    /// Several edits, each possibly naming its own target.
    MultiEdit { targets: Vec<String> },
    /// Delegation to a sub-agent.
    Delegate { subagent_type: String },
    /// Any other tool.
    Other { name: String },
}

#[derive(Deserialize)]
struct FileInput {
    file_path: String,
}

#[derive(Deserialize)]
struct DelegateInput {
    subagent_type: String,
}

impl ToolInvocation {
    /// Decode a tool use. Known tools with malformed input yield `None`.
    pub fn decode(name: &str, input: &Value) -> Option<Self> {
        match name {
            WRITE_TOOL => {
                let input: FileInput = serde_json::from_value(input.clone()).ok()?;
                Some(ToolInvocation::Write {
                    file_path: input.file_path,
                })
            }
            EDIT_TOOL => {
                let input: FileInput = serde_json::from_value(input.clone()).ok()?;
                Some(ToolInvocation::Edit {
                    file_path: input.file_path,
                })
            }
            MULTI_EDIT_TOOL => {
                // Fields are read independently so a malformed edit list
                // keeps the top-level path.
                let edits = input
                    .get("edits")
                    .and_then(Value::as_array)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                let targets: Vec<String> = std::iter::once(input)
                    .chain(edits)
                    .filter_map(|entry| entry.get("file_path").and_then(Value::as_str))
                    .map(String::from)
                    .collect();
                if targets.is_empty() {
                    return None;
                }
                Some(ToolInvocation::MultiEdit { targets })
            }
            DELEGATE_TOOL => {
                let input: DelegateInput = serde_json::from_value(input.clone()).ok()?;
                Some(ToolInvocation::Delegate {
                    subagent_type: input.subagent_type,
                })
            }
            other => Some(ToolInvocation::Other {
                name: other.to_string(),
            }),
        }
    }

    /// Paths this invocation modified. Empty for non-modifying tools.
    pub fn touched_paths(&self) -> Vec<&str> {
        match self {
            ToolInvocation::Write { file_path } | ToolInvocation::Edit { file_path } => {
                vec![file_path.as_str()]
            }
            ToolInvocation::MultiEdit { targets } => targets.iter().map(String::as_str).collect(),
            ToolInvocation::Delegate { .. } | ToolInvocation::Other { .. } => Vec::new(),
        }
    }
}
