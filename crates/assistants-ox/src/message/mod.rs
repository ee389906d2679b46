mod api;
pub mod content;

use std::collections::HashMap;

use assistants_ox_common::Timestamp;
use bon::Builder;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub use api::ListMessagesRequest;
pub use content::{ImageFile, ImageUrl, MessageContent, MessageText, Video, VideoUrl};

/// Free-form metadata attached to a message
pub type Metadata = HashMap<String, Value>;

/// A single turn in a thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    /// Always `thread.message`
    #[serde(default)]
    pub object: String,
    pub created_at: Timestamp,
    pub thread_id: String,
    /// Usually `user` or `assistant`; not restricted on the client side.
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: Vec<MessageContent>,
    /// Legacy (v1) file attachments.
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assistant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: Metadata,
}

impl Message {
    /// All text parts joined with newlines, ignoring media items.
    #[must_use]
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(MessageContent::as_text)
            .map(|text| text.value.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Body of a create-message call.
///
/// Creation takes a single flattened text string, not the content union.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
pub struct CreateMessageRequest {
    #[builder(into)]
    pub role: String,
    #[builder(into)]
    pub content: String,
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub file_ids: Vec<String>,
    #[builder(default)]
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: Metadata,
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<ThreadAttachment>,
}

impl CreateMessageRequest {
    pub fn user(content: impl Into<String>) -> Self {
        Self::builder().role("user").content(content).build()
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::builder().role("assistant").content(content).build()
    }
}

/// A file made available to tools for a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadAttachment {
    pub file_id: String,
    #[serde(default)]
    pub tools: Vec<ThreadAttachmentTool>,
}

impl ThreadAttachment {
    pub fn new(file_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            tools: Vec::new(),
        }
    }

    /// Add a tool by type, e.g. `file_search` or `code_interpreter`
    #[must_use]
    pub fn with_tool(mut self, tool_type: impl Into<String>) -> Self {
        self.tools.push(ThreadAttachmentTool {
            tool_type: tool_type.into(),
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadAttachmentTool {
    #[serde(rename = "type")]
    pub tool_type: String,
}

/// Body of a modify-message call. Only metadata can change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifyMessageRequest {
    pub metadata: HashMap<String, String>,
}

/// One page of messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagesList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<Message>,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub first_id: Option<String>,
    #[serde(default)]
    pub last_id: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

impl MessagesList {
    /// Cursor for the following page, if there is one
    #[must_use]
    pub fn next_cursor(&self) -> Option<&str> {
        if self.has_more {
            self.last_id.as_deref()
        } else {
            None
        }
    }
}

/// A file attached to a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageFile {
    pub id: String,
    #[serde(default)]
    pub object: String,
    pub created_at: Timestamp,
    pub message_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageFilesList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<MessageFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDeletionStatus {
    pub id: String,
    #[serde(default)]
    pub object: String,
    pub deleted: bool,
}

/// Treat an explicit JSON `null` like an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
