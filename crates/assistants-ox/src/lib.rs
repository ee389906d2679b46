//! OpenAI Assistants thread message client for Rust
//!
//! This crate covers the `threads/{thread_id}/messages` resource:
//! - Creating, listing, retrieving, modifying and deleting messages
//! - Listing and retrieving files attached to a message
//! - Typed message content, including the `video` payload that is sent as a
//!   bare URL string or a bare array of frame URLs
//!
//! Every request carries the `OpenAI-Beta: assistants=<version>` header.
//!
//! # Example
//!
//! ```rust,no_run
//! use assistants_ox::{Assistants, CreateMessageRequest, ListMessagesRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Assistants::from_env()?;
//!
//!     let created = client
//!         .create_message("thread_abc123", &CreateMessageRequest::user("Hello!"))
//!         .await?;
//!     println!("created {}", created.id);
//!
//!     let page = client
//!         .list_messages(
//!             "thread_abc123",
//!             &ListMessagesRequest::builder().limit(20).order("asc").build(),
//!         )
//!         .await?;
//!     for message in &page.data {
//!         println!("{}: {}", message.role, message.text());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
mod internal;
pub mod message;

pub use client::Assistants;
pub use config::ClientConfig;
pub use error::AssistantsRequestError;
pub use message::{
    CreateMessageRequest, ListMessagesRequest, Message, MessageContent, MessageDeletionStatus,
    MessageFile, MessageFilesList, MessagesList, Metadata, ModifyMessageRequest,
    ThreadAttachment, ThreadAttachmentTool, Video,
};

// Re-export shared types from the common crate
pub use assistants_ox_common::{CommonRequestError, Timestamp};

// Cancellation handle accepted by `Assistants::with_cancellation`
pub use tokio_util::sync::CancellationToken;
