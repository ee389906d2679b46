use std::collections::HashMap;

use assistants_ox_common::{HttpMethod, QueryParams};
use bon::Builder;

use super::{
    CreateMessageRequest, Message, MessageDeletionStatus, MessageFile, MessageFilesList,
    MessagesList, ModifyMessageRequest,
};
use crate::{Assistants, AssistantsRequestError};

/// Filters and cursors for listing messages. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder)]
pub struct ListMessagesRequest {
    /// Page size
    pub limit: Option<u32>,
    /// `asc` or `desc` by creation time
    #[builder(into)]
    pub order: Option<String>,
    /// Return messages after this message id
    #[builder(into)]
    pub after: Option<String>,
    /// Return messages before this message id
    #[builder(into)]
    pub before: Option<String>,
    /// Only messages produced by this run
    #[builder(into)]
    pub run_id: Option<String>,
}

impl ListMessagesRequest {
    pub(crate) fn query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt("limit", self.limit)
            .push_opt("order", self.order.as_deref())
            .push_opt("after", self.after.as_deref())
            .push_opt("before", self.before.as_deref())
            .push_opt("run_id", self.run_id.as_deref())
    }
}

fn messages_path(thread_id: &str) -> String {
    format!("threads/{thread_id}/messages")
}

fn message_path(thread_id: &str, message_id: &str) -> String {
    format!("threads/{thread_id}/messages/{message_id}")
}

impl Assistants {
    /// Create a message in a thread.
    ///
    /// # Errors
    ///
    /// Fails without sending if the body cannot be serialized; otherwise
    /// returns transport, API and decode errors unchanged.
    pub async fn create_message(
        &self,
        thread_id: &str,
        request: &CreateMessageRequest,
    ) -> Result<Message, AssistantsRequestError> {
        let endpoint = self.endpoint(messages_path(thread_id), HttpMethod::Post);
        self.api_request_with_body(endpoint, request).await
    }

    /// Fetch one page of messages in a thread.
    ///
    /// Pagination is left to the caller: pass [`MessagesList::next_cursor`]
    /// as `after` to continue.
    ///
    /// # Errors
    ///
    /// Transport, API and decode errors.
    pub async fn list_messages(
        &self,
        thread_id: &str,
        request: &ListMessagesRequest,
    ) -> Result<MessagesList, AssistantsRequestError> {
        let endpoint = self
            .endpoint(messages_path(thread_id), HttpMethod::Get)
            .with_query(request.query());
        self.api_request(endpoint).await
    }

    /// Retrieve a single message.
    ///
    /// # Errors
    ///
    /// Transport, API and decode errors.
    pub async fn retrieve_message(
        &self,
        thread_id: &str,
        message_id: &str,
    ) -> Result<Message, AssistantsRequestError> {
        let endpoint = self.endpoint(message_path(thread_id, message_id), HttpMethod::Get);
        self.api_request(endpoint).await
    }

    /// Replace a message's metadata. Nothing else about a message is mutable.
    ///
    /// # Errors
    ///
    /// Transport, API and decode errors.
    pub async fn modify_message(
        &self,
        thread_id: &str,
        message_id: &str,
        metadata: HashMap<String, String>,
    ) -> Result<Message, AssistantsRequestError> {
        let endpoint = self.endpoint(message_path(thread_id, message_id), HttpMethod::Post);
        self.api_request_with_body(endpoint, &ModifyMessageRequest { metadata })
            .await
    }

    /// Retrieve a file attached to a message.
    ///
    /// # Errors
    ///
    /// Transport, API and decode errors.
    pub async fn retrieve_message_file(
        &self,
        thread_id: &str,
        message_id: &str,
        file_id: &str,
    ) -> Result<MessageFile, AssistantsRequestError> {
        let path = format!("{}/files/{file_id}", message_path(thread_id, message_id));
        self.api_request(self.endpoint(path, HttpMethod::Get)).await
    }

    /// List the files attached to a message.
    ///
    /// # Errors
    ///
    /// Transport, API and decode errors.
    pub async fn list_message_files(
        &self,
        thread_id: &str,
        message_id: &str,
    ) -> Result<MessageFilesList, AssistantsRequestError> {
        let path = format!("{}/files", message_path(thread_id, message_id));
        self.api_request(self.endpoint(path, HttpMethod::Get)).await
    }

    /// Delete a message.
    ///
    /// # Errors
    ///
    /// Transport, API and decode errors.
    pub async fn delete_message(
        &self,
        thread_id: &str,
        message_id: &str,
    ) -> Result<MessageDeletionStatus, AssistantsRequestError> {
        let endpoint = self.endpoint(message_path(thread_id, message_id), HttpMethod::Delete);
        self.api_request(endpoint).await
    }
}
