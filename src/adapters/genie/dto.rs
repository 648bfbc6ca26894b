//! Wire types for the Genie REST API.
//!
//! Every field is optional on the way in: Genie omits fields freely and the
//! mapping into domain types decides what is actually required.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::genie::{Attachment, ClientError, ConversationHandle, MessageState, QueryResult};

#[derive(Debug, Serialize)]
pub(crate) struct StartConversationRequest<'a> {
    pub content: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct StartConversationResponse {
    conversation: Option<IdRef>,
    message: Option<IdRef>,
}

#[derive(Debug, Default, Deserialize)]
struct IdRef {
    id: Option<String>,
}

impl StartConversationResponse {
    /// Extracts the handle; both ids must be present and non-empty.
    pub fn into_handle(self) -> Result<ConversationHandle, ClientError> {
        let conversation_id = non_empty(self.conversation.and_then(|c| c.id));
        let message_id = non_empty(self.message.and_then(|m| m.id));

        match (conversation_id, message_id) {
            (Some(conversation_id), Some(message_id)) => {
                Ok(ConversationHandle::new(conversation_id, message_id))
            }
            (None, _) => Err(ClientError::malformed("missing conversation.id")),
            (_, None) => Err(ClientError::malformed("missing message.id")),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GenieMessageResponse {
    status: Option<String>,
    content: Option<String>,
    attachments: Option<Vec<AttachmentDto>>,
    error: Option<Value>,
}

/// Attachment reference.
///
/// Genie has reported the identifier as both `attachment_id` and `id`;
/// `attachment_id` wins when both are present.
#[derive(Debug, Default, Deserialize)]
struct AttachmentDto {
    attachment_id: Option<String>,
    id: Option<String>,
}

impl AttachmentDto {
    fn into_attachment(self) -> Option<Attachment> {
        non_empty(self.attachment_id)
            .or_else(|| non_empty(self.id))
            .map(Attachment::new)
    }
}

impl GenieMessageResponse {
    /// Raw status string, for logging.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn into_state(self) -> MessageState {
        let attachments = self
            .attachments
            .unwrap_or_default()
            .into_iter()
            .filter_map(AttachmentDto::into_attachment)
            .collect();

        let error_message = self.error.and_then(|e| match e {
            Value::String(s) => Some(s),
            Value::Object(map) => map
                .get("message")
                .or_else(|| map.get("error"))
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        });

        MessageState::from_remote(
            self.status.as_deref(),
            self.content,
            attachments,
            error_message,
        )
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct QueryResultResponse {
    statement_response: Option<StatementResponse>,
}

#[derive(Debug, Default, Deserialize)]
struct StatementResponse {
    manifest: Option<Manifest>,
    result: Option<ResultData>,
}

#[derive(Debug, Default, Deserialize)]
struct Manifest {
    schema: Option<Schema>,
}

#[derive(Debug, Default, Deserialize)]
struct Schema {
    sql: Option<String>,
    columns: Option<Vec<ColumnDto>>,
}

#[derive(Debug, Default, Deserialize)]
struct ColumnDto {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ResultData {
    data_array: Option<Vec<Vec<Value>>>,
}

impl QueryResultResponse {
    /// Maps the statement response; a missing `statement_response` is malformed,
    /// while a missing manifest or result simply yields no columns or rows.
    pub fn into_query_result(self) -> Result<QueryResult, ClientError> {
        let statement = self
            .statement_response
            .ok_or_else(|| ClientError::malformed("missing statement_response"))?;

        let schema = statement.manifest.and_then(|m| m.schema).unwrap_or_default();
        let columns = schema
            .columns
            .unwrap_or_default()
            .into_iter()
            .map(|c| c.name.unwrap_or_default())
            .collect();
        let rows = statement
            .result
            .and_then(|r| r.data_array)
            .unwrap_or_default();

        Ok(QueryResult {
            columns,
            rows,
            sql: non_empty(schema.sql),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
