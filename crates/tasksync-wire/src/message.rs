//! Request and response message types for the wire protocol.
//!
//! Messages are serialized using bincode for efficient binary encoding.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tasksync_types::{Task, TaskDraft, TaskId, TaskListId, TaskPatch};

use crate::error::WireResult;
use crate::frame::Frame;
use crate::WireError;

/// Unique identifier for a request, used to match responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u64);

impl RequestId {
    /// Creates a new request ID.
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

// ============================================================================
// Request Types
// ============================================================================

/// A client request to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// Unique request identifier.
    pub id: RequestId,
    /// Caller credential (session token). Absent only for handshakes.
    pub credential: Option<String>,
    /// The request payload.
    pub payload: RequestPayload,
}

impl Request {
    /// Creates a new request.
    pub fn new(id: RequestId, credential: Option<String>, payload: RequestPayload) -> Self {
        Self {
            id,
            credential,
            payload,
        }
    }

    /// Encodes the request to a frame.
    pub fn to_frame(&self) -> WireResult<Frame> {
        let payload =
            bincode::serialize(self).map_err(|e| WireError::Serialization(e.to_string()))?;
        Ok(Frame::new(Bytes::from(payload)))
    }

    /// Decodes a request from a frame.
    pub fn from_frame(frame: &Frame) -> WireResult<Self> {
        bincode::deserialize(&frame.payload).map_err(WireError::from)
    }
}

/// Request payload variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RequestPayload {
    /// Handshake to establish connection.
    Handshake(HandshakeRequest),
    /// List the caller's tasks.
    ListTasks(ListTasksRequest),
    /// Create a task.
    AddTask(AddTaskRequest),
    /// Partially update a task.
    UpdateTask(UpdateTaskRequest),
    /// Delete a task.
    DeleteTask(DeleteTaskRequest),
    /// Generate a shareable invite link for a task list.
    ShareList(ShareListRequest),
}

/// Handshake request to establish connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandshakeRequest {
    /// Client protocol version.
    pub client_version: u16,
}

/// List tasks request. The owner is derived from the request credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTasksRequest {}

/// Add task request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTaskRequest {
    /// The task to create.
    pub draft: TaskDraft,
}

/// Update task request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    /// The task to update.
    pub id: TaskId,
    /// Fields to change.
    pub patch: TaskPatch,
}

/// Delete task request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteTaskRequest {
    /// The task to delete.
    pub id: TaskId,
}

/// Share list request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareListRequest {
    /// The list to share.
    pub task_list_id: TaskListId,
}

// ============================================================================
// Response Types
// ============================================================================

/// A server response to a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// The request this response answers.
    pub request_id: RequestId,
    /// The response payload.
    pub payload: ResponsePayload,
}

impl Response {
    /// Creates a new response.
    pub fn new(request_id: RequestId, payload: ResponsePayload) -> Self {
        Self {
            request_id,
            payload,
        }
    }

    /// Creates an error response.
    pub fn error(request_id: RequestId, code: ErrorCode, message: String) -> Self {
        Self {
            request_id,
            payload: ResponsePayload::Error(ErrorResponse { code, message }),
        }
    }

    /// Encodes the response to a frame.
    pub fn to_frame(&self) -> WireResult<Frame> {
        let payload =
            bincode::serialize(self).map_err(|e| WireError::Serialization(e.to_string()))?;
        Ok(Frame::new(Bytes::from(payload)))
    }

    /// Decodes a response from a frame.
    pub fn from_frame(frame: &Frame) -> WireResult<Self> {
        bincode::deserialize(&frame.payload).map_err(WireError::from)
    }
}

/// Response payload variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ResponsePayload {
    /// Handshake acknowledgement.
    Handshake(HandshakeResponse),
    /// The caller's tasks.
    ListTasks(ListTasksResponse),
    /// The created task.
    AddTask(AddTaskResponse),
    /// The updated task.
    UpdateTask(UpdateTaskResponse),
    /// Deletion acknowledgement.
    DeleteTask(DeleteTaskResponse),
    /// Share link result.
    ShareList(ShareListResponse),
    /// Error response.
    Error(ErrorResponse),
}

/// Handshake response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandshakeResponse {
    /// Server protocol version.
    pub server_version: u16,
}

/// List tasks response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTasksResponse {
    /// The caller's tasks, completed last.
    pub tasks: Vec<Task>,
}

/// Add task response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTaskResponse {
    /// The stored task, with its assigned id.
    pub task: Task,
}

/// Update task response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTaskResponse {
    /// The task after the patch was applied.
    pub task: Task,
}

/// Delete task response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteTaskResponse {
    /// Whether the task was deleted.
    pub success: bool,
}

/// Share list response.
///
/// `shareable_link` is one of exactly three shapes: a real link
/// (`<domain>/share/<list>/<user>/<token>`), the literal `"FRAUDULENT"`,
/// or the literal `"ERROR"`. Callers branch on the sentinels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareListResponse {
    /// The link or a sentinel.
    pub shareable_link: String,
}

/// Error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
}

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Malformed or unsupported request.
    InvalidRequest,
    /// Credential missing, invalid, or expired.
    AuthenticationFailed,
    /// Task does not exist.
    TaskNotFound,
    /// Task belongs to a different user.
    PermissionDenied,
    /// Task data failed validation.
    ValidationFailed,
    /// Too many requests on this connection.
    RateLimited,
    /// Unexpected server-side failure.
    InternalError,
}
