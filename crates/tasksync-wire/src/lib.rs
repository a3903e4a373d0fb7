//! # tasksync-wire: Binary wire protocol for `TaskSync`
//!
//! Defines the framed binary protocol spoken between the client and the
//! server: a fixed-size header (magic, version, length, CRC32) followed by
//! a bincode-encoded message.

mod error;
mod frame;
mod message;

#[cfg(test)]
mod tests;

pub use error::{WireError, WireResult};
pub use frame::{Frame, FrameHeader, FRAME_HEADER_SIZE, MAGIC, MAX_PAYLOAD_SIZE, PROTOCOL_VERSION};
pub use message::{
    AddTaskRequest, AddTaskResponse, DeleteTaskRequest, DeleteTaskResponse, ErrorCode,
    ErrorResponse, HandshakeRequest, HandshakeResponse, ListTasksRequest, ListTasksResponse,
    Request, RequestId, RequestPayload, Response, ResponsePayload, ShareListRequest,
    ShareListResponse, UpdateTaskRequest, UpdateTaskResponse,
};
