//! RPC client for `TaskSync`.

use std::io::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use bytes::BytesMut;
use tasksync_types::{Task, TaskDraft, TaskId, TaskListId, TaskPatch};
use tasksync_wire::{
    AddTaskRequest, DeleteTaskRequest, Frame, HandshakeRequest, ListTasksRequest, Request,
    RequestId, RequestPayload, Response, ResponsePayload, ShareListRequest, UpdateTaskRequest,
    PROTOCOL_VERSION,
};

use crate::error::{ClientError, ClientResult};

/// Configuration for the client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Read timeout.
    pub read_timeout: Option<Duration>,
    /// Write timeout.
    pub write_timeout: Option<Duration>,
    /// Buffer size for reads.
    pub buffer_size: usize,
    /// Session credential sent with every request.
    pub credential: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            read_timeout: Some(Duration::from_secs(30)),
            write_timeout: Some(Duration::from_secs(30)),
            buffer_size: 64 * 1024,
            credential: None,
        }
    }
}

/// RPC client for `TaskSync`.
///
/// This client uses synchronous I/O to communicate with a `TaskSync`
/// server using the binary wire protocol.
///
/// # Example
///
/// ```ignore
/// use tasksync_client::{Client, ClientConfig};
/// use tasksync_types::TaskDraft;
///
/// let config = ClientConfig {
///     credential: Some(session_token),
///     ..Default::default()
/// };
/// let mut client = Client::connect("127.0.0.1:7450", config)?;
///
/// let task = client.add_task(TaskDraft::new("Water the plants"))?;
/// let share = client.share_default_list()?;
/// ```
pub struct Client {
    stream: TcpStream,
    next_request_id: u64,
    read_buf: BytesMut,
    config: ClientConfig,
}

impl Client {
    /// Connects to a `TaskSync` server.
    pub fn connect(addr: impl ToSocketAddrs, config: ClientConfig) -> ClientResult<Self> {
        let stream = TcpStream::connect(addr)?;
        stream.set_read_timeout(config.read_timeout)?;
        stream.set_write_timeout(config.write_timeout)?;

        let mut client = Self {
            stream,
            next_request_id: 1,
            read_buf: BytesMut::with_capacity(config.buffer_size),
            config,
        };

        // Perform handshake
        client.handshake()?;

        Ok(client)
    }

    /// Performs the handshake with the server.
    fn handshake(&mut self) -> ClientResult<()> {
        let response = self.send_request(RequestPayload::Handshake(HandshakeRequest {
            client_version: PROTOCOL_VERSION,
        }))?;

        match response.payload {
            ResponsePayload::Handshake(h) => {
                if h.server_version != PROTOCOL_VERSION {
                    return Err(ClientError::HandshakeFailed(format!(
                        "protocol version mismatch: client {}, server {}",
                        PROTOCOL_VERSION, h.server_version
                    )));
                }
                Ok(())
            }
            ResponsePayload::Error(e) => Err(ClientError::server(e.code, e.message)),
            _ => Err(ClientError::UnexpectedResponse {
                expected: "Handshake".to_string(),
                actual: format!("{:?}", response.payload),
            }),
        }
    }

    /// Lists the caller's tasks, completed tasks last.
    pub fn list_tasks(&mut self) -> ClientResult<Vec<Task>> {
        let response = self.send_request(RequestPayload::ListTasks(ListTasksRequest {}))?;

        match response.payload {
            ResponsePayload::ListTasks(r) => Ok(r.tasks),
            ResponsePayload::Error(e) => Err(ClientError::server(e.code, e.message)),
            _ => Err(ClientError::UnexpectedResponse {
                expected: "ListTasks".to_string(),
                actual: format!("{:?}", response.payload),
            }),
        }
    }

    /// Creates a task and returns it with its assigned id.
    pub fn add_task(&mut self, draft: TaskDraft) -> ClientResult<Task> {
        let response = self.send_request(RequestPayload::AddTask(AddTaskRequest { draft }))?;

        match response.payload {
            ResponsePayload::AddTask(r) => Ok(r.task),
            ResponsePayload::Error(e) => Err(ClientError::server(e.code, e.message)),
            _ => Err(ClientError::UnexpectedResponse {
                expected: "AddTask".to_string(),
                actual: format!("{:?}", response.payload),
            }),
        }
    }

    /// Applies a partial update to a task.
    pub fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> ClientResult<Task> {
        let response =
            self.send_request(RequestPayload::UpdateTask(UpdateTaskRequest { id, patch }))?;

        match response.payload {
            ResponsePayload::UpdateTask(r) => Ok(r.task),
            ResponsePayload::Error(e) => Err(ClientError::server(e.code, e.message)),
            _ => Err(ClientError::UnexpectedResponse {
                expected: "UpdateTask".to_string(),
                actual: format!("{:?}", response.payload),
            }),
        }
    }

    /// Deletes a task.
    pub fn delete_task(&mut self, id: TaskId) -> ClientResult<()> {
        let response = self.send_request(RequestPayload::DeleteTask(DeleteTaskRequest { id }))?;

        match response.payload {
            ResponsePayload::DeleteTask(_) => Ok(()),
            ResponsePayload::Error(e) => Err(ClientError::server(e.code, e.message)),
            _ => Err(ClientError::UnexpectedResponse {
                expected: "DeleteTask".to_string(),
                actual: format!("{:?}", response.payload),
            }),
        }
    }

    /// Requests a shareable invite link for a task list.
    ///
    /// The returned string is either a real link or one of the sentinels
    /// `"FRAUDULENT"` / `"ERROR"`.
    pub fn share_list(&mut self, task_list_id: TaskListId) -> ClientResult<String> {
        let response =
            self.send_request(RequestPayload::ShareList(ShareListRequest { task_list_id }))?;

        match response.payload {
            ResponsePayload::ShareList(r) => Ok(r.shareable_link),
            ResponsePayload::Error(e) => Err(ClientError::server(e.code, e.message)),
            _ => Err(ClientError::UnexpectedResponse {
                expected: "ShareList".to_string(),
                actual: format!("{:?}", response.payload),
            }),
        }
    }

    /// Requests a shareable link for the board's implicit default list.
    pub fn share_default_list(&mut self) -> ClientResult<String> {
        self.share_list(TaskListId::default_list())
    }

    /// Sends a request and waits for the response.
    fn send_request(&mut self, payload: RequestPayload) -> ClientResult<Response> {
        let request_id = RequestId::new(self.next_request_id);
        self.next_request_id += 1;

        let credential = match payload {
            RequestPayload::Handshake(_) => None,
            _ => self.config.credential.clone(),
        };
        let request = Request::new(request_id, credential, payload);

        // Encode and send the request
        let frame = request.to_frame()?;
        let mut write_buf = BytesMut::new();
        frame.encode(&mut write_buf);
        self.stream.write_all(&write_buf)?;
        self.stream.flush()?;

        // Read the response
        let response = self.read_response()?;

        // Verify request ID matches
        if response.request_id.0 != request_id.0 {
            return Err(ClientError::ResponseMismatch {
                expected: request_id.0,
                received: response.request_id.0,
            });
        }

        Ok(response)
    }

    /// Reads a response from the server.
    fn read_response(&mut self) -> ClientResult<Response> {
        loop {
            // Try to decode a frame from the buffer
            if let Some(frame) = Frame::decode(&mut self.read_buf)? {
                let response = Response::from_frame(&frame)?;
                return Ok(response);
            }

            // Need more data - read from socket
            let mut temp_buf = [0u8; 4096];
            let n = self.stream.read(&mut temp_buf)?;
            if n == 0 {
                return Err(ClientError::Connection(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "server closed connection",
                )));
            }
            self.read_buf.extend_from_slice(&temp_buf[..n]);

            // Check for buffer overflow (simple DoS protection)
            if self.read_buf.len() > self.config.buffer_size * 2 {
                return Err(ClientError::Connection(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "response too large",
                )));
            }
        }
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("next_request_id", &self.next_request_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_defaults() {
        let config = ClientConfig::default();

        assert_eq!(config.read_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.write_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.buffer_size, 64 * 1024);
        assert!(config.credential.is_none());
    }
}
