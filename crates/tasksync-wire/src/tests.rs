//! Unit tests for the wire protocol.

use bytes::{BufMut, Bytes, BytesMut};
use tasksync_types::{TaskDraft, TaskListId, TaskStatus};

use crate::{
    ErrorCode, Frame, HandshakeRequest, Request, RequestId, RequestPayload, Response,
    ResponsePayload, ShareListRequest, ShareListResponse, WireError, FRAME_HEADER_SIZE, MAGIC,
    PROTOCOL_VERSION,
};

// ============================================================================
// Frame Tests
// ============================================================================

#[test]
fn frame_roundtrip() {
    let payload = Bytes::from("hello, world!");
    let frame = Frame::new(payload.clone());

    let encoded = frame.encode_to_bytes();
    assert_eq!(encoded.len(), FRAME_HEADER_SIZE + payload.len());

    let mut buf = BytesMut::from(&encoded[..]);
    let decoded = Frame::decode(&mut buf).unwrap().unwrap();

    assert_eq!(decoded.payload, payload);
    assert!(buf.is_empty());
}

#[test]
fn incomplete_header_needs_more_bytes() {
    let mut buf = BytesMut::from(&[0u8; 5][..]);
    assert!(Frame::decode(&mut buf).unwrap().is_none());
}

#[test]
fn incomplete_payload_needs_more_bytes() {
    let frame = Frame::new(Bytes::from("test"));
    let encoded = frame.encode_to_bytes();

    let mut buf = BytesMut::from(&encoded[..FRAME_HEADER_SIZE + 2]);
    assert!(Frame::decode(&mut buf).unwrap().is_none());
}

#[test]
fn invalid_magic_rejected() {
    let mut buf = BytesMut::new();
    buf.put_u32(0xDEADBEEF); // Wrong magic
    buf.put_u16(PROTOCOL_VERSION);
    buf.put_u32(4);
    buf.put_u32(0);
    buf.put_slice(b"test");

    let result = Frame::decode(&mut buf);
    assert!(matches!(result, Err(WireError::InvalidMagic(0xDEADBEEF))));
}

#[test]
fn checksum_mismatch_rejected() {
    let mut buf = BytesMut::new();
    buf.put_u32(MAGIC);
    buf.put_u16(PROTOCOL_VERSION);
    buf.put_u32(4);
    buf.put_u32(0xBADBAD); // Wrong checksum
    buf.put_slice(b"test");

    let result = Frame::decode(&mut buf);
    assert!(matches!(result, Err(WireError::ChecksumMismatch { .. })));
}

#[test]
fn header_constants() {
    assert_eq!(MAGIC, 0x5453_4B20);
    assert_eq!(FRAME_HEADER_SIZE, 14);
}

// ============================================================================
// Message Tests
// ============================================================================

#[test]
fn request_roundtrip_through_frame() {
    let request = Request::new(
        RequestId::new(7),
        Some("session-token".to_string()),
        RequestPayload::AddTask(crate::AddTaskRequest {
            draft: TaskDraft::new("Write the report").with_status(TaskStatus::InProgress),
        }),
    );

    let frame = request.to_frame().unwrap();
    let decoded = Request::from_frame(&frame).unwrap();

    assert_eq!(decoded.id, RequestId::new(7));
    assert_eq!(decoded.credential.as_deref(), Some("session-token"));
    match decoded.payload {
        RequestPayload::AddTask(req) => {
            assert_eq!(req.draft.title, "Write the report");
            assert_eq!(req.draft.status, TaskStatus::InProgress);
        }
        other => panic!("unexpected payload: {other:?}"),
    }
}

#[test]
fn handshake_carries_no_credential() {
    let request = Request::new(
        RequestId::new(1),
        None,
        RequestPayload::Handshake(HandshakeRequest {
            client_version: PROTOCOL_VERSION,
        }),
    );

    let frame = request.to_frame().unwrap();
    let decoded = Request::from_frame(&frame).unwrap();
    assert!(decoded.credential.is_none());
}

#[test]
fn share_response_roundtrip() {
    let response = Response::new(
        RequestId::new(3),
        ResponsePayload::ShareList(ShareListResponse {
            shareable_link: "tasksync.com/share/list-42/u9/abc".to_string(),
        }),
    );

    let frame = response.to_frame().unwrap();
    let decoded = Response::from_frame(&frame).unwrap();

    assert_eq!(decoded.request_id, RequestId::new(3));
    match decoded.payload {
        ResponsePayload::ShareList(r) => {
            assert_eq!(r.shareable_link, "tasksync.com/share/list-42/u9/abc");
        }
        other => panic!("unexpected payload: {other:?}"),
    }
}

#[test]
fn share_request_names_the_list() {
    let request = Request::new(
        RequestId::new(9),
        Some("token".to_string()),
        RequestPayload::ShareList(ShareListRequest {
            task_list_id: TaskListId::default_list(),
        }),
    );

    let frame = request.to_frame().unwrap();
    let decoded = Request::from_frame(&frame).unwrap();
    match decoded.payload {
        RequestPayload::ShareList(r) => {
            assert_eq!(r.task_list_id.as_str(), "default-list");
        }
        other => panic!("unexpected payload: {other:?}"),
    }
}

#[test]
fn error_response_carries_code_and_message() {
    let response = Response::error(
        RequestId::new(4),
        ErrorCode::PermissionDenied,
        "user does not have permission to modify task task-1".to_string(),
    );

    let frame = response.to_frame().unwrap();
    let decoded = Response::from_frame(&frame).unwrap();
    match decoded.payload {
        ResponsePayload::Error(e) => {
            assert_eq!(e.code, ErrorCode::PermissionDenied);
            assert!(e.message.contains("task-1"));
        }
        other => panic!("unexpected payload: {other:?}"),
    }
}
