//! Integration tests for the server.

use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tasksync_auth::{IdentityProvider, JwtConfig, SessionVerifier};
use tasksync_client::{Client, ClientConfig};
use tasksync_fraud::SampledChecker;
use tasksync_sharing::{LinkIssuer, ShareLinkConfig};
use tasksync_store::MemoryTaskStore;
use tasksync_types::{TaskDraft, TaskListId, UserId};
use tasksync_wire::{
    AddTaskRequest, ErrorCode, HandshakeRequest, ListTasksRequest, Request, RequestId,
    RequestPayload, ResponsePayload, ShareListRequest, UpdateTaskRequest, PROTOCOL_VERSION,
};

use crate::{RequestHandler, Server, ServerConfig};

const TEST_SECRET: &str = "test-secret-key-that-is-long-enough";

/// Builds a handler over fresh collaborators plus a verifier for minting
/// session tokens.
fn test_handler(checker: SampledChecker) -> (RequestHandler, Arc<SessionVerifier>) {
    let store = Arc::new(MemoryTaskStore::new());
    let identity = Arc::new(SessionVerifier::new(JwtConfig::new(TEST_SECRET)));
    let issuer = LinkIssuer::new(
        identity.clone() as Arc<dyn IdentityProvider>,
        Arc::new(checker),
        ShareLinkConfig::default(),
    );

    (
        RequestHandler::new(store, identity.clone(), issuer),
        identity,
    )
}

fn session_for(verifier: &SessionVerifier, user: &str) -> String {
    verifier
        .create_session_token(&UserId::new(user))
        .expect("mint session token")
}

/// Finds an available port on localhost.
fn find_available_port() -> u16 {
    // Bind to port 0 to let OS assign an available port
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to port 0");
    listener
        .local_addr()
        .expect("Failed to get local addr")
        .port()
}

// ============================================================================
// Handler Tests
// ============================================================================

#[test]
fn handshake_accepts_matching_version() {
    let (handler, _) = test_handler(SampledChecker::always_clean());

    let response = handler.handle(Request::new(
        RequestId::new(1),
        None,
        RequestPayload::Handshake(HandshakeRequest {
            client_version: PROTOCOL_VERSION,
        }),
    ));

    match response.payload {
        ResponsePayload::Handshake(h) => assert_eq!(h.server_version, PROTOCOL_VERSION),
        other => panic!("unexpected payload: {other:?}"),
    }
}

#[test]
fn handshake_rejects_version_mismatch() {
    let (handler, _) = test_handler(SampledChecker::always_clean());

    let response = handler.handle(Request::new(
        RequestId::new(1),
        None,
        RequestPayload::Handshake(HandshakeRequest {
            client_version: PROTOCOL_VERSION + 1,
        }),
    ));

    match response.payload {
        ResponsePayload::Error(e) => assert_eq!(e.code, ErrorCode::InvalidRequest),
        other => panic!("unexpected payload: {other:?}"),
    }
}

#[test]
fn crud_flow_through_handler() {
    let (handler, verifier) = test_handler(SampledChecker::always_clean());
    let session = session_for(&verifier, "alice");

    // Add
    let response = handler.handle(Request::new(
        RequestId::new(1),
        Some(session.clone()),
        RequestPayload::AddTask(AddTaskRequest {
            draft: TaskDraft::new("Plan the launch"),
        }),
    ));
    let task = match response.payload {
        ResponsePayload::AddTask(r) => r.task,
        other => panic!("unexpected payload: {other:?}"),
    };

    // Update
    let response = handler.handle(Request::new(
        RequestId::new(2),
        Some(session.clone()),
        RequestPayload::UpdateTask(UpdateTaskRequest {
            id: task.id.clone(),
            patch: tasksync_types::TaskPatch::new().title("Plan the big launch"),
        }),
    ));
    match response.payload {
        ResponsePayload::UpdateTask(r) => assert_eq!(r.task.title, "Plan the big launch"),
        other => panic!("unexpected payload: {other:?}"),
    }

    // List
    let response = handler.handle(Request::new(
        RequestId::new(3),
        Some(session),
        RequestPayload::ListTasks(ListTasksRequest {}),
    ));
    match response.payload {
        ResponsePayload::ListTasks(r) => {
            assert_eq!(r.tasks.len(), 1);
            assert_eq!(r.tasks[0].title, "Plan the big launch");
        }
        other => panic!("unexpected payload: {other:?}"),
    }
}

#[test]
fn missing_credential_is_authentication_failure() {
    let (handler, _) = test_handler(SampledChecker::always_clean());

    let response = handler.handle(Request::new(
        RequestId::new(1),
        None,
        RequestPayload::ListTasks(ListTasksRequest {}),
    ));

    match response.payload {
        ResponsePayload::Error(e) => assert_eq!(e.code, ErrorCode::AuthenticationFailed),
        other => panic!("unexpected payload: {other:?}"),
    }
}

#[test]
fn short_title_is_validation_failure() {
    let (handler, verifier) = test_handler(SampledChecker::always_clean());
    let session = session_for(&verifier, "alice");

    let response = handler.handle(Request::new(
        RequestId::new(1),
        Some(session),
        RequestPayload::AddTask(AddTaskRequest {
            draft: TaskDraft::new("ab"),
        }),
    ));

    match response.payload {
        ResponsePayload::Error(e) => assert_eq!(e.code, ErrorCode::ValidationFailed),
        other => panic!("unexpected payload: {other:?}"),
    }
}

#[test]
fn foreign_task_update_is_permission_denied() {
    let (handler, verifier) = test_handler(SampledChecker::always_clean());
    let alice = session_for(&verifier, "alice");
    let bob = session_for(&verifier, "bob");

    let response = handler.handle(Request::new(
        RequestId::new(1),
        Some(alice),
        RequestPayload::AddTask(AddTaskRequest {
            draft: TaskDraft::new("Alice's task"),
        }),
    ));
    let task = match response.payload {
        ResponsePayload::AddTask(r) => r.task,
        other => panic!("unexpected payload: {other:?}"),
    };

    let response = handler.handle(Request::new(
        RequestId::new(2),
        Some(bob),
        RequestPayload::UpdateTask(UpdateTaskRequest {
            id: task.id,
            patch: tasksync_types::TaskPatch::new().title("Bob was here"),
        }),
    ));
    match response.payload {
        ResponsePayload::Error(e) => assert_eq!(e.code, ErrorCode::PermissionDenied),
        other => panic!("unexpected payload: {other:?}"),
    }
}

// ============================================================================
// Share Boundary Tests
// ============================================================================

fn share_string(handler: &RequestHandler, credential: Option<String>) -> String {
    let response = handler.handle(Request::new(
        RequestId::new(9),
        credential,
        RequestPayload::ShareList(ShareListRequest {
            task_list_id: TaskListId::new("list-42"),
        }),
    ));

    match response.payload {
        ResponsePayload::ShareList(r) => r.shareable_link,
        other => panic!("share must always answer with a share response: {other:?}"),
    }
}

#[test]
fn share_clean_verdict_returns_link() {
    let (handler, verifier) = test_handler(SampledChecker::always_clean());
    let session = session_for(&verifier, "u9");

    let link = share_string(&handler, Some(session));
    assert!(
        link.starts_with("tasksync.com/share/list-42/u9/"),
        "unexpected link: {link}"
    );
    let token = link.rsplit('/').next().unwrap();
    assert!(!token.is_empty());
}

#[test]
fn share_fraud_verdict_returns_fraudulent_sentinel() {
    let (handler, verifier) = test_handler(SampledChecker::always_fraudulent());
    let session = session_for(&verifier, "u9");

    assert_eq!(share_string(&handler, Some(session)), "FRAUDULENT");
}

#[test]
fn share_bad_credential_returns_error_sentinel() {
    let (handler, _) = test_handler(SampledChecker::always_clean());

    assert_eq!(share_string(&handler, None), "ERROR");
    assert_eq!(
        share_string(&handler, Some("garbage-token".to_string())),
        "ERROR"
    );
}

// ============================================================================
// Server Tests
// ============================================================================

#[test]
fn server_binds_to_address() {
    let port = find_available_port();
    let addr = format!("127.0.0.1:{port}")
        .parse::<SocketAddr>()
        .expect("Invalid addr");
    let (handler, _) = test_handler(SampledChecker::always_clean());

    let server = Server::new(ServerConfig::new(addr), handler).expect("Failed to create server");
    let local_addr = server.local_addr().expect("Failed to get local addr");

    assert_eq!(local_addr.port(), port);
    assert_eq!(server.connection_count(), 0);
}

#[test]
fn server_accepts_connection_and_serves_requests() {
    let port = find_available_port();
    let addr = format!("127.0.0.1:{port}")
        .parse::<SocketAddr>()
        .expect("Invalid addr");
    let (handler, verifier) = test_handler(SampledChecker::always_clean());
    let session = session_for(&verifier, "alice");

    let mut server =
        Server::new(ServerConfig::new(addr), handler).expect("Failed to create server");

    // Connect a client in a background thread
    let client_handle = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        let config = ClientConfig {
            credential: Some(session),
            read_timeout: Some(Duration::from_secs(2)),
            write_timeout: Some(Duration::from_secs(2)),
            ..Default::default()
        };
        let mut client = Client::connect(format!("127.0.0.1:{port}"), config).ok()?;

        let task = client.add_task(TaskDraft::new("Connect the client")).ok()?;
        let tasks = client.list_tasks().ok()?;
        Some((task, tasks))
    });

    // Poll the server to accept and process the connection
    for _ in 0..40 {
        let _ = server.poll_once(Some(Duration::from_millis(50)));
    }

    let result = client_handle.join().expect("Client thread panicked");
    let (task, tasks) = result.expect("client requests should succeed");
    assert_eq!(task.title, "Connect the client");
    assert_eq!(tasks.len(), 1);
}

#[test]
fn server_config_defaults() {
    let config = ServerConfig::default();

    assert_eq!(config.bind_addr.port(), 7450);
    assert_eq!(config.max_connections, 1024);
    assert_eq!(config.read_buffer_size, 64 * 1024);
    assert!(config.rate_limit.is_none());
}
