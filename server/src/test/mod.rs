#![allow(clippy::unwrap_used)]

use axum_test::TestServer;
use tempfile::TempDir;

use crate::db::open_db;
use crate::router::setup_router;
use crate::state::AppState;

mod company;

/// Spin up the full router over a fresh temp database.
pub fn setup_server() -> (TestServer, TempDir) {
    let dir = TempDir::new().unwrap();
    let conn = open_db(&dir.path().join("test.db")).unwrap();
    let server = TestServer::new(setup_router(AppState::new(conn))).unwrap();
    (server, dir)
}

#[tokio::test]
async fn health_ping_ok() {
    let (server, _dir) = setup_server();

    let response = server.get("/health/ping").await;

    response.assert_status_ok();
}
