use axum::http::StatusCode;

use tally_core::{Company, PaginatedEnvelope, ValidationErrorBody};

use crate::test::setup_server;

#[tokio::test]
async fn create_accepts_urlencoded_form() {
    let (server, _dir) = setup_server();

    let response = server
        .post("/companies")
        .form(&[
            ("name", "Acme"),
            ("legal_name", "Acme Holdings S.L."),
            ("tax_id", "ES-B1234"),
            ("email", "billing@acme.example"),
            ("website", "https://acme.example"),
            ("is_active", "1"),
        ])
        .await;

    response.assert_status(StatusCode::CREATED);
    let company = response.json::<Company>();

    assert_eq!(company.name, "Acme");
    assert_eq!(company.legal_name.as_deref(), Some("Acme Holdings S.L."));
    assert!(company.is_active);
    assert!(company.deleted_at.is_none());
}

#[tokio::test]
async fn form_zero_means_inactive() {
    let (server, _dir) = setup_server();

    let response = server
        .post("/companies")
        .form(&[("name", "Dormant Co"), ("tax_id", "ES-B5678"), ("is_active", "0")])
        .await;

    response.assert_status(StatusCode::CREATED);
    assert!(!response.json::<Company>().is_active);
}

#[tokio::test]
async fn form_validation_errors_are_per_field() {
    let (server, _dir) = setup_server();

    let response = server
        .post("/companies")
        .form(&[
            ("name", "Acme"),
            ("tax_id", "ES-B1234"),
            ("email", "not-an-email"),
            ("website", "acme.example"),
        ])
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.json::<ValidationErrorBody>();

    assert!(body.errors.contains_key("email"));
    assert!(body.errors.contains_key("website"));
}

#[tokio::test]
async fn update_via_form_roundtrips() {
    let (server, _dir) = setup_server();

    let created = server
        .post("/companies")
        .form(&[("name", "Acme"), ("tax_id", "ES-B1234"), ("is_active", "1")])
        .await
        .json::<Company>();

    let response = server
        .put(&format!("/companies/{}", created.id))
        .form(&[("name", "Acme Renamed"), ("tax_id", "ES-B1234"), ("is_active", "0")])
        .await;

    response.assert_status_ok();
    let company = response.json::<Company>();
    assert_eq!(company.name, "Acme Renamed");
    assert!(!company.is_active);

    let envelope = server.get("/companies").await.json::<PaginatedEnvelope<Company>>();
    assert_eq!(envelope.total, 1);
    assert_eq!(envelope.data[0].name, "Acme Renamed");
}
