//! API integration tests
//!
//! These run against a live server with a seeded admin account.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to get an authenticated admin token
async fn get_admin_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": "admin@motorent.es",
            "password": "admin123"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Helper to create a model and return its id
async fn create_test_model(client: &Client, token: &str) -> i64 {
    let response = client
        .post(format!("{}/models", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "brand": "Honda",
            "name": "CB125R",
            "displacement": "125cc",
            "price_per_day": "35.00"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No model ID")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": "admin@motorent.es",
            "password": "admin123"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["role"], "ADMIN");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": "admin@motorent.es",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_get_current_user() {
    let client = Client::new();
    let token = get_admin_token(&client).await;

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["email"], "admin@motorent.es");
}

#[tokio::test]
#[ignore]
async fn test_list_models() {
    let client = Client::new();
    let token = get_admin_token(&client).await;

    let response = client
        .get(format!("{}/models", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_array());
}

#[tokio::test]
#[ignore]
async fn test_soft_deleted_model_leaves_default_listing() {
    let client = Client::new();
    let token = get_admin_token(&client).await;

    let model_id = create_test_model(&client, &token).await;

    // Soft-delete it
    let response = client
        .delete(format!("{}/models/{}", BASE_URL, model_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    // Gone from the default listing
    let response = client
        .get(format!("{}/models", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    let listed = body
        .as_array()
        .unwrap()
        .iter()
        .any(|m| m["id"].as_i64() == Some(model_id));
    assert!(!listed);

    // But still resolvable by id
    let response = client
        .get(format!("{}/models/{}", BASE_URL, model_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_reservation_lifecycle() {
    let client = Client::new();
    let token = get_admin_token(&client).await;

    let model_id = create_test_model(&client, &token).await;

    // Create: 4 rental days at 35.00/day
    let response = client
        .post(format!("{}/reservations", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "model_id": model_id,
            "start_date": "2026-03-01",
            "end_date": "2026-03-05"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let reservation_id = body["id"].as_i64().expect("No reservation ID");
    assert_eq!(body["status"], "PREPARADA");
    assert_eq!(body["lines"][0]["days"], 4);
    assert_eq!(body["total"], "140.00");
    assert!(body["code"].as_str().unwrap().starts_with('R'));

    // Admin transition to ENTREGADA
    let response = client
        .put(format!("{}/reservations/{}/status", BASE_URL, reservation_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "status": "ENTREGADA" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ENTREGADA");

    // Re-selecting the same status is a no-op, not an error
    let response = client
        .put(format!("{}/reservations/{}/status", BASE_URL, reservation_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "status": "ENTREGADA" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // Dates are frozen once the reservation left PREPARADA
    let response = client
        .put(format!("{}/reservations/{}/dates", BASE_URL, reservation_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "start_date": "2026-03-02",
            "end_date": "2026-03-06"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);
}

#[tokio::test]
#[ignore]
async fn test_reversed_date_range_is_rejected() {
    let client = Client::new();
    let token = get_admin_token(&client).await;

    let model_id = create_test_model(&client, &token).await;

    let response = client
        .post(format!("{}/reservations", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "model_id": model_id,
            "start_date": "2026-03-05",
            "end_date": "2026-03-01"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_normal_user_cannot_manage_catalog() {
    let client = Client::new();

    // Fresh NORMAL account
    let response = client
        .post(format!("{}/auth/signup", BASE_URL))
        .json(&json!({
            "email": "rider@example.com",
            "password": "secret123",
            "display_name": "Rider"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status() == 201 || response.status() == 409);

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": "rider@example.com",
            "password": "secret123"
        }))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    let token = body["token"].as_str().expect("No token").to_string();

    let response = client
        .post(format!("{}/models", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "brand": "Yamaha",
            "name": "MT-07",
            "price_per_day": "55.00"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    let response = client
        .get(format!("{}/clients", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_clients_crud() {
    let client = Client::new();
    let token = get_admin_token(&client).await;

    let response = client
        .post(format!("{}/clients", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": "Marta",
            "surname": "Ruiz",
            "email": "marta.ruiz@example.com",
            "phone": "600123123"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let client_id = body["id"].as_i64().expect("No client ID");

    let response = client
        .put(format!("{}/clients/{}", BASE_URL, client_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "phone": "600999999" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .delete(format!("{}/clients/{}", BASE_URL, client_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_preferences_round_trip() {
    let client = Client::new();
    let token = get_admin_token(&client).await;

    let response = client
        .put(format!("{}/preferences", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "theme": "dark",
            "favorite_model_ids": [1, 2]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/preferences", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["theme"], "dark");
    assert_eq!(body["favorite_model_ids"], json!([1, 2]));
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/reservations", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}
