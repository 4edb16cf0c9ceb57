//! API integration tests against a running server
//!
//! These share one database and empty the catalog, so run them serially:
//! `cargo test --test integration -- --ignored --test-threads=1`

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1/books";

async fn reset(client: &Client) {
    let response = client
        .delete(BASE_URL)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

async fn create(client: &Client, name: &str, author: &str, price: f64) -> i64 {
    let response = client
        .post(BASE_URL)
        .json(&json!({ "name": name, "author": author, "price": price }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    body["data"]["id"].as_i64().expect("No book ID")
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
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], "OK");
}

#[tokio::test]
#[ignore]
async fn test_book_lifecycle() {
    let client = Client::new();
    reset(&client).await;

    let response = client
        .post(BASE_URL)
        .json(&json!({ "id": 999, "name": "Dune", "author": "Herbert", "price": 19.99 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let id = body["data"]["id"].as_i64().expect("No book ID");
    assert_ne!(id, 999);

    let response = client
        .get(format!("{}/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["name"], "Dune");
    assert_eq!(body["data"]["author"], "Herbert");
    assert_eq!(body["data"]["price"], json!(19.99));

    let response = client
        .put(format!("{}/{}", BASE_URL, id))
        .json(&json!({ "price": 9.99 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["name"], "Dune");
    assert_eq!(body["data"]["author"], "Herbert");
    assert_eq!(body["data"]["price"], json!(9.99));

    let response = client
        .delete(format!("{}/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let response = client
        .get(format!("{}/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_create_is_rejected() {
    let client = Client::new();
    reset(&client).await;
    create(&client, "Emma", "Austen", 8.5).await;

    let response = client
        .post(BASE_URL)
        .json(&json!({ "name": "Emma", "author": "Austen", "price": 10 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    let body: Value = client
        .get(BASE_URL)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
#[ignore]
async fn test_search_matches_name_or_author() {
    let client = Client::new();
    reset(&client).await;
    create(&client, "Authority", "Someone", 10.0).await;
    create(&client, "Dune", "AUTHor Unknown", 11.0).await;
    create(&client, "Emma", "Austen", 12.0).await;

    let body: Value = client
        .get(format!("{}/search", BASE_URL))
        .query(&[("keyword", "auth")])
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let response = client
        .get(format!("{}/search", BASE_URL))
        .query(&[("keyword", "   ")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_pagination() {
    let client = Client::new();
    reset(&client).await;
    for n in 1..=5 {
        create(&client, &format!("Book {}", n), "Author", n as f64).await;
    }

    let body: Value = client
        .get(format!("{}/paginated?page=0&size=2", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["data"]["content"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["totalElements"], 5);

    let body: Value = client
        .get(format!("{}/paginated?size=5&sortBy=id&sortDir=desc", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let ids: Vec<i64> = body["data"]["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_i64().unwrap())
        .collect();
    assert!(ids.windows(2).all(|w| w[0] > w[1]));
}

#[tokio::test]
#[ignore]
async fn test_delete_all_empties_catalog() {
    let client = Client::new();
    create(&client, "Temporary", "Nobody", 1.0).await;
    reset(&client).await;

    let body: Value = client
        .get(BASE_URL)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert!(body["data"].as_array().unwrap().is_empty());
}
