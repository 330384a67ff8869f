//! Concurrent API operation tests
//! Many callers against one server: sessions stay independent and
//! ownership checks hold under racing mutations

use blogpad::api::serve;
use blogpad::config::Config;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Helper to start server
async fn start_test_server() -> String {
    let mut config = Config::default();
    config.auth.bcrypt_cost = 4;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = serve(listener, config).await;
    });
    format!("http://{}", addr)
}

async fn sign_in(client: &Client, base: &str, email: &str) -> (String, String) {
    client
        .post(format!("{}/api/auth/register", base))
        .json(&json!({"email": email, "password": "secret1", "name": email}))
        .send()
        .await
        .unwrap();
    let response = client
        .post(format!("{}/api/auth/login", base))
        .json(&json!({"email": email, "password": "secret1"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.headers()["set-cookie"]
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();
    let body: Value = response.json().await.unwrap();
    (cookie, body["_id"].as_str().unwrap().to_string())
}

#[tokio::test]
async fn test_concurrent_logins_get_distinct_sessions() {
    let base = start_test_server().await;
    let client = Client::new();

    let mut handles = vec![];
    for i in 0..10 {
        let client = client.clone();
        let base = base.clone();
        handles.push(tokio::spawn(async move {
            let email = format!("user{}@x.com", i);
            let (cookie, _) = sign_in(&client, &base, &email).await;
            let me: Value = client
                .get(format!("{}/api/auth/user", base))
                .header("Cookie", &cookie)
                .send()
                .await
                .unwrap()
                .json()
                .await
                .unwrap();
            assert_eq!(me["email"], email.as_str());
            cookie
        }));
    }

    let mut cookies = Vec::new();
    for handle in handles {
        cookies.push(handle.await.unwrap());
    }
    cookies.sort();
    cookies.dedup();
    assert_eq!(cookies.len(), 10);
}

#[tokio::test]
async fn test_racing_deletes_apply_once() {
    let base = start_test_server().await;
    let client = Client::new();
    let (alice, _) = sign_in(&client, &base, "a@x.com").await;
    let (bob, _) = sign_in(&client, &base, "b@x.com").await;

    let response = client
        .post(format!("{}/api/blogs", base))
        .header("Cookie", &alice)
        .json(&json!({"title": "Contested blog post", "content": "x"}))
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    let blog_id = body["_id"].as_str().unwrap().to_string();

    let mut handles = vec![];
    for cookie in [&alice, &bob, &alice, &bob, &alice] {
        let client = client.clone();
        let url = format!("{}/api/blogs/{}", base, blog_id);
        let cookie = cookie.clone();
        handles.push(tokio::spawn(async move {
            client
                .delete(url)
                .header("Cookie", cookie)
                .send()
                .await
                .unwrap()
                .status()
        }));
    }

    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.unwrap());
    }

    let deleted = statuses.iter().filter(|s| **s == StatusCode::OK).count();
    assert_eq!(deleted, 1);
    assert!(statuses
        .iter()
        .all(|s| [StatusCode::OK, StatusCode::FORBIDDEN, StatusCode::NOT_FOUND].contains(s)));
}
