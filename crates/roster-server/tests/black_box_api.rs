//! Black-box tests: a real listener on an ephemeral port, driven over HTTP.

use roster_config::AppConfig;
use roster_server::Application;
use serde_json::{json, Value};
use std::net::SocketAddr;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

struct Server {
    base: String,
    stop: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl Server {
    async fn start() -> Self {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0;
        config.database.url = "memory://".to_string();

        let app = Application::build(&config).await.unwrap();
        let addr: SocketAddr = app.local_addr().unwrap();
        let (stop, stopped) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            app.run_until(async {
                let _ = stopped.await;
            })
            .await
            .unwrap();
        });

        Self {
            base: format!("http://{addr}"),
            stop,
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn shutdown(self) {
        let _ = self.stop.send(());
        self.handle.await.unwrap();
    }
}

#[tokio::test]
async fn test_user_lifecycle_over_http() {
    let server = Server::start().await;
    let client = reqwest::Client::new();

    let response = client
        .post(server.url("/users"))
        .json(&json!({ "name": "Ada", "email": "ada@example.com", "password": "s3cret" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    let created: Value = response.json().await.unwrap();
    let id = created["user"]["id"].as_str().unwrap().to_string();
    assert!(created["user"].get("password").is_none());

    let listed: Value = client
        .get(server.url("/users"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed, json!({ "users": [created["user"].clone()] }));
    assert_eq!(listed["users"][0]["id"], id.as_str());
    assert_eq!(listed["users"][0]["name"], "Ada");
    assert_eq!(listed["users"][0]["email"], "ada@example.com");

    let response = client
        .put(server.url(&format!("/users/{id}")))
        .json(&json!({ "email": "ada@lovelace.dev" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["user"]["name"], "Ada");
    assert_eq!(updated["user"]["email"], "ada@lovelace.dev");

    let response = client
        .delete(server.url(&format!("/users/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = client
        .get(server.url(&format!("/users/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    assert!(response.bytes().await.unwrap().is_empty());

    server.shutdown().await;
}

#[tokio::test]
async fn test_invalid_create_over_http() {
    let server = Server::start().await;
    let client = reqwest::Client::new();

    let response = client
        .post(server.url("/users"))
        .json(&json!({ "email": "ada@example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("name"));

    let listed: Value = client
        .get(server.url("/users"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed, json!({ "users": [] }));

    server.shutdown().await;
}

#[tokio::test]
async fn test_readiness_over_http() {
    let server = Server::start().await;

    let response = reqwest::get(server.url("/ready")).await.unwrap();
    assert_eq!(response.status(), 200);

    server.shutdown().await;
}
