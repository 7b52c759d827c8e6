use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use once_cell::sync::Lazy;
use reqwest::{Client, Method, Response};
use secrecy::ExposeSecret;
use serde_json::{json, Value};
use std::net::TcpListener;
use std::sync::Arc;
use uuid::Uuid;

use healthdesk_backend::config::settings::get_config;
use healthdesk_backend::db::{MemoryStore, SharedStore, Store};
use healthdesk_backend::run;
use healthdesk_backend::telemetry::{get_subscriber, init_subscriber};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub store: Arc<MemoryStore>,
    pub client: Client,
    jwt_secret: String,
    jwt_audience: String,
}

pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let configuration = get_config().expect("Failed to read configuration.");
    let jwt_settings = configuration.jwt;
    let jwt_secret = jwt_settings.secret.expose_secret().to_string();
    let jwt_audience = jwt_settings.audience.clone();

    // Every test gets its own seeded store, so tests never see each other's writes
    let store = Arc::new(MemoryStore::seeded());
    let shared: SharedStore = store.clone();

    let server = run(listener, shared, jwt_settings, vec![])
        .expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address,
        store,
        client: Client::new(),
        jwt_secret,
        jwt_audience,
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Token shaped like the ones the hosted auth service issues.
    pub fn token_for(&self, user_id: Uuid) -> String {
        let claims = json!({
            "sub": user_id.to_string(),
            "email": format!("{}@example.com", user_id),
            "role": "authenticated",
            "aud": self.jwt_audience,
            "exp": (Utc::now() + Duration::hours(1)).timestamp(),
        });
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .expect("Failed to sign test token")
    }

    pub fn signed_token(&self, claims: &Value, secret: &str) -> String {
        encode(&Header::default(), claims, &EncodingKey::from_secret(secret.as_bytes()))
            .expect("Failed to sign test token")
    }

    /// A fresh user and a valid token for them.
    pub fn new_user(&self) -> (Uuid, String) {
        let user_id = Uuid::new_v4();
        (user_id, self.token_for(user_id))
    }

    /// A fresh user with a row in `admin_users`.
    pub async fn new_admin(&self) -> (Uuid, String) {
        let (user_id, token) = self.new_user();
        self.store
            .insert_admin_user(user_id)
            .await
            .expect("Failed to grant admin");
        (user_id, token)
    }
}

pub async fn make_authenticated_request(
    client: &Client,
    method: Method,
    url: &str,
    token: &str,
    body: Option<Value>,
) -> Response {
    let mut request = client
        .request(method, url)
        .header("Authorization", format!("Bearer {}", token));
    if let Some(body) = body {
        request = request.json(&body);
    }
    request.send().await.expect("Failed to execute request.")
}

pub async fn json_body(response: Response) -> Value {
    response.json().await.expect("Failed to parse response body")
}
