use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests
        // Assumes debug profile; adjust if you run tests with --release
        let mut cmd = Command::new("target/debug/agrosense-api");
        cmd.env("AGROSENSE_PORT", port.to_string())
            .env("JWT_SECRET", TEST_JWT_SECRET)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Inherit environment so the server can see DATABASE_URL from .env
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self {
            port,
            base_url,
            child,
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                // Consider server ready on any health response
                if resp.status() == StatusCode::OK
                    || resp.status() == StatusCode::SERVICE_UNAVAILABLE
                {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// True when the spawned server reports a healthy database. CRUD suites
/// skip themselves when this is false so they can run without Postgres.
pub async fn database_ready(server: &TestServer) -> Result<bool> {
    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/health", server.base_url))
        .send()
        .await?;
    Ok(res.status() == StatusCode::OK)
}

/// An email address unlikely to collide across test runs.
pub fn unique_email(tag: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("{}+{}@example.com", tag, nanos)
}

/// Register a fresh account and log it in, returning a bearer token.
pub async fn register_and_login(
    client: &reqwest::Client,
    base_url: &str,
    tag: &str,
) -> Result<String> {
    let email = unique_email(tag);

    let res = client
        .post(format!("{}/auth/register", base_url))
        .json(&json!({ "name": tag, "email": email, "password": "p4ssword" }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::CREATED,
        "registration failed: {}",
        res.status()
    );

    let res = client
        .post(format!("{}/auth/login", base_url))
        .json(&json!({ "email": email, "password": "p4ssword" }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());

    let body = res.json::<Value>().await?;
    let token = body["data"]["token"]
        .as_str()
        .context("login response missing token")?
        .to_string();
    Ok(token)
}

/// Create a sensor for the given token, returning its id.
pub async fn create_sensor(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
    name: &str,
) -> Result<i64> {
    let res = client
        .post(format!("{}/sensors", base_url))
        .bearer_auth(token)
        .json(&json!({ "sensorName": name, "location": "Field1" }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::CREATED,
        "sensor creation failed: {}",
        res.status()
    );

    let body = res.json::<Value>().await?;
    body["data"]["sensorId"]
        .as_i64()
        .context("sensor response missing sensorId")
}
