use convert_service::config::ServiceConfig;
use convert_service::startup::Application;

/// Origin configured as allowed for every test app.
pub const TEST_ORIGIN: &str = "https://converter.test";

pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    pub async fn spawn_with(customize: impl FnOnce(&mut ServiceConfig)) -> Self {
        let mut config = ServiceConfig::load().expect("Failed to load configuration");
        config.common.port = 0; // Random port for testing
        config.upload.allowed_origin = TEST_ORIGIN.to_string();
        customize(&mut config);

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address, port }
    }
}

/// Build a multipart part carrying RTF content under the given filename.
#[allow(dead_code)]
pub fn rtf_part(filename: &str, content: &[u8]) -> reqwest::multipart::Part {
    reqwest::multipart::Part::bytes(content.to_vec())
        .file_name(filename.to_string())
        .mime_str("application/rtf")
        .unwrap()
}
