use axum_test::TestServer;
use sqlx::{MySql, Pool};
use storefront_api::config::environment::{Config, RunMode};

// Allow dead_code for utilities used by other test files
#[allow(dead_code)]
pub struct TestContext {
    pub server: TestServer,
    pub db: Pool<MySql>,
}

#[allow(dead_code)]
impl TestContext {
    pub async fn new() -> Self {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("TEST_DATABASE_URL")
            .unwrap_or_else(|_| std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"));

        let db = sqlx::mysql::MySqlPoolOptions::new()
            .max_connections(5)
            .connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .expect("Failed to run migrations");

        let config = Config {
            frontend_url: "http://localhost:5173".to_string(),
            run_mode: RunMode::Development,
            port: 0,
            database_url,
            access_token_secret: "access-secret-for-testing-only".to_string(),
            refresh_token_secret: "refresh-secret-for-testing-only".to_string(),
            resend_api_key: None,
            mail_from: "Storefront <noreply@storefront.test>".to_string(),
        };

        let app = storefront_api::create_app(db.clone(), config).await;
        let server = TestServer::new(app).expect("Failed to create test server");

        Self { server, db }
    }

    pub async fn cleanup(&self) {
        sqlx::query("DELETE FROM admins").execute(&self.db).await.ok();
        sqlx::query("DELETE FROM users").execute(&self.db).await.ok();
    }
}

// Helper to generate unique test email
#[allow(dead_code)]
pub fn test_email() -> String {
    format!("test_{}@example.com", uuid::Uuid::new_v4())
}

#[allow(dead_code)]
pub fn test_password() -> &'static str {
    "TestPassword123!"
}

#[allow(dead_code)]
pub fn test_name() -> &'static str {
    "Test Account"
}
