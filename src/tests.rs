#[cfg(test)]
mod integration_tests {
    use crate::handlers::auth::{AuthResponse, LoginRequest, RegisterRequest};
    use crate::schemas::ErrorResponse;
    use crate::test_utils::test_utils::setup_test_app;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    async fn test_server() -> TestServer {
        let app = setup_test_app().await;
        TestServer::new(app).unwrap()
    }

    fn register_request(username: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: Some(username.to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    fn login_by_username(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: Some(username.to_string()),
            password: Some(password.to_string()),
            ..Default::default()
        }
    }

    fn login_by_email(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
            ..Default::default()
        }
    }

    async fn register_alice(server: &TestServer) -> Value {
        let response = server
            .post("/register")
            .json(&register_request("alice", "a@x.com", "secret123"))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<Value>()
    }

    #[tokio::test]
    async fn test_welcome() {
        let server = test_server().await;

        let response = server.get("/").await;

        response.assert_status(StatusCode::OK);
        response.assert_json(&json!({ "message": "Welcome to the Tic Tac Toe API!" }));
    }

    #[tokio::test]
    async fn test_ping() {
        let server = test_server().await;

        let response = server.get("/ping").await;

        response.assert_status(StatusCode::OK);
        response.assert_json(&json!({ "pong": "it works!" }));
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = test_server().await;

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], "connected");
    }

    #[tokio::test]
    async fn test_register_returns_sanitized_user() {
        let server = test_server().await;

        let body = register_alice(&server).await;

        assert_eq!(body["success"], true);
        assert_eq!(body["user"]["username"], "alice");
        assert_eq!(body["user"]["email"], "a@x.com");
        assert!(body["user"]["id"].as_i64().unwrap() > 0);
        assert!(body["user"].get("password").is_none());
        assert!(!body.to_string().contains("secret123"));
        assert!(!body.to_string().contains("argon2"));
    }

    #[tokio::test]
    async fn test_register_duplicate_username_fails() {
        let server = test_server().await;
        register_alice(&server).await;

        let response = server
            .post("/register")
            .json(&register_request("alice", "other@x.com", "secret123"))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = response.json();
        assert!(!body.success);
        assert_eq!(body.error, "Registration failed");
        assert_eq!(body.code, "REGISTRATION_FAILED");
    }

    #[tokio::test]
    async fn test_register_duplicate_email_fails() {
        let server = test_server().await;
        register_alice(&server).await;

        let response = server
            .post("/register")
            .json(&register_request("bob", "a@x.com", "hunter22"))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        // The constraint name must not reach the client.
        assert!(!body.to_string().to_lowercase().contains("unique"));
    }

    #[tokio::test]
    async fn test_register_missing_field_is_bad_request() {
        let server = test_server().await;

        let response = server
            .post("/register")
            .json(&json!({ "username": "alice", "password": "secret123" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert!(!body.success);
        assert_eq!(body.code, "MISSING_CREDENTIALS");
    }

    #[tokio::test]
    async fn test_register_malformed_body_is_bad_request() {
        let server = test_server().await;

        let response = server
            .post("/register")
            .content_type("application/json")
            .text("{not json")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert!(!body.success);
        assert_eq!(body.code, "INVALID_BODY");
    }

    #[tokio::test]
    async fn test_login_by_username_and_email() {
        let server = test_server().await;
        let registered = register_alice(&server).await;

        let by_username = server
            .post("/login")
            .json(&login_by_username("alice", "secret123"))
            .await;
        by_username.assert_status(StatusCode::OK);
        let by_username: Value = by_username.json();

        let by_email = server
            .post("/login")
            .json(&login_by_email("a@x.com", "secret123"))
            .await;
        by_email.assert_status(StatusCode::OK);
        let by_email: Value = by_email.json();

        assert_eq!(by_username["success"], true);
        assert_eq!(by_username["user"], registered["user"]);
        assert_eq!(by_email["user"], registered["user"]);
        assert!(by_email["user"].get("password").is_none());
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let server = test_server().await;
        register_alice(&server).await;

        let wrong_password = server
            .post("/login")
            .json(&login_by_username("alice", "wrong"))
            .await;
        let unknown_user = server
            .post("/login")
            .json(&login_by_username("mallory", "secret123"))
            .await;
        let unknown_email = server
            .post("/login")
            .json(&login_by_email("nobody@x.com", "secret123"))
            .await;

        wrong_password.assert_status(StatusCode::UNAUTHORIZED);
        unknown_user.assert_status(StatusCode::UNAUTHORIZED);
        unknown_email.assert_status(StatusCode::UNAUTHORIZED);

        let wrong_password = wrong_password.text();
        assert_eq!(wrong_password, unknown_user.text());
        assert_eq!(wrong_password, unknown_email.text());

        let body: ErrorResponse = serde_json::from_str(&wrong_password).unwrap();
        assert!(!body.success);
        assert_eq!(body.error, "Invalid username or password");
    }

    #[tokio::test]
    async fn test_login_without_identity_is_bad_request() {
        let server = test_server().await;
        register_alice(&server).await;

        let with_password = server
            .post("/login")
            .json(&json!({ "password": "secret123" }))
            .await;
        let without_password = server.post("/login").json(&json!({})).await;
        let empty_identity = server
            .post("/login")
            .json(&json!({ "username": "", "email": "", "password": "secret123" }))
            .await;

        for response in [with_password, without_password, empty_identity] {
            response.assert_status(StatusCode::BAD_REQUEST);
            let body: ErrorResponse = response.json();
            assert!(!body.success);
            assert_eq!(body.error, "Missing credentials");
        }
    }

    #[tokio::test]
    async fn test_login_without_password_is_bad_request() {
        let server = test_server().await;
        register_alice(&server).await;

        let response = server
            .post("/login")
            .json(&json!({ "username": "alice" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_register_then_login_scenario() {
        let server = test_server().await;

        let registered = server
            .post("/register")
            .json(&json!({ "username": "alice", "email": "a@x.com", "password": "secret123" }))
            .await;
        registered.assert_status(StatusCode::CREATED);
        let registered: AuthResponse = registered.json();
        assert!(registered.success);
        assert_eq!(registered.user.username, "alice");

        let rejected = server
            .post("/login")
            .json(&json!({ "username": "alice", "password": "wrong" }))
            .await;
        rejected.assert_status(StatusCode::UNAUTHORIZED);

        let accepted = server
            .post("/login")
            .json(&json!({ "username": "alice", "password": "secret123" }))
            .await;
        accepted.assert_status(StatusCode::OK);
        let accepted: AuthResponse = accepted.json();
        assert!(accepted.success);
        assert_eq!(accepted.user, registered.user);
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let server = test_server().await;

        let response = server.get("/api-docs/openapi.json").await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert!(body["paths"].get("/login").is_some());
        assert!(body["paths"].get("/register").is_some());
    }
}
