use auth::Role;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use crate::errors::SessionError;
use crate::models::AuthUser;
use crate::models::ProfileChanges;
use crate::models::SignUpDetails;
use crate::ports::IdentityApi;

/// [`IdentityApi`] backed by the identity service's HTTP endpoints.
#[derive(Debug, Clone)]
pub struct HttpIdentityApi {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct LoginRequestBody<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
}

#[derive(Serialize)]
struct RegisterRequestBody<'a> {
    email: &'a str,
    password: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
}

#[derive(Deserialize)]
struct TokenResponseBody {
    token: String,
}

#[derive(Deserialize)]
struct MsgBody {
    msg: String,
}

#[derive(Deserialize)]
struct ValidationBody {
    errors: Vec<FieldErrorBody>,
}

#[derive(Deserialize)]
struct FieldErrorBody {
    #[allow(dead_code)]
    field: String,
    message: String,
}

impl HttpIdentityApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn token_from(&self, response: reqwest::Response) -> Result<String, SessionError> {
        if response.status().is_success() {
            let body: TokenResponseBody = response.json().await.map_err(transport)?;
            return Ok(body.token);
        }
        Err(error_from(response).await)
    }

    async fn user_from(&self, response: reqwest::Response) -> Result<AuthUser, SessionError> {
        if response.status().is_success() {
            return response.json().await.map_err(transport);
        }
        Err(error_from(response).await)
    }
}

#[async_trait::async_trait]
impl IdentityApi for HttpIdentityApi {
    async fn login(
        &self,
        email: &str,
        password: &str,
        expected_role: Option<Role>,
    ) -> Result<String, SessionError> {
        let response = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&LoginRequestBody {
                email,
                password,
                role: expected_role,
            })
            .send()
            .await
            .map_err(transport)?;

        self.token_from(response).await
    }

    async fn register(&self, details: &SignUpDetails) -> Result<String, SessionError> {
        let response = self
            .client
            .post(self.url("/api/auth/register"))
            .json(&RegisterRequestBody {
                email: &details.email,
                password: &details.password,
                first_name: &details.first_name,
                last_name: &details.last_name,
                role: details.role,
            })
            .send()
            .await
            .map_err(transport)?;

        self.token_from(response).await
    }

    async fn fetch_current_user(&self, token: &str) -> Result<AuthUser, SessionError> {
        let response = self
            .client
            .get(self.url("/api/auth/me"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport)?;

        self.user_from(response).await
    }

    async fn update_profile(
        &self,
        token: &str,
        changes: &ProfileChanges,
    ) -> Result<AuthUser, SessionError> {
        let response = self
            .client
            .patch(self.url("/api/auth/me"))
            .bearer_auth(token)
            .json(changes)
            .send()
            .await
            .map_err(transport)?;

        self.user_from(response).await
    }
}

fn transport(e: reqwest::Error) -> SessionError {
    SessionError::Network(e.to_string())
}

async fn error_from(response: reqwest::Response) -> SessionError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    classify_error(status, &body)
}

/// Map a non-success response to the client error taxonomy.
///
/// The server speaks three failure shapes: `{"msg": "..."}` for
/// authentication failures, `{"errors": [{field, message}]}` for schema
/// validation, and plain-text "Server Error" for 500s.
fn classify_error(status: StatusCode, body: &str) -> SessionError {
    if status == StatusCode::UNAUTHORIZED {
        return SessionError::SessionExpired;
    }

    if status.is_server_error() {
        return SessionError::Server;
    }

    if let Ok(parsed) = serde_json::from_str::<MsgBody>(body) {
        return match parsed.msg.as_str() {
            "Invalid credentials" => SessionError::InvalidCredentials,
            "Selected role does not match your account type" => SessionError::RoleMismatch,
            _ => SessionError::Validation(parsed.msg),
        };
    }

    if let Ok(parsed) = serde_json::from_str::<ValidationBody>(body) {
        let joined = parsed
            .errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");
        return SessionError::Validation(joined);
    }

    SessionError::Network(format!("unexpected response: {status}"))
}
