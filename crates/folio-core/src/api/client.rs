//! API client for communicating with the gallery backend.
//!
//! This module provides the `ApiClient` struct for the three request shapes
//! the front end needs: anonymous reads, authenticated multipart creation
//! and authenticated deletion.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::auth::Session;
use crate::config::Config;
use crate::models::{Category, NewWork, Work};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

const LOGIN_ENDPOINT: &str = "/users/login";
const WORKS_ENDPOINT: &str = "/works";
const CATEGORIES_ENDPOINT: &str = "/categories";

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// API client for the gallery backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client without a request timeout
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::build(base_url, None)
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::build(&config.base_url, config.request_timeout_secs.map(Duration::from_secs))
    }

    fn build(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Exchange credentials for a bearer token.
    ///
    /// Any non-success status means the credentials were refused.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let url = self.url(LOGIN_ENDPOINT);

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Login refused");
            return Err(ApiError::InvalidCredentials);
        }

        let auth: LoginResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse login response: {}", e)))?;
        Ok(auth.token)
    }

    /// Anonymous GET of `base_url + endpoint`, parsed as JSON.
    pub async fn get_data<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = self.url(endpoint);

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "GET request failed");
            ApiError::FetchFailed
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = %status, "GET returned an error status");
            return Err(ApiError::FetchFailed);
        }

        response.json().await.map_err(|e| {
            warn!(url = %url, error = %e, "Failed to parse JSON response");
            ApiError::FetchFailed
        })
    }

    /// Authenticated DELETE. The raw response is handed back so the caller
    /// can check the status (204 on success).
    pub async fn delete_element(&self, session: &Session, endpoint: &str) -> Result<Response, ApiError> {
        let token = session.bearer()?.ok_or(ApiError::MissingToken)?;
        let url = self.url(endpoint);

        let response = self
            .client
            .delete(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(ApiError::DeleteFailed)?;

        debug!(url = %url, status = %response.status(), "DELETE completed");
        Ok(response)
    }

    /// Authenticated multipart POST.
    ///
    /// Without a token nothing is sent and `Ok(None)` comes back. With one,
    /// the body is parsed only on `201 Created`; any other status also yields
    /// `Ok(None)`.
    pub async fn post_element<T: DeserializeOwned>(
        &self,
        session: &Session,
        endpoint: &str,
        form: Form,
    ) -> Result<Option<T>, ApiError> {
        let Some(token) = session.bearer()? else {
            debug!(endpoint = endpoint, "No token, skipping POST");
            return Ok(None);
        };
        let url = self.url(endpoint);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!(url = %url, error = %e, "POST request failed");
                ApiError::Network(e)
            })?;

        let status = response.status();
        if status != StatusCode::CREATED {
            warn!(url = %url, status = %status, "POST did not create the element");
            return Ok(None);
        }

        let created = response.json().await.map_err(|e| {
            error!(url = %url, error = %e, "Failed to parse created element");
            ApiError::InvalidResponse(format!("Failed to parse JSON response from {}: {}", url, e))
        })?;
        Ok(Some(created))
    }

    // ===== Data Fetching Methods =====

    pub async fn fetch_works(&self) -> Result<Vec<Work>, ApiError> {
        self.get_data(WORKS_ENDPOINT).await
    }

    pub async fn fetch_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get_data(CATEGORIES_ENDPOINT).await
    }

    /// Upload a new work; `Ok(None)` when the backend did not answer 201
    pub async fn create_work(&self, session: &Session, new_work: &NewWork) -> Result<Option<Work>, ApiError> {
        self.post_element(session, WORKS_ENDPOINT, Self::work_form(new_work)?)
            .await
    }

    pub async fn delete_work(&self, session: &Session, id: i64) -> Result<Response, ApiError> {
        self.delete_element(session, &format!("{}/{}", WORKS_ENDPOINT, id))
            .await
    }

    fn work_form(new_work: &NewWork) -> Result<Form, ApiError> {
        let image = Part::bytes(new_work.image.clone())
            .file_name(new_work.file_name.clone())
            .mime_str(new_work.mime_type())?;
        Ok(Form::new()
            .part("image", image)
            .text("title", new_work.title.clone())
            .text("category", new_work.category_id.to_string()))
    }
}
