//! HTTP client wrapper.
//!
//! Every request carries `Authorization: Bearer <token>` when the session has
//! one. Responses pass through untouched except 401, which clears the token
//! and raises [`ClientEvent::Unauthorized`](crate::ClientEvent::Unauthorized)
//! on the session channel.

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

use crate::{
    config::{normalize_base_url, ClientSettings},
    error::{ClientError, ClientResult, GENERIC_FAILURE_MESSAGE, SESSION_EXPIRED_MESSAGE},
    normalize::{decode, decode_list, extract_error_message},
    session::Session,
};

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    session: Session,
}

impl ApiClient {
    pub fn new(settings: &ClientSettings, session: Session) -> ClientResult<Self> {
        let base_url = settings
            .base_url()
            .map_err(|err| ClientError::Validation(format!("{err:#}")))?;
        let mut builder = Client::builder().user_agent(settings.user_agent.clone());
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    pub fn with_base_url(base_url: &str, session: Session) -> ClientResult<Self> {
        let base_url =
            normalize_base_url(base_url).map_err(|err| ClientError::Validation(format!("{err:#}")))?;
        Ok(Self {
            http: Client::new(),
            base_url,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> ClientResult<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let body = self.send(Method::GET, path, |req| req).await?;
        decode(body)
    }

    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> ClientResult<Vec<T>> {
        let body = self.send(Method::GET, path, |req| req).await?;
        decode_list(body)
    }

    pub async fn get_list_query<T, Q>(&self, path: &str, query: &Q) -> ClientResult<Vec<T>>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let body = self.send(Method::GET, path, |req| req.query(query)).await?;
        decode_list(body)
    }

    pub async fn post<T, B>(&self, path: &str, payload: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = self.send(Method::POST, path, |req| req.json(payload)).await?;
        decode(body)
    }

    /// POST with an empty JSON object, for endpoints that act on the path alone.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.post(path, &serde_json::Map::new()).await
    }

    pub async fn post_form<T, F>(&self, path: &str, form: &F) -> ClientResult<T>
    where
        T: DeserializeOwned,
        F: Serialize + ?Sized,
    {
        let body = self.send(Method::POST, path, |req| req.form(form)).await?;
        decode(body)
    }

    pub async fn put<T, B>(&self, path: &str, payload: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = self.send(Method::PUT, path, |req| req.json(payload)).await?;
        decode(body)
    }

    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let body = self.send(Method::DELETE, path, |req| req).await?;
        // Envelope errors still count on deletes.
        crate::normalize::unwrap_envelope(body).map(|_| ())
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> ClientResult<Value> {
        let url = self.endpoint(path)?;
        let request_id = Uuid::new_v4().to_string();
        let mut request = build(self.http.request(method.clone(), url))
            .header(REQUEST_ID_HEADER, &request_id);
        if let Some(token) = self.session.token().await {
            request = request.bearer_auth(token);
        }

        debug!(%method, path, request_id = %request_id, "api: sending request");
        let response = request.send().await?;
        let status = response.status();

        let text = response.text().await?;
        if status == StatusCode::UNAUTHORIZED {
            let message = error_message(&text, SESSION_EXPIRED_MESSAGE);
            warn!(
                %method,
                path,
                request_id = %request_id,
                message = %message,
                "api: unauthorized"
            );
            self.session.mark_unauthorized().await;
            return Err(ClientError::Unauthorized { message });
        }

        if !status.is_success() {
            let fallback = status
                .canonical_reason()
                .unwrap_or(GENERIC_FAILURE_MESSAGE)
                .to_string();
            let message = error_message(&text, &fallback);
            warn!(
                %method,
                path,
                request_id = %request_id,
                status = status.as_u16(),
                message = %message,
                "api: request failed"
            );
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(ClientError::from)
    }
}

fn error_message(text: &str, fallback: &str) -> String {
    let body = serde_json::from_str::<Value>(text).unwrap_or_else(|_| Value::String(text.into()));
    extract_error_message(&body, fallback)
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
