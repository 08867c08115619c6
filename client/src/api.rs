//! Client HTTP per le API del server

use crate::error::ClientError;
use crate::types::{ChatMessage, Credentials, SendMessageRequest, UserSummary};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Url del WebSocket derivato dall'url base (`http` -> `ws`, `https` -> `wss`)
    pub fn ws_url(&self) -> String {
        let url = if let Some(rest) = self.base_url.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = self.base_url.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            self.base_url.clone()
        };
        format!("{url}/ws")
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        let token = self.token.as_deref().ok_or(ClientError::MissingToken)?;
        Ok(request.bearer_auth(token))
    }

    /// Converte le risposte non 2xx in `ClientError::Status` con il messaggio del server
    async fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or(body);
        warn!(status = status.as_u16(), "Request failed: {}", message);
        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
        let response = Self::check(request.send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    #[instrument(skip(self, password))]
    pub async fn register(&self, username: &str, password: &str) -> Result<UserSummary, ClientError> {
        debug!("Registering");
        let request = self
            .http
            .post(self.url("/auth/register"))
            .json(&Credentials { username, password });
        Self::json(request).await
    }

    /// Login: il token viene letto dall'header `Authorization` e conservato
    #[instrument(skip(self, password))]
    pub async fn login(&mut self, username: &str, password: &str) -> Result<UserSummary, ClientError> {
        debug!("Logging in");
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&Credentials { username, password })
            .send()
            .await?;
        let response = Self::check(response).await?;

        let token = response
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::to_string)
            .ok_or(ClientError::MissingToken)?;
        self.token = Some(token);

        let user = response.json::<UserSummary>().await?;
        info!(user_id = user.id, "Logged in");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn logout(&mut self) -> Result<(), ClientError> {
        let response = self.http.post(self.url("/auth/logout")).send().await?;
        Self::check(response).await?;
        self.token = None;
        Ok(())
    }

    pub async fn check_auth(&self) -> Result<UserSummary, ClientError> {
        Self::json(self.authorized(self.http.get(self.url("/auth/check")))?).await
    }

    /// Utenti della sidebar (tutti tranne l'utente corrente)
    pub async fn users(&self) -> Result<Vec<UserSummary>, ClientError> {
        Self::json(self.authorized(self.http.get(self.url("/messages/users")))?).await
    }

    /// Storico con `peer_id`, in ordine di creazione
    pub async fn messages(&self, peer_id: i32) -> Result<Vec<ChatMessage>, ClientError> {
        let url = self.url(&format!("/messages/{peer_id}"));
        Self::json(self.authorized(self.http.get(url))?).await
    }

    #[instrument(skip(self, request))]
    pub async fn send_message(
        &self,
        peer_id: i32,
        request: &SendMessageRequest,
    ) -> Result<ChatMessage, ClientError> {
        let url = self.url(&format!("/messages/send/{peer_id}"));
        let message: ChatMessage = Self::json(self.authorized(self.http.post(url))?.json(request)).await?;
        debug!(message_id = message.message_id, emotion = %message.emotion, "Message sent");
        Ok(message)
    }
}
