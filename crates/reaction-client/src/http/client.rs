//! reqwest implementation of the reaction and content ports
//!
//! Routes:
//! - `POST|PUT|GET /like/{post|comment}/{id}`
//! - `PUT|DELETE /post-comment/{post|comment}`
//!
//! Writes succeed only with `204 No Content`; the read route may answer with
//! any 2xx carrying a JSON body. Every request carries the CSRF header when
//! the cookie held a token.

use async_trait::async_trait;
use reaction_common::{ClientConfig, CsrfToken, ServerConfig};
use reaction_core::{
    ApiError, ApiResult, ContentApi, EntityKind, EntityRef, ReactionApi, ReactionKind,
    ReactionSnapshot,
};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::wire::{DeleteBody, EditBody, EmojiBody, ErrorBody, SnapshotBody};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP client for the social-network backend
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    server: ServerConfig,
    csrf_header: String,
    csrf_token: Option<CsrfToken>,
}

impl HttpApi {
    /// Build the client, reading the CSRF token out of the page's cookie string
    pub fn new(config: &ClientConfig, cookies: &str) -> ApiResult<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let csrf_token = CsrfToken::from_cookie_header(cookies, &config.csrf.cookie_name);
        if csrf_token.is_none() {
            warn!(
                cookie = %config.csrf.cookie_name,
                "CSRF cookie not found; requests will be sent without a token"
            );
        }

        Ok(Self {
            client,
            server: config.server.clone(),
            csrf_header: config.csrf.header_name.clone(),
            csrf_token,
        })
    }

    fn reaction_url(&self, entity: EntityRef) -> String {
        self.server
            .url(&format!("like/{}/{}", entity.kind, entity.id))
    }

    fn content_url(&self, kind: EntityKind) -> String {
        self.server.url(&format!("post-comment/{kind}"))
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.csrf_token {
            Some(token) => builder.header(self.csrf_header.as_str(), token.as_str()),
            None => builder,
        }
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        body: &B,
    ) -> ApiResult<Response> {
        debug!(%method, url, "Sending request");
        let response = self
            .request(method, url)
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        check_status(response, Expect::NoContent).await
    }
}

fn transport(err: reqwest::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

/// Success status a route answers with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    /// Writes: exactly `204 No Content`
    NoContent,
    /// Reads: any 2xx with a body
    Body,
}

impl Expect {
    fn accepts(self, status: StatusCode) -> bool {
        match self {
            Self::NoContent => status == StatusCode::NO_CONTENT,
            Self::Body => status.is_success(),
        }
    }
}

/// Pass expected responses through, map everything else to an error
async fn check_status(response: Response, expect: Expect) -> ApiResult<Response> {
    let status = response.status();
    if expect.accepts(status) {
        return Ok(response);
    }

    let reason = response
        .json::<ErrorBody>()
        .await
        .map(|body| body.error)
        .unwrap_or_default();
    warn!(status = status.as_u16(), reason = %reason, "Backend rejected request");

    Err(ApiError::from_status(status.as_u16()))
}

#[async_trait]
impl ReactionApi for HttpApi {
    #[instrument(skip(self))]
    async fn create_reaction(&self, entity: EntityRef, kind: ReactionKind) -> ApiResult<()> {
        let url = self.reaction_url(entity);
        self.send_json(Method::POST, &url, &EmojiBody { emoji_type: kind })
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_reaction(&self, entity: EntityRef, kind: ReactionKind) -> ApiResult<()> {
        let url = self.reaction_url(entity);
        self.send_json(Method::PUT, &url, &EmojiBody { emoji_type: kind })
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn fetch_snapshot(&self, entity: EntityRef) -> ApiResult<ReactionSnapshot> {
        let url = self.reaction_url(entity);
        debug!(url, "Fetching reaction snapshot");
        let response = self
            .request(Method::GET, &url)
            .send()
            .await
            .map_err(transport)?;
        let body: SnapshotBody = check_status(response, Expect::Body)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::MalformedResponse(e.to_string()))?;
        body.into_snapshot()
    }
}

#[async_trait]
impl ContentApi for HttpApi {
    #[instrument(skip(self, content), fields(len = content.len()))]
    async fn edit_content(&self, entity: EntityRef, content: &str) -> ApiResult<()> {
        let url = self.content_url(entity.kind);
        let body = EditBody {
            id: entity.id,
            content,
        };
        self.send_json(Method::PUT, &url, &body).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_content(&self, entity: EntityRef) -> ApiResult<()> {
        let url = self.content_url(entity.kind);
        self.send_json(Method::DELETE, &url, &DeleteBody { id: entity.id })
            .await?;
        Ok(())
    }
}
