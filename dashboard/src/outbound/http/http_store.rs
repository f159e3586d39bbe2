//! Reqwest-backed user store adapter.
//!
//! This adapter owns transport details only: URL construction, request
//! serialisation, status acceptance, and JSON decoding into domain records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use super::dto::{NewUserBody, UserBody, UserDto};
use crate::domain::ports::UserStore;
use crate::domain::{FetchError, MutationError, StoreFailure, User, UserDraft, UserId};

const DEFAULT_USER_AGENT: &str = concat!("dashboard/", env!("CARGO_PKG_VERSION"));
const USERS_SEGMENT: &str = "users";

/// Reasons [`HttpUserStore`] cannot be constructed.
#[derive(Debug, Error)]
pub enum HttpUserStoreError {
    /// The base URL cannot carry path segments (for example `mailto:`).
    #[error("base URL {0} cannot carry a path")]
    InvalidBase(Url),
    /// The reqwest client failed to build.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// User store that talks to the remote `/users` resource.
#[derive(Debug, Clone)]
pub struct HttpUserStore {
    client: Client,
    base: Url,
}

impl HttpUserStore {
    /// Build an adapter rooted at `base`.
    ///
    /// Requests are sent to `{base}/users` and `{base}/users/{id}`. When
    /// `timeout` is `None` requests wait indefinitely.
    ///
    /// # Errors
    ///
    /// Returns [`HttpUserStoreError::InvalidBase`] when `base` cannot carry a
    /// path and [`HttpUserStoreError::Client`] when the reqwest client cannot
    /// be constructed.
    pub fn new(base: Url, timeout: Option<Duration>) -> Result<Self, HttpUserStoreError> {
        if base.cannot_be_a_base() {
            return Err(HttpUserStoreError::InvalidBase(base));
        }
        let mut builder = Client::builder().user_agent(DEFAULT_USER_AGENT);
        if let Some(limit) = timeout {
            builder = builder.timeout(limit);
        }
        Ok(Self {
            client: builder.build()?,
            base,
        })
    }

    fn users_url(&self, id: Option<&UserId>) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(USERS_SEGMENT);
            if let Some(id) = id {
                segments.push(id.as_ref());
            }
        }
        url
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreFailure> {
        request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)
    }
}

#[async_trait]
impl UserStore for HttpUserStore {
    async fn list(&self) -> Result<Vec<User>, FetchError> {
        let url = self.users_url(None);
        debug!(operation = "list", %url, "fetching users");
        let response = self.send(self.client.get(url)).await?;
        let dtos: Vec<UserDto> = read_json(response, |status| status.is_success()).await?;
        let users = dtos
            .into_iter()
            .map(UserDto::into_domain)
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreFailure::decode)?;
        debug!(operation = "list", count = users.len(), "users fetched");
        Ok(users)
    }

    async fn create(&self, draft: &UserDraft) -> Result<User, MutationError> {
        let attempt = async {
            let request = self
                .client
                .post(self.users_url(None))
                .json(&NewUserBody::from(draft));
            let response = self.send(request).await?;
            let dto: UserDto = read_json(response, |status| status == StatusCode::CREATED).await?;
            dto.into_domain().map_err(StoreFailure::decode)
        };
        attempt
            .await
            .map_err(|cause| MutationError::create(draft.clone(), cause))
    }

    async fn update(&self, id: &UserId, draft: &UserDraft) -> Result<User, MutationError> {
        let attempt = async {
            let request = self
                .client
                .put(self.users_url(Some(id)))
                .json(&UserBody::new(id, draft));
            let response = self.send(request).await?;
            let dto: UserDto = read_json(response, |status| status == StatusCode::OK).await?;
            dto.into_domain().map_err(StoreFailure::decode)
        };
        attempt
            .await
            .map_err(|cause| MutationError::update(id.clone(), draft.clone(), cause))
    }

    async fn delete(&self, id: &UserId) -> Result<(), MutationError> {
        let attempt = async {
            let response = self.send(self.client.delete(self.users_url(Some(id)))).await?;
            let status = response.status();
            if status != StatusCode::OK {
                let body = response.bytes().await.map_err(map_transport_error)?;
                return Err(map_status_error(status, body.as_ref()));
            }
            Ok::<(), StoreFailure>(())
        };
        attempt
            .await
            .map_err(|cause| MutationError::delete(id.clone(), cause))
    }
}

async fn read_json<T>(
    response: Response,
    accepts: impl FnOnce(StatusCode) -> bool,
) -> Result<T, StoreFailure>
where
    T: DeserializeOwned,
{
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !accepts(status) {
        return Err(map_status_error(status, body.as_ref()));
    }
    serde_json::from_slice(body.as_ref())
        .map_err(|error| StoreFailure::decode(format!("invalid user JSON payload: {error}")))
}

fn map_transport_error(error: reqwest::Error) -> StoreFailure {
    if error.is_timeout() {
        StoreFailure::timeout(error.to_string())
    } else {
        StoreFailure::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> StoreFailure {
    StoreFailure::unexpected_status(status.as_u16(), body_preview(body))
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
