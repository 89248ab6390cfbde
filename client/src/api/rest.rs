//! reqwest-backed gateway for the clinic backend.
//!
//! Builds the shared HTTP client, attaches the bearer token, and converts
//! non-2xx responses into [`ClientError::Request`] values carrying the
//! server's `message` field when the payload includes one.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::{BearerSlot, VetApi};
use crate::config::Config;
use crate::errors::{ClientError, ClientResult};
use crate::models::{Breed, Owner, OwnerDraft, Pet, SavePet, Species};
use crate::session::models::{LoginRequest, LoginResponse};

const NO_BODY: Option<&()> = None;

/// HTTP gateway holding the shared client and the bearer slot.
pub struct RestGateway {
    http: Client,
    base_url: String,
    bearer: BearerSlot,
}

impl RestGateway {
    /// Build a gateway from configuration, sharing the given bearer slot.
    pub fn new(config: &Config, bearer: BearerSlot) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_seconds))
            .build()?;

        Ok(RestGateway {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            bearer,
        })
    }

    async fn execute<B>(&self, method: Method, path: &str, body: Option<&B>) -> ClientResult<Response>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method.clone(), &url);
        if let Some(token) = self.bearer.token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(%method, %url, "sending request");
        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            let message = server_message(response)
                .await
                .unwrap_or_else(|| "Authentication required".to_string());
            return Err(ClientError::auth(message));
        }
        if !status.is_success() {
            return Err(ClientError::request(
                status.as_u16(),
                server_message(response).await,
            ));
        }
        Ok(response)
    }

    async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.execute(method, path, body).await?;
        Ok(response.json::<T>().await?)
    }

    async fn request_unit<B>(&self, method: Method, path: &str, body: Option<&B>) -> ClientResult<()>
    where
        B: Serialize + ?Sized,
    {
        self.execute(method, path, body).await?;
        Ok(())
    }
}

/// Pulls the `message` field out of an error payload, if the body is JSON
/// and carries one.
async fn server_message(response: Response) -> Option<String> {
    let payload = response.json::<serde_json::Value>().await.ok()?;
    payload.get("message")?.as_str().map(str::to_string)
}

#[async_trait]
impl VetApi for RestGateway {
    async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse> {
        self.request(Method::POST, "/login", Some(request)).await
    }

    async fn list_owners(&self) -> ClientResult<Vec<Owner>> {
        self.request(Method::GET, "/api/owners", NO_BODY).await
    }

    async fn find_owner(&self, id: i64) -> ClientResult<Owner> {
        self.request(Method::GET, &format!("/api/owners/find/{id}"), NO_BODY)
            .await
    }

    async fn save_owner(&self, owner: &OwnerDraft) -> ClientResult<Owner> {
        self.request(Method::POST, "/api/owners/save", Some(owner))
            .await
    }

    async fn delete_owner(&self, id: i64) -> ClientResult<()> {
        self.request_unit(Method::DELETE, &format!("/api/owners/delete/{id}"), NO_BODY)
            .await
    }

    async fn list_pets(&self) -> ClientResult<Vec<Pet>> {
        self.request(Method::GET, "/api/pets", NO_BODY).await
    }

    async fn find_pet(&self, id: i64) -> ClientResult<Pet> {
        self.request(Method::GET, &format!("/api/pets/find/{id}"), NO_BODY)
            .await
    }

    async fn save_pet(&self, pet: &SavePet) -> ClientResult<Pet> {
        self.request(Method::POST, "/api/pets/save", Some(pet)).await
    }

    async fn delete_pet(&self, id: i64) -> ClientResult<()> {
        self.request_unit(Method::DELETE, &format!("/api/pets/delete/{id}"), NO_BODY)
            .await
    }

    async fn list_species(&self) -> ClientResult<Vec<Species>> {
        self.request(Method::GET, "/api/species", NO_BODY).await
    }

    async fn list_breeds(&self) -> ClientResult<Vec<Breed>> {
        self.request(Method::GET, "/api/breeds", NO_BODY).await
    }
}
