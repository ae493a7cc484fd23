//! User management endpoints

use std::sync::Arc;

use adminhub_domain::constants::{user_endpoint, user_profile_endpoint, ENDPOINT_USERS};
use adminhub_domain::{
    CreateUserRequest, Paginated, QueryParams, UpdateUserRequest, User, UserProfile,
};

use super::client::ApiClient;
use super::errors::ApiError;

/// `/users` endpoint service
#[derive(Clone)]
pub struct UserApi {
    client: Arc<ApiClient>,
}

impl UserApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: &QueryParams) -> Result<Paginated<User>, ApiError> {
        self.client.get_with_query(ENDPOINT_USERS, params.to_pairs()).await
    }

    pub async fn get(&self, id: &str) -> Result<User, ApiError> {
        self.client.get(&user_endpoint(id)).await
    }

    pub async fn profile(&self, id: &str) -> Result<UserProfile, ApiError> {
        self.client.get(&user_profile_endpoint(id)).await
    }

    pub async fn create(&self, request: &CreateUserRequest) -> Result<User, ApiError> {
        self.client.post(ENDPOINT_USERS, request).await
    }

    pub async fn update(&self, id: &str, request: &UpdateUserRequest) -> Result<User, ApiError> {
        self.client.put(&user_endpoint(id), request).await
    }

    /// Delete a user. The backend answers 204 or an empty body.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&user_endpoint(id)).await
    }
}
