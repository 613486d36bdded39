//! Authentication endpoints

use super::{ApiClient, RequestOptions};
use crate::{
    error::ClientResult,
    models::{
        user::{ChangePassword, LoginRequest, LoginResponse, RegisterUser, Registered},
        MessageResponse,
    },
};

impl ApiClient {
    /// Exchange credentials for a bearer token and the user summary.
    ///
    /// Does not store the token; the session manager decides what to persist.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let body = LoginRequest { email, password };
        self.request("/auth/login", RequestOptions::post().json(&body)?)
            .await
    }

    /// Register a new account
    pub async fn register(&self, user: &RegisterUser) -> ClientResult<Registered> {
        self.request("/auth/register", RequestOptions::post().json(user)?)
            .await
    }

    /// Change the logged-in user's password
    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> ClientResult<MessageResponse> {
        let body = ChangePassword {
            current_password,
            new_password,
        };
        self.request("/auth/change-password", RequestOptions::post().json(&body)?)
            .await
    }
}
