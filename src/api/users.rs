//! User management endpoints

use super::{query_string, ApiClient, RequestOptions};
use crate::{
    error::ClientResult,
    models::{
        fine::{FineList, FineQuery, FineStatus},
        transaction::UserBooks,
        user::{Role, UserEnvelope, UserList, UserQuery, UserUpdate},
        MessageResponse,
    },
};

impl ApiClient {
    /// List users, optionally restricted to one role
    pub async fn list_users(&self, role: Option<Role>) -> ClientResult<UserList> {
        let endpoint = format!("/users{}", query_string(&UserQuery { role })?);
        self.request(&endpoint, RequestOptions::get()).await
    }

    /// Get user details by ID
    pub async fn get_user(&self, user_id: i64) -> ClientResult<UserEnvelope> {
        self.request(&format!("/users/{}", user_id), RequestOptions::get())
            .await
    }

    pub async fn update_user(&self, user_id: i64, changes: &UserUpdate) -> ClientResult<MessageResponse> {
        self.request(&format!("/users/{}", user_id), RequestOptions::put().json(changes)?)
            .await
    }

    /// Deactivate a user account
    pub async fn delete_user(&self, user_id: i64) -> ClientResult<MessageResponse> {
        self.request(&format!("/users/{}", user_id), RequestOptions::delete())
            .await
    }

    /// Books currently issued to a user
    pub async fn list_user_books(&self, user_id: i64) -> ClientResult<UserBooks> {
        self.request(&format!("/users/{}/books", user_id), RequestOptions::get())
            .await
    }

    /// Fines raised against a user, through the user resource
    pub async fn list_fines_of_user(&self, user_id: i64, status: Option<FineStatus>) -> ClientResult<FineList> {
        let endpoint = format!(
            "/users/{}/fines{}",
            user_id,
            query_string(&FineQuery { status })?
        );
        self.request(&endpoint, RequestOptions::get()).await
    }
}
