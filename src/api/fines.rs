//! Fine endpoints

use super::{query_string, ApiClient, RequestOptions};
use crate::{
    error::ClientResult,
    models::{
        fine::{FineEnvelope, FineList, FineQuery, FineStatus, PayFine},
        MessageResponse,
    },
};

impl ApiClient {
    /// Fines of one user, with their pending total
    pub async fn list_user_fines(&self, user_id: i64, status: Option<FineStatus>) -> ClientResult<FineList> {
        let endpoint = format!(
            "/fines/user/{}{}",
            user_id,
            query_string(&FineQuery { status })?
        );
        self.request(&endpoint, RequestOptions::get()).await
    }

    /// All fines, with their summed amount
    pub async fn list_fines(&self, status: Option<FineStatus>) -> ClientResult<FineList> {
        let endpoint = format!("/fines{}", query_string(&FineQuery { status })?);
        self.request(&endpoint, RequestOptions::get()).await
    }

    pub async fn get_fine(&self, fine_id: i64) -> ClientResult<FineEnvelope> {
        self.request(&format!("/fines/{}", fine_id), RequestOptions::get())
            .await
    }

    /// Mark a fine as paid with the given payment method (e.g. `cash`)
    pub async fn pay_fine(&self, fine_id: i64, payment_method: &str) -> ClientResult<MessageResponse> {
        let body = PayFine { payment_method };
        self.request(
            &format!("/fines/{}/pay", fine_id),
            RequestOptions::post().json(&body)?,
        )
        .await
    }

    pub async fn waive_fine(&self, fine_id: i64) -> ClientResult<MessageResponse> {
        self.request(&format!("/fines/{}/waive", fine_id), RequestOptions::post())
            .await
    }
}
