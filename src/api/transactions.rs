//! Circulation endpoints (issue, return, listings)

use super::{query_string, ApiClient, RequestOptions};
use crate::{
    error::ClientResult,
    models::{
        transaction::{
            IssueBook, Issued, OverdueList, TransactionEnvelope, TransactionList, TransactionQuery,
        },
        MessageResponse,
    },
};

impl ApiClient {
    /// Issue a book to a user. Without `issue_days` the backend default loan period applies.
    pub async fn issue_book(
        &self,
        book_id: i64,
        user_id: i64,
        issue_days: Option<u32>,
    ) -> ClientResult<Issued> {
        let body = IssueBook {
            book_id,
            user_id,
            issue_days,
        };
        self.request("/transactions/issue", RequestOptions::post().json(&body)?)
            .await
    }

    /// Return an issued book; the message reports any fine raised
    pub async fn return_book(&self, transaction_id: i64) -> ClientResult<MessageResponse> {
        self.request(
            &format!("/transactions/return/{}", transaction_id),
            RequestOptions::post(),
        )
        .await
    }

    pub async fn list_transactions(&self, query: &TransactionQuery) -> ClientResult<TransactionList> {
        let endpoint = format!("/transactions{}", query_string(query)?);
        self.request(&endpoint, RequestOptions::get()).await
    }

    pub async fn get_transaction(&self, transaction_id: i64) -> ClientResult<TransactionEnvelope> {
        self.request(
            &format!("/transactions/{}", transaction_id),
            RequestOptions::get(),
        )
        .await
    }

    pub async fn list_overdue_transactions(&self) -> ClientResult<OverdueList> {
        self.request("/transactions/overdue", RequestOptions::get())
            .await
    }
}
