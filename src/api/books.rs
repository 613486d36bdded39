//! Catalog endpoints

use super::{query_string, ApiClient, RequestOptions};
use crate::{
    error::ClientResult,
    models::{
        book::{BookCreated, BookEnvelope, BookInput, BookList, BookQuery, BookUpdate, Categories},
        MessageResponse,
    },
};

impl ApiClient {
    /// List books, optionally filtered by category and availability
    pub async fn list_books(&self, query: &BookQuery) -> ClientResult<BookList> {
        let endpoint = format!("/books{}", query_string(query)?);
        self.request(&endpoint, RequestOptions::get()).await
    }

    /// Get book details by ID
    pub async fn get_book(&self, book_id: i64) -> ClientResult<BookEnvelope> {
        self.request(&format!("/books/{}", book_id), RequestOptions::get())
            .await
    }

    /// Full-text search over the catalog
    pub async fn search_books(&self, keyword: &str) -> ClientResult<BookList> {
        let endpoint = format!("/books/search?q={}", urlencoding::encode(keyword));
        self.request(&endpoint, RequestOptions::get()).await
    }

    pub async fn create_book(&self, book: &BookInput) -> ClientResult<BookCreated> {
        self.request("/books", RequestOptions::post().json(book)?).await
    }

    pub async fn update_book(&self, book_id: i64, changes: &BookUpdate) -> ClientResult<MessageResponse> {
        self.request(&format!("/books/{}", book_id), RequestOptions::put().json(changes)?)
            .await
    }

    pub async fn delete_book(&self, book_id: i64) -> ClientResult<MessageResponse> {
        self.request(&format!("/books/{}", book_id), RequestOptions::delete())
            .await
    }

    /// Distinct category names in the catalog
    pub async fn list_categories(&self) -> ClientResult<Categories> {
        self.request("/books/categories", RequestOptions::get()).await
    }
}
