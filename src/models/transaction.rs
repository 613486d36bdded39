//! Circulation transaction (issue/return) model and related types

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Issued,
    Returned,
    Overdue,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Issued => "issued",
            TransactionStatus::Returned => "returned",
            TransactionStatus::Overdue => "overdue",
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "issued" => Ok(TransactionStatus::Issued),
            "returned" => Ok(TransactionStatus::Returned),
            "overdue" => Ok(TransactionStatus::Overdue),
            _ => Err(format!("Invalid transaction status: {}", s)),
        }
    }
}

/// Transaction with the book/user columns the backend joins in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: i64,
    pub book_id: i64,
    pub user_id: i64,
    pub librarian_id: Option<i64>,
    pub issue_date: String,
    pub due_date: String,
    pub return_date: Option<String>,
    pub status: TransactionStatus,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Issue request body. `issue_days` falls back to the backend default when absent.
#[derive(Debug, Clone, Serialize)]
pub struct IssueBook {
    pub book_id: i64,
    pub user_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_days: Option<u32>,
}

/// Query parameters for listing transactions
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransactionQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TransactionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issued {
    pub message: String,
    pub transaction_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionList {
    pub transactions: Vec<Transaction>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionEnvelope {
    pub transaction: Transaction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverdueList {
    pub overdue_transactions: Vec<Transaction>,
    pub count: usize,
}

/// Books a user currently holds, from `/users/{id}/books`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserBooks {
    pub books: Vec<Transaction>,
    pub count: usize,
}
