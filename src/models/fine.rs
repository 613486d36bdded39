//! Overdue fine model and related types

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FineStatus {
    Pending,
    Paid,
    Waived,
}

impl FineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FineStatus::Pending => "pending",
            FineStatus::Paid => "paid",
            FineStatus::Waived => "waived",
        }
    }
}

impl std::fmt::Display for FineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FineStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(FineStatus::Pending),
            "paid" => Ok(FineStatus::Paid),
            "waived" => Ok(FineStatus::Waived),
            _ => Err(format!("Invalid fine status: {}", s)),
        }
    }
}

/// Fine with the book/user columns the backend joins in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fine {
    pub fine_id: i64,
    pub transaction_id: i64,
    pub user_id: i64,
    pub amount: f64,
    pub days_overdue: i64,
    pub status: FineStatus,
    pub paid_date: Option<String>,
    pub payment_method: Option<String>,
    pub created_at: Option<String>,
    #[serde(default)]
    pub book_id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Query parameters for fine listings
#[derive(Debug, Clone, Default, Serialize)]
pub struct FineQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<FineStatus>,
}

/// Pay request body
#[derive(Debug, Serialize)]
pub struct PayFine<'a> {
    pub payment_method: &'a str,
}

/// Fine listing. User listings carry `total_pending`, global ones `total_amount`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FineList {
    pub fines: Vec<Fine>,
    pub count: usize,
    #[serde(default)]
    pub total_pending: Option<f64>,
    #[serde(default)]
    pub total_amount: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FineEnvelope {
    pub fine: Fine,
}
