//! Report payloads

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::fine::Fine;
use super::transaction::Transaction;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_books: u64,
    pub available_books: u64,
    pub total_users: u64,
    pub students: u64,
    pub librarians: u64,
    pub issued_books: u64,
    pub overdue_books: u64,
    pub pending_fines: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    pub stats: DashboardStats,
    pub recent_transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryInventory {
    pub total_books: u64,
    pub total_copies: u64,
    pub available_copies: u64,
}

/// Inventory grouped by category name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryReport {
    pub inventory: BTreeMap<String, CategoryInventory>,
    pub total_categories: usize,
}

/// Query parameters for the circulation report, dates as `YYYY-MM-DD`
#[derive(Debug, Clone, Serialize)]
pub struct CirculationQuery {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circulation {
    pub books_issued: u64,
    pub books_returned: u64,
    pub books_overdue: u64,
    pub period: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CirculationReport {
    pub circulation: Circulation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinesReport {
    pub fines: Vec<Fine>,
    pub total_amount: f64,
    pub count: usize,
}
