//! Data models exchanged with the library backend

pub mod book;
pub mod fine;
pub mod report;
pub mod transaction;
pub mod user;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use book::{Book, BookInput, BookQuery, BookUpdate};
pub use fine::{Fine, FineQuery, FineStatus};
pub use report::{CirculationReport, DashboardReport, FinesReport, InventoryReport};
pub use transaction::{Transaction, TransactionQuery, TransactionStatus};
pub use user::{RegisterUser, Role, User, UserQuery, UserSummary, UserUpdate};

/// Plain acknowledgement returned by mutating endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
