//! Report endpoints

use chrono::NaiveDate;

use super::{query_string, ApiClient, RequestOptions};
use crate::{
    error::ClientResult,
    models::{
        fine::{FineQuery, FineStatus},
        report::{CirculationQuery, CirculationReport, DashboardReport, FinesReport, InventoryReport},
    },
};

const DATE_FORMAT: &str = "%Y-%m-%d";

impl ApiClient {
    /// Headline statistics and the latest transactions
    pub async fn dashboard_report(&self) -> ClientResult<DashboardReport> {
        self.request("/reports/dashboard", RequestOptions::get()).await
    }

    /// Copies per category
    pub async fn inventory_report(&self) -> ClientResult<InventoryReport> {
        self.request("/reports/inventory", RequestOptions::get()).await
    }

    /// Circulation counts for an inclusive date range
    pub async fn circulation_report(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> ClientResult<CirculationReport> {
        let query = CirculationQuery {
            start_date: start_date.format(DATE_FORMAT).to_string(),
            end_date: end_date.format(DATE_FORMAT).to_string(),
        };
        let endpoint = format!("/reports/circulation{}", query_string(&query)?);
        self.request(&endpoint, RequestOptions::get()).await
    }

    /// Fines by status; the backend reports pending fines when `status` is absent
    pub async fn fines_report(&self, status: Option<FineStatus>) -> ClientResult<FinesReport> {
        let endpoint = format!("/reports/fines{}", query_string(&FineQuery { status })?);
        self.request(&endpoint, RequestOptions::get()).await
    }
}
