//! Read-only record providers.

use std::fmt::Debug;
use std::fs;
use std::path::Path;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::instrument;

use crate::entity::Customer;
use crate::entity::Employee;
use crate::entity::Movement;
use crate::entity::Order;
use crate::entity::Product;
use crate::error::DashError;
use crate::error::Result;
use crate::stats::Statistics;

const SAMPLE_DATASET: &str = include_str!("source/sample.json");

/// The sole supplier of records for every page. Implementations never change their collections once built.
pub trait DataSource: Debug + Send + Sync {
    fn products(&self) -> &[Product];
    fn employees(&self) -> &[Employee];
    fn movements(&self) -> &[Movement];
    fn customers(&self) -> &[Customer];
    fn orders(&self) -> &[Order];

    fn statistics(&self, now: DateTime<Utc>) -> Statistics {
        Statistics::collect(self, now)
    }
}

/// Owned collections, in the JSON shape `{ products, employees, movements, customers, orders }`. Missing arrays are
/// read as empty.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Dataset {
    pub products:  Vec<Product>,
    pub employees: Vec<Employee>,
    pub movements: Vec<Movement>,
    pub customers: Vec<Customer>,
    pub orders:    Vec<Order>,
}

impl Dataset {
    /// The built-in demo data of the distribution business.
    ///
    /// # Panics
    ///
    /// Only if the embedded `sample.json` stops matching the record types, which the unit tests of this module catch.
    pub fn sample() -> Self {
        serde_json::from_str(SAMPLE_DATASET).expect("built-in sample dataset")
    }

    #[instrument(level = "debug")]
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let dataset: Self = serde_json::from_str(&json).map_err(|source| DashError::Dataset {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            "loaded {} products, {} employees, {} movements, {} customers, {} orders",
            dataset.products.len(),
            dataset.employees.len(),
            dataset.movements.len(),
            dataset.customers.len(),
            dataset.orders.len()
        );
        Ok(dataset)
    }
}

impl DataSource for Dataset {
    fn products(&self) -> &[Product] {
        &self.products
    }

    fn employees(&self) -> &[Employee] {
        &self.employees
    }

    fn movements(&self) -> &[Movement] {
        &self.movements
    }

    fn customers(&self) -> &[Customer] {
        &self.customers
    }

    fn orders(&self) -> &[Order] {
        &self.orders
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::CustomerKind;
    use crate::types::MovementKind;
    use crate::types::OrderStatus;

    #[test]
    fn test_sample_shapes() {
        let data = Dataset::sample();
        assert_eq!(data.products.len(), 5);
        assert_eq!(data.employees.len(), 4);
        assert_eq!(data.movements.len(), 5);
        assert_eq!(data.customers.len(), 3);
        assert_eq!(data.orders.len(), 3);

        assert_eq!(data.products[2].min_stock, 25);
        assert_eq!(data.movements[2].notes, None);
        assert_eq!(data.movements[1].kind, MovementKind::Out);
        assert_eq!(data.customers[1].kind, CustomerKind::Retail);
        assert_eq!(data.orders[2].status, OrderStatus::Pending);
        assert_eq!(data.orders[2].delivery_date, None);
        assert_eq!(data.orders[0].items[1].subtotal, 56.25);
    }

    #[test]
    fn test_json_round_trip_keeps_camel_case_names() {
        let data = Dataset::sample();
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["products"][0]["minStock"], 20);
        assert_eq!(json["movements"][0]["type"], "IN");
        assert_eq!(json["orders"][0]["products"][0]["productName"], "Arroz Premium 1kg");
        assert!(json["orders"][2].get("deliveryDate").is_none());

        let back: Dataset = serde_json::from_value(json).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(
            &path,
            r#"{"customers": [{"id": "C9", "name": "Kiosco, Sol", "email": "k@sol.es", "phone": "1",
                "address": "Calle 1", "type": "RETAIL", "createdAt": "2024-02-02"}]}"#,
        )
        .unwrap();

        let data = Dataset::from_json_file(&path).unwrap();
        assert_eq!(data.customers.len(), 1);
        assert!(data.products.is_empty());
    }

    #[test]
    fn test_bad_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, r#"{"orders": [{"id": 1}]}"#).unwrap();

        let err = Dataset::from_json_file(&path).unwrap_err();
        assert!(matches!(err, DashError::Dataset { .. }));
        assert!(err.to_string().contains("broken.json"));
    }
}
