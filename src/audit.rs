//! Consistency report for denormalized references.
//!
//! Movements and orders carry copies of the names of the records they point to. Nothing keeps those copies in sync,
//! so this module only reports where they drifted or where the referenced record is missing. It never repairs data.

use std::collections::HashMap;
use std::fmt::Display;

use tracing::debug;

use crate::source::DataSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discrepancy {
    /// The stored name differs from the referenced record's current name.
    NameDrift {
        record:    String,
        reference: String,
        stored:    String,
        actual:    String,
    },
    /// The referenced record does not exist.
    Dangling {
        record:    String,
        reference: String,
        target:    &'static str,
    },
}

impl Display for Discrepancy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameDrift {
                record,
                reference,
                stored,
                actual,
            } => write!(f, "{record}: {reference} is stored as '{stored}' but named '{actual}'"),
            Self::Dangling {
                record,
                reference,
                target,
            } => write!(f, "{record}: {target} {reference} does not exist"),
        }
    }
}

struct Names<'a> {
    target: &'static str,
    by_id:  HashMap<&'a str, &'a str>,
}

impl<'a> Names<'a> {
    fn new<I>(target: &'static str, pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self {
            target,
            by_id: pairs.into_iter().collect(),
        }
    }

    fn check(&self, record: &str, id: &str, stored: &str, found: &mut Vec<Discrepancy>) {
        match self.by_id.get(id) {
            None => found.push(Discrepancy::Dangling {
                record:    record.to_string(),
                reference: id.to_string(),
                target:    self.target,
            }),
            Some(actual) if *actual != stored => found.push(Discrepancy::NameDrift {
                record:    record.to_string(),
                reference: id.to_string(),
                stored:    stored.to_string(),
                actual:    actual.to_string(),
            }),
            Some(_) => (),
        }
    }
}

pub fn audit<S>(source: &S) -> Vec<Discrepancy>
where
    S: DataSource + ?Sized,
{
    let products = Names::new(
        "product",
        source.products().iter().map(|p| (p.id.as_str(), p.name.as_str())),
    );
    let employees = Names::new(
        "employee",
        source.employees().iter().map(|e| (e.id.as_str(), e.name.as_str())),
    );
    let customers = Names::new(
        "customer",
        source.customers().iter().map(|c| (c.id.as_str(), c.name.as_str())),
    );

    let mut found = Vec::new();

    for movement in source.movements() {
        products.check(&movement.id, &movement.product_id, &movement.product_name, &mut found);
        employees.check(&movement.id, &movement.employee_id, &movement.employee_name, &mut found);
    }

    for order in source.orders() {
        customers.check(&order.id, &order.customer_id, &order.customer_name, &mut found);
        for item in &order.items {
            products.check(&order.id, &item.product_id, &item.product_name, &mut found);
        }
    }

    debug!("audit found {} discrepancies", found.len());
    found
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::source::Dataset;

    #[test]
    fn test_sample_is_consistent() {
        assert!(audit(&Dataset::sample()).is_empty());
    }

    #[test]
    fn test_drift_and_dangling() {
        let mut data = Dataset::sample();
        data.products[0].name = "Arroz Extra 1kg".to_string();
        data.orders[1].customer_id = "C404".to_string();

        let found = audit(&data);
        assert_eq!(found.len(), 3);
        assert!(found.contains(&Discrepancy::NameDrift {
            record:    "M001".to_string(),
            reference: "P001".to_string(),
            stored:    "Arroz Premium 1kg".to_string(),
            actual:    "Arroz Extra 1kg".to_string(),
        }));
        assert!(found.contains(&Discrepancy::Dangling {
            record:    "O002".to_string(),
            reference: "C404".to_string(),
            target:    "customer",
        }));
        assert_eq!(
            found[1].to_string(),
            "O001: P001 is stored as 'Arroz Premium 1kg' but named 'Arroz Extra 1kg'"
        );
    }
}
