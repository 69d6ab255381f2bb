//! # distriboard
//!
//! Inventory and personnel dashboard for a small distribution business.
//!
//! Five record collections are loaded once from a [`DataSource`](source::DataSource): products, employees, stock
//! movements, customers and orders. Every page is a pure transformation of one of them:
//!
//! - a [`Query`](filter::Query) narrows the collection by free text and one categorical facet;
//! - a [`Listing`](listing::Listing) binds the query and a [`ViewMode`](types::ViewMode) to the collection and renders
//!   it as a card grid or a table;
//! - the same filtered set is what gets summarized and exported to CSV.
//!
//! Dashboard-wide figures come from [`Statistics`](stats::Statistics). Nothing here mutates the data; stock movements
//! in particular never change product stock.
//!
//! ```
//! use distriboard::prelude::*;
//!
//! let data = Dataset::sample();
//! let loc = Localization::default();
//! let wholesale = Listing::new(data.customers())
//!     .with_query(Query::default().with_facet(Selection::Only(CustomerKind::Wholesale)));
//!
//! assert_eq!(wholesale.filtered().len(), 2);
//!
//! let mut csv = Vec::new();
//! assert_eq!(wholesale.export_to(&loc, &mut csv).unwrap(), 2);
//! ```
//!
//! The terminal front end lives in the [`app`] module behind the `cli` feature.

pub mod audit;
pub mod entity;
pub mod error;
pub mod export;
pub mod filter;
pub mod listing;
pub mod locale;
pub mod source;
pub mod stats;
pub mod types;
pub mod view;

#[cfg(feature = "cli")]
pub mod app;

#[doc(inline)]
pub use error::DashError;
#[doc(inline)]
pub use error::Result;
#[doc(inline)]
pub use listing::Listing;
#[doc(inline)]
pub use source::DataSource;
#[doc(inline)]
pub use source::Dataset;

pub mod prelude {
    pub use crate::audit::audit;
    pub use crate::audit::Discrepancy;
    pub use crate::entity::*;
    pub use crate::error::DashError;
    pub use crate::export::CsvExport;
    pub use crate::filter::Query;
    pub use crate::filter::SearchText;
    pub use crate::filter::Searchable;
    pub use crate::listing::Listing;
    pub use crate::listing::Summarize;
    pub use crate::listing::SummaryContext;
    pub use crate::locale::Localization;
    pub use crate::source::DataSource;
    pub use crate::source::Dataset;
    pub use crate::stats::Statistics;
    pub use crate::types::*;
    pub use crate::view::Render;
}
