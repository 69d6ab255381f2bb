//! Page state bound to one collection.
//!
//! A [`Listing`] owns nothing but the current query and view mode. Filtering, rendering, summarizing and exporting
//! all derive from the same filtered set, so switching between grid and table never changes what is shown or
//! exported.

use std::io;
use std::path::Path;
use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::instrument;
use tracing::trace;

use crate::entity::product::categories;
use crate::entity::Customer;
use crate::entity::CustomerStats;
use crate::entity::Employee;
use crate::entity::EmployeeStats;
use crate::entity::Movement;
use crate::entity::MovementStats;
use crate::entity::Order;
use crate::entity::OrderStats;
use crate::entity::Product;
use crate::entity::ProductStats;
use crate::error::Result;
use crate::export;
use crate::export::CsvExport;
use crate::filter::Query;
use crate::filter::Searchable;
use crate::locale::Localization;
use crate::types::ViewMode;
use crate::view;
use crate::view::Render;

/// Inputs to page statistics that don't come from the records themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryContext {
    pub today: NaiveDate,
}

/// Label/value statistics shown above a page.
pub trait Summarize: Sized {
    /// `all` is the unfiltered collection, `filtered` what the current query admits. Each page decides which one its
    /// figures are computed over.
    fn summarize(
        all: &[Self],
        filtered: &[&Self],
        ctx: &SummaryContext,
        loc: &Localization,
    ) -> Vec<(&'static str, String)>;
}

#[derive(Debug, Clone)]
pub struct Listing<'a, R>
where
    R: Searchable,
{
    records: &'a [R],
    query:   Query<R::Facet>,
    view:    ViewMode,
}

impl<'a, R> Listing<'a, R>
where
    R: Searchable,
{
    pub fn new(records: &'a [R]) -> Self {
        Self {
            records,
            query: Query::default(),
            view: ViewMode::default(),
        }
    }

    pub fn with_query(mut self, query: Query<R::Facet>) -> Self {
        self.query = query;
        self
    }

    pub fn with_view_mode(mut self, view: ViewMode) -> Self {
        self.view = view;
        self
    }

    pub fn query(&self) -> &Query<R::Facet> {
        &self.query
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view
    }

    pub fn toggle_view(&mut self) -> ViewMode {
        self.view = self.view.toggle();
        trace!("view mode switched to {}", self.view);
        self.view
    }

    pub fn filtered(&self) -> Vec<&'a R> {
        self.query.apply(self.records)
    }

    pub fn render(&self, columns: usize, loc: &Localization) -> String
    where
        R: Render,
    {
        view::render(&self.filtered(), self.view, columns, loc)
    }

    pub fn summarize(&self, ctx: &SummaryContext, loc: &Localization) -> Vec<(&'static str, String)>
    where
        R: Summarize,
    {
        R::summarize(self.records, &self.filtered(), ctx, loc)
    }

    /// Writes the filtered records as CSV. Returns the number of data rows.
    pub fn export_to<W>(&self, loc: &Localization, out: W) -> Result<usize>
    where
        R: CsvExport,
        W: io::Write,
    {
        export::write_csv(self.filtered(), loc, out)
    }

    #[instrument(level = "trace", skip(self, loc))]
    pub fn export_to_dir(&self, loc: &Localization, dir: &Path) -> Result<PathBuf>
    where
        R: CsvExport,
    {
        export::export_to_dir(self.filtered(), loc, dir)
    }
}

impl Summarize for Product {
    fn summarize(
        all: &[Self],
        filtered: &[&Self],
        _ctx: &SummaryContext,
        _loc: &Localization,
    ) -> Vec<(&'static str, String)> {
        let stats = ProductStats::collect(filtered.iter().copied());
        vec![
            ("Total Productos", stats.count.to_string()),
            ("Stock Total", stats.total_stock.to_string()),
            ("Stock Bajo", stats.low_stock.to_string()),
            ("Categorías", categories(all).len().to_string()),
        ]
    }
}

impl Summarize for Employee {
    fn summarize(
        _all: &[Self],
        filtered: &[&Self],
        _ctx: &SummaryContext,
        _loc: &Localization,
    ) -> Vec<(&'static str, String)> {
        let stats = EmployeeStats::collect(filtered.iter().copied());
        vec![
            ("Total Empleados", stats.count.to_string()),
            ("Activos", stats.active.to_string()),
            ("Inactivos", stats.inactive.to_string()),
            ("% Activos", format!("{}%", stats.active_percent())),
        ]
    }
}

impl Summarize for Movement {
    fn summarize(
        _all: &[Self],
        filtered: &[&Self],
        _ctx: &SummaryContext,
        _loc: &Localization,
    ) -> Vec<(&'static str, String)> {
        let stats = MovementStats::collect(filtered.iter().copied());
        vec![
            ("Total Movimientos", stats.count.to_string()),
            ("Entradas", stats.inbound.to_string()),
            ("Salidas", stats.outbound.to_string()),
            ("Cantidad Total", stats.total_quantity.to_string()),
        ]
    }
}

impl Summarize for Customer {
    fn summarize(
        all: &[Self],
        _filtered: &[&Self],
        ctx: &SummaryContext,
        _loc: &Localization,
    ) -> Vec<(&'static str, String)> {
        let stats = CustomerStats::collect(all, ctx.today);
        vec![
            ("Total Clientes", stats.total.to_string()),
            ("Minoristas", stats.retail.to_string()),
            ("Mayoristas", stats.wholesale.to_string()),
            ("Nuevos (Este Mes)", stats.new_this_month.to_string()),
        ]
    }
}

impl Summarize for Order {
    fn summarize(
        all: &[Self],
        _filtered: &[&Self],
        _ctx: &SummaryContext,
        loc: &Localization,
    ) -> Vec<(&'static str, String)> {
        let stats = OrderStats::collect(all);
        vec![
            ("Total Órdenes", stats.total.to_string()),
            ("Pendientes", stats.pending.to_string()),
            ("Procesando", stats.processing.to_string()),
            ("Completadas", stats.completed.to_string()),
            ("Canceladas", stats.cancelled.to_string()),
            ("Ingresos", loc.money(stats.revenue)),
        ]
    }
}
