use chrono::DateTime;
use chrono::Utc;
use tracing::instrument;

use crate::entity::order::gross_total;
use crate::entity::EmployeeStats;
use crate::entity::Product;
use crate::entity::ProductStats;
use crate::locale::Localization;
use crate::source::DataSource;
use crate::types::OrderStatus;

/// Movements at most this many days away from "now" count as recent.
pub const RECENT_WINDOW_DAYS: i64 = 7;

/// Dashboard-wide figures computed from the full, unfiltered data source.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub total_products:     usize,
    pub total_stock:        u64,
    pub low_stock_count:    usize,
    pub low_stock_products: Vec<Product>,
    pub active_employees:   usize,
    pub total_employees:    usize,
    pub recent_movements:   usize,
    pub pending_orders:     usize,
    /// All orders, whatever their status.
    pub total_revenue:      f64,
}

impl Statistics {
    #[instrument(level = "trace", skip(source))]
    pub fn collect<S>(source: &S, now: DateTime<Utc>) -> Self
    where
        S: DataSource + ?Sized,
    {
        let products = ProductStats::collect(source.products());
        let employees = EmployeeStats::collect(source.employees());

        let low_stock_products: Vec<Product> = source
            .products()
            .iter()
            .filter(|p| p.is_low_stock())
            .cloned()
            .collect();

        Self {
            total_products: products.count,
            total_stock: products.total_stock,
            low_stock_count: low_stock_products.len(),
            low_stock_products,
            active_employees: employees.active,
            total_employees: employees.count,
            recent_movements: source
                .movements()
                .iter()
                .filter(|m| m.is_recent(now, RECENT_WINDOW_DAYS))
                .count(),
            pending_orders: source
                .orders()
                .iter()
                .filter(|o| o.status == OrderStatus::Pending)
                .count(),
            total_revenue: gross_total(source.orders()),
        }
    }

    /// Label/value pairs for the dashboard cards.
    pub fn cards(&self, loc: &Localization) -> Vec<(&'static str, String)> {
        vec![
            ("📦 Total Productos", format!("{} items", self.total_products)),
            ("📊 Stock Total", format!("{} unidades", self.total_stock)),
            ("👥 Personal Activo", format!("{} de {}", self.active_employees, self.total_employees)),
            ("⚠️ Stock Bajo", format!("{} productos", self.low_stock_count)),
            ("🔄 Movimientos (7 días)", self.recent_movements.to_string()),
            ("🕒 Órdenes Pendientes", self.pending_orders.to_string()),
            ("💰 Ingresos Totales", loc.money(self.total_revenue)),
        ]
    }
}
