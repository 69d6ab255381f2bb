use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::export::CsvExport;
use crate::filter::Searchable;
use crate::locale::Localization;
use crate::types::OrderStatus;
use crate::view::Render;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OrderItem {
    pub product_id:   String,
    pub product_name: String,
    pub quantity:     u32,
    pub price:        f64,
    /// Stored as supplied; not recomputed from `quantity * price`.
    pub subtotal:     f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Order {
    pub id:            String,
    pub customer_id:   String,
    pub customer_name: String,
    #[serde(rename = "products")]
    pub items:         Vec<OrderItem>,
    pub total:         f64,
    pub status:        OrderStatus,
    pub created_at:    NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<NaiveDate>,
}

impl Order {
    /// `name (qty)` pairs joined by `; `.
    pub fn items_summary(&self) -> String {
        self.items
            .iter()
            .map(|item| format!("{} ({})", item.product_name, item.quantity))
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn status_icon(&self) -> &'static str {
        match self.status {
            OrderStatus::Pending => "🕒",
            OrderStatus::Processing => "⚙️",
            OrderStatus::Completed => "✅",
            OrderStatus::Cancelled => "❌",
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct OrderStats {
    pub total:      usize,
    pub pending:    usize,
    pub processing: usize,
    pub completed:  usize,
    pub cancelled:  usize,
    /// Sum of totals of completed orders only.
    pub revenue:    f64,
}

impl OrderStats {
    pub fn collect<'a, I>(orders: I) -> Self
    where
        I: IntoIterator<Item = &'a Order>,
    {
        orders.into_iter().fold(Self::default(), |mut stats, order| {
            stats.total += 1;
            match order.status {
                OrderStatus::Pending => stats.pending += 1,
                OrderStatus::Processing => stats.processing += 1,
                OrderStatus::Completed => {
                    stats.completed += 1;
                    stats.revenue += order.total;
                }
                OrderStatus::Cancelled => stats.cancelled += 1,
            }
            stats
        })
    }

    pub fn count_of(&self, status: OrderStatus) -> usize {
        match status {
            OrderStatus::Pending => self.pending,
            OrderStatus::Processing => self.processing,
            OrderStatus::Completed => self.completed,
            OrderStatus::Cancelled => self.cancelled,
        }
    }

    /// Always equals [`OrderStats::total`].
    pub fn status_sum(&self) -> usize {
        OrderStatus::iter().map(|s| self.count_of(s)).sum()
    }
}

/// Sum of all order totals regardless of status.
pub fn gross_total<'a, I>(orders: I) -> f64
where
    I: IntoIterator<Item = &'a Order>,
{
    orders.into_iter().map(|o| o.total).sum()
}

impl Searchable for Order {
    type Facet = OrderStatus;

    const FACET_NAME: &'static str = "status";

    fn search_fields(&self) -> Vec<&str> {
        vec![self.customer_name.as_str(), self.id.as_str()]
    }

    fn facet(&self) -> OrderStatus {
        self.status
    }
}

impl CsvExport for Order {
    const FILE_NAME: &'static str = "ordenes.csv";
    const HEADERS: &'static [&'static str] = &[
        "ID",
        "Cliente",
        "Total",
        "Estado",
        "Fecha Pedido",
        "Fecha Entrega",
        "Productos",
    ];

    fn csv_record(&self, loc: &Localization) -> Vec<String> {
        vec![
            self.id.clone(),
            self.customer_name.clone(),
            loc.money(self.total),
            self.status.to_string(),
            loc.date(&self.created_at),
            self.delivery_date
                .as_ref()
                .map_or_else(|| "N/A".to_string(), |d| loc.date(d)),
            self.items_summary(),
        ]
    }
}

impl Render for Order {
    const COLUMNS: &'static [&'static str] = &["ID", "Cliente", "Estado", "Total", "Pedido", "Entrega", "Productos"];
    const EMPTY: &'static str = "No se encontraron órdenes";
    const NUMERIC_COLUMNS: &'static [usize] = &[3];
    const TITLE: &'static str = "Órdenes";

    fn card(&self, loc: &Localization) -> Vec<String> {
        let mut lines = vec![
            format!("{} {} · {}", self.status_icon(), self.id, self.customer_name),
            format!("{} · {}", loc.order_status(self.status), loc.money(self.total)),
            format!("Pedido: {}", loc.date(&self.created_at)),
        ];
        if let Some(delivery) = &self.delivery_date {
            lines.push(format!("Entrega: {}", loc.date(delivery)));
        }
        lines.push(format!("Productos ({}):", self.items.len()));
        for item in &self.items {
            lines.push(format!(
                "  {} x{} = {}",
                item.product_name,
                item.quantity,
                loc.money(item.subtotal)
            ));
        }
        lines
    }

    fn row(&self, loc: &Localization) -> Vec<String> {
        let mut products = self
            .items
            .iter()
            .take(2)
            .map(|item| format!("{} ({})", item.product_name, item.quantity))
            .collect::<Vec<_>>();
        if self.items.len() > 2 {
            products.push(format!("+{} más...", self.items.len() - 2));
        }

        vec![
            self.id.clone(),
            self.customer_name.clone(),
            format!("{} {}", self.status_icon(), loc.order_status(self.status)),
            loc.money(self.total),
            loc.date(&self.created_at),
            self.delivery_date
                .as_ref()
                .map_or_else(|| "-".to_string(), |d| loc.date(d)),
            products.join("\n"),
        ]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::export::csv_string;
    use crate::filter::Query;
    use crate::source::Dataset;
    use crate::types::Selection;

    #[test]
    fn test_revenue_counts_completed_only() {
        let data = Dataset::sample();
        let stats = OrderStats::collect(&data.orders);
        assert_eq!(stats.revenue, 106.25);
        assert_eq!(gross_total(&data.orders), 200.50);
    }

    #[test]
    fn test_status_counts_add_up() {
        let data = Dataset::sample();
        let loc = Localization::default();
        let queries = [
            Query::default(),
            Query::default().with_search(loc.search_text("mercado")),
            Query::default().with_facet(Selection::Only(OrderStatus::Pending)),
            Query::default().with_search(loc.search_text("zzz")),
        ];
        for query in queries {
            let subset = query.apply(&data.orders);
            let stats = OrderStats::collect(subset.iter().copied());
            assert_eq!(stats.status_sum(), subset.len());
            assert_eq!(stats.total, subset.len());
        }
    }

    #[test]
    fn test_search_by_order_id() {
        let data = Dataset::sample();
        let found = Query::default()
            .with_search(Localization::default().search_text("o002"))
            .apply(&data.orders);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].customer_name, "Tienda El Rincón");
    }

    #[test]
    fn test_order_csv() {
        let data = Dataset::sample();
        let csv = csv_string(&data.orders, &Localization::default()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), data.orders.len() + 1);
        assert_eq!(
            lines[1],
            "O001,Supermercado Central,$106.25,COMPLETED,25/11/2024,27/11/2024,Arroz Premium 1kg (20); Aceite Vegetal 900ml (15)"
        );
        assert_eq!(
            lines[3],
            "O003,Mercado San Miguel,$45.00,PENDING,01/12/2024,N/A,Pasta Espagueti 500g (30)"
        );
    }
}
