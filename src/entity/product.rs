use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

use crate::export::CsvExport;
use crate::filter::Searchable;
use crate::locale::Localization;
use crate::types::StockLevel;
use crate::view::Render;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Product {
    pub id:          String,
    pub name:        String,
    pub description: String,
    pub price:       f64,
    pub stock:       u32,
    pub category:    String,
    pub supplier:    String,
    pub min_stock:   u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode:     Option<String>,
    pub created_at:  NaiveDate,
    pub updated_at:  NaiveDate,
}

impl Product {
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::of(self.stock, self.min_stock)
    }

    /// Stock has fallen to or below the configured minimum.
    pub fn is_low_stock(&self) -> bool {
        self.stock_level() == StockLevel::Low
    }

    pub fn category_icon(&self) -> &'static str {
        match self.category.as_str() {
            "Granos" => "🌾",
            "Aceites" => "🫒",
            "Lácteos" => "🥛",
            "Endulzantes" => "🍯",
            "Pastas" => "🍝",
            "Bebidas" => "🥤",
            "Carnes" => "🥩",
            "Verduras" => "🥬",
            "Enlatados" => "🥫",
            _ => "📦",
        }
    }
}

/// Distinct categories in order of first appearance.
pub fn categories(products: &[Product]) -> Vec<&str> {
    let mut seen = BTreeSet::new();
    products
        .iter()
        .map(|p| p.category.as_str())
        .filter(|c| seen.insert(*c))
        .collect()
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProductStats {
    pub count:       usize,
    pub total_stock: u64,
    pub low_stock:   usize,
}

impl ProductStats {
    pub fn collect<'a, I>(products: I) -> Self
    where
        I: IntoIterator<Item = &'a Product>,
    {
        products.into_iter().fold(Self::default(), |mut stats, product| {
            stats.count += 1;
            stats.total_stock += u64::from(product.stock);
            if product.is_low_stock() {
                stats.low_stock += 1;
            }
            stats
        })
    }
}

impl Searchable for Product {
    type Facet = String;

    const FACET_NAME: &'static str = "category";

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.category.as_str(), self.supplier.as_str()]
    }

    fn facet(&self) -> String {
        self.category.clone()
    }
}

impl CsvExport for Product {
    const FILE_NAME: &'static str = "productos.csv";
    const HEADERS: &'static [&'static str] = &["ID", "Producto", "Categoría", "Stock", "Precio", "Stock Mínimo"];

    fn csv_record(&self, loc: &Localization) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.category.clone(),
            self.stock.to_string(),
            loc.amount(self.price),
            self.min_stock.to_string(),
        ]
    }
}

impl Render for Product {
    const COLUMNS: &'static [&'static str] = &["", "ID", "Producto", "Categoría", "Proveedor", "Stock", "Mínimo", "Precio"];
    const EMPTY: &'static str = "No se encontraron productos";
    const NUMERIC_COLUMNS: &'static [usize] = &[5, 6, 7];
    const TITLE: &'static str = "Productos";

    fn card(&self, loc: &Localization) -> Vec<String> {
        let mut lines = vec![
            format!("{} {}", self.category_icon(), self.name),
            self.description.clone(),
            format!("{} Stock: {} (mín. {})", self.stock_level().icon(), self.stock, self.min_stock),
            format!("Categoría: {}", self.category),
            format!("Proveedor: {}", self.supplier),
            format!("Precio: {}", loc.money(self.price)),
        ];
        if let Some(barcode) = &self.barcode {
            lines.push(format!("Código: {barcode}"));
        }
        lines
    }

    fn row(&self, loc: &Localization) -> Vec<String> {
        vec![
            self.stock_level().icon().to_string(),
            self.id.clone(),
            self.name.clone(),
            self.category.clone(),
            self.supplier.clone(),
            self.stock.to_string(),
            self.min_stock.to_string(),
            loc.money(self.price),
        ]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::filter::Query;
    use crate::source::Dataset;
    use crate::types::Selection;

    #[test]
    fn test_low_stock_products() {
        let data = Dataset::sample();
        let low: Vec<&str> = data
            .products
            .iter()
            .filter(|p| p.is_low_stock())
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(low, vec!["P003"]);
    }

    #[test]
    fn test_product_stats() {
        let data = Dataset::sample();
        let stats = ProductStats::collect(&data.products);
        assert_eq!(stats.count, 5);
        assert_eq!(stats.total_stock, 150 + 80 + 12 + 200 + 95);
        assert_eq!(stats.low_stock, 1);
        assert_eq!(categories(&data.products).len(), 5);
    }

    #[test]
    fn test_search_covers_supplier_and_category() {
        let data = Dataset::sample();
        let by_supplier = Query::default()
            .with_search(Localization::default().search_text("molinos"))
            .apply(&data.products);
        assert_eq!(by_supplier.len(), 1);
        assert_eq!(by_supplier[0].id, "P005");

        let by_category = Query::default()
            .with_facet(Selection::Only("Aceites".to_string()))
            .apply(&data.products);
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].id, "P002");
    }

    #[test]
    fn test_csv_record() {
        let data = Dataset::sample();
        let loc = Localization::default();
        assert_eq!(
            data.products[0].csv_record(&loc),
            vec!["P001", "Arroz Premium 1kg", "Granos", "150", "2.50", "20"]
        );
    }
}
