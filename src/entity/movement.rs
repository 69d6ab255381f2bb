use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::export::CsvExport;
use crate::filter::Searchable;
use crate::locale::Localization;
use crate::types::MovementKind;
use crate::view::Render;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// A recorded stock change. Movements are informational: they never alter the referenced product's stock.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Movement {
    pub id:            String,
    pub product_id:    String,
    pub product_name:  String,
    #[serde(rename = "type")]
    pub kind:          MovementKind,
    pub quantity:      u32,
    pub reason:        String,
    pub employee_id:   String,
    pub employee_name: String,
    pub date:          DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes:         Option<String>,
}

impl Movement {
    /// Whole days between the movement and `now`, in either direction, rounded up.
    pub fn days_from(&self, now: DateTime<Utc>) -> i64 {
        let millis = (now - self.date).num_milliseconds().abs();
        let day = SECONDS_PER_DAY * 1000;
        (millis + day - 1) / day
    }

    pub fn is_recent(&self, now: DateTime<Utc>, window_days: i64) -> bool {
        self.days_from(now) <= window_days
    }

    pub fn icon(&self) -> &'static str {
        match self.kind {
            MovementKind::In => "📈",
            MovementKind::Out => "📉",
        }
    }

    /// Quantity with the direction sign, e.g. `+50` or `-15`.
    pub fn signed_quantity(&self) -> String {
        match self.kind {
            MovementKind::In => format!("+{}", self.quantity),
            MovementKind::Out => format!("-{}", self.quantity),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MovementStats {
    pub count:          usize,
    pub inbound:        usize,
    pub outbound:       usize,
    pub total_quantity: u64,
}

impl MovementStats {
    pub fn collect<'a, I>(movements: I) -> Self
    where
        I: IntoIterator<Item = &'a Movement>,
    {
        movements.into_iter().fold(Self::default(), |mut stats, movement| {
            stats.count += 1;
            match movement.kind {
                MovementKind::In => stats.inbound += 1,
                MovementKind::Out => stats.outbound += 1,
            }
            stats.total_quantity += u64::from(movement.quantity);
            stats
        })
    }
}

impl Searchable for Movement {
    type Facet = MovementKind;

    const FACET_NAME: &'static str = "type";

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.product_name.as_str(),
            self.employee_name.as_str(),
            self.reason.as_str(),
        ]
    }

    fn facet(&self) -> MovementKind {
        self.kind
    }
}

impl CsvExport for Movement {
    const FILE_NAME: &'static str = "movimientos.csv";
    const HEADERS: &'static [&'static str] = &[
        "ID", "Producto", "Tipo", "Cantidad", "Motivo", "Empleado", "Fecha", "Notas",
    ];

    fn csv_record(&self, loc: &Localization) -> Vec<String> {
        vec![
            self.id.clone(),
            self.product_name.clone(),
            loc.movement_kind(self.kind).to_string(),
            self.quantity.to_string(),
            self.reason.clone(),
            self.employee_name.clone(),
            loc.datetime(&self.date),
            self.notes.clone().unwrap_or_default(),
        ]
    }
}

impl Render for Movement {
    const COLUMNS: &'static [&'static str] = &["Producto", "Tipo", "Cantidad", "Motivo", "Empleado", "Fecha", "Notas"];
    const EMPTY: &'static str = "No se encontraron movimientos";
    const NUMERIC_COLUMNS: &'static [usize] = &[2];
    const TITLE: &'static str = "Movimientos de Stock";

    fn card(&self, loc: &Localization) -> Vec<String> {
        let mut lines = vec![
            format!("{} {} {}", self.icon(), self.signed_quantity(), self.product_name),
            format!("{}: {}", loc.movement_kind(self.kind), self.reason),
            format!("Empleado: {}", self.employee_name),
            format!("Fecha: {}", loc.datetime(&self.date)),
        ];
        if let Some(notes) = &self.notes {
            lines.push(format!("Notas: {notes}"));
        }
        lines
    }

    fn row(&self, loc: &Localization) -> Vec<String> {
        vec![
            self.product_name.clone(),
            format!("{} {}", self.icon(), loc.movement_kind(self.kind)),
            self.signed_quantity(),
            self.reason.clone(),
            self.employee_name.clone(),
            loc.datetime(&self.date),
            self.notes.clone().unwrap_or_else(|| "-".to_string()),
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

    fn at(stamp: &str) -> DateTime<Utc> {
        stamp.parse().unwrap()
    }

    #[test]
    fn test_movement_stats() {
        let data = Dataset::sample();
        let stats = MovementStats::collect(&data.movements);
        assert_eq!(stats.count, 5);
        assert_eq!(stats.inbound, 2);
        assert_eq!(stats.outbound, 3);
        assert_eq!(stats.total_quantity, 50 + 15 + 8 + 100 + 20);
    }

    #[test]
    fn test_type_filter_and_search() {
        let data = Dataset::sample();
        let outbound = Query::default()
            .with_facet(Selection::Only(MovementKind::Out))
            .apply(&data.movements);
        assert_eq!(outbound.len(), 3);

        let by_employee = Query::default()
            .with_search(Localization::default().search_text("carlos"))
            .with_facet(Selection::Only(MovementKind::In))
            .apply(&data.movements);
        let ids: Vec<&str> = by_employee.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["M001", "M004"]);
    }

    #[test]
    fn test_recent_window_rounds_up() {
        let data = Dataset::sample();
        let m001 = &data.movements[0];
        assert_eq!(m001.days_from(at("2024-12-01T10:30:00Z")), 0);
        assert_eq!(m001.days_from(at("2024-12-08T10:30:00Z")), 7);
        assert_eq!(m001.days_from(at("2024-12-08T10:30:01Z")), 8);
        assert!(m001.is_recent(at("2024-11-28T00:00:00Z"), 7));
        assert!(!m001.is_recent(at("2024-12-09T00:00:00Z"), 7));
    }

    #[test]
    fn test_movements_do_not_touch_stock() {
        let data = Dataset::sample();
        let arroz = data.products.iter().find(|p| p.id == "P001").unwrap();
        assert_eq!(arroz.stock, 150);
        assert_eq!(data.movements[0].signed_quantity(), "+50");
    }

    #[test]
    fn test_movement_csv() {
        let data = Dataset::sample();
        let csv = csv_string(&data.movements, &Localization::default()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), data.movements.len() + 1);
        assert_eq!(lines[0], "ID,Producto,Tipo,Cantidad,Motivo,Empleado,Fecha,Notas");
        assert_eq!(
            lines[1],
            "M001,Arroz Premium 1kg,Entrada,50,Reposición de stock,Carlos Rodríguez,01/12/2024 10:30,Lote #ABC123"
        );
        assert_eq!(
            lines[2],
            "M002,Aceite Vegetal 900ml,Salida,15,Venta al por mayor,María González,01/12/2024 14:15,Cliente: Supermercado Central"
        );
        // No notes: the last field stays empty.
        assert_eq!(
            lines[3],
            "M003,Azúcar Blanca 1kg,Salida,8,Venta al detalle,Ana Martínez,01/12/2024 16:45,"
        );
    }

    #[test]
    fn test_movement_csv_uses_datetime_format() {
        let data = Dataset::sample();
        let loc = Localization::default().with_datetime_format("%Y-%m-%dT%H:%M");
        let row = data.movements[3].csv_record(&loc);
        assert_eq!(row[2], "Entrada");
        assert_eq!(row[6], "2024-11-30T09:00");
        assert_eq!(row[7], "Entrega semanal");
    }
}
