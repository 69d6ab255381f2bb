use comfy_table::presets;
use comfy_table::CellAlignment;
use comfy_table::Table;

use crate::locale::Localization;
use crate::types::ViewMode;

pub const DEFAULT_GRID_COLUMNS: usize = 3;

/// Card and table presentations of a record.
pub trait Render {
    /// Page heading.
    const TITLE: &'static str;
    /// Shown instead of an empty grid or table.
    const EMPTY: &'static str;
    const COLUMNS: &'static [&'static str];
    /// Zero-based table columns to right-align.
    const NUMERIC_COLUMNS: &'static [usize] = &[];

    /// Card lines; the first one is the card heading.
    fn card(&self, loc: &Localization) -> Vec<String>;

    fn row(&self, loc: &Localization) -> Vec<String>;
}

pub fn render<R: Render>(records: &[&R], mode: ViewMode, columns: usize, loc: &Localization) -> String {
    if records.is_empty() {
        return R::EMPTY.to_string();
    }

    match mode {
        ViewMode::Grid => render_grid(records, columns, loc),
        ViewMode::List => render_table(records, loc),
    }
}

pub fn render_grid<R: Render>(records: &[&R], columns: usize, loc: &Localization) -> String {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);

    for chunk in records.chunks(columns.max(1)) {
        table.add_row(chunk.iter().map(|record| record.card(loc).join("\n")));
    }

    table.to_string()
}

pub fn render_table<R: Render>(records: &[&R], loc: &Localization) -> String {
    let mut table = Table::new();
    table
        .load_preset(presets::ASCII_FULL_CONDENSED)
        .set_header(R::COLUMNS.iter().copied());

    for record in records {
        table.add_row(record.row(loc));
    }

    for col in R::NUMERIC_COLUMNS {
        if let Some(column) = table.column_mut(*col) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    table.to_string()
}

/// Two-column label/value block used for the statistics cards of every page.
pub fn stats_table<L, V, I>(stats: I) -> String
where
    L: ToString,
    V: ToString,
    I: IntoIterator<Item = (L, V)>,
{
    let mut table = Table::new();
    table.load_preset(presets::ASCII_FULL_CONDENSED);

    for (label, value) in stats {
        table.add_row([label.to_string(), value.to_string()]);
    }

    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    table.to_string()
}

#[cfg(test)]
mod test {
    use super::*;

    struct Crate {
        label: &'static str,
        units: u32,
    }

    impl Render for Crate {
        const COLUMNS: &'static [&'static str] = &["Etiqueta", "Unidades"];
        const EMPTY: &'static str = "Nada";
        const NUMERIC_COLUMNS: &'static [usize] = &[1];
        const TITLE: &'static str = "Cajas";

        fn card(&self, _loc: &Localization) -> Vec<String> {
            vec![format!("# {}", self.label), format!("{} u.", self.units)]
        }

        fn row(&self, _loc: &Localization) -> Vec<String> {
            vec![self.label.to_string(), self.units.to_string()]
        }
    }

    fn crates() -> Vec<Crate> {
        vec![
            Crate { label: "alfa", units: 1 },
            Crate { label: "beta", units: 20 },
            Crate { label: "gamma", units: 300 },
        ]
    }

    #[test]
    fn test_table_has_header_and_rows() {
        let all = crates();
        let refs: Vec<&Crate> = all.iter().collect();
        let out = render(&refs, ViewMode::List, 3, &Localization::default());
        assert!(out.contains("Etiqueta"));
        assert!(out.contains("gamma"));
        assert!(out.contains("300"));
    }

    #[test]
    fn test_grid_holds_every_card() {
        let all = crates();
        let refs: Vec<&Crate> = all.iter().collect();
        let out = render(&refs, ViewMode::Grid, 2, &Localization::default());
        for c in &all {
            assert!(out.contains(&format!("# {}", c.label)));
        }
        assert!(!out.contains("Etiqueta"));
    }

    #[test]
    fn test_empty_message() {
        let refs: Vec<&Crate> = Vec::new();
        assert_eq!(render(&refs, ViewMode::Grid, 3, &Localization::default()), "Nada");
    }

    #[test]
    fn test_stats_table() {
        let out = stats_table([("Total", 3), ("Activos", 2)]);
        assert!(out.contains("Total"));
        assert!(out.contains("Activos"));
    }
}
