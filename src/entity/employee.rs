use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

use crate::export::CsvExport;
use crate::filter::Searchable;
use crate::locale::Localization;
use crate::types::EmploymentStatus;
use crate::view::Render;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Employee {
    pub id:         String,
    pub name:       String,
    pub position:   String,
    pub email:      String,
    pub phone:      String,
    pub address:    String,
    pub salary:     f64,
    pub hire_date:  NaiveDate,
    pub is_active:  bool,
    pub department: String,
}

impl Employee {
    pub fn status(&self) -> EmploymentStatus {
        EmploymentStatus::from(self.is_active)
    }

    pub fn position_icon(&self) -> &'static str {
        let position = self.position.to_lowercase();
        if position.contains("gerente") {
            "👔"
        } else if position.contains("vendedor") {
            "🛍️"
        } else if position.contains("almacén") || position.contains("almacen") {
            "📦"
        } else if position.contains("repartidor") {
            "🚚"
        } else if position.contains("cajero") {
            "💰"
        } else if position.contains("contador") {
            "📊"
        } else {
            "👤"
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EmployeeStats {
    pub count:    usize,
    pub active:   usize,
    pub inactive: usize,
}

impl EmployeeStats {
    pub fn collect<'a, I>(employees: I) -> Self
    where
        I: IntoIterator<Item = &'a Employee>,
    {
        employees.into_iter().fold(Self::default(), |mut stats, employee| {
            stats.count += 1;
            if employee.is_active {
                stats.active += 1;
            } else {
                stats.inactive += 1;
            }
            stats
        })
    }

    /// Share of active employees, rounded to a whole percent. Zero for an empty set.
    pub fn active_percent(&self) -> u32 {
        if self.count == 0 {
            0
        } else {
            (self.active as f64 / self.count as f64 * 100.0).round() as u32
        }
    }
}

impl Searchable for Employee {
    type Facet = EmploymentStatus;

    const FACET_NAME: &'static str = "status";

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.position.as_str(),
            self.department.as_str(),
            self.email.as_str(),
        ]
    }

    fn facet(&self) -> EmploymentStatus {
        self.status()
    }
}

impl CsvExport for Employee {
    const FILE_NAME: &'static str = "empleados.csv";
    const HEADERS: &'static [&'static str] = &["ID", "Nombre", "Posición", "Departamento", "Email", "Estado"];

    fn csv_record(&self, loc: &Localization) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.position.clone(),
            self.department.clone(),
            self.email.clone(),
            loc.employment(self.status()).to_string(),
        ]
    }
}

impl Render for Employee {
    const COLUMNS: &'static [&'static str] = &["ID", "Nombre", "Posición", "Departamento", "Email", "Salario", "Estado"];
    const EMPTY: &'static str = "No se encontraron empleados";
    const NUMERIC_COLUMNS: &'static [usize] = &[5];
    const TITLE: &'static str = "Empleados";

    fn card(&self, loc: &Localization) -> Vec<String> {
        vec![
            format!("{} {}", self.position_icon(), self.name),
            format!("{} · {}", self.position, self.department),
            format!("Estado: {}", loc.employment(self.status())),
            format!("Email: {}", self.email),
            format!("Teléfono: {}", self.phone),
            format!("Dirección: {}", self.address),
            format!("Salario: {}", loc.grouped(self.salary)),
            format!("Desde: {}", loc.date(&self.hire_date)),
        ]
    }

    fn row(&self, loc: &Localization) -> Vec<String> {
        vec![
            self.id.clone(),
            format!("{} {}", self.position_icon(), self.name),
            self.position.clone(),
            self.department.clone(),
            self.email.clone(),
            loc.grouped(self.salary),
            loc.employment(self.status()).to_string(),
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
    fn test_active_percentage() {
        let data = Dataset::sample();
        let stats = EmployeeStats::collect(&data.employees);
        assert_eq!(stats.count, 4);
        assert_eq!(stats.active, 3);
        assert_eq!(stats.inactive, 1);
        assert_eq!(stats.active_percent(), 75);
        assert_eq!(EmployeeStats::default().active_percent(), 0);
    }

    #[test]
    fn test_status_filter() {
        let data = Dataset::sample();
        let inactive = Query::default()
            .with_facet(Selection::Only(EmploymentStatus::Inactive))
            .apply(&data.employees);
        assert_eq!(inactive.len(), 1);
        assert_eq!(inactive[0].name, "Luis Fernández");
    }

    #[test]
    fn test_search_by_department() {
        let data = Dataset::sample();
        let loc = Localization::default();
        let ventas = Query::default()
            .with_search(loc.search_text("VENTAS"))
            .apply(&data.employees);
        assert_eq!(ventas.len(), 2);
        let stats = EmployeeStats::collect(ventas.iter().copied());
        assert_eq!(stats.active_percent(), 100);
    }

    #[test]
    fn test_position_icons() {
        let data = Dataset::sample();
        let icons: Vec<&str> = data.employees.iter().map(|e| e.position_icon()).collect();
        assert_eq!(icons, vec!["👔", "📦", "👤", "🚚"]);
    }

    #[test]
    fn test_csv_status_label() {
        let data = Dataset::sample();
        let record = data.employees[3].csv_record(&Localization::default());
        assert_eq!(record.last().map(String::as_str), Some("Inactivo"));
    }
}
