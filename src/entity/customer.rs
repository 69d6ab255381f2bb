use chrono::Datelike;
use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

use crate::export::CsvExport;
use crate::filter::Searchable;
use crate::locale::Localization;
use crate::types::CustomerKind;
use crate::view::Render;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Customer {
    pub id:         String,
    pub name:       String,
    pub email:      String,
    pub phone:      String,
    pub address:    String,
    #[serde(rename = "type")]
    pub kind:       CustomerKind,
    pub created_at: NaiveDate,
}

impl Customer {
    pub fn registered_in_month_of(&self, today: NaiveDate) -> bool {
        self.created_at.year() == today.year() && self.created_at.month() == today.month()
    }

    pub fn icon(&self) -> &'static str {
        match self.kind {
            CustomerKind::Retail => "🏪",
            CustomerKind::Wholesale => "🏢",
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CustomerStats {
    pub total:          usize,
    pub retail:         usize,
    pub wholesale:      usize,
    pub new_this_month: usize,
}

impl CustomerStats {
    pub fn collect<'a, I>(customers: I, today: NaiveDate) -> Self
    where
        I: IntoIterator<Item = &'a Customer>,
    {
        customers.into_iter().fold(Self::default(), |mut stats, customer| {
            stats.total += 1;
            match customer.kind {
                CustomerKind::Retail => stats.retail += 1,
                CustomerKind::Wholesale => stats.wholesale += 1,
            }
            if customer.registered_in_month_of(today) {
                stats.new_this_month += 1;
            }
            stats
        })
    }
}

impl Searchable for Customer {
    type Facet = CustomerKind;

    const FACET_NAME: &'static str = "type";

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str()]
    }

    fn facet(&self) -> CustomerKind {
        self.kind
    }
}

impl CsvExport for Customer {
    const FILE_NAME: &'static str = "clientes.csv";
    const HEADERS: &'static [&'static str] = &[
        "ID",
        "Nombre",
        "Email",
        "Teléfono",
        "Dirección",
        "Tipo",
        "Fecha de Registro",
    ];

    fn csv_record(&self, loc: &Localization) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.address.clone(),
            loc.customer_kind(self.kind).to_string(),
            loc.date(&self.created_at),
        ]
    }
}

impl Render for Customer {
    const COLUMNS: &'static [&'static str] = &["ID", "Nombre", "Email", "Teléfono", "Tipo", "Registro"];
    const EMPTY: &'static str = "No se encontraron clientes";
    const TITLE: &'static str = "Clientes";

    fn card(&self, loc: &Localization) -> Vec<String> {
        vec![
            format!("{} {}", self.icon(), self.name),
            loc.customer_kind(self.kind).to_string(),
            format!("Email: {}", self.email),
            format!("Teléfono: {}", self.phone),
            format!("Dirección: {}", self.address),
            format!("Cliente desde: {}", loc.date(&self.created_at)),
        ]
    }

    fn row(&self, loc: &Localization) -> Vec<String> {
        vec![
            self.id.clone(),
            format!("{} {}", self.icon(), self.name),
            self.email.clone(),
            self.phone.clone(),
            loc.customer_kind(self.kind).to_string(),
            loc.date(&self.created_at),
        ]
    }
}
