use std::fmt::Write;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use num_format::Locale;
use num_format::ToFormattedString;

use crate::filter::SearchText;
use crate::types::CustomerKind;
use crate::types::EmploymentStatus;
use crate::types::MovementKind;
use crate::types::OrderStatus;

pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";
pub const DEFAULT_DATETIME_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Whether `format` is a strftime pattern that can render a calendar date on its own.
pub fn is_date_format(format: &str) -> bool {
    write!(String::new(), "{}", NaiveDate::default().format(format)).is_ok()
}

/// Whether `format` is a strftime pattern that can render a UTC timestamp.
pub fn is_datetime_format(format: &str) -> bool {
    write!(String::new(), "{}", DateTime::<Utc>::default().format(format)).is_ok()
}

/// Presentation settings shared by CSV export and rendering.
#[derive(Debug, Clone)]
pub struct Localization {
    date_format:     String,
    datetime_format: String,
    currency:        String,
    fold_accents:    bool,
}

impl Default for Localization {
    fn default() -> Self {
        Self {
            date_format:     DEFAULT_DATE_FORMAT.to_string(),
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
            currency:        "$".to_string(),
            fold_accents:    false,
        }
    }
}

impl Localization {
    pub fn with_date_format<S: ToString>(mut self, format: S) -> Self {
        self.date_format = format.to_string();
        self
    }

    pub fn with_datetime_format<S: ToString>(mut self, format: S) -> Self {
        self.datetime_format = format.to_string();
        self
    }

    pub fn with_currency<S: ToString>(mut self, symbol: S) -> Self {
        self.currency = symbol.to_string();
        self
    }

    pub fn with_fold_accents(mut self, fold: bool) -> Self {
        self.fold_accents = fold;
        self
    }

    pub fn fold_accents(&self) -> bool {
        self.fold_accents
    }

    pub fn search_text<S: AsRef<str>>(&self, raw: S) -> SearchText {
        SearchText::new(raw, self.fold_accents)
    }

    /// Falls back to ISO 8601 when the format needs fields a date doesn't have.
    pub fn date(&self, date: &NaiveDate) -> String {
        let mut out = String::new();
        match write!(out, "{}", date.format(&self.date_format)) {
            Ok(()) => out,
            Err(_) => date.to_string(),
        }
    }

    /// Falls back to RFC 3339 when the format can't be applied.
    pub fn datetime(&self, at: &DateTime<Utc>) -> String {
        let mut out = String::new();
        match write!(out, "{}", at.format(&self.datetime_format)) {
            Ok(()) => out,
            Err(_) => at.to_rfc3339(),
        }
    }

    /// Two decimals, no symbol.
    pub fn amount(&self, value: f64) -> String {
        format!("{value:.2}")
    }

    pub fn money(&self, value: f64) -> String {
        format!("{}{value:.2}", self.currency)
    }

    /// Rounded to whole units with thousands grouping, e.g. a salary.
    pub fn grouped(&self, value: f64) -> String {
        let whole = value.round() as i64;
        format!("{}{}", self.currency, whole.to_formatted_string(&Locale::en))
    }

    pub fn employment(&self, status: EmploymentStatus) -> &'static str {
        match status {
            EmploymentStatus::Active => "Activo",
            EmploymentStatus::Inactive => "Inactivo",
        }
    }

    pub fn customer_kind(&self, kind: CustomerKind) -> &'static str {
        match kind {
            CustomerKind::Retail => "Minorista",
            CustomerKind::Wholesale => "Mayorista",
        }
    }

    pub fn movement_kind(&self, kind: MovementKind) -> &'static str {
        match kind {
            MovementKind::In => "Entrada",
            MovementKind::Out => "Salida",
        }
    }

    pub fn order_status(&self, status: OrderStatus) -> &'static str {
        match status {
            OrderStatus::Pending => "Pendiente",
            OrderStatus::Processing => "Procesando",
            OrderStatus::Completed => "Completado",
            OrderStatus::Cancelled => "Cancelado",
        }
    }
}
