use std::fmt::Display;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use strum::Display;
use strum::EnumIter;
use strum::EnumString;

use crate::error::DashError;

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum MovementKind {
    #[strum(serialize = "IN")]
    #[serde(rename = "IN")]
    In,
    #[strum(serialize = "OUT")]
    #[serde(rename = "OUT")]
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerKind {
    Retail,
    Wholesale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
}

/// Employee filter facet. Records only carry an `is_active` flag; this is its filterable face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum EmploymentStatus {
    Active,
    Inactive,
}

impl From<bool> for EmploymentStatus {
    fn from(is_active: bool) -> Self {
        if is_active {
            Self::Active
        } else {
            Self::Inactive
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
pub enum StockLevel {
    Low,
    Warning,
    Healthy,
}

impl StockLevel {
    pub fn of(stock: u32, min_stock: u32) -> Self {
        if stock <= min_stock {
            Self::Low
        } else if u64::from(stock) <= u64::from(min_stock) * 2 {
            Self::Warning
        } else {
            Self::Healthy
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Low => "🔴",
            Self::Warning => "🟡",
            Self::Healthy => "🟢",
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn toggle(self) -> Self {
        match self {
            Self::Grid => Self::List,
            Self::List => Self::Grid,
        }
    }
}

/// A categorical filter: either everything (`ALL`) or records whose facet equals the value.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl<T: Display> Display for Selection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "ALL"),
            Self::Only(value) => write!(f, "{value}"),
        }
    }
}

impl<T> Selection<T> {
    /// Parses `ALL` (any case) or an empty string as [`Selection::All`], anything else through `parse`.
    pub fn parse_with<F>(raw: &str, parse: F) -> Result<Self, DashError>
    where
        F: FnOnce(&str) -> Result<T, DashError>,
    {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("ALL") {
            Ok(Self::All)
        } else {
            parse(raw).map(Self::Only)
        }
    }
}

impl<T> Selection<T>
where
    T: FromStr,
{
    pub fn parse(field: &'static str, raw: &str) -> Result<Self, DashError> {
        Self::parse_with(raw, |value| {
            value.parse::<T>().map_err(|_| DashError::invalid_filter(field, value))
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_stock_level_thresholds() {
        assert_eq!(StockLevel::of(12, 25), StockLevel::Low);
        assert_eq!(StockLevel::of(25, 25), StockLevel::Low);
        assert_eq!(StockLevel::of(26, 25), StockLevel::Warning);
        assert_eq!(StockLevel::of(50, 25), StockLevel::Warning);
        assert_eq!(StockLevel::of(51, 25), StockLevel::Healthy);
        assert_eq!(StockLevel::of(0, 0), StockLevel::Low);
    }

    #[test]
    fn test_selection_parsing() {
        assert_eq!(Selection::<OrderStatus>::parse("status", "ALL").unwrap(), Selection::All);
        assert_eq!(Selection::<OrderStatus>::parse("status", "").unwrap(), Selection::All);
        assert_eq!(
            Selection::<OrderStatus>::parse("status", "completed").unwrap(),
            Selection::Only(OrderStatus::Completed)
        );
        assert_eq!(
            Selection::<MovementKind>::parse("type", "OUT").unwrap(),
            Selection::Only(MovementKind::Out)
        );
        assert!(matches!(
            Selection::<CustomerKind>::parse("type", "VIP"),
            Err(DashError::InvalidFilter { field: "type", .. })
        ));
    }

    #[test]
    fn test_view_toggle() {
        assert_eq!(ViewMode::default(), ViewMode::Grid);
        assert_eq!(ViewMode::Grid.toggle(), ViewMode::List);
        assert_eq!(ViewMode::Grid.toggle().toggle(), ViewMode::Grid);
    }

    #[test]
    fn test_enum_labels() {
        assert_eq!(OrderStatus::Processing.to_string(), "PROCESSING");
        assert_eq!(CustomerKind::Wholesale.to_string(), "WHOLESALE");
        assert_eq!(MovementKind::In.to_string(), "IN");
        assert_eq!(EmploymentStatus::from(false), EmploymentStatus::Inactive);
    }
}
