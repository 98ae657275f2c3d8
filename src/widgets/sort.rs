use serde::{Deserialize, Serialize};

use super::equality::search_eq_by_value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortType {
    Pivot,
    Series,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    #[serde(rename = "type")]
    pub sort_type: SortType,
    pub field: String,
    pub direction: Direction,
}

impl SortConfig {
    pub fn pivot(field: impl Into<String>, direction: Direction) -> Self {
        Self {
            sort_type: SortType::Pivot,
            field: field.into(),
            direction,
        }
    }

    pub fn series(function: impl Into<String>, direction: Direction) -> Self {
        Self {
            sort_type: SortType::Series,
            field: function.into(),
            direction,
        }
    }
}

search_eq_by_value!(SortConfig);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sort_wire_format() {
        let sort = SortConfig::series("count()", Direction::Descending);
        assert_eq!(
            serde_json::to_value(&sort).unwrap(),
            json!({ "type": "series", "field": "count()", "direction": "Descending" })
        );
    }

    #[test]
    fn test_direction_reversed() {
        assert_eq!(Direction::Ascending.reversed(), Direction::Descending);
        assert_eq!(Direction::Descending.reversed(), Direction::Ascending);
    }
}
