use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::equality::search_eq_by_value;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WidgetFormattingSettings {
    #[serde(default)]
    pub chart_colors: BTreeMap<String, String>,
}

impl WidgetFormattingSettings {
    pub fn with_chart_color(mut self, field: impl Into<String>, color: impl Into<String>) -> Self {
        self.chart_colors.insert(field.into(), color.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldUnit {
    pub abbrev: String,
    pub unit_type: String,
}

impl FieldUnit {
    pub fn new(abbrev: impl Into<String>, unit_type: impl Into<String>) -> Self {
        Self {
            abbrev: abbrev.into(),
            unit_type: unit_type.into(),
        }
    }
}

/// Display units per field, keyed by field name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitsConfig(BTreeMap<String, FieldUnit>);

impl UnitsConfig {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&FieldUnit> {
        self.0.get(field)
    }

    pub fn with_field_unit(mut self, field: impl Into<String>, unit: FieldUnit) -> Self {
        self.0.insert(field.into(), unit);
        self
    }
}

search_eq_by_value!(WidgetFormattingSettings, UnitsConfig);
