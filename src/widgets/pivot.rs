use serde::{Deserialize, Serialize};

use super::equality::search_eq_by_value;
use super::error::WidgetError;

pub const TIMESTAMP_FIELD: &str = "timestamp";
pub const DEFAULT_VALUES_LIMIT: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PivotType {
    Values,
    Time,
}

impl std::fmt::Display for PivotType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Values => "values",
            Self::Time => "time",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for PivotType {
    type Err = WidgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "values" => Ok(Self::Values),
            "time" => Ok(Self::Time),
            _ => Err(WidgetError::UnknownPivotType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuesConfig {
    pub limit: u32,
    #[serde(default)]
    pub skip_empty_values: bool,
}

impl Default for ValuesConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_VALUES_LIMIT,
            skip_empty_values: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Interval {
    Auto {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scaling: Option<f64>,
    },
    Timeunit {
        value: u32,
        unit: TimeUnit,
    },
}

impl Default for Interval {
    fn default() -> Self {
        Self::Auto { scaling: Some(1.0) }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeConfig {
    pub interval: Interval,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PivotConfig {
    Values(ValuesConfig),
    Time(TimeConfig),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotJson {
    #[serde(rename = "type")]
    pub pivot_type: String,
    pub fields: Vec<String>,
    pub config: serde_json::Value,
}

/// A grouping dimension of an aggregation, used as a row or column pivot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "PivotJson")]
pub struct Pivot {
    fields: Vec<String>,
    config: PivotConfig,
}

impl Pivot {
    pub fn new(fields: Vec<String>, config: PivotConfig) -> Self {
        Self { fields, config }
    }

    pub fn values<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            fields.into_iter().map(Into::into).collect(),
            PivotConfig::Values(ValuesConfig::default()),
        )
    }

    pub fn time<I, S>(fields: I, interval: Interval) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            fields.into_iter().map(Into::into).collect(),
            PivotConfig::Time(TimeConfig { interval }),
        )
    }

    pub fn timestamp() -> Self {
        Self::time([TIMESTAMP_FIELD], Interval::default())
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn config(&self) -> &PivotConfig {
        &self.config
    }

    pub fn pivot_type(&self) -> PivotType {
        match self.config {
            PivotConfig::Values(_) => PivotType::Values,
            PivotConfig::Time(_) => PivotType::Time,
        }
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    pub fn to_json(&self) -> Result<PivotJson, WidgetError> {
        let config = match &self.config {
            PivotConfig::Values(c) => serde_json::to_value(c),
            PivotConfig::Time(c) => serde_json::to_value(c),
        }?;

        Ok(PivotJson {
            pivot_type: self.pivot_type().to_string(),
            fields: self.fields.clone(),
            config,
        })
    }

    pub fn from_json(value: PivotJson) -> Result<Self, WidgetError> {
        let pivot_type: PivotType = value.pivot_type.parse()?;
        let config = match pivot_type {
            PivotType::Values => PivotConfig::Values(
                serde_json::from_value(value.config).map_err(|source| {
                    WidgetError::InvalidConfig {
                        kind: "values pivot",
                        source,
                    }
                })?,
            ),
            PivotType::Time => PivotConfig::Time(serde_json::from_value(value.config).map_err(
                |source| WidgetError::InvalidConfig {
                    kind: "time pivot",
                    source,
                },
            )?),
        };

        Ok(Self::new(value.fields, config))
    }
}

impl TryFrom<PivotJson> for Pivot {
    type Error = WidgetError;

    fn try_from(value: PivotJson) -> Result<Self, Self::Error> {
        Self::from_json(value)
    }
}

impl Serialize for Pivot {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

search_eq_by_value!(Pivot);
