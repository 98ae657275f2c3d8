use serde::{Deserialize, Serialize};

use super::equality::search_eq_by_value;
use super::error::WidgetError;

pub const BAR_VISUALIZATION: &str = "bar";
pub const LINE_VISUALIZATION: &str = "line";
pub const AREA_VISUALIZATION: &str = "area";
pub const NUMERIC_VISUALIZATION: &str = "numeric";
pub const TABLE_VISUALIZATION: &str = "table";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisType {
    #[default]
    Linear,
    Logarithmic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarMode {
    #[default]
    Group,
    Stack,
    Relative,
    Overlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Interpolation {
    #[default]
    Linear,
    StepAfter,
    Spline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrendPreference {
    Lower,
    #[default]
    Neutral,
    Higher,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BarVisualizationConfig {
    pub barmode: BarMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis_type: Option<AxisType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct XyVisualizationConfig {
    pub interpolation: Interpolation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis_type: Option<AxisType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NumberVisualizationConfig {
    pub trend: bool,
    pub trend_preference: TrendPreference,
}

/// Visualization-specific settings. Which variant applies depends on the
/// owning config's `visualization` name; unknown visualizations keep their
/// JSON untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum VisualizationConfig {
    Bar(BarVisualizationConfig),
    Line(XyVisualizationConfig),
    Area(XyVisualizationConfig),
    Numeric(NumberVisualizationConfig),
    Other(serde_json::Value),
}

fn parse<T: serde::de::DeserializeOwned>(
    kind: &'static str,
    value: serde_json::Value,
) -> Result<T, WidgetError> {
    serde_json::from_value(value).map_err(|source| WidgetError::InvalidConfig { kind, source })
}

impl VisualizationConfig {
    pub fn from_json(visualization: &str, value: serde_json::Value) -> Result<Self, WidgetError> {
        let config = match visualization {
            BAR_VISUALIZATION => Self::Bar(parse("bar visualization", value)?),
            LINE_VISUALIZATION => Self::Line(parse("line visualization", value)?),
            AREA_VISUALIZATION => Self::Area(parse("area visualization", value)?),
            NUMERIC_VISUALIZATION => Self::Numeric(parse("numeric visualization", value)?),
            _ => Self::Other(value),
        };
        Ok(config)
    }

    pub fn to_json(&self) -> Result<serde_json::Value, WidgetError> {
        let value = match self {
            Self::Bar(c) => serde_json::to_value(c)?,
            Self::Line(c) | Self::Area(c) => serde_json::to_value(c)?,
            Self::Numeric(c) => serde_json::to_value(c)?,
            Self::Other(v) => v.clone(),
        };
        Ok(value)
    }

    /// Re-derives the variant `from_json` would produce for `visualization`.
    /// Settings that cannot be read as that visualization's config, and a
    /// raw `null`, yield `None`.
    pub fn for_visualization(self, visualization: &str) -> Option<Self> {
        let config = match (visualization, self) {
            (_, Self::Other(serde_json::Value::Null)) => return None,
            (BAR_VISUALIZATION, c @ Self::Bar(_)) => c,
            (NUMERIC_VISUALIZATION, c @ Self::Numeric(_)) => c,
            (LINE_VISUALIZATION, Self::Line(c) | Self::Area(c)) => Self::Line(c),
            (AREA_VISUALIZATION, Self::Line(c) | Self::Area(c)) => Self::Area(c),
            (name, other) => Self::from_json(name, other.to_json().ok()?).ok()?,
        };
        Some(config)
    }
}

search_eq_by_value!(VisualizationConfig);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bar_config_delegation() {
        let config =
            VisualizationConfig::from_json("bar", json!({ "barmode": "stack" })).unwrap();
        assert_eq!(
            config,
            VisualizationConfig::Bar(BarVisualizationConfig {
                barmode: BarMode::Stack,
                axis_type: None,
            })
        );
        assert_eq!(config.to_json().unwrap(), json!({ "barmode": "stack" }));
    }

    #[test]
    fn test_numeric_config_wire_names() {
        let config = VisualizationConfig::Numeric(NumberVisualizationConfig {
            trend: true,
            trend_preference: TrendPreference::Lower,
        });
        assert_eq!(
            config.to_json().unwrap(),
            json!({ "trend": true, "trend_preference": "LOWER" })
        );
    }

    #[test]
    fn test_unknown_visualization_keeps_raw_json() {
        let raw = json!({ "color_scale": "Viridis", "reverse_scale": true });
        let config = VisualizationConfig::from_json("heatmap", raw.clone()).unwrap();
        assert_eq!(config, VisualizationConfig::Other(raw.clone()));
        assert_eq!(config.to_json().unwrap(), raw);
    }

    #[test]
    fn test_for_visualization_follows_the_name() {
        let xy = XyVisualizationConfig {
            interpolation: Interpolation::Spline,
            axis_type: Some(AxisType::Logarithmic),
        };
        assert_eq!(
            VisualizationConfig::Line(xy.clone()).for_visualization("area"),
            Some(VisualizationConfig::Area(xy.clone()))
        );
        assert_eq!(
            VisualizationConfig::Area(xy.clone()).for_visualization("heatmap"),
            Some(VisualizationConfig::Other(json!({
                "interpolation": "spline",
                "axis_type": "logarithmic"
            })))
        );
        assert_eq!(
            VisualizationConfig::Other(json!({ "barmode": "overlay" })).for_visualization("bar"),
            Some(VisualizationConfig::Bar(BarVisualizationConfig {
                barmode: BarMode::Overlay,
                axis_type: None,
            }))
        );
        assert_eq!(
            VisualizationConfig::Bar(BarVisualizationConfig::default()).for_visualization("line"),
            None
        );
        assert_eq!(
            VisualizationConfig::Other(serde_json::Value::Null).for_visualization("table"),
            None
        );
    }

    #[test]
    fn test_malformed_known_config_is_an_error() {
        let result = VisualizationConfig::from_json("line", json!({ "interpolation": 3 }));
        assert!(matches!(result, Err(WidgetError::InvalidConfig { .. })));
    }
}
