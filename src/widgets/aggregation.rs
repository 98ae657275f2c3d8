use serde::{Deserialize, Serialize};

use super::equality::SearchEq;
use super::error::WidgetError;
use super::formatting::{UnitsConfig, WidgetFormattingSettings};
use super::pivot::{Pivot, PivotType, TIMESTAMP_FIELD};
use super::series::Series;
use super::sort::SortConfig;
use super::visualization::{VisualizationConfig, TABLE_VISUALIZATION};

/// Wire representation of [`AggregationWidgetConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationWidgetConfigJson {
    pub column_pivots: Vec<Pivot>,
    pub row_pivots: Vec<Pivot>,
    pub series: Vec<Series>,
    pub sort: Vec<SortConfig>,
    pub visualization: String,
    pub rollup: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visualization_config: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatting_settings: Option<WidgetFormattingSettings>,
    #[serde(default)]
    pub event_annotation: bool,
    #[serde(default)]
    pub units: UnitsConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "AggregationWidgetConfigJson")]
pub struct AggregationWidgetConfig {
    row_pivots: Vec<Pivot>,
    column_pivots: Vec<Pivot>,
    series: Vec<Series>,
    sort: Vec<SortConfig>,
    visualization: String,
    rollup: bool,
    visualization_config: Option<VisualizationConfig>,
    formatting_settings: Option<WidgetFormattingSettings>,
    event_annotation: bool,
    units: UnitsConfig,
}

impl AggregationWidgetConfig {
    pub fn builder() -> AggregationWidgetConfigBuilder {
        AggregationWidgetConfigBuilder::default()
    }

    pub fn to_builder(&self) -> AggregationWidgetConfigBuilder {
        AggregationWidgetConfigBuilder {
            row_pivots: self.row_pivots.clone(),
            column_pivots: self.column_pivots.clone(),
            series: self.series.clone(),
            sort: self.sort.clone(),
            visualization: self.visualization.clone(),
            rollup: self.rollup,
            visualization_config: self.visualization_config.clone(),
            formatting_settings: self.formatting_settings.clone(),
            event_annotation: self.event_annotation,
            units: self.units.clone(),
        }
    }

    pub fn row_pivots(&self) -> &[Pivot] {
        &self.row_pivots
    }

    pub fn column_pivots(&self) -> &[Pivot] {
        &self.column_pivots
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn sort(&self) -> &[SortConfig] {
        &self.sort
    }

    pub fn visualization(&self) -> &str {
        &self.visualization
    }

    pub fn rollup(&self) -> bool {
        self.rollup
    }

    pub fn visualization_config(&self) -> Option<&VisualizationConfig> {
        self.visualization_config.as_ref()
    }

    pub fn formatting_settings(&self) -> Option<&WidgetFormattingSettings> {
        self.formatting_settings.as_ref()
    }

    pub fn event_annotation(&self) -> bool {
        self.event_annotation
    }

    pub fn units(&self) -> &UnitsConfig {
        &self.units
    }

    /// A single time pivot over the message timestamp.
    pub fn is_timeline(&self) -> bool {
        match self.row_pivots.as_slice() {
            [pivot] => {
                pivot.pivot_type() == PivotType::Time
                    && pivot.fields().first().map(String::as_str) == Some(TIMESTAMP_FIELD)
            }
            _ => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.row_pivots.is_empty() && self.column_pivots.is_empty() && self.series.is_empty()
    }

    /// Without column pivots there is nothing to roll up, so the backend
    /// always gets `true`.
    pub fn rollup_for_backend_query(&self) -> bool {
        if self.column_pivots.is_empty() {
            true
        } else {
            self.rollup
        }
    }

    pub fn to_json(&self) -> Result<AggregationWidgetConfigJson, WidgetError> {
        Ok(AggregationWidgetConfigJson {
            column_pivots: self.column_pivots.clone(),
            row_pivots: self.row_pivots.clone(),
            series: self.series.clone(),
            sort: self.sort.clone(),
            visualization: self.visualization.clone(),
            rollup: self.rollup,
            visualization_config: self
                .visualization_config
                .as_ref()
                .map(VisualizationConfig::to_json)
                .transpose()?,
            formatting_settings: self.formatting_settings.clone(),
            event_annotation: self.event_annotation,
            units: self.units.clone(),
        })
    }

    pub fn from_json(value: AggregationWidgetConfigJson) -> Result<Self, WidgetError> {
        let visualization_config = value
            .visualization_config
            .filter(|v| !v.is_null())
            .map(|v| VisualizationConfig::from_json(&value.visualization, v))
            .transpose()?;

        Ok(Self::builder()
            .column_pivots(value.column_pivots)
            .row_pivots(value.row_pivots)
            .series(value.series)
            .sort(value.sort)
            .visualization(value.visualization)
            .rollup(value.rollup)
            .visualization_config(visualization_config)
            .formatting_settings(value.formatting_settings)
            .event_annotation(value.event_annotation)
            .units(value.units)
            .build())
    }
}

impl SearchEq for AggregationWidgetConfig {
    fn equals_for_search(&self, other: &Self) -> bool {
        self.row_pivots.equals_for_search(&other.row_pivots)
            && self.column_pivots.equals_for_search(&other.column_pivots)
            && self.series.equals_for_search(&other.series)
            && self.sort.equals_for_search(&other.sort)
            && self.rollup == other.rollup
            && self.event_annotation == other.event_annotation
            && self
                .visualization_config
                .equals_for_search(&other.visualization_config)
    }
}

impl TryFrom<AggregationWidgetConfigJson> for AggregationWidgetConfig {
    type Error = WidgetError;

    fn try_from(value: AggregationWidgetConfigJson) -> Result<Self, Self::Error> {
        Self::from_json(value)
    }
}

impl Serialize for AggregationWidgetConfig {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

#[derive(Debug, Clone)]
pub struct AggregationWidgetConfigBuilder {
    row_pivots: Vec<Pivot>,
    column_pivots: Vec<Pivot>,
    series: Vec<Series>,
    sort: Vec<SortConfig>,
    visualization: String,
    rollup: bool,
    visualization_config: Option<VisualizationConfig>,
    formatting_settings: Option<WidgetFormattingSettings>,
    event_annotation: bool,
    units: UnitsConfig,
}

impl Default for AggregationWidgetConfigBuilder {
    fn default() -> Self {
        Self {
            row_pivots: Vec::new(),
            column_pivots: Vec::new(),
            series: Vec::new(),
            sort: Vec::new(),
            visualization: TABLE_VISUALIZATION.to_string(),
            rollup: false,
            visualization_config: None,
            formatting_settings: None,
            event_annotation: false,
            units: UnitsConfig::empty(),
        }
    }
}

impl AggregationWidgetConfigBuilder {
    pub fn row_pivots(mut self, pivots: Vec<Pivot>) -> Self {
        self.row_pivots = pivots;
        self
    }

    pub fn column_pivots(mut self, pivots: Vec<Pivot>) -> Self {
        self.column_pivots = pivots;
        self
    }

    pub fn series(mut self, series: Vec<Series>) -> Self {
        self.series = series;
        self
    }

    pub fn sort(mut self, sort: Vec<SortConfig>) -> Self {
        self.sort = sort;
        self
    }

    pub fn visualization(mut self, visualization: impl Into<String>) -> Self {
        self.visualization = visualization.into();
        self
    }

    pub fn rollup(mut self, rollup: bool) -> Self {
        self.rollup = rollup;
        self
    }

    pub fn visualization_config(mut self, config: Option<VisualizationConfig>) -> Self {
        self.visualization_config = config;
        self
    }

    pub fn formatting_settings(mut self, settings: Option<WidgetFormattingSettings>) -> Self {
        self.formatting_settings = settings;
        self
    }

    pub fn event_annotation(mut self, event_annotation: bool) -> Self {
        self.event_annotation = event_annotation;
        self
    }

    pub fn units(mut self, units: UnitsConfig) -> Self {
        self.units = units;
        self
    }

    /// Sorts must point at a series function or at a field of a row or
    /// column pivot; anything else is dropped. The visualization config is
    /// re-read as the config of `visualization`, see
    /// [`VisualizationConfig::for_visualization`].
    pub fn build(self) -> AggregationWidgetConfig {
        let Self {
            row_pivots,
            column_pivots,
            series,
            sort,
            visualization,
            rollup,
            visualization_config,
            formatting_settings,
            event_annotation,
            units,
        } = self;

        let sort = sort
            .into_iter()
            .filter(|s| {
                series.iter().any(|ser| ser.function == s.field)
                    || row_pivots
                        .iter()
                        .chain(column_pivots.iter())
                        .any(|p| p.has_field(&s.field))
            })
            .collect();
        let visualization_config =
            visualization_config.and_then(|c| c.for_visualization(&visualization));

        AggregationWidgetConfig {
            row_pivots,
            column_pivots,
            series,
            sort,
            visualization,
            rollup,
            visualization_config,
            formatting_settings,
            event_annotation,
            units,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::formatting::FieldUnit;
    use crate::widgets::pivot::Interval;
    use crate::widgets::sort::Direction;
    use crate::widgets::visualization::{
        BarMode, BarVisualizationConfig, Interpolation, NumberVisualizationConfig,
        TrendPreference, XyVisualizationConfig,
    };
    use serde_json::json;

    fn sample() -> AggregationWidgetConfig {
        AggregationWidgetConfig::builder()
            .row_pivots(vec![Pivot::timestamp()])
            .column_pivots(vec![Pivot::values(["source"])])
            .series(vec![Series::for_function("count()"), Series::for_function("avg(took_ms)")])
            .sort(vec![
                SortConfig::series("count()", Direction::Descending),
                SortConfig::pivot("source", Direction::Ascending),
            ])
            .visualization("bar")
            .rollup(true)
            .visualization_config(Some(VisualizationConfig::Bar(BarVisualizationConfig {
                barmode: BarMode::Stack,
                axis_type: None,
            })))
            .formatting_settings(Some(
                WidgetFormattingSettings::default().with_chart_color("count()", "#ff0000"),
            ))
            .units(UnitsConfig::empty().with_field_unit("took_ms", FieldUnit::new("ms", "time")))
            .build()
    }

    #[test]
    fn test_builder_defaults() {
        let config = AggregationWidgetConfig::builder().build();
        assert!(config.row_pivots().is_empty());
        assert!(config.column_pivots().is_empty());
        assert!(config.series().is_empty());
        assert!(config.sort().is_empty());
        assert!(!config.rollup());
        assert!(!config.event_annotation());
        assert!(config.units().is_empty());
        assert!(config.is_empty());
    }

    #[test]
    fn test_build_drops_dangling_sorts() {
        let config = AggregationWidgetConfig::builder()
            .row_pivots(vec![Pivot::values(["source"])])
            .series(vec![Series::for_function("count()")])
            .sort(vec![
                SortConfig::pivot("source", Direction::Ascending),
                SortConfig::pivot("nonexistent", Direction::Ascending),
                SortConfig::series("max(took_ms)", Direction::Descending),
                SortConfig::series("count()", Direction::Descending),
            ])
            .build();

        assert_eq!(
            config.sort(),
            &[
                SortConfig::pivot("source", Direction::Ascending),
                SortConfig::series("count()", Direction::Descending),
            ]
        );
    }

    #[test]
    fn test_to_builder_rebuild_revalidates_sort() {
        let config = sample();
        let narrowed = config
            .to_builder()
            .column_pivots(vec![])
            .build();
        assert_eq!(narrowed.sort().len(), 1);
        assert_eq!(config.sort().len(), 2);
    }

    #[test]
    fn test_json_round_trip() {
        let config = sample();
        let value = serde_json::to_value(&config).unwrap();
        let parsed: AggregationWidgetConfig = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_round_trip_for_any_visualization_pairing() {
        let xy = XyVisualizationConfig {
            interpolation: Interpolation::StepAfter,
            axis_type: None,
        };
        let configs = [
            None,
            Some(VisualizationConfig::Bar(BarVisualizationConfig::default())),
            Some(VisualizationConfig::Line(xy.clone())),
            Some(VisualizationConfig::Area(xy)),
            Some(VisualizationConfig::Numeric(NumberVisualizationConfig {
                trend: true,
                trend_preference: TrendPreference::Higher,
            })),
            Some(VisualizationConfig::Other(json!({ "color_scale": "Viridis" }))),
            Some(VisualizationConfig::Other(serde_json::Value::Null)),
        ];

        for name in ["bar", "line", "area", "numeric", "table", "heatmap"] {
            for visualization_config in configs.iter().cloned() {
                let config = AggregationWidgetConfig::builder()
                    .visualization(name)
                    .visualization_config(visualization_config.clone())
                    .build();
                let value = serde_json::to_value(&config).unwrap();
                let parsed: AggregationWidgetConfig = serde_json::from_value(value).unwrap();
                assert_eq!(parsed, config, "{name} with {visualization_config:?}");
            }
        }
    }

    #[test]
    fn test_build_retags_line_settings_for_area() {
        let xy = XyVisualizationConfig::default();
        let config = AggregationWidgetConfig::builder()
            .visualization("area")
            .visualization_config(Some(VisualizationConfig::Line(xy.clone())))
            .build();
        assert_eq!(
            config.visualization_config(),
            Some(&VisualizationConfig::Area(xy))
        );
    }

    #[test]
    fn test_wire_keys_are_snake_case() {
        let value = serde_json::to_value(sample()).unwrap();
        let obj = value.as_object().unwrap();
        for key in [
            "row_pivots",
            "column_pivots",
            "series",
            "sort",
            "visualization",
            "visualization_config",
            "rollup",
            "formatting_settings",
            "event_annotation",
            "units",
        ] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        assert_eq!(value["visualization_config"], json!({ "barmode": "stack" }));
    }

    #[test]
    fn test_missing_pivots_is_an_error() {
        let result = serde_json::from_value::<AggregationWidgetConfig>(json!({
            "row_pivots": [],
            "series": [],
            "sort": [],
            "visualization": "table",
            "rollup": false
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_formatting_only_difference() {
        let a = sample();
        let b = a
            .to_builder()
            .formatting_settings(Some(
                WidgetFormattingSettings::default().with_chart_color("count()", "#00ff00"),
            ))
            .build();

        assert_ne!(a, b);
        assert!(a.equals_for_search(&b));
        assert!(b.equals_for_search(&a));
    }

    #[test]
    fn test_series_difference_breaks_search_equality() {
        let a = sample();
        let b = a
            .to_builder()
            .series(vec![Series::for_function("count()")])
            .build();
        assert!(!a.equals_for_search(&b));
    }

    #[test]
    fn test_equality_is_reflexive_and_symmetric() {
        let a = sample();
        let b = sample();
        assert_eq!(a, a.clone());
        assert_eq!(a == b, b == a);
        assert!(a.equals_for_search(&a));
    }

    #[test]
    fn test_is_timeline() {
        let timeline = AggregationWidgetConfig::builder()
            .row_pivots(vec![Pivot::timestamp()])
            .build();
        assert!(timeline.is_timeline());

        let other_field = AggregationWidgetConfig::builder()
            .row_pivots(vec![Pivot::time(["received_at"], Interval::default())])
            .build();
        assert!(!other_field.is_timeline());

        let two = AggregationWidgetConfig::builder()
            .row_pivots(vec![Pivot::timestamp(), Pivot::values(["source"])])
            .build();
        assert!(!two.is_timeline());
    }

    #[test]
    fn test_rollup_for_backend_query() {
        let no_columns = AggregationWidgetConfig::builder().rollup(false).build();
        assert!(no_columns.rollup_for_backend_query());

        let with_columns = AggregationWidgetConfig::builder()
            .column_pivots(vec![Pivot::values(["source"])])
            .rollup(false)
            .build();
        assert!(!with_columns.rollup_for_backend_query());
    }
}
