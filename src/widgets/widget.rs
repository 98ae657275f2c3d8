use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::aggregation::AggregationWidgetConfig;
use super::equality::SearchEq;
use super::error::WidgetError;
use super::messages::MessagesWidgetConfig;
use super::query::{QueryString, SearchFilter, TimeRange};

pub const MESSAGES_WIDGET: &str = "messages";
pub const AGGREGATION_WIDGET: &str = "aggregation";

/// Typed widget configuration. Widgets of a type this crate does not know
/// (e.g. contributed by a server plugin) keep their config as raw JSON so
/// they survive a load/save cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetConfig {
    Aggregation(AggregationWidgetConfig),
    Messages(MessagesWidgetConfig),
    Unknown {
        widget_type: String,
        config: serde_json::Value,
    },
}

impl WidgetConfig {
    pub fn widget_type(&self) -> &str {
        match self {
            Self::Aggregation(_) => AGGREGATION_WIDGET,
            Self::Messages(_) => MESSAGES_WIDGET,
            Self::Unknown { widget_type, .. } => widget_type,
        }
    }

    pub fn from_json(widget_type: &str, value: serde_json::Value) -> Result<Self, WidgetError> {
        let config = match widget_type {
            AGGREGATION_WIDGET => Self::Aggregation(serde_json::from_value(value)?),
            MESSAGES_WIDGET => Self::Messages(serde_json::from_value(value)?),
            other => Self::Unknown {
                widget_type: other.to_string(),
                config: value,
            },
        };
        Ok(config)
    }

    pub fn to_json(&self) -> Result<serde_json::Value, WidgetError> {
        let value = match self {
            Self::Aggregation(c) => serde_json::to_value(c)?,
            Self::Messages(c) => serde_json::to_value(c)?,
            Self::Unknown { config, .. } => config.clone(),
        };
        Ok(value)
    }
}

impl From<AggregationWidgetConfig> for WidgetConfig {
    fn from(config: AggregationWidgetConfig) -> Self {
        Self::Aggregation(config)
    }
}

impl From<MessagesWidgetConfig> for WidgetConfig {
    fn from(config: MessagesWidgetConfig) -> Self {
        Self::Messages(config)
    }
}

impl SearchEq for WidgetConfig {
    fn equals_for_search(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Aggregation(a), Self::Aggregation(b)) => a.equals_for_search(b),
            (Self::Messages(a), Self::Messages(b)) => a.equals_for_search(b),
            (Self::Unknown { .. }, Self::Unknown { .. }) => self == other,
            _ => false,
        }
    }
}

/// Wire representation of [`Widget`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetJson {
    pub id: String,
    #[serde(rename = "type")]
    pub widget_type: String,
    pub config: serde_json::Value,
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default)]
    pub timerange: Option<TimeRange>,
    #[serde(default)]
    pub query: Option<QueryString>,
    #[serde(default)]
    pub streams: Vec<String>,
    #[serde(default)]
    pub stream_categories: Vec<String>,
    #[serde(default)]
    pub filters: Vec<SearchFilter>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "WidgetJson")]
pub struct Widget {
    id: String,
    config: WidgetConfig,
    filter: Option<String>,
    timerange: Option<TimeRange>,
    query: Option<QueryString>,
    streams: Vec<String>,
    stream_categories: Vec<String>,
    filters: Vec<SearchFilter>,
}

impl Widget {
    pub fn builder() -> WidgetBuilder {
        WidgetBuilder::default()
    }

    pub fn messages(config: MessagesWidgetConfig) -> WidgetBuilder {
        Self::builder().new_id().config(config)
    }

    pub fn aggregation(config: AggregationWidgetConfig) -> WidgetBuilder {
        Self::builder().new_id().config(config)
    }

    pub fn to_builder(&self) -> WidgetBuilder {
        WidgetBuilder {
            id: Some(self.id.clone()),
            config: Some(self.config.clone()),
            filter: self.filter.clone(),
            timerange: self.timerange.clone(),
            query: self.query.clone(),
            streams: self.streams.clone(),
            stream_categories: self.stream_categories.clone(),
            filters: self.filters.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn widget_type(&self) -> &str {
        self.config.widget_type()
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn timerange(&self) -> Option<&TimeRange> {
        self.timerange.as_ref()
    }

    pub fn query(&self) -> Option<&QueryString> {
        self.query.as_ref()
    }

    pub fn streams(&self) -> &[String] {
        &self.streams
    }

    pub fn stream_categories(&self) -> &[String] {
        &self.stream_categories
    }

    pub fn filters(&self) -> &[SearchFilter] {
        &self.filters
    }

    pub fn is_messages_widget(&self) -> bool {
        matches!(self.config, WidgetConfig::Messages(_))
    }

    pub fn is_exportable(&self) -> bool {
        self.is_messages_widget()
    }

    pub fn default_title(&self) -> &'static str {
        match self.config {
            WidgetConfig::Messages(_) => "Untitled Message Table",
            WidgetConfig::Aggregation(_) => "Untitled Aggregation",
            WidgetConfig::Unknown { .. } => "Unknown Widget",
        }
    }

    pub fn to_json(&self) -> Result<WidgetJson, WidgetError> {
        Ok(WidgetJson {
            id: self.id.clone(),
            widget_type: self.widget_type().to_string(),
            config: self.config.to_json()?,
            filter: self.filter.clone(),
            timerange: self.timerange.clone(),
            query: self.query.clone(),
            streams: self.streams.clone(),
            stream_categories: self.stream_categories.clone(),
            filters: self.filters.clone(),
        })
    }

    pub fn from_json(value: WidgetJson) -> Result<Self, WidgetError> {
        let config = WidgetConfig::from_json(&value.widget_type, value.config)?;

        Self::builder()
            .id(value.id)
            .config(config)
            .filter(value.filter)
            .timerange(value.timerange)
            .query(value.query)
            .streams(value.streams)
            .stream_categories(value.stream_categories)
            .filters(value.filters)
            .build()
    }
}

impl SearchEq for Widget {
    fn equals_for_search(&self, other: &Self) -> bool {
        self.id == other.id
            && self.config.equals_for_search(&other.config)
            && self.filter == other.filter
            && self.timerange.equals_for_search(&other.timerange)
            && self.query.equals_for_search(&other.query)
            && self.streams == other.streams
            && self.stream_categories == other.stream_categories
            && self.filters.equals_for_search(&other.filters)
    }
}

impl TryFrom<WidgetJson> for Widget {
    type Error = WidgetError;

    fn try_from(value: WidgetJson) -> Result<Self, Self::Error> {
        Self::from_json(value)
    }
}

impl Serialize for Widget {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

#[derive(Debug, Clone, Default)]
pub struct WidgetBuilder {
    id: Option<String>,
    config: Option<WidgetConfig>,
    filter: Option<String>,
    timerange: Option<TimeRange>,
    query: Option<QueryString>,
    streams: Vec<String>,
    stream_categories: Vec<String>,
    filters: Vec<SearchFilter>,
}

impl WidgetBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn new_id(self) -> Self {
        self.id(Uuid::new_v4().to_string())
    }

    pub fn config(mut self, config: impl Into<WidgetConfig>) -> Self {
        self.config = Some(config.into());
        self
    }

    pub fn filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter;
        self
    }

    pub fn timerange(mut self, timerange: Option<TimeRange>) -> Self {
        self.timerange = timerange;
        self
    }

    pub fn query(mut self, query: Option<QueryString>) -> Self {
        self.query = query;
        self
    }

    pub fn streams(mut self, streams: Vec<String>) -> Self {
        self.streams = streams;
        self
    }

    pub fn stream_categories(mut self, stream_categories: Vec<String>) -> Self {
        self.stream_categories = stream_categories;
        self
    }

    pub fn filters(mut self, filters: Vec<SearchFilter>) -> Self {
        self.filters = filters;
        self
    }

    /// Assigns a fresh id when none was set.
    pub fn build(self) -> Result<Widget, WidgetError> {
        let id = self.id.unwrap_or_else(|| Uuid::new_v4().to_string());
        let config = self.config.ok_or_else(|| WidgetError::MissingConfig(id.clone()))?;

        Ok(Widget {
            id,
            config,
            filter: self.filter,
            timerange: self.timerange,
            query: self.query,
            streams: self.streams,
            stream_categories: self.stream_categories,
            filters: self.filters,
        })
    }
}
