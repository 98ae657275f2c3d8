use serde::{Deserialize, Serialize};

use super::equality::{search_eq_by_value, SearchEq};
use super::formatting::UnitsConfig;
use super::sort::SortConfig;

pub const DEFAULT_MESSAGE_FIELDS: [&str; 2] = ["timestamp", "source"];

/// Message decorator applied to each row of a message table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decorator {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub decorator_type: String,
    #[serde(default)]
    pub config: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<String>,
    pub order: u32,
}

search_eq_by_value!(Decorator);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagesWidgetConfig {
    fields: Vec<String>,
    show_message_row: bool,
    #[serde(default)]
    show_summary: bool,
    #[serde(default)]
    decorators: Vec<Decorator>,
    sort: Vec<SortConfig>,
    #[serde(default)]
    units: UnitsConfig,
}

impl MessagesWidgetConfig {
    pub fn builder() -> MessagesWidgetConfigBuilder {
        MessagesWidgetConfigBuilder::default()
    }

    pub fn to_builder(&self) -> MessagesWidgetConfigBuilder {
        MessagesWidgetConfigBuilder {
            inner: self.clone(),
        }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn show_message_row(&self) -> bool {
        self.show_message_row
    }

    pub fn show_summary(&self) -> bool {
        self.show_summary
    }

    pub fn decorators(&self) -> &[Decorator] {
        &self.decorators
    }

    pub fn sort(&self) -> &[SortConfig] {
        &self.sort
    }

    pub fn units(&self) -> &UnitsConfig {
        &self.units
    }
}

impl SearchEq for MessagesWidgetConfig {
    fn equals_for_search(&self, other: &Self) -> bool {
        self.sort.equals_for_search(&other.sort)
            && self.decorators.equals_for_search(&other.decorators)
    }
}

#[derive(Debug, Clone)]
pub struct MessagesWidgetConfigBuilder {
    inner: MessagesWidgetConfig,
}

impl Default for MessagesWidgetConfigBuilder {
    fn default() -> Self {
        Self {
            inner: MessagesWidgetConfig {
                fields: Vec::new(),
                show_message_row: true,
                show_summary: false,
                decorators: Vec::new(),
                sort: Vec::new(),
                units: UnitsConfig::empty(),
            },
        }
    }
}

impl MessagesWidgetConfigBuilder {
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn show_message_row(mut self, show: bool) -> Self {
        self.inner.show_message_row = show;
        self
    }

    pub fn show_summary(mut self, show: bool) -> Self {
        self.inner.show_summary = show;
        self
    }

    pub fn decorators(mut self, decorators: Vec<Decorator>) -> Self {
        self.inner.decorators = decorators;
        self
    }

    pub fn sort(mut self, sort: Vec<SortConfig>) -> Self {
        self.inner.sort = sort;
        self
    }

    pub fn units(mut self, units: UnitsConfig) -> Self {
        self.inner.units = units;
        self
    }

    pub fn build(self) -> MessagesWidgetConfig {
        self.inner
    }
}
