use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::equality::search_eq_by_value;

pub const ELASTICSEARCH_QUERY: &str = "elasticsearch";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RelativeRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TimeRange {
    Relative(RelativeRange),
    Absolute {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },
    Keyword {
        keyword: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timezone: Option<String>,
    },
}

impl TimeRange {
    /// Last `seconds` seconds.
    pub fn last(seconds: u64) -> Self {
        Self::Relative(RelativeRange {
            range: Some(seconds),
            ..Default::default()
        })
    }

    pub fn keyword(keyword: impl Into<String>) -> Self {
        Self::Keyword {
            keyword: keyword.into(),
            timezone: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryString {
    #[serde(rename = "type")]
    pub query_type: String,
    pub query_string: String,
}

impl QueryString {
    pub fn elasticsearch(query: impl Into<String>) -> Self {
        Self {
            query_type: ELASTICSEARCH_QUERY.to_string(),
            query_string: query.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.query_string.trim().is_empty()
    }
}

/// Additional filter attached to a widget or query, either inline or a
/// reference to a stored filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    #[serde(rename = "type")]
    pub filter_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_string: Option<String>,
    #[serde(default)]
    pub negation: bool,
    #[serde(default)]
    pub disabled: bool,
}

impl SearchFilter {
    pub fn inline(query: impl Into<String>) -> Self {
        Self {
            filter_type: "inlineQueryString".to_string(),
            id: None,
            title: None,
            description: None,
            query_string: Some(query.into()),
            negation: false,
            disabled: false,
        }
    }

    pub fn negated(mut self) -> Self {
        self.negation = true;
        self
    }
}

search_eq_by_value!(TimeRange, QueryString, SearchFilter);
