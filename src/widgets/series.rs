use serde::{Deserialize, Serialize};

use super::equality::search_eq_by_value;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeriesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A metric of an aggregation, e.g. `count()` or `avg(took_ms)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub function: String,
    #[serde(default)]
    pub config: SeriesConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFunction {
    pub name: String,
    pub field: Option<String>,
    pub parameter: Option<String>,
}

impl Series {
    pub fn for_function(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            config: SeriesConfig::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.config.name = Some(name.into());
        self
    }

    pub fn effective_name(&self) -> &str {
        self.config.name.as_deref().unwrap_or(&self.function)
    }

    /// Splits `name(field[,parameter])`. Returns `None` when the function
    /// string is not of that shape.
    pub fn parse_function(&self) -> Option<ParsedFunction> {
        let open = self.function.find('(')?;
        let inner = self.function[open + 1..].strip_suffix(')')?;
        let name = self.function[..open].trim();
        if name.is_empty() {
            return None;
        }

        let mut args = inner.splitn(2, ',').map(str::trim);
        let field = args
            .next()
            .filter(|f| !f.is_empty())
            .map(ToString::to_string);
        let parameter = args
            .next()
            .filter(|p| !p.is_empty())
            .map(ToString::to_string);

        Some(ParsedFunction {
            name: name.to_string(),
            field,
            parameter,
        })
    }
}

search_eq_by_value!(Series);
