use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::widgets::Widget;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 10;
pub const DEFAULT_SORT_FIELD: &str = "title";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ViewType {
    #[default]
    Search,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(format!("Unknown sort order: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetPosition {
    pub col: u32,
    pub row: u32,
    pub height: u32,
    pub width: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewState {
    #[serde(default)]
    pub widgets: Vec<Widget>,
    /// Titles by kind (`widget`, `tab`), then by id.
    #[serde(default)]
    pub titles: BTreeMap<String, BTreeMap<String, String>>,
    #[serde(default)]
    pub positions: BTreeMap<String, WidgetPosition>,
    #[serde(default)]
    pub widget_mapping: BTreeMap<String, Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_fields: Option<Vec<String>>,
}

impl ViewState {
    pub fn widget(&self, id: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id() == id)
    }

    /// The stored title, or the widget type's default.
    pub fn widget_title(&self, id: &str) -> Option<String> {
        let widget = self.widget(id)?;
        let title = self
            .titles
            .get("widget")
            .and_then(|titles| titles.get(id))
            .cloned()
            .unwrap_or_else(|| widget.default_title().to_string());
        Some(title)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub id: String,
    #[serde(rename = "type")]
    pub view_type: ViewType,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    pub search_id: String,
    #[serde(default)]
    pub properties: Vec<String>,
    #[serde(default)]
    pub state: BTreeMap<String, ViewState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub favorite: bool,
}

impl View {
    pub fn builder() -> ViewBuilder {
        ViewBuilder::default()
    }

    pub fn to_builder(&self) -> ViewBuilder {
        ViewBuilder { view: self.clone() }
    }

    pub fn widget_count(&self) -> usize {
        self.state.values().map(|s| s.widgets.len()).sum()
    }
}

#[derive(Debug, Clone)]
pub struct ViewBuilder {
    view: View,
}

impl Default for ViewBuilder {
    fn default() -> Self {
        Self {
            view: View {
                id: String::new(),
                view_type: ViewType::Search,
                title: String::new(),
                summary: String::new(),
                description: String::new(),
                search_id: String::new(),
                properties: Vec::new(),
                state: BTreeMap::new(),
                owner: None,
                created_at: None,
                favorite: false,
            },
        }
    }
}

impl ViewBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.view.id = id.into();
        self
    }

    pub fn view_type(mut self, view_type: ViewType) -> Self {
        self.view.view_type = view_type;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.view.title = title.into();
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.view.summary = summary.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.view.description = description.into();
        self
    }

    pub fn search_id(mut self, search_id: impl Into<String>) -> Self {
        self.view.search_id = search_id.into();
        self
    }

    pub fn properties(mut self, properties: Vec<String>) -> Self {
        self.view.properties = properties;
        self
    }

    pub fn state(mut self, state: BTreeMap<String, ViewState>) -> Self {
        self.view.state = state;
        self
    }

    pub fn query_state(mut self, query_id: impl Into<String>, state: ViewState) -> Self {
        self.view.state.insert(query_id.into(), state);
        self
    }

    pub fn owner(mut self, owner: Option<String>) -> Self {
        self.view.owner = owner;
        self
    }

    pub fn created_at(mut self, created_at: Option<DateTime<Utc>>) -> Self {
        self.view.created_at = created_at;
        self
    }

    pub fn favorite(mut self, favorite: bool) -> Self {
        self.view.favorite = favorite;
        self
    }

    pub fn build(self) -> View {
        self.view
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSummary {
    pub id: String,
    #[serde(rename = "type", default)]
    pub view_type: ViewType,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub parameters: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: u64,
    pub count: u32,
    pub page: u32,
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            total: 0,
            count: 0,
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Pagination {
    pub fn page_count(&self) -> u64 {
        if self.per_page == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.per_page))
    }
}

/// Response of `GET /views`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedViews {
    pub views: Vec<ViewSummary>,
    pub total: u64,
    pub count: u32,
    pub page: u32,
    pub per_page: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl PaginatedViews {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            total: self.total,
            count: self.count,
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// What subscribers of the view management store see. `list` stays `None`
/// until the first successful search.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewManagementState {
    pub list: Option<Vec<ViewSummary>>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub query: String,
    pub page: u32,
    pub per_page: u32,
    pub sort_by: String,
    pub order: SortOrder,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            sort_by: DEFAULT_SORT_FIELD.to_string(),
            order: SortOrder::Asc,
        }
    }
}

impl SearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn sort(mut self, sort_by: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = sort_by.into();
        self.order = order;
        self
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("query", self.query.clone()),
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
            ("sort", self.sort_by.clone()),
            ("order", self.order.to_string()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    View,
    Manage,
    Own,
}

/// Grants sent alongside a created or updated view, keyed by grantee GRN
/// (e.g. `grn::::user:5d41...`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntitySharePayload {
    pub selected_grantee_capabilities: BTreeMap<String, Capability>,
}

impl EntitySharePayload {
    pub fn grant(mut self, grantee: impl Into<String>, capability: Capability) -> Self {
        self.selected_grantee_capabilities
            .insert(grantee.into(), capability);
        self
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SaveViewRequest<'a> {
    pub entity: &'a View,
    pub share_request: Option<&'a EntitySharePayload>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::MessagesWidgetConfig;
    use serde_json::json;

    #[test]
    fn test_search_params_defaults() {
        let params = SearchParams::new("title:foo");
        assert_eq!(
            params.to_query(),
            vec![
                ("query", "title:foo".to_string()),
                ("page", "1".to_string()),
                ("per_page", "10".to_string()),
                ("sort", "title".to_string()),
                ("order", "asc".to_string()),
            ]
        );
    }

    #[test]
    fn test_pagination_from_response() {
        let response: PaginatedViews = serde_json::from_value(json!({
            "views": [],
            "total": 42,
            "count": 10,
            "page": 2,
            "per_page": 10
        }))
        .unwrap();
        let pagination = response.pagination();
        assert_eq!(
            pagination,
            Pagination {
                total: 42,
                count: 10,
                page: 2,
                per_page: 10
            }
        );
        assert_eq!(pagination.page_count(), 5);
    }

    #[test]
    fn test_initial_state() {
        let state = ViewManagementState::default();
        assert!(state.list.is_none());
        assert_eq!(state.pagination, Pagination::default());
        assert_eq!(state.pagination.page, 1);
        assert_eq!(state.pagination.per_page, 10);
    }

    #[test]
    fn test_view_state_widget_title_falls_back_to_default() {
        let widget = crate::widgets::Widget::messages(MessagesWidgetConfig::builder().build())
            .id("w1")
            .build()
            .unwrap();
        let mut state = ViewState {
            widgets: vec![widget],
            ..Default::default()
        };
        assert_eq!(
            state.widget_title("w1").as_deref(),
            Some("Untitled Message Table")
        );

        state
            .titles
            .entry("widget".to_string())
            .or_default()
            .insert("w1".to_string(), "Errors".to_string());
        assert_eq!(state.widget_title("w1").as_deref(), Some("Errors"));
        assert_eq!(state.widget_title("missing"), None);
    }

    #[test]
    fn test_share_payload_wire_format() {
        let payload = EntitySharePayload::default().grant("grn::::user:u1", Capability::Manage);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "selected_grantee_capabilities": { "grn::::user:u1": "manage" } })
        );
    }

    #[test]
    fn test_view_round_trip_with_widgets() {
        let widget = crate::widgets::Widget::messages(MessagesWidgetConfig::builder().build())
            .build()
            .unwrap();
        let view = View::builder()
            .id("v1")
            .view_type(ViewType::Dashboard)
            .title("Ops")
            .search_id("s1")
            .query_state(
                "q1",
                ViewState {
                    widgets: vec![widget],
                    ..Default::default()
                },
            )
            .build();

        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["type"], json!("DASHBOARD"));
        assert_eq!(value["state"]["q1"]["widgets"][0]["type"], json!("messages"));

        let parsed: View = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, view);
        assert_eq!(parsed.widget_count(), 1);
    }
}
