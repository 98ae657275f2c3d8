pub mod aggregation;
pub mod equality;
pub mod error;
pub mod formatting;
pub mod messages;
pub mod pivot;
pub mod query;
pub mod series;
pub mod sort;
pub mod visualization;
pub mod widget;

pub use aggregation::{AggregationWidgetConfig, AggregationWidgetConfigBuilder};
pub use equality::SearchEq;
pub use error::WidgetError;
pub use formatting::{FieldUnit, UnitsConfig, WidgetFormattingSettings};
pub use messages::{Decorator, MessagesWidgetConfig, MessagesWidgetConfigBuilder};
pub use pivot::{Interval, Pivot, PivotConfig, PivotType, TimeConfig, TimeUnit, ValuesConfig};
pub use query::{QueryString, RelativeRange, SearchFilter, TimeRange};
pub use series::{Series, SeriesConfig};
pub use sort::{Direction, SortConfig, SortType};
pub use visualization::VisualizationConfig;
pub use widget::{Widget, WidgetBuilder, WidgetConfig, WidgetJson};
