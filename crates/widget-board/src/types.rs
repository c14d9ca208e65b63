//! Core domain types for widget-board
//!
//! This module defines the catalog entry ([`WidgetDefinition`]), the
//! placement on the board ([`PlacedWidget`]), and the persisted shape of a
//! placement ([`StoredPlacement`]).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rendering reference attached to a catalog entry.
///
/// The board never interprets this value. The rendering layer maps each kind
/// to the content it draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetKind {
    /// Headline resource counters
    ServiceOverview,
    /// Per-service health status list
    ServiceHealth,
    /// Stacked bar chart of instance hours
    InstanceHours,
    /// Inbound/outbound traffic chart
    NetworkTraffic,
    /// Availability zone donut
    ZoneStatus,
    /// Scheduled and ongoing events table
    Events,
    /// Alarms table
    Alarms,
    /// Links to new features
    FeaturesSpotlight,
    /// Instance limit counters
    InstanceLimits,
    /// Single-line operational summary
    OperationalMetrics,
}

/// Sizing hints for a catalog entry, in grid units.
///
/// Every field is optional. Missing defaults fall back to the board defaults
/// (see [`crate::DEFAULT_COLUMN_SPAN`], [`crate::DEFAULT_ROW_SPAN`]); missing
/// minimums mean 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidgetSizing {
    /// Rows occupied when the widget is added
    pub default_row_span: Option<u32>,
    /// Columns occupied when the widget is added
    pub default_column_span: Option<u32>,
    /// Smallest row span a resize may reach
    pub min_row_span: Option<u32>,
    /// Smallest column span a resize may reach
    pub min_column_span: Option<u32>,
}

impl WidgetSizing {
    /// Sizing with both default spans set.
    pub const fn spans(columns: u32, rows: u32) -> Self {
        Self {
            default_row_span: Some(rows),
            default_column_span: Some(columns),
            min_row_span: None,
            min_column_span: None,
        }
    }

    /// Sets the minimum row span.
    pub const fn min_rows(mut self, rows: u32) -> Self {
        self.min_row_span = Some(rows);
        self
    }

    /// Sets the minimum column span.
    pub const fn min_columns(mut self, columns: u32) -> Self {
        self.min_column_span = Some(columns);
        self
    }
}

/// Static catalog entry describing one kind of widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetDefinition {
    /// Unique identifier, also the key persisted in placements
    pub id: String,
    /// Display title
    pub title: String,
    /// Optional one-line description shown in the palette
    pub description: Option<String>,
    /// Rendering reference
    pub provider: WidgetKind,
    /// Size hints
    pub sizing: WidgetSizing,
}

impl WidgetDefinition {
    /// Creates a definition with no sizing hints and no description.
    pub fn new(id: impl Into<String>, title: impl Into<String>, provider: WidgetKind) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            provider,
            sizing: WidgetSizing::default(),
        }
    }

    /// Replaces the sizing hints.
    pub fn with_sizing(mut self, sizing: WidgetSizing) -> Self {
        self.sizing = sizing;
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Data re-derived from the catalog on load. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetData {
    /// Catalog title, or the placeholder for unknown ids
    pub title: String,
    /// Catalog provider, `None` for unknown ids
    pub provider: Option<WidgetKind>,
}

/// A widget instance on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedWidget {
    /// Catalog id
    pub id: String,
    /// Columns occupied; `None` means the board default
    pub column_span: Option<u32>,
    /// Rows occupied; `None` means the board default
    pub row_span: Option<u32>,
    /// Column offset per breakpoint name
    pub column_offset: Option<BTreeMap<String, u32>>,
    /// Title and provider from the catalog
    pub data: WidgetData,
}

impl PlacedWidget {
    /// Columns this placement occupies on the grid.
    pub fn effective_column_span(&self) -> u32 {
        self.column_span.unwrap_or(crate::DEFAULT_COLUMN_SPAN)
    }

    /// Rows this placement occupies on the grid.
    pub fn effective_row_span(&self) -> u32 {
        self.row_span.unwrap_or(crate::DEFAULT_ROW_SPAN)
    }

    /// Whether the catalog resolved this placement's id.
    pub fn is_resolved(&self) -> bool {
        self.data.provider.is_some()
    }

    /// Persisted projection of this placement.
    pub fn to_stored(&self) -> StoredPlacement {
        StoredPlacement {
            id: self.id.clone(),
            column_span: self.column_span,
            row_span: self.row_span,
            column_offset: None,
        }
    }
}

/// Persisted shape of a placement.
///
/// `columnOffset` is read when present but never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPlacement {
    /// Catalog id
    pub id: String,
    /// Columns occupied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_span: Option<u32>,
    /// Rows occupied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_span: Option<u32>,
    /// Column offset per breakpoint name
    #[serde(default, skip_serializing)]
    pub column_offset: Option<BTreeMap<String, u32>>,
}

impl StoredPlacement {
    /// Placement with explicit spans.
    pub fn new(id: impl Into<String>, column_span: u32, row_span: u32) -> Self {
        Self {
            id: id.into(),
            column_span: Some(column_span),
            row_span: Some(row_span),
            column_offset: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_widget_kind_serializes_kebab_case() {
        let value = serde_json::to_value(WidgetKind::ServiceOverview).expect("serialize");
        assert_eq!(value, json!("service-overview"));
    }

    #[test]
    fn test_stored_placement_omits_missing_spans() {
        let stored = StoredPlacement {
            id: "events".to_string(),
            column_span: None,
            row_span: Some(3),
            column_offset: None,
        };
        let json = serde_json::to_string(&stored).expect("serialize");
        assert_eq!(json, r#"{"id":"events","rowSpan":3}"#);
    }

    #[test]
    fn test_stored_placement_never_writes_column_offset() {
        let stored: StoredPlacement =
            serde_json::from_value(json!({"id": "alarms", "columnSpan": 2, "columnOffset": {"4": 2}}))
                .expect("deserialize");
        let offsets = stored.column_offset.as_ref().expect("offset was read");
        assert_eq!(offsets.get("4"), Some(&2));

        let json = serde_json::to_value(&stored).expect("serialize");
        assert!(json.get("columnOffset").is_none());
    }

    #[test]
    fn test_placed_widget_effective_spans_use_board_defaults() {
        let placed = PlacedWidget {
            id: "x".to_string(),
            column_span: None,
            row_span: None,
            column_offset: None,
            data: WidgetData {
                title: "Widget".to_string(),
                provider: None,
            },
        };
        assert_eq!(placed.effective_column_span(), 1);
        assert_eq!(placed.effective_row_span(), 2);
        assert!(!placed.is_resolved());
    }

    #[test]
    fn test_sizing_builder() {
        let sizing = WidgetSizing::spans(2, 4).min_rows(3);
        assert_eq!(sizing.default_column_span, Some(2));
        assert_eq!(sizing.default_row_span, Some(4));
        assert_eq!(sizing.min_row_span, Some(3));
        assert_eq!(sizing.min_column_span, None);
    }
}
