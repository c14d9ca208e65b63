//! Widget catalog and viewport-dependent default layouts.
//!
//! The catalog is the static registry behind the board: every placement's id
//! is a key into it. Lookups return `Option` and callers choose the fallback;
//! [`Catalog::resolve`] applies the placeholder policy used when loading.

use crate::types::{StoredPlacement, WidgetData, WidgetDefinition, WidgetKind, WidgetSizing};

/// Title shown for a placement whose id has no catalog entry.
pub const PLACEHOLDER_TITLE: &str = "Widget";

/// Number of columns on the board grid.
pub const BOARD_COLUMNS: u32 = 4;

/// Largest row span a resize may reach.
pub const MAX_ROW_SPAN: u32 = 12;

/// Column span of a placement that does not specify one.
pub const DEFAULT_COLUMN_SPAN: u32 = 1;

/// Row span of a placement that does not specify one.
pub const DEFAULT_ROW_SPAN: u32 = 2;

/// Smallest viewport width (px) treated as [`Breakpoint::Wide`].
pub const WIDE_MIN_WIDTH: u32 = 1200;

/// Smallest viewport width (px) treated as [`Breakpoint::Medium`].
pub const MEDIUM_MIN_WIDTH: u32 = 688;

/// Viewport width tier used to pick a default layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Breakpoint {
    /// Below [`MEDIUM_MIN_WIDTH`]
    Narrow,
    /// From [`MEDIUM_MIN_WIDTH`] up to [`WIDE_MIN_WIDTH`]
    Medium,
    /// [`WIDE_MIN_WIDTH`] and above
    Wide,
}

impl Breakpoint {
    /// Tier for a viewport width in pixels.
    pub fn from_width(viewport_width: u32) -> Self {
        if viewport_width >= WIDE_MIN_WIDTH {
            Breakpoint::Wide
        } else if viewport_width >= MEDIUM_MIN_WIDTH {
            Breakpoint::Medium
        } else {
            Breakpoint::Narrow
        }
    }
}

/// Registry of widget definitions, in palette order, plus the default layout
/// for each breakpoint.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    widgets: Vec<WidgetDefinition>,
    defaults: Vec<(Breakpoint, Vec<StoredPlacement>)>,
}

impl Catalog {
    /// Creates a catalog from definitions with no default layouts.
    pub fn new(widgets: Vec<WidgetDefinition>) -> Self {
        Self {
            widgets,
            defaults: Vec::new(),
        }
    }

    /// Sets the default layout used for `breakpoint`, replacing any previous one.
    pub fn with_default_layout(
        mut self,
        breakpoint: Breakpoint,
        placements: Vec<StoredPlacement>,
    ) -> Self {
        self.defaults.retain(|(b, _)| *b != breakpoint);
        self.defaults.push((breakpoint, placements));
        self
    }

    /// The console's built-in widgets and default layouts.
    pub fn builtin() -> Self {
        let widgets = vec![
            WidgetDefinition::new("service-overview", "Service overview", WidgetKind::ServiceOverview)
                .with_sizing(WidgetSizing::spans(4, 2).min_rows(2)),
            WidgetDefinition::new("service-health", "Service Health", WidgetKind::ServiceHealth)
                .with_sizing(WidgetSizing::spans(2, 2).min_rows(2)),
            WidgetDefinition::new("instance-hours", "Instance hours", WidgetKind::InstanceHours)
                .with_sizing(WidgetSizing::spans(2, 4).min_rows(3)),
            WidgetDefinition::new("network-traffic", "Network traffic", WidgetKind::NetworkTraffic)
                .with_sizing(WidgetSizing::spans(2, 4).min_rows(3)),
            WidgetDefinition::new("zone-status", "Zone status", WidgetKind::ZoneStatus)
                .with_sizing(WidgetSizing::spans(2, 4).min_rows(3)),
            WidgetDefinition::new("events", "Events", WidgetKind::Events)
                .with_sizing(WidgetSizing::spans(2, 3)),
            WidgetDefinition::new("alarms", "Alarms", WidgetKind::Alarms)
                .with_sizing(WidgetSizing::spans(2, 3)),
            WidgetDefinition::new(
                "features-spotlight",
                "Features spotlight",
                WidgetKind::FeaturesSpotlight,
            )
            .with_sizing(WidgetSizing {
                default_row_span: Some(2),
                ..WidgetSizing::default()
            }),
            WidgetDefinition::new("instance-limits", "Instance limits", WidgetKind::InstanceLimits)
                .with_sizing(WidgetSizing::spans(2, 2)),
            WidgetDefinition::new(
                "operational-metrics",
                "Operational metrics",
                WidgetKind::OperationalMetrics,
            )
            .with_description("One-line health summary"),
        ];

        let catalog = Self::new(widgets);
        let wide = catalog.placements_with_defaults(&[
            "service-overview",
            "service-health",
            "zone-status",
            "instance-hours",
            "network-traffic",
            "events",
            "alarms",
        ]);
        let medium = catalog.placements_with_defaults(&[
            "service-overview",
            "service-health",
            "instance-hours",
            "events",
            "alarms",
        ]);
        let narrow = vec![
            StoredPlacement::new("service-overview", BOARD_COLUMNS, 2),
            StoredPlacement::new("service-health", BOARD_COLUMNS, 2),
            StoredPlacement::new("events", BOARD_COLUMNS, 3),
        ];

        catalog
            .with_default_layout(Breakpoint::Wide, wide)
            .with_default_layout(Breakpoint::Medium, medium)
            .with_default_layout(Breakpoint::Narrow, narrow)
    }

    /// Looks up a definition by id.
    pub fn get(&self, id: &str) -> Option<&WidgetDefinition> {
        self.widgets.iter().find(|w| w.id == id)
    }

    /// Whether the catalog has an entry for `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Catalog data for `id`, or the placeholder title with no provider.
    pub fn resolve(&self, id: &str) -> WidgetData {
        match self.get(id) {
            Some(def) => WidgetData {
                title: def.title.clone(),
                provider: Some(def.provider),
            },
            None => {
                log::debug!("widget id {id:?} not in catalog, using placeholder");
                WidgetData {
                    title: PLACEHOLDER_TITLE.to_string(),
                    provider: None,
                }
            }
        }
    }

    /// All definitions in palette order.
    pub fn iter(&self) -> impl Iterator<Item = &WidgetDefinition> {
        self.widgets.iter()
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Whether the catalog has no definitions.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Stored placements making up the default layout for a viewport width.
    ///
    /// Empty when the catalog defines no layout for that breakpoint.
    pub fn default_placements(&self, viewport_width: u32) -> Vec<StoredPlacement> {
        let breakpoint = Breakpoint::from_width(viewport_width);
        self.defaults
            .iter()
            .find(|(b, _)| *b == breakpoint)
            .map(|(_, placements)| placements.clone())
            .unwrap_or_default()
    }

    /// Placement for `id` with the catalog's default spans, falling back to
    /// the board defaults for unset or zero hints.
    pub fn default_placement(&self, id: &str) -> Option<StoredPlacement> {
        let def = self.get(id)?;
        let span = |hint: Option<u32>, fallback| hint.filter(|n| *n > 0).unwrap_or(fallback);
        Some(StoredPlacement::new(
            id,
            span(def.sizing.default_column_span, DEFAULT_COLUMN_SPAN),
            span(def.sizing.default_row_span, DEFAULT_ROW_SPAN),
        ))
    }

    fn placements_with_defaults(&self, ids: &[&str]) -> Vec<StoredPlacement> {
        ids.iter()
            .filter_map(|id| self.default_placement(id))
            .collect()
    }
}
