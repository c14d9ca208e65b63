//! Palette query: catalog widgets that can still be added.

use crate::catalog::Catalog;
use crate::layout::BoardLayout;
use crate::types::WidgetDefinition;

/// Widgets not yet on the board whose title contains `filter`
/// (case-insensitive), in catalog order. An empty filter matches everything.
pub fn available_widgets<'a>(
    catalog: &'a Catalog,
    layout: &BoardLayout,
    filter: &str,
) -> Vec<&'a WidgetDefinition> {
    let needle = filter.to_lowercase();
    catalog
        .iter()
        .filter(|def| !layout.contains(&def.id))
        .filter(|def| def.title.to_lowercase().contains(&needle))
        .collect()
}
