//! Board layout: the ordered placements and the pure operations on them.
//!
//! Every editing operation returns a new [`BoardLayout`] instead of mutating
//! in place, so the manager can hand the full post-edit sequence to
//! [`crate::BoardManager::apply_change`] exactly like a rendering library's
//! change callback would.

use crate::catalog::{Catalog, BOARD_COLUMNS, MAX_ROW_SPAN};
use crate::error::{BoardError, Result, StoreError};
use crate::types::{PlacedWidget, StoredPlacement};

/// Ordered sequence of placed widgets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardLayout {
    items: Vec<PlacedWidget>,
}

impl BoardLayout {
    /// Wraps an already-resolved sequence.
    pub fn new(items: Vec<PlacedWidget>) -> Self {
        Self { items }
    }

    /// Attaches catalog data to stored placements, keeping their order.
    pub fn from_placements(catalog: &Catalog, placements: Vec<StoredPlacement>) -> Self {
        let items = placements
            .into_iter()
            .map(|p| PlacedWidget {
                data: catalog.resolve(&p.id),
                id: p.id,
                column_span: p.column_span,
                row_span: p.row_span,
                column_offset: p.column_offset,
            })
            .collect();
        Self { items }
    }

    /// Placements in board order.
    pub fn items(&self) -> &[PlacedWidget] {
        &self.items
    }

    /// Consumes the layout, returning its placements.
    pub fn into_items(self) -> Vec<PlacedWidget> {
        self.items
    }

    /// Number of placements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the board is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Placement at `index`.
    pub fn get(&self, index: usize) -> Option<&PlacedWidget> {
        self.items.get(index)
    }

    /// Whether any placement has this id.
    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|w| w.id == id)
    }

    /// Ids in board order.
    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(|w| w.id.as_str()).collect()
    }

    /// Persisted projection: id and spans only.
    pub fn to_placements(&self) -> Vec<StoredPlacement> {
        self.items.iter().map(PlacedWidget::to_stored).collect()
    }

    /// Serializes the persisted projection as a JSON array.
    pub fn to_storage_json(&self) -> Result<String> {
        serde_json::to_string(&self.to_placements())
            .map_err(|e| StoreError::Serialize(e.to_string()).into())
    }

    /// Parses a stored JSON array of placements.
    pub fn parse_storage_json(raw: &str) -> serde_json::Result<Vec<StoredPlacement>> {
        serde_json::from_str(raw)
    }

    /// Layout without any placement of `id`.
    pub fn without_widget(&self, id: &str) -> BoardLayout {
        Self::new(self.items.iter().filter(|w| w.id != id).cloned().collect())
    }

    /// Layout without the placement at `index`.
    pub fn without_index(&self, index: usize) -> Result<BoardLayout> {
        self.check_index(index)?;
        let mut items = self.items.clone();
        items.remove(index);
        Ok(Self::new(items))
    }

    /// Layout with the placement at `index` moved by `delta` positions,
    /// clamped to the ends of the sequence.
    pub fn moved(&self, index: usize, delta: isize) -> Result<BoardLayout> {
        self.check_index(index)?;
        let last = self.items.len() - 1;
        let target = index.saturating_add_signed(delta).min(last);
        let mut items = self.items.clone();
        let widget = items.remove(index);
        items.insert(target, widget);
        Ok(Self::new(items))
    }

    /// Layout with the placement at `index` resized by the given deltas.
    ///
    /// Spans are clamped to the catalog minimums (1 when unset or unknown),
    /// [`BOARD_COLUMNS`] and [`MAX_ROW_SPAN`]. The result always has explicit
    /// spans.
    pub fn resized(
        &self,
        catalog: &Catalog,
        index: usize,
        column_delta: i32,
        row_delta: i32,
    ) -> Result<BoardLayout> {
        self.check_index(index)?;
        let mut items = self.items.clone();
        let widget = &mut items[index];
        let sizing = catalog
            .get(&widget.id)
            .map(|def| def.sizing)
            .unwrap_or_default();
        let min_columns = sizing.min_column_span.unwrap_or(1).clamp(1, BOARD_COLUMNS);
        let min_rows = sizing.min_row_span.unwrap_or(1).clamp(1, MAX_ROW_SPAN);

        let columns = widget
            .effective_column_span()
            .saturating_add_signed(column_delta)
            .clamp(min_columns, BOARD_COLUMNS);
        let rows = widget
            .effective_row_span()
            .saturating_add_signed(row_delta)
            .clamp(min_rows, MAX_ROW_SPAN);
        widget.column_span = Some(columns);
        widget.row_span = Some(rows);
        Ok(Self::new(items))
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(BoardError::IndexOutOfRange {
                index,
                len: self.items.len(),
            }
            .into())
        }
    }
}

impl<'a> IntoIterator for &'a BoardLayout {
    type Item = &'a PlacedWidget;
    type IntoIter = std::slice::Iter<'a, PlacedWidget>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Default layout for a viewport width, with catalog data attached.
pub fn compute_default_layout(catalog: &Catalog, viewport_width: u32) -> BoardLayout {
    BoardLayout::from_placements(catalog, catalog.default_placements(viewport_width))
}

/// Builds the mount-time layout from the stored value, if any.
///
/// Absent or unparsable storage yields [`compute_default_layout`]. A parse
/// failure is logged and otherwise swallowed.
pub fn load_initial_layout(
    catalog: &Catalog,
    stored: Option<&str>,
    viewport_width: u32,
) -> BoardLayout {
    let Some(raw) = stored else {
        log::debug!("no stored layout, using default for width {viewport_width}");
        return compute_default_layout(catalog, viewport_width);
    };

    match BoardLayout::parse_storage_json(raw) {
        Ok(placements) => BoardLayout::from_placements(catalog, placements),
        Err(e) => {
            log::warn!("discarding malformed stored layout: {e}");
            compute_default_layout(catalog, viewport_width)
        }
    }
}

/// Appends `widget_id` with the catalog's default spans.
///
/// Does not guard against duplicates; the palette only offers widgets that
/// are not on the board.
pub fn add_widget(catalog: &Catalog, layout: &BoardLayout, widget_id: &str) -> Result<BoardLayout> {
    let placement = catalog
        .default_placement(widget_id)
        .ok_or_else(|| BoardError::UnknownWidget(widget_id.to_string()))?;
    let mut items = layout.items.clone();
    items.push(PlacedWidget {
        data: catalog.resolve(widget_id),
        id: placement.id,
        column_span: placement.column_span,
        row_span: placement.row_span,
        column_offset: None,
    });
    Ok(BoardLayout::new(items))
}
