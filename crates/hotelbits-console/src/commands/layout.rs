//! Layout commands: `layout show|add|remove|reset` and `widgets`.

use super::{detect_viewport_width, CommandError, Context, Result};
use std::io::Write;
use widget_board::SettingsStore;

/// Prints the layout that would load at `width`.
pub(crate) fn layout_show(
    ctx: &Context,
    width: u32,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let board = ctx.open_board(width)?;
    if json {
        writeln!(out, "{}", board.layout().to_storage_json()?)?;
        return Ok(());
    }

    let stored = matches!(
        board.store().get(&ctx.config.board.storage_key),
        Ok(Some(_))
    );
    writeln!(
        out,
        "Layout ({}, {} widgets, {width}px)",
        if stored { "stored" } else { "default" },
        board.layout().len()
    )?;
    for (i, widget) in board.layout().into_iter().enumerate() {
        writeln!(
            out,
            "{:>3}. {:<22} {:<22} {}x{}",
            i + 1,
            widget.id,
            widget.data.title,
            widget.effective_column_span(),
            widget.effective_row_span()
        )?;
    }
    Ok(())
}

/// Adds `id` with its catalog spans and saves.
pub(crate) fn layout_add(ctx: &Context, id: &str, width: u32, out: &mut impl Write) -> Result<()> {
    let mut board = ctx.open_board(width)?;
    board.add_widget(id)?;
    board.flush()?;
    writeln!(out, "Added {id} ({} widgets)", board.layout().len())?;
    Ok(())
}

/// Removes every placement of `id` and saves.
pub(crate) fn layout_remove(ctx: &Context, id: &str, out: &mut impl Write) -> Result<()> {
    let mut board = ctx.open_board(detect_viewport_width())?;
    if !board.remove_widget(id) {
        return Err(CommandError::NotOnBoard(id.to_string()));
    }
    board.flush()?;
    writeln!(out, "Removed {id} ({} widgets)", board.layout().len())?;
    Ok(())
}

/// Clears the stored layout so the next start uses the default.
pub(crate) fn layout_reset(ctx: &Context, out: &mut impl Write) -> Result<()> {
    let mut board = ctx.open_board(detect_viewport_width())?;
    board.reset(board.viewport_width())?;
    writeln!(out, "Layout reset; the default layout will be used")?;
    Ok(())
}

/// Lists catalog widgets whose title contains `filter`, marking placed ones
/// with `*`.
pub(crate) fn list_widgets(ctx: &Context, filter: Option<&str>, out: &mut impl Write) -> Result<()> {
    let board = ctx.open_board(detect_viewport_width())?;
    let needle = filter.unwrap_or_default().to_lowercase();
    for def in board.catalog().iter() {
        if !def.title.to_lowercase().contains(&needle) {
            continue;
        }
        let marker = if board.layout().contains(&def.id) { '*' } else { ' ' };
        let span = |s: Option<u32>| s.map_or_else(|| "-".to_string(), |n| n.to_string());
        writeln!(
            out,
            "{marker} {:<22} {:<22} {}x{}",
            def.id,
            def.title,
            span(def.sizing.default_column_span),
            span(def.sizing.default_row_span)
        )?;
    }
    Ok(())
}
