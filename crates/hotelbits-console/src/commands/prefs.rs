//! Preference commands: `prefs show|theme|density`.

use super::{Context, Result};
use hotelbits_console::preferences::{system_prefers_dark, Density, Mode, Preferences, ThemePreference};
use std::io::Write;

/// Prints both preferences and the resolved color mode.
pub(crate) fn prefs_show(ctx: &Context, out: &mut impl Write) -> Result<()> {
    let prefs = Preferences::load(&ctx.store());
    let mode = match prefs.mode(system_prefers_dark()) {
        Mode::Dark => "dark",
        Mode::Light => "light",
    };
    writeln!(out, "theme:   {}", prefs.theme)?;
    writeln!(out, "density: {}", prefs.density)?;
    writeln!(out, "mode:    {mode}")?;
    Ok(())
}

pub(crate) fn prefs_set_theme(
    ctx: &Context,
    theme: ThemePreference,
    out: &mut impl Write,
) -> Result<()> {
    Preferences::save_theme(&mut ctx.store(), theme)?;
    writeln!(out, "Theme set to {theme}")?;
    Ok(())
}

pub(crate) fn prefs_set_density(ctx: &Context, density: Density, out: &mut impl Write) -> Result<()> {
    Preferences::save_density(&mut ctx.store(), density)?;
    writeln!(out, "Density set to {density}")?;
    Ok(())
}
