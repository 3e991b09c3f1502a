//! Palette and semantic styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Core Palette ──────────────────────────────────────────────────────

pub const EMERALD: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const REDSTONE: Color = Color::Rgb(255, 99, 99); // #ff6363
pub const GOLD: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const DIAMOND: Color = Color::Rgb(128, 255, 234); // #80ffea
pub const AMETHYST: Color = Color::Rgb(189, 147, 249); // #bd93f9

// ── Extended Palette ──────────────────────────────────────────────────

pub const DIM_WHITE: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const BORDER_GRAY: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const BG_DARK: Color = Color::Rgb(30, 31, 41); // #1e1f29

/// Series line color.
pub const CHART_LINE: Color = DIAMOND;

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(DIAMOND).add_modifier(Modifier::BOLD)
}

pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Border for overlays.
pub fn border_focused() -> Style {
    Style::default().fg(AMETHYST)
}

/// Large value text in a stat card.
pub fn stat_value() -> Style {
    Style::default().fg(DIM_WHITE).add_modifier(Modifier::BOLD)
}

/// Secondary text: avatar links, timestamps, empty states.
pub fn muted() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn player_name() -> Style {
    Style::default().fg(EMERALD).add_modifier(Modifier::BOLD)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(DIAMOND).add_modifier(Modifier::BOLD)
}

pub fn error_text() -> Style {
    Style::default().fg(REDSTONE)
}
