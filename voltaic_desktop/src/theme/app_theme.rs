use iced::{theme, Theme};

use super::palette::palette;

/// Creates the custom Voltaic storm theme.
pub fn storm_theme() -> Theme {
    let p = palette();
    Theme::custom(
        "Voltaic Storm".to_string(),
        theme::Palette {
            background: p.background,
            text: p.text,
            primary: p.accent,
            success: p.success,
            danger: p.danger,
            warning: p.accent,
        },
    )
}
