use iced::Color;

/// Core color palette for the Voltaic storm theme.
#[derive(Debug, Clone, Copy)]
pub struct PaletteColors {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub accent_soft: Color,
    /// Proximity link strokes
    pub link: Color,
    /// Fallback bolt stroke when the configured color fails to parse
    pub bolt: Color,
    /// Fallback bolt glow
    pub bolt_glow: Color,
    /// Bright inner core of every bolt
    pub bolt_core: Color,
    pub success: Color,
    pub danger: Color,
}

impl Default for PaletteColors {
    fn default() -> Self {
        Self::storm()
    }
}

impl PaletteColors {
    /// The storm palette: deep night blues under gold and violet.
    pub fn storm() -> Self {
        Self {
            background: Color::from_rgb8(6, 8, 18),       // Deep night blue
            surface: Color::from_rgb8(12, 16, 34),        // Slightly raised blue
            text: Color::from_rgb8(235, 238, 250),        // Off-white
            muted: Color::from_rgb8(120, 130, 160),       // Gray-blue
            accent: Color::from_rgb8(255, 215, 0),        // Gold
            accent_soft: Color::from_rgb8(153, 102, 255), // Violet
            link: Color::from_rgb8(255, 255, 255),        // White
            bolt: Color::from_rgb8(255, 215, 0),          // Gold
            bolt_glow: Color::from_rgba8(255, 215, 0, 0.4),
            bolt_core: Color::from_rgb8(255, 255, 255),   // White-hot center
            success: Color::from_rgb8(100, 220, 140),
            danger: Color::from_rgb8(255, 100, 100),
        }
    }
}

/// Returns the default palette for the application.
pub fn palette() -> PaletteColors {
    PaletteColors::default()
}

/// Converts an HSL color with alpha to an iced [`Color`].
///
/// Hue is in degrees; saturation, lightness and alpha in [0, 1]. The particle
/// palette is defined in HSL (hue 50 gold, hue 280 violet at 100%/60%).
pub fn hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Color {
    let h = hue.rem_euclid(360.0) / 60.0;
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    Color::from_rgba(r + m, g + m, b + m, alpha)
}
