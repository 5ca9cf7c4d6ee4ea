mod app_theme;
mod palette;

pub use app_theme::storm_theme;
pub use palette::{hsla, palette, PaletteColors};
