//! Colors of the interface, resolved from the configuration overrides.
use log::debug;
use ratatui::style::{Color, Modifier, Style};

use crate::config::{Colors, parse_hex_color};

/// Accent used when the configuration has none.
const DEFAULT_PRIMARY: Color = Color::Rgb(0x5B, 0x96, 0xC7);

/// Resolved interface colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette
{
    /// Accent for the active track, links and the progress bar
    pub primary: Color,
    /// Background of the artwork and player area
    pub hero_background: Color,
    /// Page background
    pub background: Color,
    /// Body text
    pub text: Color,
}

impl Default for Palette
{
    fn default() -> Self
    {
        Self {
            primary: DEFAULT_PRIMARY,
            hero_background: Color::Reset,
            background: Color::Reset,
            text: Color::Reset,
        }
    }
}

impl Palette
{
    /// Applies the valid overrides from the configuration to the defaults.
    #[must_use]
    pub fn from_colors(colors: &Colors) -> Self
    {
        let defaults = Self::default();
        let resolve = |value: &Option<String>, fallback: Color| {
            value
                .as_deref()
                .and_then(parse_hex_color)
                .map_or(fallback, |(red, green, blue)| Color::Rgb(red, green, blue))
        };

        let palette = Self {
            primary: resolve(&colors.primary, defaults.primary),
            hero_background: resolve(&colors.hero_background, defaults.hero_background),
            background: resolve(&colors.background, defaults.background),
            text: resolve(&colors.text, defaults.text),
        };
        debug!("Resolved palette {palette:?}");
        palette
    }

    /// Base style of the page.
    #[must_use]
    pub const fn page(&self) -> Style
    {
        Style::new().fg(self.text).bg(self.background)
    }

    /// Style of the artwork and player area.
    #[must_use]
    pub const fn hero(&self) -> Style
    {
        Style::new().fg(self.text).bg(self.hero_background)
    }

    /// Style of accented text.
    #[must_use]
    pub const fn accent(&self) -> Style
    {
        Style::new()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style of links.
    #[must_use]
    pub const fn link(&self) -> Style
    {
        Style::new()
            .fg(self.primary)
            .add_modifier(Modifier::UNDERLINED)
    }
}
