// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Scopedeck-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scopedeck and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Colours for the terminal UI.
//!
//! Without a palette the theme sticks to the sixteen named terminal colours.
//! A palette replaces them with exact RGB values: foreground, background,
//! then the sixteen ANSI slots in their usual order.

use std::{error::Error, fmt};

use ratatui::style::{Color, Modifier, Style};

use crate::config::PALETTE_ENV;

/// ANSI slots the theme draws with.
#[derive(Debug, Clone, Copy)]
enum Slot {
    Red = 1,
    Yellow = 3,
    Magenta = 5,
    Cyan = 6,
    BrightBlack = 8,
    BrightGreen = 10,
}

const TERMINAL_COLORS: [Color; 16] = [
    Color::Black,
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::Gray,
    Color::DarkGray,
    Color::LightRed,
    Color::LightGreen,
    Color::LightYellow,
    Color::LightBlue,
    Color::LightMagenta,
    Color::LightCyan,
    Color::White,
];

const PALETTE_LEN: usize = 2 + TERMINAL_COLORS.len();

#[derive(Debug, Clone, Default)]
pub struct TuiTheme {
    palette: Option<Palette>,
}

impl TuiTheme {
    /// Builds the theme from a palette CSV. Blank or missing means terminal defaults.
    pub fn from_palette(csv: Option<&str>) -> Result<Self, ThemeError> {
        let Some(csv) = csv.map(str::trim).filter(|csv| !csv.is_empty()) else {
            return Ok(Self::default());
        };
        let palette = Palette::parse(csv).map_err(|reason| ThemeError::InvalidPalette {
            name: PALETTE_ENV,
            value: csv.to_owned(),
            reason,
        })?;
        Ok(Self {
            palette: Some(palette),
        })
    }

    fn color(&self, slot: Slot) -> Color {
        let slots = self
            .palette
            .as_ref()
            .map_or(&TERMINAL_COLORS, |palette| &palette.slots);
        slots[slot as usize]
    }

    pub fn base_style(&self) -> Style {
        self.palette.as_ref().map_or_else(Style::default, |palette| {
            Style::default().fg(palette.fg).bg(palette.bg)
        })
    }

    pub fn panel_border_style(&self, focused: bool) -> Style {
        let style = self.base_style();
        if focused {
            style.fg(self.color(Slot::BrightGreen))
        } else {
            style
        }
    }

    pub fn busy_border_style(&self) -> Style {
        self.base_style().fg(self.color(Slot::Yellow))
    }

    pub fn selection_style(&self) -> Style {
        self.base_style().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    }

    /// The selected tool and the active tab or backend.
    pub fn active_style(&self) -> Style {
        self.key_style().add_modifier(Modifier::BOLD)
    }

    pub fn dimmed_style(&self) -> Style {
        self.base_style().fg(self.placeholder_color())
    }

    pub fn key_style(&self) -> Style {
        self.base_style().fg(self.color(Slot::Cyan))
    }

    pub fn source_style(&self) -> Style {
        self.base_style().fg(self.color(Slot::Magenta))
    }

    pub fn error_style(&self) -> Style {
        self.base_style().fg(self.color(Slot::Red))
    }

    /// Colour of placeholder text in empty fields and the pending context tree.
    pub fn placeholder_color(&self) -> Color {
        self.color(Slot::BrightBlack)
    }
}

#[derive(Debug, Clone)]
struct Palette {
    fg: Color,
    bg: Color,
    slots: [Color; 16],
}

impl Palette {
    fn parse(csv: &str) -> Result<Self, PaletteError> {
        let colors = csv
            .split(',')
            .map(parse_color)
            .collect::<Result<Vec<_>, _>>()?;
        let [fg, bg, rest @ ..] = colors.as_slice() else {
            return Err(PaletteError::Count(colors.len()));
        };
        let slots: [Color; 16] = rest
            .try_into()
            .map_err(|_| PaletteError::Count(colors.len()))?;
        Ok(Self {
            fg: *fg,
            bg: *bg,
            slots,
        })
    }
}

/// Accepts `#rrggbb`, `0xrrggbb`, bare `rrggbb`, or X11 `rgb:rr/gg/bb`
/// with two or four hex digits per channel.
fn parse_color(raw: &str) -> Result<Color, PaletteError> {
    let raw = raw.trim();
    let bad = || PaletteError::Color(raw.to_owned());

    if let Some(channels) = raw
        .get(..4)
        .filter(|prefix| prefix.eq_ignore_ascii_case("rgb:"))
        .map(|_| &raw[4..])
    {
        let mut rgb = [0u8; 3];
        let mut parts = channels.split('/');
        for channel in &mut rgb {
            let part = parts.next().ok_or_else(bad)?;
            if !matches!(part.len(), 2 | 4) || !is_hex(part) {
                return Err(bad());
            }
            // Four-digit channels keep their high byte.
            *channel = u8::from_str_radix(&part[..2], 16).map_err(|_| bad())?;
        }
        if parts.next().is_some() {
            return Err(bad());
        }
        let [r, g, b] = rgb;
        return Ok(Color::Rgb(r, g, b));
    }

    let digits = raw
        .strip_prefix('#')
        .or_else(|| raw.strip_prefix("0x"))
        .unwrap_or(raw);
    if digits.len() != 6 || !is_hex(digits) {
        return Err(bad());
    }
    let value = u32::from_str_radix(digits, 16).map_err(|_| bad())?;
    let [_, r, g, b] = value.to_be_bytes();
    Ok(Color::Rgb(r, g, b))
}

fn is_hex(digits: &str) -> bool {
    digits.bytes().all(|byte| byte.is_ascii_hexdigit())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    Count(usize),
    Color(String),
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(found) => write!(
                f,
                "expected {PALETTE_LEN} colors (fg, bg, then 16 ansi), found {found}"
            ),
            Self::Color(raw) => write!(f, "cannot read color {raw:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeError {
    InvalidPalette {
        name: &'static str,
        value: String,
        reason: PaletteError,
    },
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPalette {
                name,
                value,
                reason,
            } => write!(f, "invalid {name}={value:?}: {reason}"),
        }
    }
}

impl Error for ThemeError {}

#[cfg(test)]
mod tests {
    use ratatui::style::Color;
    use rstest::rstest;

    use super::{parse_color, PaletteError, ThemeError, TuiTheme};

    const PALETTE: &str = "#111111,#222222,#000000,#ff0000,#00ff00,#ffff00,#0000ff,#ff00ff,#00ffff,#ffffff,rgb:1a/1a/1a,#ff1111,#11ff11,#ffff11,#1111ff,#ff11ff,#11ffff,#fefefe";

    #[test]
    fn palette_drives_every_style() {
        let theme = TuiTheme::from_palette(Some(PALETTE)).expect("palette");
        assert_eq!(theme.base_style().fg, Some(Color::Rgb(0x11, 0x11, 0x11)));
        assert_eq!(theme.base_style().bg, Some(Color::Rgb(0x22, 0x22, 0x22)));
        assert_eq!(theme.error_style().fg, Some(Color::Rgb(0xff, 0, 0)));
        assert_eq!(theme.placeholder_color(), Color::Rgb(0x1a, 0x1a, 0x1a));
    }

    #[test]
    fn missing_palette_uses_terminal_colors() {
        let theme = TuiTheme::from_palette(Some("  ")).expect("blank");
        assert_eq!(theme.base_style().fg, None);
        assert_eq!(theme.placeholder_color(), Color::DarkGray);
        assert_eq!(theme.key_style().fg, Some(Color::Cyan));
    }

    #[test]
    fn short_palette_is_rejected() {
        let err = TuiTheme::from_palette(Some("#000000")).unwrap_err();
        let ThemeError::InvalidPalette { name, reason, .. } = err;
        assert_eq!(name, "SCOPEDECK_TUI_PALETTE");
        assert_eq!(reason, PaletteError::Count(1));
    }

    #[rstest]
    #[case("#0a0b0c", Some(Color::Rgb(10, 11, 12)))]
    #[case("0xFF0000", Some(Color::Rgb(255, 0, 0)))]
    #[case("RGB:ff/80/00", Some(Color::Rgb(255, 128, 0)))]
    #[case("rgb:ffff/8000/0000", Some(Color::Rgb(255, 128, 0)))]
    #[case("rgb:ff/80", None)]
    #[case("#fff", None)]
    #[case("", None)]
    fn colors_parse(#[case] raw: &str, #[case] expected: Option<Color>) {
        assert_eq!(parse_color(raw).ok(), expected);
    }
}
