//! Colors used by the sequence renderer.
//!
//! Colors are identified by hex strings (`#rrggbb`) so the same table can
//! feed the TUI (ratatui) and the report writer (crossterm styling).

use ratatui::style::Color;

/// Background for characters without their own color, and for matching
/// positions in reference mode.
pub const NEUTRAL_GRAY: &str = "#eeeeee";

/// Background for positions that differ from the reference.
pub const DIFFERENCE_RED: &str = "#f44336";

/// Color scheme for sequence characters.
///
/// This trait allows for different color schemes to be implemented.
pub trait ColorScheme {
    /// Color identifier for an uppercase character, `None` if unmapped.
    fn color_of(&self, c: char) -> Option<&'static str>;
}

/// A fixed character → color table.
#[derive(Debug, Clone, Copy)]
pub struct StaticColorScheme {
    entries: &'static [(char, &'static str)],
}

impl StaticColorScheme {
    pub const fn new(entries: &'static [(char, &'static str)]) -> Self {
        Self { entries }
    }
}

impl ColorScheme for StaticColorScheme {
    fn color_of(&self, c: char) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(key, _)| *key == c)
            .map(|(_, color)| *color)
    }
}

/// Pastel backgrounds for the twenty standard amino acids, grouped by
/// physicochemical property. The gap `-` has no entry.
pub const AMINO_ACID_COLORS: StaticColorScheme = StaticColorScheme::new(&[
    // Small / hydrophobic
    ('A', "#c2f0c2"),
    ('V', "#b3e6b3"),
    ('I', "#a3dca3"),
    ('L', "#94d394"),
    ('M', "#d6f5c2"),
    // Aromatic
    ('F', "#ffe0a3"),
    ('W', "#ffd280"),
    ('Y', "#ffecc2"),
    // Polar
    ('S', "#c2e0ff"),
    ('T', "#add4ff"),
    ('N', "#d1e8ff"),
    ('Q', "#99c9ff"),
    // Special
    ('C', "#fff5a3"),
    ('G', "#e0e0e0"),
    ('P', "#f0d1ff"),
    // Positive
    ('K', "#c2c2ff"),
    ('R', "#b3b3ff"),
    ('H', "#d1d1ff"),
    // Negative
    ('D', "#ffc2c2"),
    ('E', "#ffadad"),
]);

/// An RGB triple parsed from a `#rrggbb` identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parses `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Parses a color identifier, falling back to neutral gray.
    pub fn from_id(id: &str) -> Self {
        Self::from_hex(id).unwrap_or(Self {
            r: 0xee,
            g: 0xee,
            b: 0xee,
        })
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.r, rgb.g, rgb.b)
    }
}

impl From<Rgb> for crossterm::style::Color {
    fn from(rgb: Rgb) -> Self {
        crossterm::style::Color::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::ALPHABET;

    #[test]
    fn test_amino_acid_colors() {
        assert_eq!(AMINO_ACID_COLORS.color_of('A'), Some("#c2f0c2"));
        assert_eq!(AMINO_ACID_COLORS.color_of('-'), None);
        assert_eq!(AMINO_ACID_COLORS.color_of('a'), None); // Uppercase only
        assert_eq!(AMINO_ACID_COLORS.color_of('X'), None);
    }

    #[test]
    fn test_table_covers_letters_of_alphabet() {
        for c in ALPHABET.chars().filter(|c| *c != '-') {
            let color = AMINO_ACID_COLORS.color_of(c);
            assert!(color.is_some(), "{c} has no color");
            assert!(Rgb::from_hex(color.unwrap()).is_some());
        }
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(
            Rgb::from_hex("#f44336"),
            Some(Rgb {
                r: 0xf4,
                g: 0x43,
                b: 0x36
            })
        );
        assert_eq!(Rgb::from_hex("eeeeee"), Rgb::from_hex(NEUTRAL_GRAY));
        assert_eq!(Rgb::from_hex("#eee"), None);
        assert_eq!(Rgb::from_hex("#gggggg"), None);
        assert_eq!(Rgb::from_id("bogus"), Rgb::from_hex(NEUTRAL_GRAY).unwrap());
    }

    #[test]
    fn test_color_conversion() {
        let rgb = Rgb::from_id(DIFFERENCE_RED);
        assert_eq!(Color::from(rgb), Color::Rgb(0xf4, 0x43, 0x36));
    }
}
