use std::fmt;

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An RGB color filling a leaf block.
///
/// Colors are plain values: two colors are the same iff all three channels
/// match. Known palette colors display by name, anything else as `#rrggbb`.
///
/// # Example
///
/// ```
/// use quadblock_engine::Color;
///
/// assert_eq!(Color::REAL_RED.to_string(), "Real Red");
/// assert_eq!(Color::new(1, 2, 3).to_string(), "#010203");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    pub const PACIFIC_POINT: Self = Self::new(1, 128, 181);
    pub const REAL_RED: Self = Self::new(199, 44, 58);
    pub const OLD_OLIVE: Self = Self::new(138, 151, 71);
    pub const DAFFODIL_DELIGHT: Self = Self::new(255, 211, 92);
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    const NAMES: [(Self, &'static str); 6] = [
        (Self::PACIFIC_POINT, "Pacific Point"),
        (Self::REAL_RED, "Real Red"),
        (Self::OLD_OLIVE, "Old Olive"),
        (Self::DAFFODIL_DELIGHT, "Daffodil Delight"),
        (Self::BLACK, "Black"),
        (Self::WHITE, "White"),
    ];

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Returns the human readable name of a known color.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        Self::NAMES
            .iter()
            .find(|(color, _)| *color == self)
            .map(|(_, name)| *name)
    }

    /// Formats the color as `#rrggbb` in lowercase hex.
    #[must_use]
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn from_hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => f.write_str(&self.hex()),
        }
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Format: "#rrggbb" (e.g., "#c72c3a")
        serializer.serialize_str(&self.hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid color: expected '#rrggbb', got '{s}'"))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PaletteError {
    #[display("palette must contain at least one color")]
    Empty,
    #[display("palette contains {_0} more than once")]
    Duplicate(#[error(not(source))] Color),
}

/// The ordered set of distinct colors a board is painted from.
///
/// Subdividing picks leaf colors uniformly from the palette, and goal
/// assignment draws target colors from it without replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Color>", into = "Vec<Color>")]
pub struct Palette {
    colors: Vec<Color>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::classic()
    }
}

impl Palette {
    /// The four named colors of the classic game.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            colors: vec![
                Color::PACIFIC_POINT,
                Color::REAL_RED,
                Color::OLD_OLIVE,
                Color::DAFFODIL_DELIGHT,
            ],
        }
    }

    pub fn new(colors: Vec<Color>) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::Empty);
        }
        for (i, color) in colors.iter().enumerate() {
            if colors[..i].contains(color) {
                return Err(PaletteError::Duplicate(*color));
            }
        }
        Ok(Self { colors })
    }

    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[must_use]
    pub fn contains(&self, color: Color) -> bool {
        self.colors.contains(&color)
    }

    /// Picks one palette color uniformly at random.
    pub fn choose<R>(&self, rng: &mut R) -> Color
    where
        R: Rng + ?Sized,
    {
        self.colors[rng.random_range(0..self.colors.len())]
    }
}

impl TryFrom<Vec<Color>> for Palette {
    type Error = PaletteError;

    fn try_from(colors: Vec<Color>) -> Result<Self, Self::Error> {
        Self::new(colors)
    }
}

impl From<Palette> for Vec<Color> {
    fn from(palette: Palette) -> Self {
        palette.colors
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_color_display() {
        assert_eq!(Color::PACIFIC_POINT.to_string(), "Pacific Point");
        assert_eq!(Color::DAFFODIL_DELIGHT.to_string(), "Daffodil Delight");
        assert_eq!(Color::new(0xab, 0xcd, 0xef).to_string(), "#abcdef");
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::REAL_RED.hex(), "#c72c3a");
        assert_eq!(Color::BLACK.hex(), "#000000");
        assert_eq!(Color::new(0x0a, 0xff, 0x01).hex(), "#0aff01");
    }

    #[test]
    fn test_color_serialization() {
        let serialized = serde_json::to_string(&Color::REAL_RED).unwrap();
        assert_eq!(serialized, "\"#c72c3a\"");

        let deserialized: Color = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, Color::REAL_RED);
    }

    #[test]
    fn test_color_deserialization_errors() {
        for input in ["\"c72c3a\"", "\"#c72c3\"", "\"#c72c3g\"", "\"#c72c3aa\""] {
            let result: Result<Color, _> = serde_json::from_str(input);
            assert!(result.is_err(), "{input} should be rejected");
        }
    }

    #[test]
    fn test_palette_rejects_empty_and_duplicates() {
        assert_eq!(Palette::new(vec![]), Err(PaletteError::Empty));
        assert_eq!(
            Palette::new(vec![Color::BLACK, Color::WHITE, Color::BLACK]),
            Err(PaletteError::Duplicate(Color::BLACK))
        );
    }

    #[test]
    fn test_palette_deserialization_validates() {
        let palette: Palette = serde_json::from_str(r##"["#000000", "#ffffff"]"##).unwrap();
        assert_eq!(palette.colors(), &[Color::BLACK, Color::WHITE]);

        let result: Result<Palette, _> = serde_json::from_str(r##"["#000000", "#000000"]"##);
        assert!(result.is_err());
    }

    #[test]
    fn test_palette_choose_stays_in_palette() {
        let palette = Palette::classic();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..100 {
            assert!(palette.contains(palette.choose(&mut rng)));
        }
    }
}
