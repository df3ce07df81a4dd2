//! Category color palette.
//!
//! Colors are plain RGB triples so the core stays independent of any
//! rendering backend; the TUI converts them at draw time.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::error::{Error, Result};
use crate::types::{Category, Slot};

/// 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::Config(format!("invalid color {:?}, expected #rrggbb", hex)));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|e| Error::Config(format!("invalid color {:?}: {}", hex, e)))
        };

        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Color for slots with nothing recorded.
pub const EMPTY_SLOT_COLOR: Rgb = Rgb::new(0x2a, 0x2a, 0x3e);

/// Built-in color for [`Category::Other`].
const OTHER_COLOR: Rgb = Rgb::new(0x94, 0xa3, 0xb8);

fn default_color(category: Category) -> Rgb {
    match category {
        Category::Miscellaneous => Rgb::new(0x63, 0x66, 0xf1),
        Category::PersonalDevelopment => Rgb::new(0x8b, 0x5c, 0xf6),
        Category::HobbiesLeisure => Rgb::new(0x3b, 0x82, 0xf6),
        Category::FoodPreparation => Rgb::new(0xf5, 0x9e, 0x0b),
        Category::WorkInternship => Rgb::new(0x10, 0xb9, 0x81),
        Category::EducationLecture => Rgb::new(0xef, 0x44, 0x44),
        Category::Travel => Rgb::new(0x6b, 0x72, 0x80),
        Category::Socializing => Rgb::new(0xec, 0x48, 0x99),
        Category::Other => OTHER_COLOR,
    }
}

/// Mapping from category to display color.
///
/// Every category always has a color, so resolving a slot never fails:
/// unknown labels use the `Other` color, empty slots use [`EMPTY_SLOT_COLOR`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPalette {
    colors: HashMap<Category, Rgb>,
    empty: Rgb,
}

impl Default for CategoryPalette {
    fn default() -> Self {
        Self {
            colors: Category::ALL
                .iter()
                .map(|&c| (c, default_color(c)))
                .collect(),
            empty: EMPTY_SLOT_COLOR,
        }
    }
}

impl CategoryPalette {
    /// Default palette with per-category overrides applied.
    ///
    /// Keys are category labels (`"Work/Internship"`), values `#rrggbb`.
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Result<Self> {
        let mut palette = Self::default();
        for (label, hex) in overrides {
            let category: Category = label
                .parse()
                .map_err(|e| Error::Config(format!("palette: {}", e)))?;
            palette.colors.insert(category, Rgb::from_hex(hex)?);
        }
        Ok(palette)
    }

    /// Color for a category.
    pub fn color(&self, category: Category) -> Rgb {
        self.colors
            .get(&category)
            .copied()
            .unwrap_or_else(|| self.fallback())
    }

    /// Color for a raw category label, falling back to the `Other` color.
    pub fn resolve(&self, label: &str) -> Rgb {
        self.color(Category::resolve(label))
    }

    /// Color for a grid cell.
    pub fn slot_color(&self, slot: &Slot) -> Rgb {
        match slot {
            Some(record) => self.resolve(&record.category),
            None => self.empty,
        }
    }

    /// Color used for unknown categories.
    pub fn fallback(&self) -> Rgb {
        self.colors
            .get(&Category::Other)
            .copied()
            .unwrap_or(OTHER_COLOR)
    }

    /// Color used for empty slots.
    pub fn empty(&self) -> Rgb {
        self.empty
    }

    /// Categories and their colors in legend order.
    pub fn entries(&self) -> impl Iterator<Item = (Category, Rgb)> + '_ {
        Category::ALL.iter().map(move |&c| (c, self.color(c)))
    }
}
