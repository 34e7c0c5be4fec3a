//! Known style and color-scheme tags offered to clients.
//!
//! The generation pipeline accepts any string for either modifier; these
//! catalogs only describe the values the UI presents by default.

use serde::Serialize;

/// A selectable catalog value with its human-readable label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    /// Tag sent in generation requests.
    pub value: &'static str,
    /// Label shown to users.
    pub label: &'static str,
}

/// Visual style of the logo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleTag {
    /// Minimal, reduced shapes.
    Minimalist,
    /// Contemporary look.
    Modern,
    /// Retro, aged aesthetics.
    Vintage,
    /// Light-hearted, rounded forms.
    Playful,
    /// Business-like and restrained.
    Corporate,
    /// Technical or futuristic.
    Tech,
    /// Refined and graceful.
    Elegant,
    /// Heavy, high-contrast forms.
    Bold,
}

impl StyleTag {
    /// Every known style, in presentation order.
    pub const ALL: [Self; 8] = [
        Self::Minimalist,
        Self::Modern,
        Self::Vintage,
        Self::Playful,
        Self::Corporate,
        Self::Tech,
        Self::Elegant,
        Self::Bold,
    ];

    /// Wire value of the tag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minimalist => "minimalist",
            Self::Modern => "modern",
            Self::Vintage => "vintage",
            Self::Playful => "playful",
            Self::Corporate => "corporate",
            Self::Tech => "tech",
            Self::Elegant => "elegant",
            Self::Bold => "bold",
        }
    }

    /// Display label of the tag.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Minimalist => "Minimalist",
            Self::Modern => "Modern",
            Self::Vintage => "Vintage",
            Self::Playful => "Playful",
            Self::Corporate => "Corporate",
            Self::Tech => "Tech/Futuristic",
            Self::Elegant => "Elegant",
            Self::Bold => "Bold",
        }
    }

    /// Look up a known tag by its wire value.
    #[must_use]
    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == value)
    }

    /// Catalog entry for this tag.
    #[must_use]
    pub fn entry(self) -> CatalogEntry {
        CatalogEntry {
            value: self.as_str(),
            label: self.label(),
        }
    }
}

/// Color palette family of the logo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorScheme {
    /// Saturated, lively colors.
    Vibrant,
    /// Single hue or grayscale.
    Monochrome,
    /// Soft, light tints.
    Pastel,
    /// Dark backgrounds and tones.
    Dark,
    /// Browns, greens and natural tones.
    Earth,
    /// Bright fluorescent colors.
    Neon,
    /// Smooth color transitions.
    Gradient,
    /// Black, white and gold.
    Classic,
}

impl ColorScheme {
    /// Every known color scheme, in presentation order.
    pub const ALL: [Self; 8] = [
        Self::Vibrant,
        Self::Monochrome,
        Self::Pastel,
        Self::Dark,
        Self::Earth,
        Self::Neon,
        Self::Gradient,
        Self::Classic,
    ];

    /// Wire value of the scheme.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vibrant => "vibrant",
            Self::Monochrome => "monochrome",
            Self::Pastel => "pastel",
            Self::Dark => "dark",
            Self::Earth => "earth",
            Self::Neon => "neon",
            Self::Gradient => "gradient",
            Self::Classic => "classic",
        }
    }

    /// Display label of the scheme.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Vibrant => "Vibrant Colors",
            Self::Monochrome => "Monochrome",
            Self::Pastel => "Pastel",
            Self::Dark => "Dark Theme",
            Self::Earth => "Earth Tones",
            Self::Neon => "Neon/Bright",
            Self::Gradient => "Gradient",
            Self::Classic => "Classic (Black/White/Gold)",
        }
    }

    /// Look up a known scheme by its wire value.
    #[must_use]
    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|scheme| scheme.as_str() == value)
    }

    /// Catalog entry for this scheme.
    #[must_use]
    pub fn entry(self) -> CatalogEntry {
        CatalogEntry {
            value: self.as_str(),
            label: self.label(),
        }
    }
}

/// All style entries, in presentation order.
#[must_use]
pub fn style_entries() -> Vec<CatalogEntry> {
    StyleTag::ALL.into_iter().map(StyleTag::entry).collect()
}

/// All color-scheme entries, in presentation order.
#[must_use]
pub fn color_scheme_entries() -> Vec<CatalogEntry> {
    ColorScheme::ALL.into_iter().map(ColorScheme::entry).collect()
}
