//! Colours, font faces and text styles used by the dossier layout

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Components in the 0-1 range PDF colour operators expect
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        )
    }
}

pub mod palette {
    use super::Rgb;

    pub const SLATE_950: Rgb = Rgb(2, 6, 23);
    pub const SLATE_900: Rgb = Rgb(15, 23, 42);
    pub const SLATE_800: Rgb = Rgb(30, 41, 59);
    pub const VIOLET_600: Rgb = Rgb(124, 58, 237);
    pub const VIOLET_400: Rgb = Rgb(167, 139, 250);
    /// Brand logo stroke (#fdba74)
    pub const ORANGE_300: Rgb = Rgb(253, 186, 116);
    pub const LIME_400: Rgb = Rgb(163, 230, 53);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const TEXT_GRAY: Rgb = Rgb(148, 163, 184);
}

/// Helvetica family faces from the PDF standard 14 fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFace {
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl FontFace {
    pub const ALL: [FontFace; 4] = [
        FontFace::Regular,
        FontFace::Bold,
        FontFace::Italic,
        FontFace::BoldItalic,
    ];

    pub fn base_font(self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
            FontFace::Italic => "Helvetica-Oblique",
            FontFace::BoldItalic => "Helvetica-BoldOblique",
        }
    }

    /// Name under which the face is registered in page resources
    pub fn resource_name(self) -> &'static str {
        match self {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
            FontFace::Italic => "F3",
            FontFace::BoldItalic => "F4",
        }
    }

    pub fn is_bold(self) -> bool {
        matches!(self, FontFace::Bold | FontFace::BoldItalic)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Align {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub face: FontFace,
    /// Font size in points
    pub size: f32,
    pub color: Rgb,
}

impl TextStyle {
    pub const fn new(face: FontFace, size: f32, color: Rgb) -> Self {
        Self { face, size, color }
    }

    pub const fn regular(size: f32, color: Rgb) -> Self {
        Self::new(FontFace::Regular, size, color)
    }

    pub const fn bold(size: f32, color: Rgb) -> Self {
        Self::new(FontFace::Bold, size, color)
    }

    pub const fn italic(size: f32, color: Rgb) -> Self {
        Self::new(FontFace::Italic, size, color)
    }
}
