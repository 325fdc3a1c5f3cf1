//! Byte-value color classification and display labels.

use serde::Serialize;

/// Visual color class assigned to a byte value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorClass {
    /// Missing sentinel and 0xFF.
    White,
    /// 0x00.
    Black,
    /// Low control range 0x01–0x1F.
    Red,
    /// Printable ASCII range 0x20–0x7F.
    Yellow,
    /// 0x80–0xBF.
    Cyan,
    /// 0xC0–0xFE.
    Green,
}

impl ColorClass {
    /// RGB components of this class.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            ColorClass::White => (255, 255, 255),
            ColorClass::Black => (0, 0, 0),
            ColorClass::Red => (251, 70, 76),
            ColorClass::Yellow => (224, 222, 113),
            ColorClass::Cyan => (83, 223, 221),
            ColorClass::Green => (68, 207, 110),
        }
    }

    /// `#rrggbb` form for SVG fills.
    pub fn hex(self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

/// Maps a slot value to its color class. Total over the byte domain plus
/// the missing sentinel.
pub fn classify(value: Option<u8>) -> ColorClass {
    match value {
        None => ColorClass::White,
        Some(0xFF) => ColorClass::White,
        Some(0x00) => ColorClass::Black,
        Some(0x01..=0x1F) => ColorClass::Red,
        Some(0x20..=0x7F) => ColorClass::Yellow,
        Some(0x80..=0xBF) => ColorClass::Cyan,
        Some(_) => ColorClass::Green,
    }
}

/// Display text for a slot value: decimal, two-digit hex, binary, and the
/// character with that code point, one per line. The missing sentinel is
/// labelled `None`.
pub fn label(value: Option<u8>) -> String {
    match value {
        None => "None".to_string(),
        Some(v) => format!("{v}\n{v:02x}\n{v:08b}\n{}", char::from(v)),
    }
}
