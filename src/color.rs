// RGBA color shared by every particle and link, plus the accent-color parser
// that turns a theme's CSS color into one

use std::error::Error;
use std::fmt;

/// Alpha used for particle fills.
pub const AMBIENT_ALPHA: f64 = 0.6;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f64,
}

impl Color {
    /// Sky blue, used whenever an accent color cannot be understood.
    pub const FALLBACK: Color = Color::rgba(56, 189, 248, AMBIENT_ALPHA);
    /// Ambient color before the first theme notification arrives.
    pub const INITIAL: Color = Color::rgba(255, 255, 255, AMBIENT_ALPHA);

    pub const fn rgba(r: u8, g: u8, b: u8, alpha: f64) -> Color {
        Color { r, g, b, alpha }
    }

    /// Same channels, alpha replaced. Alpha is clamped to `[0, 1]`, NaN becomes 0.
    pub fn with_alpha(self, alpha: f64) -> Color {
        let alpha = if alpha.is_nan() {
            0.0
        } else {
            alpha.max(0.0).min(1.0)
        };
        Color { alpha, ..self }
    }

    pub fn css(&self) -> String {
        self.to_string()
    }

    // Source-over blend onto a straight-alpha RGBA pixel
    pub fn blend_over(&self, dst: [u8; 4]) -> [u8; 4] {
        let src_a = self.alpha;
        let dst_a = dst[3] as f64 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            return [0, 0, 0, 0];
        }
        let channel = |src: u8, dst: u8| {
            let mixed = (src as f64 * src_a + dst as f64 * dst_a * (1.0 - src_a)) / out_a;
            mixed.round() as u8
        };
        [
            channel(self.r, dst[0]),
            channel(self.g, dst[1]),
            channel(self.b, dst[2]),
            (out_a * 255.0).round() as u8,
        ]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let alpha = (self.alpha * 100.0).round() / 100.0;
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColorParseError {
    Empty,
    BadHex,
    TooFewChannels(usize),
    UnknownFormat,
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorParseError::Empty => write!(f, "empty color string"),
            ColorParseError::BadHex => write!(f, "expected #RGB, #RGBA, #RRGGBB or #RRGGBBAA hex color"),
            ColorParseError::TooFewChannels(found) => {
                write!(f, "expected 3 color channels, found {}", found)
            }
            ColorParseError::UnknownFormat => write!(f, "unrecognized color format"),
        }
    }
}

impl Error for ColorParseError {}

/// Parses a CSS accent color: `#RRGGBB`, `#RGB` (either with a trailing alpha),
/// `rgb(..)` or `rgba(..)`.
///
/// Alpha is always ignored: hex alpha digits are skipped, and the functional
/// form takes the first three integers it finds. The returned color is opaque.
pub fn parse_accent(input: &str) -> Result<Color, ColorParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ColorParseError::Empty);
    }
    if let Some(hex) = input.strip_prefix('#') {
        return parse_hex(hex);
    }
    let is_functional = input
        .get(..3)
        .map_or(false, |prefix| prefix.eq_ignore_ascii_case("rgb"));
    if is_functional {
        return parse_functional(input);
    }
    Err(ColorParseError::UnknownFormat)
}

/// Ambient color for a theme accent, never failing.
pub fn derive_ambient_color(accent: &str) -> Color {
    derive_with_alpha(accent, AMBIENT_ALPHA)
}

pub fn derive_with_alpha(accent: &str, alpha: f64) -> Color {
    parse_accent(accent)
        .unwrap_or(Color::FALLBACK)
        .with_alpha(alpha)
}

fn parse_hex(hex: &str) -> Result<Color, ColorParseError> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorParseError::BadHex);
    }
    let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| ColorParseError::BadHex);
    // An alpha digit pair (#RRGGBBAA) or digit (#RGBA) is read past and ignored
    match hex.len() {
        6 | 8 => Ok(Color::rgba(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            1.0,
        )),
        // #abc is shorthand for #aabbcc
        3 | 4 => Ok(Color::rgba(
            channel(&hex[0..1])? * 17,
            channel(&hex[1..2])? * 17,
            channel(&hex[2..3])? * 17,
            1.0,
        )),
        _ => Err(ColorParseError::BadHex),
    }
}

fn parse_functional(input: &str) -> Result<Color, ColorParseError> {
    let mut numbers: Vec<u32> = Vec::with_capacity(4);
    let mut current: Option<u32> = None;
    for c in input.chars() {
        match c.to_digit(10) {
            Some(digit) => {
                current = Some(current.unwrap_or(0).saturating_mul(10).saturating_add(digit));
            }
            None => {
                if let Some(value) = current.take() {
                    numbers.push(value);
                }
            }
        }
    }
    if let Some(value) = current {
        numbers.push(value);
    }

    if numbers.len() < 3 {
        return Err(ColorParseError::TooFewChannels(numbers.len()));
    }
    let channel = |value: u32| value.min(255) as u8;
    Ok(Color::rgba(
        channel(numbers[0]),
        channel(numbers[1]),
        channel(numbers[2]),
        1.0,
    ))
}
