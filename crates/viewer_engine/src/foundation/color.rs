//! Linear RGB color with packed-integer and HSL conversions
//!
//! Colors are stored as three `f32` channels in `[0, 1]`. Control widgets
//! talk in packed `0xRRGGBB` integers or `#rrggbb` strings, so the packed
//! form is the canonical one: two colors are considered equal when they
//! pack to the same integer.

use std::fmt;

/// RGB color with floating point channels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel in `[0, 1]`
    pub r: f32,
    /// Green channel in `[0, 1]`
    pub g: f32,
    /// Blue channel in `[0, 1]`
    pub b: f32,
}

impl Color {
    /// Pure white
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    /// Pure black
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0 };

    /// Create a color from channel values
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a packed `0xRRGGBB` integer
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| f32::from(((hex >> shift) & 0xff) as u8) / 255.0;
        Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
        }
    }

    /// Pack the color into a `0xRRGGBB` integer
    ///
    /// Channels are clamped to `[0, 1]` and rounded to the nearest 8-bit value.
    pub fn to_hex(&self) -> u32 {
        let channel = |value: f32| u32::from((value.clamp(0.0, 1.0) * 255.0).round() as u8);
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Parse a `#rrggbb` or `rrggbb` string
    pub fn from_hex_str(text: &str) -> Option<Self> {
        let digits = text.trim().trim_start_matches('#');
        if digits.len() != 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self::from_hex)
    }

    /// Lowercase six digit hex string without a leading `#`
    pub fn to_hex_string(&self) -> String {
        format!("{:06x}", self.to_hex())
    }

    /// Create a color from hue, saturation and lightness, all in `[0, 1]`
    ///
    /// Hue wraps around; saturation and lightness are clamped.
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let mut color = Self::BLACK;
        color.set_hsl(h, s, l);
        color
    }

    /// Overwrite this color from hue, saturation and lightness
    pub fn set_hsl(&mut self, h: f32, s: f32, l: f32) -> &mut Self {
        let h = h.rem_euclid(1.0);
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);

        if s == 0.0 {
            self.r = l;
            self.g = l;
            self.b = l;
        } else {
            let p = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
            let q = 2.0 * l - p;

            self.r = hue_to_rgb(q, p, h + 1.0 / 3.0);
            self.g = hue_to_rgb(q, p, h);
            self.b = hue_to_rgb(q, p, h - 1.0 / 3.0);
        }
        self
    }

    /// Whether both colors pack to the same `0xRRGGBB` value
    pub fn canonical_eq(&self, other: &Self) -> bool {
        self.to_hex() == other.to_hex()
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex_string())
    }
}

fn hue_to_rgb(p: f32, q: f32, t: f32) -> f32 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };

    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 0.5 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * 6.0 * (2.0 / 3.0 - t);
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hex_round_trip_is_exact() {
        for hex in [0x000000, 0x3a3030, 0xffffff, 0x12ab7f] {
            assert_eq!(Color::from_hex(hex).to_hex(), hex);
        }
    }

    #[test]
    fn test_hex_string_parsing() {
        let color = Color::from_hex_str("#3a3030").expect("valid hex");
        assert_eq!(color.to_hex(), 0x3a3030);
        assert_eq!(color.to_hex_string(), "3a3030");
        assert_eq!(color.to_string(), "#3a3030");

        assert!(Color::from_hex_str("3A3030").is_some());
        assert!(Color::from_hex_str("#fff").is_none());
        assert!(Color::from_hex_str("#zzzzzz").is_none());
    }

    #[test]
    fn test_out_of_range_channels_clamp_when_packed() {
        let color = Color::new(1.5, -0.2, 0.5);
        assert_eq!(color.to_hex(), 0xff0080);
    }

    #[test]
    fn test_hsl_primaries() {
        let red = Color::from_hsl(0.0, 1.0, 0.5);
        assert_eq!(red.to_hex(), 0xff0000);

        let green = Color::from_hsl(1.0 / 3.0, 1.0, 0.5);
        assert_eq!(green.to_hex(), 0x00ff00);

        let blue = Color::from_hsl(2.0 / 3.0, 1.0, 0.5);
        assert_eq!(blue.to_hex(), 0x0000ff);
    }

    #[test]
    fn test_hsl_grey_and_wrap() {
        let grey = Color::from_hsl(0.3, 0.0, 0.25);
        assert_relative_eq!(grey.r, 0.25);
        assert_relative_eq!(grey.g, 0.25);
        assert_relative_eq!(grey.b, 0.25);

        assert!(Color::from_hsl(1.0, 1.0, 0.5).canonical_eq(&Color::from_hsl(0.0, 1.0, 0.5)));
    }

    #[test]
    fn test_hsl_half_saturation() {
        // Matches the diffuse colour used by the metalness grid corner sphere.
        let color = Color::from_hsl(0.0, 0.5, 0.1);
        assert_relative_eq!(color.r, 0.15, epsilon = 1e-6);
        assert_relative_eq!(color.g, 0.05, epsilon = 1e-6);
        assert_relative_eq!(color.b, 0.05, epsilon = 1e-6);
    }
}
