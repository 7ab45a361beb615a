/// A fill or stroke colour, in the RGB or grey device colour spaces
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB { r, g, b }
    }

    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create a new colour in the grey space, g ranges from 0.0 to 1.0
    pub fn new_grey(g: f32) -> Colour {
        Colour::Grey { g }
    }

    /// Parse a CSS-style hex colour (`#1f2937` or `1f2937`). Shorthand `#abc` is accepted.
    pub fn from_hex(hex: &str) -> Option<Colour> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return None,
        };
        let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
        Some(Colour::new_rgb_bytes(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl<T: Into<f32>> From<(T, T, T)> for Colour {
    fn from(c: (T, T, T)) -> Self {
        Colour::RGB {
            r: c.0.into(),
            g: c.1.into(),
            b: c.2.into(),
        }
    }
}

/// The house palette used by the report layouts
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
    /// body text
    pub const TEXT: Colour = Colour::Grey { g: 0.13 };
    /// labels, captions, footer
    pub const MUTED: Colour = Colour::Grey { g: 0.42 };
    /// table borders and dividers
    pub const RULE: Colour = Colour::Grey { g: 0.78 };
    /// table header band
    pub const BAND: Colour = Colour::Grey { g: 0.93 };
    pub const ACCENT: Colour = Colour::RGB {
        r: 0.11,
        g: 0.30,
        b: 0.53,
    };
    pub const GOOD: Colour = Colour::RGB {
        r: 0.09,
        g: 0.50,
        b: 0.24,
    };
    pub const FAIR: Colour = Colour::RGB {
        r: 0.80,
        g: 0.52,
        b: 0.04,
    };
    pub const POOR: Colour = Colour::RGB {
        r: 0.75,
        g: 0.15,
        b: 0.15,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colours() {
        assert_eq!(Colour::from_hex("#ffffff"), Some(Colour::new_rgb(1.0, 1.0, 1.0)));
        assert_eq!(Colour::from_hex("000"), Some(Colour::new_rgb(0.0, 0.0, 0.0)));
        assert_eq!(Colour::from_hex("#12345"), None);
        assert_eq!(Colour::from_hex("#gg0000"), None);
    }
}
