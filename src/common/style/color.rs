//! RGB color type shared by the fill parser and the color classifiers.
use std::fmt;

/// RGB color representation.
///
/// # Examples
///
/// ```rust
/// use bonebox::common::RGBColor;
///
/// // Create a red color
/// let red = RGBColor::new(255, 0, 0);
///
/// // Create from hex string, case-insensitive
/// let magenta = RGBColor::from_hex("c133ad").unwrap();
/// assert_eq!(magenta.to_hex(), "C133AD");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RGBColor {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

impl RGBColor {
    pub const WHITE: RGBColor = RGBColor::new(255, 255, 255);

    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create an RGB color from a hex string.
    ///
    /// Accepts exactly six hex digits with an optional `#` prefix. Anything
    /// else yields `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bonebox::common::RGBColor;
    ///
    /// let red = RGBColor::from_hex("FF0000").unwrap();
    /// let blue = RGBColor::from_hex("#0000ff").unwrap();
    /// assert!(RGBColor::from_hex("#GGG").is_none());
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Self::new(r, g, b))
    }

    /// Convert to an upper-case hex string (without # prefix).
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for RGBColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_rejects_malformed() {
        assert!(RGBColor::from_hex("").is_none());
        assert!(RGBColor::from_hex("invalid").is_none());
        assert!(RGBColor::from_hex("+F0000").is_none());
        assert!(RGBColor::from_hex("FFFFFFF").is_none());
        assert!(RGBColor::from_hex("ÿÿÿ").is_none());
    }

    #[test]
    fn test_round_trip_is_upper_case() {
        let c = RGBColor::from_hex("#2f8e29").unwrap();
        assert_eq!(c, RGBColor::new(0x2F, 0x8E, 0x29));
        assert_eq!(c.to_string(), "#2F8E29");
    }
}
