use std::fmt;
use std::str::FromStr;

use serde::de::Error;

/// 8-bit sRGB color that serializes to a string like `"#ff00ff"`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// sRGB component values.
    pub rgb: [u8; 3],
}
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", hex::encode(self.rgb))
    }
}
impl FromStr for Rgb {
    type Err = hex::FromHexError;

    /// Parses a hex string like `#ff00ff` or `#f0f`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rgb = [0_u8; 3];
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() == 3 {
            let doubled = s.chars().flat_map(|c| [c, c]).collect::<String>();
            hex::decode_to_slice(doubled, &mut rgb)?;
        } else {
            hex::decode_to_slice(s, &mut rgb)?;
        }
        Ok(Rgb { rgb })
    }
}
impl serde::Serialize for Rgb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_string().serialize(serializer)
    }
}
impl<'de> serde::Deserialize<'de> for Rgb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Self>().map_err(D::Error::custom)
    }
}
impl From<colorous::Color> for Rgb {
    fn from(value: colorous::Color) -> Self {
        Rgb {
            rgb: [value.r, value.g, value.b],
        }
    }
}

impl Rgb {
    /// Pure black
    pub const BLACK: Rgb = Rgb { rgb: [0; 3] };
    /// Pure white
    pub const WHITE: Rgb = Rgb { rgb: [255; 3] };
    /// Gray used for auxiliary objects
    pub const GRAY: Rgb = Rgb { rgb: [128; 3] };

    /// Returns the `i`th color of the default categorical palette, cycling
    /// when `i` is out of range.
    pub fn palette(i: usize) -> Self {
        let colors = &colorous::CATEGORY10;
        colors[i % colors.len()].into()
    }

    /// Samples a continuous color gradient at `i / n`, for coloring many
    /// solutions.
    pub fn gradient(i: usize, n: usize) -> Self {
        let t = i as f64 / n.max(1) as f64;
        colorous::SINEBOW.eval_continuous(t.fract()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_hex_string() {
        let c = Rgb { rgb: [255, 0, 170] };
        assert_eq!(c.to_string(), "#ff00aa");
        assert_eq!("#ff00aa".parse::<Rgb>(), Ok(c));
        assert_eq!(" f0a ".parse::<Rgb>(), Ok(c));
        assert!("#ff00".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_rgb_serde() {
        let c = Rgb { rgb: [1, 2, 3] };
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, r##""#010203""##);
        assert_eq!(serde_json::from_str::<Rgb>(&json).unwrap(), c);
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(Rgb::palette(0), Rgb::palette(10));
        assert_ne!(Rgb::palette(0), Rgb::palette(1));
    }
}
