use glam::Vec3;
use serde::Deserialize;

/// Linear RGB color with components in 0..=1
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "ColorSpec")]
pub struct Color(pub Vec3);

/// Accepted spellings of a color in config files
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorSpec {
    Hex(u32),
    Css(String),
}

impl Color {
    pub const BLACK: Color = Color(Vec3::ZERO);
    pub const WHITE: Color = Color(Vec3::ONE);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Color(Vec3::new(r, g, b))
    }

    /// From a 0xRRGGBB integer
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Color::rgb(channel(16), channel(8), channel(0))
    }

    /// From "#rrggbb" or "rrggbb"
    pub fn parse(text: &str) -> Option<Self> {
        let digits = text.trim().trim_start_matches('#');
        if digits.len() != 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Color::from_hex)
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let c = self.0.clamp(Vec3::ZERO, Vec3::ONE) * 255.0;
        [c.x.round() as u8, c.y.round() as u8, c.z.round() as u8, 255]
    }

    /// Component-wise product, for tinting by light color
    pub fn modulate(self, other: Color) -> Color {
        Color(self.0 * other.0)
    }

    pub fn scale(self, factor: f32) -> Color {
        Color(self.0 * factor)
    }
}

impl TryFrom<ColorSpec> for Color {
    type Error = String;

    fn try_from(spec: ColorSpec) -> Result<Self, Self::Error> {
        match spec {
            ColorSpec::Hex(hex) if hex <= 0xff_ff_ff => Ok(Color::from_hex(hex)),
            ColorSpec::Hex(hex) => Err(format!("color {hex:#x} exceeds 0xffffff")),
            ColorSpec::Css(text) => {
                Color::parse(&text).ok_or_else(|| format!("invalid color string {text:?}"))
            }
        }
    }
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Color::from_hex(hex)
    }
}
