/// RGB colors and the default palette

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const GREY: Rgb = Rgb::new(128, 128, 128);
    pub const FLOOR: Rgb = Rgb::new(54, 179, 216);
    pub const BACKGROUND: Rgb = Rgb::new(232, 228, 240);
    pub const PASTEL_RED: Rgb = Rgb::new(255, 179, 186);
    pub const PASTEL_ORANGE: Rgb = Rgb::new(255, 223, 186);
    pub const PASTEL_YELLOW: Rgb = Rgb::new(255, 255, 186);
    pub const PASTEL_GREEN: Rgb = Rgb::new(186, 255, 201);
    pub const PASTEL_BLUE: Rgb = Rgb::new(186, 225, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `factor`, clamping to [0, 255]
    pub fn scaled(self, factor: f64) -> Self {
        let scale = |c: u8| (c as f64 * factor).clamp(0.0, 255.0) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }

    /// Composite `self` over `background` with the given alpha (0 = transparent)
    pub fn blend_over(self, background: Rgb, alpha: u8) -> Self {
        let a = alpha as u32;
        let mix = |fg: u8, bg: u8| ((fg as u32 * a + bg as u32 * (255 - a)) / 255) as u8;
        Self::new(
            mix(self.r, background.r),
            mix(self.g, background.g),
            mix(self.b, background.b),
        )
    }

    /// Perceived luminance in [0, 1]
    pub fn luminance(self) -> f64 {
        (0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64) / 255.0
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}
