use ratatui::style::Color;

pub const MIN_BRIGHTNESS: u8 = 10;
pub const MAX_BRIGHTNESS: u8 = 100;

/// Shell palette, derived from the Dark Mode and Brightness settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub dark: bool,
    /// Percent, `MIN_BRIGHTNESS..=MAX_BRIGHTNESS`.
    pub brightness: u8,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            dark: false,
            brightness: MAX_BRIGHTNESS,
        }
    }
}

impl Theme {
    pub fn new(dark: bool, brightness: u8) -> Self {
        Self {
            dark,
            brightness: brightness.clamp(MIN_BRIGHTNESS, MAX_BRIGHTNESS),
        }
    }

    /// Dim an RGB colour by the brightness level. Named colours pass through.
    pub fn tint(&self, color: Color) -> Color {
        match color {
            Color::Rgb(r, g, b) => {
                let scale = |c: u8| (c as u16 * self.brightness as u16 / 100) as u8;
                Color::Rgb(scale(r), scale(g), scale(b))
            }
            other => other,
        }
    }

    fn pick(&self, light: Color, dark: Color) -> Color {
        self.tint(if self.dark { dark } else { light })
    }

    pub fn background(&self) -> Color {
        self.pick(Color::Rgb(244, 245, 248), Color::Rgb(26, 26, 26))
    }

    pub fn surface(&self) -> Color {
        self.pick(Color::Rgb(226, 229, 236), Color::Rgb(44, 44, 52))
    }

    pub fn text(&self) -> Color {
        self.pick(Color::Rgb(20, 20, 24), Color::Rgb(240, 240, 240))
    }

    pub fn muted(&self) -> Color {
        self.pick(Color::Rgb(110, 110, 125), Color::Rgb(140, 140, 150))
    }

    pub fn accent(&self) -> Color {
        self.pick(Color::Rgb(40, 110, 220), Color::Rgb(80, 200, 255))
    }

    pub fn highlight(&self) -> Color {
        self.pick(Color::Rgb(200, 120, 0), Color::Rgb(255, 220, 80))
    }

    pub fn frame(&self) -> Color {
        self.tint(Color::Rgb(60, 60, 70))
    }
}
