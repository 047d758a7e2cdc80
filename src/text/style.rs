//! Style: Colors and modifiers attached to runs of text and grid cells.

use bitflags::bitflags;

/// True-color RGB representation.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Red, used for highlight badges.
    pub const RED: Self = Self::new(205, 49, 49);
    /// Gray, used for the status row prefix.
    pub const GRAY: Self = Self::new(128, 128, 128);

    /// Create from a 24-bit hex color (e.g., 0xFF5500).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl From<u32> for Rgb {
    #[inline]
    fn from(hex: u32) -> Self {
        Self::from_u32(hex)
    }
}

bitflags! {
    /// Text style modifiers.
    ///
    /// # Example
    /// ```
    /// use threadline::Modifiers;
    /// let style = Modifiers::BOLD | Modifiers::UNDERLINE;
    /// assert!(style.contains(Modifiers::BOLD));
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
        /// Italic text
        const ITALIC = 0b0000_0100;
        /// Underlined text
        const UNDERLINE = 0b0000_1000;
        /// Blinking text
        const BLINK = 0b0001_0000;
        /// Reversed colors (fg/bg swapped)
        const REVERSED = 0b0010_0000;
        /// Hidden/invisible text
        const HIDDEN = 0b0100_0000;
        /// Strikethrough text
        const STRIKETHROUGH = 0b1000_0000;
    }
}

impl std::fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// Visual style of a run of text.
///
/// `None` colors mean "terminal default" rather than a fixed palette entry,
/// so the timeline blends with whatever theme the terminal uses.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct Style {
    /// Foreground color, or the terminal default.
    pub fg: Option<Rgb>,
    /// Background color, or the terminal default.
    pub bg: Option<Rgb>,
    /// Active modifiers.
    pub modifiers: Modifiers,
}

impl Style {
    /// The terminal's default style.
    pub const DEFAULT: Self = Self {
        fg: None,
        bg: None,
        modifiers: Modifiers::empty(),
    };

    /// Set the foreground color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn fg(mut self, fg: Rgb) -> Self {
        self.fg = Some(fg);
        self
    }

    /// Set the background color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn bg(mut self, bg: Rgb) -> Self {
        self.bg = Some(bg);
        self
    }

    /// Add modifiers (builder pattern).
    #[inline]
    #[must_use]
    pub fn add(mut self, modifiers: Modifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    /// Add or remove modifiers depending on `on`.
    #[inline]
    #[must_use]
    pub fn toggle(mut self, modifiers: Modifiers, on: bool) -> Self {
        self.modifiers.set(modifiers, on);
        self
    }

    /// Shorthand for `add(Modifiers::BOLD)`.
    #[must_use]
    pub fn bold(self) -> Self {
        self.add(Modifiers::BOLD)
    }

    /// Shorthand for `add(Modifiers::REVERSED)`.
    #[must_use]
    pub fn reversed(self) -> Self {
        self.add(Modifiers::REVERSED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_from_tuple() {
        let rgb: Rgb = (255, 128, 0).into();
        assert_eq!(rgb, Rgb::new(255, 128, 0));
    }

    #[test]
    fn test_rgb_from_hex() {
        let rgb: Rgb = 0xFF8000.into();
        assert_eq!(rgb.r, 255);
        assert_eq!(rgb.g, 128);
        assert_eq!(rgb.b, 0);
    }

    #[test]
    fn test_style_builder() {
        let style = Style::DEFAULT
            .fg(Rgb::new(255, 0, 0))
            .bold()
            .add(Modifiers::ITALIC);

        assert_eq!(style.fg, Some(Rgb::new(255, 0, 0)));
        assert_eq!(style.bg, None);
        assert!(style.modifiers.contains(Modifiers::BOLD | Modifiers::ITALIC));
    }

    #[test]
    fn test_style_toggle() {
        let style = Style::DEFAULT.bold().toggle(Modifiers::REVERSED, true);
        assert!(style.modifiers.contains(Modifiers::REVERSED));

        let style = style.toggle(Modifiers::REVERSED, false);
        assert_eq!(style.modifiers, Modifiers::BOLD);
    }
}
