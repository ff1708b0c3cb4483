//! Visual styling: [`Color`] and [`Style`].

/// An RGB colour. [`Color::DEFAULT`] leaves the terminal's own colour in
/// place.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Color(Option<(u8, u8, u8)>);

impl Color {
    pub const DEFAULT: Self = Self(None);

    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(Some((r, g, b)))
    }

    /// The RGB components, or `None` for [`Color::DEFAULT`].
    #[inline]
    pub const fn rgb(self) -> Option<(u8, u8, u8)> {
        self.0
    }
}

/// Complete visual style for a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
}

impl Style {
    #[inline]
    pub const fn with_fg(mut self, fg: Color) -> Self {
        self.fg = fg;
        self
    }

    #[inline]
    pub const fn with_bg(mut self, bg: Color) -> Self {
        self.bg = bg;
        self
    }

    #[inline]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_colour_has_no_rgb() {
        assert_eq!(Color::DEFAULT.rgb(), None);
        assert_eq!(Color::from_rgb(1, 2, 3).rgb(), Some((1, 2, 3)));
    }

    #[test]
    fn style_builder() {
        let red = Color::from_rgb(220, 60, 60);
        let s = Style::default().with_fg(red).bold();
        assert_eq!(s.fg, red);
        assert_eq!(s.bg, Color::DEFAULT);
        assert!(s.bold);
    }
}
