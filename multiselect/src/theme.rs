//! Colors used by the multi-select parts.

use tuidom::{Rgb, Style};

/// Named colors for every part of a multi-select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub surface: Rgb,
    pub text: Rgb,
    pub text_muted: Rgb,
    pub badge: Rgb,
    pub focused: Rgb,
    pub accent: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}

impl Palette {
    pub const fn dark() -> Self {
        Self {
            surface: Rgb::new(36, 40, 52),
            text: Rgb::new(220, 223, 228),
            text_muted: Rgb::new(128, 134, 150),
            badge: Rgb::new(58, 66, 92),
            focused: Rgb::new(72, 98, 160),
            accent: Rgb::new(122, 162, 247),
        }
    }

    pub(crate) fn muted(&self) -> Style {
        Style::new().foreground(self.text_muted)
    }

    pub(crate) fn focus(&self) -> Style {
        Style::new().background(self.focused).foreground(Rgb::WHITE)
    }

    pub(crate) fn badge(&self) -> Style {
        Style::new().background(self.badge).foreground(self.text)
    }

    pub(crate) fn surface(&self) -> Style {
        Style::new().background(self.surface).foreground(self.text)
    }

    pub(crate) fn accent(&self) -> Style {
        Style::new().foreground(self.accent)
    }
}
