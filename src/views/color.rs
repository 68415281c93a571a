use crate::models::Priority;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorToken {
    Green,
    Yellow,
    Red,
    Gray,
}

impl ColorToken {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
            Self::Gray => "gray",
        }
    }

    /// Swatch used for priority dots and badges.
    pub fn hex(&self) -> &'static str {
        match self {
            Self::Green => "#86EFAC",
            Self::Yellow => "#FDE047",
            Self::Red => "#FCA5A5",
            Self::Gray => "#E2E8F0",
        }
    }
}

pub fn priority_color(priority: Option<Priority>) -> ColorToken {
    match priority {
        Some(Priority::Low) => ColorToken::Green,
        Some(Priority::Medium) => ColorToken::Yellow,
        Some(Priority::High) => ColorToken::Red,
        None => ColorToken::Gray,
    }
}

/// Same as [`priority_color`] for a raw priority name; unknown names are gray.
pub fn priority_color_by_name(name: &str) -> ColorToken {
    priority_color(Priority::from_str(name))
}
