//! Class names for the light and dark post card styles

/// Classes applied to the parts of a post card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardThemeClasses {
    pub container: &'static str,
    pub title: &'static str,
    pub excerpt: &'static str,
    pub date: &'static str,
    pub hover: &'static str,
}

const LIGHT: CardThemeClasses = CardThemeClasses {
    container: "bg-gray-100",
    title: "text-gray-900",
    excerpt: "text-gray-700",
    date: "text-gray-500",
    hover: "hover:shadow-lg",
};

const DARK: CardThemeClasses = CardThemeClasses {
    container: "bg-gray-800",
    title: "text-white",
    excerpt: "text-gray-300",
    date: "text-gray-400",
    hover: "hover:bg-gray-700",
};

/// Post card color scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CardTheme {
    Light,
    #[default]
    Dark,
}

impl CardTheme {
    pub const fn classes(self) -> CardThemeClasses {
        match self {
            CardTheme::Light => LIGHT,
            CardTheme::Dark => DARK,
        }
    }
}
