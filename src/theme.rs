// Light/dark theme state behind the toggle button

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    /// Reads the document's `data-theme` attribute; anything but "light" is dark.
    pub fn from_attribute(value: Option<&str>) -> Theme {
        match value {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Value for `data-theme`, or `None` when the attribute should be removed.
    pub fn attribute(self) -> Option<&'static str> {
        match self {
            Theme::Dark => None,
            Theme::Light => Some("light"),
        }
    }

    // Icon shows the theme a click would switch to
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Dark => "🔆",
            Theme::Light => "🌙",
        }
    }

    pub fn aria_pressed(self) -> &'static str {
        match self {
            Theme::Dark => "false",
            Theme::Light => "true",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_twice_is_identity() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }

    #[test]
    fn attribute_round_trips_through_the_document() {
        for theme in [Theme::Dark, Theme::Light].iter() {
            assert_eq!(Theme::from_attribute(theme.attribute()), *theme);
        }
        assert_eq!(Theme::from_attribute(Some("sepia")), Theme::Dark);
    }

    #[test]
    fn light_theme_presses_the_button() {
        assert_eq!(Theme::Light.icon(), "🌙");
        assert_eq!(Theme::Light.aria_pressed(), "true");
        assert_eq!(Theme::Dark.icon(), "🔆");
        assert_eq!(Theme::Dark.aria_pressed(), "false");
    }
}
