use dioxus::prelude::*;

/// Light or dark appearance for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Value written to `data-theme` and the theme cookie.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// Parse a cookie value, falling back to Light.
    pub fn from_key(s: &str) -> Self {
        match s.trim() {
            "dark" => ThemeMode::Dark,
            _ => ThemeMode::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }
}

/// Theme signal shared by the header toggle and the settings page.
#[derive(Clone, Copy)]
pub struct ThemeState {
    pub mode: Signal<ThemeMode>,
}

impl ThemeState {
    pub fn set(&mut self, mode: ThemeMode) {
        self.mode.set(mode);
        set_theme(mode);
    }

    pub fn toggle(&mut self) {
        let next = self.mode.read().toggled();
        self.set(next);
    }
}

/// Provide [`ThemeState`] to the tree. Call once in the root component.
pub fn use_theme_provider() -> ThemeState {
    use_context_provider(|| ThemeState {
        mode: Signal::new(ThemeMode::Light),
    })
}

pub fn use_theme() -> ThemeState {
    use_context::<ThemeState>()
}

/// Apply the persisted theme to `<html>` on startup and sync it into
/// [`ThemeState`]. Render once near the root, below the provider.
#[component]
pub fn ThemeSeed() -> Element {
    let mut state = use_theme();
    use_effect(move || {
        spawn(async move {
            let stored = document::eval(
                r#"
                var match = document.cookie.match(/(?:^|;\s*)auraliva_theme=([^;]*)/);
                var theme = match ? match[1] : 'light';
                document.documentElement.setAttribute('data-theme', theme);
                return theme;
                "#,
            )
            .join::<String>()
            .await;
            if let Ok(key) = stored {
                state.mode.set(ThemeMode::from_key(&key));
            }
        });
    });

    rsx! {}
}

/// Persist the theme in a cookie for 30 days and update the document.
pub fn set_theme(mode: ThemeMode) {
    let theme = mode.as_str();
    document::eval(&format!(
        r#"
        (function() {{
            document.cookie = 'auraliva_theme={theme};path=/;max-age=2592000;SameSite=Lax';
            document.documentElement.setAttribute('data-theme', '{theme}');
        }})();
        "#,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_cookie_values_mean_light() {
        assert_eq!(ThemeMode::from_key("dark"), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_key("cyberpunk"), ThemeMode::Light);
        assert_eq!(ThemeMode::from_key(""), ThemeMode::Light);
    }

    #[test]
    fn toggle_flips_mode() {
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert!(ThemeMode::Light.toggled().is_dark());
        assert_eq!(ThemeMode::Dark.toggled().toggled(), ThemeMode::Dark);
    }
}
