use deskclock_core::config::{Appearance, ThemeName};
use iced::{Border, Theme, widget::container::Style};

/// Builds the window [`Theme`] from the configured [`Appearance`].
#[must_use]
pub fn deskclock_theme(appearance: &Appearance) -> Theme {
    match appearance.theme {
        ThemeName::Dark => Theme::Dark,
        ThemeName::Light => Theme::Light,
        ThemeName::Nord => Theme::Nord,
        ThemeName::Dracula => Theme::Dracula,
        ThemeName::SolarizedDark => Theme::SolarizedDark,
        ThemeName::SolarizedLight => Theme::SolarizedLight,
    }
}

/// Rounded, bordered surface used by the dashboard cards.
pub fn card_style(theme: &Theme) -> Style {
    let palette = theme.extended_palette();

    Style {
        background: Some(palette.background.weak.color.scale_alpha(0.4).into()),
        border: Border {
            color:  palette.background.strong.color,
            width:  1.0,
            radius: 12.0.into(),
        },
        ..Style::default()
    }
}

/// Circular badge standing in for the user's avatar.
pub fn avatar_style(theme: &Theme) -> Style {
    let palette = theme.extended_palette();

    Style {
        background: Some(palette.primary.base.color.into()),
        text_color: Some(palette.primary.base.text),
        border: Border {
            radius: 20.0.into(),
            ..Border::default()
        },
        ..Style::default()
    }
}

#[cfg(test)]
mod tests {
    use iced::{Background, Color};

    use super::*;

    fn color(background: Option<Background>) -> Color {
        match background.expect("background should be set") {
            Background::Color(color) => color,
            other => panic!("unexpected background: {other:?}"),
        }
    }

    #[test]
    fn maps_every_configured_theme() {
        let theme_for = |theme| {
            deskclock_theme(&Appearance {
                theme,
                ..Appearance::default()
            })
        };

        assert_eq!(theme_for(ThemeName::Dark), Theme::Dark);
        assert_eq!(theme_for(ThemeName::Light), Theme::Light);
        assert_eq!(theme_for(ThemeName::Nord), Theme::Nord);
        assert_eq!(theme_for(ThemeName::Dracula), Theme::Dracula);
        assert_eq!(theme_for(ThemeName::SolarizedDark), Theme::SolarizedDark);
        assert_eq!(theme_for(ThemeName::SolarizedLight), Theme::SolarizedLight);
    }

    #[test]
    fn card_is_translucent_and_rounded() {
        let theme = Theme::Dark;
        let style = card_style(&theme);

        let background = color(style.background);
        assert_eq!(
            background.a,
            0.4 * theme.extended_palette().background.weak.color.a
        );
        assert_eq!(style.border.width, 1.0);
        assert_eq!(style.border.radius, 12.0.into());
    }

    #[test]
    fn avatar_uses_primary_colors() {
        let theme = Theme::Light;
        let style = avatar_style(&theme);

        assert_eq!(
            color(style.background),
            theme.extended_palette().primary.base.color
        );
        assert_eq!(
            style.text_color,
            Some(theme.extended_palette().primary.base.text)
        );
    }
}
