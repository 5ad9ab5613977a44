use serde::{Deserialize, Deserializer, de::Error as _};

/// Built-in palettes the GUI can be rendered with.
#[derive(Deserialize, Default, Copy, Clone, Eq, PartialEq, Debug)]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
    Nord,
    Dracula,
    SolarizedDark,
    SolarizedLight,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Appearance {
    #[serde(default)]
    pub font_name:    Option<String>,
    #[serde(default)]
    pub theme:        ThemeName,
    #[serde(
        deserialize_with = "scale_factor_deserializer",
        default = "default_scale_factor"
    )]
    pub scale_factor: f64,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            font_name:    None,
            theme:        ThemeName::default(),
            scale_factor: default_scale_factor(),
        }
    }
}

fn scale_factor_deserializer<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>
{
    let value = f64::deserialize(deserializer)?;

    if !value.is_finite() || value <= 0.0 {
        return Err(D::Error::custom("Scale factor must be greater than 0.0"));
    }

    if value > 4.0 {
        return Err(D::Error::custom("Scale factor cannot be greater than 4.0"));
    }

    Ok(value)
}

fn default_scale_factor() -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        appearance: Appearance
    }

    #[test]
    fn scale_factor_must_be_positive() {
        let result = toml::from_str::<Wrapper>("[appearance]\nscale_factor = 0.0\n");
        assert!(result.is_err());
    }

    #[test]
    fn scale_factor_upper_bound() {
        let result = toml::from_str::<Wrapper>("[appearance]\nscale_factor = 4.5\n");
        assert!(result.is_err());
    }

    #[test]
    fn theme_defaults_to_dark() {
        let wrapper = toml::from_str::<Wrapper>("[appearance]\n").expect("valid");
        assert_eq!(wrapper.appearance.theme, ThemeName::Dark);
        assert_eq!(wrapper.appearance.scale_factor, 1.0);
    }
}
