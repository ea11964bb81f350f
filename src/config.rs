use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Minimum logical width of a person node; long names widen it.
    pub member_width: f32,
    pub member_height: f32,
    /// Side length of the square family-unit marker node.
    pub unit_size: f32,
    pub node_spacing: f32,
    pub rank_spacing: f32,
    pub margin_x: f32,
    pub margin_y: f32,
    pub label_padding_x: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            member_width: 200.0,
            member_height: 64.0,
            unit_size: 40.0,
            node_spacing: 50.0,
            rank_spacing: 100.0,
            margin_x: 8.0,
            margin_y: 8.0,
            label_padding_x: 24.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::default_light();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    bloodline_color: Option<String>,
    outsider_color: Option<String>,
    member_border_color: Option<String>,
    text_color: Option<String>,
    male_glyph_color: Option<String>,
    female_glyph_color: Option<String>,
    unit_color: Option<String>,
    line_color: Option<String>,
    background: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutVariables {
    member_width: Option<f32>,
    member_height: Option<f32>,
    unit_size: Option<f32>,
    node_spacing: Option<f32>,
    rank_spacing: Option<f32>,
    margin_x: Option<f32>,
    margin_y: Option<f32>,
    label_padding_x: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutVariables>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;
    Ok(apply_config_file(Config::default(), parsed))
}

fn apply_config_file(mut config: Config, parsed: ConfigFile) -> Config {
    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "print" {
            config.theme = Theme::print();
        } else if theme_name == "default" || theme_name == "light" {
            config.theme = Theme::default_light();
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.bloodline_color {
            config.theme.bloodline_fill = v;
        }
        if let Some(v) = vars.outsider_color {
            config.theme.outsider_fill = v;
        }
        if let Some(v) = vars.member_border_color {
            config.theme.member_border_color = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.member_text_color = v;
        }
        if let Some(v) = vars.male_glyph_color {
            config.theme.male_glyph_color = v;
        }
        if let Some(v) = vars.female_glyph_color {
            config.theme.female_glyph_color = v;
        }
        if let Some(v) = vars.unit_color {
            config.theme.unit_fill = v;
        }
        if let Some(v) = vars.line_color {
            config.theme.line_color = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v.clone();
            config.render.background = v;
        }
    }

    if let Some(vars) = parsed.layout {
        if let Some(v) = vars.member_width {
            config.layout.member_width = v;
        }
        if let Some(v) = vars.member_height {
            config.layout.member_height = v;
        }
        if let Some(v) = vars.unit_size {
            config.layout.unit_size = v;
        }
        if let Some(v) = vars.node_spacing {
            config.layout.node_spacing = v;
        }
        if let Some(v) = vars.rank_spacing {
            config.layout.rank_spacing = v;
        }
        if let Some(v) = vars.margin_x {
            config.layout.margin_x = v;
        }
        if let Some(v) = vars.margin_y {
            config.layout.margin_y = v;
        }
        if let Some(v) = vars.label_padding_x {
            config.layout.label_padding_x = v;
        }
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file() {
        let config = load_config(None).expect("default config");
        assert_eq!(config.layout.node_spacing, 50.0);
        assert_eq!(config.layout.rank_spacing, 100.0);
        assert_eq!(config.theme.bloodline_fill, "#F97316");
    }

    #[test]
    fn applies_theme_and_layout_overrides() {
        let parsed: ConfigFile = serde_json::from_str(
            r##"{
                "theme": "print",
                "themeVariables": {
                    "fontSize": 14,
                    "bloodlineColor": "#AA0000",
                    "background": "#000000"
                },
                "layout": { "rankSpacing": 140, "unitSize": 24 }
            }"##,
        )
        .expect("config parse");
        let config = apply_config_file(Config::default(), parsed);
        assert_eq!(config.theme.unit_fill, Theme::print().unit_fill);
        assert_eq!(config.theme.font_size, 14.0);
        assert_eq!(config.theme.bloodline_fill, "#AA0000");
        assert_eq!(config.render.background, "#000000");
        assert_eq!(config.layout.rank_spacing, 140.0);
        assert_eq!(config.layout.unit_size, 24.0);
    }

    #[test]
    fn unknown_theme_name_keeps_default() {
        let parsed: ConfigFile =
            serde_json::from_str(r#"{ "theme": "neon" }"#).expect("config parse");
        let config = apply_config_file(Config::default(), parsed);
        assert_eq!(config.theme.bloodline_fill, Theme::default_light().bloodline_fill);
    }
}
