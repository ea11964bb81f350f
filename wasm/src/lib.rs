use famtree::{Direction, RenderOptions, parse_tree, render_with_options};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FamilyRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    font_size: Option<f32>,
    direction: Option<String>,
}

fn build_render_options(options: FamilyRenderOptions) -> RenderOptions {
    let mut render_options = if options.theme.as_deref() == Some("print") {
        RenderOptions::print()
    } else {
        RenderOptions::default_light()
    };

    if let Some(font_family) = options.font_family {
        render_options.theme.font_family = font_family;
    }
    if let Some(font_size) = options.font_size {
        render_options.theme.font_size = font_size;
    }
    if let Some(direction) = options.direction.as_deref() {
        render_options.direction = Direction::from_token(direction);
    }

    render_options
}

/// Renders a family dataset document (JSON) to an SVG string. The host page
/// owns panning/zooming of the returned markup.
#[wasm_bindgen]
pub fn render_family_svg(dataset_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<FamilyRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        FamilyRenderOptions::default()
    };

    let tree = parse_tree(dataset_json).map_err(|error| JsValue::from_str(&error.to_string()))?;
    let render_options = build_render_options(options);
    render_with_options(&tree, &render_options)
        .map_err(|error| JsValue::from_str(&error.to_string()))
}
