use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub bloodline_fill: String,
    pub outsider_fill: String,
    pub member_border_color: String,
    pub member_text_color: String,
    pub male_glyph_color: String,
    pub female_glyph_color: String,
    pub unit_fill: String,
    pub line_color: String,
    pub background: String,
}

impl Theme {
    /// Default palette: orange pills for bloodline members, blue for
    /// married-in members, red marker circles for family units.
    pub fn default_light() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 16.0,
            bloodline_fill: "#F97316".to_string(),
            outsider_fill: "#3B82F6".to_string(),
            member_border_color: "#FFFFFF".to_string(),
            member_text_color: "#FFFFFF".to_string(),
            male_glyph_color: "#BFDBFE".to_string(),
            female_glyph_color: "#FBCFE8".to_string(),
            unit_fill: "#EF4444".to_string(),
            line_color: "#B1B1B7".to_string(),
            background: "#F9FAFB".to_string(),
        }
    }

    pub fn print() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 16.0,
            bloodline_fill: "#4B5563".to_string(),
            outsider_fill: "#9CA3AF".to_string(),
            member_border_color: "#FFFFFF".to_string(),
            member_text_color: "#FFFFFF".to_string(),
            male_glyph_color: "#E5E7EB".to_string(),
            female_glyph_color: "#E5E7EB".to_string(),
            unit_fill: "#111827".to_string(),
            line_color: "#6B7280".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }
}
