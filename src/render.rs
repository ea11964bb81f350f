use crate::family::Gender;
use crate::graph::NodeKind;
use crate::layout::{EdgeLayout, Layout, NodeLayout};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

pub fn render_svg(layout: &Layout, theme: &Theme) -> String {
    let mut svg = String::new();
    let width = layout.width.max(200.0);
    let height = layout.height.max(200.0);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));

    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    for edge in &layout.edges {
        let d = edge_path(edge, layout);
        svg.push_str(&format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1.6\"/>",
            d, theme.line_color
        ));
    }

    for node in layout.nodes.values() {
        match &node.kind {
            NodeKind::Member(member) => {
                svg.push_str(&member_pill(node, member.is_bloodline, theme));
                svg.push_str(&member_label(node, &member.name, member.gender, theme));
            }
            NodeKind::FamilyUnit { .. } => {
                let cx = node.x + node.width / 2.0;
                let cy = node.y + node.height / 2.0;
                svg.push_str(&format!(
                    "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{:.2}\" fill=\"{}\"/>",
                    node.width / 2.0,
                    theme.unit_fill
                ));
            }
        }
    }

    svg.push_str("</svg>");
    svg
}

fn member_pill(node: &NodeLayout, is_bloodline: bool, theme: &Theme) -> String {
    let fill = if is_bloodline {
        &theme.bloodline_fill
    } else {
        &theme.outsider_fill
    };
    format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{:.2}\" ry=\"{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"2\"/>",
        node.x,
        node.y,
        node.width,
        node.height,
        node.height / 2.0,
        node.height / 2.0,
        fill,
        theme.member_border_color
    )
}

fn member_label(node: &NodeLayout, name: &str, gender: Gender, theme: &Theme) -> String {
    let center_x = node.x + node.width / 2.0;
    let center_y = node.y + node.height / 2.0;
    let glyph_color = match gender {
        Gender::Male => &theme.male_glyph_color,
        Gender::Female => &theme.female_glyph_color,
    };
    format!(
        "<text x=\"{center_x:.2}\" y=\"{center_y:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" font-weight=\"600\" fill=\"{}\">{} <tspan fill=\"{}\">{}</tspan></text>",
        escape_xml(&theme.font_family),
        theme.font_size,
        theme.member_text_color,
        escape_xml(name),
        glyph_color,
        gender.glyph()
    )
}

/// Edge path between the stored anchor points: a cubic with control points
/// pushed along the layout axis, so converging parent edges read as one fan.
fn edge_path(edge: &EdgeLayout, layout: &Layout) -> String {
    let [start, end] = match edge.points.as_slice() {
        [start, end] => [*start, *end],
        _ => return points_to_path(&edge.points),
    };
    let (x1, y1) = start;
    let (x2, y2) = end;
    if layout.direction.is_horizontal() {
        let bend = (x2 - x1) / 2.0;
        format!(
            "M {x1:.2} {y1:.2} C {:.2} {y1:.2}, {:.2} {y2:.2}, {x2:.2} {y2:.2}",
            x1 + bend,
            x2 - bend
        )
    } else {
        let bend = (y2 - y1) / 2.0;
        format!(
            "M {x1:.2} {y1:.2} C {x1:.2} {:.2}, {x2:.2} {:.2}, {x2:.2} {y2:.2}",
            y1 + bend,
            y2 - bend
        )
    }
}

fn points_to_path(points: &[(f32, f32)]) -> String {
    if points.is_empty() {
        return String::new();
    }
    let mut d = String::new();
    d.push_str(&format!("M {:.2} {:.2}", points[0].0, points[0].1));
    for point in points.iter().skip(1) {
        d.push_str(&format!(" L {:.2} {:.2}", point.0, point.1));
    }
    d
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(
    svg: &str,
    output: &Path,
    render_cfg: &crate::config::RenderConfig,
) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Inter".to_string();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .unwrap_or(usvg::Size::from_wh(800.0, 600.0).unwrap());

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
