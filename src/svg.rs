//! SVG preview of a computed border layout.
//!
//! Draws the compositing plan scaled into a single panel: outer fill, inner
//! fill, the image area, and each caption block with its text. Useful for
//! checking a layout without a host editor.
//!
//! # Example
//!
//! ```
//! use infoborder::{Arguments, BorderWidths, CaptionBlocks, Size};
//! use infoborder::svg::render_border_svg;
//!
//! let blocks = CaptionBlocks::uniform(Size::new(600, 30), Size::new(400, 20));
//! let layout = BorderWidths::new(4, 20).layout(4000, 3000, &blocks).unwrap();
//!
//! let svg = render_border_svg(&layout, &Arguments::default());
//! assert!(svg.contains("4048×3142"));
//! ```

use crate::args::Arguments;
use crate::border::BorderLayout;
use crate::caption::Justification;
use crate::compose::{CompositePlan, Content};
use crate::geometry::{Color, Rect};

/// Maximum pixel width of the preview panel.
const MAX_PANEL_W: f64 = 600.0;
/// Maximum pixel height of the preview panel.
const MAX_PANEL_H: f64 = 450.0;
/// Margin around the panel.
const MARGIN: f64 = 30.0;
/// Height of the label above the panel.
const LABEL_H: f64 = 22.0;

/// Render a complete SVG document previewing `layout` with the captions and
/// colors from `arguments`.
pub fn render_border_svg(layout: &BorderLayout, arguments: &Arguments) -> String {
    let plan = CompositePlan::new(layout, arguments.palette());

    let w = layout.canvas.width as f64;
    let h = layout.canvas.height as f64;
    let scale = (MAX_PANEL_W / w).min(MAX_PANEL_H / h);
    let (pw, ph) = (w * scale, h * scale);
    let total_w = pw + 2.0 * MARGIN;
    let total_h = ph + 2.0 * MARGIN + LABEL_H;

    let mut svg = String::with_capacity(4096);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {:.1} {:.1}">"#,
        total_w.ceil() as u32,
        total_h.ceil() as u32,
        total_w,
        total_h
    ));
    svg.push('\n');

    svg.push_str(
        r##"<style>
  .label { font-family: "DejaVu Sans Mono", monospace; font-size: 13px; font-weight: bold; fill: #333; }
  .image { fill: #1b2a3a; stroke: #6ba3d6; stroke-width: 1; stroke-dasharray: 4,2; }
  .image-label { font-family: "DejaVu Sans Mono", monospace; font-size: 11px; fill: #9cc3e6; }
  .block { fill: none; stroke: #d6a36b; stroke-width: 0.5; stroke-dasharray: 2,2; }
  .caption { font-family: sans-serif; }
  @media (prefers-color-scheme: dark) {
    .label { fill: #e0e0e0; }
  }
</style>
"##,
    );

    svg.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" class="label" text-anchor="middle">{}</text>"#,
        total_w / 2.0,
        MARGIN + 14.0,
        escape_xml(&format!(
            "Canvas {}×{}  (image {}×{}, borders {}+{})",
            layout.canvas.width,
            layout.canvas.height,
            layout.image.width,
            layout.image.height,
            layout.widths.inner,
            layout.widths.outer
        ))
    ));
    svg.push('\n');

    let ox = MARGIN;
    let oy = MARGIN + LABEL_H;
    let map = |r: &Rect| {
        (
            ox + r.x as f64 * scale,
            oy + r.y as f64 * scale,
            r.width as f64 * scale,
            r.height as f64 * scale,
        )
    };

    for step in plan.steps() {
        let (x, y, rw, rh) = map(&step.region);
        match step.content {
            Content::Fill(color) => {
                svg.push_str(&format!(
                    r#"<rect x="{x:.1}" y="{y:.1}" width="{rw:.1}" height="{rh:.1}" {}/>"#,
                    fill_attrs(color)
                ));
            }
            Content::Image => {
                svg.push_str(&format!(
                    r#"<rect x="{x:.1}" y="{y:.1}" width="{rw:.1}" height="{rh:.1}" class="image"/>"#
                ));
                svg.push('\n');
                svg.push_str(&format!(
                    r#"<text x="{:.1}" y="{:.1}" class="image-label" text-anchor="middle">{}</text>"#,
                    x + rw / 2.0,
                    y + rh / 2.0,
                    escape_xml(&format!("{}×{}", layout.image.width, layout.image.height))
                ));
            }
            Content::Caption { slot, color } => {
                svg.push_str(&format!(
                    r#"<rect x="{x:.1}" y="{y:.1}" width="{rw:.1}" height="{rh:.1}" class="block"/>"#
                ));
                svg.push('\n');
                let (tx, anchor) = match slot.justification() {
                    Justification::Left => (x, "start"),
                    Justification::Center => (x + rw / 2.0, "middle"),
                    Justification::Right => (x + rw, "end"),
                };
                // Baseline near the bottom of the block, glyphs about as tall as the block.
                svg.push_str(&format!(
                    r#"<text x="{tx:.1}" y="{:.1}" font-size="{:.1}" class="caption" text-anchor="{anchor}" {}>{}</text>"#,
                    y + rh * 0.8,
                    (rh * 0.8).max(1.0),
                    fill_attrs(color),
                    escape_xml(&arguments.caption(slot).text)
                ));
            }
        }
        svg.push('\n');
    }

    svg.push_str("</svg>\n");
    svg
}

/// `fill` plus `fill-opacity` when the color isn't opaque.
fn fill_attrs(color: Color) -> String {
    let rgb = Color { a: 255, ..color };
    if color.is_opaque() {
        format!(r#"fill="{rgb}""#)
    } else {
        format!(
            r#"fill="{rgb}" fill-opacity="{:.3}""#,
            color.a as f64 / 255.0
        )
    }
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::border::{BorderWidths, CaptionBlocks};
    use crate::caption::Slot;
    use crate::geometry::Size;

    fn layout() -> BorderLayout {
        BorderWidths::new(4, 20)
            .layout(
                4000,
                3000,
                &CaptionBlocks::uniform(Size::new(600, 30), Size::new(400, 20)),
            )
            .unwrap()
    }

    #[test]
    fn complete_document() {
        let svg = render_border_svg(&layout(), &Arguments::default());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>\n"));
        assert!(svg.contains("4048×3142"));
        assert!(svg.contains("4000×3000"));
    }

    #[test]
    fn fills_use_argument_colors() {
        let mut args = Arguments::default();
        args.border_color_inner = Color::rgb(0xaa, 0xbb, 0xcc);
        let svg = render_border_svg(&layout(), &args);
        assert!(svg.contains(r##"fill="#303030""##));
        assert!(svg.contains(r##"fill="#aabbcc""##));
    }

    #[test]
    fn translucent_fill_gets_opacity() {
        assert_eq!(
            fill_attrs(Color::rgba(255, 0, 0, 0)),
            r##"fill="#ff0000" fill-opacity="0.000""##
        );
    }

    #[test]
    fn captions_escaped_and_anchored() {
        let mut args = Arguments::default();
        args.caption_mut(Slot::M1).text = String::from("M42 <Orion> & friends");
        args.caption_mut(Slot::R2).text = String::from("2026-02-23");
        let svg = render_border_svg(&layout(), &args);
        assert!(svg.contains("M42 &lt;Orion&gt; &amp; friends"));
        assert!(!svg.contains("<Orion>"));
        assert!(svg.contains(r#"text-anchor="end""#));
        assert!(svg.contains(r#"text-anchor="start""#));
    }

    #[test]
    fn one_block_per_caption() {
        let svg = render_border_svg(&layout(), &Arguments::default());
        assert_eq!(svg.matches(r#"class="block""#).count(), 6);
        assert_eq!(svg.matches(r#"class="caption""#).count(), 6);
    }
}
