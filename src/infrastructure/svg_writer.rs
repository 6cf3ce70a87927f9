// Serializer from the chart drawing descriptor to SVG markup
use crate::domain::axes::{Label, Line};
use crate::domain::chart::Drawing;
use crate::domain::style::StrokeStyle;
use std::fmt::Write;

const FONT_SIZE: u32 = 14;
const LEGEND_STROKE_WIDTH: f64 = 3.0;

pub fn drawing_to_svg(drawing: &Drawing) -> String {
    let theme = drawing.mode.theme();
    let mut svg = String::new();

    let _ = writeln!(
        svg,
        r#"<svg width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}" xmlns="http://www.w3.org/2000/svg">"#,
        w = drawing.width,
        h = drawing.height
    );
    let _ = writeln!(
        svg,
        r#"  <rect x="0" y="0" width="{:.0}" height="{:.0}" fill="{}"/>"#,
        drawing.background.width, drawing.background.height, drawing.background.fill
    );

    let axes = &drawing.axes;
    for grid in axes.horizontal.iter().chain(axes.vertical.iter()) {
        write_line(&mut svg, &grid.line, &theme.grid);
    }
    write_line(&mut svg, &axes.zero_line, &theme.zero_line);
    write_line(&mut svg, &axes.x_axis, &theme.axis);
    write_line(&mut svg, &axes.y_axis, &theme.axis);

    for grid in axes.horizontal.iter().chain(axes.vertical.iter()) {
        write_label(&mut svg, &grid.label, theme.label);
    }

    for series in &drawing.series {
        let _ = writeln!(
            svg,
            r#"  <path d="{}" fill="none"{} stroke-linecap="round" stroke-linejoin="round"/>"#,
            series.geometry.to_path_data(),
            stroke_attrs(&series.stroke, series.stroke.width())
        );
    }

    for item in &drawing.legend {
        let _ = writeln!(
            svg,
            r#"  <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}"{}/>"#,
            item.swatch.x1,
            item.swatch.y1,
            item.swatch.x2,
            item.swatch.y2,
            stroke_attrs(&item.stroke, LEGEND_STROKE_WIDTH)
        );
        write_label(&mut svg, &item.label, theme.legend_text);
    }

    svg.push_str("</svg>\n");
    svg
}

fn write_line(svg: &mut String, line: &Line, stroke: &StrokeStyle) {
    let _ = writeln!(
        svg,
        r#"  <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}"{}/>"#,
        line.x1,
        line.y1,
        line.x2,
        line.y2,
        stroke_attrs(stroke, stroke.width())
    );
}

fn write_label(svg: &mut String, label: &Label, fill: &str) {
    let _ = writeln!(
        svg,
        r#"  <text x="{:.1}" y="{:.1}" text-anchor="{}" font-size="{}" fill="{}">{}</text>"#,
        label.x,
        label.y,
        label.anchor.as_str(),
        FONT_SIZE,
        fill,
        escape_text(&label.text)
    );
}

fn stroke_attrs(stroke: &StrokeStyle, width: f64) -> String {
    let mut attrs = format!(r#" stroke="{}" stroke-width="{}""#, stroke.color, width);
    if let Some(dash) = stroke.dash_array {
        let _ = write!(attrs, r#" stroke-dasharray="{}""#, dash);
    }
    attrs
}

pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
