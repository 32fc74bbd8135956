//! Server-side SVG rendering of a chart series, for clients without scripting.

use crate::domain::chart::ChartSeries;

const WIDTH: f64 = 500.0;
const HEIGHT: f64 = 200.0;
const PADDING: f64 = 40.0;

pub fn render_series_svg(series: &ChartSeries) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">"#,
        w = WIDTH,
        h = HEIGHT
    );
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="20" font-family="Lato, sans-serif" font-size="14">{}</text>"#,
        WIDTH * 0.05,
        escape(series.label)
    ));

    if series.is_empty() {
        svg.push_str(&format!(
            r##"<text x="{:.1}" y="{:.1}" text-anchor="middle" fill="#999">No data for this selection</text></svg>"##,
            WIDTH / 2.0,
            HEIGHT / 2.0
        ));
        return svg;
    }

    let min_y = series.y.iter().copied().fold(f64::INFINITY, f64::min);
    let max_y = series.y.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let plot_width = WIDTH - 2.0 * PADDING;
    let plot_height = HEIGHT - 2.0 * PADDING;

    let range = max_y - min_y;
    let scale_y = if range > 0.0 { plot_height / range } else { 1.0 };
    let scale_x = if series.y.len() > 1 {
        plot_width / (series.y.len() - 1) as f64
    } else {
        0.0
    };

    let coords: Vec<(f64, f64)> = series
        .y
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = PADDING + i as f64 * scale_x;
            let y = HEIGHT - PADDING - (v - min_y) * scale_y;
            (x, y)
        })
        .collect();

    // axes
    svg.push_str(&format!(
        r##"<line x1="{p:.1}" y1="{p:.1}" x2="{p:.1}" y2="{b:.1}" stroke="#ccc"/><line x1="{p:.1}" y1="{b:.1}" x2="{r:.1}" y2="{b:.1}" stroke="#ccc"/>"##,
        p = PADDING,
        b = HEIGHT - PADDING,
        r = WIDTH - PADDING
    ));

    let tick_prefix = series.tick_prefix.unwrap_or("");
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" text-anchor="end" font-size="10">{}{}</text>"#,
        PADDING - 4.0,
        PADDING,
        escape(tick_prefix),
        max_y
    ));
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" text-anchor="end" font-size="10">{}{}</text>"#,
        PADDING - 4.0,
        HEIGHT - PADDING,
        escape(tick_prefix),
        min_y
    ));

    let points: Vec<String> = coords.iter().map(|(x, y)| format!("{:.1},{:.1}", x, y)).collect();
    svg.push_str(&format!(
        r#"<polyline fill="none" stroke="{}" stroke-width="1.5" points="{}"/>"#,
        series.color,
        points.join(" ")
    ));

    for (((x, y), date), label) in coords.iter().zip(&series.x).zip(series.hover_labels()) {
        svg.push_str(&format!(
            r#"<circle cx="{:.1}" cy="{:.1}" r="2" fill="{}"><title>{}: {}</title></circle>"#,
            x,
            y,
            series.color,
            date,
            escape(&label)
        ));
    }

    svg.push_str("</svg>");
    svg
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
