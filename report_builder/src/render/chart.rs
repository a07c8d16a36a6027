use super::escape_html;

const WIDTH: u32 = 560;
const HEIGHT: u32 = 200;
/// Horizontal space kept free for the label column and the value text
const RESERVED_WIDTH: u32 = 160;
const LABEL_X: u32 = 6;
const BAR_X: u32 = 120;
const MIN_BAR_HEIGHT: u32 = 12;
const BAR_FILL: &str = "#4F46E5";

/// One labelled bar
#[derive(Debug, Clone, Copy)]
pub(crate) struct Bar<'a> {
    pub label: &'a str,
    pub value: f64,
}

/// Render a horizontal bar chart as inline SVG.
///
/// Bar lengths are proportional to the largest value. Each bar is labelled with its (escaped)
/// label on the left and its value, to one decimal place and followed by `unit`, on the right.
pub(crate) fn bar_chart_svg(bars: &[Bar<'_>], unit: &str) -> String {
    if bars.is_empty() {
        return "<svg/>".to_string();
    }

    let max = bars
        .iter()
        .map(|bar| bar.value)
        .fold(f64::NEG_INFINITY, f64::max);
    let max = if max == 0.0 { 1.0 } else { max };

    let bar_height = MIN_BAR_HEIGHT.max((HEIGHT as f64 / (bars.len() as f64 * 1.5)) as u32);
    let gap = bar_height / 2;

    let mut svg = Vec::with_capacity(bars.len() * 3 + 2);
    svg.push(format!(
        r#"<svg width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
    ));

    let mut y = gap;
    for bar in bars {
        // Negative values next to positive ones would give a negative width
        let width = ((bar.value / max * (WIDTH - RESERVED_WIDTH) as f64) as i64).max(0);
        let text_y = y + bar_height - 4;
        svg.push(format!(
            r#"<text x="{LABEL_X}" y="{text_y}" font-size="12" font-family="system-ui">{}</text>"#,
            escape_html(bar.label)
        ));
        svg.push(format!(
            r#"<rect x="{BAR_X}" y="{y}" width="{width}" height="{bar_height}" fill="{BAR_FILL}" rx="4"></rect>"#
        ));
        svg.push(format!(
            r#"<text x="{}" y="{text_y}" font-size="12" font-family="system-ui">{:.1}{unit}</text>"#,
            BAR_X as i64 + width + 6,
            bar.value
        ));
        y += bar_height + gap;
    }
    svg.push("</svg>".to_string());

    svg.join("\n")
}
