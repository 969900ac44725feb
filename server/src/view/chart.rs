//! Horizontal bar chart of ranked contributions, as inline SVG

use parkinson_core::FeatureContribution;

use super::escape_html;

pub const CHART_TITLE: &str = "Top Features Influencing Prediction";

const WIDTH: f64 = 760.0;
const LABEL_WIDTH: f64 = 230.0;
const ROW_HEIGHT: f64 = 34.0;
const BAR_HEIGHT: f64 = 24.0;
const TOP: f64 = 44.0;
const BOTTOM: f64 = 40.0;
const RIGHT_PAD: f64 = 24.0;

// coolwarm anchors: cold end, neutral midpoint, warm end
const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
const NEUTRAL: (f64, f64, f64) = (221.0, 221.0, 221.0);
const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

/// Diverging cool-warm color for `t` in [-1, 1]
pub fn coolwarm(t: f64) -> String {
    let t = if t.is_finite() { t.clamp(-1.0, 1.0) } else { 0.0 };
    let (from, to, k) = if t < 0.0 {
        (NEUTRAL, COOL, -t)
    } else {
        (NEUTRAL, WARM, t)
    };
    let mix = |a: f64, b: f64| (a + (b - a) * k).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        mix(from.0, to.0),
        mix(from.1, to.1),
        mix(from.2, to.2)
    )
}

/// One bar per contribution, in the order given; zero axis in the middle
pub fn render_bar_chart(contributions: &[FeatureContribution]) -> String {
    let rows = contributions.len().max(1) as f64;
    let height = TOP + rows * ROW_HEIGHT + BOTTOM;
    let plot_width = WIDTH - LABEL_WIDTH - RIGHT_PAD;
    let zero_x = LABEL_WIDTH + plot_width / 2.0;
    let half = plot_width / 2.0;

    let max_abs = contributions
        .iter()
        .map(|c| c.contribution.abs())
        .fold(0.0_f64, f64::max);
    let scale = if max_abs > 0.0 { max_abs } else { 1.0 };

    let mut svg = format!(
        r#"<svg class="chart" xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="img" aria-label="{title}">
<text x="{cx}" y="24" text-anchor="middle" font-size="18" font-weight="600">{title}</text>
"#,
        w = WIDTH,
        h = height,
        cx = WIDTH / 2.0,
        title = CHART_TITLE,
    );

    for (row, c) in contributions.iter().enumerate() {
        let y = TOP + row as f64 * ROW_HEIGHT;
        let ratio = c.contribution / scale;
        let length = ratio.abs() * half;
        let x = if ratio < 0.0 { zero_x - length } else { zero_x };

        svg.push_str(&format!(
            r#"<text x="{lx}" y="{ty}" text-anchor="end" font-size="14">{name}</text>
<rect x="{x:.1}" y="{y:.1}" width="{len:.1}" height="{bh}" fill="{fill}"><title>{name}: {value:+.4}</title></rect>
"#,
            lx = LABEL_WIDTH - 10.0,
            ty = y + BAR_HEIGHT / 2.0 + 5.0,
            name = escape_html(&c.name),
            x = x,
            y = y,
            len = length,
            bh = BAR_HEIGHT,
            fill = coolwarm(ratio),
            value = c.contribution,
        ));
    }

    let axis_bottom = TOP + rows * ROW_HEIGHT;
    svg.push_str(&format!(
        r##"<line x1="{zx}" y1="{top}" x2="{zx}" y2="{bottom}" stroke="#555" stroke-width="1"/>
<text x="{lx}" y="{ty}" text-anchor="start" font-size="12">{neg:+.3}</text>
<text x="{zx}" y="{ty}" text-anchor="middle" font-size="12">0</text>
<text x="{rx}" y="{ty}" text-anchor="end" font-size="12">{pos:+.3}</text>
<text x="{zx}" y="{xl}" text-anchor="middle" font-size="13">Contribution</text>
</svg>"##,
        zx = zero_x,
        top = TOP - 4.0,
        bottom = axis_bottom,
        lx = LABEL_WIDTH,
        rx = WIDTH - RIGHT_PAD,
        ty = axis_bottom + 16.0,
        xl = axis_bottom + 34.0,
        neg = -scale,
        pos = scale,
    ));

    svg
}
