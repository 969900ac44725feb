//! Input controls: one slider or select per feature, in layout order

use parkinson_core::features::{FeatureDomain, FeatureSpec, FEATURE_SPECS};
use parkinson_core::FeatureRecord;

use super::escape_html;

/// The detection form, pre-filled from `record`
pub fn render_form(record: &FeatureRecord) -> String {
    let controls: String = FEATURE_SPECS
        .iter()
        .zip(record.as_slice())
        .map(|(spec, &value)| render_control(spec, value))
        .collect();

    format!(
        r#"<form method="post" action="/detect" class="patient-form">
    <h2>🧾 Enter Patient Information</h2>
{}
    <button type="submit" class="detect-btn">Detect</button>
</form>"#,
        controls
    )
}

fn render_control(spec: &FeatureSpec, value: f64) -> String {
    let input = match spec.domain {
        FeatureDomain::Range { min, max } => format!(
            r#"<input type="range" id="{name}" name="{name}" min="{min}" max="{max}" step="1" value="{value}" oninput="this.nextElementSibling.value = this.value">
        <output for="{name}">{value}</output>"#,
            name = spec.name,
            min = min,
            max = max,
            value = value,
        ),
        FeatureDomain::Choice { labels } => {
            let options: String = labels
                .iter()
                .enumerate()
                .map(|(code, label)| {
                    let selected = if value == code as f64 { " selected" } else { "" };
                    format!(
                        r#"<option value="{}"{}>{}</option>"#,
                        code,
                        selected,
                        escape_html(label)
                    )
                })
                .collect();
            format!(r#"<select id="{}" name="{}">{}</select>"#, spec.name, spec.name, options)
        }
    };

    format!(
        r#"    <div class="control">
        <h4><label for="{}">{}</label></h4>
        {}
    </div>
"#,
        spec.name,
        escape_html(spec.label),
        input
    )
}
