//! Results panel: entered features, diagnosis, confidence, contributions

use parkinson_core::features::FEATURE_SPECS;
use parkinson_core::{Detection, FeatureContribution, FeatureRecord};

use super::chart::render_bar_chart;
use super::escape_html;
use crate::models::diagnosis_text;

pub fn render_results(detection: &Detection, top: usize) -> String {
    let ranked = detection.explanation.top(top);

    format!(
        r#"<section class="results">
{}
{}
{}
</section>"#,
        render_entered(&detection.record),
        render_diagnosis(detection),
        render_contributions(ranked),
    )
}

fn render_entered(record: &FeatureRecord) -> String {
    let rows: String = FEATURE_SPECS
        .iter()
        .zip(record.as_slice())
        .map(|(spec, &value)| {
            format!(
                "    <p><strong>{}:</strong> {}</p>\n",
                escape_html(spec.display),
                escape_html(&spec.domain.format_value(value))
            )
        })
        .collect();

    format!(
        r#"<div class="entered">
    <h2>🧾 Entered Patient Features</h2>
{}</div>"#,
        rows
    )
}

fn render_diagnosis(detection: &Detection) -> String {
    let positive = detection.prediction.is_positive();
    let (class, icon) = if positive {
        ("positive", "✅")
    } else {
        ("negative", "❎")
    };

    format!(
        r#"<h2>🩺 Prediction Result</h2>
<div class="diagnosis {}">
    <h3>{} Diagnosis: <strong>{}</strong></h3>
</div>
<div class="confidence">
    <h4>Prediction Confidence:</h4>
    <p>{:.2}</p>
</div>"#,
        class,
        icon,
        escape_html(diagnosis_text(positive)),
        detection.prediction.probability
    )
}

fn render_contributions(ranked: &[FeatureContribution]) -> String {
    let rows: String = ranked
        .iter()
        .map(|c| {
            let class = if c.is_toward_diagnosis() { "toward" } else { "against" };
            format!(
                r#"        <tr><td>{}</td><td><span class="{}">{:.2}%</span></td></tr>
"#,
                escape_html(&c.name),
                class,
                c.percent()
            )
        })
        .collect();

    format!(
        r#"<h2>🔍 Top Feature Contributions (SHAP)</h2>
<table class="shap-table">
    <thead><tr><th>Feature</th><th>Contribution (%)</th></tr></thead>
    <tbody>
{}    </tbody>
</table>
<div class="legend">
    <strong class="toward">Red</strong>: Feature is contributing <em>toward</em> a Parkinson&#39;s diagnosis<br>
    <strong class="against">Blue</strong>: Feature is contributing <em>against</em> a Parkinson&#39;s diagnosis
</div>
<div class="chart">
{}
</div>"#,
        rows,
        render_bar_chart(ranked)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use parkinson_core::{ExplainResult, Prediction};

    fn contribution(name: &str, index: usize, value: f64) -> FeatureContribution {
        FeatureContribution {
            name: name.to_string(),
            index,
            value: 0.0,
            contribution: value,
        }
    }

    fn detection(label: u8, probability: f64) -> Detection {
        Detection {
            record: FeatureRecord::defaults(),
            prediction: Prediction { label, probability },
            explanation: ExplainResult {
                contributions: vec![
                    contribution("UPDRS", 4, -0.0771),
                    contribution("MoCA", 5, 0.0724),
                    contribution("Age", 0, 0.0),
                ],
                base_value: 0.4128,
                output_value: 0.4081,
            },
        }
    }

    #[test]
    fn test_negative_result() {
        let html = render_results(&detection(0, 0.3317), 10);
        assert!(html.contains("Negative for Parkinson&#39;s Disease"));
        assert!(html.contains(r#"class="diagnosis negative""#));
        assert!(html.contains("<p>0.33</p>"));
    }

    #[test]
    fn test_positive_result() {
        let html = render_results(&detection(1, 0.798), 10);
        assert!(html.contains(r#"class="diagnosis positive""#));
        assert!(html.contains("Positive for Parkinson&#39;s Disease"));
        assert!(html.contains("<p>0.80</p>"));
    }

    #[test]
    fn test_contribution_rows_formatted_and_colored() {
        let html = render_results(&detection(0, 0.3317), 10);
        assert!(html.contains(r#"<td>UPDRS</td><td><span class="against">-7.71%</span></td>"#));
        assert!(html.contains(r#"<td>MoCA</td><td><span class="toward">7.24%</span></td>"#));
        // zero counts as toward
        assert!(html.contains(r#"<td>Age</td><td><span class="toward">0.00%</span></td>"#));
    }

    #[test]
    fn test_top_limits_rows() {
        let html = render_results(&detection(0, 0.3317), 2);
        assert_eq!(html.matches("<tr><td>").count(), 2);
        assert_eq!(html.matches("<rect").count(), 2);
    }

    #[test]
    fn test_entered_features_use_choice_labels() {
        let html = render_results(&detection(0, 0.3317), 10);
        assert!(html.contains("<p><strong>Gender:</strong> Male</p>"));
        assert!(html.contains("<p><strong>Tremor:</strong> No</p>"));
        assert!(html.contains("<p><strong>UPDRS:</strong> 50</p>"));
    }
}
