use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::core::{ChartData, PointId};

use super::label_formatter::format_date_label;

static TEMPLATE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(?:label(?:\|date:(?P<format>[^}]*))?|dsd\.(?P<index>\d+))\}")
        .expect("Invalid regex")
});

/// Expands a tooltip template for one point.
///
/// `{label}` is the bucket's raw label, `{label|date:FMT}` the label
/// formatted as a date, and `{dsd.N}` the reading of dataset `N` at the same
/// bucket and sub-point (empty when absent). Other text is kept verbatim.
#[must_use]
pub fn render_tooltip_template(template: &str, data: &ChartData, point: PointId) -> String {
    TEMPLATE_TOKEN
        .replace_all(template, |caps: &Captures<'_>| {
            if let Some(index) = caps.name("index") {
                return index
                    .as_str()
                    .parse::<usize>()
                    .ok()
                    .and_then(|dataset| data.datasets.get(dataset))
                    .and_then(|dataset| dataset.data.get(point.bucket))
                    .and_then(|bucket| bucket.value(point.sub))
                    .map(|value| value.to_string())
                    .unwrap_or_default();
            }

            let Some(label) = data.labels.get(point.bucket) else {
                return String::new();
            };
            match caps.name("format") {
                Some(format) => format_date_label(&label.value, format.as_str())
                    .unwrap_or_else(|| label.value.clone()),
                None => label.value.clone(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::render_tooltip_template;
    use crate::core::{Bucket, ChartData, Dataset, Label, PointId};

    fn blood_pressure() -> ChartData {
        ChartData::new([Label::date("2021-03-08T09:00:00"), Label::raw("Tue")])
            .with_dataset(Dataset::new([Bucket::many([120.0, 118.0]), Bucket::One(131.0)]))
            .with_dataset(Dataset::new([Bucket::many([80.0, 79.0]), Bucket::Empty]))
    }

    #[test]
    fn expands_labels_and_sibling_readings() {
        let data = blood_pressure();
        let rendered = render_tooltip_template(
            "<b>{label|date:MMM D}</b> {dsd.0}/{dsd.1} mmHg",
            &data,
            PointId::new(0, 0, 1),
        );
        assert_eq!(rendered, "<b>Mar 8</b> 118/79 mmHg");
    }

    #[test]
    fn missing_readings_render_empty_and_unknown_text_stays() {
        let data = blood_pressure();
        let rendered =
            render_tooltip_template("{label} {dsd.1}|{dsd.7} {other}", &data, PointId::new(0, 1, 0));
        assert_eq!(rendered, "Tue | {other}");
    }
}
