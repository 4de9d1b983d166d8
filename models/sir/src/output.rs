use crate::aggregate::AggregateResult;
use crate::scenario::ScenarioOutcome;

pub const CHART_HEADERS: [&str; 6] = [
    "series",
    "day",
    "susceptible",
    "infectious",
    "recovered",
    "fraction_infectious",
];

pub fn chart_filename(tag: &str) -> String {
    format!("{tag}_graph.csv")
}

/// Long-format chart table: the baseline series ("before") followed by the
/// variant series ("after") when there is one. Days are numbered from 1.
pub fn chart_rows(outcome: &ScenarioOutcome) -> Vec<Vec<String>> {
    let mut rows = series_rows("before", &outcome.baseline);
    if let Some(variant) = &outcome.variant {
        rows.extend(series_rows("after", variant));
    }
    rows
}

fn series_rows(series: &str, result: &AggregateResult) -> Vec<Vec<String>> {
    result
        .points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            vec![
                series.to_string(),
                (i + 1).to_string(),
                point.mean_susceptible.to_string(),
                point.mean_infectious.to_string(),
                point.mean_recovered.to_string(),
                point.fraction_infectious.to_string(),
            ]
        })
        .collect()
}
