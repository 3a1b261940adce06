use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::config::SourceConfig;
use crate::ir::{Axis, RiskItem, RiskSet};

// Accepts register exports that prefix the category with its ordinal,
// e.g. "4 - Likely", "3: Moderate", "2) Minor".
static ORDINAL_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([1-9][0-9]*)\s*(?:[-:.)]|$)").unwrap());

#[derive(Debug, Default)]
pub struct ParseOutput {
    pub set: RiskSet,
    /// Rows excluded because a rating was out of range or unparseable.
    pub dropped: usize,
}

/// Extract valid risk items from a JSON/JSON5 row source. Total over its
/// input: a malformed or non-tabular source yields an empty set, and rows
/// with invalid ratings are excluded row by row. Input row order is
/// preserved in the output.
pub fn parse_risk_rows(input: &str, source: &SourceConfig) -> ParseOutput {
    let Some(value) = parse_value(input) else {
        return ParseOutput::default();
    };

    let (rows, title) = match value {
        Value::Array(rows) => (rows, None),
        Value::Object(mut map) => {
            let title = map
                .get("title")
                .and_then(Value::as_str)
                .map(|s| s.to_string());
            let rows = map
                .remove("rows")
                .or_else(|| map.remove("items"))
                .and_then(|v| match v {
                    Value::Array(rows) => Some(rows),
                    _ => None,
                });
            match rows {
                Some(rows) => (rows, title),
                None => return ParseOutput::default(),
            }
        }
        _ => return ParseOutput::default(),
    };

    let mut output = ParseOutput {
        set: RiskSet {
            title,
            items: Vec::new(),
        },
        dropped: 0,
    };

    for (index, row) in rows.iter().enumerate() {
        let Some(fields) = row.as_object() else {
            output.dropped += 1;
            continue;
        };
        let consequence = fields
            .get(&source.consequence_field)
            .and_then(|v| normalize_rating(v, Axis::Consequence));
        let likelihood = fields
            .get(&source.likelihood_field)
            .and_then(|v| normalize_rating(v, Axis::Likelihood));
        let (Some(consequence), Some(likelihood)) = (consequence, likelihood) else {
            output.dropped += 1;
            continue;
        };

        let label = fields
            .get(&source.label_field)
            .map(value_to_text)
            .unwrap_or_default();
        let id = source
            .id_field
            .as_ref()
            .and_then(|field| fields.get(field))
            .map(value_to_text)
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| format!("row-{index}"));

        output.set.items.push(RiskItem {
            id,
            label,
            consequence,
            likelihood,
        });
    }

    output
}

fn parse_value(input: &str) -> Option<Value> {
    serde_json::from_str(input)
        .ok()
        .or_else(|| json5::from_str(input).ok())
}

/// Normalize one raw rating value into an ordinal 1..=5, or nothing.
/// Numbers are floored; strings match the axis category names
/// case-insensitively, then an ordinal prefix, then a plain numeric parse.
pub fn normalize_rating(value: &Value, axis: Axis) -> Option<u8> {
    match value {
        Value::Number(number) => number.as_f64().and_then(rating_from_f64),
        Value::String(text) => normalize_rating_text(text, axis),
        _ => None,
    }
}

fn normalize_rating_text(text: &str, axis: Axis) -> Option<u8> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    for (index, name) in axis.labels().iter().enumerate() {
        if trimmed.eq_ignore_ascii_case(name) {
            return Some(index as u8 + 1);
        }
    }
    if let Some(captures) = ORDINAL_PREFIX_RE.captures(trimmed)
        && let Ok(parsed) = captures[1].parse::<f64>()
    {
        return rating_from_f64(parsed);
    }
    trimmed.parse::<f64>().ok().and_then(rating_from_f64)
}

fn rating_from_f64(value: f64) -> Option<u8> {
    if !value.is_finite() {
        return None;
    }
    let floored = value.floor();
    if (1.0..=5.0).contains(&floored) {
        Some(floored as u8)
    } else {
        None
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceConfig;

    fn parse(input: &str) -> ParseOutput {
        parse_risk_rows(input, &SourceConfig::default())
    }

    #[test]
    fn numeric_and_named_ratings_normalize_identically() {
        assert_eq!(
            normalize_rating(&serde_json::json!(3), Axis::Consequence),
            Some(3)
        );
        assert_eq!(
            normalize_rating(&serde_json::json!("Moderate"), Axis::Consequence),
            Some(3)
        );
        assert_eq!(
            normalize_rating(&serde_json::json!("moderate"), Axis::Consequence),
            Some(3)
        );
        assert_eq!(
            normalize_rating(&serde_json::json!("almost certain"), Axis::Likelihood),
            Some(5)
        );
    }

    #[test]
    fn fractional_ratings_floor() {
        assert_eq!(
            normalize_rating(&serde_json::json!(3.9), Axis::Likelihood),
            Some(3)
        );
        assert_eq!(
            normalize_rating(&serde_json::json!("2.7"), Axis::Likelihood),
            Some(2)
        );
    }

    #[test]
    fn ordinal_prefixed_categories_parse() {
        assert_eq!(
            normalize_rating(&serde_json::json!("4 - Likely"), Axis::Likelihood),
            Some(4)
        );
        assert_eq!(
            normalize_rating(&serde_json::json!("2) Minor"), Axis::Consequence),
            Some(2)
        );
    }

    #[test]
    fn out_of_range_and_nonsense_are_rejected() {
        for bad in [
            serde_json::json!(0),
            serde_json::json!(6),
            serde_json::json!("nonsense"),
            serde_json::json!(null),
            serde_json::json!(true),
        ] {
            assert_eq!(normalize_rating(&bad, Axis::Consequence), None, "{bad}");
        }
    }

    #[test]
    fn category_names_bind_to_their_own_axis() {
        // "Moderate" is a consequence category, not a likelihood one
        assert_eq!(
            normalize_rating(&serde_json::json!("Moderate"), Axis::Likelihood),
            None
        );
    }

    #[test]
    fn invalid_rows_are_silently_excluded() {
        let output = parse(
            r#"[
                {"label": "a", "consequence": 3, "likelihood": 2},
                {"label": "b", "consequence": 0, "likelihood": 2},
                {"label": "c", "consequence": 3, "likelihood": "nonsense"},
                {"label": "d", "consequence": "Major", "likelihood": "Rare"}
            ]"#,
        );
        assert_eq!(output.set.items.len(), 2);
        assert_eq!(output.dropped, 2);
        assert_eq!(output.set.items[0].label, "a");
        assert_eq!(output.set.items[1].label, "d");
    }

    #[test]
    fn input_order_is_preserved() {
        let output = parse(
            r#"[
                {"label": "z", "consequence": 5, "likelihood": 5},
                {"label": "a", "consequence": 1, "likelihood": 1},
                {"label": "m", "consequence": 3, "likelihood": 3}
            ]"#,
        );
        let labels: Vec<&str> = output.set.items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, ["z", "a", "m"]);
    }

    #[test]
    fn malformed_source_degrades_to_no_data() {
        assert!(parse("not json at all").set.items.is_empty());
        assert!(parse("42").set.items.is_empty());
        assert!(parse(r#"{"noRows": true}"#).set.items.is_empty());
    }

    #[test]
    fn wrapped_rows_carry_title() {
        let output = parse(
            r#"{"title": "Q3 register", "rows": [
                {"label": "a", "consequence": 2, "likelihood": 2}
            ]}"#,
        );
        assert_eq!(output.set.title.as_deref(), Some("Q3 register"));
        assert_eq!(output.set.items.len(), 1);
    }

    #[test]
    fn json5_rows_parse() {
        let output = parse(
            r#"[
                // a comment
                {label: "a", consequence: 2, likelihood: 3},
            ]"#,
        );
        assert_eq!(output.set.items.len(), 1);
    }

    #[test]
    fn row_ids_default_to_ordinals() {
        let mut source = SourceConfig::default();
        let output = parse_risk_rows(
            r#"[{"label": "a", "consequence": 1, "likelihood": 1}]"#,
            &source,
        );
        assert_eq!(output.set.items[0].id, "row-0");

        source.id_field = Some("key".to_string());
        let output = parse_risk_rows(
            r#"[{"key": "R-17", "label": "a", "consequence": 1, "likelihood": 1}]"#,
            &source,
        );
        assert_eq!(output.set.items[0].id, "R-17");
    }
}
