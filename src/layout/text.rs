use crate::config::LayoutConfig;
use crate::text_metrics;
use crate::theme::Theme;

use super::TextBlock;

pub(super) fn measure_label(
    text: &str,
    font_size: f32,
    theme: &Theme,
    config: &LayoutConfig,
    wrap: bool,
) -> TextBlock {
    let avg_char = text_metrics::average_char_width(&theme.font_family, font_size)
        .unwrap_or(font_size * 0.56);
    let max_width_px = config.max_label_width_chars as f32 * avg_char;

    let mut lines = Vec::new();
    for raw in text.split('\n') {
        if wrap {
            wrap_line(raw, max_width_px, font_size, &theme.font_family, &mut lines);
        } else {
            lines.push(raw.to_string());
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }

    let width = lines
        .iter()
        .map(|line| line_width(line, font_size, &theme.font_family, avg_char))
        .fold(0.0, f32::max);
    let height = lines.len() as f32 * font_size * config.label_line_height;

    TextBlock {
        lines,
        width,
        height,
    }
}

fn line_width(line: &str, font_size: f32, font_family: &str, avg_char: f32) -> f32 {
    text_metrics::measure_text_width(line, font_size, font_family)
        .unwrap_or_else(|| line.chars().count() as f32 * avg_char)
}

// Greedy word wrap against a pixel budget. Single words longer than the
// budget stay intact rather than being hyphenated.
fn wrap_line(
    raw: &str,
    max_width_px: f32,
    font_size: f32,
    font_family: &str,
    out: &mut Vec<String>,
) {
    let words: Vec<&str> = raw.split_whitespace().collect();
    if words.is_empty() {
        out.push(String::new());
        return;
    }
    let mut current = String::new();
    for word in words {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        let width = text_metrics::measure_text_width(&candidate, font_size, font_family)
            .unwrap_or_else(|| candidate.chars().count() as f32 * font_size * 0.56);
        if width <= max_width_px || current.is_empty() {
            current = candidate;
        } else {
            out.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_measures_to_one_blank_line() {
        let theme = Theme::standard();
        let config = LayoutConfig::default();
        let block = measure_label("", theme.font_size, &theme, &config, true);
        assert_eq!(block.lines, vec![String::new()]);
        assert!(block.height > 0.0);
    }

    #[test]
    fn long_labels_wrap_to_multiple_lines() {
        let theme = Theme::standard();
        let config = LayoutConfig::default();
        let block = measure_label(
            "unplanned regional data center outage during peak trading hours",
            theme.font_size,
            &theme,
            &config,
            true,
        );
        assert!(block.lines.len() > 1);
    }

    #[test]
    fn explicit_newlines_are_respected() {
        let theme = Theme::standard();
        let config = LayoutConfig::default();
        let block = measure_label("one\ntwo", 12.0, &theme, &config, false);
        assert_eq!(block.lines.len(), 2);
    }
}
