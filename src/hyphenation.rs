//! Enumerates the line-break alternatives of a label. Break opportunities
//! sit after spaces, explicit hyphens and `~`-marked hyphenation points
//! supplied by the network document.

use std::collections::HashMap;

use tracing::warn;

/// Break opportunities beyond this are not enumerated; the unbroken text is
/// returned instead of 2^n candidates.
const MAX_BREAK_POINTS: usize = 12;

/// Every shallow line-breaking of `text`, unbroken form first.
pub fn hyphenations(text: &str, hyphenation_map: Option<&HashMap<String, String>>) -> Vec<String> {
    let marked = apply_hyphenations(text, hyphenation_map);
    let parts = split_after_breaks(&marked);
    if parts.len() > MAX_BREAK_POINTS + 1 {
        warn!(text, "label has too many break points; not enumerating wrappings");
        return vec![join_parts(&parts, 0)];
    }
    shallow_hyphenations(&parts)
}

/// Like [`hyphenations`] but without the unbroken form.
pub fn hyphenation_alternatives(
    text: &str,
    hyphenation_map: Option<&HashMap<String, String>>,
) -> Vec<String> {
    let mut all = hyphenations(text, hyphenation_map);
    if !all.is_empty() {
        all.remove(0);
    }
    all
}

/// Rewrites words (and `-`-separated word parts) to their `~`-marked forms.
fn apply_hyphenations(text: &str, hyphenation_map: Option<&HashMap<String, String>>) -> String {
    let Some(map) = hyphenation_map else {
        return text.to_string();
    };
    text.split(' ')
        .map(|word| match map.get(word) {
            Some(marked) => marked.clone(),
            None => word
                .split('-')
                .map(|part| map.get(part).cloned().unwrap_or_else(|| part.to_string()))
                .collect::<Vec<_>>()
                .join("-"),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits after every `~`, `-` and space, keeping the separators attached
/// to the preceding part.
fn split_after_breaks(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    for ch in text.chars() {
        current.push(ch);
        if ch == '~' || ch == '-' || ch == ' ' {
            parts.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        parts.push(current);
    }
    if parts.is_empty() {
        parts.push(String::new());
    }
    parts
}

/// All 2^(n-1) subsets of the break points. Bit `j` of the subset index
/// breaks after part `j`: a trailing `~` becomes `-`, trailing spaces are
/// dropped; an untaken `~` disappears.
fn shallow_hyphenations(parts: &[String]) -> Vec<String> {
    let count = 1usize << (parts.len() - 1);
    (0..count).map(|subset| join_parts(parts, subset)).collect()
}

fn join_parts(parts: &[String], subset: usize) -> String {
    let mut result = String::new();
    for (index, part) in parts.iter().enumerate() {
        if subset >> index & 1 == 1 {
            let broken = part
                .strip_suffix('~')
                .map(|stem| format!("{stem}-"))
                .unwrap_or_else(|| part.trim_end_matches(' ').to_string());
            result.push_str(&broken);
            result.push('\n');
        } else {
            result.push_str(part.strip_suffix('~').unwrap_or(part));
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn space_is_a_break_opportunity() {
        let all = hyphenations("Kings Cross", None);
        assert_eq!(all, vec!["Kings Cross", "Kings\nCross"]);
    }

    #[test]
    fn unbroken_form_comes_first() {
        let alternatives = hyphenation_alternatives("Kings Cross", None);
        assert_eq!(alternatives, vec!["Kings\nCross"]);
    }

    #[test]
    fn marked_words_break_with_a_hyphen() {
        let hyphenation = map(&[("Crossroads", "Cross~roads")]);
        let all = hyphenations("Crossroads", Some(&hyphenation));
        assert_eq!(all, vec!["Crossroads", "Cross-\nroads"]);
    }

    #[test]
    fn compound_word_parts_are_looked_up() {
        let hyphenation = map(&[("roads", "ro~ads")]);
        let all = hyphenations("Cross-roads", Some(&hyphenation));
        assert_eq!(
            all,
            vec![
                "Cross-roads",
                "Cross-\nroads",
                "Cross-ro-\nads",
                "Cross-\nro-\nads",
            ]
        );
    }

    #[test]
    fn break_points_combine() {
        let hyphenation = map(&[("Eastfield", "East~field")]);
        let all = hyphenations("North Eastfield", Some(&hyphenation));
        assert_eq!(
            all,
            vec![
                "North Eastfield",
                "North\nEastfield",
                "North East-\nfield",
                "North\nEast-\nfield",
            ]
        );
    }

    #[test]
    fn pathological_labels_fall_back_to_the_unbroken_text() {
        let text = "a b c d e f g h i j k l m n o p";
        let all = hyphenations(text, None);
        assert_eq!(all, vec![text.to_string()]);
    }
}
