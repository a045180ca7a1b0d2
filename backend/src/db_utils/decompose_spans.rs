//! Helpers for decomposing text into highlighted spans.
//!
//! Matching is ASCII case-insensitive so byte offsets found in the lowercased
//! copy stay valid in the original text.

use common::text_highlight::HighlightTextSpan;

/// Bytes of context kept on each side of the first match in a snippet.
const SNIPPET_SURROUND: usize = 50;

/// Splits `text` into spans, highlighting every occurrence of any of `terms`.
/// `terms` are expected to be lowercase already.
pub fn decompose_text_into_spans(text: &str, terms: &[String]) -> Vec<HighlightTextSpan> {
    let mut spans = _do_decompose_text_into_spans(text, terms);
    let mut index = 0;
    for item in spans.iter_mut() {
        if item.is_highlighted {
            item.index = index;
            index += 1;
        }
    }
    spans
}

fn _do_decompose_text_into_spans(text: &str, terms: &[String]) -> Vec<HighlightTextSpan> {
    if text.is_empty() {
        return vec![];
    }
    let ranges = match_ranges(text, terms);
    if ranges.is_empty() {
        return vec![HighlightTextSpan { text: text.to_string(), is_highlighted: false, index: 0 }];
    }

    // Merges into the previous span when the highlight state is the same.
    let push_span = |spans: &mut Vec<HighlightTextSpan>, piece: &str, highlighted: bool| {
        if piece.is_empty() {
            return;
        }
        if let Some(last) = spans.last_mut() {
            if last.is_highlighted == highlighted {
                last.text.push_str(piece);
                return;
            }
        }
        spans.push(HighlightTextSpan { text: piece.to_string(), is_highlighted: highlighted, index: 0 });
    };

    let mut spans = Vec::new();
    let mut cursor = 0;
    for (start, end) in ranges {
        push_span(&mut spans, &text[cursor..start], false);
        push_span(&mut spans, &text[start..end], true);
        cursor = end;
    }
    push_span(&mut spans, &text[cursor..], false);
    spans
}

/// Sorted, non-overlapping byte ranges of all term occurrences.
fn match_ranges(text: &str, terms: &[String]) -> Vec<(usize, usize)> {
    let lower = text.to_ascii_lowercase();
    let mut ranges: Vec<(usize, usize)> = terms
        .iter()
        .filter(|term| !term.is_empty())
        .flat_map(|term| lower.match_indices(term.as_str()).map(|(start, found)| (start, start + found.len())))
        .collect();
    ranges.sort();

    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(ranges.len());
    for (start, end) in ranges {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}

/// Highlighted excerpt around the first match of any term, or `None` without a match.
pub fn snippet_spans(text: &str, terms: &[String]) -> Option<Vec<HighlightTextSpan>> {
    let (first_start, first_end) = match_ranges(text, terms).into_iter().next()?;
    let mut start = first_start.saturating_sub(SNIPPET_SURROUND);
    while !text.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = (first_end + SNIPPET_SURROUND).min(text.len());
    while !text.is_char_boundary(end) {
        end += 1;
    }
    let mut spans = decompose_text_into_spans(&text[start..end], terms);
    if start > 0 {
        prefix_plain(&mut spans, "…");
    }
    if end < text.len() {
        suffix_plain(&mut spans, "…");
    }
    Some(spans)
}

fn prefix_plain(spans: &mut Vec<HighlightTextSpan>, marker: &str) {
    match spans.first_mut() {
        Some(first) if !first.is_highlighted => first.text.insert_str(0, marker),
        _ => spans.insert(0, HighlightTextSpan { text: marker.to_string(), is_highlighted: false, index: 0 }),
    }
}

fn suffix_plain(spans: &mut Vec<HighlightTextSpan>, marker: &str) {
    match spans.last_mut() {
        Some(last) if !last.is_highlighted => last.text.push_str(marker),
        _ => spans.push(HighlightTextSpan { text: marker.to_string(), is_highlighted: false, index: 0 }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn render(spans: &[HighlightTextSpan]) -> String {
        spans
            .iter()
            .map(|span| if span.is_highlighted { format!("[{}]", span.text) } else { span.text.clone() })
            .collect()
    }

    #[test]
    fn highlights_case_insensitively_and_numbers_hits() {
        let spans = decompose_text_into_spans("Topic models of topics", &terms(&["topic"]));
        assert_eq!(render(&spans), "[Topic] models of [topic]s");
        let indices: Vec<u64> = spans.iter().filter(|s| s.is_highlighted).map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn overlapping_matches_merge() {
        let spans = decompose_text_into_spans("Dirichlet", &terms(&["dirich", "chlet"]));
        assert_eq!(render(&spans), "[Dirichlet]");
    }

    #[test]
    fn no_terms_gives_a_single_plain_span() {
        let spans = decompose_text_into_spans("Dynamic Topic Models", &[]);
        assert_eq!(spans.len(), 1);
        assert!(!spans[0].is_highlighted);
        assert!(decompose_text_into_spans("", &terms(&["x"])).is_empty());
    }

    #[test]
    fn snippet_is_cut_around_first_match() {
        let text = format!("{}needle{}", "a".repeat(80), "b".repeat(80));
        let spans = snippet_spans(&text, &terms(&["needle"])).unwrap();
        let rendered = render(&spans);
        assert_eq!(rendered, format!("…{}[needle]{}…", "a".repeat(50), "b".repeat(50)));
        assert_eq!(snippet_spans("nothing here", &terms(&["needle"])), None);
    }

    #[test]
    fn snippet_respects_char_boundaries() {
        let text = format!("{}needle", "é".repeat(40));
        let spans = snippet_spans(&text, &terms(&["needle"])).unwrap();
        assert!(render(&spans).ends_with("[needle]"));
    }
}
