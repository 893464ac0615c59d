//! "Did you mean?" suggestions.
//!
//! Proposes the closest known name for a misspelled identifier or
//! property using Levenshtein edit distance.

/// Maximum edit distance accepted for a suggestion.
pub const SUGGESTION_THRESHOLD: usize = 2;

/// Levenshtein edit distance between two strings, counted in characters.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let b_len = b_chars.len();
    if a.is_empty() {
        return b_len;
    }
    if b_len == 0 {
        return a.chars().count();
    }

    let mut prev_row: Vec<usize> = (0..=b_len).collect();
    let mut curr_row: Vec<usize> = vec![0; b_len + 1];

    for (i, a_char) in a.chars().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != *b_char);
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_len]
}

/// Closest candidate within [`SUGGESTION_THRESHOLD`] edits.
///
/// Empty candidates are ignored. On ties the first candidate seen wins.
pub fn suggest_nearest<'a, I>(name: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, usize)> = None;
    for candidate in candidates {
        if candidate.is_empty() {
            continue;
        }
        let distance = edit_distance(name, candidate);
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((candidate, distance));
        }
    }
    best.filter(|&(_, d)| d <= SUGGESTION_THRESHOLD)
        .map(|(candidate, _)| candidate)
}

/// Suggestion text for a near miss.
pub fn did_you_mean(candidate: &str) -> String {
    format!("Did you mean '{candidate}'?")
}
