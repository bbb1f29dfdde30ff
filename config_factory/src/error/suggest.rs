//! Ranking of field-name suggestions for unrecognized fields.

/// Orders `names` by case-insensitive edit distance to `base`.
///
/// The sort is stable, so equally distant names keep their input order.
pub(crate) fn rank_suggestions<'a, I>(base: &str, names: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let base_lower = base.to_lowercase();
    let mut ranked: Vec<(usize, &str)> = names
        .into_iter()
        .map(|name| (levenshtein(&base_lower, &name.to_lowercase()), name))
        .collect();
    ranked.sort_by_key(|(distance, _)| *distance);
    ranked.into_iter().map(|(_, name)| name).collect()
}

/// Levenshtein edit distance between two strings, counted in `char`s.
pub(crate) fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut prev_row: Vec<usize> = (0..=b_chars.len()).collect();

    for (i, a_char) in a.chars().enumerate() {
        let mut left = i + 1;
        let mut curr_row = Vec::with_capacity(prev_row.len());
        curr_row.push(left);
        for (b_char, window) in b_chars.iter().zip(prev_row.windows(2)) {
            let &[diagonal, above] = window else {
                continue;
            };
            let substitution = diagonal + usize::from(a_char != *b_char);
            left = substitution.min(above + 1).min(left + 1);
            curr_row.push(left);
        }
        prev_row = curr_row;
    }

    prev_row.last().copied().unwrap_or_default()
}
