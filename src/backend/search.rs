// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Scopedeck-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scopedeck and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Name search used by the scope lists.
//!
//! Substring hits always outrank fuzzy hits. Matching is case-insensitive.

/// Indices of `names` matching `needle`, best first. Blank needles keep every
/// name in its original order.
pub fn rank<'a>(needle: &str, names: impl IntoIterator<Item = &'a str>) -> Vec<usize> {
    let needle = needle.trim().to_lowercase();
    let names = names.into_iter().collect::<Vec<_>>();
    if needle.is_empty() {
        return (0..names.len()).collect();
    }

    let mut scored = names
        .iter()
        .enumerate()
        .filter_map(|(idx, name)| {
            let haystack = name.to_lowercase();
            substring_score(&needle, &haystack)
                .or_else(|| fuzzy_score(&needle, &haystack))
                .map(|score| (score, idx))
        })
        .collect::<Vec<_>>();
    scored.sort_by(|(score_a, idx_a), (score_b, idx_b)| {
        score_b.cmp(score_a).then_with(|| idx_a.cmp(idx_b))
    });
    scored.into_iter().map(|(_, idx)| idx).collect()
}

/// Whether `needle` matches `name`. Blank needles match everything.
pub fn matches(needle: &str, name: &str) -> bool {
    !rank(needle, [name]).is_empty()
}

fn substring_score(needle: &str, haystack: &str) -> Option<i64> {
    let first = haystack.find(needle)?;
    let starts = first == 0;
    let start_boundary =
        starts || haystack[..first].chars().last().is_some_and(is_boundary_char);

    let mut score = 200_000i64.saturating_sub((first as i64) * 1000);
    score -= haystack.chars().count() as i64;
    if starts {
        score += 50_000;
    }
    if start_boundary {
        score += 20_000;
    }
    if haystack == needle {
        score += 100_000;
    }
    Some(score)
}

fn fuzzy_score(needle: &str, haystack: &str) -> Option<i64> {
    let (first, span) = subsequence_span(needle, haystack)?;
    let ratio = rapidfuzz::fuzz::ratio(needle.chars(), haystack.chars());
    Some((ratio * 1000.0).round() as i64 - span as i64 - (first as i64) / 4)
}

fn subsequence_span(needle: &str, haystack: &str) -> Option<(usize, usize)> {
    let mut wanted = needle.chars().peekable();
    let mut first = None;
    let mut last = 0;
    for (idx, ch) in haystack.chars().enumerate() {
        let Some(&want) = wanted.peek() else {
            break;
        };
        if ch == want {
            wanted.next();
            first.get_or_insert(idx);
            last = idx;
        }
    }
    if wanted.peek().is_some() {
        return None;
    }
    let first = first?;
    Some((first, last - first + 1))
}

fn is_boundary_char(ch: char) -> bool {
    matches!(ch, '/' | ':' | '-' | '_' | ' ' | '.')
}
