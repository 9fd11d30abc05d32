//! Unit-number canonicalization.
//!
//! Listing platforms and hosts write the same unit a dozen ways: `"Suite 4B"`,
//! `"#4B"`, `"UNIT 4-B"`, `"004B"`. Matching compares canonical forms only;
//! the normalized string is never stored.

/// Decorative tokens removed wherever they appear as whole words. Ordered
/// longest-first so multi-word entries win before their fragments.
const UNIT_KEYWORDS: &[&str] = &[
    "STRATA LOT",
    "APARTMENT",
    "BUILDING",
    "NUMBER",
    "CABIN",
    "FLOOR",
    "SUITE",
    "BLDG",
    "ROOM",
    "UNIT",
    "NBR",
    "NUM",
    "UNT",
    "APT",
    "FLR",
    "STE",
    "LOT",
    "FL",
    "NO",
    "RM",
    "SL",
];

/// Reduce a unit-number string to its canonical comparable form.
///
/// Applied in order: strip leading `#`/`-` runs, drop decorative keywords,
/// collapse hyphens/periods/whitespace, trim leading zero runs from each
/// token, uppercase. Pure and idempotent; odd input degrades to an empty or
/// merely uppercased string, never an error.
pub fn normalize_unit_number(raw: &str) -> String {
    let stripped = strip_leading_marks(raw);
    let without_keywords = strip_keywords(stripped);
    let compact = remove_separators(&without_keywords);
    strip_leading_zeros(&compact).to_uppercase()
}

fn strip_leading_marks(value: &str) -> &str {
    let rest = value.trim_start_matches(['#', '-']);
    if rest.len() == value.len() {
        value
    } else {
        rest.trim_start()
    }
}

/// Word characters in the boundary sense: keywords are only removed when not
/// embedded in a longer alphanumeric run, so `"Units"` keeps its `"Unit"`.
fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn strip_keywords(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let upper: Vec<char> = chars.iter().map(|c| c.to_ascii_uppercase()).collect();
    let mut keep = vec![true; chars.len()];

    for keyword in UNIT_KEYWORDS {
        let pattern: Vec<char> = keyword.chars().collect();
        if pattern.is_empty() || pattern.len() > chars.len() {
            continue;
        }

        let mut i = 0;
        while i + pattern.len() <= chars.len() {
            let end = i + pattern.len();
            let bounded = (i == 0 || !is_word(chars[i - 1]))
                && (end == chars.len() || !is_word(chars[end]));
            let available = keep[i..end].iter().all(|kept| *kept);
            if bounded && available && upper[i..end] == pattern[..] {
                for slot in &mut keep[i..end] {
                    *slot = false;
                }
                i = end;
            } else {
                i += 1;
            }
        }
    }

    chars
        .iter()
        .zip(&keep)
        .filter_map(|(c, kept)| kept.then_some(*c))
        .collect()
}

fn remove_separators(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '-' | '.') && !c.is_whitespace())
        .collect()
}

/// Trim a leading zero run at each token boundary. A run followed by further
/// word characters disappears entirely (`"007A"` -> `"7A"`); an all-zero
/// token collapses to a single `"0"`.
fn strip_leading_zeros(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let mut out = String::with_capacity(value.len());
    let mut at_boundary = true;
    let mut i = 0;

    while i < chars.len() {
        if at_boundary && chars[i] == '0' {
            let mut end = i;
            while end < chars.len() && chars[end] == '0' {
                end += 1;
            }
            if !(end < chars.len() && is_word(chars[end])) {
                out.push('0');
            }
            at_boundary = false;
            i = end;
            continue;
        }

        at_boundary = !is_word(chars[i]);
        out.push(chars[i]);
        i += 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_decorative_prefixes() {
        assert_eq!(normalize_unit_number("Suite 4B"), "4B");
        assert_eq!(normalize_unit_number("APT 3"), "3");
        assert_eq!(normalize_unit_number("Unit 12 - C"), "12C");
        assert_eq!(normalize_unit_number("Strata Lot 22"), "22");
        assert_eq!(normalize_unit_number("No. 9"), "9");
    }

    #[test]
    fn strips_leading_hash_and_dash_runs() {
        assert_eq!(normalize_unit_number("#007A"), "7A");
        assert_eq!(normalize_unit_number("##--12"), "12");
        assert_eq!(normalize_unit_number("- 4"), "4");
    }

    #[test]
    fn removes_keywords_anywhere_as_whole_words() {
        assert_eq!(normalize_unit_number("4 Unit"), "4");
        assert_eq!(normalize_unit_number("Bldg A Room 7"), "A7");
        // Embedded fragments survive: "Units" is not the keyword "Unit".
        assert_eq!(normalize_unit_number("Units 4"), "UNITS4");
    }

    #[test]
    fn collapses_separators_without_inserting_anything() {
        assert_eq!(normalize_unit_number("12 - C"), "12C");
        assert_eq!(normalize_unit_number("4.B"), "4B");
        assert_eq!(normalize_unit_number("  8  "), "8");
    }

    #[test]
    fn trims_leading_zero_runs_per_token() {
        assert_eq!(normalize_unit_number("007A"), "7A");
        assert_eq!(normalize_unit_number("0b"), "B");
        assert_eq!(normalize_unit_number("A007"), "A007");
        assert_eq!(normalize_unit_number("00"), "0");
        assert_eq!(normalize_unit_number("0"), "0");
    }

    #[test]
    fn degrades_gracefully_on_odd_input() {
        assert_eq!(normalize_unit_number(""), "");
        assert_eq!(normalize_unit_number("###"), "");
        assert_eq!(normalize_unit_number("Suite"), "");
        assert_eq!(normalize_unit_number("penthouse"), "PENTHOUSE");
    }

    #[test]
    fn normalization_is_idempotent() {
        let samples = [
            "Suite 4B",
            "#007A",
            "Unit 12 - C",
            "APT 3",
            "Strata Lot 0022",
            "No. 9",
            "",
            "penthouse west",
            "##--0A",
        ];
        for sample in samples {
            let once = normalize_unit_number(sample);
            assert_eq!(normalize_unit_number(&once), once, "input {sample:?}");
        }
    }

    #[test]
    fn equivalent_spellings_share_a_canonical_form() {
        let spellings = ["Suite 4B", "#4B", "Unit 4-B", "4B", "APT 004B", "4 B"];
        for spelling in spellings {
            assert_eq!(normalize_unit_number(spelling), "4B", "input {spelling:?}");
        }
    }
}
