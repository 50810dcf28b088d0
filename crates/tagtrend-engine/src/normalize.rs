//! Tag canonicalization and near-duplicate removal.

use crate::similarity::match_ratio;

/// Separator between tags in the raw `video_tags` cell.
pub const TAG_SEPARATOR: &str = ", ";

/// Lower-case a raw tag and strip apostrophes.
///
/// Idempotent: normalizing an already-normalized tag returns it unchanged.
#[must_use]
pub fn normalize_tag(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '\'' | '\u{2019}'))
        .collect::<String>()
        .to_lowercase()
}

/// Split a raw `video_tags` cell into its tags, dropping empty pieces.
pub fn split_tags(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(TAG_SEPARATOR).filter(|tag| !tag.is_empty())
}

/// Reduce `tags` to their canonical representatives.
///
/// Each tag is normalized and compared, in acceptance order, against the
/// representatives kept so far. If any of them has a [`match_ratio`] strictly
/// above `threshold` the tag is absorbed; otherwise it becomes a new
/// representative. Survivors keep their input order.
///
/// The relation is neither symmetric nor transitive, so the result depends on
/// input order: the first-seen tag of a cluster always wins.
#[must_use]
pub fn dedupe_tags<I, S>(tags: I, threshold: f64) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut canonical: Vec<String> = Vec::new();
    for raw in tags {
        let candidate = normalize_tag(raw.as_ref());
        let absorbed = canonical
            .iter()
            .any(|kept| match_ratio(&candidate, kept) > threshold);
        if !absorbed {
            canonical.push(candidate);
        }
    }
    canonical
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: f64 = 0.8;

    #[test]
    fn normalize_lowercases_and_strips_apostrophes() {
        assert_eq!(normalize_tag("Don't Stop"), "dont stop");
        assert_eq!(normalize_tag("Rock\u{2019}n\u{2019}Roll"), "rocknroll");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize_tag("MrBeast's CHALLENGE");
        assert_eq!(normalize_tag(&once), once);
    }

    #[test]
    fn split_uses_comma_space_and_skips_empty_pieces() {
        let tags: Vec<&str> = split_tags("Football, music,rock, ").collect();
        assert_eq!(tags, vec!["Football", "music,rock"]);
        assert_eq!(split_tags("").count(), 0);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let tags: Vec<&str> = Vec::new();
        assert!(dedupe_tags(tags, THRESHOLD).is_empty());
    }

    #[test]
    fn spelling_variants_collapse_to_first_seen() {
        let tags = [
            "Finesse2Tymes",
            "Finesse 2 Tymes",
            "Finesse 2Tymes",
            "Finesse2Times",
            "Finesse 2 Times",
            "Finesse 2Times",
        ];
        assert_eq!(dedupe_tags(tags, THRESHOLD), vec!["finesse2tymes"]);
    }

    #[test]
    fn case_variants_are_merged() {
        assert_eq!(
            dedupe_tags(["Football", "football", "FOOTBALL"], THRESHOLD),
            vec!["football"]
        );
    }

    #[test]
    fn dissimilar_tags_survive_in_input_order() {
        assert_eq!(
            dedupe_tags(["music", "football", "news"], THRESHOLD),
            vec!["music", "football", "news"]
        );
    }

    #[test]
    fn apostrophe_variants_are_merged() {
        assert_eq!(
            dedupe_tags(["Don't Stop", "dont stop"], THRESHOLD),
            vec!["dont stop"]
        );
    }

    #[test]
    fn zero_threshold_merges_anything_sharing_a_character() {
        assert_eq!(dedupe_tags(["abc", "cde", "xyz"], 0.0), vec!["abc", "xyz"]);
    }

    #[test]
    fn threshold_of_one_keeps_exact_duplicates() {
        assert_eq!(dedupe_tags(["Rock", "rock"], 1.0), vec!["rock", "rock"]);
    }
}
