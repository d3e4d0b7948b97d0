//! Display-filter evaluation.
//!
//! A filter is a whitespace-separated list of lowercase-folded terms matched
//! by substring containment against a display label. A `-` prefix negates a
//! term, and the literal token `||` marks an OR boundary. The grammar is
//! flat and evaluated left to right; there is no precedence.

/// Returns true when `label` passes `filter`.
///
/// An empty filter always passes. Without any `||` token every term must
/// hold (negated terms must be absent). With at least one `||` token the
/// terms are evaluated left to right with OR boundaries; the very first
/// term can never fail the whole expression on its own, so at least the
/// first two tokens are checked before a false is returned.
pub fn passes_filter(label: &str, filter: &str) -> bool {
    if filter.is_empty() {
        return true;
    }

    let label = label.to_lowercase();
    let filter = filter.to_lowercase();
    let terms: Vec<&str> = filter.split_whitespace().collect();

    if !terms.contains(&"||") {
        // Plain AND: bail on the first failing term.
        for term in &terms {
            match negated(term) {
                Some(negation) => {
                    if label.contains(negation) {
                        return false;
                    }
                }
                None => {
                    if !label.contains(term) {
                        return false;
                    }
                }
            }
        }
        true
    } else {
        let mut or_pending = false;
        let mut passed = false;

        for (i, term) in terms.iter().enumerate() {
            if *term == "||" {
                or_pending = true;
                continue;
            }

            // If the left side of the 'or' already passed, skip the right side.
            if or_pending && passed {
                or_pending = false;
                continue;
            }

            passed = match negated(term) {
                Some(negation) => !label.contains(negation),
                None => label.contains(term),
            };

            // A failing term ends the evaluation, except at position 0 of
            // the whole token list. Keep this guard as-is: downstream
            // behavior depends on the first token never failing alone.
            if !passed && i > 0 {
                return false;
            }

            or_pending = false;
        }
        true
    }
}

/// Returns the negated remainder of a term, if the term is a negation.
/// A lone `-` is an ordinary term.
fn negated(term: &str) -> Option<&str> {
    term.strip_prefix('-').filter(|rest| !rest.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_always_passes() {
        assert!(passes_filter("anything at all", ""));
        assert!(passes_filter("", ""));
    }

    #[test]
    fn test_single_term_containment() {
        assert!(passes_filter("apple pie", "apple"));
        assert!(!passes_filter("apple pie", "banana"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(passes_filter("Apple Pie", "apple"));
        assert!(passes_filter("apple pie", "APPLE"));
    }

    #[test]
    fn test_negated_term() {
        assert!(!passes_filter("apple pie", "-apple"));
        assert!(passes_filter("apple tart", "apple -pie"));
        assert!(!passes_filter("apple pie", "apple -pie"));
    }

    #[test]
    fn test_lone_dash_is_a_plain_term() {
        assert!(passes_filter("mod - Enabled", "-"));
        assert!(!passes_filter("nodash", "-"));
    }

    #[test]
    fn test_and_mode_all_terms_required() {
        assert!(passes_filter("apple pie crust", "apple crust"));
        assert!(!passes_filter("apple pie", "apple crust"));
    }

    #[test]
    fn test_or_mode_either_side() {
        assert!(passes_filter("only apple here", "banana || apple"));
        assert!(passes_filter("only banana here", "banana || apple"));
        assert!(!passes_filter("only pie here", "banana || apple"));
    }

    #[test]
    fn test_or_mode_short_circuits_right_side() {
        // Left side passes, right side would fail; the group is satisfied.
        assert!(passes_filter("apple", "apple || banana"));
    }

    #[test]
    fn test_or_mode_with_negation() {
        assert!(passes_filter("apple pie", "banana || -tart"));
        assert!(!passes_filter("apple tart", "banana || -tart"));
    }

    #[test]
    fn test_position_zero_guard() {
        // The first token fails but the second passes; in mixed mode the
        // first token alone never produces a false result.
        assert!(passes_filter("apple", "banana apple || pie"));
        // At position >0 a failing term still short-circuits, even when a
        // later OR group would have passed.
        assert!(!passes_filter("only apple here", "banana zebra || apple"));
    }

    #[test]
    fn test_whitespace_only_filter_passes() {
        assert!(passes_filter("whatever", "   "));
    }

    #[test]
    fn test_labels_with_state_suffix() {
        assert!(passes_filter("retex - Enabled", "enabled"));
        assert!(!passes_filter("retex - Enabled", "-enabled"));
        assert!(passes_filter("retex - Disabled", "disabled || enabled"));
    }
}
