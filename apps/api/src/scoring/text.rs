//! Word-bounded term matching shared by every scorer.
//!
//! Haystacks are lowercased once by the caller. Table terms keep their
//! display casing and are lowercased here.

/// True if `term` occurs in `haystack` with no alphanumeric character directly
/// before or after it. "java" does not match "javascript"; "c++" matches "c++,".
pub fn contains_term(haystack: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    haystack.match_indices(term).any(|(start, matched)| {
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[start + matched.len()..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        before_ok && after_ok
    })
}

/// True if any term in `terms` is present (see [`contains_term`]).
pub fn contains_any<S: AsRef<str>>(haystack: &str, terms: &[S]) -> bool {
    terms
        .iter()
        .any(|t| contains_term(haystack, &t.as_ref().to_lowercase()))
}

/// Terms present in `haystack`, in table order, with their table casing.
/// Entries differing only in case are reported once.
pub fn find_terms<S: AsRef<str>>(haystack: &str, terms: &[S]) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for term in terms {
        let term = term.as_ref();
        let duplicate = found.iter().any(|f| f.eq_ignore_ascii_case(term));
        if !duplicate && contains_term(haystack, &term.to_lowercase()) {
            found.push(term.to_string());
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_boundaries_respected() {
        assert!(!contains_term("javascript and typescript", "java"));
        assert!(contains_term("java, javascript", "java"));
        assert!(!contains_term("i submitted the form", "mit"));
        assert!(contains_term("graduated from mit in 2015", "mit"));
    }

    #[test]
    fn test_symbolic_terms() {
        assert!(contains_term("c++, rust and node.js", "c++"));
        assert!(contains_term("c++, rust and node.js", "node.js"));
        assert!(!contains_term("objective-c++x", "c++"));
    }

    #[test]
    fn test_multi_word_terms() {
        assert!(contains_term("built machine learning pipelines", "machine learning"));
        assert!(!contains_term("machinelearning", "machine learning"));
    }

    #[test]
    fn test_later_occurrence_can_match() {
        // first hit is inside "golang", second stands alone
        assert!(contains_term("golang then go", "go"));
    }

    #[test]
    fn test_find_terms_dedups_and_keeps_order() {
        let terms = ["rust", "Python", "Rust", "sql"];
        let found = find_terms("python and rust and sql", &terms);
        assert_eq!(found, vec!["rust", "Python", "sql"]);
    }

    #[test]
    fn test_empty_term_never_matches() {
        assert!(!contains_term("anything", ""));
    }
}
