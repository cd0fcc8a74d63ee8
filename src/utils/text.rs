/// Lowercased, trimmed form used for skill and location comparison.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Distinct lowercase words longer than `min_len`, in first-seen order.
/// Used to pull keywords out of free-form bio text.
pub fn keywords(text: &str, min_len: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for word in text.split(|c: char| !c.is_alphanumeric()) {
        if word.len() <= min_len {
            continue;
        }
        let lower = word.to_lowercase();
        if !out.contains(&lower) {
            out.push(lower);
        }
    }
    out
}

/// Case-insensitive containment in either direction; empty strings never match.
pub fn loose_match(a: &str, b: &str) -> bool {
    let a = normalize(a);
    let b = normalize(b);
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(&b) || b.contains(&a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_dedupes_and_filters_short_words() {
        let kw = keywords("I love Rust and rust and web development", 3);
        assert_eq!(kw, vec!["love", "rust", "development"]);
    }

    #[test]
    fn loose_match_is_case_insensitive_and_bidirectional() {
        assert!(loose_match("Belo Horizonte", "belo horizonte"));
        assert!(loose_match("Horizonte", "Belo Horizonte"));
        assert!(!loose_match("", "anything"));
    }
}
