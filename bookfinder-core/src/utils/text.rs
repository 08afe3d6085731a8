/// Trimmed query, or `None` when nothing but whitespace is left.
pub fn clean_query(query: &str) -> Option<&str> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

pub fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_query_trims_and_rejects_blank() {
        assert_eq!(clean_query("  dune \n"), Some("dune"));
        assert_eq!(clean_query("   "), None);
        assert_eq!(clean_query(""), None);
    }

    #[test]
    fn plural_picks_form() {
        assert_eq!(plural(1, "book", "books"), "1 book");
        assert_eq!(plural(0, "book", "books"), "0 books");
    }
}
