//! Mapping of raw search records into [`Book`]s.
//!
//! Upstream records are untyped JSON; every field is read on its own and
//! anything missing, empty, zero or of the wrong type falls back to the
//! defaults below. Nothing here fails.

use crate::models::book::{Book, MAX_SUBJECTS, UNKNOWN_AUTHOR, UNKNOWN_TITLE};
use crate::utils::cover::{resolve_cover_url, CoverSize};
use serde_json::Value;

/// Upstream key of a record, if it has a usable one.
pub fn record_key(raw: &Value) -> Option<&str> {
    raw.get("key")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|key| !key.is_empty())
}

pub fn normalize(raw: &Value) -> Book {
    let title = non_empty_string(raw, "title").unwrap_or_else(|| UNKNOWN_TITLE.to_string());

    let mut authors = string_list(raw, "author_name");
    if authors.is_empty() {
        authors.push(UNKNOWN_AUTHOR.to_string());
    }

    let publish_year = non_zero_int(raw, "first_publish_year");
    let cover_id = raw
        .get("cover_i")
        .and_then(Value::as_u64)
        .filter(|id| *id != 0);

    let mut subjects = string_list(raw, "subject");
    subjects.truncate(MAX_SUBJECTS);

    let id = match record_key(raw) {
        Some(key) => key.to_string(),
        None => synthetic_id(&title, &authors, publish_year),
    };

    Book {
        id,
        title,
        authors,
        publish_year,
        cover_url: resolve_cover_url(cover_id, CoverSize::Medium),
        cover_url_large: resolve_cover_url(cover_id, CoverSize::Large),
        isbn: first_string(raw, "isbn"),
        publisher: first_string(raw, "publisher"),
        pages: non_zero_int(raw, "number_of_pages_median"),
        rating: rating(raw),
        subjects,
        language: first_string(raw, "language"),
    }
}

fn synthetic_id(title: &str, authors: &[String], year: Option<i64>) -> String {
    let year = year.map(|y| y.to_string()).unwrap_or_default();
    format!("unkeyed:{}|{}|{}", title, authors.join(";"), year)
}

fn non_empty_string(raw: &Value, field: &str) -> Option<String> {
    raw.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

fn string_list(raw: &Value, field: &str) -> Vec<String> {
    raw.get(field)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn first_string(raw: &Value, field: &str) -> Option<String> {
    raw.get(field)
        .and_then(Value::as_array)
        .and_then(|items| items.first())
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn non_zero_int(raw: &Value, field: &str) -> Option<i64> {
    let value = raw.get(field)?;
    let n = match value.as_i64() {
        Some(n) => n,
        None => {
            let f = value.as_f64()?;
            if f.fract() != 0.0 {
                return None;
            }
            f as i64
        }
    };
    (n != 0).then_some(n)
}

// One fractional digit of the exact binary value. Only multiples of 0.25
// with an odd quarter count sit exactly on a half; those go away from zero.
fn rating(raw: &Value) -> Option<String> {
    let value = raw.get("ratings_average")?;
    let average = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !average.is_finite() || average == 0.0 {
        return None;
    }
    let quarters = average * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        let tenths = (average * 10.0).abs().ceil().copysign(average);
        return Some(format!("{:.1}", tenths / 10.0));
    }
    Some(format!("{:.1}", average))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_record_gets_defaults() {
        let book = normalize(&json!({}));
        assert_eq!(book.title, "Unknown Title");
        assert_eq!(book.authors, vec!["Unknown Author".to_string()]);
        assert_eq!(book.cover_url, None);
        assert_eq!(book.cover_url_large, None);
        assert!(book.subjects.is_empty());
        assert_eq!(book.publish_year, None);
        assert_eq!(book.rating, None);
        assert!(!book.id.is_empty());
    }

    #[test]
    fn non_object_record_gets_defaults() {
        for raw in [json!(null), json!(42), json!("text"), json!([1, 2])] {
            let book = normalize(&raw);
            assert_eq!(book.title, UNKNOWN_TITLE);
            assert_eq!(book.authors, vec![UNKNOWN_AUTHOR.to_string()]);
        }
    }

    #[test]
    fn full_record_maps_every_field() {
        let raw = json!({
            "key": "/works/OL45804W",
            "title": "Fantastic Mr Fox",
            "author_name": ["Roald Dahl"],
            "first_publish_year": 1970,
            "isbn": ["9780140328721", "0140328726"],
            "cover_i": 6498519,
            "publisher": ["Puffin"],
            "language": ["eng", "spa"],
            "number_of_pages_median": 96,
            "ratings_average": 4.0526314,
            "subject": ["Foxes", "Farmers"]
        });

        let book = normalize(&raw);
        assert_eq!(book.id, "/works/OL45804W");
        assert_eq!(book.title, "Fantastic Mr Fox");
        assert_eq!(book.authors, vec!["Roald Dahl".to_string()]);
        assert_eq!(book.publish_year, Some(1970));
        assert_eq!(book.isbn.as_deref(), Some("9780140328721"));
        assert_eq!(book.publisher.as_deref(), Some("Puffin"));
        assert_eq!(book.language.as_deref(), Some("eng"));
        assert_eq!(book.pages, Some(96));
        assert_eq!(book.rating.as_deref(), Some("4.1"));
        assert_eq!(
            book.cover_url.as_deref(),
            Some("https://covers.openlibrary.org/b/id/6498519-M.jpg")
        );
        assert_eq!(
            book.cover_url_large.as_deref(),
            Some("https://covers.openlibrary.org/b/id/6498519-L.jpg")
        );
        assert_eq!(book.subjects, vec!["Foxes".to_string(), "Farmers".to_string()]);
    }

    #[test]
    fn subjects_truncate_to_first_five_in_order() {
        let raw = json!({
            "key": "/works/OL1W",
            "subject": ["a", "b", "c", "d", "e", "f", "g", "h"]
        });
        let book = normalize(&raw);
        assert_eq!(book.subjects, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn empty_author_list_gets_placeholder() {
        let book = normalize(&json!({"key": "/works/OL1W", "author_name": []}));
        assert_eq!(book.authors, vec![UNKNOWN_AUTHOR.to_string()]);

        let book = normalize(&json!({"key": "/works/OL1W", "author_name": [7, ""]}));
        assert_eq!(book.authors, vec![UNKNOWN_AUTHOR.to_string()]);
    }

    #[test]
    fn malformed_fields_fall_back() {
        let raw = json!({
            "key": "/works/OL1W",
            "title": 12,
            "first_publish_year": "1999",
            "cover_i": "123",
            "isbn": "9780140328721",
            "number_of_pages_median": 12.5,
            "ratings_average": {"avg": 4}
        });
        let book = normalize(&raw);
        assert_eq!(book.title, UNKNOWN_TITLE);
        assert_eq!(book.publish_year, None);
        assert_eq!(book.cover_url, None);
        assert_eq!(book.isbn, None);
        assert_eq!(book.pages, None);
        assert_eq!(book.rating, None);
    }

    #[test]
    fn zero_values_count_as_absent() {
        let raw = json!({
            "key": "/works/OL1W",
            "first_publish_year": 0,
            "cover_i": 0,
            "number_of_pages_median": 0,
            "ratings_average": 0
        });
        let book = normalize(&raw);
        assert_eq!(book.publish_year, None);
        assert_eq!(book.cover_url, None);
        assert_eq!(book.pages, None);
        assert_eq!(book.rating, None);
    }

    #[test]
    fn rating_rounds_to_one_digit() {
        let rate = |v: Value| normalize(&json!({"key": "k", "ratings_average": v})).rating;
        assert_eq!(rate(json!(4.25)).as_deref(), Some("4.3"));
        assert_eq!(rate(json!(3)).as_deref(), Some("3.0"));
        assert_eq!(rate(json!("3.96")).as_deref(), Some("4.0"));
        assert_eq!(rate(json!("n/a")), None);
    }

    #[test]
    fn rating_rounds_the_stored_value_not_its_decimal_text() {
        let rate = |v: Value| normalize(&json!({"key": "k", "ratings_average": v})).rating;
        // 4.05 and 0.15 are stored just below the half.
        assert_eq!(rate(json!(4.05)).as_deref(), Some("4.0"));
        assert_eq!(rate(json!(0.15)).as_deref(), Some("0.1"));
        assert_eq!(rate(json!("4.05")).as_deref(), Some("4.0"));
        // 1.05 and 2.35 are stored just above it.
        assert_eq!(rate(json!(1.05)).as_deref(), Some("1.1"));
        assert_eq!(rate(json!(2.35)).as_deref(), Some("2.4"));
        // Exact halves.
        assert_eq!(rate(json!(4.75)).as_deref(), Some("4.8"));
        assert_eq!(rate(json!(0.25)).as_deref(), Some("0.3"));
        assert_eq!(rate(json!(0.5)).as_deref(), Some("0.5"));
    }

    #[test]
    fn keyless_records_get_deterministic_synthetic_ids() {
        let raw = json!({"title": "Dune", "author_name": ["Frank Herbert"], "first_publish_year": 1965});
        let first = normalize(&raw);
        let second = normalize(&raw);
        assert_eq!(first, second);
        assert_eq!(first.id, "unkeyed:Dune|Frank Herbert|1965");

        assert_eq!(record_key(&raw), None);
        assert_eq!(record_key(&json!({"key": "   "})), None);
        assert_eq!(record_key(&json!({"key": "/works/OL1W"})), Some("/works/OL1W"));
    }

    #[test]
    fn normalize_leaves_input_untouched() {
        let raw = json!({"key": "/works/OL1W", "subject": ["a", "b", "c", "d", "e", "f"]});
        let before = raw.clone();
        let _ = normalize(&raw);
        assert_eq!(raw, before);
    }
}
