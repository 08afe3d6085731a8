use crate::models::book::Book;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parses a response body into `T`. Derived structs would also accept a
/// JSON array field by field, so anything but a top-level object is refused.
pub fn from_object<T: DeserializeOwned>(body: &str) -> Result<T, serde_json::Error> {
    let value: Value = serde_json::from_str(body)?;
    if !value.is_object() {
        return Err(<serde_json::Error as serde::de::Error>::custom(
            "expected a JSON object",
        ));
    }
    serde_json::from_value(value)
}

/// Body of `GET /search.json`. Every field is optional upstream.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub docs: Option<Vec<Value>>,
    #[serde(default, rename = "numFound")]
    pub num_found: Option<u64>,
    #[serde(default)]
    pub start: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultEnvelope {
    pub books: Vec<Book>,
    pub total_matched: u64,
    pub offset: u64,
}

impl SearchResultEnvelope {
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

/// Upstream work descriptions come either bare or wrapped in a typed object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Description {
    Text(String),
    Typed { value: String },
}

impl Description {
    pub fn into_text(self) -> String {
        match self {
            Description::Text(text) => text,
            Description::Typed { value } => value,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WorkResponse {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<Description>,
    #[serde(default)]
    pub subjects: Option<Vec<String>>,
    #[serde(default)]
    pub first_publish_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkDetails {
    pub key: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub subjects: Vec<String>,
    pub first_publish_date: Option<String>,
}

impl WorkDetails {
    pub fn from_response(requested_key: &str, response: WorkResponse) -> Self {
        Self {
            key: response.key.unwrap_or_else(|| requested_key.to_string()),
            title: response.title,
            description: response.description.map(Description::into_text),
            subjects: response.subjects.unwrap_or_default(),
            first_publish_date: response.first_publish_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_response_tolerates_missing_fields() {
        let response: SearchResponse = from_object("{}").unwrap();
        assert!(response.docs.is_none());
        assert!(response.num_found.is_none());

        let response: SearchResponse = from_object(r#"{"docs":null,"numFound":3}"#).unwrap();
        assert!(response.docs.is_none());
        assert_eq!(response.num_found, Some(3));
    }

    #[test]
    fn search_response_rejects_wrong_shapes() {
        assert!(from_object::<SearchResponse>(r#"{"docs":"nope"}"#).is_err());
        assert!(from_object::<SearchResponse>(r#"{"numFound":-1}"#).is_err());
        assert!(from_object::<SearchResponse>("not json").is_err());
    }

    #[test]
    fn array_bodies_are_not_objects() {
        for body in ["[]", "[null, 3]", r#"[[{"key":"/works/OL1W"}], 1]"#, "42", "null"] {
            assert!(from_object::<SearchResponse>(body).is_err(), "accepted {}", body);
            assert!(from_object::<WorkResponse>(body).is_err(), "accepted {}", body);
        }
        assert!(from_object::<SearchResponse>("{}").is_ok());
    }

    #[test]
    fn description_accepts_both_shapes() {
        let plain: WorkResponse = serde_json::from_str(r#"{"description":"A fox."}"#).unwrap();
        let typed: WorkResponse = serde_json::from_str(
            r#"{"description":{"type":"/type/text","value":"A fox."}}"#,
        )
        .unwrap();

        let plain = WorkDetails::from_response("/works/OL1W", plain);
        let typed = WorkDetails::from_response("/works/OL1W", typed);
        assert_eq!(plain.description.as_deref(), Some("A fox."));
        assert_eq!(plain.description, typed.description);
        assert_eq!(plain.key, "/works/OL1W");
    }
}
