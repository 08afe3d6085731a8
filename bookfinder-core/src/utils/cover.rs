pub const COVERS_BASE_URL: &str = "https://covers.openlibrary.org";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverSize {
    Small,
    Medium,
    Large,
}

impl CoverSize {
    pub fn token(&self) -> char {
        match self {
            CoverSize::Small => 'S',
            CoverSize::Medium => 'M',
            CoverSize::Large => 'L',
        }
    }
}

pub fn resolve_cover_url(cover_id: Option<u64>, size: CoverSize) -> Option<String> {
    cover_id.map(|id| format!("{}/b/id/{}-{}.jpg", COVERS_BASE_URL, id, size.token()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_id_has_no_url() {
        assert_eq!(resolve_cover_url(None, CoverSize::Medium), None);
    }

    #[test]
    fn url_embeds_id_and_size_token() {
        assert_eq!(
            resolve_cover_url(Some(12345), CoverSize::Large).as_deref(),
            Some("https://covers.openlibrary.org/b/id/12345-L.jpg")
        );
        assert_eq!(
            resolve_cover_url(Some(7), CoverSize::Small).as_deref(),
            Some("https://covers.openlibrary.org/b/id/7-S.jpg")
        );
    }
}
