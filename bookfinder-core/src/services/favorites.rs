use crate::error::{CatalogError, Result, StorageError};
use crate::models::book::Book;
use crate::models::storage::Backend;
use tracing::{debug, error, info, warn};

pub const FAVORITES_STORAGE_KEY: &str = "bookfinder_favorites";

/// The saved shortlist, mirrored in memory and written through to a
/// [`KeyValueStore`](crate::models::storage::KeyValueStore) slot on every
/// mutation.
///
/// The in-memory list is authoritative: a failed write is reported as
/// [`CatalogError::PersistenceFailed`] but the mutation stays applied.
pub struct FavoritesStore {
    backend: Backend,
    key: String,
    books: Vec<Book>,
}

impl FavoritesStore {
    pub fn load(backend: Backend) -> Self {
        Self::load_with_key(backend, FAVORITES_STORAGE_KEY)
    }

    pub fn load_with_key(backend: Backend, key: &str) -> Self {
        let books = read_persisted(&backend, key);
        info!("Loaded {} favorites", books.len());
        Self {
            backend,
            key: key.to_string(),
            books,
        }
    }

    /// Replaces the in-memory list with what the backend currently holds.
    pub fn reload(&mut self) {
        self.books = read_persisted(&self.backend, &self.key);
    }

    /// Inserts or replaces the entry with `book.id`. A replaced entry keeps
    /// its position in the list.
    pub fn add(&mut self, book: Book) -> Result<()> {
        match self.position(&book.id) {
            Some(index) => self.books[index] = book,
            None => self.books.push(book),
        }
        self.persist()
    }

    pub fn remove(&mut self, id: &str) -> Result<()> {
        match self.position(id) {
            Some(index) => {
                self.books.remove(index);
                self.persist()
            }
            None => {
                debug!("Favorite {} not present, nothing to remove", id);
                Ok(())
            }
        }
    }

    pub fn clear(&mut self) -> Result<()> {
        self.books.clear();
        self.persist()
    }

    /// Removes `book` if saved, otherwise adds it. Returns whether it is saved now.
    pub fn toggle(&mut self, book: Book) -> Result<bool> {
        if self.has(&book.id) {
            self.remove(&book.id)?;
            Ok(false)
        } else {
            self.add(book)?;
            Ok(true)
        }
    }

    pub fn has(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    pub fn count(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn list(&self) -> &[Book] {
        &self.books
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.books.iter().position(|book| book.id == id)
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string(&self.books).map_err(StorageError::from)?;

        self.backend.write(&self.key, &json).map_err(|e| {
            warn!("Failed to persist {} favorites: {}", self.books.len(), e);
            e
        })?;
        Ok(())
    }
}

fn read_persisted(backend: &Backend, key: &str) -> Vec<Book> {
    let raw = match backend.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!("Failed to read favorites: {}", e);
            return Vec::new();
        }
    };

    match parse_favorites(&raw) {
        Ok(books) => books,
        Err(e) => {
            error!("Error loading favorites: {}", e);
            Vec::new()
        }
    }
}

/// Parses a persisted list. Entries without an id are skipped; a repeated
/// id keeps its first position and its last value.
pub fn parse_favorites(raw: &str) -> Result<Vec<Book>> {
    let stored: Vec<Book> =
        serde_json::from_str(raw).map_err(CatalogError::MalformedPersistedData)?;

    let mut books: Vec<Book> = Vec::with_capacity(stored.len());
    for book in stored {
        if book.id.is_empty() {
            warn!("Skipping persisted favorite without an id");
            continue;
        }
        match books.iter().position(|existing| existing.id == book.id) {
            Some(index) => books[index] = book,
            None => books.push(book),
        }
    }
    Ok(books)
}
