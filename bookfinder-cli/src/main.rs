use bookfinder_core::utils::text::plural;
use bookfinder_core::{
    Book, CatalogConfig, CatalogError, FavoritesStore, ReqwestTransport, SearchClient,
    SearchField, SearchSession, SearchSessionState, SubmitOutcome,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage:
  bookfinder search <title|author|subject> <query...>
  bookfinder favorite <title|author|subject> <n> <query...>
  bookfinder favorites [--json]
  bookfinder unfavorite <id>
  bookfinder clear-favorites
  bookfinder details <work-key>";

struct Bookfinder {
    session: SearchSession,
    favorites: FavoritesStore,
}

impl Bookfinder {
    fn new(config: &CatalogConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let backend = config.build_backend()?;
        let client = SearchClient::new(Arc::new(ReqwestTransport::new()), config.base_url.clone());

        Ok(Self {
            session: SearchSession::new(client, config.page_size),
            favorites: FavoritesStore::load(backend),
        })
    }

    async fn search(&self, field: SearchField, query: &str) -> Result<Vec<Book>, CatalogError> {
        let outcome = self.session.submit(query, field).await?;

        let state = match outcome {
            SubmitOutcome::Applied(state) => state,
            SubmitOutcome::Stale => self.session.state(),
        };

        if let Some(notice) = state.notice() {
            println!("{}", notice);
        }

        match state {
            SearchSessionState::Success(envelope) => {
                println!(
                    "Search Results ({})",
                    plural(envelope.books.len(), "book", "books")
                );
                for (i, book) in envelope.books.iter().enumerate() {
                    let saved = if self.favorites.has(&book.id) { "*" } else { " " };
                    println!("{:>3}. {} {}  [{}]", i + 1, saved, book.display_line(), book.id);
                }
                Ok(envelope.books)
            }
            _ => Ok(Vec::new()),
        }
    }

    async fn toggle_result(
        &mut self,
        field: SearchField,
        index: usize,
        query: &str,
    ) -> Result<(), CatalogError> {
        let books = self.search(field, query).await?;

        let book = match index.checked_sub(1).and_then(|i| books.get(i)) {
            Some(book) => book.clone(),
            None => {
                warn!("No result number {} for '{}'", index, query);
                return Ok(());
            }
        };

        let title = book.title.clone();
        match self.favorites.toggle(book) {
            Ok(true) => println!("Added to favorites: {} has been added to your favorites.", title),
            Ok(false) => println!(
                "Removed from favorites: {} has been removed from your favorites.",
                title
            ),
            Err(e) => report_persistence(&e),
        }
        Ok(())
    }

    fn list_favorites(&self, as_json: bool) -> Result<(), Box<dyn std::error::Error>> {
        if as_json {
            println!("{}", serde_json::to_string_pretty(self.favorites.list())?);
            return Ok(());
        }

        if self.favorites.is_empty() {
            println!("No favorites yet");
            return Ok(());
        }

        println!("My Favorites ({})", plural(self.favorites.count(), "book", "books"));
        for book in self.favorites.list() {
            println!("  {}  [{}]", book.display_line(), book.id);
        }
        Ok(())
    }

    fn unfavorite(&mut self, id: &str) {
        let title = self.favorites.get(id).map(|book| book.title.clone());
        match (self.favorites.remove(id), title) {
            (Err(e), _) => report_persistence(&e),
            (Ok(()), Some(title)) => println!(
                "Removed from favorites: {} has been removed from your favorites.",
                title
            ),
            (Ok(()), None) => println!("{} is not in your favorites", id),
        }
    }

    fn clear_favorites(&mut self) {
        match self.favorites.clear() {
            Ok(()) => println!("Favorites cleared: All favorites have been removed."),
            Err(e) => report_persistence(&e),
        }
    }

    async fn details(&self, work_key: &str) -> Result<(), CatalogError> {
        let details = self.session.client().work_details(work_key).await?;

        println!("{}", details.title.as_deref().unwrap_or("Unknown Title"));
        println!("  key: {}", details.key);
        if let Some(date) = &details.first_publish_date {
            println!("  first published: {}", date);
        }
        if !details.subjects.is_empty() {
            println!("  subjects: {}", details.subjects.join(", "));
        }
        if let Some(description) = &details.description {
            println!();
            println!("{}", description);
        }
        if let Some(book) = self.favorites.get(&details.key) {
            println!();
            println!("  saved in favorites as {}", book.display_line());
        }
        Ok(())
    }
}

fn report_persistence(e: &CatalogError) {
    warn!("{}", e);
    println!("Warning: favorites could not be saved ({}); changes apply to this run only.", e);
}

fn parse_field(arg: Option<&String>) -> Result<SearchField, String> {
    arg.ok_or_else(|| "missing search field".to_string())?
        .parse::<SearchField>()
}

fn usage_error(message: &str) -> ! {
    error!("{}", message);
    eprintln!("{}", USAGE);
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("bookfinder=info,bookfinder_core=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = CatalogConfig::from_env();
    let mut app = match Bookfinder::new(&config) {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to open favorites storage: {}", e);
            std::process::exit(1);
        }
    };
    info!("Catalog at {}", config.base_url);

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("");

    let result = match command {
        "search" => {
            let field = parse_field(args.get(2)).unwrap_or_else(|e| usage_error(&e));
            let query = args.get(3..).map(|rest| rest.join(" ")).unwrap_or_default();
            app.search(field, &query).await.map(|_| ())
        }
        "favorite" => {
            let field = parse_field(args.get(2)).unwrap_or_else(|e| usage_error(&e));
            let index: usize = args
                .get(3)
                .and_then(|n| n.parse().ok())
                .unwrap_or_else(|| usage_error("result number must be a positive integer"));
            let query = args.get(4..).map(|rest| rest.join(" ")).unwrap_or_default();
            app.toggle_result(field, index, &query).await
        }
        "favorites" => {
            app.list_favorites(args.get(2).map(String::as_str) == Some("--json"))?;
            Ok(())
        }
        "unfavorite" => {
            let id = args
                .get(2)
                .unwrap_or_else(|| usage_error("missing favorite id"));
            app.unfavorite(id);
            Ok(())
        }
        "clear-favorites" => {
            app.clear_favorites();
            Ok(())
        }
        "details" => {
            let key = args
                .get(2)
                .unwrap_or_else(|| usage_error("missing work key"));
            app.details(key).await
        }
        _ => usage_error("unknown command"),
    };

    match result {
        Ok(()) => Ok(()),
        Err(CatalogError::InvalidQuery) => usage_error("Search query cannot be empty"),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_field_reads_known_fields() {
        assert_eq!(parse_field(Some(&"author".to_string())), Ok(SearchField::Author));
        assert!(parse_field(Some(&"isbn".to_string())).is_err());
        assert!(parse_field(None).is_err());
    }
}
