//! # Storefront CLI
//!
//! Lists the catalog and prices baskets against the live offers API.
//!
//! ## Usage
//! ```bash
//! # List every book
//! cargo run -p storefront -- books
//!
//! # Price a basket (an ISBN given twice counts twice)
//! cargo run -p storefront -- price c8fabf68-8374-48fe-a7ea-a00ccd07afff \
//!     a460afed-e5e7-4e39-a39d-c885c05db861
//!
//! # Use another config file
//! cargo run -p storefront -- --config ./catalog.toml books
//! ```
//!
//! `RUST_LOG=debug` shows every basket mutation and offer lookup.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use bookstore_basket::{BasketStore, PricingEngine};
use bookstore_catalog::{CatalogConfig, HttpCatalog, OfferSource};
use bookstore_core::Book;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

/// What to do, parsed from the command line.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Books,
    Price(Vec<String>),
    Help,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let (config_path, command) = parse_args(&args)?;

    if command == Command::Help {
        print_help();
        return Ok(());
    }

    let config = CatalogConfig::load_or_default(config_path);
    info!(base_url = %config.api.base_url, "Using catalog");
    let catalog = Arc::new(HttpCatalog::from_config(&config)?);

    let books = catalog.books().await?;

    match command {
        Command::Books => {
            for book in &books {
                println!("{:<40} {:>8}  {}", book.isbn, book.price, book.title);
            }
            println!();
            println!("{} books", books.len());
        }
        Command::Price(isbns) => {
            let selected = select_books(&books, &isbns)?;

            let store = BasketStore::new();
            let source: Arc<dyn OfferSource> = catalog;
            let pricing = PricingEngine::new(&store, source)
                .with_refresh_on_start(config.pricing.refresh_on_start)
                .start();

            for book in &selected {
                store.add_book(book);
            }

            let total = pricing.quote_for(store.revision()).await?;
            pricing.shutdown().await?;

            for item in basket_lines(&store) {
                println!("{:>3} × {:<40} {:>8}", item.1, item.0.title, item.0.price);
            }
            println!();
            println!("Subtotal: {:>8}", total.quote.subtotal);
            if let Some(offer) = &total.quote.applied_offer {
                println!("Offer:    {:>8}  ({})", total.quote.discount(), offer.kind());
            }
            println!("Total:    {:>8}", total.total());
        }
        Command::Help => {}
    }

    Ok(())
}

/// Initializes the tracing subscriber for logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .with_writer(std::io::stderr)
        .init();
}

/// Splits `--config <path>` from the subcommand.
fn parse_args(args: &[String]) -> Result<(Option<PathBuf>, Command), String> {
    let mut config_path = None;
    let mut rest = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                let path = args
                    .get(i + 1)
                    .ok_or_else(|| "--config needs a path".to_string())?;
                config_path = Some(PathBuf::from(path));
                i += 1;
            }
            "--help" | "-h" => return Ok((config_path, Command::Help)),
            other => rest.push(other.to_string()),
        }
        i += 1;
    }

    let command = match rest.split_first() {
        Some((cmd, [])) if cmd == "books" => Command::Books,
        Some((cmd, isbns)) if cmd == "price" && !isbns.is_empty() => Command::Price(isbns.to_vec()),
        Some((cmd, _)) if cmd == "price" => return Err("price needs at least one ISBN".into()),
        None => Command::Help,
        Some((cmd, _)) => return Err(format!("unknown command '{}', try --help", cmd)),
    };

    Ok((config_path, command))
}

/// Resolves ISBNs against the catalog, keeping duplicates.
fn select_books(books: &[Book], isbns: &[String]) -> Result<Vec<Book>, String> {
    isbns
        .iter()
        .map(|isbn| {
            books
                .iter()
                .find(|b| &b.isbn == isbn)
                .cloned()
                .ok_or_else(|| format!("no book with ISBN {} in the catalog", isbn))
        })
        .collect()
}

/// (book, quantity) pairs of the current basket.
fn basket_lines(store: &BasketStore) -> Vec<(Book, u32)> {
    store
        .basket()
        .items()
        .iter()
        .map(|item| (item.book.clone(), item.quantity))
        .collect()
}

fn print_help() {
    println!("Bookstore storefront");
    println!();
    println!("Usage: storefront [OPTIONS] <COMMAND>");
    println!();
    println!("Commands:");
    println!("  books               List the catalog");
    println!("  price <ISBN>...     Price a basket; repeat an ISBN to buy several copies");
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>  Config file (default: platform config dir/catalog.toml)");
    println!("  -h, --help           Show this help message");
    println!();
    println!("Environment:");
    println!("  BOOKSTORE_API_URL, BOOKSTORE_API_TIMEOUT_SECS, RUST_LOG");
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookstore_core::Money;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(parse_args(&args(&["books"])).unwrap(), (None, Command::Books));
        assert_eq!(parse_args(&args(&[])).unwrap(), (None, Command::Help));

        let (path, cmd) = parse_args(&args(&["--config", "x.toml", "price", "a", "a"])).unwrap();
        assert_eq!(path, Some(PathBuf::from("x.toml")));
        assert_eq!(cmd, Command::Price(args(&["a", "a"])));

        assert!(parse_args(&args(&["price"])).is_err());
        assert!(parse_args(&args(&["--config"])).is_err());
        assert!(parse_args(&args(&["checkout"])).is_err());
    }

    #[test]
    fn test_select_books_keeps_duplicates() {
        let books = vec![
            Book::new("a", "A", Money::from_units(10)),
            Book::new("b", "B", Money::from_units(20)),
        ];

        let selected = select_books(&books, &args(&["b", "a", "b"])).unwrap();
        let isbns: Vec<&str> = selected.iter().map(|b| b.isbn.as_str()).collect();
        assert_eq!(isbns, ["b", "a", "b"]);

        assert!(select_books(&books, &args(&["zzz"])).is_err());
    }
}
