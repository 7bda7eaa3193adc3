//! Atheneum demo driver
//!
//! Seeds a small catalog, walks a borrow/return/reserve/review cycle and
//! prints the resulting statistics. Stands in for the presentation
//! collaborator; all real behavior lives in the engine crate.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use atheneum_engine::{
    config::EngineConfig,
    models::{NewBook, NewReview, SearchQuery},
    persistence::FileStore,
    LibraryEngine,
};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = EngineConfig::load().unwrap_or_default();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("atheneum_engine={}", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Atheneum engine v{}", env!("CARGO_PKG_VERSION"));

    let mut engine = LibraryEngine::new(config);

    for (id, title, author, category, year, copies) in [
        ("B001", "The Name of the Rose", "Umberto Eco", "Fiction", 1980, 2),
        ("B002", "Foucault's Pendulum", "Umberto Eco", "Fiction", 1988, 1),
        ("B003", "A Brief History of Time", "Stephen Hawking", "Science", 1988, 3),
        ("B004", "The Elegant Universe", "Brian Greene", "Science", 1999, 1),
    ] {
        engine.add_book(NewBook {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            publisher: String::new(),
            isbn: String::new(),
            publication_year: year,
            category: category.into(),
            total_copies: copies,
            location: "main-floor".into(),
            description: String::new(),
            pages: 0,
            language: "English".into(),
        })?;
    }

    engine.relate_books("B001", "B002", 0.9)?;
    engine.relate_books("B002", "B001", 0.9)?;
    engine.relate_books("B003", "B004", 0.7)?;
    engine.relate_books("B004", "B003", 0.7)?;

    // One full lending cycle on the single-copy book.
    let loan = engine.borrow_book("member-1", "B002", None)?;
    let (reservation, position) = engine.reserve_book("member-2", "B002")?;
    tracing::info!(reservation = %reservation.id, position, "queued behind the open loan");
    let fine = engine.return_book(&loan)?;
    tracing::info!(fine, "loan closed");
    if let Some(next) = engine.next_reservation_for("B002") {
        tracing::info!(user = %next.user_id, "reservation now first in line");
    }

    engine.add_review(
        "member-1",
        "B002",
        NewReview {
            rating: 5,
            text: "Dense and rewarding.".into(),
        },
    )?;

    let hits = engine.search(
        "member-1",
        &SearchQuery {
            author: "eco".into(),
            ..SearchQuery::default()
        },
    );
    tracing::info!(hits = hits.len(), "search by author");

    for (title, weight) in engine.recommend("B001", None) {
        tracing::info!(%title, weight, "recommended");
    }

    let stats = engine.statistics();
    println!("{}", serde_json::to_string_pretty(&stats)?);

    let store = FileStore::new("data");
    for result in store.save(&engine) {
        if !result.success {
            tracing::warn!(collection = result.collection, message = %result.message, "save failed");
        }
    }

    Ok(())
}
