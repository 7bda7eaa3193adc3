//! Catalog mutation and lookup: the multi-index write path.

use tracing::{info, warn};
use validator::Validate;

use crate::{
    error::{EngineError, EngineResult},
    index::LinkedList,
    models::{Book, BookUpdate, NewBook, SearchHistory, SearchQuery},
};

use super::LibraryEngine;

impl LibraryEngine {
    /// Register a new book in every index: the id tree, the title and
    /// author hashes, its category shelf and the recommendation graph.
    pub fn add_book(&mut self, new: NewBook) -> EngineResult<Book> {
        new.validate()?;
        if self.books.contains(&new.id) {
            warn!(book_id = %new.id, "rejected duplicate book id");
            return Err(EngineError::Conflict(format!(
                "book id {} is already registered",
                new.id
            )));
        }

        let book: Book = new.into();
        self.index_book(&book);
        info!(book_id = %book.id, title = %book.title, "book added");

        let snapshot = book.clone();
        self.books.insert(book.id.clone(), book);
        Ok(snapshot)
    }

    /// Write the secondary entries for a book (everything except the
    /// canonical tree insert).
    fn index_book(&mut self, book: &Book) {
        self.title_index
            .insert(Self::normalize_key(&book.title), book.id.clone());
        self.author_index
            .insert(Self::normalize_key(&book.author), book.id.clone());
        self.shelves
            .entry(book.category.clone())
            .or_insert_with(LinkedList::new)
            .append(book.id.clone());
        self.graph.add_node(book.id.clone());
    }

    /// Shared with snapshot ingest: insert-or-overwrite a full record,
    /// keeping every secondary index in step.
    pub(crate) fn put_book_record(&mut self, book: Book) {
        if let Some(existing) = self.books.get(&book.id) {
            let existing = existing.clone();
            self.unindex_book(&existing);
        }
        self.index_book(&book);
        self.books.insert(book.id.clone(), book);
    }

    fn unindex_book(&mut self, book: &Book) {
        let title_key = Self::normalize_key(&book.title);
        if self.title_index.get(&title_key) == Some(&book.id) {
            self.title_index.remove(&title_key);
        }
        let author_key = Self::normalize_key(&book.author);
        if self.author_index.get(&author_key) == Some(&book.id) {
            self.author_index.remove(&author_key);
        }
        if let Some(shelf) = self.shelves.get_mut(&book.category) {
            if let Some(pos) = shelf.iter().position(|id| id == &book.id) {
                shelf.remove_at(pos);
            }
        }
    }

    /// Snapshot of a book by id.
    pub fn get_book(&self, book_id: &str) -> Option<Book> {
        self.books.get(&book_id.to_string()).cloned()
    }

    /// Bump the view counter, returning the new value.
    pub fn record_view(&mut self, book_id: &str) -> EngineResult<u64> {
        let book = self
            .books
            .get_mut(&book_id.to_string())
            .ok_or_else(|| EngineError::NotFound(format!("book {book_id}")))?;
        book.views += 1;
        Ok(book.views)
    }

    /// Exact lookup through the title hash index (normalized key).
    pub fn lookup_by_title(&self, title: &str) -> Option<Book> {
        let id = self.title_index.get(&Self::normalize_key(title))?;
        self.books.get(id).cloned()
    }

    /// Exact lookup through the author hash index (normalized key).
    pub fn lookup_by_author(&self, author: &str) -> Option<Book> {
        let id = self.author_index.get(&Self::normalize_key(author))?;
        self.books.get(id).cloned()
    }

    /// All books on a category shelf, in registration order.
    pub fn books_in_category(&self, category: &str) -> Vec<Book> {
        let Some(shelf) = self.shelves.get(category) else {
            return Vec::new();
        };
        shelf
            .iter()
            .filter_map(|id| self.books.get(id).cloned())
            .collect()
    }

    /// Every book, ascending by id.
    pub fn all_books(&self) -> Vec<Book> {
        self.books
            .enumerate()
            .into_iter()
            .map(|(_, book)| book.clone())
            .collect()
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    /// Apply a partial update. Title, author and category changes re-key
    /// the affected secondary indices.
    pub fn update_book(&mut self, book_id: &str, update: BookUpdate) -> EngineResult<Book> {
        let current = self
            .books
            .get(&book_id.to_string())
            .cloned()
            .ok_or_else(|| EngineError::NotFound(format!("book {book_id}")))?;

        let mut updated = current.clone();
        if let Some(title) = update.title {
            updated.title = title;
        }
        if let Some(author) = update.author {
            updated.author = author;
        }
        if let Some(publisher) = update.publisher {
            updated.publisher = publisher;
        }
        if let Some(isbn) = update.isbn {
            updated.isbn = isbn;
        }
        if let Some(year) = update.publication_year {
            updated.publication_year = year;
        }
        if let Some(category) = update.category {
            updated.category = category;
        }
        if let Some(location) = update.location {
            updated.location = location;
        }
        if let Some(description) = update.description {
            updated.description = description;
        }
        if let Some(pages) = update.pages {
            updated.pages = pages;
        }
        if let Some(language) = update.language {
            updated.language = language;
        }
        if let Some(status) = update.status {
            updated.status = status;
        }

        self.put_book_record(updated.clone());
        info!(book_id = %book_id, "book updated");
        Ok(updated)
    }

    /// Remove a book from every index and the graph. Ledger, reservation
    /// and review entries referencing the id are left in place; they are
    /// historical records, not owned by the catalog.
    pub fn delete_book(&mut self, book_id: &str) -> EngineResult<()> {
        let book = self
            .books
            .get(&book_id.to_string())
            .cloned()
            .ok_or_else(|| EngineError::NotFound(format!("book {book_id}")))?;

        self.unindex_book(&book);
        self.graph.remove_node(book_id);
        self.books.remove(&book_id.to_string());
        info!(book_id = %book_id, "book deleted");
        Ok(())
    }

    /// Multi-criteria search over the id-ordered enumeration. Non-empty
    /// criteria must all match; the query is logged to the search
    /// history with its result count.
    pub fn search(&mut self, user_id: &str, query: &SearchQuery) -> Vec<Book> {
        let results: Vec<Book> = self
            .books
            .enumerate()
            .into_iter()
            .filter(|(_, book)| query.matches(book))
            .map(|(_, book)| book.clone())
            .collect();

        self.search_log.append(SearchHistory::new(
            user_id,
            query.describe(),
            results.len(),
        ));
        results
    }

    /// A user's logged searches, oldest first.
    pub fn user_search_history(&self, user_id: &str) -> Vec<SearchHistory> {
        self.search_log
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .cloned()
            .collect()
    }
}
