//! In-memory catalogue of books.
//!
//! Records keep insertion order, which is also the order every read returns.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;

use super::models::{seed_books, Book, BookFilter, BookRequest};
use crate::utils::eq_ignore_case;

/// Store handle shared between the module and its request handlers.
pub type SharedStore = Arc<RwLock<BookStore>>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Book id {0} not found")]
    IdNotFound(i64),

    #[error("Book id not found: request carries no id")]
    MissingId,

    #[error("No book titled '{0}'")]
    TitleNotFound(String),

    #[error("The catalogue is empty")]
    Empty,
}

#[derive(Debug, Default, Clone)]
pub struct BookStore {
    books: Vec<Book>,
}

impl BookStore {
    /// An empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalogue holding the five sample books.
    pub fn seeded() -> Self {
        Self::from_books(seed_books())
    }

    pub fn from_books(books: Vec<Book>) -> Self {
        Self { books }
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn list(&self) -> &[Book] {
        &self.books
    }

    /// Books matching every supplied criterion, in storage order.
    pub fn filter(&self, filter: &BookFilter) -> Vec<Book> {
        self.books
            .iter()
            .filter(|book| {
                filter
                    .author
                    .as_deref()
                    .map_or(true, |author| eq_ignore_case(&book.author, author))
            })
            .filter(|book| filter.rating.map_or(true, |rating| book.rating == rating))
            .filter(|book| {
                filter
                    .title
                    .as_deref()
                    .map_or(true, |title| eq_ignore_case(&book.title, title))
            })
            .cloned()
            .collect()
    }

    /// The book in first position, whatever it is.
    pub fn favourite(&self) -> Result<&Book, StoreError> {
        self.books.first().ok_or(StoreError::Empty)
    }

    pub fn find_by_title(&self, title: &str) -> Result<&Book, StoreError> {
        self.books
            .iter()
            .find(|book| eq_ignore_case(&book.title, title))
            .ok_or_else(|| StoreError::TitleNotFound(title.to_string()))
    }

    /// Id the next created book receives: one past the id of the last record.
    ///
    /// Deleting the tail record lets its id be handed out again.
    pub fn next_id(&self) -> i64 {
        self.books.last().map_or(1, |book| book.id + 1)
    }

    /// Append a new book and return it with its assigned id.
    pub fn create(&mut self, request: BookRequest) -> Book {
        let book = request.into_book(self.next_id());
        self.books.push(book.clone());
        tracing::info!(book_id = book.id, total = self.books.len(), "book created");
        book
    }

    /// Replace every record carrying the request's id; returns how many were replaced.
    pub fn update(&mut self, request: BookRequest) -> Result<usize, StoreError> {
        let id = request.id.ok_or(StoreError::MissingId)?;
        let replacement = request.into_book(id);

        let mut replaced = 0;
        for book in self.books.iter_mut().filter(|book| book.id == id) {
            *book = replacement.clone();
            replaced += 1;
        }

        if replaced == 0 {
            return Err(StoreError::IdNotFound(id));
        }
        tracing::info!(book_id = id, replaced, "book updated");
        Ok(replaced)
    }

    /// Remove the first record with the given id.
    pub fn delete(&mut self, id: i64) -> Result<Book, StoreError> {
        let position = self
            .books
            .iter()
            .position(|book| book.id == id)
            .ok_or(StoreError::IdNotFound(id))?;

        let removed = self.books.remove(position);
        tracing::info!(book_id = id, total = self.books.len(), "book deleted");
        Ok(removed)
    }
}
