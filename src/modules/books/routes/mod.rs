//! HTTP handlers for the books catalogue.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use bookshelf_http::error::AppError;
use validator::Validate;

use super::models::{Book, BookFilter, BookRequest, DeleteBookParams, TitlePath};
use super::store::{SharedStore, StoreError};

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        AppError::not_found(error.to_string())
    }
}

/// Routes served by the books module.
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/books", get(read_all_books))
        .route("/books/", get(filter_books))
        .route("/books/Mybook", get(read_favourite_book))
        .route("/books/create-book", post(create_book))
        .route("/books/update-book", put(update_book))
        .route("/books/delete-book", delete(delete_book))
        .route("/books/{title}", get(read_book))
        .with_state(store)
}

async fn read_all_books(State(store): State<SharedStore>) -> Json<Vec<Book>> {
    Json(store.read().await.list().to_vec())
}

async fn filter_books(
    State(store): State<SharedStore>,
    query: Result<Query<BookFilter>, QueryRejection>,
) -> Result<Json<Vec<Book>>, AppError> {
    let Query(filter) = query?;
    filter.validate()?;

    let books = store.read().await.filter(&filter);
    tracing::debug!(?filter, matched = books.len(), "books filtered");
    Ok(Json(books))
}

async fn read_favourite_book(State(store): State<SharedStore>) -> Result<Json<Book>, AppError> {
    let store = store.read().await;
    Ok(Json(store.favourite()?.clone()))
}

async fn read_book(
    State(store): State<SharedStore>,
    path: Result<Path<TitlePath>, PathRejection>,
) -> Result<Json<Book>, AppError> {
    let Path(params) = path?;
    params.validate()?;

    let store = store.read().await;
    Ok(Json(store.find_by_title(&params.title)?.clone()))
}

async fn create_book(
    State(store): State<SharedStore>,
    payload: Result<Json<BookRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(request) = payload?;
    request.validate()?;

    store.write().await.create(request);
    Ok(StatusCode::CREATED)
}

async fn update_book(
    State(store): State<SharedStore>,
    payload: Result<Json<BookRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(request) = payload?;
    request.validate()?;

    store.write().await.update(request)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_book(
    State(store): State<SharedStore>,
    query: Result<Query<DeleteBookParams>, QueryRejection>,
) -> Result<StatusCode, AppError> {
    let Query(params) = query?;

    store.write().await.delete(params.book_id)?;
    Ok(StatusCode::NO_CONTENT)
}
