pub mod models;
pub mod routes;
pub mod store;

use async_trait::async_trait;
use axum::Router;
use bookshelf_kernel::{InitCtx, Module};
use serde_json::json;

use store::{BookStore, SharedStore};

/// Books module owning the in-memory catalogue
pub struct BooksModule {
    store: SharedStore,
}

impl BooksModule {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Handle to the catalogue served by this module
    pub fn store(&self) -> SharedStore {
        self.store.clone()
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let books = self.store.read().await.len();
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            books,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi_fragment())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        let books = self.store.read().await.len();
        tracing::info!(
            module = self.name(),
            books,
            "books module stopped; catalogue discarded"
        );
        Ok(())
    }
}

fn error_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}

fn book_list_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": {
                    "type": "array",
                    "items": { "$ref": "#/components/schemas/Book" }
                }
            }
        }
    })
}

fn book_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/Book" }
            }
        }
    })
}

fn book_request_body() -> serde_json::Value {
    json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/BookRequest" }
            }
        }
    })
}

fn openapi_fragment() -> serde_json::Value {
    json!({
        "paths": {
            "/books": {
                "get": {
                    "summary": "List all books",
                    "tags": ["Books"],
                    "responses": {
                        "200": book_list_response("Every book in storage order")
                    }
                }
            },
            "/books/": {
                "get": {
                    "summary": "Filter books",
                    "tags": ["Books"],
                    "parameters": [
                        {
                            "name": "author",
                            "in": "query",
                            "required": false,
                            "schema": { "type": "string", "minLength": 1, "maxLength": 10 }
                        },
                        {
                            "name": "rating",
                            "in": "query",
                            "required": false,
                            "schema": { "type": "integer", "minimum": 1, "maximum": 5 }
                        },
                        {
                            "name": "title",
                            "in": "query",
                            "required": false,
                            "schema": { "type": "string", "minLength": 1, "maxLength": 10 }
                        }
                    ],
                    "responses": {
                        "200": book_list_response("Books matching every supplied criterion"),
                        "422": error_response("Invalid query")
                    }
                }
            },
            "/books/Mybook": {
                "get": {
                    "summary": "Favourite book",
                    "tags": ["Books"],
                    "responses": {
                        "200": book_response("The first book in the catalogue"),
                        "404": error_response("Catalogue is empty")
                    }
                }
            },
            "/books/{title}": {
                "get": {
                    "summary": "Find a book by title",
                    "tags": ["Books"],
                    "parameters": [
                        {
                            "name": "title",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "string", "minLength": 3, "maxLength": 20 }
                        }
                    ],
                    "responses": {
                        "200": book_response("First book with that title"),
                        "404": error_response("No book with that title"),
                        "422": error_response("Invalid title")
                    }
                }
            },
            "/books/create-book": {
                "post": {
                    "summary": "Create a book",
                    "tags": ["Books"],
                    "requestBody": book_request_body(),
                    "responses": {
                        "201": { "description": "Created" },
                        "422": error_response("Validation error")
                    }
                }
            },
            "/books/update-book": {
                "put": {
                    "summary": "Replace a book",
                    "tags": ["Books"],
                    "requestBody": book_request_body(),
                    "responses": {
                        "204": { "description": "Updated" },
                        "404": error_response("Book id not found"),
                        "422": error_response("Validation error")
                    }
                }
            },
            "/books/delete-book": {
                "delete": {
                    "summary": "Delete a book",
                    "tags": ["Books"],
                    "parameters": [
                        {
                            "name": "book_id",
                            "in": "query",
                            "required": true,
                            "schema": { "type": "integer" }
                        }
                    ],
                    "responses": {
                        "204": { "description": "Deleted" },
                        "404": error_response("Book id not found"),
                        "422": error_response("Missing or invalid book_id")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Book": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer" },
                        "title": { "type": "string" },
                        "author": { "type": "string" },
                        "description": { "type": "string" },
                        "rating": { "type": "integer" }
                    },
                    "required": ["id", "title", "author", "description", "rating"]
                },
                "BookRequest": {
                    "type": "object",
                    "properties": {
                        "id": {
                            "type": "integer",
                            "description": "Ignored on create; selects the record on update"
                        },
                        "title": { "type": "string", "minLength": 3, "maxLength": 20 },
                        "author": { "type": "string", "minLength": 3, "maxLength": 20 },
                        "description": { "type": "string", "minLength": 3, "maxLength": 100 },
                        "rating": { "type": "integer", "minimum": 1, "maximum": 5 }
                    },
                    "required": ["title", "author", "description", "rating"],
                    "example": {
                        "title": "Dune",
                        "author": "Frank Herbert",
                        "description": "Spice and sand",
                        "rating": 5
                    }
                }
            }
        }
    })
}

/// Create the books module, seeded according to settings
pub fn create_module(seed: bool) -> std::sync::Arc<BooksModule> {
    let store = if seed {
        BookStore::seeded()
    } else {
        BookStore::new()
    };
    std::sync::Arc::new(BooksModule::new(store.into_shared()))
}
