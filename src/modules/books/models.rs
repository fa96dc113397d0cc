use serde::{Deserialize, Serialize};
use validator::Validate;

/// A book held in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Identifier assigned by the store
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: String,
    /// Reader rating from 1 to 5
    pub rating: i64,
}

/// Payload accepted by create and update.
///
/// `id` is ignored on create and selects the target record on update.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BookRequest {
    #[serde(default)]
    pub id: Option<i64>,
    #[validate(length(min = 3, max = 20))]
    pub title: String,
    #[validate(length(min = 3, max = 20))]
    pub author: String,
    #[validate(length(min = 3, max = 100))]
    pub description: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: i64,
}

impl BookRequest {
    /// Build the stored record under the given id.
    pub fn into_book(self, id: i64) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            description: self.description,
            rating: self.rating,
        }
    }
}

/// Optional narrowing criteria for `GET /books/`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BookFilter {
    #[validate(length(min = 1, max = 10))]
    pub author: Option<String>,
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i64>,
    #[validate(length(min = 1, max = 10))]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct TitlePath {
    #[validate(length(min = 3, max = 20))]
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteBookParams {
    pub book_id: i64,
}

/// Records every fresh catalogue starts with.
pub fn seed_books() -> Vec<Book> {
    [
        (1, "Title1", "Author1", 5),
        (2, "Title2", "Author2", 4),
        (3, "Title3", "Author2", 3),
        (4, "Title4", "Author4", 2),
        (5, "Title5", "Author3", 5),
    ]
    .into_iter()
    .map(|(id, title, author, rating)| Book {
        id,
        title: title.to_string(),
        author: author.to_string(),
        description: "Description".to_string(),
        rating,
    })
    .collect()
}
