use crate::helpers::{ids, spawn_app, spawn_app_with_seed};
use axum::http::{Method, StatusCode};
use serde_json::json;

fn new_book(title: &str) -> serde_json::Value {
    json!({
        "title": title,
        "author": "Frank Herbert",
        "description": "Spice and sand",
        "rating": 4
    })
}

#[tokio::test]
async fn list_returns_seed_in_order() {
    let app = spawn_app();

    let response = app.get("/books").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(ids(&response.body), vec![1, 2, 3, 4, 5]);
    assert_eq!(
        response.body[0],
        json!({
            "id": 1,
            "title": "Title1",
            "author": "Author1",
            "description": "Description",
            "rating": 5
        })
    );
}

#[tokio::test]
async fn repeated_lists_are_identical() {
    let app = spawn_app();

    let first = app.get("/books").await;
    let second = app.get("/books").await;

    assert_eq!(first.body, second.body);
}

#[tokio::test]
async fn filter_by_author_ignores_case() {
    let app = spawn_app();

    for author in ["Author2", "author2"] {
        let response = app.get(&format!("/books/?author={author}")).await;

        assert_eq!(response.status, StatusCode::OK);
        let titles: Vec<&str> = response
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|book| book["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Title2", "Title3"]);
    }
}

#[tokio::test]
async fn filter_by_rating() {
    let app = spawn_app();

    let response = app.get("/books/?rating=5").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(ids(&response.body), vec![1, 5]);
}

#[tokio::test]
async fn filter_combines_criteria() {
    let app = spawn_app();

    let response = app.get("/books/?author=AUTHOR2&rating=4&title=title2").await;
    assert_eq!(ids(&response.body), vec![2]);

    let response = app.get("/books/?author=Author2&rating=5").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!([]));
}

#[tokio::test]
async fn filter_without_criteria_returns_everything() {
    let app = spawn_app();

    let response = app.get("/books/").await;

    assert_eq!(ids(&response.body), vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn filter_rejects_out_of_range_rating() {
    let app = spawn_app();

    let response = app.get("/books/?rating=6").await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["error"]["code"], "validation_error");
    assert_eq!(response.body["error"]["details"][0]["field"], "rating");
}

#[tokio::test]
async fn filter_rejects_non_numeric_rating() {
    let app = spawn_app();

    let response = app.get("/books/?rating=five").await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn favourite_is_first_book() {
    let app = spawn_app();

    let response = app.get("/books/Mybook").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], 1);
    assert_eq!(response.body["title"], "Title1");
}

#[tokio::test]
async fn favourite_of_empty_catalogue_is_not_found() {
    let app = spawn_app_with_seed(false);

    let response = app.get("/books/Mybook").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"]["code"], "not_found");
}

#[tokio::test]
async fn lookup_by_title_ignores_case() {
    let app = spawn_app();

    let response = app.get("/books/tItLe3").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], 3);
    assert_eq!(response.body["author"], "Author2");
}

#[tokio::test]
async fn lookup_of_unknown_title_is_not_found() {
    let app = spawn_app();

    let response = app.get("/books/Unwritten").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"]["message"], "No book titled 'Unwritten'");
}

#[tokio::test]
async fn lookup_rejects_short_title() {
    let app = spawn_app();

    let response = app.get("/books/ab").await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["error"]["details"][0]["field"], "title");
}

#[tokio::test]
async fn create_assigns_next_id_and_appends() {
    let app = spawn_app();

    let response = app
        .request(Method::POST, "/books/create-book", Some(new_book("Dune")))
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response.raw.is_empty());

    let listed = app.get("/books").await;
    assert_eq!(ids(&listed.body), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(listed.body[5]["title"], "Dune");
}

#[tokio::test]
async fn create_ignores_supplied_id() {
    let app = spawn_app();
    let mut payload = new_book("Dune");
    payload["id"] = json!(99);

    let response = app
        .request(Method::POST, "/books/create-book", Some(payload))
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(app.store.read().await.list()[5].id, 6);
}

#[tokio::test]
async fn create_on_empty_catalogue_starts_at_one() {
    let app = spawn_app_with_seed(false);

    app.request(Method::POST, "/books/create-book", Some(new_book("Dune")))
        .await;

    let listed = app.get("/books").await;
    assert_eq!(ids(&listed.body), vec![1]);
}

#[tokio::test]
async fn create_with_short_title_fails_without_mutation() {
    let app = spawn_app();

    let response = app
        .request(Method::POST, "/books/create-book", Some(new_book("ab")))
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["error"]["details"][0]["field"], "title");
    assert_eq!(response.body["error"]["details"][0]["error"], "length");
    assert_eq!(app.store.read().await.len(), 5);
}

#[tokio::test]
async fn create_with_bad_rating_fails() {
    let app = spawn_app();
    let mut payload = new_book("Dune");
    payload["rating"] = json!(0);

    let response = app
        .request(Method::POST, "/books/create-book", Some(payload))
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.store.read().await.len(), 5);
}

#[tokio::test]
async fn create_with_missing_field_fails() {
    let app = spawn_app();

    let response = app
        .request(
            Method::POST,
            "/books/create-book",
            Some(json!({ "title": "Dune", "rating": 3 })),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["error"]["details"][0]["field"], "body");
    assert_eq!(app.store.read().await.len(), 5);
}

#[tokio::test]
async fn update_replaces_matching_book() {
    let app = spawn_app();
    let mut payload = new_book("Dune");
    payload["id"] = json!(2);

    let response = app
        .request(Method::PUT, "/books/update-book", Some(payload))
        .await;

    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert_eq!(
        app.titles().await,
        vec!["Title1", "Dune", "Title3", "Title4", "Title5"]
    );
}

#[tokio::test]
async fn update_unknown_id_is_not_found_and_harmless() {
    let app = spawn_app();
    let before = app.get("/books").await;
    let mut payload = new_book("Dune");
    payload["id"] = json!(42);

    let response = app
        .request(Method::PUT, "/books/update-book", Some(payload))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"]["message"], "Book id 42 not found");
    assert_eq!(app.get("/books").await.body, before.body);
}

#[tokio::test]
async fn update_without_id_is_not_found() {
    let app = spawn_app();

    let response = app
        .request(Method::PUT, "/books/update-book", Some(new_book("Dune")))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_validates_payload() {
    let app = spawn_app();
    let mut payload = new_book("D");
    payload["id"] = json!(1);

    let response = app
        .request(Method::PUT, "/books/update-book", Some(payload))
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.titles().await[0], "Title1");
}

#[tokio::test]
async fn delete_removes_one_book() {
    let app = spawn_app();

    let response = app
        .request(Method::DELETE, "/books/delete-book?book_id=3", None)
        .await;

    assert_eq!(response.status, StatusCode::NO_CONTENT);
    let listed = app.get("/books").await;
    assert_eq!(ids(&listed.body), vec![1, 2, 4, 5]);
}

#[tokio::test]
async fn delete_unknown_id_is_not_found() {
    let app = spawn_app();

    let response = app
        .request(Method::DELETE, "/books/delete-book?book_id=77", None)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(app.store.read().await.len(), 5);
}

#[tokio::test]
async fn delete_requires_book_id() {
    let app = spawn_app();

    let response = app.request(Method::DELETE, "/books/delete-book", None).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["error"]["details"][0]["field"], "query");
}

#[tokio::test]
async fn deleting_the_tail_reuses_its_id() {
    let app = spawn_app();

    app.request(Method::DELETE, "/books/delete-book?book_id=5", None)
        .await;
    app.request(Method::POST, "/books/create-book", Some(new_book("Dune")))
        .await;

    let listed = app.get("/books").await;
    assert_eq!(ids(&listed.body), vec![1, 2, 3, 4, 5]);
    assert_eq!(listed.body[4]["title"], "Dune");
}

#[tokio::test]
async fn title_matching_uses_full_case_folding() {
    let app = spawn_app();
    app.request(Method::POST, "/books/create-book", Some(new_book("Straße")))
        .await;

    let response = app.get("/books/STRASSE").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], 6);
    assert_eq!(response.body["title"], "Straße");

    let response = app.get("/books/?title=strasse").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(ids(&response.body), vec![6]);
}

#[tokio::test]
async fn action_paths_are_not_title_lookups() {
    let app = spawn_app();

    for path in [
        "/books/create-book",
        "/books/update-book",
        "/books/delete-book",
    ] {
        let response = app.get(path).await;
        assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED, "{path}");
    }
}

#[tokio::test]
async fn rating_must_be_a_json_integer() {
    let app = spawn_app();

    for rating in [json!("5"), json!(5.0)] {
        let mut payload = new_book("Dune");
        payload["rating"] = rating;

        let response = app
            .request(Method::POST, "/books/create-book", Some(payload))
            .await;

        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.body["error"]["details"][0]["field"], "body");
    }
    assert_eq!(app.store.read().await.len(), 5);
}
