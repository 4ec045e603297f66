use serde_json::{json, Value};

use crate::common::TestApp;

async fn dune(app: &TestApp) -> Value {
    app.create_book(&json!({
        "name": "Dune",
        "author": "Frank Herbert",
        "year_published": 1965,
        "book_type": "10days"
    }))
    .await
}

fn loan_for(book_name: &str) -> Value {
    json!({
        "customer_name": "Ada Lovelace",
        "book_name": book_name,
        "loan_date": "2024-03-01",
        "return_date": "2024-03-11"
    })
}

#[tokio::test]
async fn test_loan_copies_book_and_marks_it_unavailable() {
    let app = TestApp::spawn().await;
    let book = dune(&app).await;

    let response = app.post_json("/loans/create", &loan_for("Dune")).await;

    assert_eq!(response.status(), 201);
    let loan: Value = response.json().await.unwrap();
    assert_eq!(loan["customer_name"], "Ada Lovelace");
    assert_eq!(loan["book_name"], "Dune");
    assert_eq!(loan["loan_date"], "2024-03-01");
    assert_eq!(loan["return_date"], "2024-03-11");
    assert_eq!(loan["original_author"], "Frank Herbert");
    assert_eq!(loan["original_year_published"], 1965);
    assert_eq!(loan["original_book_type"], "10days");

    let stored = app
        .repository
        .books
        .get_by_id(book["id"].as_i64().unwrap())
        .await
        .unwrap();
    assert_eq!(stored.status.as_str(), "unavailable");
}

#[tokio::test]
async fn test_second_loan_of_same_book_conflicts() {
    let app = TestApp::spawn().await;
    dune(&app).await;

    let first = app.post_json("/loans/create", &loan_for("Dune")).await;
    assert_eq!(first.status(), 201);

    let second = app.post_json("/loans/create", &loan_for("Dune")).await;
    assert_eq!(second.status(), 409);
    let body: Value = second.json().await.unwrap();
    assert_eq!(body["error"], "BookNotAvailable");

    let list: Value = app.get("/loans/json").await.json().await.unwrap();
    assert_eq!(list["loans"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_loan_of_unknown_book_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app.post_json("/loans/create", &loan_for("Missing")).await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["fields"]["book_name"], "Book not found");
}

#[tokio::test]
async fn test_loan_by_book_id() {
    let app = TestApp::spawn().await;
    let first = dune(&app).await;
    let second = dune(&app).await;
    let second_id = second["id"].as_i64().unwrap().to_string();

    let response = app
        .post_form(
            "/loans/create",
            &[
                ("customer_name", "Ada Lovelace"),
                ("book_id", second_id.as_str()),
                ("loan_date", "2024-03-01"),
                ("return_date", "2024-03-06"),
            ],
        )
        .await;
    assert_eq!(response.status(), 201);

    let books = &app.repository.books;
    let first = books.get_by_id(first["id"].as_i64().unwrap()).await.unwrap();
    let second = books.get_by_id(second["id"].as_i64().unwrap()).await.unwrap();
    assert_eq!(first.status.as_str(), "available");
    assert_eq!(second.status.as_str(), "unavailable");

    let response = app
        .post_json(
            "/loans/create",
            &json!({
                "customer_name": "Ada Lovelace",
                "book_id": 999,
                "loan_date": "2024-03-01",
                "return_date": "2024-03-06"
            }),
        )
        .await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["fields"]["book_id"], "Book not found");
}

#[tokio::test]
async fn test_name_lookup_skips_lent_copies() {
    let app = TestApp::spawn().await;
    dune(&app).await;
    dune(&app).await;

    assert_eq!(app.post_json("/loans/create", &loan_for("Dune")).await.status(), 201);
    assert_eq!(app.post_json("/loans/create", &loan_for("Dune")).await.status(), 201);
    assert_eq!(app.post_json("/loans/create", &loan_for("Dune")).await.status(), 409);
}

#[tokio::test]
async fn test_book_edit_does_not_rewrite_loan() {
    let app = TestApp::spawn().await;
    let book = dune(&app).await;
    let loan: Value = app
        .post_json("/loans/create", &loan_for("Dune"))
        .await
        .json()
        .await
        .unwrap();

    let response = app
        .post_json(
            &format!("/books/{}/edit", book["id"]),
            &json!({"name": "Dune Messiah", "author": "Brian Herbert", "year_published": 1969, "book_type": "2days"}),
        )
        .await;
    assert_eq!(response.status(), 200);

    let stored = app
        .repository
        .loans
        .get_by_id(loan["id"].as_i64().unwrap())
        .await
        .unwrap();
    assert_eq!(stored.book_name, "Dune");
    assert_eq!(stored.original_author, "Frank Herbert");
    assert_eq!(stored.original_year_published, 1965);
    assert_eq!(stored.original_book_type.as_str(), "10days");
}

#[tokio::test]
async fn test_invalid_dates_are_rejected() {
    let app = TestApp::spawn().await;
    dune(&app).await;

    let response = app
        .post_json(
            "/loans/create",
            &json!({
                "customer_name": "Ada Lovelace",
                "book_name": "Dune",
                "loan_date": "yesterday"
            }),
        )
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["fields"]["loan_date"], "Not a valid date value");
    assert_eq!(body["fields"]["return_date"], "Return date is required");
}

#[tokio::test]
async fn test_edit_loan() {
    let app = TestApp::spawn().await;
    let book = dune(&app).await;
    let loan: Value = app
        .post_json("/loans/create", &loan_for("Dune"))
        .await
        .json()
        .await
        .unwrap();

    let response = app
        .post_json(
            &format!("/loans/{}/edit", loan["id"]),
            &json!({
                "customer_name": "Charles Babbage",
                "book_name": "Dune",
                "loan_date": "2024-03-02",
                "return_date": "2024-03-12",
                "original_author": "Frank Herbert",
                "original_year_published": 1965,
                "original_book_type": "5days"
            }),
        )
        .await;

    assert_eq!(response.status(), 200);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["customer_name"], "Charles Babbage");
    assert_eq!(updated["loan_date"], "2024-03-02");
    assert_eq!(updated["original_book_type"], "5days");

    // Editing a loan leaves the book lent
    let stored = app
        .repository
        .books
        .get_by_id(book["id"].as_i64().unwrap())
        .await
        .unwrap();
    assert_eq!(stored.status.as_str(), "unavailable");
}

#[tokio::test]
async fn test_edit_loan_requires_snapshot_fields() {
    let app = TestApp::spawn().await;
    dune(&app).await;
    let loan: Value = app
        .post_json("/loans/create", &loan_for("Dune"))
        .await
        .json()
        .await
        .unwrap();

    let response = app
        .post_json(&format!("/loans/{}/edit", loan["id"]), &loan_for("Dune"))
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["fields"]["original_author"], "Author is required");
    assert_eq!(body["fields"]["original_year_published"], "Year is required");
}

#[tokio::test]
async fn test_edit_missing_loan_is_not_found() {
    let app = TestApp::spawn().await;

    let response = app.post_json("/loans/7/edit", &loan_for("Dune")).await;

    assert_eq!(response.status(), 404);
}
