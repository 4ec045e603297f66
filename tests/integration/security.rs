use serde_json::{json, Value};

use crate::common::TestApp;

const CSP: &str =
    "font-src 'self' https://stackpath.bootstrapcdn.com https://use.fontawesome.com data:; img-src 'self' data:;";

fn csp_of(response: &reqwest::Response) -> Option<&str> {
    response
        .headers()
        .get("content-security-policy")
        .and_then(|value| value.to_str().ok())
}

#[tokio::test]
async fn test_script_in_book_name_is_stored_escaped() {
    let app = TestApp::spawn().await;

    let book = app
        .create_book(&json!({
            "name": "<script>alert('XSS')</script>",
            "author": "Test Author",
            "year_published": 2000,
            "book_type": "2days"
        }))
        .await;

    assert_eq!(
        book["name"],
        "&lt;script&gt;alert(&#39;XSS&#39;)&lt;/script&gt;"
    );

    let page = app.get("/books/").await.text().await.unwrap();
    assert!(!page.contains("<script>alert"));
    assert!(page.contains("&lt;script&gt;alert(&#39;XSS&#39;)&lt;/script&gt;"));
}

#[tokio::test]
async fn test_sql_injection_text_is_stored_as_data() {
    let app = TestApp::spawn().await;

    let response = app
        .post_form("/customers/create", &[("name", "' OR '1'='1"), ("city", "TestCity"), ("age", "25")])
        .await;

    assert_eq!(response.status(), 201);
    let customer: Value = response.json().await.unwrap();
    assert_eq!(customer["name"], "&#39; OR &#39;1&#39;=&#39;1");

    let list: Value = app.get("/customers/json").await.json().await.unwrap();
    assert_eq!(list["customers"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_markup_in_edit_is_escaped() {
    let app = TestApp::spawn().await;
    let book = app
        .create_book(&json!({"name": "Plain", "year_published": 2000, "book_type": "5days"}))
        .await;

    let response = app
        .post_json(
            &format!("/books/{}/edit", book["id"]),
            &json!({
                "name": "<iframe src='javascript:alert(1)'>",
                "author": "<img src=x onerror=alert(1)>",
                "year_published": 2000,
                "book_type": "5days"
            }),
        )
        .await;

    assert_eq!(response.status(), 200);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["name"], "&lt;iframe src=&#39;javascript:alert(1)&#39;&gt;");
    assert_eq!(updated["author"], "&lt;img src=x onerror=alert(1)&gt;");
}

#[tokio::test]
async fn test_loan_fields_are_escaped() {
    let app = TestApp::spawn().await;
    app.create_book(&json!({
        "name": "Tom & Jerry",
        "author": "<b>Hanna</b>",
        "year_published": 1940,
        "book_type": "2days"
    }))
    .await;

    let response = app
        .post_json(
            "/loans/create",
            &json!({
                "customer_name": "<svg onload=alert(1)>",
                "book_name": "Tom & Jerry",
                "loan_date": "2024-03-01",
                "return_date": "2024-03-03"
            }),
        )
        .await;

    assert_eq!(response.status(), 201);
    let loan: Value = response.json().await.unwrap();
    assert_eq!(loan["customer_name"], "&lt;svg onload=alert(1)&gt;");
    assert_eq!(loan["book_name"], "Tom &amp; Jerry");
    // Copied from the stored book, so escaped once and only once
    assert_eq!(loan["original_author"], "&lt;b&gt;Hanna&lt;/b&gt;");

    let page = app.get("/loans/").await.text().await.unwrap();
    assert!(!page.contains("<svg onload"));
    assert!(page.contains("&lt;svg onload=alert(1)&gt;"));
}

#[tokio::test]
async fn test_reflected_search_is_escaped() {
    let app = TestApp::spawn().await;

    let page = app
        .client
        .get(app.url("/books/"))
        .query(&[("search", "<script>alert(1)</script>")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(!page.contains("<script>alert(1)</script>"));
    assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
}

#[tokio::test]
async fn test_search_matches_escaped_names() {
    let app = TestApp::spawn().await;
    app.create_book(&json!({"name": "At Swim-Two-Birds", "author": "Flann O'Brien", "year_published": 1939, "book_type": "5days"}))
        .await;
    app.create_book(&json!({"name": "Ulysses", "year_published": 1922, "book_type": "10days"}))
        .await;

    let page = app
        .client
        .get(app.url("/books/"))
        .query(&[("search", "Swim")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(page.contains("At Swim-Two-Birds"));
    assert!(!page.contains("Ulysses"));

    app.create_book(&json!({"name": "Rock 'n' Roll", "year_published": 2006, "book_type": "2days"}))
        .await;
    let page = app
        .client
        .get(app.url("/books/"))
        .query(&[("search", "'n'")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Rock &#39;n&#39; Roll"));
}

#[tokio::test]
async fn test_csp_header_on_every_response() {
    let app = TestApp::spawn().await;

    let home = app.get("/").await;
    assert_eq!(home.status(), 200);
    assert_eq!(csp_of(&home), Some(CSP));

    let json_list = app.get("/books/json").await;
    assert_eq!(csp_of(&json_list), Some(CSP));

    let invalid = app
        .post_json("/books/create", &json!({"name": "", "year_published": 1, "book_type": "2days"}))
        .await;
    assert_eq!(invalid.status(), 400);
    assert_eq!(csp_of(&invalid), Some(CSP));

    let missing = app.get("/no/such/page").await;
    assert_eq!(missing.status(), 404);
    assert_eq!(csp_of(&missing), Some(CSP));

    let wrong_method = app.get("/books/create").await;
    assert_eq!(wrong_method.status(), 405);
    assert_eq!(csp_of(&wrong_method), Some(CSP));
}

#[tokio::test]
async fn test_unsupported_body_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(app.url("/books/create"))
        .header("content-type", "text/plain")
        .body("name=Dune")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    assert_eq!(csp_of(&response), Some(CSP));
}
