//! Ledger entry and summary endpoint tests.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::{Value, json};

use common::TestApp;

fn entry(date: &str, kind: &str, category: i32, amount: i64) -> Value {
    json!({
        "transactionDate": date,
        "jenis": kind,
        "kategoriId": category,
        "nominal": amount,
    })
}

async fn post_entry(app: &TestApp, body: Value) -> (StatusCode, Value) {
    app.send(Method::POST, "/transactions", Some(&app.treasurer), Some(body))
        .await
}

async fn balance(app: &TestApp) -> i64 {
    let (status, body) = app.send(Method::GET, "/summary", Some(&app.member), None).await;
    assert_eq!(status, StatusCode::OK);
    body["totalSaldo"].as_i64().unwrap()
}

#[tokio::test]
async fn test_create_entry_view() {
    let app = TestApp::new().await;
    let infaq = app.category("Infaq").await;

    let mut body = entry("2024-01-05", "income", infaq, 300_000);
    body["keterangan"] = json!("  Kotak Jumat  ");
    let (status, created) = post_entry(&app, body).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
    assert_eq!(created["transactionDate"], "2024-01-05");
    assert_eq!(created["jenis"], "INCOME");
    assert_eq!(created["nominal"], 300_000);
    assert_eq!(created["keterangan"], "Kotak Jumat");
    assert_eq!(created["kategoriId"], infaq);
    assert_eq!(created["kategoriNama"], "Infaq");
    assert_eq!(created["dicatatOleh"], app.treasurer_id);
    assert_eq!(created["dicatatOlehNama"], "bendahara");
    assert!(created["tglPencatatan"].is_string());
}

#[tokio::test]
async fn test_scenario_expenses_bounded_by_balance() {
    let app = TestApp::new().await;
    let cat = app.category("Operasional").await;

    let (status, body) = post_entry(&app, entry("2024-01-01", "EXPENSE", cat, 100)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INSUFFICIENT_BALANCE");
    assert_eq!(body["saldoSekarang"], 0);

    let (status, _) = post_entry(&app, entry("2024-01-01", "INCOME", cat, 500)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(balance(&app).await, 500);

    let (status, _) = post_entry(&app, entry("2024-01-02", "EXPENSE", cat, 500)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(balance(&app).await, 0);

    let (status, body) = post_entry(&app, entry("2024-01-03", "EXPENSE", cat, 1)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["saldoSekarang"], 0);
}

#[tokio::test]
async fn test_create_validation_errors() {
    let app = TestApp::new().await;
    let cat = app.category("Infaq").await;

    let cases = [
        (json!({ "jenis": "INCOME", "kategoriId": cat, "nominal": 1 }), "INCOMPLETE_ENTRY"),
        (entry("2024-01-01", "INCOME", 0, 1), "INCOMPLETE_ENTRY"),
        (entry("2024-01-01", "DONATION", cat, 1), "INVALID_KIND"),
        (entry("2024-13-01", "INCOME", cat, 1), "VALIDATION_ERROR"),
        (entry("2024-01-01", "INCOME", cat, -5), "NEGATIVE_AMOUNT"),
        (entry("2024-01-01", "INCOME", 999, 1), "CATEGORY_NOT_FOUND"),
    ];

    for (body, code) in cases {
        let (status, response) = post_entry(&app, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{code}");
        assert_eq!(response["error"], code);
    }
    assert_eq!(balance(&app).await, 0);
}

#[tokio::test]
async fn test_amend_income_into_expense_rejected() {
    let app = TestApp::new().await;
    let cat = app.category("Infaq").await;
    post_entry(&app, entry("2024-01-01", "INCOME", cat, 1000)).await;

    let (status, body) = app
        .send(
            Method::PUT,
            "/transactions/1",
            Some(&app.treasurer),
            Some(entry("2024-01-01", "EXPENSE", cat, 1000)),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INSUFFICIENT_BALANCE");
    assert_eq!(body["saldoSekarang"], 0);
    assert_eq!(balance(&app).await, 1000);
}

#[tokio::test]
async fn test_amend_entry() {
    let app = TestApp::new().await;
    let cat = app.category("Infaq").await;
    let (_, created) = post_entry(&app, entry("2024-01-01", "INCOME", cat, 1000)).await;

    let (status, amended) = app
        .send(
            Method::PUT,
            "/transactions/1",
            Some(&app.treasurer),
            Some(entry("2024-01-02", "INCOME", cat, 1200)),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(amended["nominal"], 1200);
    assert_eq!(amended["transactionDate"], "2024-01-02");
    assert_eq!(amended["dicatatOleh"], created["dicatatOleh"]);
    assert_eq!(amended["tglPencatatan"], created["tglPencatatan"]);
}

#[tokio::test]
async fn test_amend_errors() {
    let app = TestApp::new().await;
    let cat = app.category("Infaq").await;

    let (status, body) = app
        .send(
            Method::PUT,
            "/transactions/abc",
            Some(&app.treasurer),
            Some(entry("2024-01-01", "INCOME", cat, 1)),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_ID");

    let (status, body) = app
        .send(
            Method::PUT,
            "/transactions/77",
            Some(&app.treasurer),
            Some(entry("2024-01-01", "INCOME", cat, 1)),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "ENTRY_NOT_FOUND");
}

#[tokio::test]
async fn test_delete_disabled_by_default() {
    let app = TestApp::new().await;
    let cat = app.category("Infaq").await;
    post_entry(&app, entry("2024-01-01", "INCOME", cat, 1000)).await;

    let (status, body) = app
        .send(Method::DELETE, "/transactions/x", Some(&app.treasurer), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_ID");

    let (status, body) = app
        .send(Method::DELETE, "/transactions/1", Some(&app.treasurer), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "ENTRY_DELETION_DISABLED");
    assert_eq!(balance(&app).await, 1000);
}

#[tokio::test]
async fn test_delete_when_enabled() {
    let app = TestApp::with_deletion(true).await;
    let cat = app.category("Infaq").await;
    post_entry(&app, entry("2024-01-01", "INCOME", cat, 1000)).await;
    post_entry(&app, entry("2024-01-02", "EXPENSE", cat, 600)).await;

    let (status, body) = app
        .send(Method::DELETE, "/transactions/1", Some(&app.treasurer), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["saldoSekarang"], -600);

    let (status, _) = app
        .send(Method::DELETE, "/transactions/2", Some(&app.treasurer), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(balance(&app).await, 1000);

    let (status, _) = app
        .send(Method::DELETE, "/transactions/2", Some(&app.treasurer), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_history_filters() {
    let app = TestApp::new().await;
    let infaq = app.category("Infaq").await;
    let listrik = app.category("Listrik").await;
    post_entry(&app, entry("2024-03-01", "INCOME", infaq, 1000)).await;
    post_entry(&app, entry("2024-03-04", "EXPENSE", listrik, 250)).await;
    post_entry(&app, entry("2024-03-04", "INCOME", infaq, 50)).await;

    let (status, all) = app
        .send(Method::GET, "/transactions", Some(&app.member), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 2, 1]);

    let (_, expenses) = app
        .send(Method::GET, "/transactions?jenis=expense", Some(&app.member), None)
        .await;
    assert_eq!(expenses.as_array().unwrap().len(), 1);
    assert_eq!(expenses[0]["kategoriNama"], "Listrik");

    // Unknown kinds are ignored rather than rejected.
    let (status, unfiltered) = app
        .send(Method::GET, "/transactions?jenis=hibah", Some(&app.member), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unfiltered.as_array().unwrap().len(), 3);

    let uri = format!("/transactions?startDate=2024-03-02&kategoriId={infaq}");
    let (_, filtered) = app.send(Method::GET, &uri, Some(&app.member), None).await;
    assert_eq!(filtered.as_array().unwrap().len(), 1);
    assert_eq!(filtered[0]["id"], 3);

    let (status, body) = app
        .send(Method::GET, "/transactions?kategoriId=abc", Some(&app.member), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_summary_overall_totals() {
    let app = TestApp::new().await;
    let cat = app.category("Infaq").await;
    post_entry(&app, entry("2024-01-05", "INCOME", cat, 300)).await;
    post_entry(&app, entry("2024-02-10", "EXPENSE", cat, 100)).await;

    let (status, body) = app.send(Method::GET, "/summary", Some(&app.member), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "totalPemasukan": 300, "totalPengeluaran": 100, "totalSaldo": 200 })
    );
}

#[tokio::test]
async fn test_income_total_overflow_rejected() {
    let app = TestApp::new().await;
    let infaq = app.category("Infaq").await;

    let (status, _) = post_entry(&app, entry("2024-01-05", "INCOME", infaq, i64::MAX)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post_entry(&app, entry("2024-01-06", "INCOME", infaq, 1)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "AMOUNT_TOO_LARGE");

    assert_eq!(balance(&app).await, i64::MAX);
    let (status, _) = post_entry(&app, entry("2024-01-07", "EXPENSE", infaq, 5)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(balance(&app).await, i64::MAX - 5);
}

#[tokio::test]
async fn test_token_of_deleted_user_cannot_record() {
    let app = TestApp::new().await;
    let infaq = app.category("Infaq").await;

    let uri = format!("/users/{}", app.treasurer_id);
    let (status, _) = app.send(Method::DELETE, &uri, Some(&app.chair), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post_entry(&app, entry("2024-01-05", "INCOME", infaq, 100)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "RECORDER_NOT_FOUND");
    assert_eq!(balance(&app).await, 0);
}
