//! Period report endpoint tests.

mod common;

use axum::http::{Method, StatusCode, header};
use serde_json::json;

use common::TestApp;

async fn seed_entries(app: &TestApp) {
    let cat = app.category("Infaq").await;
    for (date, kind, amount) in [
        ("2024-01-05", "INCOME", 300),
        ("2024-02-10", "EXPENSE", 100),
    ] {
        let (status, _) = app
            .send(
                Method::POST,
                "/transactions",
                Some(&app.treasurer),
                Some(json!({
                    "transactionDate": date,
                    "jenis": kind,
                    "kategoriId": cat,
                    "nominal": amount,
                    "keterangan": "Kas, \"Jumat\"",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

#[tokio::test]
async fn test_january_report() {
    let app = TestApp::new().await;
    seed_entries(&app).await;

    let (status, body) = app
        .send(
            Method::GET,
            "/reports?startDate=2024-01-01&endDate=2024-01-31",
            Some(&app.treasurer),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["startDate"], "2024-01-01");
    assert_eq!(body["endDate"], "2024-01-31");
    assert_eq!(body["totalPemasukan"], 300);
    assert_eq!(body["totalPengeluaran"], 0);
    assert_eq!(body["saldoPeriode"], 300);
    assert_eq!(body["transaksi"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_report_period_validation() {
    let app = TestApp::new().await;
    seed_entries(&app).await;

    let (status, body) = app
        .send(
            Method::GET,
            "/reports?startDate=2024-02-01&endDate=2024-01-01",
            Some(&app.treasurer),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_DATE_RANGE");

    let (status, body) = app
        .send(Method::GET, "/reports?startDate=2024-02-01", Some(&app.treasurer), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_printable_report_is_attachment() {
    let app = TestApp::new().await;
    seed_entries(&app).await;

    let (status, headers, bytes) = app
        .send_raw(
            Method::GET,
            "/reports/print?startDate=2024-01-01&endDate=2024-02-29",
            Some(&app.treasurer),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/plain; charset=utf-8");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"laporan_kas_2024-01-01_sd_2024-02-29.txt\""
    );
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.contains("LAPORAN KAS"));
    assert!(text.contains("Periode: 2024-01-01 s/d 2024-02-29"));
    assert!(text.contains("Rp 200"));
}

#[tokio::test]
async fn test_csv_export() {
    let app = TestApp::new().await;
    seed_entries(&app).await;

    let (status, headers, bytes) = app
        .send_raw(
            Method::GET,
            "/reports/csv?startDate=2024-01-01&endDate=2024-12-31",
            Some(&app.treasurer),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/csv; charset=utf-8");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"laporan_kas_2024-01-01_sd_2024-12-31.csv\""
    );
    let csv = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].contains("\"Kas, \"\"Jumat\"\"\""));
}
