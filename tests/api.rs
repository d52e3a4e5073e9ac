// tests/api.rs
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use member_scrape::api::build_router;
use member_scrape::config::{RoleTable, ScrapeOptions};
use member_scrape::core::Fetch;
use member_scrape::error::FetchError;
use member_scrape::member::MemberRecord;
use member_scrape::normalize::Normalizer;
use member_scrape::service::DirectoryService;
use member_scrape::store::MemberStore;

const LISTING: &str = r#"<script id="__NEXT_DATA__" type="application/json">
    {"props":{"pageProps":{"members":[
      {"display_name":"Ann Lee","position":"CTO @ Northwind"},
      {"display_name":"Cy Fox","position":"Researcher @ Blue Harbor Labs"}
    ]}}}
</script>"#;

/// Serves the same listing for every URL and counts calls.
#[derive(Default)]
struct CountingSite {
    calls: AtomicUsize,
}

impl Fetch for CountingSite {
    fn fetch(&self, _url: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(LISTING.to_string())
    }
}

fn service(site: Arc<CountingSite>) -> Arc<DirectoryService> {
    let opts = ScrapeOptions { base_url: "https://dir.test".into(), request_pause_ms: 0, ..ScrapeOptions::default() };
    let normalizer = Normalizer::new("https://dir.test", RoleTable::builtin());
    Arc::new(DirectoryService::new(opts, site, normalizer))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes().to_vec();
    (status, body)
}

fn json(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn members_listing_is_a_bare_array_with_ids() {
    let app = build_router(service(Arc::default()));
    let (status, body) = get(app, "/members").await;
    assert_eq!(status, StatusCode::OK);

    let v = json(&body);
    let arr = v.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["id"], "ann-lee");
    assert_eq!(arr[0]["company"], "Northwind");
    assert!(arr[0]["email"].is_null());
}

#[tokio::test]
async fn search_matches_company_field() {
    let app = build_router(service(Arc::default()));
    let (status, body) = get(app, "/members/search?q=harbor").await;
    assert_eq!(status, StatusCode::OK);
    let v = json(&body);
    assert_eq!(v.as_array().unwrap().len(), 1);
    assert_eq!(v[0]["name"], "Cy Fox");
}

#[tokio::test]
async fn search_without_query_is_bad_request() {
    let svc = service(Arc::default());
    for uri in ["/members/search", "/members/search?q=", "/members/search?q=%20%20"] {
        let (status, body) = get(build_router(svc.clone()), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(json(&body)["error"], "Query parameter 'q' is required");
    }
}

#[tokio::test]
async fn status_and_health_never_scrape() {
    let site = Arc::new(CountingSite::default());
    let svc = service(site.clone());

    let (status, body) = get(build_router(svc.clone()), "/status").await;
    assert_eq!(status, StatusCode::OK);
    let v = json(&body);
    assert_eq!(v["loaded"], false);
    assert_eq!(v["total_members"], 0);
    assert_eq!(v["version"], env!("CARGO_PKG_VERSION"));

    let (status, _) = get(build_router(svc.clone()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(site.calls.load(Ordering::SeqCst), 0);

    get(build_router(svc.clone()), "/members").await;
    let (_, body) = get(build_router(svc), "/status").await;
    assert_eq!(json(&body)["total_members"], 2);
    assert_eq!(site.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn export_streams_csv_with_attachment_header() {
    let app = build_router(service(Arc::default()));
    let resp = app.oneshot(Request::get("/members/export/csv").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_string();
    assert_eq!(disposition, "attachment; filename=\"members.csv\"");

    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(body.to_vec()).unwrap();
    let mut lines = text.lines();
    assert!(lines.next().unwrap().starts_with("name,title,company"));
    assert_eq!(lines.next().unwrap(), "Ann Lee,CTO,Northwind,,,,,,,,Standard Member,");
}

#[tokio::test]
async fn unknown_export_format_is_bad_request() {
    let (status, body) = get(build_router(service(Arc::default())), "/members/export/xml").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&body)["error"], "Unknown export format: xml");
}

#[tokio::test]
async fn refresh_replaces_a_preloaded_store() {
    let site = Arc::new(CountingSite::default());
    let preloaded = MemberStore::new(vec![MemberRecord::new("Old Timer")]);
    let svc = Arc::new(
        Arc::into_inner(service(site.clone())).unwrap().with_store(preloaded),
    );

    let (_, body) = get(build_router(svc.clone()), "/members").await;
    assert_eq!(json(&body)[0]["name"], "Old Timer");
    assert_eq!(site.calls.load(Ordering::SeqCst), 0);

    let req = Request::post("/members/refresh").body(Body::empty()).unwrap();
    let (status, body) = send(build_router(svc.clone()), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["total_members"], 2);

    let (_, body) = get(build_router(svc), "/members").await;
    assert_eq!(json(&body)[0]["name"], "Ann Lee");
}
