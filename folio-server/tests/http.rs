use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::Router;
use folio_core::FolioConfig;
use folio_mail::{DeliveryReceipt, MailRelay, MailSettings, MailTransport, OutboundMail};
use folio_media::{MediaError, MediaExistence, MediaKind, MediaResult};
use folio_server::{build_with, AppState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

struct CountingTransport {
    calls: AtomicUsize,
    fail: bool,
}

#[async_trait]
impl MailTransport for CountingTransport {
    fn name(&self) -> &'static str {
        "counting"
    }

    async fn deliver(&self, _mail: &OutboundMail) -> anyhow::Result<DeliveryReceipt> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("535 authentication rejected");
        }
        Ok(DeliveryReceipt {
            message_id: "<1@test>".to_string(),
            transport: "counting",
        })
    }
}

/// Every check fails as if the media volume were unreachable.
struct MediaDown;

#[async_trait]
impl MediaExistence for MediaDown {
    async fn exists(&self, _kind: MediaKind, _filename: &str) -> MediaResult<bool> {
        Err(MediaError::unavailable("media volume offline"))
    }
}

struct Harness {
    dir: TempDir,
    mail: Arc<CountingTransport>,
    env: &'static str,
}

impl Harness {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
            mail: Arc::new(CountingTransport {
                calls: AtomicUsize::new(0),
                fail: false,
            }),
            env: "development",
        }
    }

    fn production(mut self) -> Self {
        self.env = "production";
        self
    }

    fn failing_mail(mut self) -> Self {
        self.mail = Arc::new(CountingTransport {
            calls: AtomicUsize::new(0),
            fail: true,
        });
        self
    }

    fn file(self, relative: &str, contents: &[u8]) -> Self {
        let path = self.dir.path().join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
        self
    }

    fn state(&self) -> AppState {
        let root = self.dir.path();
        let mut config = FolioConfig::new();
        config.set("app.env", self.env);
        config.set("media.root", path_str(&root.join("public")));
        config.set("client.dir", path_str(&root.join("client")));
        config.set("resume.path", path_str(&root.join("resume.pdf")));
        config.set("media.probe_timeout_ms", "500");
        folio_server::config::defaults(&mut config);

        let relay = MailRelay::new(self.mail.clone(), MailSettings::default());
        AppState::from_config(&config.snapshot())
            .unwrap()
            .with_mail(relay)
    }

    fn router(&self) -> Router {
        build_with(self.state()).into_router()
    }

    fn calls(&self) -> usize {
        self.mail.calls.load(Ordering::SeqCst)
    }
}

fn path_str(path: &Path) -> String {
    path.display().to_string()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(res: axum::response::Response) -> Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn text_body(res: axum::response::Response) -> String {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn pizzeria_media(h: Harness) -> Harness {
    h.file("public/images/projects/pizzeria-app.jpg", b"jpg")
        .file("public/images/gifs/pizzeria-app.gif", b"GIF89a")
        .file("public/images/gifs/pizzeria-app2.gif", b"GIF89a")
        .file("public/images/projects/pizzeria-app3.png", b"png")
}

#[tokio::test]
async fn health_ok() {
    let h = Harness::new();
    let res = h.router().oneshot(get("/health")).await.unwrap();

    assert_eq!(res.status().as_u16(), 200);
    assert!(res.headers().get("x-request-id").is_some());
    assert_eq!(text_body(res).await, "ok");
}

#[tokio::test]
async fn lists_projects_with_filters() {
    let h = Harness::new();

    let res = h.router().oneshot(get("/api/projects")).await.unwrap();
    assert_eq!(res.status().as_u16(), 200);
    let body = json_body(res).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
    assert_eq!(body[0]["imageUrl"], "/images/projects/pizzeria-app.jpg");

    let body = json_body(h.router().oneshot(get("/api/projects?category=backend")).await.unwrap()).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], 1);

    let body = json_body(h.router().oneshot(get("/api/projects?category=all&featured=false")).await.unwrap()).await;
    assert_eq!(body, json!([]));

    let res = h.router().oneshot(get("/api/projects?featured=maybe")).await.unwrap();
    assert_eq!(res.status().as_u16(), 400);
    assert_eq!(json_body(res).await["name"], "BadRequest");
}

#[tokio::test]
async fn single_project_by_id() {
    let h = Harness::new();
    let res = h.router().oneshot(get("/api/projects/2")).await.unwrap();

    assert_eq!(res.status().as_u16(), 200);
    let body = json_body(res).await;
    assert_eq!(body["title"], "GasWise");
    assert_eq!(body["gifUrl"], "/gifs/gaswisegif.gif");
}

#[tokio::test]
async fn unknown_project_is_404_with_message() {
    let h = Harness::new();

    for uri in ["/api/projects/999", "/api/projects/abc", "/api/projects/999/media"] {
        let res = h.router().oneshot(get(uri)).await.unwrap();
        assert_eq!(res.status().as_u16(), 404, "{uri}");
        let body = json_body(res).await;
        assert_eq!(body["message"], "Project not found");
        assert_eq!(body["name"], "NotFound");
        assert_eq!(body["className"], "not-found");
    }
}

#[tokio::test]
async fn test_routes_answer() {
    let h = Harness::new();

    let body = json_body(h.router().oneshot(get("/api/test")).await.unwrap()).await;
    assert_eq!(body["message"], "API is working!");

    let body = json_body(h.router().oneshot(get("/api/projects/test")).await.unwrap()).await;
    assert_eq!(body["message"], "Projects route is working");
    assert_eq!(body["projectCount"], 3);
}

#[tokio::test]
async fn media_gallery_is_ordered() {
    let h = pizzeria_media(Harness::new());
    let res = h.router().oneshot(get("/api/projects/1/media")).await.unwrap();

    assert_eq!(res.status().as_u16(), 200);
    let body = json_body(res).await;
    assert_eq!(
        body,
        json!([
            {"type": "image", "url": "/images/projects/pizzeria-app.jpg", "title": "Pizzeria App Main Image", "verified": true},
            {"type": "gif", "url": "/gifs/pizzeria-app.gif", "title": "Pizzeria App Animation", "verified": true},
            {"type": "gif", "url": "/gifs/pizzeria-app2.gif", "title": "Pizzeria App Animation 2", "verified": true},
            {"type": "image", "url": "/images/projects/pizzeria-app3.png", "title": "Pizzeria App Image 3", "verified": true},
        ])
    );
}

#[tokio::test]
async fn media_gallery_is_empty_without_files() {
    let h = Harness::new();
    let body = json_body(h.router().oneshot(get("/api/projects/3/media")).await.unwrap()).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn display_prefers_verified_animation() {
    let h = pizzeria_media(Harness::new());

    let body = json_body(h.router().oneshot(get("/api/projects/1/display")).await.unwrap()).await;
    assert_eq!(body, json!({"url": "/gifs/pizzeria-app.gif", "kind": "gif", "mode": "verified"}));

    let body = json_body(h.router().oneshot(get("/api/projects/1/display?kind=image")).await.unwrap()).await;
    assert_eq!(body["url"], "/images/projects/pizzeria-app.jpg");
    assert_eq!(body["kind"], "image");
}

#[tokio::test]
async fn display_falls_back_to_image_then_placeholder() {
    let h = Harness::new().file("public/images/gaswise.jpg", b"jpg");

    let body = json_body(h.router().oneshot(get("/api/projects/2/display")).await.unwrap()).await;
    assert_eq!(body["url"], "/images/projects/gaswise.jpg");
    assert_eq!(body["kind"], "image");
    assert_eq!(body["mode"], "verified");

    let body = json_body(h.router().oneshot(get("/api/projects/3/display")).await.unwrap()).await;
    assert_eq!(
        body,
        json!({"url": "/images/placeholder-project.jpg", "kind": "image", "mode": "placeholder"})
    );

    let res = h.router().oneshot(get("/api/projects/3/display?kind=video")).await.unwrap();
    assert_eq!(res.status().as_u16(), 400);
}

#[tokio::test]
async fn display_trusts_declared_reference_when_checks_are_down() {
    let h = Harness::new();
    let state = h.state().with_existence(Arc::new(MediaDown));
    let router = build_with(state).into_router();

    let body = json_body(router.clone().oneshot(get("/api/projects/1/display")).await.unwrap()).await;
    assert_eq!(body, json!({"url": "/gifs/pizzeria-app.gif", "kind": "gif", "mode": "unverified"}));

    let body = json_body(router.oneshot(get("/api/projects/1/media")).await.unwrap()).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|item| item["verified"] == false));
}

#[tokio::test]
async fn check_image_reports_file_details() {
    let h = Harness::new()
        .file("public/images/projects/a.jpg", b"12345")
        .file("public/images/logo.png", b"png");

    let res = h.router().oneshot(get("/check-image/a.jpg")).await.unwrap();
    assert_eq!(res.status().as_u16(), 200);
    let body = json_body(res).await;
    assert_eq!(body["exists"], true);
    assert_eq!(body["filename"], "a.jpg");
    assert_eq!(body["size"], 5);
    assert_eq!(body["url"], "/images/projects/a.jpg");

    let body = json_body(h.router().oneshot(get("/check-image/logo.png")).await.unwrap()).await;
    assert_eq!(body["url"], "/images/logo.png");
}

#[tokio::test]
async fn check_image_missing_lists_checked_paths() {
    let h = Harness::new();
    let res = h.router().oneshot(get("/check-image/nope.jpg")).await.unwrap();

    assert_eq!(res.status().as_u16(), 404);
    let body = json_body(res).await;
    assert_eq!(body["exists"], false);
    assert_eq!(body["message"], "Image nope.jpg not found in any image directory");
    assert_eq!(body["checkedPaths"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn check_gif_only_looks_in_gif_dir() {
    let h = Harness::new()
        .file("public/images/gifs/spin.gif", b"GIF89a")
        .file("public/images/projects/other.gif", b"GIF89a");

    let body = json_body(h.router().oneshot(get("/check-gif/spin.gif")).await.unwrap()).await;
    assert_eq!(body["exists"], true);
    assert_eq!(body["url"], "/gifs/spin.gif");

    let res = h.router().oneshot(get("/check-gif/other.gif")).await.unwrap();
    assert_eq!(res.status().as_u16(), 404);
    let body = json_body(res).await;
    assert_eq!(body["message"], "GIF other.gif not found");
    assert_eq!(body["checkedPaths"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn check_rejects_path_traversal() {
    let h = Harness::new();
    let res = h.router().oneshot(get("/check-image/%2E%2E%2Fsecret")).await.unwrap();

    assert_eq!(res.status().as_u16(), 400);
    assert_eq!(json_body(res).await["name"], "BadRequest");
}

#[tokio::test]
async fn static_media_is_served_uncached() {
    let h = pizzeria_media(Harness::new());

    let res = h.router().oneshot(get("/gifs/pizzeria-app.gif")).await.unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(res.headers()["content-type"], "image/gif");
    assert_eq!(res.headers()["cache-control"], "no-cache, no-store, must-revalidate");

    let res = h.router().oneshot(get("/images/projects/pizzeria-app.jpg")).await.unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn contact_with_empty_message_is_400_and_sends_nothing() {
    let h = Harness::new();
    let res = h
        .router()
        .oneshot(post_json(
            "/api/contact",
            r#"{"name":"Ada","email":"ada@example.com","message":""}"#,
        ))
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 400);
    let body = json_body(res).await;
    assert_eq!(body, json!({"success": false, "message": "Please provide name, email, and message"}));
    assert_eq!(h.calls(), 0);
}

#[tokio::test]
async fn contact_malformed_json_is_400() {
    let h = Harness::new();
    let res = h.router().oneshot(post_json("/api/contact", "{\"name\":")).await.unwrap();

    assert_eq!(res.status().as_u16(), 400);
    assert_eq!(json_body(res).await["success"], false);
    assert_eq!(h.calls(), 0);
}

#[tokio::test]
async fn contact_is_delivered_once() {
    let h = Harness::new();
    let res = h
        .router()
        .oneshot(post_json(
            "/api/contact",
            r#"{"name":"Ada","email":"ada@example.com","message":"Hello there"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 200);
    let body = json_body(res).await;
    assert_eq!(body, json!({"success": true, "message": "Your message has been sent. Thank you!"}));
    assert_eq!(h.calls(), 1);
}

#[tokio::test]
async fn contact_transport_failure_shows_detail_only_in_development() {
    let request = || {
        post_json(
            "/api/contact",
            r#"{"name":"Ada","email":"ada@example.com","message":"Hello"}"#,
        )
    };

    let dev = Harness::new().failing_mail();
    let res = dev.router().oneshot(request()).await.unwrap();
    assert_eq!(res.status().as_u16(), 500);
    let body = json_body(res).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Failed to send message. Please try again later.");
    assert!(body["error"].as_str().unwrap().contains("535"));

    let prod = Harness::new().failing_mail().production();
    let res = prod.router().oneshot(request()).await.unwrap();
    assert_eq!(res.status().as_u16(), 500);
    let body = json_body(res).await;
    assert!(body.get("error").is_none());
    assert_eq!(prod.calls(), 1);
}

#[tokio::test]
async fn unmatched_routes_get_json_404() {
    let h = Harness::new();

    let res = h.router().oneshot(get("/nope")).await.unwrap();
    assert_eq!(res.status().as_u16(), 404);
    let body = json_body(res).await;
    assert_eq!(body["error"], "Route not found");
    assert_eq!(body["endpoints"], json!(["/api/projects", "/api/contact", "/api/test"]));

    let res = h.router().oneshot(post_json("/api/nope", "{}")).await.unwrap();
    assert_eq!(res.status().as_u16(), 404);
    assert_eq!(json_body(res).await["error"], "API endpoint not found");
}

#[tokio::test]
async fn wrong_method_on_known_route_is_json_405() {
    let h = Harness::new();

    let res = h.router().oneshot(post_json("/api/projects", "{}")).await.unwrap();
    assert_eq!(res.status().as_u16(), 405);
    assert_eq!(res.headers()["content-type"], "application/json");
    let body = json_body(res).await;
    assert_eq!(body["name"], "MethodNotAllowed");
    assert_eq!(body["code"], 405);
    assert_eq!(body["className"], "method-not-allowed");
    assert_eq!(body["message"], "POST is not supported on /api/projects");

    let res = h.router().oneshot(get("/api/contact")).await.unwrap();
    assert_eq!(res.status().as_u16(), 405);
    assert_eq!(json_body(res).await["name"], "MethodNotAllowed");
    assert_eq!(h.calls(), 0);
}

#[tokio::test]
async fn root_lists_endpoints_without_client_build() {
    let h = Harness::new();
    let body = json_body(h.router().oneshot(get("/")).await.unwrap()).await;

    assert_eq!(body["message"], "Portfolio API Server is running");
    assert_eq!(body["endpoints"]["projects"], "/api/projects");
}

#[tokio::test]
async fn client_build_serves_index_and_assets() {
    let h = Harness::new()
        .file("client/index.html", b"<html>folio</html>")
        .file("client/app.js", b"console.log(1)");

    let res = h.router().oneshot(get("/")).await.unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(text_body(res).await, "<html>folio</html>");

    let res = h.router().oneshot(get("/projects/1")).await.unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(text_body(res).await, "<html>folio</html>");

    let res = h.router().oneshot(get("/app.js")).await.unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(text_body(res).await, "console.log(1)");

    let res = h.router().oneshot(get("/api/missing")).await.unwrap();
    assert_eq!(res.status().as_u16(), 404);
}

#[tokio::test]
async fn resume_is_served_as_pdf() {
    let h = Harness::new();
    let res = h.router().oneshot(get("/api/resume")).await.unwrap();
    assert_eq!(res.status().as_u16(), 404);
    assert_eq!(json_body(res).await["message"], "Resume not found");

    let h = h.file("resume.pdf", b"%PDF-1.4");
    let res = h.router().oneshot(get("/api/resume")).await.unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(res.headers()["content-type"], "application/pdf");
    assert_eq!(text_body(res).await, "%PDF-1.4");
}
