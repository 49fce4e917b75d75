//! Shared test helpers: bare git remotes, gateways, and request plumbing.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use git2::{Repository, Signature};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use carta::api::{self, AppState};
use carta::auth::AuthService;
use carta::core::menu::MenuService;
use carta::git::{Gateway, GatewayConfig};

/// A bare repository standing in for the hosted remote.
///
/// Holds its temp directory open for the life of the test.
pub struct TestRemote {
    pub dir: TempDir,
    pub repo: Repository,
}

impl TestRemote {
    /// Create a bare remote whose `main` branch holds one file.
    pub fn with_file(file: &str, contents: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init_bare(dir.path()).unwrap();

        {
            let blob = repo.blob(contents.as_bytes()).unwrap();
            let mut builder = repo.treebuilder(None).unwrap();
            builder.insert(file, blob, 0o100644).unwrap();
            let tree = repo.find_tree(builder.write().unwrap()).unwrap();
            let sig = signature();
            repo.commit(Some("refs/heads/main"), &sig, &sig, "Initial menu", &tree, &[])
                .unwrap();
            repo.set_head("refs/heads/main").unwrap();
        }

        Self { dir, repo }
    }

    /// Create a bare remote seeded with the sample menu document.
    pub fn with_menu() -> Self {
        Self::with_file("menu.json", &sample_menu_json())
    }

    /// Clone URL for the gateway (plain local path).
    pub fn url(&self) -> String {
        self.dir.path().to_str().unwrap().to_string()
    }

    /// Commit a file change directly to the remote, simulating another
    /// writer. Returns the new tip.
    pub fn commit_file(&self, file: &str, contents: &str, message: &str) -> git2::Oid {
        let parent_oid = self.repo.refname_to_id("refs/heads/main").unwrap();
        let parent = self.repo.find_commit(parent_oid).unwrap();
        let parent_tree = parent.tree().unwrap();

        let blob = self.repo.blob(contents.as_bytes()).unwrap();
        let mut builder = self.repo.treebuilder(Some(&parent_tree)).unwrap();
        builder.insert(file, blob, 0o100644).unwrap();
        let tree = self.repo.find_tree(builder.write().unwrap()).unwrap();

        let sig = signature();
        self.repo
            .commit(Some("refs/heads/main"), &sig, &sig, message, &tree, &[&parent])
            .unwrap()
    }

    /// Commit message at the remote's `main` tip.
    pub fn head_message(&self) -> String {
        let oid = self.repo.refname_to_id("refs/heads/main").unwrap();
        self.repo
            .find_commit(oid)
            .unwrap()
            .message()
            .unwrap()
            .to_string()
    }

    /// File contents at the remote's `main` tip.
    pub fn file_at_head(&self, path: &str) -> String {
        let oid = self.repo.refname_to_id("refs/heads/main").unwrap();
        let commit = self.repo.find_commit(oid).unwrap();
        let tree = commit.tree().unwrap();
        let entry = tree.get_path(Path::new(path)).unwrap();
        let blob = self.repo.find_blob(entry.id()).unwrap();
        String::from_utf8(blob.content().to_vec()).unwrap()
    }

    /// Number of commits reachable from the remote's `main` tip.
    pub fn commit_count(&self) -> usize {
        let mut walk = self.repo.revwalk().unwrap();
        walk.push(self.repo.refname_to_id("refs/heads/main").unwrap())
            .unwrap();
        walk.count()
    }
}

fn signature() -> Signature<'static> {
    Signature::now("External Writer", "writer@example.com").unwrap()
}

/// The menu document every fixture starts from: two categories, one dish
/// each.
pub fn sample_menu_json() -> String {
    let mut json = serde_json::to_string_pretty(&serde_json::json!({
        "categories": [
            {
                "id": "starters",
                "name": "Starters",
                "display_order": 1,
                "dishes": [
                    {
                        "id": "samosa",
                        "name": "Samosa",
                        "price": 120,
                        "image": "samosa.jpg",
                        "alt_text": "Two crisp samosas",
                        "category_id": "starters"
                    }
                ]
            },
            {
                "id": "mains",
                "name": "Main Courses",
                "display_order": 2,
                "dishes": [
                    {
                        "id": "biryani",
                        "name": "Hyderabadi Biryani",
                        "price": 250,
                        "image": "biryani.jpg",
                        "alt_text": "Biryani in a copper bowl",
                        "category_id": "mains"
                    }
                ]
            }
        ]
    }))
    .unwrap();
    json.push('\n');
    json
}

/// Gateway configuration pointing at a local test remote.
pub fn gateway_config(url: &str, clone_dir: &Path) -> GatewayConfig {
    GatewayConfig {
        url: url.to_string(),
        branch: "main".to_string(),
        username: "git".to_string(),
        token: String::new(),
        clone_dir: clone_dir.to_path_buf(),
        file_path: PathBuf::from("menu.json"),
        network_timeout: Duration::from_secs(30),
        committer_name: "Test Admin".to_string(),
        committer_email: "admin@test.example".to_string(),
    }
}

/// Initialize a gateway against the remote, cloning into `clone_dir`.
pub fn init_gateway(remote: &TestRemote, clone_dir: &Path) -> Gateway {
    Gateway::initialize(gateway_config(&remote.url(), clone_dir)).unwrap()
}

/// A remote, a working copy, and a service over both.
pub struct ServiceFixture {
    pub remote: TestRemote,
    clone_dir: TempDir,
    pub service: MenuService,
}

impl ServiceFixture {
    pub fn new() -> Self {
        let remote = TestRemote::with_menu();
        let clone_dir = TempDir::new().unwrap();
        let gateway = init_gateway(&remote, &clone_dir.path().join("repo"));
        let service = MenuService::new(gateway);
        Self {
            remote,
            clone_dir,
            service,
        }
    }
}

/// Build the full app router over a fresh remote, with the standard test
/// admin (`admin` / `hunter2`). Uses the same route structure as `main.rs`.
pub fn build_test_app() -> (Router, TestRemote, TempDir) {
    let remote = TestRemote::with_menu();
    let clone_dir = TempDir::new().unwrap();
    let gateway = init_gateway(&remote, &clone_dir.path().join("repo"));

    let service = Arc::new(MenuService::new(gateway));
    let auth = Arc::new(
        AuthService::new(
            "admin",
            "hunter2",
            "admin@example.com",
            Duration::from_secs(3600),
        )
        .unwrap(),
    );
    let app = api::router(AppState::new(service, auth), &[]);

    (app, remote, clone_dir)
}

/// Send a request with an optional bearer token and JSON body.
pub async fn request(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<&serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(value).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    request(app, "GET", uri, None, None).await
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    request(app, "POST", uri, None, Some(body)).await
}

/// Log in as the standard test admin and return the bearer token.
pub async fn login(app: Router) -> String {
    let (status, json) = post_json(
        app,
        "/api/auth/login",
        &serde_json::json!({ "username": "admin", "password": "hunter2" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {json}");
    json["token"].as_str().unwrap().to_string()
}
