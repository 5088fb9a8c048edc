//! Development server with live reload and `/go/{code}` redirects

use anyhow::Result;
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        Path as UrlPath, State, WebSocketUpgrade,
    },
    http::{header, Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::commands::generate;
use crate::content::{ContentStore, Resolver};
use crate::error::RecordKind;
use crate::generator::Generator;
use crate::Site;

/// Live reload script injected into HTML pages
const LIVE_RELOAD_SCRIPT: &str = r#"
<script>
(function() {
    var ws = new WebSocket('ws://' + location.host + '/__livereload');
    ws.onmessage = function(msg) {
        if (msg.data === 'reload') {
            location.reload();
        }
    };
    ws.onclose = function() {
        console.log('Live reload disconnected. Attempting to reconnect...');
        setTimeout(function() { location.reload(); }, 1000);
    };
})();
</script>
</body>
"#;

/// Content and renderer from the latest successful build
struct Snapshot {
    store: ContentStore,
    generator: Generator,
}

/// Server state
struct ServerState {
    public_dir: PathBuf,
    redirect_status: StatusCode,
    snapshot: RwLock<Arc<Snapshot>>,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

impl ServerState {
    fn new(site: &Site, store: ContentStore, live_reload: bool) -> Result<Self> {
        let (reload_tx, _) = broadcast::channel::<()>(16);
        Ok(Self {
            public_dir: site.public_dir.clone(),
            redirect_status: redirect_status(site.config.redirects.status),
            snapshot: RwLock::new(Arc::new(Snapshot {
                store,
                generator: Generator::new(site)?,
            })),
            reload_tx,
            live_reload,
        })
    }

    fn snapshot(&self) -> Arc<Snapshot> {
        match self.snapshot.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn replace(&self, snapshot: Snapshot) {
        let mut guard = match self.snapshot.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Arc::new(snapshot);
    }
}

/// Status used for `/go/{code}`; anything that is not a redirect becomes 302
fn redirect_status(code: u16) -> StatusCode {
    match StatusCode::from_u16(code) {
        Ok(status) if status.is_redirection() => status,
        _ => {
            tracing::warn!("Invalid redirect status {}, using 302", code);
            StatusCode::FOUND
        }
    }
}

fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/__livereload", get(livereload_handler))
        .route("/go/:code", get(redirect_handler))
        .route("/go/:code/", get(redirect_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the development server over a freshly generated site
pub async fn start(site: &Site, ip: &str, port: u16, watch: bool, open: bool) -> Result<()> {
    let store = generate::build(site)?;
    let state = Arc::new(ServerState::new(site, store, watch)?);
    let app = router(state.clone());

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    if watch {
        println!("Live reload enabled. Watching for changes...");
    }
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    if watch {
        let site = site.clone();
        let state = state.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_reload(&site, &state) {
                tracing::error!("File watcher error: {:#}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Watch the site sources, rebuild on change and swap in the new content
fn watch_and_reload(site: &Site, state: &ServerState) -> Result<()> {
    generate::watch_changes(site, |_| {
        match rebuild(&site.base_dir) {
            Ok(snapshot) => {
                state.replace(snapshot);
                tracing::info!("Regenerated successfully");
                let _ = state.reload_tx.send(());
            }
            Err(e) => tracing::error!("Generation failed: {:#}", e),
        }
        true
    })
}

/// Re-read `_config.yml`, regenerate and capture the new content
fn rebuild(base_dir: &Path) -> Result<Snapshot> {
    let site = Site::new(base_dir)?;
    let store = generate::build(&site)?;
    Ok(Snapshot {
        store,
        generator: Generator::new(&site)?,
    })
}

/// WebSocket handler for live reload
async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| handle_livereload_socket(socket, reload_rx))
}

async fn handle_livereload_socket(mut socket: WebSocket, mut reload_rx: broadcast::Receiver<()>) {
    tracing::debug!("Live reload client connected");

    loop {
        tokio::select! {
            result = reload_rx.recv() => {
                match result {
                    Ok(_) => {
                        if socket.send(Message::Text("reload".to_string())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
        }
    }

    tracing::debug!("Live reload client disconnected");
}

/// `GET /go/{code}`: redirect to the affiliate destination
async fn redirect_handler(
    State(state): State<Arc<ServerState>>,
    UrlPath(code): UrlPath<String>,
) -> Response {
    let snapshot = state.snapshot();
    let resolver = Resolver::new(&snapshot.store);

    match resolver.affiliate_link(&code) {
        Ok(link) => {
            tracing::debug!("Redirecting /go/{} to {}", code, link.destination_url.trim());
            (
                state.redirect_status,
                [(header::LOCATION, link.destination_url.trim().to_string())],
            )
                .into_response()
        }
        Err(e) => {
            tracing::debug!("{}", e);
            not_found(&state, &snapshot, RecordKind::AffiliateLink)
        }
    }
}

/// Serve the generated files; missing routes get a not-found page
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let path = request.uri().path().to_string();

    let Some(file_path) = resolve_file(&state.public_dir, &path) else {
        let snapshot = state.snapshot();
        return not_found(&state, &snapshot, not_found_kind(&path));
    };

    let is_html = file_path
        .extension()
        .map(|ext| ext == "html" || ext == "htm")
        .unwrap_or(false);

    if is_html && state.live_reload {
        match tokio::fs::read_to_string(&file_path).await {
            Ok(content) => Html(inject_live_reload(&content)).into_response(),
            Err(_) => {
                let snapshot = state.snapshot();
                not_found(&state, &snapshot, not_found_kind(&path))
            }
        }
    } else {
        let mut service = ServeDir::new(&state.public_dir).append_index_html_on_directories(true);
        match service.try_call(request).await {
            Ok(response) => response.into_response(),
            Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
        }
    }
}

fn not_found(state: &ServerState, snapshot: &Snapshot, kind: RecordKind) -> Response {
    let resolver = Resolver::new(&snapshot.store);
    match snapshot.generator.render_not_found(&resolver, kind) {
        Ok(html) => {
            let html = if state.live_reload {
                inject_live_reload(&html)
            } else {
                html
            };
            (StatusCode::NOT_FOUND, Html(html)).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to render not-found page: {:#}", e);
            (StatusCode::NOT_FOUND, kind.not_found_title()).into_response()
        }
    }
}

/// The record kind a request path was looking for
fn not_found_kind(path: &str) -> RecordKind {
    if path.starts_with("/blog/") {
        RecordKind::Post
    } else if path.starts_with("/topics/") {
        RecordKind::Pillar
    } else if path.starts_with("/category/") {
        RecordKind::Cluster
    } else if path.starts_with("/go/") {
        RecordKind::AffiliateLink
    } else {
        RecordKind::Page
    }
}

/// Map a request path onto an existing file under `public_dir`
fn resolve_file(public_dir: &Path, path: &str) -> Option<PathBuf> {
    let decoded = percent_encoding::percent_decode_str(path).decode_utf8_lossy();
    let clean = decoded.trim_start_matches('/');

    let relative = Path::new(clean);
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }

    let candidate = public_dir.join(relative);
    if candidate.is_dir() {
        let index = candidate.join("index.html");
        return index.is_file().then_some(index);
    }
    if candidate.is_file() {
        return Some(candidate);
    }

    let with_html = public_dir.join(format!("{}.html", clean.trim_end_matches('/')));
    with_html.is_file().then_some(with_html)
}

/// Inject live reload script into HTML content
fn inject_live_reload(html: &str) -> String {
    if html.contains("</body>") {
        html.replacen("</body>", LIVE_RELOAD_SCRIPT, 1)
    } else {
        format!("{}{}", html, LIVE_RELOAD_SCRIPT)
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::AffiliateLink;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn state(tmp: &TempDir) -> ServerState {
        let site = Site::new(tmp.path()).unwrap();
        let mut store = ContentStore::default();
        store.affiliate_links.push(AffiliateLink {
            short_code: "rollo".to_string(),
            destination_url: " https://www.rollo.com/ ".to_string(),
            name: Some("Rollo".to_string()),
            extra: HashMap::new(),
        });
        ServerState::new(&site, store, false).unwrap()
    }

    #[test]
    fn test_redirect_status() {
        assert_eq!(redirect_status(301), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(redirect_status(302), StatusCode::FOUND);
        assert_eq!(redirect_status(200), StatusCode::FOUND);
        assert_eq!(redirect_status(42), StatusCode::FOUND);
    }

    #[test]
    fn test_not_found_kind() {
        assert_eq!(not_found_kind("/blog/missing"), RecordKind::Post);
        assert_eq!(not_found_kind("/topics/missing"), RecordKind::Pillar);
        assert_eq!(not_found_kind("/category/missing"), RecordKind::Cluster);
        assert_eq!(not_found_kind("/go/missing"), RecordKind::AffiliateLink);
        assert_eq!(not_found_kind("/nowhere"), RecordKind::Page);
    }

    #[test]
    fn test_resolve_file() {
        let tmp = TempDir::new().unwrap();
        let public = tmp.path();
        fs::create_dir_all(public.join("blog/post")).unwrap();
        fs::write(public.join("blog/post/index.html"), "post").unwrap();
        fs::write(public.join("404.html"), "404").unwrap();
        fs::write(public.join("sitemap.xml"), "xml").unwrap();

        assert_eq!(
            resolve_file(public, "/blog/post"),
            Some(public.join("blog/post/index.html"))
        );
        assert_eq!(
            resolve_file(public, "/blog/post/"),
            Some(public.join("blog/post/index.html"))
        );
        assert_eq!(resolve_file(public, "/404"), Some(public.join("404.html")));
        assert_eq!(
            resolve_file(public, "/sitemap.xml"),
            Some(public.join("sitemap.xml"))
        );
        assert_eq!(resolve_file(public, "/blog/missing"), None);
        assert_eq!(resolve_file(public, "/blog"), None);
        assert_eq!(resolve_file(public, "/../etc/passwd"), None);
    }

    #[test]
    fn test_inject_live_reload() {
        let html = inject_live_reload("<html><body><p>x</p></body></html>");
        assert!(html.contains("__livereload"));
        assert!(html.ends_with("</html>"));

        let bare = inject_live_reload("<p>x</p>");
        assert!(bare.starts_with("<p>x</p>"));
        assert!(bare.contains("__livereload"));
    }

    #[tokio::test]
    async fn test_redirect_handler() {
        let tmp = TempDir::new().unwrap();
        let state = Arc::new(state(&tmp));

        let response = redirect_handler(State(state), UrlPath("rollo".to_string())).await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "https://www.rollo.com/"
        );
    }

    #[tokio::test]
    async fn test_unknown_short_code_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let state = Arc::new(state(&tmp));

        let response = redirect_handler(State(state), UrlPath("nope".to_string())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_post_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let state = Arc::new(state(&tmp));

        let request = Request::builder()
            .uri("/blog/missing")
            .body(Body::empty())
            .unwrap();
        let response = fallback_handler(State(state), request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
