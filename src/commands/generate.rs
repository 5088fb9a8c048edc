//! Generate static files

use anyhow::{Context, Result};
use notify::RecursiveMode;
use notify_debouncer_mini::new_debouncer;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::content::ContentStore;
use crate::generator::Generator;
use crate::Site;

/// Generate the static site
pub fn run(site: &Site) -> Result<()> {
    build(site).map(|_| ())
}

/// Load all content and write the site, returning the store that was rendered
pub fn build(site: &Site) -> Result<ContentStore> {
    let start = Instant::now();

    let store = site.load_store().context("Failed to load content")?;
    let generator = Generator::new(site)?;
    generator.generate(&store)?;

    tracing::info!("Generated in {:.2}s", start.elapsed().as_secs_f64());
    Ok(store)
}

/// Paths whose changes require a rebuild
pub fn watch_targets(site: &Site) -> Vec<(PathBuf, RecursiveMode)> {
    let mut targets: Vec<(PathBuf, RecursiveMode)> = [
        &site.data_dir,
        &site.content_dir,
        &site.pages_dir,
        &site.static_dir,
    ]
    .into_iter()
    .filter(|dir| dir.exists())
    .map(|dir| (dir.clone(), RecursiveMode::Recursive))
    .collect();

    let config_path = site.config_path();
    if config_path.exists() {
        targets.push((config_path, RecursiveMode::NonRecursive));
    }
    targets
}

/// Quiet period before a burst of changes triggers a rebuild
const DEBOUNCE: Duration = Duration::from_millis(500);

/// Watch for file changes and regenerate
pub async fn watch(site: &Site) -> Result<()> {
    let site = site.clone();
    tokio::task::spawn_blocking(move || watch_blocking(&site)).await?
}

fn watch_blocking(site: &Site) -> Result<()> {
    tracing::info!("Watching for changes. Press Ctrl+C to stop.");
    watch_changes(site, |_| {
        tracing::info!("Regenerating...");
        // Re-read _config.yml so config edits apply
        if let Err(e) = Site::new(&site.base_dir).and_then(|s| run(&s)) {
            tracing::error!("Generation failed: {:#}", e);
        }
        true
    })
}

/// Block on debounced changes to [`watch_targets`], calling `on_change` with
/// the changed paths of each burst until it returns `false`
pub fn watch_changes<F>(site: &Site, mut on_change: F) -> Result<()>
where
    F: FnMut(&[PathBuf]) -> bool,
{
    let (tx, rx) = channel();
    let mut debouncer = new_debouncer(DEBOUNCE, tx)?;

    for (path, mode) in watch_targets(site) {
        debouncer.watcher().watch(&path, mode)?;
        tracing::debug!("Watching: {:?}", path);
    }

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let changed: Vec<PathBuf> = events
                    .into_iter()
                    .map(|e| e.path)
                    .filter(|p| is_relevant_change(p))
                    .collect();
                if changed.is_empty() {
                    continue;
                }
                for path in &changed {
                    tracing::info!("File changed: {}", path.display());
                }
                if !on_change(&changed) {
                    break;
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

/// Editor and VCS noise that should not trigger a rebuild
pub fn is_relevant_change(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    !path_str.contains("/.git/")
        && !path_str.contains(".DS_Store")
        && !path_str.ends_with('~')
        && !path_str.ends_with(".swp")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_watch_targets_skip_missing() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("data")).unwrap();
        fs::write(tmp.path().join("_config.yml"), "title: Test\n").unwrap();
        let site = Site::new(tmp.path()).unwrap();

        let targets = watch_targets(&site);
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].0, tmp.path().join("data"));
        assert_eq!(targets[1].1, RecursiveMode::NonRecursive);
    }

    #[test]
    fn test_is_relevant_change() {
        assert!(is_relevant_change(Path::new("/site/data/posts.json")));
        assert!(!is_relevant_change(Path::new("/site/.git/index")));
        assert!(!is_relevant_change(Path::new("/site/data/posts.json~")));
        assert!(!is_relevant_change(Path::new("/site/data/.posts.json.swp")));
    }

    #[test]
    fn test_second_save_within_debounce_is_seen() {
        let tmp = TempDir::new().unwrap();
        let data = tmp.path().join("data");
        fs::create_dir_all(&data).unwrap();
        let site = Site::new(tmp.path()).unwrap();

        let (tx, rx) = channel();
        let watched = site.clone();
        std::thread::spawn(move || {
            let mut bursts = 0;
            watch_changes(&watched, |paths| {
                bursts += 1;
                let _ = tx.send(paths.to_vec());
                bursts < 2
            })
        });
        // let the watcher register before writing
        std::thread::sleep(Duration::from_millis(300));

        fs::write(data.join("posts.json"), "[]").unwrap();
        let first = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        assert!(first.iter().any(|p| p.ends_with("posts.json")));

        // a second save shortly after the first rebuild still arrives
        std::thread::sleep(Duration::from_millis(300));
        fs::write(data.join("posts.json"), r#"[{"id":"1","slug":"a","title":"A"}]"#).unwrap();
        let second = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        assert!(second.iter().any(|p| p.ends_with("posts.json")));
    }

    #[test]
    fn test_build_reports_missing_posts() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();
        let err = build(&site).unwrap_err();
        assert!(format!("{:#}", err).contains("posts"));
    }
}
