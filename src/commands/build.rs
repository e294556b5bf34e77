//! Build the static site

use anyhow::Result;
use notify::Watcher;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::generator::Generator;
use crate::{Folio, CONFIG_FILE};

/// Minimum delay between two rebuilds in watch mode
const REBUILD_DEBOUNCE: Duration = Duration::from_millis(500);

/// Generate the static site
pub fn run(folio: &Folio) -> Result<()> {
    let start = Instant::now();

    let generator = Generator::new(folio);
    let count = generator.generate(&folio.repository())?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} posts into {:?} in {:.2}s",
        count,
        folio.public_dir,
        duration.as_secs_f64()
    );

    Ok(())
}

/// Watch the content, images, static assets and config, rebuilding on change
pub async fn watch(folio: &Folio) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    for dir in [&folio.content_dir, &folio.images_dir, &folio.static_dir] {
        if dir.exists() {
            watcher.watch(dir, notify::RecursiveMode::Recursive)?;
        }
    }

    let config_path = folio.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut folio = folio.clone();
    let mut schedule = RebuildSchedule::new(REBUILD_DEBOUNCE, Instant::now());

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(event) => {
                schedule.record(event.paths.iter().any(|p| p == &config_path));
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }

        let Some(reload_config) = schedule.take_due(Instant::now()) else {
            continue;
        };

        if reload_config {
            match Folio::new(&folio.base_dir) {
                Ok(reloaded) => folio = reloaded,
                Err(e) => tracing::error!("Failed to reload {}: {}", CONFIG_FILE, e),
            }
        }

        tracing::info!("Change detected, rebuilding...");
        if let Err(e) = run(&folio) {
            tracing::error!("Build failed: {}", e);
        }
        schedule.rebuilt_at(Instant::now());
    }

    Ok(())
}

/// Coalesces change events into at most one rebuild per debounce window.
///
/// Events inside the window are kept pending and rebuilt once it has passed.
#[derive(Debug)]
struct RebuildSchedule {
    window: Duration,
    last_rebuild: Instant,
    pending: bool,
    reload_config: bool,
}

impl RebuildSchedule {
    fn new(window: Duration, last_rebuild: Instant) -> Self {
        Self {
            window,
            last_rebuild,
            pending: false,
            reload_config: false,
        }
    }

    fn record(&mut self, touches_config: bool) {
        self.pending = true;
        self.reload_config |= touches_config;
    }

    /// Claim the pending rebuild once the window has passed. The flag says
    /// whether the config file changed since the last rebuild.
    fn take_due(&mut self, now: Instant) -> Option<bool> {
        if !self.pending || now.saturating_duration_since(self.last_rebuild) <= self.window {
            return None;
        }
        self.pending = false;
        Some(std::mem::take(&mut self.reload_config))
    }

    fn rebuilt_at(&mut self, now: Instant) {
        self.last_rebuild = now;
    }
}
