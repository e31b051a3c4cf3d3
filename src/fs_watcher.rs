//! File system watching for the `watch` command
//!
//! Uses the `notify` crate with debouncing to detect changes to the watched
//! source file (and optionally a symbol descriptor file). The parent
//! directory is watched rather than the file itself so that editors which
//! save by writing a temp file and renaming it are still noticed.

use notify_debouncer_mini::{new_debouncer, DebounceEventResult, DebouncedEventKind, Debouncer};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

/// Debounced watcher for a fixed set of files
pub struct FileWatcher {
    /// The debouncer handles watching and event coalescing
    _debouncer: Debouncer<notify::RecommendedWatcher>,
    /// Receiver for debounced events
    rx: Receiver<DebounceEventResult>,
    /// Canonical paths of the watched files
    targets: Vec<PathBuf>,
}

impl FileWatcher {
    /// Watch `paths`, coalescing bursts of changes within `debounce`
    pub fn new(paths: &[PathBuf], debounce: Duration) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let mut debouncer = new_debouncer(debounce, tx)?;

        let targets: Vec<PathBuf> = paths.iter().map(|p| canonical(p)).collect();

        let mut dirs: Vec<PathBuf> = Vec::new();
        for target in &targets {
            let dir = target
                .parent()
                .filter(|d| !d.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            if !dirs.contains(&dir) {
                debouncer
                    .watcher()
                    .watch(&dir, notify::RecursiveMode::NonRecursive)?;
                dirs.push(dir);
            }
        }

        tracing::info!(
            "Started file watcher for {} file(s) in {} dir(s), debounce {:?}",
            targets.len(),
            dirs.len(),
            debounce
        );

        Ok(Self {
            _debouncer: debouncer,
            rx,
            targets,
        })
    }

    pub fn targets(&self) -> &[PathBuf] {
        &self.targets
    }

    /// Poll for pending changes to watched files (non-blocking)
    pub fn poll_events(&self) -> Vec<PathBuf> {
        let mut changed = Vec::new();
        while let Ok(result) = self.rx.try_recv() {
            self.collect(result, &mut changed);
        }
        if !changed.is_empty() {
            tracing::debug!("File watcher detected {} changed file(s)", changed.len());
        }
        changed
    }

    /// Block until at least one watched file changes or `timeout` elapses.
    ///
    /// Returns `None` once the watcher has shut down.
    pub fn wait_for_change(&self, timeout: Duration) -> Option<Vec<PathBuf>> {
        let mut changed = Vec::new();
        match self.rx.recv_timeout(timeout) {
            Ok(result) => self.collect(result, &mut changed),
            Err(RecvTimeoutError::Timeout) => return Some(changed),
            Err(RecvTimeoutError::Disconnected) => return None,
        }
        changed.extend(
            self.poll_events()
                .into_iter()
                .filter(|p| !changed.contains(p))
                .collect::<Vec<_>>(),
        );
        Some(changed)
    }

    fn collect(&self, result: DebounceEventResult, changed: &mut Vec<PathBuf>) {
        match result {
            Ok(events) => {
                for event in events {
                    // Continuous events during active changes - wait for the settled one
                    if event.kind == DebouncedEventKind::AnyContinuous {
                        continue;
                    }
                    if let Some(target) = self.target_for(&event.path) {
                        if !changed.contains(target) {
                            changed.push(target.clone());
                        }
                    }
                }
            }
            Err(e) => {
                tracing::warn!("File watcher error: {:?}", e);
            }
        }
    }

    /// The watched file an event path refers to, if any
    fn target_for(&self, path: &Path) -> Option<&PathBuf> {
        let path = canonical(path);
        self.targets.iter().find(|t| {
            **t == path || (t.file_name() == path.file_name() && same_dir(t, &path))
        })
    }
}

/// Canonical form of `path`, resolving the parent when the file itself is gone
fn canonical(path: &Path) -> PathBuf {
    if let Ok(p) = fs::canonicalize(path) {
        return p;
    }
    match (path.parent(), path.file_name()) {
        (Some(dir), Some(name)) if !dir.as_os_str().is_empty() => fs::canonicalize(dir)
            .map(|d| d.join(name))
            .unwrap_or_else(|_| path.to_path_buf()),
        _ => path.to_path_buf(),
    }
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.parent(), b.parent()) {
        (Some(x), Some(y)) => canonical(x) == canonical(y),
        _ => false,
    }
}
