//! Deck file watching for `--watch`.
//!
//! The parent directory is watched non-recursively because editors often
//! replace a file instead of writing it in place. Events are collected from
//! a channel and released as one reload once they have been quiet for the
//! debounce window.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Quiet period before a burst of events becomes one reload.
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

pub struct DeckWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    dir: PathBuf,
    deck_path: PathBuf,
    deck_name: Option<OsString>,
    debounce_ms: u64,
    last_event_ms: Option<u64>,
}

impl DeckWatcher {
    /// Start watching the deck at `path`.
    ///
    /// # Errors
    /// Returns an error if the platform watcher cannot be created or the
    /// containing directory cannot be watched.
    pub fn new(path: impl AsRef<Path>, debounce_ms: u64) -> notify::Result<Self> {
        let deck_path = path
            .as_ref()
            .canonicalize()
            .unwrap_or_else(|_| path.as_ref().to_path_buf());
        let deck_name = deck_path.file_name().map(std::ffi::OsStr::to_os_string);
        let dir = containing_dir(&deck_path);

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        tracing::debug!(deck = %deck_path.display(), dir = %dir.display(), "watching deck");

        Ok(Self {
            _watcher: watcher,
            rx,
            dir,
            deck_path,
            deck_name,
            debounce_ms,
            last_event_ms: None,
        })
    }

    pub fn deck_path(&self) -> &Path {
        &self.deck_path
    }

    /// Drain pending events; true once a change has settled at `now_ms`.
    pub fn poll_change(&mut self, now_ms: u64) -> bool {
        let mut relevant = 0u32;
        let mut ignored = 0u32;
        while let Ok(event) = self.rx.try_recv() {
            match event {
                Ok(ev) if self.affects_deck(&ev) => relevant += 1,
                Ok(ev) => {
                    ignored += 1;
                    tracing::trace!(kind = ?ev.kind, paths = ?ev.paths, "ignored fs event");
                }
                Err(err) => tracing::warn!(%err, "watcher error"),
            }
        }
        if relevant > 0 {
            tracing::debug!(relevant, ignored, "deck events");
            self.last_event_ms = Some(now_ms);
        }
        self.settle(now_ms)
    }

    fn settle(&mut self, now_ms: u64) -> bool {
        match self.last_event_ms {
            Some(last) if now_ms.saturating_sub(last) >= self.debounce_ms => {
                self.last_event_ms = None;
                true
            }
            _ => false,
        }
    }

    fn affects_deck(&self, event: &Event) -> bool {
        if matches!(event.kind, EventKind::Access(_)) {
            return false;
        }
        event.paths.iter().any(|path| {
            path == &self.dir
                || path == &self.deck_path
                || self
                    .deck_name
                    .as_ref()
                    .is_some_and(|name| path.file_name().is_some_and(|f| f == name))
        })
    }
}

fn containing_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
