//! Preference file watcher for live reload.
//!
//! Watches the preferencerc file for changes and delivers a freshly parsed
//! [`PreferenceSet`] to a registered callback. Uses debouncing to avoid
//! multiple reloads during rapid saves from editors; rapid successive writes
//! may still deliver more than one callback per logical edit, so consumers
//! must not assume coalescing.

use crate::error::PreferenceError;
use crate::preference::PreferenceSet;
use anyhow::{Context, Result};
use notify::{Config as NotifyConfig, Event, PollWatcher, RecursiveMode, Watcher};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Callback invoked with each freshly parsed preference snapshot.
///
/// A typed closure owning whatever context it captured; the snapshot is
/// handed over by value and fully formed.
pub type ReloadCallback = dyn Fn(PreferenceSet) + Send + Sync;

/// An active watch subscription on the preference file.
///
/// Owns the underlying OS watch resource, the registered callback, and the
/// cancellation flag. Dropping the handle cancels the subscription.
pub struct PreferenceWatcher {
    /// The file system watcher; taken and dropped on cancellation.
    watcher: Mutex<Option<Box<dyn Watcher + Send>>>,
    /// Checked before every callback delivery, including in-flight ones.
    cancelled: Arc<AtomicBool>,
}

impl std::fmt::Debug for PreferenceWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceWatcher")
            .field("cancelled", &self.cancelled.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Build the shared event-handler closure used by both watcher backends.
///
/// Returns a closure that filters events to the given `filename`, applies
/// debouncing, and runs one reload cycle per retained event. Deliveries
/// happen sequentially on the backend's notification thread, in the order
/// the notifications were observed.
fn make_event_handler(
    filename: std::ffi::OsString,
    path: PathBuf,
    debounce_delay: Duration,
    callback: Arc<ReloadCallback>,
    cancelled: Arc<AtomicBool>,
    last_event_time: Arc<Mutex<Option<Instant>>>,
) -> impl Fn(std::result::Result<Event, notify::Error>) + Send + 'static {
    move |result: std::result::Result<Event, notify::Error>| {
        if let Ok(event) = result {
            if cancelled.load(Ordering::SeqCst) {
                return;
            }

            // Content modify, create, and delete are relevant; create also
            // covers editors that save via rename-replace. Directory-level
            // and access/metadata events are filtered out below by filename.
            if !matches!(
                event.kind,
                notify::EventKind::Modify(_)
                    | notify::EventKind::Create(_)
                    | notify::EventKind::Remove(_)
            ) {
                return;
            }

            let matches_rc: bool = event
                .paths
                .iter()
                .any(|p: &PathBuf| p.file_name().map(|f| f == filename).unwrap_or(false));

            if !matches_rc {
                return;
            }

            // Debounce: skip if we delivered too recently
            let should_deliver: bool = {
                let now: Instant = Instant::now();
                let mut last = last_event_time.lock();
                if let Some(last_time) = *last {
                    if now.duration_since(last_time) < debounce_delay {
                        log::trace!("Debouncing preference reload event");
                        false
                    } else {
                        *last = Some(now);
                        true
                    }
                } else {
                    *last = Some(now);
                    true
                }
            };

            if should_deliver {
                reload(&path, &callback, &cancelled);
            }
        }
    }
}

/// Run one reload cycle: re-read the preference file, parse it, and deliver
/// the snapshot to the callback.
///
/// A missing or unreadable file is skipped silently; the consumer's previous
/// snapshot stays authoritative. The cancellation flag is checked again
/// right before delivery so an in-flight notification cannot outlive
/// `cancel()`.
fn reload(path: &Path, callback: &Arc<ReloadCallback>, cancelled: &Arc<AtomicBool>) {
    if cancelled.load(Ordering::SeqCst) {
        return;
    }
    let preferences = match PreferenceSet::load(path) {
        Ok(preferences) => preferences,
        Err(e) => {
            log::debug!("skipping preference reload: {e}");
            return;
        }
    };
    if cancelled.load(Ordering::SeqCst) {
        return;
    }
    log::info!("Preference file changed: {}", path.display());
    callback(preferences);
}

impl PreferenceWatcher {
    /// Start watching `path` and register `callback`.
    ///
    /// If the file exists, one read-parse-deliver cycle runs synchronously
    /// before the watch subscription is even attempted, so a consumer never
    /// needs a separate load call — and still gets that initial snapshot
    /// when subscription setup fails and this returns an error. Watch
    /// failure degrades to "no live reload", not "no preferences".
    ///
    /// The parent directory is watched non-recursively and events are
    /// filtered to the preference file name, so an editor replacing the file
    /// via rename is picked up. Attempts the platform's native watcher
    /// (inotify on Linux, FSEvents on macOS, ReadDirectoryChanges on
    /// Windows) first; if that backend fails to initialise (e.g. inside a
    /// container or on a network filesystem), falls back to a `PollWatcher`
    /// that checks for changes every 500 ms.
    ///
    /// # Arguments
    /// * `path` - Path to the preference file to watch.
    /// * `debounce_delay_ms` - Debounce delay in milliseconds; `0` disables
    ///   debouncing.
    /// * `callback` - Invoked with each parsed snapshot: on the calling
    ///   thread for the initial cycle, then on the watcher's background
    ///   thread in notification order.
    ///
    /// # Errors
    /// Returns an error if the subscription cannot be established on either
    /// backend or the path has no parent directory.
    pub fn watch<F>(path: &Path, debounce_delay_ms: u64, callback: F) -> Result<Self>
    where
        F: Fn(PreferenceSet) + Send + Sync + 'static,
    {
        let canonical: PathBuf = path
            .canonicalize()
            .unwrap_or_else(|_| path.to_path_buf());

        let filename: std::ffi::OsString = canonical
            .file_name()
            .context("Preference path has no filename")?
            .to_os_string();

        let parent_dir: PathBuf = canonical
            .parent()
            .context("Preference path has no parent directory")?
            .to_path_buf();

        let callback: Arc<ReloadCallback> = Arc::new(callback);
        let cancelled: Arc<AtomicBool> = Arc::new(AtomicBool::new(false));

        // Initial eager cycle, before any subscription exists. An unreadable
        // file is reported but not fatal: the application launches on pure
        // defaults and the watcher still runs.
        if canonical.exists() {
            match PreferenceSet::load(&canonical) {
                Ok(preferences) => callback(preferences),
                Err(e) => log::error!("initial preference load failed: {e}"),
            }
        }

        let debounce_delay: Duration = Duration::from_millis(debounce_delay_ms);
        let last_event_time: Arc<Mutex<Option<Instant>>> = Arc::new(Mutex::new(None));

        // Try the platform-native watcher first; fall back to PollWatcher on failure.
        let mut watcher: Box<dyn Watcher + Send> = Self::create_watcher(
            filename,
            canonical.clone(),
            debounce_delay,
            Arc::clone(&callback),
            Arc::clone(&cancelled),
            last_event_time,
        )?;

        watcher
            .watch(&parent_dir, RecursiveMode::NonRecursive)
            .map_err(|e| PreferenceError::WatchSetup(e.to_string()))
            .with_context(|| {
                format!(
                    "Failed to watch preference directory: {}",
                    parent_dir.display()
                )
            })?;

        log::info!("Preference hot reload: watching {}", canonical.display());

        Ok(Self {
            watcher: Mutex::new(Some(watcher)),
            cancelled,
        })
    }

    /// Try to create the best available watcher backend.
    fn create_watcher(
        filename: std::ffi::OsString,
        path: PathBuf,
        debounce_delay: Duration,
        callback: Arc<ReloadCallback>,
        cancelled: Arc<AtomicBool>,
        last_event_time: Arc<Mutex<Option<Instant>>>,
    ) -> Result<Box<dyn Watcher + Send>> {
        // Build the shared handler (clone inputs for the fallback path).
        let filename2 = filename.clone();
        let path2 = path.clone();
        let callback2 = Arc::clone(&callback);
        let cancelled2 = Arc::clone(&cancelled);
        let last_event_time2 = Arc::clone(&last_event_time);

        let handler = make_event_handler(
            filename,
            path,
            debounce_delay,
            callback,
            cancelled,
            last_event_time,
        );

        match notify::recommended_watcher(handler) {
            Ok(w) => {
                log::debug!("Preference watcher: using native (RecommendedWatcher) backend");
                Ok(Box::new(w))
            }
            Err(e) => {
                log::warn!(
                    "Preference watcher: native backend unavailable ({}); falling back to PollWatcher",
                    e
                );
                let fallback_handler = make_event_handler(
                    filename2,
                    path2,
                    debounce_delay,
                    callback2,
                    cancelled2,
                    last_event_time2,
                );
                let poll_watcher = PollWatcher::new(
                    fallback_handler,
                    NotifyConfig::default().with_poll_interval(Duration::from_millis(500)),
                )
                .map_err(|e| PreferenceError::WatchSetup(e.to_string()))
                .context("Failed to create fallback PollWatcher")?;
                Ok(Box::new(poll_watcher))
            }
        }
    }

    /// Stop all future callback deliveries and release the underlying OS
    /// watch resource.
    ///
    /// Idempotent: repeated calls are a no-op. In-flight notifications
    /// observe the flag before delivering, so once this returns no further
    /// invocation is started.
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            log::debug!("Preference watch cancelled");
        }
        // Dropping the backend releases the OS subscription.
        self.watcher.lock().take();
    }

    /// Whether `cancel` has been called on this subscription.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Drop for PreferenceWatcher {
    fn drop(&mut self) {
        self.cancel();
    }
}
