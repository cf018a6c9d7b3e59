//! Load orchestration
//!
//! The loader owns everything a load needs: the source, the event channel,
//! the progress timer and the in-flight fetch task. Results come back as
//! [`LoadEvent`]s on the channel and are applied on the UI loop via
//! [`Loader::handle`].
//!
//! Every `start` bumps a generation number and aborts the previous fetch.
//! Events tagged with an older generation are discarded, so overlapping
//! reloads resolve to the newest request instead of whichever response
//! happens to arrive last.

use super::client::{FetchError, FetchRequest, ProductSource};
use super::product::Catalog;
use super::progress::{self, ProgressTimer};
use crate::notify::{Notification, Notifier};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// How long the full progress bar stays visible after a successful load
const PROGRESS_LINGER: Duration = Duration::from_millis(500);

/// What kind of load the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    /// Start of the catalog
    Reload,
    /// Random window of the catalog
    Randomize,
}

/// Messages from background load tasks to the UI loop
#[derive(Debug)]
pub enum LoadEvent {
    /// Progress timer tick
    Progress { generation: u64 },
    /// Fetch resolved
    Finished {
        generation: u64,
        result: Result<Catalog, FetchError>,
    },
}

/// Loader settings
#[derive(Debug, Clone, Copy)]
pub struct LoaderOptions {
    /// Row-count limit per request
    pub limit: u32,
    /// Progress timer period
    pub progress_interval: Duration,
}

/// Drives catalog loads and tracks loading state
pub struct Loader<S: ProductSource> {
    source: Arc<S>,
    tx: mpsc::Sender<LoadEvent>,
    options: LoaderOptions,

    /// Generation of the most recent `start`
    generation: u64,
    loading: bool,
    /// Cosmetic percentage (None = nothing to show)
    progress: Option<u8>,
    /// When to hide the completed progress bar
    progress_clear_at: Option<Instant>,

    timer: Option<ProgressTimer>,
    fetch_task: Option<JoinHandle<()>>,

    /// Remote catalog size from the last good response (for randomize)
    last_total: Option<u64>,
}

impl<S: ProductSource> Loader<S> {
    pub fn new(source: Arc<S>, tx: mpsc::Sender<LoadEvent>, options: LoaderOptions) -> Self {
        Self {
            source,
            tx,
            options,
            generation: 0,
            loading: false,
            progress: None,
            progress_clear_at: None,
            timer: None,
            fetch_task: None,
            last_total: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn progress(&self) -> Option<u8> {
        self.progress
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Begin a load, superseding any load still in flight
    ///
    /// Returns the generation assigned to this load.
    pub fn start(&mut self, kind: LoadKind) -> u64 {
        let request = match kind {
            LoadKind::Reload => FetchRequest::reload(self.options.limit),
            LoadKind::Randomize => FetchRequest::randomized(self.options.limit, self.last_total),
        };

        if let Some(task) = self.fetch_task.take() {
            if !task.is_finished() {
                tracing::debug!("Superseding in-flight load (generation {})", self.generation);
            }
            task.abort();
        }

        self.generation += 1;
        let generation = self.generation;

        self.loading = true;
        self.progress = Some(0);
        self.progress_clear_at = None;
        // Replacing the handle drops (and aborts) the previous timer
        self.timer = Some(ProgressTimer::start(
            generation,
            self.options.progress_interval,
            self.tx.clone(),
        ));

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        self.fetch_task = Some(tokio::spawn(async move {
            let result = source.fetch(request).await;
            // Receiver gone means the UI already shut down
            let _ = tx.send(LoadEvent::Finished { generation, result }).await;
        }));

        tracing::info!(
            "Loading products ({:?}, limit={}, skip={:?}, generation {})",
            kind,
            request.limit,
            request.skip,
            generation
        );

        generation
    }

    /// Apply a background event
    ///
    /// Returns the new data set when the current load succeeded. On failure
    /// the error is logged and reported through `notifier`, and `None` is
    /// returned so the caller keeps whatever it was showing.
    pub fn handle(
        &mut self,
        event: LoadEvent,
        notifier: &mut impl Notifier,
        now: Instant,
    ) -> Option<Catalog> {
        match event {
            LoadEvent::Progress { generation } => {
                if generation == self.generation && self.loading {
                    let current = self.progress.unwrap_or(0);
                    self.progress = Some(progress::advance(current, progress::random_step()));
                }
                None
            }
            LoadEvent::Finished { generation, result } => {
                if generation != self.generation {
                    tracing::debug!(
                        "Discarding stale load result (generation {}, current {})",
                        generation,
                        self.generation
                    );
                    return None;
                }

                self.timer = None;
                self.fetch_task = None;
                self.loading = false;

                match result {
                    Ok(catalog) => {
                        tracing::info!(
                            "Loaded {} product(s) (catalog total: {:?})",
                            catalog.products.len(),
                            catalog.total
                        );
                        self.last_total = catalog.total.or(self.last_total);
                        self.progress = Some(100);
                        self.progress_clear_at = Some(now + PROGRESS_LINGER);
                        Some(catalog)
                    }
                    Err(e) => {
                        tracing::error!("Failed to load products: {}", e);
                        notifier.notify(Notification::error(format!(
                            "Failed to load products: {}",
                            e
                        )));
                        self.progress = None;
                        None
                    }
                }
            }
        }
    }

    /// Hide the completed progress bar once its linger time is up
    pub fn tick(&mut self, now: Instant) {
        if let Some(at) = self.progress_clear_at {
            if now >= at {
                self.progress = None;
                self.progress_clear_at = None;
            }
        }
    }

    /// Stop the timer and any in-flight fetch
    pub fn shutdown(&mut self) {
        if let Some(timer) = self.timer.take() {
            tracing::debug!("Stopping progress timer (generation {})", timer.generation());
            timer.cancel();
        }
        if let Some(task) = self.fetch_task.take() {
            task.abort();
        }
        self.loading = false;
    }
}

impl<S: ProductSource> Drop for Loader<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
