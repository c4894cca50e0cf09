use crate::constants::ALREADY_CORRECT_STOP_THRESHOLD;
use crate::dates::{format_date_created, parse_date};
use crate::types::{ItemKind, MediaItem, MediaServer};
use metrics::{counter, histogram};
use serde::Serialize;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Per-library scan state. Built fresh for every pass and dropped with it.
#[derive(Debug, Default)]
struct RunState {
    processed: HashSet<String>,
    correct_count: u32,
    stop: bool,
}

impl RunState {
    /// Record one more already-correct item. Past the threshold the rest of
    /// the pass is assumed fixed by a prior run and gets skipped. The count
    /// never resets within a pass; a mismatched item in between does not
    /// restart it.
    fn note_already_correct(&mut self) {
        self.correct_count += 1;
        if self.correct_count >= ALREADY_CORRECT_STOP_THRESHOLD {
            self.stop = true;
        }
    }
}

/// Result of one library pass.
#[derive(Debug, Serialize)]
pub struct LibraryReport {
    pub library_id: String,
    pub total_items: usize,
    pub updated: usize,
    pub already_correct: usize,
    pub skipped: usize,
    pub failures: Vec<String>,
    pub stopped_early: bool,
}

impl LibraryReport {
    fn new(library_id: &str) -> Self {
        Self {
            library_id: library_id.to_string(),
            total_items: 0,
            updated: 0,
            already_correct: 0,
            skipped: 0,
            failures: Vec::new(),
            stopped_early: false,
        }
    }
}

/// Walks every configured library and rewrites each eligible item's
/// `DateCreated` to its premiere date.
pub struct LibraryDateNormalizer {
    server: Arc<dyn MediaServer>,
}

impl LibraryDateNormalizer {
    pub fn new(server: Arc<dyn MediaServer>) -> Self {
        Self { server }
    }

    /// Normalize every library in the given order, one at a time. Never
    /// fails as a whole; per-library trouble lands in that library's report.
    pub async fn run_all(&self, library_ids: &[String]) -> Vec<LibraryReport> {
        if library_ids.is_empty() {
            info!("No library IDs configured.");
            println!("No library IDs configured.");
            return Vec::new();
        }

        let mut reports = Vec::with_capacity(library_ids.len());
        for library_id in library_ids {
            info!("Processing library: {}", library_id);
            println!("Processing library: {library_id}");
            let report = self.run_library(library_id).await;
            info!("Completed processing library: {}", library_id);
            println!("Completed processing library: {library_id}\n");
            reports.push(report);
        }
        reports
    }

    /// One scan-and-fix pass over a single library.
    #[instrument(skip(self))]
    pub async fn run_library(&self, library_id: &str) -> LibraryReport {
        let started = std::time::Instant::now();
        let mut state = RunState::default();
        let mut report = LibraryReport::new(library_id);

        let items = match self.server.library_items(library_id).await {
            Ok(items) => items,
            Err(e) => {
                error!("Failed to list items for library {}: {}", library_id, e);
                report.failures.push(format!("Failed to list items: {e}"));
                return report;
            }
        };
        if items.is_empty() {
            info!("No items found in library {}.", library_id);
            println!("No items found in library {library_id}.");
            return report;
        }
        report.total_items = items.len();

        for item in &items {
            if state.stop {
                report.stopped_early = true;
                debug!(
                    "Stopping library {} after {} already-correct items",
                    library_id, state.correct_count
                );
                break;
            }
            self.process_item(item, &mut state, &mut report).await;
        }

        let library = library_id.to_string();
        counter!("emby_items_updated_total", "library" => library.clone())
            .increment(report.updated as u64);
        counter!("emby_items_already_correct_total", "library" => library.clone())
            .increment(report.already_correct as u64);
        counter!("emby_items_skipped_total", "library" => library.clone())
            .increment(report.skipped as u64);
        counter!("emby_item_failures_total", "library" => library.clone())
            .increment(report.failures.len() as u64);
        histogram!("emby_library_pass_duration_seconds", "library" => library)
            .record(started.elapsed().as_secs_f64());

        report
    }

    /// Dedup and kind filtering in front of the update logic. An item seen
    /// twice in a pass, or of an unrecognized kind, is left untouched.
    async fn process_item(
        &self,
        item: &MediaItem,
        state: &mut RunState,
        report: &mut LibraryReport,
    ) {
        if state.processed.contains(&item.id) || !item.kind.is_eligible() {
            return;
        }
        state.processed.insert(item.id.clone());
        self.update_item_date_added(&item.id, &item.name, item.kind, state, report)
            .await;
    }

    /// Fetch one item's detail, compare its two date fields, and rewrite
    /// `DateCreated` when they differ. Every failure here is local to the
    /// item; the pass continues either way.
    #[instrument(skip(self, state, report))]
    async fn update_item_date_added(
        &self,
        item_id: &str,
        item_name: &str,
        item_kind: ItemKind,
        state: &mut RunState,
        report: &mut LibraryReport,
    ) {
        let detail = match self.server.item_detail(item_id).await {
            Ok(Some(detail)) => detail,
            Ok(None) => {
                warn!("Failed to fetch details for {}.", item_name);
                report
                    .failures
                    .push(format!("Failed to fetch details for {item_name}"));
                return;
            }
            Err(e) => {
                warn!("Failed to fetch details for {}: {}", item_name, e);
                report
                    .failures
                    .push(format!("Failed to fetch details for {item_name}: {e}"));
                return;
            }
        };

        let premiere_date = detail["PremiereDate"].as_str();
        let date_created = detail["DateCreated"].as_str();
        let (Some(premiere_date), Some(date_created)) = (premiere_date, date_created) else {
            info!("Skipping {}, missing necessary date fields.", item_name);
            report.skipped += 1;
            return;
        };

        if parse_date(date_created) == parse_date(premiere_date) {
            debug!("{}: 'Date Added' already matches release date.", item_name);
            state.note_already_correct();
            report.already_correct += 1;
            return;
        }

        let Some(release_date) = parse_date(premiere_date) else {
            error!(
                "Invalid release date format for {}: {}",
                item_name, premiere_date
            );
            report.skipped += 1;
            return;
        };

        let mut updated = detail.clone();
        updated["DateCreated"] = json!(format_date_created(release_date));

        match self.server.update_item(item_id, &updated).await {
            Ok(true) => {
                info!(
                    "Updated {} '{}' 'Date Added' to {}",
                    item_kind.as_str(),
                    item_name,
                    release_date
                );
                report.updated += 1;
            }
            Ok(false) => {
                warn!(
                    "Failed to update {} '{}' 'Date Added'",
                    item_kind.as_str(),
                    item_name
                );
                report
                    .failures
                    .push(format!("Failed to update {} '{item_name}'", item_kind.as_str()));
            }
            Err(e) => {
                warn!(
                    "Failed to update {} '{}' 'Date Added': {}",
                    item_kind.as_str(),
                    item_name,
                    e
                );
                report.failures.push(format!(
                    "Failed to update {} '{item_name}': {e}",
                    item_kind.as_str()
                ));
            }
        }
    }
}
