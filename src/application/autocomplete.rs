// Debounced location search
use crate::application::map_controller::MapController;
use crate::application::ports::Geocoder;
use crate::application::view::ViewStore;
use crate::application::weather_service::WeatherService;
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub debounce: Duration,
    pub min_query_len: usize,
    pub limit: usize,
}

/// Where a click on the page landed, as far as the result list cares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickTarget {
    SearchInput,
    SearchResults,
    Elsewhere,
}

/// Issues search queries and applies their results. Every query takes a
/// sequence number; a response that is older than the latest query is
/// dropped so a slow request cannot overwrite newer suggestions.
#[derive(Clone)]
struct SuggestionFetcher {
    view: Arc<ViewStore>,
    geocoder: Arc<dyn Geocoder>,
    limit: usize,
    latest: Arc<AtomicU64>,
}

impl SuggestionFetcher {
    fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }

    async fn fetch(&self, query: String) {
        let sequence = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        let result = self.geocoder.search(&query, self.limit).await;
        if self.latest.load(Ordering::SeqCst) != sequence {
            tracing::debug!("Discarding stale suggestions for {:?}", query);
            return;
        }

        match result {
            Ok(items) => {
                tracing::debug!("{} suggestions for {:?}", items.len(), query);
                self.view.update(|view| view.search.results.replace(items));
            }
            Err(e) => tracing::warn!("Location search for {:?} failed: {}", query, e),
        }
    }
}

pub struct AutocompleteController {
    view: Arc<ViewStore>,
    map: MapController,
    weather: WeatherService,
    fetcher: SuggestionFetcher,
    settings: SearchSettings,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl AutocompleteController {
    pub fn new(
        view: Arc<ViewStore>,
        geocoder: Arc<dyn Geocoder>,
        map: MapController,
        weather: WeatherService,
        settings: SearchSettings,
    ) -> Self {
        let fetcher = SuggestionFetcher {
            view: view.clone(),
            geocoder,
            limit: settings.limit,
            latest: Arc::new(AtomicU64::new(0)),
        };
        Self {
            view,
            map,
            weather,
            fetcher,
            settings,
            pending: Mutex::new(None),
        }
    }

    /// New text in the search box. Short input hides the list; anything
    /// else (re)starts the debounce timer, and only the last keystroke of a
    /// burst reaches the geocoder.
    pub fn on_input(&self, text: &str) {
        self.view.update(|view| view.search.text = text.to_string());
        self.cancel_pending();

        if text.chars().count() < self.settings.min_query_len {
            self.fetcher.invalidate();
            self.view.update(|view| view.search.results.hide());
            return;
        }

        let fetcher = self.fetcher.clone();
        let query = text.to_string();
        let debounce = self.settings.debounce;
        // Only the wait is cancellable; a query that already went out is
        // left to the sequence check.
        let task = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            tokio::spawn(async move { fetcher.fetch(query).await });
        });
        *self.lock_pending() = Some(task);
    }

    /// Pick the displayed row at `index`: fill the search box, close the
    /// list, recenter the map, update the coordinate inputs and look up the
    /// weather in the background. Returns `None` when no such row is on
    /// screen.
    pub fn select(&self, index: usize) -> Option<JoinHandle<()>> {
        let suggestion = self.view.read(|view| {
            let results = &view.search.results;
            if results.is_visible() {
                results.get(index).cloned()
            } else {
                None
            }
        })?;

        tracing::info!("Selected {:?}", suggestion.label);
        let at = suggestion.coordinate;
        self.view.update(|view| {
            view.search.text = suggestion.label;
            view.search.results.hide();
            view.coordinates.set(at);
        });
        self.map.center_on(at);

        let weather = self.weather.clone();
        Some(tokio::spawn(async move { weather.fetch_weather(at).await }))
    }

    /// Clicks anywhere but the search box or the list close the list
    pub fn on_click(&self, target: ClickTarget) {
        if target == ClickTarget::Elsewhere {
            self.view.update(|view| view.search.results.hide());
        }
    }

    fn cancel_pending(&self) {
        if let Some(task) = self.lock_pending().take() {
            task.abort();
        }
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        // A poisoned slot still holds a valid handle (or none).
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
