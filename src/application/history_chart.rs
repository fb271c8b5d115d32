// Sensor history chart refreshing
use crate::application::ports::SensorBackend;
use crate::application::view::ViewStore;
use crate::domain::chart::ChartData;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

pub struct HistoryChartController {
    view: Arc<ViewStore>,
    backend: Arc<dyn SensorBackend>,
}

impl HistoryChartController {
    pub fn new(view: Arc<ViewStore>, backend: Arc<dyn SensorBackend>) -> Self {
        Self { view, backend }
    }

    pub fn initialize(&self) {
        self.view
            .update(|view| view.chart = Some(ChartData::sensor_history()));
    }

    /// Replace the whole dataset with the backend's current history.
    /// On failure the chart keeps showing the last good dataset.
    pub async fn refresh(&self) {
        let history = match self.backend.read_history().await {
            Ok(history) => history,
            Err(e) => {
                tracing::error!("Chart update failed: {}", e);
                return;
            }
        };

        self.view.update(|view| {
            view.chart
                .get_or_insert_with(ChartData::sensor_history)
                .replace_history(&history);
        });
    }

    pub async fn run(self: Arc<Self>, period: Duration) {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            self.refresh().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{history, FakeBackend};

    fn controller(backend: Arc<FakeBackend>) -> (HistoryChartController, Arc<ViewStore>) {
        let view = Arc::new(ViewStore::default());
        let chart = HistoryChartController::new(view.clone(), backend);
        chart.initialize();
        (chart, view)
    }

    fn chart(view: &ViewStore) -> ChartData {
        view.snapshot().chart.expect("chart initialized")
    }

    #[tokio::test]
    async fn test_refresh_replaces_longer_history() {
        let backend = Arc::new(FakeBackend::with_histories(vec![history(30), history(7)]));
        let (controller, view) = controller(backend);

        controller.refresh().await;
        assert_eq!(chart(&view).len(), 30);

        controller.refresh().await;
        let chart = chart(&view);
        assert_eq!(chart.labels.len(), 7);
        for series in &chart.series {
            assert_eq!(series.values.len(), 7);
        }
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_last_dataset() {
        let backend = Arc::new(FakeBackend::with_histories(vec![history(5)]));
        let (controller, view) = controller(backend.clone());

        controller.refresh().await;
        controller.refresh().await;

        assert_eq!(backend.history_reads(), 2);
        assert_eq!(chart(&view).len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_refreshes_on_interval() {
        let backend = Arc::new(FakeBackend::with_histories(vec![history(1), history(2), history(3)]));
        let view = Arc::new(ViewStore::default());
        let controller = Arc::new(HistoryChartController::new(view.clone(), backend.clone()));
        controller.initialize();
        let task = tokio::spawn(controller.run(Duration::from_millis(2_000)));

        tokio::time::sleep(Duration::from_millis(4_001)).await;
        assert_eq!(backend.history_reads(), 2);
        assert_eq!(chart(&view).len(), 2);

        task.abort();
    }
}
