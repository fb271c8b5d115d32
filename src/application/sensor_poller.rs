// Periodic polling of the local sensor
use crate::application::ports::SensorBackend;
use crate::application::view::ViewStore;
use crate::domain::sensor::{format_reading, SensorSnapshot};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Diagnostics for the poller. Failures are expected while the sensor
/// backend is starting, so they only show up here and in debug logs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PollerHealth {
    pub last_success: Option<DateTime<Utc>>,
    pub consecutive_failures: u32,
    pub total_polls: u64,
}

pub struct SensorPoller {
    view: Arc<ViewStore>,
    backend: Arc<dyn SensorBackend>,
    health: Mutex<PollerHealth>,
}

impl SensorPoller {
    pub fn new(view: Arc<ViewStore>, backend: Arc<dyn SensorBackend>) -> Self {
        Self {
            view,
            backend,
            health: Mutex::new(PollerHealth::default()),
        }
    }

    pub async fn poll_once(&self) {
        let result = self.backend.read_sensor().await;

        let mut health = self.health.lock().unwrap_or_else(|p| p.into_inner());
        health.total_polls += 1;
        match result {
            Ok(snapshot) => {
                health.last_success = Some(Utc::now());
                health.consecutive_failures = 0;
                drop(health);
                self.apply(&snapshot);
            }
            Err(e) => {
                health.consecutive_failures += 1;
                tracing::debug!("Waiting for sensor backend: {}", e);
            }
        }
    }

    /// Poll every `period` for the life of the process. The first poll
    /// happens one period after start, and a failed poll never stops the
    /// loop.
    pub async fn run(self: Arc<Self>, period: Duration) {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            self.poll_once().await;
        }
    }

    pub fn health(&self) -> PollerHealth {
        self.health
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    fn apply(&self, snapshot: &SensorSnapshot) {
        self.view.update(|view| {
            let room = &mut view.room;
            if let Some(temperature) = snapshot.temperature {
                room.temperature = Some(format_reading(temperature));
                room.temperature_alert = None;
            }
            if let Some(humidity) = snapshot.humidity {
                room.humidity = Some(format_reading(humidity));
            }
            if let Some(soil) = snapshot.soil {
                room.soil = Some(format_reading(soil));
            }

            // Only ever switches the toggle on; turning it off is the user's call.
            if snapshot.is_simulator() && !view.simulation.checked {
                view.simulation.checked = true;
            }
        });
    }
}
