// Simulation switch with optimistic update
use crate::application::ports::SensorBackend;
use crate::application::view::ViewStore;
use std::sync::Arc;

pub struct SimulationToggle {
    view: Arc<ViewStore>,
    backend: Arc<dyn SensorBackend>,
}

impl SimulationToggle {
    pub fn new(view: Arc<ViewStore>, backend: Arc<dyn SensorBackend>) -> Self {
        Self { view, backend }
    }

    /// Show the switch as `active` right away and tell the backend. If the
    /// request fails the switch goes back to where it was before the click.
    /// Returns the state the switch ends in.
    pub async fn toggle(&self, active: bool) -> bool {
        let mut previous = active;
        self.view.update(|view| {
            previous = view.simulation.checked;
            view.simulation.checked = active;
        });
        tracing::info!("Simulation {}", if active { "ON" } else { "OFF" });

        match self.backend.set_simulation(active).await {
            Ok(()) => active,
            Err(e) => {
                tracing::error!("Toggle failed: {}", e);
                self.view
                    .update(|view| view.simulation.checked = previous);
                previous
            }
        }
    }
}
