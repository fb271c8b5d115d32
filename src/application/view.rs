// View model shared by every controller of the session
use crate::domain::chart::ChartData;
use crate::domain::coordinate::Coordinate;
use crate::domain::map::MapState;
use crate::domain::suggestion::SuggestionList;
use serde::Serialize;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// Style overrides some alerting path may put on the room temperature
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertStyle {
    pub color: String,
    pub bold: bool,
}

/// Readings from the local sensor. `None` means nothing was ever reported.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoomPanel {
    pub temperature: Option<String>,
    pub temperature_alert: Option<AlertStyle>,
    pub humidity: Option<String>,
    pub soil: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeatherPanel {
    pub temperature: Option<String>,
    pub windspeed: Option<String>,
    pub wind_direction: Option<String>,
    pub condition: Option<String>,
    pub elevation: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
}

/// Text of the latitude/longitude inputs
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CoordinateInputs {
    pub latitude: String,
    pub longitude: String,
}

impl CoordinateInputs {
    pub fn set(&mut self, at: Coordinate) {
        self.latitude = at.display_latitude();
        self.longitude = at.display_longitude();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchPanel {
    pub text: String,
    pub results: SuggestionList,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationPanel {
    pub checked: bool,
}

/// Everything a renderer needs to draw the dashboard page
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardView {
    pub room: RoomPanel,
    pub simulation: SimulationPanel,
    pub weather: WeatherPanel,
    pub coordinates: CoordinateInputs,
    pub search: SearchPanel,
    pub map: MapState,
    pub chart: Option<ChartData>,
}

/// Single owner of the [`DashboardView`].
///
/// Mutation happens only through [`ViewStore::update`], which runs to
/// completion synchronously, so no writer ever holds the view across an
/// await point.
#[derive(Debug)]
pub struct ViewStore {
    tx: watch::Sender<DashboardView>,
}

impl ViewStore {
    pub fn new(initial: DashboardView) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn update<F>(&self, modify: F)
    where
        F: FnOnce(&mut DashboardView),
    {
        self.tx.send_modify(modify);
    }

    pub fn read<R>(&self, f: impl FnOnce(&DashboardView) -> R) -> R {
        f(&self.tx.borrow())
    }

    pub fn snapshot(&self) -> DashboardView {
        self.tx.borrow().clone()
    }

    /// Current view first, then one item per change
    pub fn updates(&self) -> WatchStream<DashboardView> {
        WatchStream::new(self.tx.subscribe())
    }
}

impl Default for ViewStore {
    fn default() -> Self {
        Self::new(DashboardView::default())
    }
}
