use firedata::{DataError, FireRecord};
use geoprim::LatLngBounds;

use crate::surface::MapSurface;

/// Padding ratio applied when fitting the viewport to the added markers.
pub const FIT_PAD_RATIO: f64 = 0.2;

const SHOW_LABEL: &str = "Show Active Fires";
const REMOVE_LABEL: &str = "Remove Active Fires";

/// What a click should do, decided synchronously from current state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ClickPath {
    /// Inactive: issue one fetch, then call `finish_fetch` with the result.
    Fetch,
    /// Active: markers were removed synchronously; the click is done.
    Clear,
    /// A fetch from an earlier click is still in flight; do nothing.
    Busy,
}

/// Tagged result of one completed click.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// Markers added and viewport fitted; now active.
    Shown(usize),
    /// Markers removed; now inactive.
    Cleared,
    /// Server reported zero fires; state untouched, still inactive.
    NoFires,
    /// Fetch or decode failed; state untouched, still inactive.
    Failed(DataError),
}

impl ClickOutcome {
    /// User-facing notice, if this outcome warrants one. Successful toggles
    /// are silent; the map and button label are the feedback.
    pub fn notice(&self) -> Option<String> {
        match self {
            ClickOutcome::Shown(_) | ClickOutcome::Cleared => None,
            ClickOutcome::NoFires => {
                Some("No active fires found in the last 24 hours".to_string())
            }
            ClickOutcome::Failed(DataError::Application(msg)) => Some(msg.clone()),
            ClickOutcome::Failed(DataError::Transport(msg)) => {
                Some(format!("Error loading fire data: {msg}"))
            }
            ClickOutcome::Failed(DataError::Decode(msg)) => {
                Some(format!("Unexpected fire data from server: {msg}"))
            }
        }
    }
}

/// Toggle state plus the held marker handles.
///
/// Invariant, checked at the end of every completed click: the overlay is
/// active iff the marker list is non-empty iff the button label reads
/// "Remove Active Fires".
#[derive(Debug)]
pub struct FireOverlay<M> {
    active: bool,
    markers: Vec<M>,
    fetch_pending: bool,
}

impl<M> Default for FireOverlay<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> FireOverlay<M> {
    pub fn new() -> Self {
        FireOverlay {
            active: false,
            markers: Vec::new(),
            fetch_pending: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// True while a fetch started by `begin_click` has not been finished.
    /// The host disables the toggle button for the duration.
    pub fn fetch_pending(&self) -> bool {
        self.fetch_pending
    }

    pub fn button_label(&self) -> &'static str {
        if self.active { REMOVE_LABEL } else { SHOW_LABEL }
    }

    /// Decide the path for a click. Marks a fetch as pending when it returns
    /// `Fetch`; the caller must follow up with exactly one `finish_fetch`.
    pub fn begin_click(&mut self) -> ClickPath {
        if self.fetch_pending {
            ClickPath::Busy
        } else if self.active {
            ClickPath::Clear
        } else {
            self.fetch_pending = true;
            ClickPath::Fetch
        }
    }

    /// Synchronous deactivation: remove every held marker, clear the list.
    pub fn clear<S>(&mut self, surface: &mut S) -> ClickOutcome
    where
        S: MapSurface<Marker = M>,
    {
        for marker in self.markers.drain(..) {
            surface.remove_marker(marker);
        }
        self.active = false;
        debug_assert!(self.invariant_holds());
        ClickOutcome::Cleared
    }

    /// Commit the result of the fetch started by `begin_click`.
    ///
    /// Non-empty success adds one marker per record in response order, fits
    /// the viewport to their padded bounds and activates. Empty success and
    /// failure mutate nothing; an empty result deliberately leaves the
    /// toggle un-flipped, so the next click fetches again.
    pub fn finish_fetch<S>(
        &mut self,
        result: Result<Vec<FireRecord>, DataError>,
        surface: &mut S,
    ) -> ClickOutcome
    where
        S: MapSurface<Marker = M>,
    {
        self.fetch_pending = false;

        let outcome = match result {
            Err(err) => ClickOutcome::Failed(err),
            Ok(fires) if fires.is_empty() => ClickOutcome::NoFires,
            Ok(fires) => {
                for fire in &fires {
                    self.markers.push(surface.add_fire_marker(fire));
                }
                if let Some(bounds) = LatLngBounds::from_points(fires.iter().map(|f| f.position()))
                {
                    surface.fit_bounds(bounds, FIT_PAD_RATIO);
                }
                self.active = true;
                ClickOutcome::Shown(fires.len())
            }
        };

        debug_assert!(self.invariant_holds());
        outcome
    }

    /// Marker-list / state / label consistency.
    pub fn invariant_holds(&self) -> bool {
        let label_matches = if self.active {
            self.button_label() == REMOVE_LABEL
        } else {
            self.button_label() == SHOW_LABEL
        };
        self.active == !self.markers.is_empty() && label_matches
    }
}

#[cfg(test)]
mod tests {
    use firedata::{Confidence, DataError, DayNight, FireRecord};
    use geoprim::LatLngBounds;

    use super::{ClickOutcome, ClickPath, FireOverlay};
    use crate::surface::MapSurface;

    /// Test double that records every surface mutation.
    #[derive(Default)]
    struct RecordingSurface {
        next_id: u64,
        live: Vec<u64>,
        fitted: Option<(LatLngBounds, f64)>,
    }

    impl MapSurface for RecordingSurface {
        type Marker = u64;

        fn add_fire_marker(&mut self, _record: &FireRecord) -> u64 {
            self.next_id += 1;
            self.live.push(self.next_id);
            self.next_id
        }

        fn remove_marker(&mut self, marker: u64) {
            self.live.retain(|&m| m != marker);
        }

        fn fit_bounds(&mut self, bounds: LatLngBounds, pad_ratio: f64) {
            self.fitted = Some((bounds, pad_ratio));
        }
    }

    fn fire(lat: f64, lng: f64) -> FireRecord {
        FireRecord {
            latitude: lat,
            longitude: lng,
            brightness: 310.0,
            confidence: Confidence::Numeric(85.0),
            acq_date: "2024-01-01".to_string(),
            acq_time: "1200".to_string(),
            satellite: "Terra".to_string(),
            daynight: DayNight::Day,
            frp: 12.5,
        }
    }

    fn activate(
        overlay: &mut FireOverlay<u64>,
        surface: &mut RecordingSurface,
        fires: Vec<FireRecord>,
    ) -> ClickOutcome {
        assert_eq!(overlay.begin_click(), ClickPath::Fetch);
        overlay.finish_fetch(Ok(fires), surface)
    }

    #[test]
    fn starts_inactive_with_show_label() {
        let overlay: FireOverlay<u64> = FireOverlay::new();
        assert!(!overlay.is_active());
        assert_eq!(overlay.marker_count(), 0);
        assert_eq!(overlay.button_label(), "Show Active Fires");
        assert!(overlay.invariant_holds());
    }

    #[test]
    fn adds_one_marker_per_record_and_fits_padded_bounds() {
        let mut overlay = FireOverlay::new();
        let mut surface = RecordingSurface::default();

        let outcome = activate(
            &mut overlay,
            &mut surface,
            vec![fire(34.1, -118.3), fire(45.5, -122.7), fire(33.4, -112.1)],
        );

        assert_eq!(outcome, ClickOutcome::Shown(3));
        assert_eq!(overlay.marker_count(), 3);
        assert_eq!(surface.live.len(), 3);
        assert_eq!(overlay.button_label(), "Remove Active Fires");
        let (bounds, pad) = surface.fitted.unwrap();
        assert_eq!(bounds, LatLngBounds::new(33.4, -122.7, 45.5, -112.1));
        assert_eq!(pad, 0.2);
        assert!(overlay.invariant_holds());
    }

    #[test]
    fn single_record_fits_to_its_point() {
        let mut overlay = FireOverlay::new();
        let mut surface = RecordingSurface::default();

        activate(&mut overlay, &mut surface, vec![fire(34.1, -118.3)]);

        let (bounds, _) = surface.fitted.unwrap();
        assert_eq!(bounds, LatLngBounds::new(34.1, -118.3, 34.1, -118.3));
    }

    #[test]
    fn clear_removes_every_marker() {
        let mut overlay = FireOverlay::new();
        let mut surface = RecordingSurface::default();
        activate(&mut overlay, &mut surface, vec![fire(34.1, -118.3), fire(45.5, -122.7)]);

        assert_eq!(overlay.begin_click(), ClickPath::Clear);
        let outcome = overlay.clear(&mut surface);

        assert_eq!(outcome, ClickOutcome::Cleared);
        assert!(surface.live.is_empty());
        assert_eq!(overlay.marker_count(), 0);
        assert_eq!(overlay.button_label(), "Show Active Fires");
        assert!(overlay.invariant_holds());
    }

    #[test]
    fn two_full_cycles_return_to_initial_state() {
        let mut overlay = FireOverlay::new();
        let mut surface = RecordingSurface::default();

        for _ in 0..2 {
            activate(&mut overlay, &mut surface, vec![fire(34.1, -118.3)]);
            assert_eq!(overlay.begin_click(), ClickPath::Clear);
            overlay.clear(&mut surface);
        }

        assert!(!overlay.is_active());
        assert_eq!(overlay.marker_count(), 0);
        assert!(surface.live.is_empty());
        assert_eq!(overlay.button_label(), "Show Active Fires");
    }

    #[test]
    fn empty_result_shows_notice_and_stays_inactive() {
        let mut overlay = FireOverlay::new();
        let mut surface = RecordingSurface::default();

        let outcome = activate(&mut overlay, &mut surface, vec![]);

        assert_eq!(outcome, ClickOutcome::NoFires);
        assert_eq!(
            outcome.notice().unwrap(),
            "No active fires found in the last 24 hours"
        );
        assert!(!overlay.is_active());
        assert!(surface.live.is_empty());
        assert!(surface.fitted.is_none());
        // next click fetches again rather than toggling
        assert_eq!(overlay.begin_click(), ClickPath::Fetch);
    }

    #[test]
    fn application_failure_mutates_nothing_and_carries_message() {
        let mut overlay = FireOverlay::new();
        let mut surface = RecordingSurface::default();

        assert_eq!(overlay.begin_click(), ClickPath::Fetch);
        let outcome =
            overlay.finish_fetch(Err(DataError::Application("x".to_string())), &mut surface);

        assert!(matches!(outcome, ClickOutcome::Failed(_)));
        assert!(outcome.notice().unwrap().contains('x'));
        assert!(!overlay.is_active());
        assert_eq!(overlay.marker_count(), 0);
        assert!(surface.live.is_empty());
        assert!(overlay.invariant_holds());
    }

    #[test]
    fn transport_failure_notice_names_the_load_error() {
        let outcome = ClickOutcome::Failed(DataError::Transport("timeout".to_string()));
        let notice = outcome.notice().unwrap();
        assert!(notice.contains("Error loading fire data"));
        assert!(notice.contains("timeout"));
    }

    #[test]
    fn clicks_while_fetch_pending_are_busy() {
        let mut overlay: FireOverlay<u64> = FireOverlay::new();
        let mut surface = RecordingSurface::default();

        assert_eq!(overlay.begin_click(), ClickPath::Fetch);
        assert!(overlay.fetch_pending());
        assert_eq!(overlay.begin_click(), ClickPath::Busy);

        overlay.finish_fetch(Ok(vec![fire(34.1, -118.3)]), &mut surface);
        assert!(!overlay.fetch_pending());
        assert_eq!(overlay.begin_click(), ClickPath::Clear);
    }

    #[test]
    fn successful_outcomes_are_silent() {
        assert!(ClickOutcome::Shown(3).notice().is_none());
        assert!(ClickOutcome::Cleared.notice().is_none());
    }
}
