//! Search session: the state behind one interactive weather lookup.
//!
//! [`SessionState`] is a pure state machine. Every transition consumes the
//! current state and returns the next one, plus the [`Effect`] (if any) the
//! caller must perform. [`Session`] is the async driver that performs those
//! effects against a [`Geocoder`] and a [`WeatherSource`].
//!
//! Every effect carries the request sequence number that was current when it
//! was issued. Results arriving for an older sequence are dropped, so a slow
//! response can never overwrite a newer search or unit toggle.

use tracing::{debug, info};

use crate::{
    error::{LocationError, SearchError, WeatherError},
    model::{Coordinates, Reading, UnitPreference, WeatherSnapshot},
    provider::{Geocoder, WeatherSource},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No search submitted yet.
    #[default]
    Idle,
    /// Geocoding or weather fetch in flight.
    Searching,
    /// Last fetch succeeded.
    Displaying,
    /// Last attempt ended in an error.
    Failed,
}

/// Work the driver has to carry out on behalf of a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Resolve { seq: u64, query: String },
    FetchWeather { seq: u64, coordinates: Coordinates, unit: UnitPreference },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    phase: Phase,
    query: String,
    unit: UnitPreference,
    /// Trimmed name of the place being resolved or held.
    place: String,
    coordinates: Option<Coordinates>,
    reading: Option<Reading>,
    error: Option<SearchError>,
    seq: u64,
}

impl SessionState {
    pub fn new(unit: UnitPreference) -> Self {
        Self { unit, ..Self::default() }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Last submitted query, as typed.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn unit(&self) -> UnitPreference {
        self.unit
    }

    /// Place the held coordinates (or the pending resolution) belong to.
    pub fn place(&self) -> &str {
        &self.place
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    /// The displayed reading. Never present together with an error.
    pub fn reading(&self) -> Option<&Reading> {
        self.reading.as_ref()
    }

    pub fn error(&self) -> Option<&SearchError> {
        self.error.as_ref()
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// A new search. Blank queries fail locally and never produce an effect.
    ///
    /// Either way the sequence advances, so anything still in flight for an
    /// earlier search or toggle is dropped when it lands.
    pub fn submit(self, query: &str) -> (Self, Option<Effect>) {
        let seq = self.seq + 1;
        let trimmed = query.trim();
        if trimmed.is_empty() {
            let next = Self {
                phase: Phase::Failed,
                query: query.to_string(),
                reading: None,
                error: Some(SearchError::EmptyQuery),
                seq,
                ..self
            };
            return (next, None);
        }

        // The previous location no longer applies; a toggle before the new
        // one resolves must not fetch for it.
        let effect = Effect::Resolve { seq, query: trimmed.to_string() };
        let next = Self {
            phase: Phase::Searching,
            query: query.to_string(),
            place: trimmed.to_string(),
            coordinates: None,
            error: None,
            seq,
            ..self
        };
        (next, Some(effect))
    }

    /// Flip the unit. Re-fetches only when a location has been resolved.
    ///
    /// While a resolution is pending only the unit changes; the weather fetch
    /// that follows the resolution picks the new unit up.
    pub fn toggle_unit(self) -> (Self, Option<Effect>) {
        let unit = self.unit.toggled();

        let Some(coordinates) = self.coordinates else {
            return (Self { unit, ..self }, None);
        };

        let seq = self.seq + 1;
        let next = Self { phase: Phase::Searching, unit, error: None, seq, ..self };
        (next, Some(Effect::FetchWeather { seq, coordinates, unit }))
    }

    pub fn location_resolved(
        self,
        seq: u64,
        result: Result<Coordinates, LocationError>,
    ) -> (Self, Option<Effect>) {
        if seq != self.seq {
            debug!(seq, current = self.seq, "dropping stale geocoding result");
            return (self, None);
        }

        match result {
            Ok(coordinates) => {
                let effect = Effect::FetchWeather { seq, coordinates, unit: self.unit };
                (Self { coordinates: Some(coordinates), ..self }, Some(effect))
            }
            Err(e) => (self.fail(e.into()), None),
        }
    }

    /// `unit` is the unit the fetch was issued with.
    pub fn weather_fetched(
        self,
        seq: u64,
        unit: UnitPreference,
        result: Result<WeatherSnapshot, WeatherError>,
    ) -> Self {
        if seq != self.seq {
            debug!(seq, current = self.seq, "dropping stale weather result");
            return self;
        }

        match result {
            Ok(snapshot) => Self {
                phase: Phase::Displaying,
                reading: Some(Reading { snapshot, unit, place: self.place.clone() }),
                error: None,
                ..self
            },
            Err(e) => self.fail(e.into()),
        }
    }

    fn fail(self, error: SearchError) -> Self {
        Self { phase: Phase::Failed, reading: None, error: Some(error), ..self }
    }
}

/// Drives a [`SessionState`] by running its effects one after another.
#[derive(Debug)]
pub struct Session<G, W> {
    geocoder: G,
    weather: W,
    state: SessionState,
}

impl<G: Geocoder, W: WeatherSource> Session<G, W> {
    pub fn new(geocoder: G, weather: W, unit: UnitPreference) -> Self {
        Self { geocoder, weather, state: SessionState::new(unit) }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Resolve `query` and fetch its current conditions.
    pub async fn search(&mut self, query: &str) -> &SessionState {
        info!(query, "search submitted");
        let (next, effect) = std::mem::take(&mut self.state).submit(query);
        self.state = next;
        self.run(effect).await;
        &self.state
    }

    /// Switch units, re-fetching for the held location if there is one.
    pub async fn toggle_unit(&mut self) -> &SessionState {
        let (next, effect) = std::mem::take(&mut self.state).toggle_unit();
        info!(unit = %next.unit(), "unit toggled");
        self.state = next;
        self.run(effect).await;
        &self.state
    }

    async fn run(&mut self, mut effect: Option<Effect>) {
        while let Some(current) = effect.take() {
            match current {
                Effect::Resolve { seq, query } => {
                    let result = self.geocoder.resolve(&query).await;
                    let (next, follow_up) =
                        std::mem::take(&mut self.state).location_resolved(seq, result);
                    self.state = next;
                    effect = follow_up;
                }
                Effect::FetchWeather { seq, coordinates, unit } => {
                    let result = self.weather.fetch_current(coordinates, unit).await;
                    self.state = std::mem::take(&mut self.state).weather_fetched(seq, unit, result);
                }
            }
        }
    }
}
