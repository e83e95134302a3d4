//! Forecast request controller.
//!
//! Owns the selected region and the view derived from it. A submission for
//! a region goes `Loading` and then settles on `Loaded` or `Unavailable`;
//! an empty submission goes straight to `Unselected` without touching the
//! network.
//!
//! Each request is tagged with a [`RequestTicket`]. Only the ticket of the
//! most recent submission may settle the view, so a slow response for an
//! earlier region can never overwrite a newer one.

use std::sync::Arc;

use tenki_forecast::{ForecastError, ForecastPair, ForecastSource};

use crate::error_mapping::into_app_error;

/// The region chosen in the selector, or the blank option.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Region(String),
}

impl Selection {
    /// Blank input selects nothing; anything else is taken as a region id.
    pub fn from_id(id: &str) -> Self {
        let id = id.trim();
        if id.is_empty() {
            Self::None
        } else {
            Self::Region(id.to_string())
        }
    }

    pub fn region_id(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Region(id) => Some(id),
        }
    }
}

/// What the forecast area should currently show.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Unselected,
    Loading {
        region_id: String,
    },
    Loaded {
        region_id: String,
        forecast: ForecastPair,
    },
    Unavailable {
        region_id: String,
    },
}

impl ViewState {
    pub fn forecast(&self) -> Option<&ForecastPair> {
        match self {
            Self::Loaded { forecast, .. } => Some(forecast),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

/// Identifies one in-flight request. Issued by [`ForecastModel::begin_submit`]
/// and handed back to [`ForecastModel::complete`] with the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    seq: u64,
    region_id: String,
}

impl RequestTicket {
    pub fn region_id(&self) -> &str {
        &self.region_id
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Selection and view state for one forecast panel.
pub struct ForecastModel<S> {
    source: Arc<S>,
    selection: Selection,
    view: ViewState,
    next_seq: u64,
    pending: Option<RequestTicket>,
}

impl<S: ForecastSource> ForecastModel<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            selection: Selection::None,
            view: ViewState::Unselected,
            next_seq: 0,
            pending: None,
        }
    }

    /// Record the user's choice. Unknown ids are accepted; they are only
    /// checked by the backend once submitted.
    pub fn select_region(&mut self, id: &str) {
        self.selection = Selection::from_id(id);
        tracing::debug!(selection = ?self.selection, "Region selected");
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// The source requests should be sent to.
    pub fn source(&self) -> Arc<S> {
        Arc::clone(&self.source)
    }

    /// Whether a request is outstanding for the latest submission.
    pub fn pending(&self) -> Option<&RequestTicket> {
        self.pending.as_ref()
    }

    /// Start a submission.
    ///
    /// Returns the ticket for the request the caller must now issue, or `None`
    /// for an empty selection, in which case the view is already final.
    /// Any earlier outstanding ticket is superseded either way.
    pub fn begin_submit(&mut self, selection: Selection) -> Option<RequestTicket> {
        self.selection = selection;

        if let Some(stale) = self.pending.take() {
            tracing::debug!(
                seq = stale.seq,
                region_id = %stale.region_id,
                "Superseding outstanding forecast request"
            );
        }

        let Some(region_id) = self.selection.region_id().map(str::to_string) else {
            self.view = ViewState::Unselected;
            tracing::debug!("Submitted without a region; no request issued");
            return None;
        };

        self.next_seq += 1;
        let ticket = RequestTicket {
            seq: self.next_seq,
            region_id: region_id.clone(),
        };

        tracing::debug!(seq = ticket.seq, region_id = %region_id, "Forecast requested");
        self.view = ViewState::Loading { region_id };
        self.pending = Some(ticket.clone());
        Some(ticket)
    }

    /// Settle the request identified by `ticket`.
    ///
    /// Returns `false` and leaves the view untouched when `ticket` is not the
    /// latest submission's.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<ForecastPair, ForecastError>,
    ) -> bool {
        if self.pending.as_ref() != Some(&ticket) {
            tracing::info!(
                seq = ticket.seq,
                region_id = %ticket.region_id,
                "Discarding stale forecast response"
            );
            return false;
        }
        self.pending = None;

        let RequestTicket { region_id, .. } = ticket;
        self.view = match outcome {
            Ok(forecast) => {
                tracing::debug!(region_id = %region_id, "Forecast loaded");
                ViewState::Loaded {
                    region_id,
                    forecast,
                }
            }
            Err(e) => {
                let app_error = into_app_error(e);
                tracing::warn!(
                    region_id = %region_id,
                    error = %app_error,
                    "Forecast unavailable: {}",
                    app_error.user_message()
                );
                ViewState::Unavailable { region_id }
            }
        };
        true
    }

    /// Submit `selection` and wait for the outcome.
    pub async fn submit(&mut self, selection: Selection) -> &ViewState {
        if let Some(ticket) = self.begin_submit(selection) {
            let outcome = self.source.fetch(ticket.region_id()).await;
            self.complete(ticket, outcome);
        }
        &self.view
    }

    /// Submit whatever is currently selected.
    pub async fn submit_selected(&mut self) -> &ViewState {
        let selection = self.selection.clone();
        self.submit(selection).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tenki_forecast::{DayForecast, Temperature};

    fn day(date: &str, low: Temperature) -> DayForecast {
        DayForecast {
            date: date.to_string(),
            icon_url: "https://www.jma.go.jp/bosai/forecast/img/200.svg".to_string(),
            condition: "くもり".to_string(),
            high: Temperature::Measured(21.0),
            low,
            precipitation_percent: 30.0,
        }
    }

    fn pair() -> ForecastPair {
        ForecastPair {
            today: day("2024-10-16", Temperature::Unavailable),
            tomorrow: day("2024-10-17", Temperature::Measured(12.0)),
        }
    }

    /// Answers from a fixed table; ids missing from it fail with 404.
    #[derive(Default)]
    struct ScriptedSource {
        responses: HashMap<String, ForecastPair>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn with(id: &str, forecast: ForecastPair) -> Self {
            let mut responses = HashMap::new();
            responses.insert(id.to_string(), forecast);
            Self {
                responses,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ForecastSource for ScriptedSource {
        async fn fetch(&self, region_id: &str) -> Result<ForecastPair, ForecastError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .get(region_id)
                .cloned()
                .ok_or(ForecastError::Status(404))
        }
    }

    #[test]
    fn test_initial_state() {
        let model = ForecastModel::new(Arc::new(ScriptedSource::default()));
        assert_eq!(model.selection(), &Selection::None);
        assert_eq!(model.view(), &ViewState::Unselected);
        assert!(model.pending().is_none());
    }

    #[test]
    fn test_select_region_is_local_only() {
        let source = Arc::new(ScriptedSource::default());
        let mut model = ForecastModel::new(source.clone());

        model.select_region("130010");
        assert_eq!(model.selection(), &Selection::Region("130010".into()));
        assert_eq!(model.view(), &ViewState::Unselected);

        model.select_region("not-a-region");
        assert_eq!(model.selection().region_id(), Some("not-a-region"));

        model.select_region("  ");
        assert_eq!(model.selection(), &Selection::None);
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_submit_success_loads() {
        let source = Arc::new(ScriptedSource::with("130010", pair()));
        let mut model = ForecastModel::new(source.clone());

        let view = model.submit(Selection::Region("130010".into())).await.clone();

        assert_eq!(
            view,
            ViewState::Loaded {
                region_id: "130010".into(),
                forecast: pair()
            }
        );
        assert_eq!(source.calls(), 1);
        assert!(model.pending().is_none());
    }

    #[tokio::test]
    async fn test_submit_failure_is_unavailable() {
        let source = Arc::new(ScriptedSource::default());
        let mut model = ForecastModel::new(source);

        let view = model.submit(Selection::Region("999999".into())).await;
        assert_eq!(
            view,
            &ViewState::Unavailable {
                region_id: "999999".into()
            }
        );
    }

    #[tokio::test]
    async fn test_empty_submit_from_any_state() {
        let source = Arc::new(ScriptedSource::with("130010", pair()));
        let mut model = ForecastModel::new(source.clone());

        assert_eq!(model.submit(Selection::None).await, &ViewState::Unselected);

        model.submit(Selection::Region("130010".into())).await;
        assert!(model.view().forecast().is_some());
        assert_eq!(model.submit(Selection::None).await, &ViewState::Unselected);

        model.submit(Selection::Region("404040".into())).await;
        assert!(matches!(model.view(), ViewState::Unavailable { .. }));
        assert_eq!(model.submit(Selection::None).await, &ViewState::Unselected);

        // One call each for the two region submissions, none for the blanks.
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_submit_selected_uses_current_selection() {
        let source = Arc::new(ScriptedSource::with("270000", pair()));
        let mut model = ForecastModel::new(source);

        model.select_region("270000");
        let view = model.submit_selected().await;
        assert!(matches!(view, ViewState::Loaded { region_id, .. } if region_id == "270000"));
    }

    #[test]
    fn test_begin_submit_drops_previous_forecast() {
        let mut model = ForecastModel::new(Arc::new(ScriptedSource::default()));

        let first = model
            .begin_submit(Selection::Region("130010".into()))
            .unwrap();
        assert!(model.complete(first, Ok(pair())));
        assert!(model.view().forecast().is_some());

        let second = model
            .begin_submit(Selection::Region("270000".into()))
            .unwrap();
        assert_eq!(
            model.view(),
            &ViewState::Loading {
                region_id: "270000".into()
            }
        );
        assert!(model.view().forecast().is_none());
        assert_eq!(model.pending(), Some(&second));
    }

    #[test]
    fn test_late_response_is_discarded() {
        let mut model = ForecastModel::new(Arc::new(ScriptedSource::default()));

        let tokyo = model
            .begin_submit(Selection::Region("130010".into()))
            .unwrap();
        let osaka = model
            .begin_submit(Selection::Region("270000".into()))
            .unwrap();
        assert!(osaka.seq() > tokyo.seq());

        assert!(model.complete(osaka, Err(ForecastError::Status(500))));
        assert!(!model.complete(tokyo, Ok(pair())));

        assert_eq!(
            model.view(),
            &ViewState::Unavailable {
                region_id: "270000".into()
            }
        );
    }

    #[test]
    fn test_late_response_after_blank_submit_is_discarded() {
        let mut model = ForecastModel::new(Arc::new(ScriptedSource::default()));

        let ticket = model
            .begin_submit(Selection::Region("130010".into()))
            .unwrap();
        assert!(model.begin_submit(Selection::None).is_none());
        assert!(!model.complete(ticket, Ok(pair())));
        assert_eq!(model.view(), &ViewState::Unselected);
    }

    #[test]
    fn test_same_region_resubmitted_only_latest_counts() {
        let mut model = ForecastModel::new(Arc::new(ScriptedSource::default()));

        let first = model
            .begin_submit(Selection::Region("130010".into()))
            .unwrap();
        let second = model
            .begin_submit(Selection::Region("130010".into()))
            .unwrap();
        assert_ne!(first, second);

        assert!(!model.complete(first, Ok(pair())));
        assert!(model.view().is_loading());
        assert!(model.complete(second, Ok(pair())));
        assert!(model.view().forecast().is_some());
    }

    #[test]
    fn test_ticket_cannot_settle_twice() {
        let mut model = ForecastModel::new(Arc::new(ScriptedSource::default()));

        let ticket = model
            .begin_submit(Selection::Region("130010".into()))
            .unwrap();
        assert!(model.complete(ticket.clone(), Ok(pair())));
        assert!(!model.complete(ticket, Err(ForecastError::Status(500))));
        assert!(model.view().forecast().is_some());
    }
}
