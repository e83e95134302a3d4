//! Forecast backend: async forecast fetching.
//! Requests run as tokio tasks; results come back over an mpsc channel
//! tagged with the ticket they were issued for.

use std::sync::Arc;

use tenki_forecast::{ForecastError, ForecastPair, ForecastSource};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::models::forecast_model::RequestTicket;

/// Messages sent from async operations back to the input loop
#[derive(Debug)]
pub enum ForecastServiceMessage {
    /// Result of fetching the forecast for `ticket`
    FetchDone {
        ticket: RequestTicket,
        result: Result<ForecastPair, ForecastError>,
    },
}

/// Fetch the forecast for `ticket` in the background.
/// Sends `FetchDone` on the channel when complete.
pub fn request_fetch<S>(
    tx: &UnboundedSender<ForecastServiceMessage>,
    source: Arc<S>,
    ticket: RequestTicket,
) -> JoinHandle<()>
where
    S: ForecastSource + 'static,
{
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = source.fetch(ticket.region_id()).await;
        if tx
            .send(ForecastServiceMessage::FetchDone { ticket, result })
            .is_err()
        {
            tracing::debug!("Forecast result dropped; receiver closed");
        }
    })
}
