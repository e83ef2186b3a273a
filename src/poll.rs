//! Background blockchain-status poller.
//!
//! A plain interval loop: fetch the status endpoint, publish the latest
//! value through a `watch` channel, keep the previous value on error. No
//! in-flight dedup or backpressure — ticks are far apart relative to a
//! request. The owner aborts the returned handle to stop polling.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::api::blockchain;
use crate::api::models::ChainStatus;
use crate::http::ApiClient;

pub fn start_status_poller(
    client: ApiClient,
    interval: Duration,
) -> (watch::Receiver<Option<ChainStatus>>, JoinHandle<()>) {
    let (tx, rx) = watch::channel(None);

    let handle = tokio::spawn(async move {
        let mut timer = tokio::time::interval(interval);

        loop {
            timer.tick().await;
            match blockchain::status(&client).await {
                Ok(status) => {
                    debug!(
                        block_height = status.block_height,
                        connected = status.connected,
                        "Blockchain status updated"
                    );
                    if tx.send(Some(status)).is_err() {
                        // All receivers dropped; nothing left to publish to.
                        return;
                    }
                }
                Err(e) => warn!(error = %e, "Blockchain status poll failed"),
            }
        }
    });

    (rx, handle)
}
