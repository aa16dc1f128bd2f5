use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::access::{BulkDispatcher, BulkError, BulkRequest};
use crate::remote::RemoteClient;

pub(super) struct BulkOutcome {
    pub(super) request: BulkRequest,
    /// The caller merges `request` into its current grants on `Ok`.
    pub(super) result: Result<(), BulkError>,
}

/// Runs bulk grant/revoke calls off the UI thread, one at a time.
pub(super) struct BulkWorker {
    client: RemoteClient,
    dispatcher: BulkDispatcher,
    tx: Sender<BulkOutcome>,
    rx: Receiver<BulkOutcome>,
}

impl BulkWorker {
    pub(super) fn new(client: RemoteClient) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            client,
            dispatcher: BulkDispatcher::default(),
            tx,
            rx,
        }
    }

    pub(super) fn is_busy(&self) -> bool {
        self.dispatcher.is_busy()
    }

    /// Starts `request`; refused while another call is outstanding.
    pub(super) fn submit(&self, request: BulkRequest) -> Result<(), BulkError> {
        let guard = self.dispatcher.begin()?;
        let client = self.client.clone();
        let tx = self.tx.clone();
        thread::Builder::new()
            .name("flowgate-bulk".to_string())
            .spawn(move || {
                let result = request.send(&client).map_err(BulkError::from);
                let _ = tx.send(BulkOutcome { request, result });
                drop(guard);
            })
            .map_err(|err| {
                tracing::error!(error = %err, "spawn bulk worker");
                BulkError::Busy
            })?;
        Ok(())
    }

    pub(super) fn poll(&self) -> Option<BulkOutcome> {
        self.rx.try_recv().ok()
    }
}
