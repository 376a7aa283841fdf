//! Consumer side of the report channel

use pagesum_errors::Error;

use crate::{EventMessage, EventReceiver};

/// Final destination of report events (a terminal, a UI, a test buffer)
///
/// A sink is only ever driven by the single consumer loop that owns the
/// receiver, so implementations need no synchronization of their own.
pub trait ReportSink {
    /// Deliver one complete event
    ///
    /// # Errors
    ///
    /// Returns an error if the sink cannot render or store the event.
    fn deliver(&mut self, message: &EventMessage) -> Result<(), Error>;
}

impl ReportSink for Vec<EventMessage> {
    fn deliver(&mut self, message: &EventMessage) -> Result<(), Error> {
        self.push(message.clone());
        Ok(())
    }
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn deliver(&mut self, message: &EventMessage) -> Result<(), Error> {
        (**self).deliver(message)
    }
}

/// Deliver every message until all reporters have been dropped
///
/// Returns the number of delivered messages.
///
/// # Errors
///
/// Stops at and returns the first sink error.
pub async fn drain<S: ReportSink + ?Sized>(
    receiver: &mut EventReceiver,
    sink: &mut S,
) -> Result<usize, Error> {
    let mut delivered = 0;
    while let Some(message) = receiver.recv().await {
        sink.deliver(&message)?;
        delivered += 1;
    }
    Ok(delivered)
}

/// Deliver whatever is already queued without waiting for more
///
/// # Errors
///
/// Stops at and returns the first sink error.
pub fn drain_ready<S: ReportSink + ?Sized>(
    receiver: &mut EventReceiver,
    sink: &mut S,
) -> Result<usize, Error> {
    let mut delivered = 0;
    while let Ok(message) = receiver.try_recv() {
        sink.deliver(&message)?;
        delivered += 1;
    }
    Ok(delivered)
}
