use crate::model::{RunId, SessionRequest};

/// Side effects requested by `update`, executed by the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Open a stream subscription for a new turn
    StartRun { run_id: RunId, request: SessionRequest },

    /// Abort the active stream subscription
    StopRun,
}
