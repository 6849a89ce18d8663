mod client;
pub mod sse;

pub use client::LangGraphClient;

use crate::app::Effect;
use crate::model::{RunId, SessionRequest};

/// A stream collaborator: opens and aborts run subscriptions.
/// Events flow back through the application event channel.
pub trait RunTransport {
    /// Open a subscription for `run_id`, replacing any active one.
    fn start(&mut self, run_id: RunId, request: SessionRequest);

    /// Abort the active subscription, if any. No further events are sent for it.
    fn stop(&mut self);
}

/// Execute the effects returned by `update`, in order.
pub fn apply_effects<T: RunTransport + ?Sized>(transport: &mut T, effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::StartRun { run_id, request } => transport.start(run_id, request),
            Effect::StopRun => transport.stop(),
        }
    }
}
