//! Trait for systems that receive change notifications from the engine.

use std::future::Future;

use crate::types::Event;

/// Trait for receivers of typed change notifications.
///
/// The engine dispatches events through [`ChangeNotifier::notify`] as changes
/// are detected, in emission order, and never consumes a response:
/// notifications are fire-and-forget, and what happens with them (logging,
/// queueing, triggering a cleanup job) is entirely the receiver's decision.
///
/// In particular, the deletion-candidate events must not feed back into the
/// store synchronously; the engine reports stale entities, it does not decide
/// their fate.
pub trait ChangeNotifier {
    /// Delivers one event to the receiver.
    fn notify(&self, event: Event) -> impl Future<Output = ()> + Send;
}
