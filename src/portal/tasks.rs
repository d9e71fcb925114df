use crate::router::Route;

/// Deferred work queued on the portal scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Task {
    /// Second phase of a show; applies only if `route` is still shown at `generation`.
    Activate { route: Route, generation: u64 },
    /// Change the navigation address (delayed post-login / post-signup redirect).
    Navigate(Route),
    /// Forced re-evaluation of the current address.
    Reroute,
}
