//! Route guards
//!
//! A guard decides, per request, whether a route shows its content, redirects
//! or shows a denial page. The three route variants share one implementation
//! and differ only in their [`GuardPolicy`].
//!
//! - [`policy`] - acceptance predicates and rendering of guard states
//! - [`activation`] - the pending/authorized/denied state machine

pub mod activation;
pub mod policy;

pub use activation::{GuardActivation, GuardState, RouteGuard};
pub use policy::{Audience, GuardPolicy, RenderOutcome, UnknownGuard, LOGIN_PATH};
