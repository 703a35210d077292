//! Access gate for protected page shells.
//!
//! Pages consult this before rendering protected content. The decision
//! depends only on the current session state and whether the page is
//! admin-only; rendering and routing stay with the caller.

use crate::auth::{Destination, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Session still unresolved; render a loading affordance, decide nothing
    Wait,
    Allow,
    RedirectTo(Destination),
}

pub fn check_access(session: &Session, admin_only: bool) -> GateDecision {
    match session {
        Session::Unresolved => GateDecision::Wait,
        Session::Anonymous => GateDecision::RedirectTo(Destination::Landing),
        Session::Authenticated(_) => {
            if admin_only && !session.is_admin() {
                GateDecision::RedirectTo(Destination::ClientConsole)
            } else {
                GateDecision::Allow
            }
        }
    }
}
