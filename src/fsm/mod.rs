//! Predicate-driven finite state machine.
//!
//! A [`StateMachine`] owns a set of boxed [`State`]s, a per-state list of
//! outgoing transitions and a global "any-state" list. Every hook receives the
//! owning controller's context `C`, so states and predicates read live
//! controller data without holding references into it.

mod machine;
mod predicate;

pub use machine::{StateId, StateMachine};
pub use predicate::Predicate;

/// One node of a transition graph.
///
/// `update` runs once per frame pass (variable step) and `fixed_update` once
/// per physics step. `on_enter`/`on_exit` bracket every switch; the machine
/// never skips either of them.
pub trait State<C>: Send + Sync {
    /// Label used in logs.
    fn name(&self) -> &'static str;

    fn on_enter(&mut self, _ctx: &mut C) {}

    fn update(&mut self, _ctx: &mut C) {}

    fn fixed_update(&mut self, _ctx: &mut C) {}

    fn on_exit(&mut self, _ctx: &mut C) {}
}
