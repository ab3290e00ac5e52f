use super::{Predicate, State};
use crate::error::FsmError;

/// Identity of a state inside one [`StateMachine`], issued by
/// [`StateMachine::add_state`]. States are compared by this handle, never by
/// name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(usize);

struct Transition<C> {
    to: StateId,
    predicate: Predicate<C>,
}

/// Transition-table state machine.
///
/// `C` is the controller context handed to every state hook and predicate.
/// Transition logic is declared up front with [`add_transition`] and
/// [`add_any_transition`]; the machine evaluates it once per frame pass.
///
/// # Usage
/// ```ignore
/// let mut fsm = StateMachine::new();
/// let idle = fsm.add_state(Idle);
/// let run = fsm.add_state(Run);
/// fsm.add_transition(idle, run, Predicate::new(|ctx: &mut Ctx| ctx.moving))?;
/// fsm.set_state(idle, &mut ctx)?;
/// // Each frame:
/// fsm.update(&mut ctx)?;
/// // Each physics step:
/// fsm.fixed_update(&mut ctx)?;
/// ```
///
/// [`add_transition`]: StateMachine::add_transition
/// [`add_any_transition`]: StateMachine::add_any_transition
pub struct StateMachine<C> {
    states: Vec<Box<dyn State<C>>>,
    /// Outgoing transitions, indexed by `StateId`.
    transitions: Vec<Vec<Transition<C>>>,
    any_transitions: Vec<Transition<C>>,
    current: Option<StateId>,
}

impl<C> Default for StateMachine<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> StateMachine<C> {
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            transitions: Vec::new(),
            any_transitions: Vec::new(),
            current: None,
        }
    }

    /// Register a state and return its handle.
    pub fn add_state(&mut self, state: impl State<C> + 'static) -> StateId {
        let id = StateId(self.states.len());
        self.states.push(Box::new(state));
        self.transitions.push(Vec::new());
        id
    }

    /// Append `from -> to`. Duplicate edges are legal and evaluated in
    /// insertion order.
    pub fn add_transition(
        &mut self,
        from: StateId,
        to: StateId,
        predicate: Predicate<C>,
    ) -> Result<(), FsmError> {
        self.check(from)?;
        self.check(to)?;
        self.transitions[from.0].push(Transition { to, predicate });
        Ok(())
    }

    /// Append an interrupt usable from every state. Any-state transitions are
    /// evaluated before the current state's own list.
    pub fn add_any_transition(&mut self, to: StateId, predicate: Predicate<C>) -> Result<(), FsmError> {
        self.check(to)?;
        self.any_transitions.push(Transition { to, predicate });
        Ok(())
    }

    /// Switch to `state`: `on_exit(old)`, assign, `on_enter(new)`.
    /// A no-op when `state` is already current.
    pub fn set_state(&mut self, state: StateId, ctx: &mut C) -> Result<(), FsmError> {
        self.check(state)?;
        if self.current == Some(state) {
            return Ok(());
        }
        if let Some(old) = self.current {
            self.states[old.0].on_exit(ctx);
        }
        tracing::debug!(
            from = self.current.map(|s| self.states[s.0].name()),
            to = self.states[state.0].name(),
            "state transition"
        );
        self.current = Some(state);
        self.states[state.0].on_enter(ctx);
        Ok(())
    }

    /// Frame pass. Evaluates any-state transitions, then the current state's
    /// transitions; the first true predicate wins. If that switches state the
    /// new state only gets `on_enter` this tick, otherwise the current state's
    /// `update` runs.
    ///
    /// Returns the newly entered state, if any.
    pub fn update(&mut self, ctx: &mut C) -> Result<Option<StateId>, FsmError> {
        let current = self.current.ok_or(FsmError::Uninitialized)?;

        match self.next_state(current, ctx) {
            Some(next) if next != current => {
                self.set_state(next, ctx)?;
                Ok(Some(next))
            }
            _ => {
                self.states[current.0].update(ctx);
                Ok(None)
            }
        }
    }

    /// Physics pass. Runs the current state's `fixed_update` and never
    /// evaluates transitions.
    pub fn fixed_update(&mut self, ctx: &mut C) -> Result<(), FsmError> {
        let current = self.current.ok_or(FsmError::Uninitialized)?;
        self.states[current.0].fixed_update(ctx);
        Ok(())
    }

    pub fn current(&self) -> Option<StateId> {
        self.current
    }

    pub fn is_in(&self, state: StateId) -> bool {
        self.current == Some(state)
    }

    pub fn state_name(&self, state: StateId) -> Option<&'static str> {
        self.states.get(state.0).map(|s| s.name())
    }

    pub fn current_name(&self) -> Option<&'static str> {
        self.current.and_then(|s| self.state_name(s))
    }

    /// First matching target, globals first. A match that targets the
    /// current state still ends the search.
    fn next_state(&self, current: StateId, ctx: &mut C) -> Option<StateId> {
        self.any_transitions
            .iter()
            .chain(&self.transitions[current.0])
            .find(|t| t.predicate.evaluate(ctx))
            .map(|t| t.to)
    }

    fn check(&self, state: StateId) -> Result<(), FsmError> {
        if state.0 < self.states.len() {
            Ok(())
        } else {
            Err(FsmError::UnknownState(state))
        }
    }
}
