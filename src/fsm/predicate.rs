use std::fmt;

/// Transition guard, re-evaluated on every call with no caching.
///
/// Evaluators get `&mut C` because some of them consult sensors that
/// rate-limit themselves (the player detector starts its cooldown timer on a
/// positive sighting).
pub enum Predicate<C> {
    /// Evaluator closure over the controller context.
    Func(Box<dyn Fn(&mut C) -> bool + Send + Sync>),
    /// Both children hold. Both are always evaluated, left first.
    And(Box<Predicate<C>>, Box<Predicate<C>>),
}

impl<C> Predicate<C> {
    pub fn new(evaluator: impl Fn(&mut C) -> bool + Send + Sync + 'static) -> Self {
        Self::Func(Box::new(evaluator))
    }

    /// Compose `self && other` without short-circuiting.
    pub fn and(self, other: Predicate<C>) -> Self {
        Self::And(Box::new(self), Box::new(other))
    }

    pub fn evaluate(&self, ctx: &mut C) -> bool {
        match self {
            Self::Func(evaluator) => evaluator(ctx),
            Self::And(left, right) => {
                let left = left.evaluate(ctx);
                let right = right.evaluate(ctx);
                left && right
            }
        }
    }
}

impl<C> fmt::Debug for Predicate<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Func(_) => f.write_str("Func(..)"),
            Self::And(left, right) => f.debug_tuple("And").field(left).field(right).finish(),
        }
    }
}
