/// Watches the events a solver emits and may steer it.
///
/// Each solver defines its own event type (the numbers of one iteration) and
/// action type (what a caller may ask for, such as stopping early). Returning
/// `None` lets the solver carry on.
///
/// Any `FnMut(&Event) -> Option<Action>` closure is an observer, and `()` is
/// the observer that never intervenes:
///
/// ```
/// use numeris_core::Observer;
///
/// #[derive(Debug, PartialEq)]
/// struct Stop;
///
/// let mut seen = Vec::new();
/// let mut observer = |x: &f64| {
///     seen.push(*x);
///     (*x > 1.0).then_some(Stop)
/// };
/// assert_eq!(observer.observe(&0.5), None);
/// assert_eq!(observer.observe(&1.5), Some(Stop));
/// assert_eq!(seen, [0.5, 1.5]);
/// ```
pub trait Observer<Event, Action> {
    fn observe(&mut self, event: &Event) -> Option<Action>;
}

impl<Event, Action, F> Observer<Event, Action> for F
where
    F: FnMut(&Event) -> Option<Action>,
{
    fn observe(&mut self, event: &Event) -> Option<Action> {
        self(event)
    }
}

impl<Event, Action> Observer<Event, Action> for () {
    fn observe(&mut self, _event: &Event) -> Option<Action> {
        None
    }
}
