/// Receives the rewrites performed by the simplifier, one at a time.
///
/// Callers that only want the final expression pass `&mut ()`, which discards every step. The REPL
/// passes a `Vec` to show how an answer was reached.
pub trait StepCollector<S> {
    /// Records a step.
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        Vec::push(self, step);
    }
}
