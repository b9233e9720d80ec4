//! Reducer steps and the reduced box.

/// The result of one reducer call.
///
/// [`Step::Reduced`] is the "reduced box": the reducer has its final value
/// and wants no more items. Stopping is advisory for push sources; the
/// forwarding wrapper turns further pushes into no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step<A> {
    /// Keep going with this state.
    Continue(A),
    /// Stop; this is the final accumulated value.
    Reduced(A),
}

/// Boxes `value` as the final result of a reduction.
pub const fn reduced<A>(value: A) -> Step<A> {
    Step::Reduced(value)
}

/// Returns true if `step` asks the source to stop.
#[must_use]
pub const fn is_reduced<A>(step: &Step<A>) -> bool {
    step.is_reduced()
}

impl<A> Step<A> {
    /// Returns true for [`Step::Reduced`].
    #[must_use]
    pub const fn is_reduced(&self) -> bool {
        matches!(self, Self::Reduced(_))
    }

    /// Unboxes the state regardless of variant.
    #[must_use]
    pub fn into_inner(self) -> A {
        match self {
            Self::Continue(state) | Self::Reduced(state) => state,
        }
    }

    /// Returns a reference to the state.
    #[must_use]
    pub const fn state(&self) -> &A {
        match self {
            Self::Continue(state) | Self::Reduced(state) => state,
        }
    }

    /// Maps the state, preserving the variant.
    pub fn map<B>(self, f: impl FnOnce(A) -> B) -> Step<B> {
        match self {
            Self::Continue(state) => Step::Continue(f(state)),
            Self::Reduced(state) => Step::Reduced(f(state)),
        }
    }
}

impl<A> From<A> for Step<A> {
    fn from(state: A) -> Self {
        Self::Continue(state)
    }
}
