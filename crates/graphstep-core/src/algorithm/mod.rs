//! The pausable algorithm abstraction.
//!
//! An algorithm is an explicit state machine. [`Algorithm::initialize`]
//! validates preconditions; each [`Algorithm::step`] call advances to the next
//! observable checkpoint and returns [`Step::Pending`], until the final call
//! returns [`Step::Complete`] with the output.
//!
//! ```text
//! not initialized --initialize--> stepping --step*--> complete
//!        |                            |
//!        +---- AlgorithmError <-------+
//! ```

mod io;
pub mod precondition;

pub use io::{AlgorithmInput, AlgorithmOutput, InputKind, Message, MessageLevel};

use crate::decoration::Decorator;
use crate::error::{AlgorithmError, AlgorithmResult};
use crate::models::Graph;

/// Outcome of one [`Algorithm::step`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// A checkpoint was reached; more steps follow.
    Pending,
    /// The run finished.
    Complete(AlgorithmOutput),
}

impl Step {
    /// Whether the run finished.
    pub fn is_complete(&self) -> bool {
        matches!(self, Step::Complete(_))
    }
}

/// A graph algorithm that can be suspended at every observable checkpoint.
pub trait Algorithm: Send {
    /// Descriptive name, e.g. "Kruskal's minimum spanning tree".
    fn full_name(&self) -> &'static str;

    /// Short name, e.g. "Kruskal".
    fn short_name(&self) -> &'static str;

    /// Shape of input expected by [`Algorithm::initialize`].
    fn input_kind(&self) -> InputKind;

    /// Validate preconditions and set up working state.
    ///
    /// The graph is only read here; algorithms that need it later keep their
    /// own copy, so the caller's graph is never mutated.
    fn initialize(&mut self, graph: &dyn Graph, input: &AlgorithmInput) -> AlgorithmResult<()>;

    /// Advance to the next checkpoint.
    ///
    /// Fails with [`AlgorithmError::NotInitialized`] before a successful
    /// `initialize` and with [`AlgorithmError::AlreadyComplete`] after the
    /// output has been returned.
    fn step(&mut self, decorator: &mut dyn Decorator) -> AlgorithmResult<Step>;
}

impl<A: Algorithm + ?Sized> Algorithm for Box<A> {
    fn full_name(&self) -> &'static str {
        (**self).full_name()
    }

    fn short_name(&self) -> &'static str {
        (**self).short_name()
    }

    fn input_kind(&self) -> InputKind {
        (**self).input_kind()
    }

    fn initialize(&mut self, graph: &dyn Graph, input: &AlgorithmInput) -> AlgorithmResult<()> {
        (**self).initialize(graph, input)
    }

    fn step(&mut self, decorator: &mut dyn Decorator) -> AlgorithmResult<Step> {
        (**self).step(decorator)
    }
}

/// Lifecycle wrapper around an algorithm's working state.
#[derive(Debug, Clone, Default)]
pub enum RunState<S> {
    /// `initialize` has not succeeded yet.
    #[default]
    Uninitialized,
    /// Stepping.
    Running(S),
    /// Output was returned.
    Complete,
}

impl<S> RunState<S> {
    /// Start running with fresh working state.
    pub fn start(&mut self, state: S) {
        *self = RunState::Running(state);
    }

    /// Working state, or the lifecycle error for stepping now.
    pub fn running(&mut self) -> AlgorithmResult<&mut S> {
        match self {
            RunState::Running(state) => Ok(state),
            RunState::Uninitialized => Err(AlgorithmError::NotInitialized),
            RunState::Complete => Err(AlgorithmError::AlreadyComplete),
        }
    }

    /// Whether the working state is present.
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running(_))
    }

    /// Drop the working state and produce the final step.
    pub fn complete(&mut self, output: AlgorithmOutput) -> Step {
        *self = RunState::Complete;
        Step::Complete(output)
    }

    /// Take the working state out, marking the run complete.
    pub fn take(&mut self) -> Option<S> {
        match std::mem::replace(self, RunState::Complete) {
            RunState::Running(state) => Some(state),
            _ => None,
        }
    }
}
