//! Synchronous drain-to-completion driver.

use tracing::{debug, warn};

use crate::algorithm::{Algorithm, AlgorithmInput, AlgorithmOutput, Step};
use crate::decoration::{Decorator, NullDecorator};
use crate::error::AlgorithmResult;
use crate::models::Graph;

/// Steps an algorithm until it completes, with no delay and no observer.
///
/// Safe to use from inside another algorithm's step.
#[derive(Debug, Default)]
pub struct HeadlessRunner {
    steps_taken: u64,
}

impl HeadlessRunner {
    /// Create a new headless runner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize the algorithm against the decorator's graph and drain it.
    pub fn run(
        &mut self,
        algorithm: &mut dyn Algorithm,
        decorator: &mut dyn Decorator,
        input: &AlgorithmInput,
    ) -> AlgorithmResult<AlgorithmOutput> {
        if let Err(e) = algorithm.initialize(decorator.graph(), input) {
            warn!("{} rejected its input: {}", algorithm.short_name(), e);
            return Err(e);
        }
        self.drain(algorithm, decorator)
    }

    /// Step an initialized algorithm until it completes.
    pub fn drain(
        &mut self,
        algorithm: &mut dyn Algorithm,
        decorator: &mut dyn Decorator,
    ) -> AlgorithmResult<AlgorithmOutput> {
        loop {
            let step = algorithm.step(decorator)?;
            self.steps_taken += 1;
            if let Step::Complete(output) = step {
                debug!(
                    "{} completed after {} steps",
                    algorithm.short_name(),
                    self.steps_taken
                );
                return Ok(output);
            }
        }
    }

    /// Number of `step` calls made so far.
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }
}

/// Run an algorithm to completion on a graph without any decoration.
pub fn run_headless(
    algorithm: &mut dyn Algorithm,
    graph: &dyn Graph,
    input: &AlgorithmInput,
) -> AlgorithmResult<AlgorithmOutput> {
    let mut decorator = NullDecorator::new(graph);
    HeadlessRunner::new().run(algorithm, &mut decorator, input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::{InputKind, RunState};
    use crate::decoration::{DecorationState, MemoryDecorator};
    use crate::error::AlgorithmError;
    use crate::models::{UnweightedGraph, VertexId};

    /// Selects every vertex, one per step.
    #[derive(Default)]
    struct SelectAll {
        run: RunState<Vec<VertexId>>,
    }

    impl Algorithm for SelectAll {
        fn full_name(&self) -> &'static str {
            "Select all vertices"
        }

        fn short_name(&self) -> &'static str {
            "Select all"
        }

        fn input_kind(&self) -> InputKind {
            InputKind::None
        }

        fn initialize(&mut self, graph: &dyn Graph, input: &AlgorithmInput) -> AlgorithmResult<()> {
            if *input != AlgorithmInput::None {
                return Err(AlgorithmError::invalid_input("no input expected"));
            }
            let mut pending = graph.vertices();
            pending.reverse();
            self.run.start(pending);
            Ok(())
        }

        fn step(&mut self, decorator: &mut dyn Decorator) -> AlgorithmResult<Step> {
            let pending = self.run.running()?;
            match pending.pop() {
                Some(v) => {
                    decorator.set_vertex_state(v, DecorationState::Selected);
                    Ok(Step::Pending)
                }
                None => Ok(self.run.complete(AlgorithmOutput::new().with_name("all"))),
            }
        }
    }

    #[test]
    fn test_drains_to_completion() {
        let graph = UnweightedGraph::from_edges(3, &[(0, 1)]).unwrap();
        let mut decorator = MemoryDecorator::new(graph);
        let mut runner = HeadlessRunner::new();
        let output = runner
            .run(&mut SelectAll::default(), &mut decorator, &AlgorithmInput::None)
            .unwrap();

        assert_eq!(output.name.as_deref(), Some("all"));
        assert_eq!(runner.steps_taken(), 4);
        assert_eq!(decorator.vertex_state(VertexId(2)), DecorationState::Selected);
    }

    #[test]
    fn test_initialize_error_propagates() {
        let graph = UnweightedGraph::new(false);
        let result = run_headless(
            &mut SelectAll::default(),
            &graph,
            &AlgorithmInput::Vertex(VertexId(0)),
        );
        assert!(matches!(result, Err(AlgorithmError::InvalidInput(_))));
    }

    #[test]
    fn test_step_lifecycle_errors() {
        let graph = UnweightedGraph::from_edges(1, &[]).unwrap();
        let mut decorator = NullDecorator::new(&graph);
        let mut alg = SelectAll::default();
        assert_eq!(alg.step(&mut decorator), Err(AlgorithmError::NotInitialized));

        run_headless(&mut alg, &graph, &AlgorithmInput::None).unwrap();
        assert_eq!(alg.step(&mut decorator), Err(AlgorithmError::AlreadyComplete));
    }
}
