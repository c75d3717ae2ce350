//! Timed, pausable driver for interactive use.
//!
//! ```text
//!            execute              pause
//!   Init ------------> Running --------> Paused
//!    ^  ^                |  ^  <--------  |  ^
//!    |  |      complete  |  |   resume    |  | next (one step)
//!    |  |                v  |             +--+
//!    |  +----------- Done   |
//!    |     execute ---------+
//!    +---- stop (from any state)
//! ```
//!
//! The algorithm is stepped on a tokio task. Control operations change the
//! state synchronously and wake the task; a step already in progress always
//! runs to its next checkpoint.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, ReentrantMutex, RwLock};
use serde::{Deserialize, Serialize};
use tokio::sync::{oneshot, Notify};
use tracing::{debug, info, trace, warn};

use super::config::{RunnerConfig, MAX_SPEED};
use crate::algorithm::{Algorithm, AlgorithmInput, AlgorithmOutput, Step};
use crate::decoration::Decorator;
use crate::error::{AlgorithmResult, RunnerError};

/// State of a [`TimedRunner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunnerState {
    /// No run in progress.
    Init,
    /// Stepping at the configured pace.
    Running,
    /// Waiting for `resume` or `next`.
    Paused,
    /// The last run completed.
    Done,
}

impl std::fmt::Display for RunnerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunnerState::Init => write!(f, "init"),
            RunnerState::Running => write!(f, "running"),
            RunnerState::Paused => write!(f, "paused"),
            RunnerState::Done => write!(f, "done"),
        }
    }
}

type Observer = Arc<dyn Fn(RunnerState) + Send + Sync>;

#[derive(Debug)]
struct Control {
    state: RunnerState,
    /// Bumped by `execute` and `stop`; a task whose generation is stale exits.
    generation: u64,
}

struct Shared {
    /// Held across a state change and its notification so the observer sees
    /// transitions in the order they happened. Taken before `control`.
    delivery: ReentrantMutex<()>,
    control: Mutex<Control>,
    observer: RwLock<Option<Observer>>,
    wake: Notify,
    single_step: AtomicBool,
    speed: AtomicU8,
    steps: AtomicU64,
    config: RunnerConfig,
}

impl Shared {
    /// Call the observer without holding the observer lock. Callers hold
    /// `delivery`.
    fn notify_observer(&self, state: RunnerState) {
        debug!("Runner state -> {}", state);
        let observer = self.observer.read().clone();
        if let Some(observer) = observer {
            observer(state);
        }
    }

    /// Move from one of `from` to `to`, or report the current state.
    ///
    /// Entering `Running` or `Paused` discards a single step requested by
    /// `next` that the task has not taken yet.
    fn transition(&self, from: &[RunnerState], to: RunnerState) -> Result<(), RunnerState> {
        let _delivery = self.delivery.lock();
        {
            let mut control = self.control.lock();
            if !from.contains(&control.state) {
                return Err(control.state);
            }
            control.state = to;
            if matches!(to, RunnerState::Running | RunnerState::Paused) {
                self.single_step.store(false, Ordering::Release);
            }
        }
        self.notify_observer(to);
        self.wake.notify_one();
        Ok(())
    }

    /// Mark the run of `generation` done, unless it was stopped meanwhile.
    fn finish(&self, generation: u64) -> bool {
        let _delivery = self.delivery.lock();
        {
            let mut control = self.control.lock();
            if control.generation != generation {
                return false;
            }
            control.state = RunnerState::Done;
        }
        self.notify_observer(RunnerState::Done);
        true
    }

    /// Report a single step taken while paused.
    fn stepped_while_paused(&self, generation: u64) {
        let _delivery = self.delivery.lock();
        let (state, current) = self.current();
        if current == generation && state == RunnerState::Paused {
            self.notify_observer(RunnerState::Paused);
        }
    }

    fn current(&self) -> (RunnerState, u64) {
        let control = self.control.lock();
        (control.state, control.generation)
    }

    fn delay(&self) -> std::time::Duration {
        self.config.delay_at(self.speed.load(Ordering::Relaxed))
    }
}

/// Result of a run started by [`TimedRunner::execute`].
#[derive(Debug)]
pub struct PendingResult {
    rx: oneshot::Receiver<AlgorithmResult<AlgorithmOutput>>,
}

impl PendingResult {
    /// Wait for the run to complete.
    ///
    /// Fails with [`RunnerError::Stopped`] if the run was abandoned.
    pub async fn wait(self) -> Result<AlgorithmOutput, RunnerError> {
        let result = self.rx.await.map_err(|_| RunnerError::Stopped)?;
        Ok(result?)
    }
}

/// Drives an algorithm one step at a time with a delay between steps.
///
/// Must be used from within a tokio runtime. Dropping the runner stops any
/// run in progress.
pub struct TimedRunner {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for TimedRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimedRunner")
            .field("state", &self.state())
            .field("speed", &self.speed())
            .field("steps_taken", &self.steps_taken())
            .finish()
    }
}

impl Default for TimedRunner {
    fn default() -> Self {
        Self::new(RunnerConfig::default())
    }
}

impl TimedRunner {
    /// Create a runner in the [`RunnerState::Init`] state.
    pub fn new(config: RunnerConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                delivery: ReentrantMutex::new(()),
                control: Mutex::new(Control {
                    state: RunnerState::Init,
                    generation: 0,
                }),
                observer: RwLock::new(None),
                wake: Notify::new(),
                single_step: AtomicBool::new(false),
                speed: AtomicU8::new(config.speed.min(MAX_SPEED)),
                steps: AtomicU64::new(0),
                config,
            }),
        }
    }

    /// Register the observer notified on every state transition.
    ///
    /// The observer may call back into the runner, including `set_observer`.
    pub fn set_observer(&self, observer: impl Fn(RunnerState) + Send + Sync + 'static) {
        *self.shared.observer.write() = Some(Arc::new(observer));
    }

    /// Current state.
    pub fn state(&self) -> RunnerState {
        self.shared.current().0
    }

    /// Current speed (0..=100).
    pub fn speed(&self) -> u8 {
        self.shared.speed.load(Ordering::Relaxed)
    }

    /// Change the pace; applies from the next scheduled step.
    pub fn set_speed(&self, speed: u8) {
        self.shared.speed.store(speed.min(MAX_SPEED), Ordering::Relaxed);
        self.shared.wake.notify_one();
    }

    /// Delay between steps at the current speed.
    pub fn delay(&self) -> std::time::Duration {
        self.shared.delay()
    }

    /// Number of steps taken in the current run.
    pub fn steps_taken(&self) -> u64 {
        self.shared.steps.load(Ordering::Relaxed)
    }

    /// Initialize the algorithm and start stepping it.
    ///
    /// Clears the decoration first. Precondition failures are returned here
    /// and leave the runner state unchanged.
    pub fn execute<D: Decorator + 'static>(
        &self,
        mut algorithm: Box<dyn Algorithm>,
        mut decorator: D,
        input: AlgorithmInput,
    ) -> Result<PendingResult, RunnerError> {
        let state = self.state();
        if !matches!(state, RunnerState::Init | RunnerState::Done) {
            return Err(RunnerError::AlreadyActive(state.to_string()));
        }

        decorator.clear_all_decoration();
        if let Err(e) = algorithm.initialize(decorator.graph(), &input) {
            warn!("{} rejected its input: {}", algorithm.short_name(), e);
            return Err(e.into());
        }

        let delivery = self.shared.delivery.lock();
        let generation = {
            let mut control = self.shared.control.lock();
            if !matches!(control.state, RunnerState::Init | RunnerState::Done) {
                return Err(RunnerError::AlreadyActive(control.state.to_string()));
            }
            control.generation += 1;
            control.state = RunnerState::Running;
            self.shared.steps.store(0, Ordering::Relaxed);
            self.shared.single_step.store(false, Ordering::Release);
            control.generation
        };
        self.shared.notify_observer(RunnerState::Running);
        drop(delivery);

        info!("Starting {}", algorithm.full_name());
        let (tx, rx) = oneshot::channel();
        tokio::spawn(drive(
            Arc::clone(&self.shared),
            generation,
            algorithm,
            decorator,
            tx,
        ));
        Ok(PendingResult { rx })
    }

    /// Stop stepping until `resume` or `next`.
    pub fn pause(&self) -> Result<(), RunnerError> {
        self.shared
            .transition(&[RunnerState::Running], RunnerState::Paused)
            .map_err(|s| RunnerError::NotRunning(s.to_string()))
    }

    /// Continue stepping at the configured pace.
    pub fn resume(&self) -> Result<(), RunnerError> {
        self.shared
            .transition(&[RunnerState::Paused], RunnerState::Running)
            .map_err(|s| RunnerError::NotPaused(s.to_string()))
    }

    /// Take exactly one step, then stay paused.
    pub fn next(&self) -> Result<(), RunnerError> {
        {
            let control = self.shared.control.lock();
            if control.state != RunnerState::Paused {
                return Err(RunnerError::NotPaused(control.state.to_string()));
            }
            self.shared.single_step.store(true, Ordering::Release);
        }
        self.shared.wake.notify_one();
        Ok(())
    }

    /// Abandon the current run and return to [`RunnerState::Init`].
    ///
    /// The pending result of the run resolves to [`RunnerError::Stopped`].
    pub fn stop(&self) {
        let delivery = self.shared.delivery.lock();
        let changed = {
            let mut control = self.shared.control.lock();
            control.generation += 1;
            let changed = control.state != RunnerState::Init;
            control.state = RunnerState::Init;
            self.shared.single_step.store(false, Ordering::Release);
            changed
        };
        if changed {
            info!("Run stopped");
            self.shared.notify_observer(RunnerState::Init);
        }
        drop(delivery);
        self.shared.wake.notify_one();
    }
}

impl Drop for TimedRunner {
    fn drop(&mut self) {
        let mut control = self.shared.control.lock();
        control.generation += 1;
        control.state = RunnerState::Init;
        drop(control);
        self.shared.wake.notify_one();
    }
}

/// Wait until the runner allows the next step. `false` means the run is over.
async fn ready_for_step(shared: &Shared, generation: u64) -> bool {
    loop {
        let notified = shared.wake.notified();
        let (state, current) = shared.current();
        if current != generation {
            return false;
        }
        match state {
            RunnerState::Running => {
                tokio::select! {
                    _ = tokio::time::sleep(shared.delay()) => return true,
                    _ = notified => {}
                }
            }
            RunnerState::Paused => {
                if shared.single_step.swap(false, Ordering::AcqRel) {
                    return true;
                }
                notified.await;
            }
            RunnerState::Init | RunnerState::Done => return false,
        }
    }
}

async fn drive<D: Decorator>(
    shared: Arc<Shared>,
    generation: u64,
    mut algorithm: Box<dyn Algorithm>,
    mut decorator: D,
    tx: oneshot::Sender<AlgorithmResult<AlgorithmOutput>>,
) {
    while ready_for_step(&shared, generation).await {
        let result = algorithm.step(&mut decorator);
        let steps = shared.steps.fetch_add(1, Ordering::Relaxed) + 1;
        trace!("{} step {}", algorithm.short_name(), steps);

        let result = match result {
            Ok(Step::Pending) => {
                shared.stepped_while_paused(generation);
                continue;
            }
            Ok(Step::Complete(output)) => Ok(output),
            Err(e) => {
                warn!("{} failed: {}", algorithm.short_name(), e);
                Err(e)
            }
        };

        if shared.finish(generation) {
            info!("{} finished after {} steps", algorithm.full_name(), steps);
            let _ = tx.send(result);
        }
        return;
    }
    debug!("{} abandoned", algorithm.short_name());
}
