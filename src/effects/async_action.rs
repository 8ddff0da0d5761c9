//! Asynchronous actions.
//!
//! An asynchronous action hands its body to an [`Executor`] and returns
//! immediately. The pipeline keeps the submission order of its slots, but
//! completion order across submitted jobs is up to the executor. Failures
//! of submitted jobs are logged and never reach the caller of `fire`.

use crate::core::{Event, State};
use crate::effects::action::{Action, ActionResult};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{trace, warn};

/// A unit of work handed to an executor.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Fire-and-forget submission capability.
///
/// Implementations own scheduling, bounds, and cancellation. `submit` must
/// not wait for the job to complete.
pub trait Executor: Send + Sync {
    fn submit(&self, job: Job);
}

impl<F> Executor for F
where
    F: Fn(Job) + Send + Sync,
{
    fn submit(&self, job: Job) {
        self(job)
    }
}

/// Runs each job on the calling thread before `submit` returns.
///
/// This is the identity strategy: "asynchronous" actions behave like
/// synchronous ones whose failures are logged instead of propagated.
#[derive(Clone, Copy, Debug, Default)]
pub struct InlineExecutor;

impl Executor for InlineExecutor {
    fn submit(&self, job: Job) {
        job()
    }
}

/// Submits jobs to a Tokio runtime's blocking pool.
#[derive(Clone, Debug)]
pub struct TokioExecutor {
    handle: tokio::runtime::Handle,
}

impl TokioExecutor {
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }

    /// Executor for the runtime the caller is running on, if any.
    pub fn try_current() -> Option<Self> {
        tokio::runtime::Handle::try_current().ok().map(Self::new)
    }
}

impl Executor for TokioExecutor {
    fn submit(&self, job: Job) {
        // Detached: the join handle is dropped without waiting.
        let _ = self.handle.spawn_blocking(job);
    }
}

/// Wraps action bodies so they run on an executor.
///
/// # Example
///
/// ```rust
/// use canopy::effects::{AsyncActionFactory, Job};
/// use canopy::{event_enum, state_enum};
/// use std::sync::{Arc, Mutex};
///
/// state_enum! {
///     enum Door {
///         Closed,
///     }
/// }
///
/// event_enum! {
///     enum Knock {
///         Once,
///     }
/// }
///
/// let queued: Arc<Mutex<Vec<Job>>> = Arc::default();
/// let queue = Arc::clone(&queued);
/// let factory: AsyncActionFactory<Door, Knock, ()> =
///     AsyncActionFactory::new(move |job: Job| queue.lock().unwrap().push(job));
///
/// let action = factory.create(|state, event| {
///     println!("{state:?} handled {event:?}");
///     Ok(())
/// });
///
/// action.invoke(&Door::Closed, &Knock::Once, &mut ()).unwrap();
/// assert_eq!(queued.lock().unwrap().len(), 1);
/// ```
pub struct AsyncActionFactory<S, E, C> {
    executor: Arc<dyn Executor>,
    _phantom: PhantomData<fn(&S, &E, &mut C)>,
}

impl<S, E, C> AsyncActionFactory<S, E, C> {
    pub fn new(executor: impl Executor + 'static) -> Self {
        Self::from_arc(Arc::new(executor))
    }

    pub fn from_arc(executor: Arc<dyn Executor>) -> Self {
        Self {
            executor,
            _phantom: PhantomData,
        }
    }

    /// Factory whose jobs run inline on the dispatching thread.
    pub fn inline() -> Self {
        Self::new(InlineExecutor)
    }

    pub fn executor(&self) -> &Arc<dyn Executor> {
        &self.executor
    }
}

impl<S: State, E: Event, C> AsyncActionFactory<S, E, C> {
    /// Wrap `f` so each invocation submits it with owned copies of the
    /// source state and event.
    ///
    /// `f` never sees the context, since the job may run after `fire` has
    /// returned. Use [`create_with`](Self::create_with) when the body needs
    /// values read from the context.
    pub fn create<F>(&self, f: F) -> Action<S, E, C>
    where
        F: Fn(S, E) -> ActionResult + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        self.create_with(move |state: &S, event: &E, _ctx: &C| {
            let f = Arc::clone(&f);
            let state = state.clone();
            let event = event.clone();
            move || f(state, event)
        })
    }

    /// Wrap a two-step action: `prepare` runs synchronously in the pipeline
    /// slot and may read the context; the job it returns is submitted.
    ///
    /// The context is only borrowed while `prepare` runs.
    pub fn create_with<P, J>(&self, prepare: P) -> Action<S, E, C>
    where
        P: Fn(&S, &E, &C) -> J + Send + Sync + 'static,
        J: FnOnce() -> ActionResult + Send + 'static,
    {
        let executor = Arc::clone(&self.executor);
        Action::new(move |state: &S, event: &E, ctx: &mut C| {
            let job = prepare(state, event, &*ctx);
            let state_name = state.name().to_string();
            let event_name = event.name().to_string();
            trace!(state = %state_name, event = %event_name, "submitting asynchronous action");

            executor.submit(Box::new(move || {
                if let Err(err) = job() {
                    warn!(
                        state = %state_name,
                        event = %event_name,
                        error = %err,
                        "asynchronous action failed"
                    );
                }
            }));
            Ok(())
        })
    }
}

impl<S, E, C> Clone for AsyncActionFactory<S, E, C> {
    fn clone(&self) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
            _phantom: PhantomData,
        }
    }
}

impl<S, E, C> Default for AsyncActionFactory<S, E, C> {
    fn default() -> Self {
        Self::inline()
    }
}

impl<S, E, C> fmt::Debug for AsyncActionFactory<S, E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AsyncActionFactory(..)")
    }
}
