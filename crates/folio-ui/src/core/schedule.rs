//! Cancellable repeating tasks for timer-driven UI affordances.
//!
//! # Design
//! - A handle owns its task: dropping or cancelling it stops further ticks.
//! - One repeating task per animation keeps tick order fixed by construction.
//! - `ManualScheduler` runs on a virtual clock so native tests stay deterministic.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// Owner of a scheduled task. Dropping the handle cancels the task.
pub trait TaskHandle {
    /// Stop the task; no further ticks fire once this returns.
    fn cancel(self)
    where
        Self: Sized,
    {
        drop(self);
    }
}

/// Source of repeating tasks.
pub trait Scheduler {
    /// Handle type returned for each scheduled task.
    type Handle: TaskHandle + 'static;

    /// Run `tick` every `period`, first firing one full period from now.
    fn repeat(&self, period: Duration, tick: Box<dyn FnMut()>) -> Self::Handle;
}

type SharedTick = Rc<RefCell<Box<dyn FnMut()>>>;

struct ManualTask {
    period: Duration,
    next_due: Duration,
    tick: SharedTick,
    live: Rc<Cell<bool>>,
}

#[derive(Default)]
struct ManualClock {
    now: Duration,
    tasks: Vec<ManualTask>,
}

/// Virtual-clock scheduler; ticks fire only from [`ManualScheduler::advance`].
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<ManualClock>>,
}

/// Handle for a task registered on a [`ManualScheduler`].
#[derive(Debug)]
pub struct ManualTaskHandle {
    live: Rc<Cell<bool>>,
}

impl TaskHandle for ManualTaskHandle {}

impl Drop for ManualTaskHandle {
    fn drop(&mut self) {
        self.live.set(false);
    }
}

impl ManualScheduler {
    /// Fresh scheduler at virtual time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.borrow().now
    }

    /// Number of tasks that have not been cancelled.
    #[must_use]
    pub fn live_tasks(&self) -> usize {
        self.clock
            .borrow()
            .tasks
            .iter()
            .filter(|task| task.live.get())
            .count()
    }

    /// Move the clock forward, firing every tick that falls due in order.
    ///
    /// Returns the number of ticks fired.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now() + by;
        let mut fired = 0;
        loop {
            let next = {
                let mut clock = self.clock.borrow_mut();
                clock.tasks.retain(|task| task.live.get());
                let picked = clock
                    .tasks
                    .iter_mut()
                    .filter(|task| task.next_due <= target)
                    .min_by_key(|task| task.next_due)
                    .map(|task| {
                        let at = task.next_due;
                        task.next_due += task.period;
                        (at, Rc::clone(&task.tick), Rc::clone(&task.live))
                    });
                if let Some((at, _, _)) = &picked {
                    clock.now = *at;
                }
                picked.map(|(_, tick, live)| (tick, live))
            };
            let Some((tick, live)) = next else {
                break;
            };
            if live.get() {
                (*tick.borrow_mut())();
                fired += 1;
            }
        }
        self.clock.borrow_mut().now = target;
        fired
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualTaskHandle;

    fn repeat(&self, period: Duration, tick: Box<dyn FnMut()>) -> Self::Handle {
        let period = period.max(Duration::from_millis(1));
        let live = Rc::new(Cell::new(true));
        let mut clock = self.clock.borrow_mut();
        let next_due = clock.now + period;
        clock.tasks.push(ManualTask {
            period,
            next_due,
            tick: Rc::new(RefCell::new(tick)),
            live: Rc::clone(&live),
        });
        ManualTaskHandle { live }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::{TokioScheduler, TokioTaskHandle};

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::{Scheduler, TaskHandle};
    use std::time::Duration;
    use tokio::task::JoinHandle;
    use tokio::time::{Instant, MissedTickBehavior, interval_at};

    /// Scheduler backed by tokio timers on the current `LocalSet`.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct TokioScheduler;

    /// Handle aborting the spawned interval task on drop.
    #[derive(Debug)]
    pub struct TokioTaskHandle {
        task: JoinHandle<()>,
    }

    impl TaskHandle for TokioTaskHandle {}

    impl Drop for TokioTaskHandle {
        fn drop(&mut self) {
            self.task.abort();
        }
    }

    impl Scheduler for TokioScheduler {
        type Handle = TokioTaskHandle;

        /// # Panics
        ///
        /// Panics when called outside a tokio `LocalSet`.
        fn repeat(&self, period: Duration, mut tick: Box<dyn FnMut()>) -> Self::Handle {
            let period = period.max(Duration::from_millis(1));
            let task = tokio::task::spawn_local(async move {
                let mut interval = interval_at(Instant::now() + period, period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    interval.tick().await;
                    tick();
                }
            });
            TokioTaskHandle { task }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::{IntervalHandle, IntervalScheduler};

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{Scheduler, TaskHandle};
    use gloo_timers::callback::Interval;
    use std::time::Duration;

    /// Scheduler backed by `setInterval`.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct IntervalScheduler;

    /// Handle clearing the browser interval on drop.
    pub struct IntervalHandle {
        interval: Option<Interval>,
    }

    impl TaskHandle for IntervalHandle {}

    impl Drop for IntervalHandle {
        fn drop(&mut self) {
            if let Some(interval) = self.interval.take() {
                // The handle may be dropped from inside its own tick; free the closure later.
                let closure = interval.cancel();
                wasm_bindgen_futures::spawn_local(async move {
                    drop(closure);
                });
            }
        }
    }

    impl Scheduler for IntervalScheduler {
        type Handle = IntervalHandle;

        fn repeat(&self, period: Duration, tick: Box<dyn FnMut()>) -> Self::Handle {
            let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX).max(1);
            IntervalHandle {
                interval: Some(Interval::new(millis, tick)),
            }
        }
    }
}
