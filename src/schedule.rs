use std::cell::Cell;
use std::rc::Rc;

pub type Task = Box<dyn FnOnce()>;

// No cancellation; tasks check a TransitionToken instead.
pub trait Scheduler {
    fn defer(&self, delay_ms: u32, task: Task);
}

#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct TimerScheduler;

#[cfg(target_arch = "wasm32")]
impl Scheduler for TimerScheduler {
    fn defer(&self, delay_ms: u32, task: Task) {
        gloo_timers::callback::Timeout::new(delay_ms, task).forget();
    }
}

#[derive(Clone, Debug, Default)]
pub struct TransitionClock(Rc<Cell<u64>>);

impl TransitionClock {
    pub fn advance(&self) -> TransitionToken {
        let generation = self.0.get().wrapping_add(1);
        self.0.set(generation);
        TransitionToken {
            clock: self.clone(),
            generation,
        }
    }
}

#[derive(Clone, Debug)]
pub struct TransitionToken {
    clock: TransitionClock,
    generation: u64,
}

impl TransitionToken {
    pub fn is_current(&self) -> bool {
        self.clock.0.get() == self.generation
    }
}

#[cfg(test)]
pub use manual::ManualScheduler;
