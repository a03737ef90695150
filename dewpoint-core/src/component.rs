//! Component Lifecycle and Cooperative Scheduler
//!
//! ## Lifecycle
//!
//! Every component goes through the same steps, driven by one scheduler on one
//! logical thread:
//!
//! 1. **setup**: called once, in descending [`setup_priority`] order. Components that
//!    react to upstream sensors register their subscriptions here.
//! 2. **dump_config**: called once after all setups, logs the wiring.
//! 3. **update**: called either by the scheduler every `update_interval_ms`, or by an
//!    upstream sensor publishing a new state (push-driven components have no interval).
//!
//! Updates never overlap: the scheduler is a plain loop and sensors notify observers
//! synchronously. There is no preemption inside an update.
//!
//! ## Example
//!
//! ```rust
//! use dewpoint_core::{
//!     DewPointEstimator, Scheduler, Sensor, SensorInfo, UpdateMode,
//!     time::{FixedTime, TimeSource},
//! };
//!
//! let temperature = Sensor::new(SensorInfo::temperature("Temperature"));
//! let humidity = Sensor::new(SensorInfo::humidity("Humidity"));
//! let dew_point = DewPointEstimator::new(&temperature, &humidity)
//!     .with_update_mode(UpdateMode::Polling { interval_ms: 60_000 });
//!
//! let mut scheduler: Scheduler<'_, 4> = Scheduler::new();
//! scheduler.register(&dew_point)?;
//!
//! let mut clock = FixedTime::new(0);
//! scheduler.setup(clock.now());
//!
//! temperature.publish_state(25.0);
//! humidity.publish_state(60.0);
//! clock.advance(60_000);
//! assert_eq!(scheduler.run(&clock), 1);
//! assert_eq!(dew_point.state().value(), Some(16.7));
//! # Ok::<(), dewpoint_core::DewPointError>(())
//! ```

use heapless::Vec;

use crate::{
    errors::{DewPointError, DewPointResult},
    time::{TimeSource, Timestamp},
};

/// Setup order; higher runs first
pub mod setup_priority {
    /// Drivers talking to hardware buses
    pub const HARDWARE: f32 = 800.0;
    /// Components that only consume other sensors' data
    pub const DATA: f32 = 600.0;
    /// Components that process data after it exists
    pub const PROCESSOR: f32 = 400.0;
    /// Everything else
    pub const LATE: f32 = -100.0;
}

/// A unit of work driven by the [`Scheduler`]
pub trait Component<'a> {
    /// One-time initialisation; may subscribe `self` to sensors living for `'a`
    fn setup(&'a self) -> DewPointResult<()>;

    /// One update cycle
    fn update(&self);

    /// Log the component's configuration
    fn dump_config(&self) {}

    /// Position in the setup order
    fn setup_priority(&self) -> f32 {
        setup_priority::DATA
    }

    /// Polling interval, `None` for push-driven components
    fn update_interval_ms(&self) -> Option<u64> {
        None
    }
}

struct Slot<'a> {
    component: &'a dyn Component<'a>,
    next_due: Option<Timestamp>,
}

/// Fixed-capacity cooperative scheduler
pub struct Scheduler<'a, const N: usize> {
    slots: Vec<Slot<'a>, N>,
}

impl<'a, const N: usize> Scheduler<'a, N> {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Add a component; call before [`Scheduler::setup`]
    pub fn register(&mut self, component: &'a dyn Component<'a>) -> DewPointResult<()> {
        self.slots
            .push(Slot { component, next_due: None })
            .map_err(|_| DewPointError::SchedulerFull { capacity: N })
    }

    /// Number of registered components
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Run setup on every component, highest priority first, then dump configs
    ///
    /// A failing setup is logged and the component stays registered; polling
    /// components still get updated.
    pub fn setup(&mut self, now: Timestamp) {
        self.slots.sort_unstable_by(|a, b| {
            b.component
                .setup_priority()
                .total_cmp(&a.component.setup_priority())
        });

        for slot in self.slots.iter_mut() {
            let component = slot.component;
            if let Err(error) = component.setup() {
                log_warn!("Component setup failed: {}", error);
            }
            slot.next_due = component
                .update_interval_ms()
                .map(|interval| now.saturating_add(interval));
        }

        for slot in self.slots.iter() {
            slot.component.dump_config();
        }
    }

    /// Update every polling component that is due; returns how many ran
    pub fn tick(&mut self, now: Timestamp) -> usize {
        let mut ran = 0;
        for slot in self.slots.iter_mut() {
            let (Some(due), Some(interval)) = (slot.next_due, slot.component.update_interval_ms())
            else {
                continue;
            };
            if now >= due {
                slot.component.update();
                slot.next_due = Some(now.saturating_add(interval));
                ran += 1;
            }
        }
        ran
    }

    /// [`Scheduler::tick`] with the current time of `clock`
    pub fn run(&mut self, clock: &dyn TimeSource) -> usize {
        self.tick(clock.now())
    }
}

impl<const N: usize> Default for Scheduler<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}
