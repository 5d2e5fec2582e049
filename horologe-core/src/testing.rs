//! In-memory host collaborators for unit tests
//!
//! Every fake is a cheap clone over shared state, so a test can keep one
//! copy for inspection while the face owns the other.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::vec::Vec;

use jiff::tz::TimeZone;

use crate::config::FaceConfig;
use crate::face::{PlatformContext, WatchFace};
use crate::snapshot::BatterySnapshot;
use crate::traits::{
    BatterySource, Clock, Platform, RedrawSink, Timer, TimerHandle, TimezoneSource,
};

#[derive(Default)]
struct TimerLog {
    next_id: u32,
    pending: Vec<(TimerHandle, u32)>,
    scheduled: u32,
    cancelled: u32,
}

/// Timer that records schedules and cancellations
#[derive(Clone, Default)]
pub struct FakeTimer {
    log: Rc<RefCell<TimerLog>>,
}

impl FakeTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks scheduled and neither fired nor cancelled
    pub fn pending_count(&self) -> usize {
        self.log.borrow().pending.len()
    }

    pub fn scheduled_count(&self) -> u32 {
        self.log.borrow().scheduled
    }

    pub fn cancelled_count(&self) -> u32 {
        self.log.borrow().cancelled
    }

    /// Delay of the most recently scheduled tick still pending
    pub fn last_delay(&self) -> Option<u32> {
        self.log.borrow().pending.last().map(|(_, d)| *d)
    }

    /// Take the oldest pending tick as if it fired
    pub fn fire(&self) -> Option<(TimerHandle, u32)> {
        let mut log = self.log.borrow_mut();
        if log.pending.is_empty() {
            None
        } else {
            Some(log.pending.remove(0))
        }
    }
}

impl Timer for FakeTimer {
    fn schedule(&mut self, delay_ms: u32) -> TimerHandle {
        let mut log = self.log.borrow_mut();
        log.next_id += 1;
        let handle = TimerHandle::new(log.next_id);
        log.pending.push((handle, delay_ms));
        log.scheduled += 1;
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        let mut log = self.log.borrow_mut();
        let before = log.pending.len();
        log.pending.retain(|(h, _)| *h != handle);
        if log.pending.len() != before {
            log.cancelled += 1;
        }
    }
}

/// Settable wall clock
#[derive(Clone, Default)]
pub struct FakeClock {
    now: Rc<Cell<i64>>,
}

impl FakeClock {
    pub fn at(now_ms: i64) -> Self {
        let clock = Self::default();
        clock.set(now_ms);
        clock
    }

    pub fn set(&self, now_ms: i64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, ms: i64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for FakeClock {
    fn now_ms(&self) -> i64 {
        self.now.get()
    }
}

/// Timezone source counting live subscriptions
#[derive(Clone)]
pub struct FakeTimezone {
    zone: Rc<RefCell<TimeZone>>,
    active: Rc<Cell<u32>>,
    subscribed: Rc<Cell<u32>>,
}

impl FakeTimezone {
    pub fn new(zone: TimeZone) -> Self {
        Self {
            zone: Rc::new(RefCell::new(zone)),
            active: Rc::new(Cell::new(0)),
            subscribed: Rc::new(Cell::new(0)),
        }
    }

    /// Change the "system" timezone without notifying anyone
    pub fn set(&self, zone: TimeZone) {
        *self.zone.borrow_mut() = zone;
    }

    /// Subscriptions currently held
    pub fn active(&self) -> u32 {
        self.active.get()
    }

    /// Subscriptions ever taken
    pub fn subscribed(&self) -> u32 {
        self.subscribed.get()
    }
}

/// Live fake subscription
pub struct FakeSubscription {
    active: Rc<Cell<u32>>,
}

impl Drop for FakeSubscription {
    fn drop(&mut self) {
        self.active.set(self.active.get() - 1);
    }
}

impl TimezoneSource for FakeTimezone {
    type Subscription = FakeSubscription;

    fn current(&self) -> TimeZone {
        self.zone.borrow().clone()
    }

    fn subscribe(&mut self) -> FakeSubscription {
        self.active.set(self.active.get() + 1);
        self.subscribed.set(self.subscribed.get() + 1);
        FakeSubscription {
            active: Rc::clone(&self.active),
        }
    }
}

/// Battery with a settable reading
#[derive(Clone, Default)]
pub struct FakeBattery {
    reading: Rc<Cell<BatterySnapshot>>,
}

impl FakeBattery {
    pub fn set(&self, reading: BatterySnapshot) {
        self.reading.set(reading);
    }
}

impl BatterySource for FakeBattery {
    fn battery(&mut self) -> BatterySnapshot {
        self.reading.get()
    }
}

/// Redraw sink counting requests
#[derive(Clone, Default)]
pub struct RedrawCounter {
    count: Rc<Cell<u32>>,
}

impl RedrawCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u32 {
        self.count.get()
    }

    pub fn reset(&self) {
        self.count.set(0);
    }
}

impl RedrawSink for RedrawCounter {
    fn invalidate(&mut self) {
        self.count.set(self.count.get() + 1);
    }
}

pub struct TestPlatform;

impl Platform for TestPlatform {
    type Timer = FakeTimer;
    type Clock = FakeClock;
    type Timezone = FakeTimezone;
    type Battery = FakeBattery;
    type Redraw = RedrawCounter;
}

/// Inspection handles for a face built by [`test_face`]
pub struct Fakes {
    pub timer: FakeTimer,
    pub clock: FakeClock,
    pub timezone: FakeTimezone,
    pub battery: FakeBattery,
    pub redraw: RedrawCounter,
}

/// 2024-03-10T15:04:05.678Z, a Sunday
pub const TEST_NOW_MS: i64 = 1_710_083_045_678;

/// Face on fake collaborators, created and ready for events
pub fn test_face() -> (WatchFace<TestPlatform>, Fakes) {
    let (mut face, fakes) = uncreated_face();
    crate::traits::LifecycleHandler::on_create(&mut face);
    (face, fakes)
}

/// Face on fake collaborators before `on_create`
pub fn uncreated_face() -> (WatchFace<TestPlatform>, Fakes) {
    let fakes = Fakes {
        timer: FakeTimer::new(),
        clock: FakeClock::at(TEST_NOW_MS),
        timezone: FakeTimezone::new(TimeZone::UTC),
        battery: FakeBattery::default(),
        redraw: RedrawCounter::new(),
    };
    let ctx = PlatformContext {
        timer: fakes.timer.clone(),
        clock: fakes.clock.clone(),
        timezone: fakes.timezone.clone(),
        battery: fakes.battery.clone(),
        redraw: fakes.redraw.clone(),
    };
    (WatchFace::new(ctx, FaceConfig::default()), fakes)
}
