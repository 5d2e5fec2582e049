//! Desktop implementations of the face's host collaborators

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant};
use horologe_core::snapshot::BatterySnapshot;
use horologe_core::traits::{
    BatterySource, Clock, Platform, RedrawSink, Timer, TimerHandle, TimezoneSource,
};
use jiff::tz::{Offset, TimeZone};
use jiff::Timestamp;
use log::{debug, warn};

/// Raised once per batch of redraw requests
pub static REDRAW: Signal<CriticalSectionRawMutex, ()> = Signal::new();

#[derive(Default)]
struct TimerQueue {
    next_id: u32,
    pending: Vec<(TimerHandle, Instant)>,
}

/// One-shot timer on the embassy clock
///
/// The main loop polls [`SimTimer::next_deadline`] and hands due handles
/// back to the face.
#[derive(Clone, Default)]
pub struct SimTimer {
    queue: Rc<RefCell<TimerQueue>>,
}

impl SimTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.borrow().pending.iter().map(|(_, at)| *at).min()
    }

    /// Remove and return one tick whose deadline has passed
    pub fn take_due(&self, now: Instant) -> Option<TimerHandle> {
        let mut queue = self.queue.borrow_mut();
        let index = queue
            .pending
            .iter()
            .enumerate()
            .filter(|(_, (_, at))| *at <= now)
            .min_by_key(|(_, (_, at))| *at)
            .map(|(i, _)| i)?;
        Some(queue.pending.remove(index).0)
    }

    pub fn pending_count(&self) -> usize {
        self.queue.borrow().pending.len()
    }
}

impl Timer for SimTimer {
    fn schedule(&mut self, delay_ms: u32) -> TimerHandle {
        let mut queue = self.queue.borrow_mut();
        queue.next_id = queue.next_id.wrapping_add(1);
        let handle = TimerHandle::new(queue.next_id);
        let at = Instant::now() + Duration::from_millis(u64::from(delay_ms));
        queue.pending.push((handle, at));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.queue.borrow_mut().pending.retain(|(h, _)| *h != handle);
    }
}

/// System wall clock
#[derive(Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Timestamp::now().as_millisecond()
    }
}

/// Fixed-offset "system" timezone the script can move
#[derive(Clone)]
pub struct SimTimezone {
    offset: Rc<Cell<Offset>>,
    listeners: Rc<Cell<u32>>,
}

impl SimTimezone {
    pub fn new(offset: Offset) -> Self {
        Self {
            offset: Rc::new(Cell::new(offset)),
            listeners: Rc::new(Cell::new(0)),
        }
    }

    /// Move the system timezone by `minutes`
    ///
    /// Returns whether anyone is subscribed to hear about it.
    pub fn shift(&self, minutes: i32) -> bool {
        let current = self.offset.get();
        match Offset::from_seconds(current.seconds() + minutes * 60) {
            Ok(offset) => self.offset.set(offset),
            Err(e) => warn!("timezone shift rejected: {}", e),
        }
        self.listeners.get() > 0
    }

    pub fn offset(&self) -> Offset {
        self.offset.get()
    }

    /// Subscriptions currently held
    pub fn listeners(&self) -> u32 {
        self.listeners.get()
    }
}

/// Held timezone subscription
pub struct SimSubscription {
    listeners: Rc<Cell<u32>>,
}

impl Drop for SimSubscription {
    fn drop(&mut self) {
        self.listeners.set(self.listeners.get().saturating_sub(1));
        debug!("timezone listener released");
    }
}

impl TimezoneSource for SimTimezone {
    type Subscription = SimSubscription;

    fn current(&self) -> TimeZone {
        TimeZone::fixed(self.offset.get())
    }

    fn subscribe(&mut self) -> SimSubscription {
        self.listeners.set(self.listeners.get() + 1);
        debug!("timezone listener registered");
        SimSubscription {
            listeners: Rc::clone(&self.listeners),
        }
    }
}

/// Battery with a fixed raw reading
#[derive(Clone, Copy)]
pub struct SimBattery {
    level: i32,
    status_code: i32,
}

impl SimBattery {
    /// Battery reporting `level` out of 100; negative means no reading
    pub fn new(level: i32, status_code: i32) -> Self {
        Self { level, status_code }
    }
}

impl BatterySource for SimBattery {
    fn battery(&mut self) -> BatterySnapshot {
        BatterySnapshot::from_raw(self.level, 100, self.status_code)
    }
}

/// Redraw sink raising [`REDRAW`]
///
/// Requests made before the main loop gets to draw collapse into one frame.
#[derive(Clone, Default)]
pub struct SignalRedraw {
    requests: Rc<Cell<u32>>,
}

impl SignalRedraw {
    /// Total requests made, coalesced or not
    pub fn requests(&self) -> u32 {
        self.requests.get()
    }
}

impl RedrawSink for SignalRedraw {
    fn invalidate(&mut self) {
        self.requests.set(self.requests.get() + 1);
        REDRAW.signal(());
    }
}

pub struct SimPlatform;

impl Platform for SimPlatform {
    type Timer = SimTimer;
    type Clock = SystemClock;
    type Timezone = SimTimezone;
    type Battery = SimBattery;
    type Redraw = SignalRedraw;
}
