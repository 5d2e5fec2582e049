//! Watch face controller
//!
//! Owns the mode controller, the update scheduler and the renderer, and
//! implements the handler traits a host drives it through.

use horologe_display::{DrawSurface, Rect};
use jiff::tz::TimeZone;

use crate::config::{FaceConfig, SurfaceShape};
use crate::events::{HostEvent, TapType};
use crate::mode::{CapabilityFlags, DisplayMode, ModeController, RefreshState, RunState};
use crate::render::{Frame, Renderer};
use crate::scheduler::{TickOutcome, UpdateScheduler};
use crate::snapshot::TimeSnapshot;
use crate::traits::{
    BatterySource, Clock, Drawable, LifecycleHandler, ModeObserver, Platform, RedrawSink,
    TapHandler, TimerHandle, TimezoneSource,
};

/// Collaborators handed to a face at construction
pub struct PlatformContext<P: Platform> {
    pub timer: P::Timer,
    pub clock: P::Clock,
    pub timezone: P::Timezone,
    pub battery: P::Battery,
    pub redraw: P::Redraw,
}

type Subscription<P> = <<P as Platform>::Timezone as TimezoneSource>::Subscription;

/// Digital watch face
///
/// Starts hidden and interactive. The refresh timer runs exactly while the
/// face is created, visible and interactive; the timezone subscription is
/// held exactly while it is created and visible.
pub struct WatchFace<P: Platform> {
    mode: ModeController,
    scheduler: UpdateScheduler<P::Timer>,
    renderer: Renderer,
    clock: P::Clock,
    timezone_source: P::Timezone,
    battery: P::Battery,
    redraw: P::Redraw,
    /// Timezone frames are rendered in
    timezone: TimeZone,
    subscription: Option<Subscription<P>>,
    shape: SurfaceShape,
    /// Between `on_create` and `on_destroy`
    alive: bool,
}

impl<P: Platform> WatchFace<P> {
    /// Build a face on the host's collaborators
    ///
    /// `config` is expected to have passed [`FaceConfig::validate`].
    pub fn new(ctx: PlatformContext<P>, config: FaceConfig) -> Self {
        let timezone = ctx.timezone.current();
        Self {
            mode: ModeController::new(),
            scheduler: UpdateScheduler::new(ctx.timer, config.interactive_update_rate_ms),
            renderer: Renderer::new(config.style),
            clock: ctx.clock,
            timezone_source: ctx.timezone,
            battery: ctx.battery,
            redraw: ctx.redraw,
            timezone,
            subscription: None,
            shape: SurfaceShape::default(),
            alive: false,
        }
    }

    /// Deliver a fired refresh tick
    pub fn on_timer_fired(&mut self, handle: TimerHandle) -> TickOutcome {
        let now_ms = self.clock.now_ms();
        let should_run = self.should_run();
        self.scheduler
            .tick(handle, now_ms, should_run, &mut self.redraw)
    }

    /// Apply a host notification that never affects the refresh timer
    pub fn handle_event(&mut self, event: HostEvent) {
        let dispatch = event.route();
        if let Some(flags) = dispatch.capabilities {
            self.mode
                .set_capabilities(flags.low_bit_ambient, flags.burn_in_protection);
            crate::info!(
                "capabilities: low_bit_ambient={} burn_in_protection={}",
                flags.low_bit_ambient,
                flags.burn_in_protection
            );
        }
        if dispatch.refresh_timezone {
            self.refresh_timezone();
        }
        if dispatch.redraw {
            self.redraw.invalidate();
        }
    }

    /// Assemble the snapshot for a frame drawn now
    pub fn frame(&mut self) -> Frame {
        Frame {
            time: TimeSnapshot::at(self.clock.now_ms(), &self.timezone),
            battery: self.battery.battery(),
            mode: self.mode.mode(),
            flags: self.mode.flags(),
        }
    }

    pub fn run_state(&self) -> RunState {
        self.mode.run_state()
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode.mode()
    }

    pub fn flags(&self) -> CapabilityFlags {
        self.mode.flags()
    }

    pub fn shape(&self) -> SurfaceShape {
        self.shape
    }

    /// Timezone frames are currently rendered in
    pub fn timezone(&self) -> &TimeZone {
        &self.timezone
    }

    /// Check if a refresh tick is pending
    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn refresh_state(&self) -> RefreshState {
        self.scheduler.state()
    }

    pub fn scheduler(&self) -> &UpdateScheduler<P::Timer> {
        &self.scheduler
    }

    /// Check if timezone change notifications are subscribed
    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    fn should_run(&self) -> bool {
        self.alive && self.mode.should_run()
    }

    fn update_timer(&mut self) {
        let state = self.scheduler.on_mode_changed(self.should_run());
        crate::trace!("refresh {:?}", state);
    }

    fn refresh_timezone(&mut self) {
        self.timezone = self.timezone_source.current();
        crate::debug!("timezone refreshed");
    }

    fn subscribe_timezone(&mut self) {
        if self.subscription.is_none() {
            self.subscription = Some(self.timezone_source.subscribe());
            crate::debug!("timezone notifications on");
        }
    }

    /// Listen for timezone changes and draw a fresh frame
    fn show(&mut self) {
        self.subscribe_timezone();
        // The zone may have changed while nobody was listening
        self.refresh_timezone();
        self.redraw.invalidate();
    }

    fn unsubscribe_timezone(&mut self) {
        if self.subscription.take().is_some() {
            crate::debug!("timezone notifications off");
        }
    }
}

impl<P: Platform> LifecycleHandler for WatchFace<P> {
    fn on_create(&mut self) {
        self.alive = true;
        if self.mode.is_visible() {
            self.show();
        } else {
            self.refresh_timezone();
        }
        // Visibility may have been reported before the surface existed
        self.update_timer();
        crate::info!(
            "face created, refresh every {} ms",
            self.scheduler.period_ms()
        );
    }

    fn on_destroy(&mut self) {
        self.alive = false;
        self.scheduler.cancel();
        self.unsubscribe_timezone();
        crate::info!("face destroyed");
    }
}

impl<P: Platform> ModeObserver for WatchFace<P> {
    fn on_visibility_changed(&mut self, visible: bool) {
        self.mode.set_visible(visible);
        if visible && self.alive {
            self.show();
        } else {
            self.unsubscribe_timezone();
        }
        self.update_timer();
    }

    fn on_ambient_mode_changed(&mut self, ambient: bool) {
        let transition = self.mode.set_ambient(ambient);
        if transition.previous.mode != transition.current.mode {
            crate::debug!("mode {:?}", transition.current.mode);
            self.redraw.invalidate();
        }
        self.update_timer();
    }

    fn on_properties_changed(&mut self, low_bit_ambient: bool, burn_in_protection: bool) {
        self.handle_event(HostEvent::PropertiesChanged(CapabilityFlags::new(
            low_bit_ambient,
            burn_in_protection,
        )));
    }

    fn on_apply_window_insets(&mut self, is_round: bool) {
        self.shape = SurfaceShape::from_round(is_round);
        crate::debug!("surface shape {:?}", self.shape);
    }

    fn on_time_tick(&mut self) {
        self.handle_event(HostEvent::TimeTick);
    }

    fn on_timezone_changed(&mut self) {
        self.handle_event(HostEvent::TimezoneChanged);
    }
}

impl<P: Platform> TapHandler for WatchFace<P> {
    fn on_tap_command(&mut self, tap: TapType, x: i32, y: i32, event_time: i64) {
        crate::trace!("tap {:?} at ({}, {})", tap, x, y);
        self.handle_event(HostEvent::Tap {
            tap,
            x,
            y,
            event_time,
        });
    }
}

impl<P: Platform> WatchFace<P> {
    /// Deliver a tap by its raw host code; unknown codes are dropped
    pub fn on_tap_code(&mut self, code: i32, x: i32, y: i32, event_time: i64) {
        match TapType::from_code(code) {
            Some(tap) => self.on_tap_command(tap, x, y, event_time),
            None => crate::debug!("ignoring tap code {}", code),
        }
    }
}

impl<P: Platform> Drawable for WatchFace<P> {
    fn on_draw<S: DrawSurface>(&mut self, surface: &mut S, bounds: Rect) {
        let frame = self.frame();
        let instructions = self.renderer.render(&frame, bounds, self.shape, &*surface);
        if let Err(e) = instructions.draw(surface) {
            crate::warn!("draw failed: {:?}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{BatterySnapshot, BatteryStatus};
    use crate::testing::{test_face, uncreated_face, TEST_NOW_MS};
    use horologe_display::{Color, TextCanvas};
    use jiff::tz::Offset;
    use proptest::prelude::*;

    const TIME_ROW: usize = 5;
    const DATE_ROW: usize = 7;
    const BATTERY_ROW: usize = 9;

    fn draw(face: &mut WatchFace<crate::testing::TestPlatform>) -> TextCanvas {
        let mut canvas = TextCanvas::new(10, 20);
        let bounds = canvas.clip_bounds();
        face.on_draw(&mut canvas, bounds);
        canvas
    }

    #[test]
    fn test_created_face_is_idle() {
        let (face, fakes) = test_face();
        assert!(!face.is_running());
        assert_eq!(face.refresh_state(), RefreshState::Stopped);
        assert_eq!(face.run_state(), RunState::default());
        assert_eq!(fakes.timer.pending_count(), 0);
        assert_eq!(fakes.timezone.active(), 0);
        assert_eq!(fakes.redraw.count(), 0);
    }

    #[test]
    fn test_becoming_visible_starts_refresh() {
        let (mut face, fakes) = test_face();
        face.on_visibility_changed(true);

        assert!(face.is_running());
        assert_eq!(fakes.timer.pending_count(), 1);
        assert_eq!(fakes.timer.last_delay(), Some(0));
        assert_eq!(fakes.timezone.active(), 1);
        assert_eq!(fakes.redraw.count(), 1);
    }

    #[test]
    fn test_repeated_visible_keeps_one_tick_and_subscription() {
        let (mut face, fakes) = test_face();
        face.on_visibility_changed(true);
        face.on_visibility_changed(true);

        assert_eq!(fakes.timer.pending_count(), 1);
        assert_eq!(fakes.timer.scheduled_count(), 1);
        assert_eq!(fakes.timezone.active(), 1);
        assert_eq!(fakes.timezone.subscribed(), 1);
    }

    #[test]
    fn test_hiding_stops_refresh_and_unsubscribes() {
        let (mut face, fakes) = test_face();
        face.on_visibility_changed(true);
        face.on_visibility_changed(false);

        assert!(!face.is_running());
        assert!(!face.is_subscribed());
        assert_eq!(fakes.timer.pending_count(), 0);
        assert_eq!(fakes.timezone.active(), 0);
    }

    #[test]
    fn test_ambient_round_trip_restarts_refresh() {
        let (mut face, fakes) = test_face();
        face.on_visibility_changed(true);

        face.on_ambient_mode_changed(true);
        assert_eq!(face.refresh_state(), RefreshState::Stopped);
        assert_eq!(fakes.timer.pending_count(), 0);

        face.on_ambient_mode_changed(false);
        assert_eq!(face.refresh_state(), RefreshState::Running);
        assert_eq!(fakes.timer.pending_count(), 1);
        assert_eq!(fakes.timer.last_delay(), Some(0));
    }

    #[test]
    fn test_ambient_change_redraws_once() {
        let (mut face, fakes) = test_face();
        face.on_visibility_changed(true);
        fakes.redraw.reset();

        face.on_ambient_mode_changed(true);
        face.on_ambient_mode_changed(true);
        assert_eq!(fakes.redraw.count(), 1);
    }

    #[test]
    fn test_ambient_while_hidden_never_ticks() {
        let (mut face, fakes) = test_face();
        face.on_ambient_mode_changed(true);
        face.on_ambient_mode_changed(false);
        assert_eq!(fakes.timer.scheduled_count(), 0);
    }

    #[test]
    fn test_tick_redraws_and_aligns_to_next_second() {
        let (mut face, fakes) = test_face();
        face.on_visibility_changed(true);
        fakes.redraw.reset();

        let (handle, _) = fakes.timer.fire().unwrap();
        assert_eq!(
            face.on_timer_fired(handle),
            TickOutcome::Rescheduled { delay_ms: 322 }
        );
        assert_eq!(fakes.redraw.count(), 1);
        assert_eq!(fakes.timer.last_delay(), Some(322));

        fakes.clock.advance(322);
        let (handle, _) = fakes.timer.fire().unwrap();
        assert_eq!(
            face.on_timer_fired(handle),
            TickOutcome::Rescheduled { delay_ms: 1000 }
        );
    }

    #[test]
    fn test_tick_after_hide_is_stale() {
        let (mut face, fakes) = test_face();
        face.on_visibility_changed(true);
        let handle = face.scheduler().pending().unwrap();
        face.on_visibility_changed(false);
        fakes.redraw.reset();

        assert_eq!(face.on_timer_fired(handle), TickOutcome::Stale);
        assert_eq!(fakes.redraw.count(), 0);
        assert_eq!(fakes.timer.pending_count(), 0);
    }

    #[test]
    fn test_completed_tap_redraws() {
        let (mut face, fakes) = test_face();
        face.on_visibility_changed(true);
        fakes.redraw.reset();

        face.on_tap_command(TapType::Complete, 100, 100, TEST_NOW_MS);
        assert_eq!(fakes.redraw.count(), 1);
    }

    #[test]
    fn test_touch_start_and_cancel_do_nothing() {
        let (mut face, fakes) = test_face();
        face.on_visibility_changed(true);
        fakes.redraw.reset();
        let pending = face.scheduler().pending();

        face.on_tap_command(TapType::Start, 100, 100, TEST_NOW_MS);
        face.on_tap_command(TapType::Cancel, 100, 100, TEST_NOW_MS);
        assert_eq!(fakes.redraw.count(), 0);
        assert_eq!(face.scheduler().pending(), pending);
    }

    #[test]
    fn test_raw_tap_codes() {
        let (mut face, fakes) = test_face();
        face.on_tap_code(0, 10, 10, TEST_NOW_MS);
        face.on_tap_code(1, 10, 10, TEST_NOW_MS);
        face.on_tap_code(7, 10, 10, TEST_NOW_MS);
        assert_eq!(fakes.redraw.count(), 0);
        face.on_tap_code(2, 10, 10, TEST_NOW_MS);
        assert_eq!(fakes.redraw.count(), 1);
    }

    #[test]
    fn test_timezone_change_refreshes_and_redraws() {
        let (mut face, fakes) = test_face();
        face.on_visibility_changed(true);
        fakes.redraw.reset();
        let pending = face.scheduler().pending();
        assert_eq!(face.frame().time.day_of_week, 1);

        fakes.timezone.set(TimeZone::fixed(Offset::constant(9)));
        face.on_timezone_changed();

        assert_eq!(fakes.redraw.count(), 1);
        let time = face.frame().time;
        assert_eq!((time.day_of_week, time.hour), (2, 0));
        assert_eq!(face.scheduler().pending(), pending);
        assert_eq!(fakes.timer.scheduled_count(), 1);
    }

    #[test]
    fn test_timezone_picked_up_on_show() {
        let (mut face, fakes) = test_face();
        fakes.timezone.set(TimeZone::fixed(Offset::constant(9)));
        face.on_visibility_changed(true);
        assert_eq!(face.frame().time.day_of_week, 2);
    }

    #[test]
    fn test_time_tick_redraws_without_timer() {
        let (mut face, fakes) = test_face();
        face.on_visibility_changed(true);
        face.on_ambient_mode_changed(true);
        fakes.redraw.reset();

        face.on_time_tick();
        assert_eq!(fakes.redraw.count(), 1);
        assert!(!face.is_running());
    }

    #[test]
    fn test_properties_only_record_flags() {
        let (mut face, fakes) = test_face();
        face.on_visibility_changed(true);
        fakes.redraw.reset();

        face.on_properties_changed(true, true);
        assert_eq!(face.flags(), CapabilityFlags::new(true, true));
        assert_eq!(fakes.redraw.count(), 0);
        assert_eq!(fakes.timer.scheduled_count(), 1);
    }

    #[test]
    fn test_destroy_releases_everything() {
        let (mut face, fakes) = test_face();
        face.on_visibility_changed(true);
        face.on_destroy();

        assert!(!face.is_running());
        assert_eq!(fakes.timer.pending_count(), 0);
        assert_eq!(fakes.timezone.active(), 0);

        // Late host callbacks cannot revive the timer
        face.on_ambient_mode_changed(false);
        assert_eq!(fakes.timer.pending_count(), 0);
    }

    #[test]
    fn test_show_after_destroy_stays_released() {
        let (mut face, fakes) = test_face();
        face.on_visibility_changed(true);
        face.on_destroy();
        fakes.redraw.reset();

        face.on_visibility_changed(false);
        face.on_visibility_changed(true);
        assert!(!face.is_subscribed());
        assert_eq!(fakes.timezone.active(), 0);
        assert_eq!(fakes.timezone.subscribed(), 1);
        assert_eq!(fakes.timer.pending_count(), 0);
        assert_eq!(fakes.redraw.count(), 0);
    }

    #[test]
    fn test_visible_before_create_starts_on_create() {
        let (mut face, fakes) = uncreated_face();
        face.on_visibility_changed(true);
        assert_eq!(fakes.timer.pending_count(), 0);
        assert_eq!(fakes.timezone.active(), 0);

        face.on_create();
        assert!(face.is_running());
        assert_eq!(fakes.timer.pending_count(), 1);
        assert_eq!(fakes.timezone.active(), 1);
        assert_eq!(fakes.redraw.count(), 1);
    }

    #[test]
    fn test_drop_releases_everything() {
        let (mut face, fakes) = test_face();
        face.on_visibility_changed(true);
        drop(face);
        assert_eq!(fakes.timer.pending_count(), 0);
        assert_eq!(fakes.timezone.active(), 0);
    }

    #[test]
    fn test_frame_reads_battery_at_draw_time() {
        let (mut face, fakes) = test_face();
        assert_eq!(face.frame().battery, BatterySnapshot::unknown());
        fakes
            .battery
            .set(BatterySnapshot::new(42, BatteryStatus::Discharging));
        assert_eq!(face.frame().battery.level, 42);
    }

    #[test]
    fn test_draw_interactive() {
        let (mut face, fakes) = test_face();
        fakes
            .battery
            .set(BatterySnapshot::new(42, BatteryStatus::Discharging));
        face.on_visibility_changed(true);

        let canvas = draw(&mut face);
        assert_eq!(canvas.text_at(TIME_ROW), "3:04");
        assert_eq!(canvas.text_at(DATE_ROW), "Sunday, March 10");
        assert_eq!(canvas.text_at(BATTERY_ROW), "42%");
        assert_ne!(canvas.background(), Color::BLACK);
    }

    #[test]
    fn test_draw_ambient_low_bit() {
        let (mut face, fakes) = test_face();
        fakes
            .battery
            .set(BatterySnapshot::new(42, BatteryStatus::Discharging));
        face.on_visibility_changed(true);
        face.on_properties_changed(true, false);
        face.on_ambient_mode_changed(true);

        let canvas = draw(&mut face);
        assert_eq!(canvas.background(), Color::BLACK);
        assert_eq!(canvas.text_at(TIME_ROW), "3:04");
        assert_eq!(canvas.text_at(BATTERY_ROW), "");
        let paint = canvas.paint_at(TIME_ROW).unwrap();
        assert!(!paint.anti_alias);
        assert_eq!(paint.color, Color::WHITE);
    }

    #[test]
    fn test_round_screen_uses_round_text_size() {
        let (mut face, _fakes) = test_face();
        face.on_apply_window_insets(true);
        assert_eq!(face.shape(), SurfaceShape::Round);

        let canvas = draw(&mut face);
        assert_eq!(canvas.paint_at(TIME_ROW).unwrap().text_size, 52.0);
    }

    #[derive(Debug, Clone)]
    enum HostOp {
        Visible(bool),
        Ambient(bool),
        FireTimer,
        Tap(i32),
        TimezoneChanged,
        TimeTick,
        Advance(u16),
    }

    fn host_op() -> impl Strategy<Value = HostOp> {
        prop_oneof![
            any::<bool>().prop_map(HostOp::Visible),
            any::<bool>().prop_map(HostOp::Ambient),
            Just(HostOp::FireTimer),
            (0i32..3).prop_map(HostOp::Tap),
            Just(HostOp::TimezoneChanged),
            Just(HostOp::TimeTick),
            any::<u16>().prop_map(HostOp::Advance),
        ]
    }

    proptest! {
        #[test]
        fn prop_refresh_tracks_run_state(ops in proptest::collection::vec(host_op(), 0..48)) {
            let (mut face, fakes) = test_face();
            for op in ops {
                match op {
                    HostOp::Visible(visible) => face.on_visibility_changed(visible),
                    HostOp::Ambient(ambient) => face.on_ambient_mode_changed(ambient),
                    HostOp::FireTimer => {
                        if let Some((handle, _)) = fakes.timer.fire() {
                            face.on_timer_fired(handle);
                        }
                    }
                    HostOp::Tap(code) => face.on_tap_code(code, 0, 0, TEST_NOW_MS),
                    HostOp::TimezoneChanged => face.on_timezone_changed(),
                    HostOp::TimeTick => face.on_time_tick(),
                    HostOp::Advance(ms) => fakes.clock.advance(i64::from(ms)),
                }

                let state = face.run_state();
                prop_assert_eq!(face.is_running(), state.should_run());
                prop_assert_eq!(fakes.timer.pending_count(), usize::from(face.is_running()));
                prop_assert_eq!(fakes.timezone.active(), u32::from(state.visible));
            }
        }
    }
}
