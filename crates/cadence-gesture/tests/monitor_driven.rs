//! End-to-end pacing: vsync pulses drive a synthetic scroll gesture.
//!
//! The listener advances the driver once per pulse and keeps the burst
//! alive with `request_update` while the gesture is active, the same
//! loop a host shell runs against the real display.

use std::cell::RefCell;
use std::rc::Rc;

use cadence_gesture::{PointerAction, ScrollDirection, ScrollGestureDriver};
use cadence_testing::{
    ManualClock, ManualFrameSource, ManualTaskRunner, RecordingSink, ScriptedDeltaProvider,
};
use cadence_vsync::VsyncMonitor;

type SharedDriver = Rc<RefCell<ScrollGestureDriver>>;
type MonitorSlot = Rc<RefCell<Option<VsyncMonitor>>>;

fn gesture_fixture() -> (Rc<RecordingSink>, Rc<ScriptedDeltaProvider>, SharedDriver) {
    let sink = Rc::new(RecordingSink::new());
    let provider = Rc::new(ScriptedDeltaProvider::finishing_after_deltas(&[8.0, 6.0, 4.0]));
    let driver = Rc::new(RefCell::new(ScrollGestureDriver::new(
        sink.clone(),
        provider.clone(),
        42,
        ScrollDirection::Down,
        60.0,
        400.0,
        1.0,
    )));
    (sink, provider, driver)
}

fn pacing_listener(driver: &SharedDriver, monitor_slot: &MonitorSlot) -> impl Fn(u64) + 'static {
    let driver = Rc::clone(driver);
    let monitor_slot = Rc::clone(monitor_slot);
    move |timestamp_micros: u64| {
        let still_active = driver.borrow_mut().advance(timestamp_micros / 1_000);
        let slot = monitor_slot.borrow();
        let monitor = slot.as_ref().expect("monitor registered");
        if still_active {
            monitor.request_update();
        } else {
            monitor.stop();
        }
    }
}

fn assert_full_gesture(sink: &RecordingSink, provider: &ScriptedDeltaProvider) {
    let events = sink.events();
    assert_eq!(events.len(), 5, "Down, three Moves, Up");
    assert_eq!(events.first().expect("down").action, PointerAction::Down);
    assert_eq!(
        events
            .iter()
            .filter(|event| event.action == PointerAction::Move)
            .count(),
        3,
    );
    let up = events.last().expect("up");
    assert_eq!(up.action, PointerAction::Up);
    assert_eq!(up.y, 382.0, "400 scrolled down by 8 + 6 + 4");
    assert_eq!(provider.release_count(), 1);
    assert!(events
        .windows(2)
        .all(|pair| pair[0].event_time_millis <= pair[1].event_time_millis));
    assert!(events
        .iter()
        .all(|event| event.down_time_millis == events[0].event_time_millis));
}

#[test]
fn fallback_pulses_drive_gesture_to_completion() {
    let clock = Rc::new(ManualClock::new());
    let runner = Rc::new(ManualTaskRunner::new(Rc::clone(&clock)));
    let (sink, provider, driver) = gesture_fixture();

    let monitor_slot: MonitorSlot = Rc::new(RefCell::new(None));
    let monitor = VsyncMonitor::with_task_runner(
        runner.clone(),
        clock.clone(),
        60.0,
        pacing_listener(&driver, &monitor_slot),
    );
    monitor_slot.borrow_mut().replace(monitor.clone());

    monitor.request_update();
    runner.run_until_idle();

    assert_full_gesture(&sink, &provider);
    assert!(!driver.borrow().is_active());
    assert_eq!(runner.pending(), 0);
}

#[test]
fn hardware_pulses_drive_gesture_to_completion() {
    let source = Rc::new(ManualFrameSource::new());
    let (sink, provider, driver) = gesture_fixture();

    let monitor_slot: MonitorSlot = Rc::new(RefCell::new(None));
    let monitor = VsyncMonitor::with_frame_source(
        source.clone(),
        60.0,
        pacing_listener(&driver, &monitor_slot),
    );
    monitor_slot.borrow_mut().replace(monitor.clone());

    monitor.request_update();
    let mut frame_time = 16_666_666u64;
    let mut fired = 0;
    while source.fire(frame_time) {
        frame_time += 16_666_666;
        fired += 1;
        assert!(fired < 100, "monitor never went quiet");
    }

    assert_full_gesture(&sink, &provider);
    assert!(!driver.borrow().is_active());
    assert!(!source.has_pending());
}
