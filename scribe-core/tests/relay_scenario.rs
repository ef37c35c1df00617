mod common;

use common::{Button, Lcd, ResetLine, SimClock, SimCountdown, Wire};
use embassy_futures::block_on;
use scribe_core::config::BoardConfig;
use scribe_core::console::Console;
use scribe_core::control::ControlLoop;
use scribe_core::guard::{GuardState, GuardedEdgeInput};
use scribe_core::queue::{ByteQueue, DEFAULT_CAPACITY};
use scribe_core::timer::PeriodicTimer;

fn timer(clock: &SimClock, config: &BoardConfig) -> PeriodicTimer<SimCountdown> {
    PeriodicTimer::new(
        SimCountdown::new(clock.clone(), config.timer.clock_hz),
        config.timer.clone(),
    )
}

#[test]
fn relay_end_to_end() {
    let config = BoardConfig::default();
    let clock = SimClock::default();
    let wire = Wire::default();
    let reset = ResetLine::default();

    let mut queue: ByteQueue<DEFAULT_CAPACITY> = ByteQueue::new(config.queue.overflow);
    let (mut tx, rx) = queue.split();
    let tally = rx.tally();

    let console = Console::new(Lcd::default(), config.display, config.console.label.clone());
    let mut ctl = ControlLoop::new(
        rx,
        console,
        wire.clone(),
        reset.clone(),
        timer(&clock, &config),
        timer(&clock, &config),
        &config,
    );
    let mut button = GuardedEdgeInput::new(Button::default(), timer(&clock, &config), config.timing.guard_ms);

    // Settle delay before anything is drawn
    block_on(ctl.start()).unwrap();
    assert_eq!(clock.now_us(), 1_000_000);
    assert_eq!(ctl.console().display().row(1), "Char Recv:      ");

    let _ = tx.push(b'H');
    let _ = tx.push(b'i');
    for _ in 0..3 {
        block_on(ctl.cycle()).unwrap();
    }
    // Iterations stay on the 10 ms grid despite the 7 ms workload
    assert_eq!(clock.now_us(), 1_030_000);
    assert_eq!(ctl.console().display().row(0), "Hi              ");
    assert_eq!(ctl.console().display().row(1), "Char Recv: 2    ");
    assert_eq!(ctl.console().display().cursor, 2);

    // Report button: one report, then muted for the guard interval
    button.edge_mut().pending = true;
    let reported = block_on(button.cycle(|| tally.received(), &mut wire.clone())).unwrap();
    assert_eq!(reported, 2);
    assert_eq!(wire.text(), "2");
    assert_eq!(clock.now_us(), 1_130_000);
    assert_eq!(button.state(), GuardState::Armed);

    // Bounces during a guard are not reported
    let mut out = wire.clone();
    assert_eq!(button.on_edge(tally.received(), &mut out), Ok(true));
    assert_eq!(button.on_edge(tally.received(), &mut out), Ok(false));
    button.edge_mut().pending = true;
    assert!(button.on_guard_expiry());
    assert!(!button.edge().pending);
    assert_eq!(wire.text(), "22");
    assert_eq!(button.suppressed(), 1);

    // Reset clears the count and the display, unread bytes survive
    let _ = tx.push(b'!');
    let _ = tx.push(b'?');
    reset.0.set(true);
    let it = block_on(ctl.cycle()).unwrap();
    assert_eq!(it.byte, Some(b'!'));
    assert!(it.reset);
    assert_eq!(tally.received(), 0);
    assert_eq!(ctl.console().display().row(0), "                ");
    assert_eq!(ctl.console().display().row(1), "Char Recv: 0    ");

    block_on(ctl.cycle()).unwrap();
    assert_eq!(ctl.console().display().row(0), "?               ");
    assert!(ctl.consumer().is_empty());
}

#[test]
fn line_terminators_and_wrap() {
    let config = BoardConfig::default();
    let clock = SimClock::default();

    let mut queue: ByteQueue<64> = ByteQueue::new(config.queue.overflow);
    let (mut tx, rx) = queue.split();

    let console = Console::new(Lcd::default(), config.display, config.console.label.clone());
    let mut ctl = ControlLoop::new(
        rx,
        console,
        Wire::default(),
        ResetLine::default(),
        timer(&clock, &config),
        timer(&clock, &config),
        &config,
    );
    block_on(ctl.start()).unwrap();

    for &b in b"line one\r\nA quick brown fox!" {
        let _ = tx.push(b);
    }
    while !ctl.consumer().is_empty() {
        block_on(ctl.cycle()).unwrap();
    }

    // "A quick brown fo" filled the row and was wiped
    assert_eq!(ctl.console().display().row(0), "x!              ");
    assert_eq!(ctl.console().display().row(1), "Char Recv: 28   ");
    assert_eq!(ctl.console().write_index(), 2);
}
