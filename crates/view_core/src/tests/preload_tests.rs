use super::*;

use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use tokio::time::sleep;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn completion_counter() -> (Arc<AtomicUsize>, impl FnOnce() + Send + 'static) {
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);
    (fired, move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
}

struct ScriptedOracle {
    values: Vec<u8>,
}

impl ProgressOracle for ScriptedOracle {
    fn advance(&mut self, current: u8) -> u8 {
        if self.values.is_empty() {
            current
        } else {
            self.values.remove(0)
        }
    }
}

#[tokio::test(start_paused = true)]
async fn reaches_full_progress_at_three_seconds_and_reveals_after_grace() {
    let mut sequencer = PreloadSequencer::new(PreloadTiming::default());
    let (fired, on_complete) = completion_counter();

    assert_eq!(sequencer.start(on_complete), Outcome::Accepted);
    assert!(sequencer.snapshot().running);
    assert_eq!(sequencer.snapshot().percent, 0);

    sleep(ms(2985)).await;
    assert_eq!(sequencer.snapshot().percent, 99);

    sleep(ms(30)).await;
    let snapshot = sequencer.snapshot();
    assert_eq!(snapshot.percent, 100);
    assert!(!snapshot.running);
    assert!(!snapshot.revealed);
    assert_eq!(fired.load(Ordering::SeqCst), 0);

    sleep(ms(775)).await;
    assert!(!sequencer.snapshot().revealed);

    sleep(ms(20)).await;
    let snapshot = sequencer.snapshot();
    assert!(snapshot.revealed);
    assert!(!snapshot.running);
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    sleep(ms(5000)).await;
    assert_eq!(sequencer.snapshot().percent, 100);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn every_step_size_lands_exactly_on_one_hundred_once() {
    for step in [1u8, 2, 3, 7, 33, 99, 100] {
        let timing = PreloadTiming {
            step,
            ..PreloadTiming::default()
        };
        let mut sequencer = PreloadSequencer::new(timing);
        let mut updates = sequencer.subscribe();
        let (fired, on_complete) = completion_counter();
        assert!(sequencer.start(on_complete).is_accepted());

        let mut last = 0;
        loop {
            updates.changed().await.expect("sequencer alive");
            let snapshot = *updates.borrow_and_update();
            assert!(snapshot.percent >= last, "step {step} went backwards");
            assert!(snapshot.percent <= COMPLETE_PERCENT, "step {step} overshot");
            last = snapshot.percent;
            if snapshot.revealed {
                break;
            }
        }

        assert_eq!(last, COMPLETE_PERCENT);
        sleep(ms(2000)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1, "step {step}");
    }
}

#[tokio::test(start_paused = true)]
async fn second_start_is_ignored_and_does_not_restart() {
    let mut sequencer = PreloadSequencer::new(PreloadTiming::default());
    let (fired, on_complete) = completion_counter();
    let (second_fired, second_complete) = completion_counter();

    assert!(sequencer.start(on_complete).is_accepted());
    sleep(ms(615)).await;
    assert_eq!(sequencer.snapshot().percent, 20);

    assert_eq!(
        sequencer.start(second_complete),
        Outcome::Ignored(IgnoreReason::AlreadyStarted)
    );
    assert_eq!(sequencer.snapshot().percent, 20);

    sleep(ms(4000)).await;
    assert!(sequencer.snapshot().revealed);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert_eq!(second_fired.load(Ordering::SeqCst), 0);

    assert_eq!(
        sequencer.start(|| {}),
        Outcome::Ignored(IgnoreReason::AlreadyStarted)
    );
}

#[tokio::test(start_paused = true)]
async fn teardown_before_completion_stops_ticking() {
    let mut sequencer = PreloadSequencer::new(PreloadTiming::default());
    let updates = sequencer.subscribe();
    let (fired, on_complete) = completion_counter();

    assert!(sequencer.start(on_complete).is_accepted());
    sleep(ms(315)).await;
    assert_eq!(sequencer.snapshot().percent, 10);

    drop(sequencer);
    sleep(ms(5000)).await;

    assert_eq!(updates.borrow().percent, 10);
    assert!(!updates.borrow().revealed);
    assert_eq!(fired.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn cancel_freezes_progress_and_clears_running() {
    let mut sequencer = PreloadSequencer::new(PreloadTiming::default());
    let (fired, on_complete) = completion_counter();

    assert!(sequencer.start(on_complete).is_accepted());
    sleep(ms(1515)).await;
    assert_eq!(sequencer.snapshot().percent, 50);
    assert!(sequencer.snapshot().running);

    sequencer.cancel();
    sequencer.cancel();
    sleep(ms(5000)).await;

    let snapshot = sequencer.snapshot();
    assert_eq!(snapshot.percent, 50);
    assert!(!snapshot.running);
    assert!(!snapshot.revealed);
    assert_eq!(fired.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn cancel_during_grace_drops_the_reveal() {
    let mut sequencer = PreloadSequencer::new(PreloadTiming::default());
    let (fired, on_complete) = completion_counter();

    assert!(sequencer.start(on_complete).is_accepted());
    sleep(ms(3100)).await;
    assert_eq!(sequencer.snapshot().percent, 100);

    sequencer.cancel();
    sleep(ms(2000)).await;

    assert!(!sequencer.snapshot().revealed);
    assert_eq!(fired.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn oracle_output_is_clamped_to_monotonic_range() {
    let oracle = ScriptedOracle {
        values: vec![30, 10, 250],
    };
    let mut sequencer = PreloadSequencer::with_oracle(PreloadTiming::default(), oracle);
    let (fired, on_complete) = completion_counter();
    assert!(sequencer.start(on_complete).is_accepted());

    sleep(ms(45)).await;
    assert_eq!(sequencer.snapshot().percent, 30);
    sleep(ms(30)).await;
    assert_eq!(sequencer.snapshot().percent, 30);
    sleep(ms(30)).await;
    assert_eq!(sequencer.snapshot().percent, 100);

    sleep(ms(800)).await;
    assert!(sequencer.snapshot().revealed);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn running_covers_only_the_ticking_phase() {
    let timing = PreloadTiming {
        step: 50,
        ..PreloadTiming::default()
    };
    let mut sequencer = PreloadSequencer::new(timing);
    assert!(sequencer.start(|| {}).is_accepted());

    sleep(ms(45)).await;
    assert_eq!(sequencer.snapshot().percent, 50);
    assert!(sequencer.snapshot().running);

    sleep(ms(30)).await;
    let snapshot = sequencer.snapshot();
    assert_eq!(snapshot.percent, 100);
    assert!(!snapshot.running);
    assert!(!snapshot.revealed);

    sleep(ms(800)).await;
    let snapshot = sequencer.snapshot();
    assert!(!snapshot.running);
    assert!(snapshot.revealed);
}

#[test]
fn label_switches_at_completion_and_emphasizes_late_progress() {
    let mut snapshot = PreloadSnapshot {
        percent: 42,
        running: true,
        revealed: false,
    };
    assert_eq!(snapshot.label(), "SYNCHRONIZING 42%");
    assert!(!snapshot.label_emphasized());

    snapshot.percent = 91;
    assert!(snapshot.label_emphasized());

    snapshot.percent = 100;
    assert_eq!(snapshot.label(), "ENTERING EXHIBITION");
}
