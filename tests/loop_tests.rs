//! Reaction loop behavior driven through fake collaborators.

use dashbot::cancel::CancelToken;
use dashbot::detect::{PatternDetector, TemplateDetector};
use dashbot::gesture::{ActionExecutor, GestureError};
use dashbot::reactor::{ReactionLoop, StopReason};
use dashbot::source::{CaptureError, FrameSource};
use dashbot_core::{ActionKind, PatternBinding};
use dashbot_cv::{MatchOutcome, TemplateCache, TemplateMatcher};
use image::{GrayImage, Luma};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// Hands out blank frames and cancels the loop once `left` reaches zero.
struct CountingSource {
    left: usize,
    cancel: CancelToken,
    timestamps: Arc<Mutex<Vec<Instant>>>,
}

impl CountingSource {
    fn new(cycles: usize, cancel: CancelToken) -> Self {
        Self {
            left: cycles,
            cancel,
            timestamps: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl FrameSource for CountingSource {
    fn capture(&mut self) -> Result<GrayImage, CaptureError> {
        self.timestamps.lock().unwrap().push(Instant::now());
        self.left -= 1;
        if self.left == 0 {
            self.cancel.cancel();
        }
        Ok(GrayImage::new(8, 8))
    }
}

struct FailingSource;

impl FrameSource for FailingSource {
    fn capture(&mut self) -> Result<GrayImage, CaptureError> {
        Err(CaptureError::Truncated)
    }
}

/// Matches patterns by name with a scripted score.
struct ScriptedDetector {
    hits: Vec<(&'static str, f32)>,
    threshold: f32,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedDetector {
    fn new(hits: Vec<(&'static str, f32)>, threshold: f32) -> Self {
        Self {
            hits,
            threshold,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl PatternDetector for ScriptedDetector {
    fn detect(&mut self, _frame: &GrayImage, pattern: &str) -> MatchOutcome {
        self.calls.lock().unwrap().push(pattern.to_string());
        match self.hits.iter().find(|(name, _)| *name == pattern) {
            Some((_, score)) => MatchOutcome::from_score(*score, (0, 0), self.threshold),
            None => MatchOutcome::no_match(),
        }
    }
}

#[derive(Clone, Default)]
struct RecordingExecutor {
    actions: Arc<Mutex<Vec<ActionKind>>>,
}

impl ActionExecutor for RecordingExecutor {
    fn execute(&mut self, action: ActionKind) -> Result<(), GestureError> {
        self.actions.lock().unwrap().push(action);
        Ok(())
    }
}

#[derive(Clone, Default)]
struct BrokenExecutor {
    attempts: Arc<Mutex<usize>>,
}

impl ActionExecutor for BrokenExecutor {
    fn execute(&mut self, _action: ActionKind) -> Result<(), GestureError> {
        *self.attempts.lock().unwrap() += 1;
        Err(GestureError::Backend("injected failure".into()))
    }
}

fn bindings(pairs: &[(&str, ActionKind)]) -> Vec<PatternBinding> {
    pairs
        .iter()
        .map(|(pattern, action)| PatternBinding::new(*pattern, *action))
        .collect()
}

#[test]
fn first_matching_binding_wins() {
    let cancel = CancelToken::new();
    let source = CountingSource::new(1, cancel.clone());
    let detector = ScriptedDetector::new(vec![("low", 0.9), ("high", 0.95)], 0.7);
    let calls = detector.calls.clone();
    let executor = RecordingExecutor::default();
    let actions = executor.actions.clone();

    let mut bot = ReactionLoop::new(
        source,
        detector,
        executor,
        bindings(&[("high", ActionKind::Jump), ("low", ActionKind::Slide)]),
        Duration::from_millis(1),
        cancel,
    );

    assert_eq!(bot.run().unwrap(), StopReason::Cancelled);
    // Only the earlier binding's action fires, and the later binding is
    // never even evaluated that cycle.
    assert_eq!(*actions.lock().unwrap(), vec![ActionKind::Jump]);
    assert_eq!(*calls.lock().unwrap(), vec!["high".to_string()]);
}

#[test]
fn no_match_means_no_action() {
    let cancel = CancelToken::new();
    let source = CountingSource::new(3, cancel.clone());
    let detector = ScriptedDetector::new(vec![], 0.7);
    let executor = RecordingExecutor::default();
    let actions = executor.actions.clone();

    let mut bot = ReactionLoop::new(
        source,
        detector,
        executor,
        bindings(&[("obstacle", ActionKind::Jump)]),
        Duration::from_millis(1),
        cancel,
    );

    assert_eq!(bot.run().unwrap(), StopReason::Cancelled);
    assert!(actions.lock().unwrap().is_empty());
}

#[test]
fn score_at_threshold_fires_and_below_does_not() {
    for (score, expected) in [(0.7_f32, 1_usize), (0.699, 0)] {
        let cancel = CancelToken::new();
        let source = CountingSource::new(1, cancel.clone());
        let detector = ScriptedDetector::new(vec![("obstacle", score)], 0.7);
        let executor = RecordingExecutor::default();
        let actions = executor.actions.clone();

        let mut bot = ReactionLoop::new(
            source,
            detector,
            executor,
            bindings(&[("obstacle", ActionKind::Jump)]),
            Duration::from_millis(1),
            cancel,
        );

        bot.run().unwrap();
        assert_eq!(actions.lock().unwrap().len(), expected, "score {score}");
    }
}

#[test]
fn missing_template_does_not_block_later_bindings() {
    // Real cache and matcher: one binding points at a template that was
    // never loaded, the next at one present in the frame.
    let dir = fixture_dir("missing");
    let pattern = noise(16, 16);
    pattern.save(dir.join("valid.png")).unwrap();

    let cache = TemplateCache::load(&dir, ["ghost", "valid"]);
    assert_eq!(cache.len(), 1);
    let detector = TemplateDetector::new(cache, TemplateMatcher::new(0.7));

    let cancel = CancelToken::new();
    let source = StaticSource {
        frame: pattern,
        cancel: cancel.clone(),
    };
    let executor = RecordingExecutor::default();
    let actions = executor.actions.clone();

    let mut bot = ReactionLoop::new(
        source,
        detector,
        executor,
        bindings(&[("ghost", ActionKind::Slide), ("valid", ActionKind::Jump)]),
        Duration::from_millis(1),
        cancel,
    );

    assert_eq!(bot.run().unwrap(), StopReason::Cancelled);
    assert_eq!(*actions.lock().unwrap(), vec![ActionKind::Jump]);
}

#[test]
fn cancellation_during_sleep_stops_promptly() {
    let cancel = CancelToken::new();
    let source = CountingSource::new(usize::MAX, cancel.clone());
    let timestamps = source.timestamps.clone();
    let detector = ScriptedDetector::new(vec![], 0.7);
    let executor = RecordingExecutor::default();
    let actions = executor.actions.clone();

    let remote = cancel.clone();
    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(100));
        remote.cancel();
    });

    let start = Instant::now();
    let mut bot = ReactionLoop::new(
        source,
        detector,
        executor,
        bindings(&[("obstacle", ActionKind::Jump)]),
        Duration::from_secs(60),
        cancel,
    );

    assert_eq!(bot.run().unwrap(), StopReason::Cancelled);
    canceller.join().unwrap();

    // Interrupt arrived mid-sleep: no new cycle started, no actions, fast exit.
    assert!(start.elapsed() < Duration::from_secs(5));
    assert!(timestamps.lock().unwrap().len() <= 1);
    assert!(actions.lock().unwrap().is_empty());
}

#[test]
fn cancelled_token_prevents_any_capture() {
    let cancel = CancelToken::new();
    cancel.cancel();

    let source = CountingSource::new(usize::MAX, cancel.clone());
    let timestamps = source.timestamps.clone();
    let detector = ScriptedDetector::new(vec![("obstacle", 0.9)], 0.7);
    let executor = RecordingExecutor::default();
    let actions = executor.actions.clone();

    let mut bot = ReactionLoop::new(
        source,
        detector,
        executor,
        bindings(&[("obstacle", ActionKind::Jump)]),
        Duration::from_millis(1),
        cancel,
    );

    assert_eq!(bot.run().unwrap(), StopReason::Cancelled);
    assert!(timestamps.lock().unwrap().is_empty());
    assert!(actions.lock().unwrap().is_empty());
}

#[test]
fn cycles_are_spaced_by_at_least_the_interval() {
    let interval = Duration::from_millis(50);
    let cancel = CancelToken::new();
    let source = CountingSource::new(4, cancel.clone());
    let timestamps = source.timestamps.clone();
    let detector = ScriptedDetector::new(vec![], 0.7);

    let mut bot = ReactionLoop::new(
        source,
        detector,
        RecordingExecutor::default(),
        bindings(&[("obstacle", ActionKind::Jump)]),
        interval,
        cancel,
    );
    bot.run().unwrap();

    let timestamps = timestamps.lock().unwrap();
    assert_eq!(timestamps.len(), 4);
    // Allow a little scheduling jitter below the nominal interval.
    let tolerance = Duration::from_millis(5);
    for pair in timestamps.windows(2) {
        assert!(pair[1] - pair[0] >= interval - tolerance);
    }
}

#[test]
fn capture_failure_is_fatal() {
    let cancel = CancelToken::new();
    let detector = ScriptedDetector::new(vec![("obstacle", 0.9)], 0.7);
    let executor = RecordingExecutor::default();
    let actions = executor.actions.clone();

    let mut bot = ReactionLoop::new(
        FailingSource,
        detector,
        executor,
        bindings(&[("obstacle", ActionKind::Jump)]),
        Duration::from_millis(1),
        cancel,
    );

    assert!(bot.run().is_err());
    assert!(actions.lock().unwrap().is_empty());
}

#[test]
fn gesture_failure_is_contained_to_its_cycle() {
    let cancel = CancelToken::new();
    let source = CountingSource::new(3, cancel.clone());
    let detector = ScriptedDetector::new(vec![("obstacle", 0.9)], 0.7);
    let executor = BrokenExecutor::default();
    let attempts = executor.attempts.clone();

    let mut bot = ReactionLoop::new(
        source,
        detector,
        executor,
        bindings(&[("obstacle", ActionKind::Jump)]),
        Duration::from_millis(1),
        cancel,
    );

    // The loop keeps running and tries again on later cycles.
    assert_eq!(bot.run().unwrap(), StopReason::Cancelled);
    assert_eq!(*attempts.lock().unwrap(), 3);
}

/// Always returns a copy of the same frame; cancels after the first one.
struct StaticSource {
    frame: GrayImage,
    cancel: CancelToken,
}

impl FrameSource for StaticSource {
    fn capture(&mut self) -> Result<GrayImage, CaptureError> {
        self.cancel.cancel();
        Ok(self.frame.clone())
    }
}

fn fixture_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("dashbot-loop-{tag}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn noise(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| {
        Luma([((x * 37 + y * 101) % 251) as u8])
    })
}
