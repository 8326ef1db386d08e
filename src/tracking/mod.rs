//! Camera and hand-tracking collaborators.
//!
//! Image capture and landmark inference run outside this crate. The game
//! reaches them through two seams: a [`FrameSource`] that delivers one frame
//! per tick and a [`HandDetector`] that picks the landmark sets to classify.

pub mod landmarks;
pub mod stream;
pub mod tracker;

use crate::core::constants::MAX_CAPTURE_BACKOFF_MS;
use landmarks::HandLandmarks;
use std::io;
use std::thread;
use std::time::Duration;

pub use stream::{KeyboardOnly, LandmarkStream, ReportedHands};
pub use tracker::{spawn_tracker, TrackerProcess};

/// One captured frame, as reported by the tracker.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// Monotonic frame number from the source.
    pub sequence: u64,
    /// Camera resolution, 0 when the source does not say.
    pub width: u32,
    pub height: u32,
    /// Hands found by the tracker's own inference.
    pub hands: Vec<HandLandmarks>,
}

/// Supplies frames on demand. An `Err` means no frame this time.
pub trait FrameSource {
    fn capture(&mut self) -> io::Result<Frame>;

    /// Short description for logs.
    fn describe(&self) -> String;
}

/// Extracts hand landmarks from a frame. No hand is an empty list, not an error.
pub trait HandDetector {
    fn detect(&mut self, frame: &Frame) -> Vec<HandLandmarks>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn capture(&mut self) -> io::Result<Frame> {
        (**self).capture()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// How hard to try before a capture failure becomes fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts after the first failure.
    pub retries: u32,
    /// Wait before the first retry; doubled for each further retry.
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn new(retries: u32, backoff: Duration) -> Self {
        Self { retries, backoff }
    }

    /// Delay before retry number `attempt` (1-based), capped.
    pub fn delay(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.saturating_sub(1).min(16);
        self.backoff
            .saturating_mul(factor)
            .min(Duration::from_millis(MAX_CAPTURE_BACKOFF_MS))
    }
}

/// Capture a frame, retrying transient failures with backoff.
///
/// Returns the last error once every attempt has failed.
pub fn capture_with_retry<S: FrameSource + ?Sized>(
    source: &mut S,
    policy: &RetryPolicy,
) -> io::Result<Frame> {
    let mut attempt = 0;
    loop {
        match source.capture() {
            Ok(frame) => {
                if attempt > 0 {
                    log::info!("Capture recovered after {} retries", attempt);
                }
                return Ok(frame);
            }
            // An ended stream will not come back.
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                log::error!("Capture source ended: {}", e);
                return Err(e);
            }
            Err(e) if attempt >= policy.retries => {
                log::error!("Capture failed after {} retries: {}", attempt, e);
                return Err(e);
            }
            Err(e) => {
                attempt += 1;
                let delay = policy.delay(attempt);
                log::warn!(
                    "Capture failed ({}), retry {}/{} in {:?}",
                    e,
                    attempt,
                    policy.retries,
                    delay
                );
                thread::sleep(delay);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays a scripted sequence of capture results.
    struct ScriptedSource {
        results: VecDeque<io::Result<Frame>>,
        calls: u32,
    }

    impl ScriptedSource {
        fn new(results: Vec<io::Result<Frame>>) -> Self {
            Self {
                results: results.into(),
                calls: 0,
            }
        }
    }

    impl FrameSource for ScriptedSource {
        fn capture(&mut self) -> io::Result<Frame> {
            self.calls += 1;
            self.results
                .pop_front()
                .unwrap_or_else(|| Err(io::Error::new(io::ErrorKind::Other, "script exhausted")))
        }

        fn describe(&self) -> String {
            "scripted".to_string()
        }
    }

    fn busy() -> io::Result<Frame> {
        Err(io::Error::new(io::ErrorKind::WouldBlock, "camera busy"))
    }

    fn no_wait(retries: u32) -> RetryPolicy {
        RetryPolicy::new(retries, Duration::ZERO)
    }

    #[test]
    fn test_first_try_success() {
        let mut source = ScriptedSource::new(vec![Ok(Frame::default())]);
        assert!(capture_with_retry(&mut source, &no_wait(3)).is_ok());
        assert_eq!(source.calls, 1);
    }

    #[test]
    fn test_recovers_from_transient_failures() {
        let frame = Frame {
            sequence: 7,
            ..Frame::default()
        };
        let mut source = ScriptedSource::new(vec![busy(), busy(), Ok(frame)]);
        let captured = capture_with_retry(&mut source, &no_wait(3)).expect("should recover");
        assert_eq!(captured.sequence, 7);
        assert_eq!(source.calls, 3);
    }

    #[test]
    fn test_gives_up_after_retries() {
        let mut source = ScriptedSource::new(vec![busy(), busy(), busy(), Ok(Frame::default())]);
        let err = capture_with_retry(&mut source, &no_wait(2)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::WouldBlock);
        assert_eq!(source.calls, 3);
    }

    #[test]
    fn test_zero_retries_fails_fast() {
        let mut source = ScriptedSource::new(vec![busy(), Ok(Frame::default())]);
        assert!(capture_with_retry(&mut source, &no_wait(0)).is_err());
        assert_eq!(source.calls, 1);
    }

    #[test]
    fn test_end_of_stream_not_retried() {
        let eof = Err(io::Error::new(io::ErrorKind::UnexpectedEof, "done"));
        let mut source = ScriptedSource::new(vec![eof, Ok(Frame::default())]);
        let err = capture_with_retry(&mut source, &no_wait(5)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        assert_eq!(source.calls, 1);
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = RetryPolicy::new(10, Duration::from_millis(100));
        assert_eq!(policy.delay(1), Duration::from_millis(100));
        assert_eq!(policy.delay(2), Duration::from_millis(200));
        assert_eq!(policy.delay(3), Duration::from_millis(400));
        assert_eq!(
            policy.delay(10),
            Duration::from_millis(MAX_CAPTURE_BACKOFF_MS)
        );
    }
}
