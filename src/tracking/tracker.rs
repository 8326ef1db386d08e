//! Live tracker subprocess.
//!
//! The tracker writes records faster or slower than the game ticks, and keeps
//! writing while the game waits on the start or game-over screen. A reader
//! thread drains its stdout and keeps only the newest frame, so each tick sees
//! what the player is doing now rather than a backlog of old records.

use super::stream::LandmarkStream;
use super::{Frame, FrameSource};
use crate::core::constants::{TRACKER_STALE_MS, TRACKER_STARTUP_MS};
use std::io::{self, BufRead, BufReader};
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct FeedState {
    frame: Option<Frame>,
    received_at: Option<Instant>,
    /// The stored frame has not been handed to `capture` yet.
    unread: bool,
    /// Frames replaced before anyone captured them.
    superseded: u64,
    /// Why the stream stopped, once it has.
    ended: Option<String>,
}

#[derive(Debug, Default)]
struct LatestFrame {
    state: Mutex<FeedState>,
    arrived: Condvar,
}

/// A running tracker process whose stdout is a landmark stream.
///
/// `capture` returns the newest record. The process is killed on drop.
pub struct TrackerProcess {
    child: Child,
    label: String,
    latest: Arc<LatestFrame>,
    started: Instant,
    startup_wait: Duration,
    stale_after: Duration,
}

impl TrackerProcess {
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Frames the tracker produced that no tick ever saw.
    pub fn superseded_frames(&self) -> u64 {
        self.latest
            .state
            .lock()
            .map(|state| state.superseded)
            .unwrap_or(0)
    }

    /// Override how old the newest frame may get before capture fails.
    pub fn with_stale_after(mut self, stale_after: Duration) -> Self {
        self.stale_after = stale_after;
        self
    }
}

fn poisoned<T>(_: T) -> io::Error {
    io::Error::new(io::ErrorKind::Other, "tracker feed lock poisoned")
}

impl FrameSource for TrackerProcess {
    fn capture(&mut self) -> io::Result<Frame> {
        let remaining = (self.started + self.startup_wait).saturating_duration_since(Instant::now());
        let guard = self.latest.state.lock().map_err(poisoned)?;
        let (mut state, _) = self
            .latest
            .arrived
            .wait_timeout_while(guard, remaining, |s| s.frame.is_none() && s.ended.is_none())
            .map_err(poisoned)?;

        if state.unread {
            state.unread = false;
            if let Some(frame) = &state.frame {
                return Ok(frame.clone());
            }
        }
        if let Some(reason) = &state.ended {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("{}: {}", self.label, reason),
            ));
        }
        match (&state.frame, state.received_at) {
            (Some(frame), Some(at)) if at.elapsed() < self.stale_after => Ok(frame.clone()),
            (Some(_), _) => Err(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("{}: no new frame for {:?}", self.label, self.stale_after),
            )),
            (None, _) => Err(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("{}: no frame yet", self.label),
            )),
        }
    }

    fn describe(&self) -> String {
        format!("tracker process {} ({})", self.label, self.child.id())
    }
}

impl Drop for TrackerProcess {
    fn drop(&mut self) {
        if let Err(e) = self.child.kill() {
            log::debug!("Tracker process already gone: {}", e);
        }
        let _ = self.child.wait();
        log::info!(
            "Tracker '{}' stopped, {} frames superseded",
            self.label,
            self.superseded_frames()
        );
    }
}

/// Reader thread body: keep replacing the shared frame until the stream ends.
fn pump_records<R: BufRead>(mut stream: LandmarkStream<R>, latest: Arc<LatestFrame>) {
    loop {
        let result = stream.capture();
        let mut state = match latest.state.lock() {
            Ok(state) => state,
            Err(_) => return,
        };
        let done = match result {
            Ok(frame) => {
                if state.unread {
                    state.superseded += 1;
                }
                state.frame = Some(frame);
                state.received_at = Some(Instant::now());
                state.unread = true;
                false
            }
            Err(e) => {
                log::warn!("Tracker stream ended: {}", e);
                state.ended = Some(e.to_string());
                true
            }
        };
        drop(state);
        latest.arrived.notify_all();
        if done {
            return;
        }
    }
}

/// Split a command line into words.
///
/// Whitespace separates words. Single quotes keep their contents verbatim;
/// inside double quotes a backslash escapes `"` and `\`; outside quotes a
/// backslash escapes any character.
pub fn split_command_line(line: &str) -> io::Result<Vec<String>> {
    #[derive(Clone, Copy, PartialEq)]
    enum Quote {
        None,
        Single,
        Double,
    }

    let mut words = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut quote = Quote::None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Quote::Single, '\'') => quote = Quote::None,
            (Quote::Single, c) => word.push(c),
            (Quote::Double, '"') => quote = Quote::None,
            (Quote::Double, '\\') => match chars.next() {
                Some(next @ ('"' | '\\')) => word.push(next),
                Some(next) => {
                    word.push('\\');
                    word.push(next);
                }
                None => word.push('\\'),
            },
            (Quote::Double, c) => word.push(c),
            (Quote::None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut word));
                    in_word = false;
                }
            }
            (Quote::None, '\'') => {
                quote = Quote::Single;
                in_word = true;
            }
            (Quote::None, '"') => {
                quote = Quote::Double;
                in_word = true;
            }
            (Quote::None, '\\') => {
                if let Some(next) = chars.next() {
                    word.push(next);
                }
                in_word = true;
            }
            (Quote::None, c) => {
                word.push(c);
                in_word = true;
            }
        }
    }

    if quote != Quote::None {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("unterminated quote in tracker command: {}", line),
        ));
    }
    if in_word {
        words.push(word);
    }
    Ok(words)
}

/// Start a tracker from a shell-style command line.
///
/// Stdout feeds the game; stderr lines go to the log.
pub fn spawn_tracker(command_line: &str, mirror: bool) -> io::Result<TrackerProcess> {
    let words = split_command_line(command_line)?;
    let (program, args) = words.split_first().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "empty tracker command")
    })?;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| io::Error::new(e.kind(), format!("{}: {}", program, e)))?;

    let stdout = child.stdout.take().ok_or_else(|| {
        io::Error::new(io::ErrorKind::BrokenPipe, "tracker stdout unavailable")
    })?;
    let latest = Arc::new(LatestFrame::default());
    let stream = LandmarkStream::new(BufReader::new(stdout), program.as_str(), mirror);
    let feed = Arc::clone(&latest);
    if let Err(e) = thread::Builder::new()
        .name("tracker-reader".into())
        .spawn(move || pump_records(stream, feed))
    {
        let _ = child.kill();
        let _ = child.wait();
        return Err(e);
    }

    if let Some(stderr) = child.stderr.take() {
        let label = program.clone();
        let forwarded = thread::Builder::new()
            .name("tracker-stderr".into())
            .spawn(move || {
                for line in BufReader::new(stderr).lines().map_while(Result::ok) {
                    log::warn!("[{}] {}", label, line);
                }
            });
        if let Err(e) = forwarded {
            log::warn!("Tracker stderr not forwarded: {}", e);
        }
    }

    log::info!("Started tracker '{}' (pid {})", command_line, child.id());
    Ok(TrackerProcess {
        child,
        label: program.clone(),
        latest,
        started: Instant::now(),
        startup_wait: Duration::from_millis(TRACKER_STARTUP_MS),
        stale_after: Duration::from_millis(TRACKER_STALE_MS),
    })
}
