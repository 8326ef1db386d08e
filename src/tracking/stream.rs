//! Frame sources backed by an external hand tracker.
//!
//! The tracker writes one JSON record per camera frame:
//!
//! ```text
//! {"hands":[{"landmarks":[{"x":0.51,"y":0.62,"z":-0.03}, ...21 points],
//!            "handedness":"Right","score":0.97}]}
//! ```
//!
//! Records can come from a recorded file or, through
//! [`TrackerProcess`](super::tracker::TrackerProcess), a live tracker.

use super::landmarks::HandLandmarks;
use super::{Frame, FrameSource, HandDetector};
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Deserialize)]
struct LandmarkRecord {
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    hands: Vec<HandLandmarks>,
}

/// Reads landmark records line by line from any buffered reader.
pub struct LandmarkStream<R> {
    reader: R,
    label: String,
    mirror: bool,
    sequence: u64,
    line: String,
    malformed: u64,
}

impl<R: BufRead> LandmarkStream<R> {
    pub fn new(reader: R, label: impl Into<String>, mirror: bool) -> Self {
        Self {
            reader,
            label: label.into(),
            mirror,
            sequence: 0,
            line: String::new(),
            malformed: 0,
        }
    }

    /// Lines that failed to parse so far.
    pub fn malformed_records(&self) -> u64 {
        self.malformed
    }

    fn parse_record(&mut self, line: &str) -> Frame {
        self.sequence += 1;
        match serde_json::from_str::<LandmarkRecord>(line) {
            Ok(record) => {
                let hands = if self.mirror {
                    record.hands.iter().map(HandLandmarks::mirrored).collect()
                } else {
                    record.hands
                };
                Frame {
                    sequence: self.sequence,
                    width: record.width,
                    height: record.height,
                    hands,
                }
            }
            Err(e) => {
                self.malformed += 1;
                log::warn!(
                    "{}: skipping malformed record {}: {}",
                    self.label,
                    self.sequence,
                    e
                );
                Frame {
                    sequence: self.sequence,
                    ..Frame::default()
                }
            }
        }
    }
}

impl LandmarkStream<BufReader<File>> {
    /// Replay a recorded landmark file.
    pub fn open(path: &Path, mirror: bool) -> io::Result<Self> {
        let file = File::open(path).map_err(|e| {
            io::Error::new(e.kind(), format!("{}: {}", path.display(), e))
        })?;
        Ok(Self::new(
            BufReader::new(file),
            path.display().to_string(),
            mirror,
        ))
    }
}

impl<R: BufRead> FrameSource for LandmarkStream<R> {
    fn capture(&mut self) -> io::Result<Frame> {
        loop {
            self.line.clear();
            let read = self.reader.read_line(&mut self.line)?;
            if read == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("{}: landmark stream ended", self.label),
                ));
            }
            let line = self.line.trim().to_string();
            if !line.is_empty() {
                return Ok(self.parse_record(&line));
            }
        }
    }

    fn describe(&self) -> String {
        format!("landmark stream {}", self.label)
    }
}

/// Source used when no tracker is configured: empty frames, keyboard play only.
#[derive(Debug, Default)]
pub struct KeyboardOnly {
    sequence: u64,
}

impl FrameSource for KeyboardOnly {
    fn capture(&mut self) -> io::Result<Frame> {
        self.sequence += 1;
        Ok(Frame {
            sequence: self.sequence,
            ..Frame::default()
        })
    }

    fn describe(&self) -> String {
        "keyboard only".to_string()
    }
}

/// Detector for sources that already ran inference: returns the frame's hands.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReportedHands;

impl HandDetector for ReportedHands {
    fn detect(&mut self, frame: &Frame) -> Vec<HandLandmarks> {
        frame.hands.clone()
    }
}
