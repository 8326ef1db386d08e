//! 21-point hand landmark model.
//!
//! Point order follows the common hand-tracking layout: wrist first, then
//! four joints per finger from thumb to pinky. Coordinates are normalized
//! to the camera image, with `y` growing downward.

use crate::core::constants::HAND_LANDMARK_COUNT;
use serde::{Deserialize, Serialize};

/// Landmark positions within a [`HandLandmarks`] set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandmarkId {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,
    RingMcp,
    RingPip,
    RingDip,
    RingTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

impl LandmarkId {
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn fingertips() -> [LandmarkId; 5] {
        [
            Self::ThumbTip,
            Self::IndexTip,
            Self::MiddleTip,
            Self::RingTip,
            Self::PinkyTip,
        ]
    }

    /// Reference point for the center of the palm.
    pub fn palm_center() -> LandmarkId {
        Self::MiddleMcp
    }
}

/// Bone segments between landmarks, for drawing a hand skeleton.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    (0, 5),
    (5, 6),
    (6, 7),
    (7, 8),
    (5, 9),
    (9, 10),
    (10, 11),
    (11, 12),
    (9, 13),
    (13, 14),
    (14, 15),
    (15, 16),
    (13, 17),
    (0, 17),
    (17, 18),
    (18, 19),
    (19, 20),
];

/// A single normalized keypoint.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    /// Depth relative to the wrist; not used for classification.
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }
}

/// All keypoints of one detected hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandLandmarks {
    pub landmarks: [Landmark; HAND_LANDMARK_COUNT],
    /// "Left" or "Right" as reported by the tracker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handedness: Option<String>,
    /// Detection confidence reported by the tracker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl HandLandmarks {
    pub fn new(landmarks: [Landmark; HAND_LANDMARK_COUNT]) -> Self {
        Self {
            landmarks,
            handedness: None,
            score: None,
        }
    }

    pub fn get(&self, id: LandmarkId) -> Landmark {
        self.landmarks[id.index()]
    }

    pub fn set(&mut self, id: LandmarkId, landmark: Landmark) {
        self.landmarks[id.index()] = landmark;
    }

    /// Flip horizontally, as seen in a mirrored camera preview.
    pub fn mirrored(&self) -> Self {
        let mut hand = self.clone();
        for landmark in hand.landmarks.iter_mut() {
            landmark.x = 1.0 - landmark.x;
        }
        hand
    }
}
