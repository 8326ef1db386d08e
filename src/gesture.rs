//! Closed-fist detection.
//!
//! A hand counts as a fist when every fingertip sits below the palm center
//! in image coordinates. One frame, one decision: no smoothing or memory.

use crate::tracking::landmarks::{HandLandmarks, LandmarkId};

/// True iff all five fingertips are strictly below the palm center.
pub fn is_flap_gesture(hand: &HandLandmarks) -> bool {
    let palm_y = hand.get(LandmarkId::palm_center()).y;
    LandmarkId::fingertips()
        .iter()
        .all(|&tip| hand.get(tip).y > palm_y)
}

/// Flap signal for a frame: any detected hand making a fist.
///
/// No hands means no flap.
pub fn flap_signal(hands: &[HandLandmarks]) -> bool {
    hands.iter().any(is_flap_gesture)
}
