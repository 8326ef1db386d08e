// World geometry (pixels of the logical play field)
pub const WORLD_WIDTH: f64 = 600.0;
pub const WORLD_HEIGHT: f64 = 400.0;
pub const BIRD_X: f64 = 100.0;
pub const BIRD_RADIUS: f64 = 20.0;

// Physics, per tick
pub const GRAVITY: f64 = 0.3;
pub const FLAP_STRENGTH: f64 = -10.0;

// Pipes
pub const PIPE_WIDTH: f64 = 50.0;
pub const PIPE_GAP: f64 = 200.0;
pub const PIPE_VELOCITY: f64 = 4.0;

// Timing
pub const TICK_RATE_HZ: u32 = 30;
pub const IDLE_POLL_MS: u64 = 100;

// Camera / tracker
pub const CAPTURE_RETRIES: u32 = 3;
pub const CAPTURE_BACKOFF_MS: u64 = 100;
pub const MAX_CAPTURE_BACKOFF_MS: u64 = 2_000;
/// How long a fresh tracker may take to report its first frame.
pub const TRACKER_STARTUP_MS: u64 = 5_000;
/// A tracker frame older than this no longer counts as current.
pub const TRACKER_STALE_MS: u64 = 1_000;

// Hand model
pub const HAND_LANDMARK_COUNT: usize = 21;

// Files
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_FILE_NAME: &str = "handflap.log";

// Exit codes
pub const EXIT_OK: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_CAPTURE_FAILURE: u8 = 2;
