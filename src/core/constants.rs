// Frame timing
pub const FRAME_INTERVAL_MS: u64 = 16;
/// Largest elapsed time fed to the spawn timer in one frame (after a stall or resume).
pub const MAX_FRAME_ELAPSED_MS: u64 = 100;

// Lanes
pub const LANE_COUNT: usize = 3;
pub const LANE_OFFSETS: [f64; LANE_COUNT] = [-7.0, 0.0, 7.0];
pub const START_LANE: u8 = 1;

// Obstacle depth axis (far = negative, player sits near +9)
pub const SPAWN_DEPTH: f64 = -20.0;
pub const DESPAWN_DEPTH: f64 = 20.0;
pub const COLLISION_BAND_NEAR: f64 = 8.5;
pub const COLLISION_BAND_FAR: f64 = 9.5;
pub const PLAYER_DEPTH: f64 = 9.0;

// Speed per tick
pub const BASE_SPEED: f64 = 0.2;
pub const SPEED_STEP: f64 = 0.05;
pub const SPEED_CAP: f64 = 1.0;

// Spawn interval
pub const BASE_SPAWN_INTERVAL_MS: u64 = 2000;
pub const SPAWN_INTERVAL_STEP_MS: u64 = 50;
pub const MIN_SPAWN_INTERVAL_MS: u64 = 400;

// Leveling
pub const START_LEVEL: u32 = 1;
pub const LEVEL_MILESTONE: u32 = 10;

// Reward defaults
pub const DEFAULT_TASK_TYPE: &str = "runner_game";
pub const DEFAULT_XP_PER_SESSION: u32 = 100;
pub const DEFAULT_COINS_PER_LEVEL: u32 = 10;
pub const DEFAULT_BATTERY_INCREMENT: u32 = 10;
pub const DEFAULT_BATTERY_CAP: u32 = 100;
pub const MS_PER_MINUTE: i64 = 60_000;

// Loading
pub const DEFAULT_LOADING_GRACE_MS: u64 = 2000;
