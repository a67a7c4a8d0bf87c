//! Simulation constants.

/// Minimum board width.
pub const MIN_WIDTH: u16 = 3;

/// Minimum board height.
pub const MIN_HEIGHT: u16 = 3;

/// Energy a newly created agent starts with.
pub const STARTING_AGENT_ENERGY: f64 = 20.0;

/// Capacity a newly created resource starts with.
pub const STARTING_RESOURCE_CAPACITY: f64 = 10.0;

/// Energy an agent loses each time it ages.
pub const AGENT_FATIGUE_RATE: f64 = 0.3;

/// Capacity a resource loses each time it ages.
pub const RESOURCE_SPOIL_FACTOR: f64 = 1.2;

/// Yield multiplier of an advantage over its raw capacity.
pub const ADVANTAGE_MULT_FACTOR: f64 = 2.0;

/// One agent is populated per this many cells.
pub const NUM_INIT_AGENT_FACTOR: usize = 4;

/// One resource is populated per this many cells.
pub const NUM_INIT_RESOURCE_FACTOR: usize = 2;

/// Energy above which an aggressive strategy attacks other agents.
pub const AGGRESSION_THRESHOLD: f64 = STARTING_AGENT_ENERGY * 0.75;
