pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod level;
pub mod logging;
pub mod pathfinding;
pub mod rng;
pub mod state;
pub mod types;
pub mod world;
