pub mod bond;
pub mod cell_grid;
pub mod commands;
pub mod config;
pub mod particle;
pub mod simulation;
pub mod snapshot;
pub mod units;
pub mod utils;
