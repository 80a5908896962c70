//! Headless driver for stepgrid searches.
//!
//! Loads a [`Scenario`] from TOML, builds the selected engine over a
//! [`Board`](stepgrid_core::Board), and calls `advance` on a fixed delay,
//! printing the board as it fills in.

pub mod config;
pub mod driver;

pub use config::{GridConfig, RunConfig, Scenario};
pub use driver::{Frames, Report, run};
