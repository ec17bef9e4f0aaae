//! Platform abstraction layer
//!
//! Handles the parts that differ between the browser and a headless run:
//! - Frame scheduling (and cancelling it on teardown)
//! - Routing input intents to the single simulation writer
//! - Driving the simulation and rendering from display callbacks

pub mod driver;
pub mod frame;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use driver::{GameDriver, HeadlessReport, run_headless};
pub use frame::{FrameControl, FrameLoop, FrameScheduler, ManualScheduler};
#[cfg(target_arch = "wasm32")]
pub use web::RafScheduler;
