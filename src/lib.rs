//! Multi-press button classification for small microcontrollers.
//!
//! A timer interrupt samples every registered button through an
//! [`EdgeSampler`], which debounces the input line and pushes timestamped
//! edges into a lock-free [`EventQueue`]. The main loop calls
//! [`MultiPressButton::process`] to drain that queue through the press state
//! machine, which reports single, double, triple and long presses either by
//! calling the registered [`Actions`] or by latching flags for polling.
//!
//! # Features
//!
//! - `defmt` - log state transitions and dropped events with `defmt`
//! - `rp2040` - RP2040 timer glue and the demo firmware binary
#![cfg_attr(not(test), no_std)]

mod button;
mod classifier;
mod clock;
mod config;
mod error;
mod event;
mod queue;
mod registry;
mod sampler;
mod scheduler;

#[cfg(feature = "rp2040")]
pub mod rp2040;

pub use button::button::MultiPressButton;
pub use classifier::classifier::{Actions, ClassifierState, PressClassifier};
pub use clock::clock::{elapsed_ms, Clock};
pub use config::config::{
    ButtonConfig, DEFAULT_DEBOUNCE_MS, DEFAULT_LONG_PRESS_MS, DEFAULT_MULTI_PRESS_WINDOW_MS,
    EVENT_QUEUE_SIZE, POLL_INTERVAL_MS,
};
pub use error::error::{Error, Result};
pub use event::event::{ButtonEvent, ButtonPosition, Press};
pub use queue::queue::{EventQueue, EventReader, EventWriter};
pub use registry::registry::{ButtonRegistry, SharedRegistry};
pub use sampler::sampler::EdgeSampler;
pub use scheduler::scheduler::PeriodicTimer;
