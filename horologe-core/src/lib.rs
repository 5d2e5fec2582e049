//! Host-agnostic core logic for the Horologe watch face
//!
//! This crate contains everything that decides *when* and *what* the face
//! draws, without depending on a specific host:
//!
//! - Mode controller (visibility, ambient mode, capability flags)
//! - Update scheduler (single pending tick, second-aligned delays)
//! - Host event routing (timezone, taps, properties, ambient ticks)
//! - Time and battery snapshots
//! - Renderer producing positioned text for a draw surface
//! - Host collaborator traits and the owning `WatchFace` controller

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

cfg_if::cfg_if! {
    if #[cfg(feature = "log")] {
        pub use log::{trace, debug, info, warn, error};
    }
    else if #[cfg(feature = "defmt")] {
        pub use defmt::{trace, debug, info, warn, error};
    }
    else {
        macro_rules! trace {
            ($($arg:tt)*) => {{}};
        }
        macro_rules! debug {
            ($($arg:tt)*) => {{}};
        }
        macro_rules! info {
            ($($arg:tt)*) => {{}};
        }
        macro_rules! warn {
            ($($arg:tt)*) => {{}};
        }
        macro_rules! error {
            ($($arg:tt)*) => {{}};
        }
        #[allow(unused_imports)]
        pub(crate) use {trace, debug, info, warn, error};
    }
}

pub mod config;
pub mod events;
pub mod face;
pub mod mode;
pub mod render;
pub mod scheduler;
pub mod snapshot;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use face::{PlatformContext, WatchFace};
