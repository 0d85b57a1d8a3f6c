//! Interaction core of a single-room point-and-click adventure.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

#[cfg_attr(coverage_nightly, coverage(off))]
pub mod error;
#[cfg_attr(coverage_nightly, coverage(off))]
pub mod events;
#[cfg_attr(coverage_nightly, coverage(off))]
pub mod formatter;
#[cfg_attr(coverage_nightly, coverage(off))]
pub mod logging;

pub mod config;
pub mod constants;
pub mod game;
pub mod inventory;
pub mod progress;
pub mod room;
pub mod save;
pub mod systems;
