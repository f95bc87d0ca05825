//! T-Rex Runner - endless runner game core with a terminal front end.
//!
//! The game itself lives in [`core`] and [`entities`] and only talks to the
//! outside through [`render::Canvas`], [`audio::AudioSink`] and the events a
//! [`core::Runner`] emits. [`ui`] draws it in a terminal and [`simulator`]
//! plays it headless.

pub mod audio;
pub mod build_info;
pub mod core;
pub mod entities;
pub mod render;
pub mod simulator;
pub mod ui;
