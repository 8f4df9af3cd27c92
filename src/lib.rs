//! Interactive fireworks for truecolor terminals.
//!
//! Rockets climb from the bottom center of the canvas towards a target and
//! burst into sparks that fall and fade. [`show::Show`] drives one frame per
//! display refresh; everything it draws goes through the [`canvas::Surface`]
//! trait, and [`present::Presenter`] turns a [`canvas::Canvas`] into
//! half-block terminal output.

pub mod canvas;
pub mod color;
pub mod config;
pub mod input;
pub mod present;
pub mod rocket;
pub mod show;
pub mod simulation;
pub mod spark;
pub mod trail;
