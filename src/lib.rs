//! Hierarchical state machines driving a player and its enemies.
//!
//! The core ([`fsm`], [`engine::timer`], [`detection`], [`agent`]) talks to
//! physics, navigation, animation and health only through the traits in
//! [`components::character`]. [`app`], [`scene`] and [`systems`] wire it into
//! a headless hecs simulation.

pub mod agent;
pub mod app;
pub mod components;
pub mod config;
pub mod detection;
pub mod engine;
pub mod error;
pub mod fsm;
pub mod scene;
pub mod systems;
