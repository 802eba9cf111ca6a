//! Motorcycle-sound guessing game: answer evaluation, multiple-choice option
//! generation and progressive hints, plus the HTTP service around them.
//!
//! Scoring modules (`similarity`, `tolerance`, `field`, `solo`,
//! `multiplayer`, `hints`) are pure and safe to call from any number of
//! sessions at once. `options::OptionsCache` is the only shared state and is
//! initialized once at startup.

pub mod catalog;
pub mod config;
pub mod constraints;
pub mod domain;
pub mod error;
pub mod field;
pub mod hints;
pub mod logic;
pub mod multiplayer;
pub mod options;
pub mod protocol;
pub mod routes;
pub mod seeds;
pub mod similarity;
pub mod solo;
pub mod state;
pub mod telemetry;
pub mod tolerance;
pub mod util;
