//! Behavioural step modules registered with `rstest-bdd`.

pub mod resolution_steps;
pub mod switching_steps;
