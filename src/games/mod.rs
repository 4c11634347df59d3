//! Game implementations.

pub mod mastermind;
