//! Command line application

pub mod cli;
pub mod error;
pub mod startup;
