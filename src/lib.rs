//! Simplecast Source - podcast metadata for content graphs.
//!
//! Fetches a podcast, its episodes and its seasons from the Simplecast API
//! and hands them to a host as camelCased, typed nodes.

pub mod casing;
pub mod cli;
pub mod config;
pub mod error;
pub mod simplecast;
pub mod source;
#[cfg(test)]
pub mod test_utils;
