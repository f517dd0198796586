//! Implementation of search algorithms.
//!
//! These algorithms can do path-finding on any space a `Provider` describes.

pub mod astar;
