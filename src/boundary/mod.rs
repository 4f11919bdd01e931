//! Boundary construction
//!
//! This module is organized into submodules:
//! - `defaults`: Sampling and rounding constants
//! - `geodesy`: Spherical forward projection and bearing
//! - `segment`: Points contributed by one record, per shape code
//! - `ring`: Ring accumulation, closure and finished rings
//! - `assemble`: The per-identifier fold over the record stream

pub mod assemble;
pub mod defaults;
pub mod geodesy;
pub mod ring;
pub mod segment;

// Re-export commonly used items
pub use assemble::{Accumulator, GroupBoundary, assemble};
pub use geodesy::{bearing, project};
pub use ring::{BoundaryRing, CircleSpec, FinishedRing, RingBuilder, RingPrimitive};
pub use segment::Segment;
