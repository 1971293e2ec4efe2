//! City domain model
//!
//! Pure, framework-free logic for the hexagonal city: side/rotation
//! bookkeeping, damped angle following, camera framing math, and the
//! fixed set of district markers. Everything here is plain math and
//! data so it can be unit tested without spinning up a renderer; the
//! `engine` module wires it into the ECS.

pub mod damping;
pub mod framing;
pub mod markers;
pub mod sides;
