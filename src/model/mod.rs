//! Pure data structures (DTOs) shared between the controller and the remote
//! service boundary.

pub mod product;

pub use product::*;
