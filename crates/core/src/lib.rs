//! Summation-by-parts finite difference operators in one dimension.
//!
//! [`construct`] builds the boundary-optimised operator set of interior order
//! 6 or 8; [`periodic`] and [`upwind`] provide the periodic and upwind
//! families.

pub mod builder;
pub mod bundle;
pub mod closure;
pub mod error;
pub mod factory;
pub mod grid;
pub mod inspection;
pub mod io;
pub mod order;
pub mod periodic;
pub mod stencil;
pub mod sweep;
pub mod upwind;

pub use bundle::OperatorBundle;
pub use error::{OperatorError, OperatorResult};
pub use factory::{construct, construct_raw};
pub use order::{Narrowing, Order};

#[cfg(test)]
mod _tests_closure;
#[cfg(test)]
mod _tests_inspection;
#[cfg(test)]
mod _tests_order;
#[cfg(test)]
mod _tests_periodic;
#[cfg(test)]
mod _tests_stencil;
