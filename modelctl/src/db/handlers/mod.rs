//! Repository implementations.
//!
//! - [`repository`]: the [`Repository`] trait every entity repository implements
//! - [`modelos`]: [`Modelos`], the modelo repository

pub mod modelos;
pub mod repository;

pub use modelos::Modelos;
pub use repository::Repository;
