//! Stored record structures and the request types the repositories accept.
//!
//! - [`modelos`]: modelo records

pub mod modelos;
