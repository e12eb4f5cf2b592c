//! Type definitions for smeter

mod error;
mod record;

pub use error::*;
pub use record::*;
