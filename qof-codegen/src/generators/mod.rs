//! Code generators for qof derives.

mod reflect;

pub use reflect::derive_reflect_impl;
