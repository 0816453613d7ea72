//! OpenCL program and kernel FFI bindings.
//!
//! Rather than linking against `libOpenCL` at build time, the entry points
//! are collected into a [`ClApi`] dispatch table which is either resolved
//! from the vendor library at runtime or assembled from in-process
//! functions.
//!
//! [`ClApi`]: struct.ClApi.html

pub extern crate libc;

mod cl_h;
mod dispatch;

pub use self::cl_h::*;
pub use self::dispatch::{ClApi, LoadError, LIBRARY_PATH_ENV_VAR};
pub use libc::{c_char, c_void, size_t};
