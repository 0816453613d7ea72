//! These tests run against an in-process fake runtime (see `fake_runtime`)
//! installed as the dispatch table, so no OpenCL driver is needed.
//!
//! Every test calls `setup()` before touching the API.

mod build;
mod builder;
mod program;

use std::ffi::CString;

use crate::{Context, DeviceId, Program};
use self::fake_runtime as fake;

/// Two single-line kernels.
pub static ARRAY_SRC: &str = "__kernel void duparray(__global float* buffer) { buffer[get_global_id(0)] *= 2.0f; }\n\
    __kernel void triparray(__global float* buffer) { buffer[get_global_id(0)] *= 3.0f; }\n";

/// A kernel which only exists when `EXTRA` is defined.
pub static COND_SRC: &str = r#"
    __kernel void add(__global float* buffer, float addend) {
        buffer[get_global_id(0)] += addend;
    }

#ifdef EXTRA
    __kernel void extra(__global float* buffer) {
        buffer[get_global_id(0)] = 0.0f;
    }
#endif
"#;

/// Installs the fake runtime. Safe to call from every test.
pub fn setup() {
    fake::install();
}

pub fn opts(options: &str) -> CString {
    CString::new(options).unwrap()
}

/// Returns a context, its devices and a program built from `src` for every
/// device.
pub fn built_program(src: &str, num_devices: usize) -> (Context, Vec<DeviceId>, Program) {
    setup();
    let (context, devices) = fake::create_context(num_devices);
    let src_strings = crate::util::source_lines(src).unwrap();
    let program = crate::create_build_program(context, &src_strings, None, &opts("")).unwrap();
    (context, devices, program)
}
