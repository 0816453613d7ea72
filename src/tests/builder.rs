//! `ProgramBuilder` and status decoding.

use std::fs;

use crate::{
    BuildOpt, Error, ProgramBuildStatus, ProgramBuilder, Status, StatusCode,
};
use crate::functions::ApiWrapperError;
use super::fake_runtime as fake;
use super::{setup, ARRAY_SRC, COND_SRC};

#[test]
fn compiler_options() {
    let mut builder = ProgramBuilder::new();
    builder.cmplr_def("MAX_ITERS", 500)
        .cmplr_opt("-cl-fast-relaxed-math")
        .bo(BuildOpt::CmplrInclDir { path: "/opt/cl".to_string() })
        .bo(BuildOpt::include_def("IGNORED_HERE", "1"));

    assert_eq!(builder.get_compiler_options().unwrap().to_str().unwrap(),
        "-D MAX_ITERS=500 -cl-fast-relaxed-math -I /opt/cl");
}

#[test]
fn source_order() {
    let path = std::env::temp_dir().join(format!("ocl-program-builder-{}.cl", std::process::id()));
    fs::write(&path, "// from file").unwrap();

    let mut builder = ProgramBuilder::new();
    builder.source("// eof one")
        .source_file(&path)
        .bo(BuildOpt::include_def("WIDTH", "64"))
        .source_file(&path)
        .bo(BuildOpt::IncludeRaw("// header\n".to_string()))
        .bo(BuildOpt::IncludeRawEof("// eof two".to_string()));

    let src = builder.get_source();
    let src_strings = builder.get_src_strings();
    fs::remove_file(&path).unwrap();

    assert_eq!(src.unwrap(), "#define WIDTH  64\n// header\n// from file\n// eof one\n// eof two\n");
    assert_eq!(src_strings.unwrap().len(), 5);
}

#[test]
fn missing_source_file() {
    let mut builder = ProgramBuilder::new();
    builder.source_file("/nonexistent/ocl-program/kernel.cl");

    match builder.get_source() {
        Err(Error::Io(_)) => (),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn build_from_source() {
    setup();
    let (context, devices) = fake::create_context(2);

    let program = ProgramBuilder::new()
        .source(COND_SRC)
        .cmplr_def("EXTRA", 1)
        .devices(&devices[1..])
        .build(context)
        .unwrap();

    assert_eq!(program.build_status(devices[0]).unwrap(), ProgramBuildStatus::None);
    assert_eq!(program.build_status(devices[1]).unwrap(), ProgramBuildStatus::Success);
    assert_eq!(program.build_options(devices[1]).unwrap(), "-D EXTRA=1");
    assert_eq!(program.kernel_names().unwrap(), vec!["add", "extra"]);
}

#[test]
fn build_from_binaries() {
    setup();
    let (context, devices) = fake::create_context(1);

    let original = ProgramBuilder::new().source(ARRAY_SRC).build(context).unwrap();
    let binaries = original.binaries().unwrap();
    let bins: Vec<&[u8]> = binaries.iter().map(|b| &b[..]).collect();

    let program = ProgramBuilder::new()
        .binaries(&bins)
        .devices(&devices)
        .build(context)
        .unwrap();

    assert_eq!(program.build_status(devices[0]).unwrap(), ProgramBuildStatus::Success);
    assert!(program.create_kernel("triparray").is_ok());
}

#[test]
fn builder_misuse() {
    setup();
    let (context, devices) = fake::create_context(1);

    match ProgramBuilder::new().cmplr_def("A", 1).build(context) {
        Err(Error::ApiWrapper(ApiWrapperError::ProgramBuilderNoSource)) => (),
        other => panic!("unexpected result: {:?}", other),
    }

    match ProgramBuilder::new().source(ARRAY_SRC).binaries(&[&b"bin"[..]]).devices(&devices)
            .build(context) {
        Err(Error::ApiWrapper(ApiWrapperError::ProgramBuilderSourceAndBinaries)) => (),
        other => panic!("unexpected result: {:?}", other),
    }

    let err = ProgramBuilder::new().source("__kernel void broken( {}").build(context).unwrap_err();
    assert_eq!(err.api_status(), Some(Status::CL_BUILD_PROGRAM_FAILURE));
}

#[test]
fn status_codes() {
    assert_eq!(StatusCode::from_errcode(0), StatusCode::Known(Status::CL_SUCCESS));
    assert_eq!(StatusCode::from_errcode(-46).status(), Some(Status::CL_INVALID_KERNEL_NAME));
    assert_eq!(StatusCode::from_errcode(-46).to_string(), "CL_INVALID_KERNEL_NAME");

    let vendor = StatusCode::from_errcode(-9999);
    assert_eq!(vendor, StatusCode::Unrecognized(-9999));
    assert_eq!(vendor.status(), None);
    assert_eq!(vendor.errcode(), -9999);

    let err = crate::ApiError::new(-9999, "clBuildProgram", None::<String>);
    assert!(err.status().is_none());
    assert!(err.to_string().contains("unrecognized status (-9999)"));
    assert!(err.to_string().contains("clBuildProgram.html#errors"));
}
