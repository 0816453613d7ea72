//! The build state machine.

use crate::{
    build_program, create_kernel, create_program_with_source, program_build_err, Error,
    ProgramBuildError, ProgramBuildStatus, Status,
};
use crate::functions::ApiWrapperError;
use super::fake_runtime as fake;
use super::{opts, setup, ARRAY_SRC, COND_SRC};

static BAD_SRC: &str = r#"
    kernel void multiply(global undefined_t* buffer, float coeff) {
        buffer[get_global_id(0)] *= coeff;
    }
"#;

#[test]
fn options_echo_after_build() {
    setup();
    let (context, devices) = fake::create_context(2);
    let program = create_program_with_source(context, COND_SRC).unwrap();
    let options = "-D EXTRA  -cl-mad-enable -I /opt/include";

    build_program(&program, Some(&devices), &opts(options)).unwrap();

    for &device in &devices {
        assert_eq!(program.build_options(device).unwrap(), options);
        assert_eq!(program.build_status(device).unwrap(), ProgramBuildStatus::Success);
        assert_eq!(program.build_log(device).unwrap(), "");
    }
}

#[test]
fn devices_build_independently() {
    setup();
    let (context, devices) = fake::create_context(3);
    let program = create_program_with_source(context, COND_SRC).unwrap();

    build_program(&program, Some(&devices[..1]), &opts("-D EXTRA")).unwrap();
    build_program(&program, Some(&devices[1..2]), &opts("")).unwrap();

    assert_eq!(program.build_options(devices[0]).unwrap(), "-D EXTRA");
    assert_eq!(program.build_options(devices[1]).unwrap(), "");
    assert_eq!(program.build_status(devices[0]).unwrap(), ProgramBuildStatus::Success);
    assert_eq!(program.build_status(devices[1]).unwrap(), ProgramBuildStatus::Success);

    // Never built.
    assert_eq!(program.build_status(devices[2]).unwrap(), ProgramBuildStatus::None);
    assert_eq!(program.build_options(devices[2]).unwrap(), "");
}

#[test]
fn build_failure_carries_logs() {
    setup();
    let (context, devices) = fake::create_context(2);
    let program = create_program_with_source(context, BAD_SRC).unwrap();

    let err = build_program(&program, None, &opts("")).unwrap_err();
    assert_eq!(err.api_status(), Some(Status::CL_BUILD_PROGRAM_FAILURE));

    match err {
        Error::ProgramBuild(ProgramBuildError::BuildLog(ref logs)) => {
            assert_eq!(logs.matches("unknown type name 'undefined_t'").count(), 2);
            for device in &devices {
                assert!(logs.contains(&format!("Device {:?}:", device.as_ptr())));
            }
        }
        ref other => panic!("unexpected error: {:?}", other),
    }

    for &device in &devices {
        assert_eq!(program.build_status(device).unwrap(), ProgramBuildStatus::Error);
        assert!(program.build_log(device).unwrap().contains("undefined_t"));
    }

    let err = create_kernel(&program, "multiply").unwrap_err();
    assert_eq!(err.api_status(), Some(Status::CL_INVALID_PROGRAM_EXECUTABLE));
}

#[test]
fn build_error_reports_only_listed_devices() {
    setup();
    let (context, devices) = fake::create_context(2);
    let program = create_program_with_source(context, BAD_SRC).unwrap();

    assert!(build_program(&program, Some(&devices[1..]), &opts("")).is_err());
    assert_eq!(program.build_status(devices[0]).unwrap(), ProgramBuildStatus::None);

    assert!(program_build_err(&program, &devices[..1]).is_ok());
    match program_build_err(&program, &devices) {
        Err(ProgramBuildError::BuildLog(logs)) => assert!(logs.contains("undefined_t")),
        other => panic!("unexpected result: {:?}", other),
    }
    match program_build_err(&program, &[]) {
        Err(ProgramBuildError::DeviceListEmpty) => (),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn rebuild_after_failure() {
    setup();
    let (context, devices) = fake::create_context(1);
    let src = "#ifndef FIXED\n#error not fixed\n#endif\n__kernel void k() {}\n";
    let program = create_program_with_source(context, src).unwrap();

    assert!(build_program(&program, None, &opts("")).is_err());
    assert_eq!(program.build_log(devices[0]).unwrap(), "error: not fixed");

    build_program(&program, None, &opts("-D FIXED")).unwrap();
    assert_eq!(program.build_status(devices[0]).unwrap(), ProgramBuildStatus::Success);
    assert_eq!(program.build_log(devices[0]).unwrap(), "");
    assert!(create_kernel(&program, "k").is_ok());
}

#[test]
fn attached_kernels_block_rebuild() {
    setup();
    let (context, devices) = fake::create_context(1);
    let program = create_program_with_source(context, ARRAY_SRC).unwrap();
    build_program(&program, None, &opts("")).unwrap();

    let kernel = create_kernel(&program, "duparray").unwrap();
    let err = build_program(&program, None, &opts("")).unwrap_err();
    assert_eq!(err.api_status(), Some(Status::CL_INVALID_OPERATION));

    drop(kernel);
    build_program(&program, Some(&devices), &opts("-w")).unwrap();
    assert_eq!(program.build_options(devices[0]).unwrap(), "-w");
}

#[test]
fn build_failure_with_non_utf8_log() {
    setup();
    let (context, devices) = fake::create_context(2);
    fake::set_log_banner(devices[1], b"vendor \xff\xfe note\n");
    let program = create_program_with_source(context, BAD_SRC).unwrap();

    let err = build_program(&program, None, &opts("")).unwrap_err();
    assert_eq!(err.api_status(), Some(Status::CL_BUILD_PROGRAM_FAILURE));

    match err {
        Error::ProgramBuild(ProgramBuildError::BuildLog(ref logs)) => {
            assert!(logs.contains("vendor \u{fffd}\u{fffd} note"));
            assert_eq!(logs.matches("unknown type name 'undefined_t'").count(), 2);
        }
        ref other => panic!("unexpected error: {:?}", other),
    }

    // The typed query stays strict.
    assert!(program.build_log(devices[0]).is_ok());
    assert!(program.build_log(devices[1]).is_err());
}

#[test]
fn empty_device_list_is_rejected() {
    setup();
    let (context, devices) = fake::create_context(1);
    let program = create_program_with_source(context, BAD_SRC).unwrap();

    match build_program(&program, Some(&[]), &opts("")) {
        Err(Error::ApiWrapper(ApiWrapperError::BuildProgramDevicesLenZero)) => (),
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(program.build_status(devices[0]).unwrap(), ProgramBuildStatus::None);
}

#[test]
fn build_argument_errors() {
    setup();
    let (context, _) = fake::create_context(1);
    let program = create_program_with_source(context, ARRAY_SRC).unwrap();

    let err = build_program(&program, None, &opts("--not-an-option")).unwrap_err();
    assert_eq!(err.api_status(), Some(Status::CL_INVALID_BUILD_OPTIONS));

    let stray = fake::create_stray_device();
    let err = build_program(&program, Some(&[stray]), &opts("")).unwrap_err();
    assert_eq!(err.api_status(), Some(Status::CL_INVALID_DEVICE));

    let err = program.build_status(stray).unwrap_err();
    assert_eq!(err.api_status(), Some(Status::CL_INVALID_DEVICE));
}
