//! Program creation, introspection and reference counting.

use std::mem;

use rand::{self, Rng};

use crate::{
    create_program_with_binary, create_program_with_source, get_program_info, release_program,
    retain_program, unload_compiler, ProgramBinaryType, ProgramBuildStatus, ProgramInfo,
    ProgramInfoResult, Status,
};
use super::fake_runtime as fake;
use super::{built_program, opts, setup, ARRAY_SRC};

/// Random printable text spread over a random number of lines. The last line
/// may or may not end with a line break.
fn random_source() -> String {
    let mut rng = rand::thread_rng();
    let mut src = String::new();

    for _ in 0..rng.gen_range(1..40) {
        for _ in 0..rng.gen_range(0..80) {
            src.push(rng.gen_range(b' '..=b'~') as char);
        }
        src.push('\n');
    }

    if rng.gen::<bool>() {
        src.push_str("// no line break");
    }

    src
}

#[test]
fn source_round_trip() {
    setup();
    let (context, _) = fake::create_context(1);

    for _ in 0..20 {
        let src = random_source();
        let program = create_program_with_source(context, &src).unwrap();
        assert_eq!(program.source().unwrap(), src);
    }
}

#[test]
fn source_nulls_are_stripped() {
    setup();
    let (context, _) = fake::create_context(1);

    let program = create_program_with_source(context, "__kernel\0 void\n\0k() {}\n").unwrap();
    assert_eq!(program.source().unwrap(), "__kernel void\nk() {}\n");
}

#[test]
fn create_with_invalid_context() {
    setup();
    let context = unsafe { crate::Context::from_raw(0x10 as *mut _) };

    let err = create_program_with_source(context, ARRAY_SRC).unwrap_err();
    assert_eq!(err.api_status(), Some(Status::CL_INVALID_CONTEXT));
}

#[test]
fn create_with_empty_source() {
    setup();
    let (context, _) = fake::create_context(1);

    let err = create_program_with_source(context, "").unwrap_err();
    assert_eq!(err.api_status(), Some(Status::CL_INVALID_VALUE));
}

#[test]
fn unbuilt_program_state() {
    setup();
    let (context, devices) = fake::create_context(3);
    let program = create_program_with_source(context, ARRAY_SRC).unwrap();

    assert_eq!(program.context().unwrap(), context);
    assert_eq!(program.devices().unwrap(), devices);
    assert_eq!(program.reference_count().unwrap(), 1);

    match program.info(ProgramInfo::NumDevices).unwrap() {
        ProgramInfoResult::NumDevices(n) => assert_eq!(n, 3),
        other => panic!("unexpected result: {:?}", other),
    }

    for &device in &devices {
        assert_eq!(program.build_status(device).unwrap(), ProgramBuildStatus::None);
        assert_eq!(program.build_options(device).unwrap(), "");
        assert_eq!(program.build_log(device).unwrap(), "");
    }

    match program.info(ProgramInfo::BinarySizes).unwrap() {
        ProgramInfoResult::BinarySizes(sizes) => assert_eq!(sizes, vec![0, 0, 0]),
        other => panic!("unexpected result: {:?}", other),
    }

    // No executable yet.
    let err = program.kernel_names().unwrap_err();
    assert_eq!(err.api_status(), Some(Status::CL_INVALID_PROGRAM_EXECUTABLE));
}

#[test]
fn program_info_display() {
    let (_, _, program) = built_program(ARRAY_SRC, 1);

    let names = program.info(ProgramInfo::KernelNames).unwrap();
    assert_eq!(names.to_string(), "duparray;triparray");
    assert_eq!(program.kernel_names().unwrap(), vec!["duparray", "triparray"]);

    match program.info(ProgramInfo::NumKernels).unwrap() {
        ProgramInfoResult::NumKernels(n) => assert_eq!(n, 2),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn retain_release_accounting() {
    setup();
    let (context, _) = fake::create_context(1);
    let program = create_program_with_source(context, ARRAY_SRC).unwrap();
    let ptr = program.as_ptr();

    let clone = program.clone();
    assert_eq!(clone, program);
    assert_eq!(fake::program_ref_count(ptr), Some(2));

    let before = program.reference_count().unwrap();
    unsafe {
        assert!(retain_program(&program));
        assert!(release_program(&program));
        assert!(release_program(&program));
    }
    assert_eq!(program.reference_count().unwrap(), before - 1);

    // `clone`'s reference was released above.
    mem::forget(clone);
    unsafe { assert!(release_program(&program)); }
    assert!(!fake::program_exists(ptr));

    unsafe {
        assert!(!retain_program(&program));
        assert!(!release_program(&program));
    }
    mem::forget(program);
}

#[test]
fn drop_releases() {
    setup();
    let (context, _) = fake::create_context(1);
    let program = create_program_with_source(context, ARRAY_SRC).unwrap();
    let ptr = program.as_ptr();

    let clones: Vec<_> = (0..4).map(|_| program.clone()).collect();
    assert_eq!(fake::program_ref_count(ptr), Some(5));

    drop(clones);
    assert_eq!(fake::program_ref_count(ptr), Some(1));

    drop(program);
    assert!(!fake::program_exists(ptr));
}

#[test]
fn binaries_round_trip() {
    let (context, devices, program) = built_program(ARRAY_SRC, 2);

    let binaries = program.binaries().unwrap();
    assert_eq!(binaries.len(), 2);
    match get_program_info(&program, ProgramInfo::BinarySizes).unwrap() {
        ProgramInfoResult::BinarySizes(sizes) => {
            assert_eq!(sizes, binaries.iter().map(|b| b.len()).collect::<Vec<_>>());
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(binaries.iter().all(|b| !b.is_empty()));

    let bins: Vec<&[u8]> = binaries.iter().map(|b| &b[..]).collect();
    let loaded = create_program_with_binary(context, &devices, &bins).unwrap();

    assert_eq!(loaded.source().unwrap(), "");
    assert_eq!(loaded.binaries().unwrap(), binaries);

    for &device in &devices {
        assert_eq!(loaded.build_status(device).unwrap(), ProgramBuildStatus::None);
        match loaded.build_info(device, crate::ProgramBuildInfo::BinaryType).unwrap() {
            crate::ProgramBuildInfoResult::BinaryType(ty) => assert_eq!(ty, ProgramBinaryType::EXECUTABLE),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    crate::build_program(&loaded, None, &opts("")).unwrap();
    assert_eq!(loaded.kernel_names().unwrap(), vec!["duparray", "triparray"]);
}

#[test]
fn binaries_for_partially_built_program() {
    setup();
    let (context, devices) = fake::create_context(2);
    let program = create_program_with_source(context, ARRAY_SRC).unwrap();
    crate::build_program(&program, Some(&devices[..1]), &opts("")).unwrap();

    match get_program_info(&program, ProgramInfo::BinarySizes).unwrap() {
        ProgramInfoResult::BinarySizes(sizes) => {
            assert!(sizes[0] > 0);
            assert_eq!(sizes[1], 0);
        }
        other => panic!("unexpected result: {:?}", other),
    }

    let binaries = program.binaries().unwrap();
    assert_eq!(binaries.len(), 2);
    assert!(!binaries[0].is_empty());
    assert!(binaries[1].is_empty());

    // The unbuilt device has no binary to load from.
    let err = create_program_with_binary(context, &devices, &[&binaries[0][..], &binaries[1][..]])
        .unwrap_err();
    assert_eq!(err.api_status(), Some(Status::CL_INVALID_VALUE));
}

#[test]
fn binary_argument_validation() {
    setup();
    let (context, devices) = fake::create_context(2);

    let err = create_program_with_binary(context, &[], &[]).unwrap_err();
    assert!(err.api_status().is_none());

    let err = create_program_with_binary(context, &devices, &[&b"x"[..]]).unwrap_err();
    assert!(err.to_string().contains("one binary per device"));

    let err = create_program_with_binary(context, &devices[..1], &[&b"not a binary"[..]]).unwrap_err();
    assert_eq!(err.api_status(), Some(Status::CL_INVALID_BINARY));

    let stray = fake::create_stray_device();
    let err = create_program_with_binary(context, &[stray], &[&b"x"[..]]).unwrap_err();
    assert_eq!(err.api_status(), Some(Status::CL_INVALID_DEVICE));
}

#[test]
fn unload_compiler_is_a_hint() {
    let (_, devices, program) = built_program(ARRAY_SRC, 1);
    let before = fake::unload_count();

    unload_compiler();
    assert!(fake::unload_count() > before);

    // The next build reloads it transparently.
    crate::build_program(&program, Some(&devices), &opts("-D AGAIN")).unwrap();
    assert_eq!(program.build_options(devices[0]).unwrap(), "-D AGAIN");
}
