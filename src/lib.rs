//! Thin and safe wrappers around the OpenCL program and kernel API.
//!
//! Covers program creation (from source or binaries), the synchronous build,
//! per-device build status/options/log queries, kernel creation, argument
//! binding and kernel/work-group introspection.
//!
//! Every function in this crate is a near 1:1 call into the OpenCL runtime
//! resolved through a [`ClApi`] dispatch table. The table is loaded from the
//! vendor library on first use or may be installed explicitly with
//! [`set_api`].
//!
//! ## Handles
//!
//! [`Program`] and [`Kernel`] are reference counted by the runtime. Cloning
//! either calls `clRetain...`, dropping calls `clRelease...`. [`Context`],
//! [`DeviceId`], [`Mem`] and [`Sampler`] are owned elsewhere and are only
//! passed through.
//!
//! ## Errors
//!
//! Every fallible function returns [`Result`]. OpenCL status codes are
//! decoded into [`Status`] (with [`StatusCode::Unrecognized`] for anything
//! outside the known set) and are never retried or masked.
//!
//! [`ClApi`]: ffi/struct.ClApi.html
//! [`set_api`]: fn.set_api.html
//! [`Program`]: struct.Program.html
//! [`Kernel`]: struct.Kernel.html
//! [`Context`]: struct.Context.html
//! [`DeviceId`]: struct.DeviceId.html
//! [`Mem`]: struct.Mem.html
//! [`Sampler`]: struct.Sampler.html
//! [`Result`]: type.Result.html
//! [`Status`]: enum.Status.html
//! [`StatusCode::Unrecognized`]: enum.StatusCode.html

#[macro_use]
extern crate enum_primitive;
#[macro_use]
extern crate bitflags;
pub extern crate cl_sys as ffi;

mod builder;
pub mod error;
mod functions;
mod types;
pub mod util;
#[cfg(test)]
mod tests;

use std::fmt;

use enum_primitive::FromPrimitive;

pub use self::builder::{BuildOpt, ProgramBuilder};
pub use self::error::{Error, Result};
pub use self::functions::*;
pub use self::types::abs::{Context, DeviceId, Kernel, Mem, Program, Sampler};
pub use self::types::enums::{
    EmptyInfoResultError, KernelArg, KernelArgInfoResult, KernelInfoResult,
    KernelWorkGroupInfoResult, ProgramBuildInfoResult, ProgramInfoResult,
};

//=============================================================================
//================================= TRAITS ====================================
//=============================================================================

/// A primitive type usable as a kernel argument value.
///
/// ### Safety
///
/// Implementors must be plain old data: the bytes of a value are handed to
/// `clSetKernelArg` as-is with a size of `mem::size_of::<Self>()`.
pub unsafe trait OclPrm: Copy + Clone + fmt::Debug + PartialEq + Send + Sync + 'static {}

unsafe impl OclPrm for u8 {}
unsafe impl OclPrm for i8 {}
unsafe impl OclPrm for u16 {}
unsafe impl OclPrm for i16 {}
unsafe impl OclPrm for u32 {}
unsafe impl OclPrm for i32 {}
unsafe impl OclPrm for u64 {}
unsafe impl OclPrm for i64 {}
unsafe impl OclPrm for usize {}
unsafe impl OclPrm for isize {}
unsafe impl OclPrm for f32 {}
unsafe impl OclPrm for f64 {}

// Vector types (`float4` == `[f32; 4]`, etc.).
unsafe impl<T: OclPrm, const N: usize> OclPrm for [T; N] {}

//=============================================================================
//================================ BITFIELDS ==================================
//=============================================================================

bitflags! {
    /// cl_program_binary_type
    pub struct ProgramBinaryType: u32 {
        const NONE = ffi::CL_PROGRAM_BINARY_TYPE_NONE;
        const COMPILED_OBJECT = ffi::CL_PROGRAM_BINARY_TYPE_COMPILED_OBJECT;
        const LIBRARY = ffi::CL_PROGRAM_BINARY_TYPE_LIBRARY;
        const EXECUTABLE = ffi::CL_PROGRAM_BINARY_TYPE_EXECUTABLE;
    }
}

bitflags! {
    /// cl_kernel_arg_type_qualifer
    pub struct KernelArgTypeQualifier: u64 {
        const NONE = ffi::CL_KERNEL_ARG_TYPE_NONE;
        const CONST = ffi::CL_KERNEL_ARG_TYPE_CONST;
        const RESTRICT = ffi::CL_KERNEL_ARG_TYPE_RESTRICT;
        const VOLATILE = ffi::CL_KERNEL_ARG_TYPE_VOLATILE;
    }
}

//=============================================================================
//=============================== ENUMERATORS =================================
//=============================================================================

enum_from_primitive! {
    /// The status of an OpenCL API call. Used for returning success/error codes.
    #[repr(C)]
    #[allow(non_camel_case_types)]
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub enum Status {
        CL_SUCCESS = ffi::CL_SUCCESS as isize,
        CL_DEVICE_NOT_FOUND = ffi::CL_DEVICE_NOT_FOUND as isize,
        CL_DEVICE_NOT_AVAILABLE = ffi::CL_DEVICE_NOT_AVAILABLE as isize,
        CL_COMPILER_NOT_AVAILABLE = ffi::CL_COMPILER_NOT_AVAILABLE as isize,
        CL_MEM_OBJECT_ALLOCATION_FAILURE = ffi::CL_MEM_OBJECT_ALLOCATION_FAILURE as isize,
        CL_OUT_OF_RESOURCES = ffi::CL_OUT_OF_RESOURCES as isize,
        CL_OUT_OF_HOST_MEMORY = ffi::CL_OUT_OF_HOST_MEMORY as isize,
        CL_PROFILING_INFO_NOT_AVAILABLE = ffi::CL_PROFILING_INFO_NOT_AVAILABLE as isize,
        CL_MEM_COPY_OVERLAP = ffi::CL_MEM_COPY_OVERLAP as isize,
        CL_IMAGE_FORMAT_MISMATCH = ffi::CL_IMAGE_FORMAT_MISMATCH as isize,
        CL_IMAGE_FORMAT_NOT_SUPPORTED = ffi::CL_IMAGE_FORMAT_NOT_SUPPORTED as isize,
        CL_BUILD_PROGRAM_FAILURE = ffi::CL_BUILD_PROGRAM_FAILURE as isize,
        CL_MAP_FAILURE = ffi::CL_MAP_FAILURE as isize,
        CL_MISALIGNED_SUB_BUFFER_OFFSET = ffi::CL_MISALIGNED_SUB_BUFFER_OFFSET as isize,
        CL_EXEC_STATUS_ERROR_FOR_EVENTS_IN_WAIT_LIST = ffi::CL_EXEC_STATUS_ERROR_FOR_EVENTS_IN_WAIT_LIST as isize,
        CL_COMPILE_PROGRAM_FAILURE = ffi::CL_COMPILE_PROGRAM_FAILURE as isize,
        CL_LINKER_NOT_AVAILABLE = ffi::CL_LINKER_NOT_AVAILABLE as isize,
        CL_LINK_PROGRAM_FAILURE = ffi::CL_LINK_PROGRAM_FAILURE as isize,
        CL_DEVICE_PARTITION_FAILED = ffi::CL_DEVICE_PARTITION_FAILED as isize,
        CL_KERNEL_ARG_INFO_NOT_AVAILABLE = ffi::CL_KERNEL_ARG_INFO_NOT_AVAILABLE as isize,
        CL_INVALID_VALUE = ffi::CL_INVALID_VALUE as isize,
        CL_INVALID_DEVICE_TYPE = ffi::CL_INVALID_DEVICE_TYPE as isize,
        CL_INVALID_PLATFORM = ffi::CL_INVALID_PLATFORM as isize,
        CL_INVALID_DEVICE = ffi::CL_INVALID_DEVICE as isize,
        CL_INVALID_CONTEXT = ffi::CL_INVALID_CONTEXT as isize,
        CL_INVALID_QUEUE_PROPERTIES = ffi::CL_INVALID_QUEUE_PROPERTIES as isize,
        CL_INVALID_COMMAND_QUEUE = ffi::CL_INVALID_COMMAND_QUEUE as isize,
        CL_INVALID_HOST_PTR = ffi::CL_INVALID_HOST_PTR as isize,
        CL_INVALID_MEM_OBJECT = ffi::CL_INVALID_MEM_OBJECT as isize,
        CL_INVALID_IMAGE_FORMAT_DESCRIPTOR = ffi::CL_INVALID_IMAGE_FORMAT_DESCRIPTOR as isize,
        CL_INVALID_IMAGE_SIZE = ffi::CL_INVALID_IMAGE_SIZE as isize,
        CL_INVALID_SAMPLER = ffi::CL_INVALID_SAMPLER as isize,
        CL_INVALID_BINARY = ffi::CL_INVALID_BINARY as isize,
        CL_INVALID_BUILD_OPTIONS = ffi::CL_INVALID_BUILD_OPTIONS as isize,
        CL_INVALID_PROGRAM = ffi::CL_INVALID_PROGRAM as isize,
        CL_INVALID_PROGRAM_EXECUTABLE = ffi::CL_INVALID_PROGRAM_EXECUTABLE as isize,
        CL_INVALID_KERNEL_NAME = ffi::CL_INVALID_KERNEL_NAME as isize,
        CL_INVALID_KERNEL_DEFINITION = ffi::CL_INVALID_KERNEL_DEFINITION as isize,
        CL_INVALID_KERNEL = ffi::CL_INVALID_KERNEL as isize,
        CL_INVALID_ARG_INDEX = ffi::CL_INVALID_ARG_INDEX as isize,
        CL_INVALID_ARG_VALUE = ffi::CL_INVALID_ARG_VALUE as isize,
        CL_INVALID_ARG_SIZE = ffi::CL_INVALID_ARG_SIZE as isize,
        CL_INVALID_KERNEL_ARGS = ffi::CL_INVALID_KERNEL_ARGS as isize,
        CL_INVALID_WORK_DIMENSION = ffi::CL_INVALID_WORK_DIMENSION as isize,
        CL_INVALID_WORK_GROUP_SIZE = ffi::CL_INVALID_WORK_GROUP_SIZE as isize,
        CL_INVALID_WORK_ITEM_SIZE = ffi::CL_INVALID_WORK_ITEM_SIZE as isize,
        CL_INVALID_GLOBAL_OFFSET = ffi::CL_INVALID_GLOBAL_OFFSET as isize,
        CL_INVALID_EVENT_WAIT_LIST = ffi::CL_INVALID_EVENT_WAIT_LIST as isize,
        CL_INVALID_EVENT = ffi::CL_INVALID_EVENT as isize,
        CL_INVALID_OPERATION = ffi::CL_INVALID_OPERATION as isize,
        CL_INVALID_GL_OBJECT = ffi::CL_INVALID_GL_OBJECT as isize,
        CL_INVALID_BUFFER_SIZE = ffi::CL_INVALID_BUFFER_SIZE as isize,
        CL_INVALID_MIP_LEVEL = ffi::CL_INVALID_MIP_LEVEL as isize,
        CL_INVALID_GLOBAL_WORK_SIZE = ffi::CL_INVALID_GLOBAL_WORK_SIZE as isize,
        CL_INVALID_PROPERTY = ffi::CL_INVALID_PROPERTY as isize,
        CL_INVALID_IMAGE_DESCRIPTOR = ffi::CL_INVALID_IMAGE_DESCRIPTOR as isize,
        CL_INVALID_COMPILER_OPTIONS = ffi::CL_INVALID_COMPILER_OPTIONS as isize,
        CL_INVALID_LINKER_OPTIONS = ffi::CL_INVALID_LINKER_OPTIONS as isize,
        CL_INVALID_DEVICE_PARTITION_COUNT = ffi::CL_INVALID_DEVICE_PARTITION_COUNT as isize,
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A status code returned by the runtime, recognized or not.
///
/// Codes outside of the OpenCL 1.2 set (vendor extensions, newer runtimes)
/// are preserved as `Unrecognized` rather than discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Known(Status),
    Unrecognized(i32),
}

impl StatusCode {
    /// Decodes a raw `cl_int` status.
    pub fn from_errcode(errcode: i32) -> StatusCode {
        match Status::from_i32(errcode) {
            Some(status) => StatusCode::Known(status),
            None => StatusCode::Unrecognized(errcode),
        }
    }

    /// Returns the raw `cl_int` value.
    pub fn errcode(&self) -> i32 {
        match *self {
            StatusCode::Known(status) => status as i32,
            StatusCode::Unrecognized(code) => code,
        }
    }

    /// Returns the decoded status if it is recognized.
    pub fn status(&self) -> Option<Status> {
        match *self {
            StatusCode::Known(status) => Some(status),
            StatusCode::Unrecognized(_) => None,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            StatusCode::Known(status) => write!(f, "{:?}", status),
            StatusCode::Unrecognized(code) => write!(f, "unrecognized status ({})", code),
        }
    }
}

enum_from_primitive! {
    /// cl_program_info
    #[repr(C)]
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub enum ProgramInfo {
        ReferenceCount = ffi::CL_PROGRAM_REFERENCE_COUNT as isize,
        Context = ffi::CL_PROGRAM_CONTEXT as isize,
        NumDevices = ffi::CL_PROGRAM_NUM_DEVICES as isize,
        Devices = ffi::CL_PROGRAM_DEVICES as isize,
        Source = ffi::CL_PROGRAM_SOURCE as isize,
        BinarySizes = ffi::CL_PROGRAM_BINARY_SIZES as isize,
        Binaries = ffi::CL_PROGRAM_BINARIES as isize,
        NumKernels = ffi::CL_PROGRAM_NUM_KERNELS as isize,
        KernelNames = ffi::CL_PROGRAM_KERNEL_NAMES as isize,
    }
}

enum_from_primitive! {
    /// cl_program_build_info
    #[repr(C)]
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub enum ProgramBuildInfo {
        BuildStatus = ffi::CL_PROGRAM_BUILD_STATUS as isize,
        BuildOptions = ffi::CL_PROGRAM_BUILD_OPTIONS as isize,
        BuildLog = ffi::CL_PROGRAM_BUILD_LOG as isize,
        BinaryType = ffi::CL_PROGRAM_BINARY_TYPE as isize,
    }
}

enum_from_primitive! {
    /// cl_build_status
    #[repr(C)]
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub enum ProgramBuildStatus {
        Success = ffi::CL_BUILD_SUCCESS as isize,
        None = ffi::CL_BUILD_NONE as isize,
        Error = ffi::CL_BUILD_ERROR as isize,
        InProgress = ffi::CL_BUILD_IN_PROGRESS as isize,
    }
}

enum_from_primitive! {
    /// cl_kernel_info
    #[repr(C)]
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub enum KernelInfo {
        FunctionName = ffi::CL_KERNEL_FUNCTION_NAME as isize,
        NumArgs = ffi::CL_KERNEL_NUM_ARGS as isize,
        ReferenceCount = ffi::CL_KERNEL_REFERENCE_COUNT as isize,
        Context = ffi::CL_KERNEL_CONTEXT as isize,
        Program = ffi::CL_KERNEL_PROGRAM as isize,
        Attributes = ffi::CL_KERNEL_ATTRIBUTES as isize,
    }
}

enum_from_primitive! {
    /// cl_kernel_arg_info
    #[repr(C)]
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub enum KernelArgInfo {
        AddressQualifier = ffi::CL_KERNEL_ARG_ADDRESS_QUALIFIER as isize,
        AccessQualifier = ffi::CL_KERNEL_ARG_ACCESS_QUALIFIER as isize,
        TypeName = ffi::CL_KERNEL_ARG_TYPE_NAME as isize,
        TypeQualifier = ffi::CL_KERNEL_ARG_TYPE_QUALIFIER as isize,
        Name = ffi::CL_KERNEL_ARG_NAME as isize,
    }
}

enum_from_primitive! {
    /// cl_kernel_arg_address_qualifier
    #[repr(C)]
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub enum KernelArgAddressQualifier {
        Global = ffi::CL_KERNEL_ARG_ADDRESS_GLOBAL as isize,
        Local = ffi::CL_KERNEL_ARG_ADDRESS_LOCAL as isize,
        Constant = ffi::CL_KERNEL_ARG_ADDRESS_CONSTANT as isize,
        Private = ffi::CL_KERNEL_ARG_ADDRESS_PRIVATE as isize,
    }
}

enum_from_primitive! {
    /// cl_kernel_arg_access_qualifier
    #[repr(C)]
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub enum KernelArgAccessQualifier {
        ReadOnly = ffi::CL_KERNEL_ARG_ACCESS_READ_ONLY as isize,
        WriteOnly = ffi::CL_KERNEL_ARG_ACCESS_WRITE_ONLY as isize,
        ReadWrite = ffi::CL_KERNEL_ARG_ACCESS_READ_WRITE as isize,
        None = ffi::CL_KERNEL_ARG_ACCESS_NONE as isize,
    }
}

enum_from_primitive! {
    /// cl_kernel_work_group_info
    #[repr(C)]
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub enum KernelWorkGroupInfo {
        WorkGroupSize = ffi::CL_KERNEL_WORK_GROUP_SIZE as isize,
        CompileWorkGroupSize = ffi::CL_KERNEL_COMPILE_WORK_GROUP_SIZE as isize,
        LocalMemSize = ffi::CL_KERNEL_LOCAL_MEM_SIZE as isize,
        PreferredWorkGroupSizeMultiple = ffi::CL_KERNEL_PREFERRED_WORK_GROUP_SIZE_MULTIPLE as isize,
        PrivateMemSize = ffi::CL_KERNEL_PRIVATE_MEM_SIZE as isize,
        GlobalWorkSize = ffi::CL_KERNEL_GLOBAL_WORK_SIZE as isize,
    }
}
