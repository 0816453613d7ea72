//! Decoded info query results and the kernel argument option type.
//!
//! Each `*InfoResult::from_bytes` takes the raw buffer filled by the second
//! phase of an info query and turns it into the shape its selector names.
//! Text results may be empty (a program never built for a device has no
//! log); fixed-width results may not.

use std::fmt;

use enum_primitive::FromPrimitive;

use crate::error::{Error as OclError, Result as OclResult};
use crate::ffi::c_void;
use crate::functions::ApiWrapperError;
use crate::util;
use crate::{
    Context, DeviceId, KernelArgAccessQualifier, KernelArgAddressQualifier, KernelArgInfo,
    KernelArgTypeQualifier, KernelInfo, KernelWorkGroupInfo, Mem, OclPrm, Program,
    ProgramBinaryType, ProgramBuildInfo, ProgramBuildStatus, ProgramInfo, Sampler,
};

#[derive(Debug, thiserror::Error)]
pub enum EmptyInfoResultError {
    #[error("Program info unavailable")]
    Program,
    #[error("Program build info unavailable")]
    ProgramBuild,
    #[error("Kernel info unavailable")]
    Kernel,
    #[error("Kernel argument info unavailable")]
    KernelArg,
    #[error("Kernel work-group info unavailable")]
    KernelWorkGroup,
}

/// Kernel argument option type.
///
/// The type argument `T` is ignored for `Mem`, `MemNull`, `Sampler` and
/// `SamplerNull` (just put `u32` or anything).
///
/// The argument size handed to `clSetKernelArg` is always derived from the
/// variant and `T`, never supplied by the caller.
#[derive(Debug)]
pub enum KernelArg<'a, T: 'a + OclPrm> {
    /// Type `T` is ignored.
    Mem(&'a Mem),
    /// Type `T` is ignored.
    MemNull,
    /// Type `T` is ignored.
    Sampler(&'a Sampler),
    /// Type `T` is ignored.
    SamplerNull,
    Scalar(T),
    Vector(T),
    /// Length in multiples of T (not bytes).
    Local(&'a usize),
}

/// Returns an error for a fixed-width result with no bytes.
fn non_empty(result: &[u8], err: EmptyInfoResultError) -> OclResult<()> {
    if result.is_empty() {
        Err(OclError::from(err))
    } else {
        Ok(())
    }
}

fn unrecognized(kind: &'static str, value: i64) -> OclError {
    ApiWrapperError::InfoResultUnrecognized { kind, value }.into()
}

//=============================================================================
//================================= PROGRAM ===================================
//=============================================================================

/// A program info result.
pub enum ProgramInfoResult {
    ReferenceCount(u32),
    Context(Context),
    NumDevices(u32),
    Devices(Vec<DeviceId>),
    Source(String),
    BinarySizes(Vec<usize>),
    Binaries(Vec<Vec<u8>>),
    NumKernels(usize),
    KernelNames(String),
}

impl ProgramInfoResult {
    /// Decodes the bytes returned for `request`.
    ///
    /// `ProgramInfo::Binaries` is a three step query and can not be decoded
    /// from a single buffer. Use `get_program_info` for it.
    pub fn from_bytes(request: ProgramInfo, result: Vec<u8>) -> OclResult<ProgramInfoResult> {
        let ir = match request {
            ProgramInfo::ReferenceCount => {
                non_empty(&result, EmptyInfoResultError::Program)?;
                ProgramInfoResult::ReferenceCount(unsafe { util::bytes_into::<u32>(result)? })
            }
            ProgramInfo::Context => {
                non_empty(&result, EmptyInfoResultError::Program)?;
                let ptr = unsafe { util::bytes_into::<*mut c_void>(result)? };
                ProgramInfoResult::Context(unsafe { Context::from_raw(ptr) })
            }
            ProgramInfo::NumDevices => {
                non_empty(&result, EmptyInfoResultError::Program)?;
                ProgramInfoResult::NumDevices(unsafe { util::bytes_into::<u32>(result)? })
            }
            ProgramInfo::Devices => {
                ProgramInfoResult::Devices(unsafe { util::bytes_to_vec::<DeviceId>(&result)? })
            }
            ProgramInfo::Source => ProgramInfoResult::Source(util::bytes_into_string(result)?),
            ProgramInfo::BinarySizes => {
                ProgramInfoResult::BinarySizes(unsafe { util::bytes_to_vec::<usize>(&result)? })
            }
            ProgramInfo::Binaries => {
                return Err(ApiWrapperError::ProgramInfoBinariesFromBytes.into())
            }
            ProgramInfo::NumKernels => {
                non_empty(&result, EmptyInfoResultError::Program)?;
                ProgramInfoResult::NumKernels(unsafe { util::bytes_into::<usize>(result)? })
            }
            ProgramInfo::KernelNames => {
                ProgramInfoResult::KernelNames(util::bytes_into_string(result)?)
            }
        };
        Ok(ir)
    }
}

impl fmt::Debug for ProgramInfoResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", &self.to_string())
    }
}

impl fmt::Display for ProgramInfoResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ProgramInfoResult::ReferenceCount(ref s) => write!(f, "{}", s),
            ProgramInfoResult::Context(ref s) => write!(f, "{:?}", s),
            ProgramInfoResult::NumDevices(ref s) => write!(f, "{}", s),
            ProgramInfoResult::Devices(ref s) => write!(f, "{:?}", s),
            ProgramInfoResult::Source(ref s) => write!(f, "{}", s),
            ProgramInfoResult::BinarySizes(ref s) => write!(f, "{:?}", s),
            ProgramInfoResult::Binaries(ref b) => {
                let sizes: Vec<usize> = b.iter().map(|bin| bin.len()).collect();
                write!(f, "{{binaries: {:?} bytes}}", sizes)
            }
            ProgramInfoResult::NumKernels(ref s) => write!(f, "{}", s),
            ProgramInfoResult::KernelNames(ref s) => write!(f, "{}", s),
        }
    }
}

impl From<ProgramInfoResult> for String {
    fn from(ir: ProgramInfoResult) -> String {
        ir.to_string()
    }
}

/// A program build info result.
pub enum ProgramBuildInfoResult {
    BuildStatus(ProgramBuildStatus),
    BuildOptions(String),
    BuildLog(String),
    BinaryType(ProgramBinaryType),
}

impl ProgramBuildInfoResult {
    pub fn from_bytes(request: ProgramBuildInfo, result: Vec<u8>) -> OclResult<ProgramBuildInfoResult> {
        let ir = match request {
            ProgramBuildInfo::BuildStatus => {
                non_empty(&result, EmptyInfoResultError::ProgramBuild)?;
                let r = unsafe { util::bytes_into::<i32>(result)? };
                match ProgramBuildStatus::from_i32(r) {
                    Some(b) => ProgramBuildInfoResult::BuildStatus(b),
                    None => return Err(unrecognized("ProgramBuildStatus", r as i64)),
                }
            }
            ProgramBuildInfo::BuildOptions => {
                ProgramBuildInfoResult::BuildOptions(util::bytes_into_string(result)?)
            }
            ProgramBuildInfo::BuildLog => {
                ProgramBuildInfoResult::BuildLog(util::bytes_into_string(result)?)
            }
            ProgramBuildInfo::BinaryType => {
                non_empty(&result, EmptyInfoResultError::ProgramBuild)?;
                let r = unsafe { util::bytes_into::<u32>(result)? };
                match ProgramBinaryType::from_bits(r) {
                    Some(bt) => ProgramBuildInfoResult::BinaryType(bt),
                    None => return Err(unrecognized("ProgramBinaryType", r as i64)),
                }
            }
        };
        Ok(ir)
    }
}

impl fmt::Debug for ProgramBuildInfoResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", &self.to_string())
    }
}

impl fmt::Display for ProgramBuildInfoResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ProgramBuildInfoResult::BuildStatus(ref s) => write!(f, "{:?}", s),
            ProgramBuildInfoResult::BuildOptions(ref s) => write!(f, "{}", s),
            ProgramBuildInfoResult::BuildLog(ref s) => write!(f, "{}", s),
            ProgramBuildInfoResult::BinaryType(ref s) => write!(f, "{:?}", s),
        }
    }
}

impl From<ProgramBuildInfoResult> for String {
    fn from(ir: ProgramBuildInfoResult) -> String {
        ir.to_string()
    }
}

//=============================================================================
//================================== KERNEL ===================================
//=============================================================================

/// A kernel info result.
pub enum KernelInfoResult {
    FunctionName(String),
    NumArgs(u32),
    ReferenceCount(u32),
    Context(Context),
    Program(Program),
    Attributes(String),
}

impl KernelInfoResult {
    /// Decodes the bytes returned for `request`.
    ///
    /// A `Program` result is retained so that the returned handle owns a
    /// reference of its own.
    pub fn from_bytes(request: KernelInfo, result: Vec<u8>) -> OclResult<KernelInfoResult> {
        let ir = match request {
            KernelInfo::FunctionName => {
                KernelInfoResult::FunctionName(util::bytes_into_string(result)?)
            }
            KernelInfo::NumArgs => {
                non_empty(&result, EmptyInfoResultError::Kernel)?;
                KernelInfoResult::NumArgs(unsafe { util::bytes_into::<u32>(result)? })
            }
            KernelInfo::ReferenceCount => {
                non_empty(&result, EmptyInfoResultError::Kernel)?;
                KernelInfoResult::ReferenceCount(unsafe { util::bytes_into::<u32>(result)? })
            }
            KernelInfo::Context => {
                non_empty(&result, EmptyInfoResultError::Kernel)?;
                let ptr = unsafe { util::bytes_into::<*mut c_void>(result)? };
                KernelInfoResult::Context(unsafe { Context::from_raw(ptr) })
            }
            KernelInfo::Program => {
                non_empty(&result, EmptyInfoResultError::Kernel)?;
                let ptr = unsafe { util::bytes_into::<*mut c_void>(result)? };
                KernelInfoResult::Program(unsafe { Program::from_raw_copied_ptr(ptr)? })
            }
            KernelInfo::Attributes => {
                KernelInfoResult::Attributes(util::bytes_into_string(result)?)
            }
        };
        Ok(ir)
    }
}

impl fmt::Debug for KernelInfoResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", &self.to_string())
    }
}

impl fmt::Display for KernelInfoResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            KernelInfoResult::FunctionName(ref s) => write!(f, "{}", s),
            KernelInfoResult::NumArgs(s) => write!(f, "{}", s),
            KernelInfoResult::ReferenceCount(s) => write!(f, "{}", s),
            KernelInfoResult::Context(ref s) => write!(f, "{:?}", s),
            KernelInfoResult::Program(ref s) => write!(f, "{:?}", s),
            KernelInfoResult::Attributes(ref s) => write!(f, "{}", s),
        }
    }
}

impl From<KernelInfoResult> for String {
    fn from(ir: KernelInfoResult) -> String {
        ir.to_string()
    }
}

/// A kernel arg info result.
pub enum KernelArgInfoResult {
    AddressQualifier(KernelArgAddressQualifier),
    AccessQualifier(KernelArgAccessQualifier),
    TypeName(String),
    TypeQualifier(KernelArgTypeQualifier),
    Name(String),
}

impl KernelArgInfoResult {
    pub fn from_bytes(request: KernelArgInfo, result: Vec<u8>) -> OclResult<KernelArgInfoResult> {
        let ir = match request {
            KernelArgInfo::AddressQualifier => {
                non_empty(&result, EmptyInfoResultError::KernelArg)?;
                let r = unsafe { util::bytes_into::<u32>(result)? };
                match KernelArgAddressQualifier::from_u32(r) {
                    Some(q) => KernelArgInfoResult::AddressQualifier(q),
                    None => return Err(unrecognized("KernelArgAddressQualifier", r as i64)),
                }
            }
            KernelArgInfo::AccessQualifier => {
                non_empty(&result, EmptyInfoResultError::KernelArg)?;
                let r = unsafe { util::bytes_into::<u32>(result)? };
                match KernelArgAccessQualifier::from_u32(r) {
                    Some(q) => KernelArgInfoResult::AccessQualifier(q),
                    None => return Err(unrecognized("KernelArgAccessQualifier", r as i64)),
                }
            }
            KernelArgInfo::TypeName => KernelArgInfoResult::TypeName(util::bytes_into_string(result)?),
            KernelArgInfo::TypeQualifier => {
                non_empty(&result, EmptyInfoResultError::KernelArg)?;
                let r = unsafe { util::bytes_into::<u64>(result)? };
                match KernelArgTypeQualifier::from_bits(r) {
                    Some(q) => KernelArgInfoResult::TypeQualifier(q),
                    None => return Err(unrecognized("KernelArgTypeQualifier", r as i64)),
                }
            }
            KernelArgInfo::Name => KernelArgInfoResult::Name(util::bytes_into_string(result)?),
        };
        Ok(ir)
    }
}

impl fmt::Debug for KernelArgInfoResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", &self.to_string())
    }
}

impl fmt::Display for KernelArgInfoResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            KernelArgInfoResult::AddressQualifier(s) => write!(f, "{:?}", s),
            KernelArgInfoResult::AccessQualifier(s) => write!(f, "{:?}", s),
            KernelArgInfoResult::TypeName(ref s) => write!(f, "{}", s),
            KernelArgInfoResult::TypeQualifier(s) => write!(f, "{:?}", s),
            KernelArgInfoResult::Name(ref s) => write!(f, "{}", s),
        }
    }
}

impl From<KernelArgInfoResult> for String {
    fn from(ir: KernelArgInfoResult) -> String {
        ir.to_string()
    }
}

/// A kernel work group info result.
pub enum KernelWorkGroupInfoResult {
    WorkGroupSize(usize),
    CompileWorkGroupSize([usize; 3]),
    LocalMemSize(u64),
    PreferredWorkGroupSizeMultiple(usize),
    PrivateMemSize(u64),
    GlobalWorkSize([usize; 3]),
}

impl KernelWorkGroupInfoResult {
    pub fn from_bytes(request: KernelWorkGroupInfo, result: Vec<u8>)
            -> OclResult<KernelWorkGroupInfoResult> {
        non_empty(&result, EmptyInfoResultError::KernelWorkGroup)?;

        let ir = match request {
            KernelWorkGroupInfo::WorkGroupSize => {
                KernelWorkGroupInfoResult::WorkGroupSize(unsafe { util::bytes_into::<usize>(result)? })
            }
            KernelWorkGroupInfo::CompileWorkGroupSize => {
                KernelWorkGroupInfoResult::CompileWorkGroupSize(
                    unsafe { util::bytes_into::<[usize; 3]>(result)? })
            }
            KernelWorkGroupInfo::LocalMemSize => {
                KernelWorkGroupInfoResult::LocalMemSize(unsafe { util::bytes_into::<u64>(result)? })
            }
            KernelWorkGroupInfo::PreferredWorkGroupSizeMultiple => {
                KernelWorkGroupInfoResult::PreferredWorkGroupSizeMultiple(
                    unsafe { util::bytes_into::<usize>(result)? })
            }
            KernelWorkGroupInfo::PrivateMemSize => {
                KernelWorkGroupInfoResult::PrivateMemSize(unsafe { util::bytes_into::<u64>(result)? })
            }
            KernelWorkGroupInfo::GlobalWorkSize => {
                KernelWorkGroupInfoResult::GlobalWorkSize(
                    unsafe { util::bytes_into::<[usize; 3]>(result)? })
            }
        };
        Ok(ir)
    }
}

impl fmt::Debug for KernelWorkGroupInfoResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", &self.to_string())
    }
}

impl fmt::Display for KernelWorkGroupInfoResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            KernelWorkGroupInfoResult::WorkGroupSize(s) => write!(f, "{}", s),
            KernelWorkGroupInfoResult::CompileWorkGroupSize(s) => write!(f, "{:?}", s),
            KernelWorkGroupInfoResult::LocalMemSize(s) => write!(f, "{}", s),
            KernelWorkGroupInfoResult::PreferredWorkGroupSizeMultiple(s) => write!(f, "{}", s),
            KernelWorkGroupInfoResult::PrivateMemSize(s) => write!(f, "{}", s),
            KernelWorkGroupInfoResult::GlobalWorkSize(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<KernelWorkGroupInfoResult> for String {
    fn from(ir: KernelWorkGroupInfoResult) -> String {
        ir.to_string()
    }
}
