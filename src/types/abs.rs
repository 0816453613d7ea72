//! Abstract data type wrappers.
//!
//! `Program` and `Kernel` hold one runtime reference each: cloning retains,
//! dropping releases. The runtime decides when the object is actually
//! destroyed (a program outlives its last release while kernels still refer
//! to it).
//!
//! `Context`, `DeviceId`, `Mem` and `Sampler` are owned by other parts of an
//! application and are only passed through to the runtime. They are plain
//! copies of the pointer and never retain or release.
//!
//! [SDK]: https://www.khronos.org/registry/cl/sdk/1.2/docs/man/xhtml/abstractDataTypes.html

use std::fmt;

use crate::error::Result as OclResult;
use crate::ffi::{cl_context, cl_device_id, cl_kernel, cl_mem, cl_program, cl_sampler};
use crate::functions;
use crate::util;
use crate::{
    KernelArg, KernelArgInfo, KernelArgInfoResult, KernelInfo, KernelInfoResult,
    KernelWorkGroupInfo, KernelWorkGroupInfoResult, OclPrm, ProgramBuildInfo,
    ProgramBuildInfoResult, ProgramBuildStatus, ProgramInfo, ProgramInfoResult,
};

//=============================================================================
//=========================== COLLABORATOR HANDLES ============================
//=============================================================================

/// cl_context
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Context(cl_context);

impl Context {
    /// Wraps a context pointer without retaining it.
    pub unsafe fn from_raw(ptr: cl_context) -> Context {
        Context(ptr)
    }

    /// Returns a pointer, do not store it.
    #[inline(always)]
    pub fn as_ptr(&self) -> cl_context {
        self.0
    }
}

unsafe impl Sync for Context {}
unsafe impl Send for Context {}

/// cl_device_id
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DeviceId(cl_device_id);

impl DeviceId {
    /// Creates a new `DeviceId` wrapper from a raw pointer.
    pub unsafe fn from_raw(ptr: cl_device_id) -> DeviceId {
        DeviceId(ptr)
    }

    /// Returns a pointer.
    #[inline(always)]
    pub fn as_ptr(&self) -> cl_device_id {
        self.0
    }
}

unsafe impl Sync for DeviceId {}
unsafe impl Send for DeviceId {}

/// cl_mem
///
/// Passed to `clSetKernelArg` by address. The caller keeps the memory
/// object alive for as long as any kernel using it may run.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Mem(cl_mem);

impl Mem {
    pub unsafe fn from_raw(ptr: cl_mem) -> Mem {
        Mem(ptr)
    }

    #[inline(always)]
    pub fn as_ptr(&self) -> cl_mem {
        self.0
    }
}

unsafe impl Sync for Mem {}
unsafe impl Send for Mem {}

/// cl_sampler
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Sampler(cl_sampler);

impl Sampler {
    pub unsafe fn from_raw(ptr: cl_sampler) -> Sampler {
        Sampler(ptr)
    }

    #[inline(always)]
    pub fn as_ptr(&self) -> cl_sampler {
        self.0
    }
}

unsafe impl Sync for Sampler {}
unsafe impl Send for Sampler {}

//=============================================================================
//================================== PROGRAM ==================================
//=============================================================================

/// cl_program
pub struct Program(cl_program);

impl Program {
    /// Only call this when passing **the original** newly created pointer
    /// directly from `clCreate...`. Do not use this to clone or copy.
    pub unsafe fn from_raw_create_ptr(ptr: cl_program) -> Program {
        Program(ptr)
    }

    /// Only call this when passing a copied pointer such as from an
    /// `clGet*****Info` function. The program is retained.
    pub unsafe fn from_raw_copied_ptr(ptr: cl_program) -> OclResult<Program> {
        functions::retain_program_raw(ptr)?;
        Ok(Program(ptr))
    }

    /// Returns a pointer, do not store it.
    #[inline(always)]
    pub fn as_ptr(&self) -> cl_program {
        self.0
    }

    /// Returns info about this program.
    pub fn info(&self, request: ProgramInfo) -> OclResult<ProgramInfoResult> {
        functions::get_program_info(self, request)
    }

    /// Returns build info about this program for `device`.
    pub fn build_info(&self, device: DeviceId, request: ProgramBuildInfo)
            -> OclResult<ProgramBuildInfoResult> {
        functions::get_program_build_info(self, device, request)
    }

    /// Returns the current runtime reference count.
    pub fn reference_count(&self) -> OclResult<u32> {
        match self.info(ProgramInfo::ReferenceCount)? {
            ProgramInfoResult::ReferenceCount(c) => Ok(c),
            other => Err(functions::unexpected_variant("ProgramInfoResult", other)),
        }
    }

    /// Returns the context this program was created in.
    pub fn context(&self) -> OclResult<Context> {
        match self.info(ProgramInfo::Context)? {
            ProgramInfoResult::Context(c) => Ok(c),
            other => Err(functions::unexpected_variant("ProgramInfoResult", other)),
        }
    }

    /// Returns the devices associated with this program.
    pub fn devices(&self) -> OclResult<Vec<DeviceId>> {
        match self.info(ProgramInfo::Devices)? {
            ProgramInfoResult::Devices(d) => Ok(d),
            other => Err(functions::unexpected_variant("ProgramInfoResult", other)),
        }
    }

    /// Returns the source text as concatenated by the runtime.
    pub fn source(&self) -> OclResult<String> {
        match self.info(ProgramInfo::Source)? {
            ProgramInfoResult::Source(s) => Ok(s),
            other => Err(functions::unexpected_variant("ProgramInfoResult", other)),
        }
    }

    /// Returns one binary per associated device, in device order.
    pub fn binaries(&self) -> OclResult<Vec<Vec<u8>>> {
        match self.info(ProgramInfo::Binaries)? {
            ProgramInfoResult::Binaries(b) => Ok(b),
            other => Err(functions::unexpected_variant("ProgramInfoResult", other)),
        }
    }

    /// Returns the names of the kernels in this (built) program.
    pub fn kernel_names(&self) -> OclResult<Vec<String>> {
        match self.info(ProgramInfo::KernelNames)? {
            ProgramInfoResult::KernelNames(n) => Ok(util::split_name_list(&n)),
            other => Err(functions::unexpected_variant("ProgramInfoResult", other)),
        }
    }

    pub fn build_status(&self, device: DeviceId) -> OclResult<ProgramBuildStatus> {
        match self.build_info(device, ProgramBuildInfo::BuildStatus)? {
            ProgramBuildInfoResult::BuildStatus(s) => Ok(s),
            other => Err(functions::unexpected_variant("ProgramBuildInfoResult", other)),
        }
    }

    pub fn build_options(&self, device: DeviceId) -> OclResult<String> {
        match self.build_info(device, ProgramBuildInfo::BuildOptions)? {
            ProgramBuildInfoResult::BuildOptions(s) => Ok(s),
            other => Err(functions::unexpected_variant("ProgramBuildInfoResult", other)),
        }
    }

    pub fn build_log(&self, device: DeviceId) -> OclResult<String> {
        match self.build_info(device, ProgramBuildInfo::BuildLog)? {
            ProgramBuildInfoResult::BuildLog(s) => Ok(s),
            other => Err(functions::unexpected_variant("ProgramBuildInfoResult", other)),
        }
    }

    /// Creates a kernel for the entry point `name`.
    pub fn create_kernel<S: AsRef<str>>(&self, name: S) -> OclResult<Kernel> {
        functions::create_kernel(self, name)
    }
}

impl Clone for Program {
    fn clone(&self) -> Program {
        if let Err(err) = unsafe { functions::retain_program_raw(self.0) } {
            log::warn!("Unable to retain program {:?}: {}", self.0, err);
        }
        Program(self.0)
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        if !unsafe { functions::release_program(self) } {
            log::warn!("Unable to release program {:?}", self.0);
        }
    }
}

impl PartialEq for Program {
    fn eq(&self, other: &Program) -> bool {
        self.0 == other.0
    }
}

impl Eq for Program {}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Program").field(&self.0).finish()
    }
}

unsafe impl Sync for Program {}
unsafe impl Send for Program {}

//=============================================================================
//================================== KERNEL ===================================
//=============================================================================

/// cl_kernel
///
/// ### Thread Safety
///
/// `Send` but not `Sync`: setting arguments from several threads at once is
/// not safe on any platform.
pub struct Kernel(cl_kernel);

impl Kernel {
    /// Only call this when passing **the original** newly created pointer
    /// directly from `clCreate...`. Do not use this to clone or copy.
    pub unsafe fn from_raw_create_ptr(ptr: cl_kernel) -> Kernel {
        Kernel(ptr)
    }

    /// Returns a pointer, do not store it.
    #[inline(always)]
    pub fn as_ptr(&self) -> cl_kernel {
        self.0
    }

    pub fn info(&self, request: KernelInfo) -> OclResult<KernelInfoResult> {
        functions::get_kernel_info(self, request)
    }

    pub fn arg_info(&self, arg_index: u32, request: KernelArgInfo) -> OclResult<KernelArgInfoResult> {
        functions::get_kernel_arg_info(self, arg_index, request)
    }

    pub fn wg_info(&self, device: DeviceId, request: KernelWorkGroupInfo)
            -> OclResult<KernelWorkGroupInfoResult> {
        functions::get_kernel_work_group_info(self, device, request)
    }

    /// Sets the argument at `arg_index`.
    pub fn set_arg<T: OclPrm>(&self, arg_index: u32, arg: KernelArg<T>) -> OclResult<()> {
        functions::set_kernel_arg(self, arg_index, arg)
    }

    pub fn function_name(&self) -> OclResult<String> {
        functions::get_kernel_name(self)
    }

    pub fn num_args(&self) -> OclResult<u32> {
        match self.info(KernelInfo::NumArgs)? {
            KernelInfoResult::NumArgs(n) => Ok(n),
            other => Err(functions::unexpected_variant("KernelInfoResult", other)),
        }
    }

    pub fn reference_count(&self) -> OclResult<u32> {
        match self.info(KernelInfo::ReferenceCount)? {
            KernelInfoResult::ReferenceCount(c) => Ok(c),
            other => Err(functions::unexpected_variant("KernelInfoResult", other)),
        }
    }

    pub fn context(&self) -> OclResult<Context> {
        match self.info(KernelInfo::Context)? {
            KernelInfoResult::Context(c) => Ok(c),
            other => Err(functions::unexpected_variant("KernelInfoResult", other)),
        }
    }

    /// Returns the program associated with this kernel.
    pub fn program(&self) -> OclResult<Program> {
        match self.info(KernelInfo::Program)? {
            KernelInfoResult::Program(p) => Ok(p),
            other => Err(functions::unexpected_variant("KernelInfoResult", other)),
        }
    }

    pub fn work_group_size(&self, device: DeviceId) -> OclResult<usize> {
        match self.wg_info(device, KernelWorkGroupInfo::WorkGroupSize)? {
            KernelWorkGroupInfoResult::WorkGroupSize(s) => Ok(s),
            other => Err(functions::unexpected_variant("KernelWorkGroupInfoResult", other)),
        }
    }

    /// Returns the `reqd_work_group_size` attribute, `[0, 0, 0]` when unset.
    pub fn compile_work_group_size(&self, device: DeviceId) -> OclResult<[usize; 3]> {
        match self.wg_info(device, KernelWorkGroupInfo::CompileWorkGroupSize)? {
            KernelWorkGroupInfoResult::CompileWorkGroupSize(s) => Ok(s),
            other => Err(functions::unexpected_variant("KernelWorkGroupInfoResult", other)),
        }
    }

    pub fn local_mem_size(&self, device: DeviceId) -> OclResult<u64> {
        match self.wg_info(device, KernelWorkGroupInfo::LocalMemSize)? {
            KernelWorkGroupInfoResult::LocalMemSize(s) => Ok(s),
            other => Err(functions::unexpected_variant("KernelWorkGroupInfoResult", other)),
        }
    }
}

impl Clone for Kernel {
    fn clone(&self) -> Kernel {
        if let Err(err) = unsafe { functions::retain_kernel_raw(self.0) } {
            log::warn!("Unable to retain kernel {:?}: {}", self.0, err);
        }
        Kernel(self.0)
    }
}

impl Drop for Kernel {
    fn drop(&mut self) {
        if !unsafe { functions::release_kernel(self) } {
            log::warn!("Unable to release kernel {:?}", self.0);
        }
    }
}

impl PartialEq for Kernel {
    fn eq(&self, other: &Kernel) -> bool {
        self.0 == other.0
    }
}

impl Eq for Kernel {}

impl fmt::Debug for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Kernel").field(&self.0).finish()
    }
}

unsafe impl Send for Kernel {}
