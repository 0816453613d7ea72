//! Thin and safe OpenCL API function wrappers.
//!
//! Every function here forwards to one (or, for info queries, two or three)
//! runtime entry points resolved through the process-wide [`ClApi`] and
//! converts the returned status into a `Result`.
//!
//! [`ClApi`]: ../ffi/struct.ClApi.html
//
// ### Error Handling Notes
//
// All functions use the same error type `ApiError` and error messages include
// a link to the relevant Khronos API reference web page. Status codes are
// never retried, remapped or masked.
//

use std::ffi::CString;
use std::fmt;
use std::mem;
use std::ptr;
use std::sync::OnceLock;

use crate::error::{Error as OclError, Result as OclResult};
use crate::ffi::{
    c_void, cl_device_id, cl_int, cl_kernel, cl_kernel_arg_info, cl_kernel_info,
    cl_kernel_work_group_info, cl_mem, cl_program, cl_program_build_info, cl_program_info,
    cl_sampler, cl_uint, size_t, ClApi,
};
use crate::util;
use crate::{
    Context, DeviceId, Kernel, KernelArg, KernelArgInfo, KernelArgInfoResult, KernelInfo,
    KernelInfoResult, KernelWorkGroupInfo, KernelWorkGroupInfoResult, OclPrm, Program,
    ProgramBuildInfo, ProgramBuildInfoResult, ProgramInfo, ProgramInfoResult, Status, StatusCode,
};

//============================================================================
//============================================================================
//================================ DISPATCH ==================================
//============================================================================
//============================================================================

static API: OnceLock<ClApi> = OnceLock::new();

/// Installs `api` as the dispatch table used by every function in this
/// crate.
///
/// Fails, handing the table back, if a table has already been installed or
/// loaded.
pub fn set_api(api: ClApi) -> Result<(), ClApi> {
    API.set(api)
}

/// Returns the installed dispatch table, loading the vendor OpenCL library
/// on first use if none was installed.
pub fn api() -> OclResult<&'static ClApi> {
    if let Some(api) = API.get() {
        return Ok(api);
    }

    let loaded = ClApi::load()?;

    // Another thread may have won the race. Its table is kept.
    if API.set(loaded).is_err() {
        log::debug!("Dispatch table installed concurrently; discarding loaded copy.");
    }

    API.get().ok_or_else(|| ApiWrapperError::DispatchUnavailable.into())
}

//============================================================================
//============================================================================
//============================ ERROR HANDLING ================================
//============================================================================
//============================================================================

static SDK_DOCS_URL_PRE: &str = "https://www.khronos.org/registry/cl/sdk/1.2/docs/man/xhtml/";
static SDK_DOCS_URL_SUF: &str = ".html#errors";

/// An OpenCL API error.
pub struct ApiError {
    status: StatusCode,
    fn_name: &'static str,
    fn_info: Option<String>,
}

impl ApiError {
    pub fn new<S: Into<String>>(errcode: i32, fn_name: &'static str, fn_info: Option<S>) -> ApiError {
        ApiError {
            status: StatusCode::from_errcode(errcode),
            fn_name,
            fn_info: fn_info.map(|s| s.into()),
        }
    }

    /// Returns the decoded status, `None` for codes outside of the known set.
    pub fn status(&self) -> Option<Status> {
        self.status.status()
    }

    /// Returns the status code, recognized or not.
    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    /// Returns the name of the C function which reported the error.
    pub fn fn_name(&self) -> &'static str {
        self.fn_name
    }
}

impl std::error::Error for ApiError {}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let fn_info_string = match self.fn_info {
            Some(ref fn_info) => format!("(\"{}\")", fn_info),
            None => String::new(),
        };

        write!(f, "OpenCL error executing function: {}{}: {} ({}). \
            More information: {}{}{}",
            self.fn_name, fn_info_string, self.status, self.status.errcode(),
            SDK_DOCS_URL_PRE, self.fn_name, SDK_DOCS_URL_SUF)
    }
}

impl fmt::Debug for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self, f)
    }
}

/// Evaluates `errcode` and returns an `Err` with a failure message if it is
/// not 0 (Status::CL_SUCCESS).
///
#[inline(always)]
fn eval_errcode<T, S>(errcode: cl_int, result: T, fn_name: &'static str, fn_info: Option<S>)
        -> OclResult<T>
        where S: Into<String> {
    if (Status::CL_SUCCESS as i32) == errcode {
        Ok(result)
    } else {
        Err(ApiError::new(errcode, fn_name, fn_info).into())
    }
}

/// An OpenCL program build error.
#[derive(Debug, thiserror::Error)]
pub enum ProgramBuildError {
    #[error("Device list is empty. Aborting build.")]
    DeviceListEmpty,
    #[error("OpenCL program build failed:\n\n{0}")]
    BuildLog(String),
    #[error("{0}")]
    InfoResult(Box<OclError>),
}

/// If the program pointed to by `program` for any of the devices listed in
/// `devices` has a non-blank build log, it will be returned as an error.
///
/// Each log is prefixed with the device it belongs to. Logs are decoded
/// lossily since compilers may echo arbitrary source bytes.
pub fn program_build_err(program: &Program, devices: &[DeviceId]) -> Result<(), ProgramBuildError> {
    if devices.is_empty() {
        return Err(ProgramBuildError::DeviceListEmpty);
    }

    let mut logs = String::new();

    for &device in devices {
        let log = get_program_build_log_raw(program, device)
            .map_err(|err| ProgramBuildError::InfoResult(Box::new(err)))?;

        if !log.trim().is_empty() {
            logs.push_str(&format!("Device {:?}:\n{}\n", device.as_ptr(), log));
        }
    }

    if logs.is_empty() {
        Ok(())
    } else {
        Err(ProgramBuildError::BuildLog(logs))
    }
}

/// An error caused by a wrapper function rather than by the runtime.
#[derive(Debug, thiserror::Error)]
pub enum ApiWrapperError {
    #[error("No OpenCL dispatch table is installed and none could be loaded.")]
    DispatchUnavailable,
    #[error("The OpenCL library does not provide '{0}'.")]
    EntryPointUnavailable(&'static str),
    #[error("Length of 'devices' must be greater than zero.")]
    CreateProgramWithBinaryDevicesLenZero,
    #[error("Device list must be 'None' or non-empty.")]
    BuildProgramDevicesLenZero,
    #[error("Local argument size overflows: {len} elements of {elem_size} bytes.")]
    LocalArgSizeOverflow { len: usize, elem_size: usize },
    #[error("Length of 'devices' must equal the length of 'binaries' \
        (e.g. one binary per device).")]
    CreateProgramWithBinaryDevicesLenMismatch,
    #[error("Unable to build program: no source or binaries have been specified.")]
    ProgramBuilderNoSource,
    #[error("Source may not be used together with binaries.")]
    ProgramBuilderSourceAndBinaries,
    #[error("Program binaries must be queried with 'get_program_info'.")]
    ProgramInfoBinariesFromBytes,
    #[error("Unrecognized {kind} value returned by the runtime: {value}.")]
    InfoResultUnrecognized { kind: &'static str, value: i64 },
    #[error("Unexpected {kind} variant: {variant}.")]
    UnexpectedInfoVariant { kind: &'static str, variant: String },
}

/// Returns an error describing an info result of the wrong variant.
pub(crate) fn unexpected_variant<R: fmt::Debug>(kind: &'static str, result: R) -> OclError {
    ApiWrapperError::UnexpectedInfoVariant {
        kind,
        variant: format!("{:?}", result),
    }.into()
}

//============================================================================
//============================================================================
//=========================== SUPPORT FUNCTIONS ==============================
//============================================================================
//============================================================================

/// Runs the two phase "query size, then query value" protocol shared by
/// every `clGet*Info` function.
///
/// `query` is called with `(param_value_size, param_value,
/// param_value_size_ret)`. The first phase probes with a zero size and a null
/// destination. A zero result size skips the second phase.
fn get_info_raw<F>(fn_name: &'static str, query: F) -> OclResult<Vec<u8>>
        where F: Fn(size_t, *mut c_void, *mut size_t) -> cl_int
{
    let mut result_size: size_t = 0;

    let errcode = query(0, ptr::null_mut(), &mut result_size);
    eval_errcode(errcode, (), fn_name, None::<String>)?;

    log::trace!("{}: result size: {} bytes", fn_name, result_size);

    if result_size == 0 {
        return Ok(Vec::new());
    }

    let mut result: Vec<u8> = vec![0u8; result_size];

    let errcode = query(result_size, result.as_mut_ptr() as *mut c_void, ptr::null_mut());
    eval_errcode(errcode, result, fn_name, None::<String>)
}

/// Maps an optional device list to a length and pointer.
///
/// An empty list is rejected rather than passed on, as the runtime would
/// read it as "every device".
fn resolve_device_ptrs(devices: Option<&[DeviceId]>) -> OclResult<(cl_uint, *const cl_device_id)> {
    match devices {
        Some([]) => Err(ApiWrapperError::BuildProgramDevicesLenZero.into()),
        Some(dvs) => Ok((dvs.len() as cl_uint, dvs.as_ptr() as *const cl_device_id)),
        None => Ok((0, ptr::null())),
    }
}

//============================================================================
//============================================================================
//======================= OPENCL FUNCTION WRAPPERS ===========================
//============================================================================
//============================================================================

//============================================================================
//========================== Program Object APIs =============================
//============================================================================

/// Creates a new program from `src`.
///
/// Each line of `src` (including its line break) becomes one source string.
/// Embedded null bytes are stripped.
pub fn create_program_with_source(context: Context, src: &str) -> OclResult<Program> {
    let src_strings = util::source_lines(src)?;
    create_program_with_source_strings(context, &src_strings)
}

/// Creates a new program from a list of source strings.
pub fn create_program_with_source_strings(context: Context, src_strings: &[CString])
        -> OclResult<Program>
{
    let api = api()?;

    // Lengths (not including \0 terminator) of each string:
    let ks_lens: Vec<usize> = src_strings.iter().map(|cs| cs.as_bytes().len()).collect();

    // Pointers to each string:
    let kern_string_ptrs: Vec<*const _> = src_strings.iter().map(|cs| cs.as_ptr()).collect();

    let mut errcode: cl_int = 0;

    let program_ptr = unsafe { (api.clCreateProgramWithSource)(
        context.as_ptr(),
        kern_string_ptrs.len() as cl_uint,
        kern_string_ptrs.as_ptr(),
        ks_lens.as_ptr(),
        &mut errcode,
    ) };

    let program_ptr = eval_errcode(errcode, program_ptr, "clCreateProgramWithSource", None::<String>)?;
    log::debug!("Created program {:?} from {} source string(s).", program_ptr, src_strings.len());
    Ok(unsafe { Program::from_raw_create_ptr(program_ptr) })
}

/// Creates a program object for a context, and loads one binary per device
/// into it.
///
/// [SDK Docs]: https://www.khronos.org/registry/cl/sdk/1.2/docs/man/xhtml/clCreateProgramWithBinary.html
pub fn create_program_with_binary(context: Context, devices: &[DeviceId], binaries: &[&[u8]])
        -> OclResult<Program>
{
    if devices.is_empty() {
        return Err(ApiWrapperError::CreateProgramWithBinaryDevicesLenZero.into());
    }

    if devices.len() != binaries.len() {
        return Err(ApiWrapperError::CreateProgramWithBinaryDevicesLenMismatch.into());
    }

    let api = api()?;

    let lengths: Vec<usize> = binaries.iter().map(|bin| bin.len()).collect();
    let ptrs: Vec<*const u8> = binaries.iter().map(|bin| bin.as_ptr()).collect();
    let mut binary_status: Vec<cl_int> = vec![0; devices.len()];
    let mut errcode: cl_int = 0;

    let program_ptr = unsafe { (api.clCreateProgramWithBinary)(
        context.as_ptr(),
        devices.len() as cl_uint,
        devices.as_ptr() as *const cl_device_id,
        lengths.as_ptr(),
        ptrs.as_ptr(),
        binary_status.as_mut_ptr(),
        &mut errcode,
    ) };

    let program_ptr = eval_errcode(errcode, program_ptr, "clCreateProgramWithBinary", None::<String>)?;
    let program = unsafe { Program::from_raw_create_ptr(program_ptr) };

    for (i, &status) in binary_status.iter().enumerate() {
        eval_errcode(status, (), "clCreateProgramWithBinary", Some(format!("Device [{}]", i)))?;
    }

    log::debug!("Created program {:?} from {} binary(s).", program_ptr, binaries.len());
    Ok(program)
}

/// Retains `program`, returning the runtime's `clRetainProgram` result as
/// success or failure.
pub(crate) unsafe fn retain_program_raw(program: cl_program) -> OclResult<()> {
    let api = api()?;
    eval_errcode((api.clRetainProgram)(program), (), "clRetainProgram", None::<String>)
}

/// Increments a program reference counter.
///
/// Returns `false` if the handle is invalid.
///
/// ### Safety
///
/// Every retain must be balanced by exactly one release. `Program` already
/// does so on `Clone` and `Drop`.
pub unsafe fn retain_program(program: &Program) -> bool {
    retain_program_raw(program.as_ptr()).is_ok()
}

/// Decrements a program reference counter.
///
/// Returns `false` if the handle is invalid. The runtime destroys the
/// program once the count reaches zero and no kernel refers to it.
///
/// ### Safety
///
/// `program` must not be used after its last reference has been released.
pub unsafe fn release_program(program: &Program) -> bool {
    match api() {
        Ok(api) => (api.clReleaseProgram)(program.as_ptr()) == Status::CL_SUCCESS as i32,
        Err(_) => false,
    }
}

/// Builds a program.
///
/// Blocks until the build is complete for every device. `None` builds for
/// all devices associated with the program. No build callback is ever
/// passed.
///
/// A failed build (`CL_BUILD_PROGRAM_FAILURE`) is returned as
/// `ProgramBuildError::BuildLog` carrying every non-empty device log. When
/// the logs are blank or cannot be read, the plain `ApiError` is returned.
/// `Some(&[])` is rejected.
pub fn build_program(program: &Program, devices: Option<&[DeviceId]>, options: &CString)
        -> OclResult<()>
{
    let api = api()?;
    let (devices_len, devices_ptr) = resolve_device_ptrs(devices)?;

    log::debug!("Building program {:?} for {} device(s) with options: {:?}",
        program.as_ptr(), devices_len, options);

    let errcode = unsafe { (api.clBuildProgram)(
        program.as_ptr(),
        devices_len,
        devices_ptr,
        options.as_ptr(),
        None,
        ptr::null_mut(),
    ) };

    if errcode == Status::CL_BUILD_PROGRAM_FAILURE as i32 {
        let build_err = match devices {
            Some(ds) => program_build_err(program, ds),
            None => program.devices()
                .map_err(|err| ProgramBuildError::InfoResult(Box::new(err)))
                .and_then(|ds| program_build_err(program, &ds)),
        };

        match build_err {
            Err(err @ ProgramBuildError::BuildLog(_)) => return Err(err.into()),
            Err(err) => log::warn!("Unable to collect build logs: {}", err),
            Ok(()) => (),
        }
    }

    eval_errcode(errcode, (), "clBuildProgram", None::<String>)
}

/// Creates and builds a program from source strings.
pub fn create_build_program(context: Context, src_strings: &[CString],
        devices: Option<&[DeviceId]>, cmplr_opts: &CString) -> OclResult<Program>
{
    let program = create_program_with_source_strings(context, src_strings)?;
    build_program(&program, devices, cmplr_opts)?;
    Ok(program)
}

/// Hints that the compiler may be unloaded.
///
/// Any later build reloads it transparently. Does nothing when the runtime
/// does not provide `clUnloadCompiler`.
pub fn unload_compiler() {
    match api() {
        Ok(api) => {
            if let Some(unload) = api.clUnloadCompiler {
                let errcode = unsafe { unload() };
                log::trace!("clUnloadCompiler: {}", StatusCode::from_errcode(errcode));
            }
        }
        Err(err) => log::debug!("clUnloadCompiler: {}", err),
    }
}

fn get_program_info_raw(program: &Program, request: ProgramInfo) -> OclResult<Vec<u8>> {
    let api = api()?;

    get_info_raw("clGetProgramInfo", |size, value, size_ret| unsafe {
        (api.clGetProgramInfo)(program.as_ptr(), request as cl_program_info, size, value, size_ret)
    })
}

/// Returns a `Vec` containing one `Vec<u8>` for each device associated with
/// `program`, in the order of `ProgramInfo::Devices`.
///
/// Queries the sizes, allocates one buffer per device and then has the
/// runtime fill every buffer in a single call.
fn get_program_info_binaries(program: &Program) -> OclResult<Vec<Vec<u8>>> {
    let api = api()?;

    let binary_sizes_raw = get_program_info_raw(program, ProgramInfo::BinarySizes)?;
    let binary_sizes = unsafe { util::bytes_into_vec::<usize>(binary_sizes_raw)? };

    let mut binaries: Vec<Vec<u8>> = binary_sizes.iter().map(|&size| vec![0u8; size]).collect();

    // Devices without a binary get a null entry, which the runtime skips.
    let mut binary_ptrs: Vec<*mut u8> = binaries.iter_mut().map(|bin| {
        if bin.is_empty() { ptr::null_mut() } else { bin.as_mut_ptr() }
    }).collect();

    let errcode = unsafe { (api.clGetProgramInfo)(
        program.as_ptr(),
        ProgramInfo::Binaries as cl_program_info,
        mem::size_of::<*mut u8>() * binary_ptrs.len(),
        binary_ptrs.as_mut_ptr() as *mut c_void,
        ptr::null_mut(),
    ) };

    eval_errcode(errcode, binaries, "clGetProgramInfo", Some("CL_PROGRAM_BINARIES"))
}

/// Get program info.
pub fn get_program_info(program: &Program, request: ProgramInfo) -> OclResult<ProgramInfoResult> {
    match request {
        ProgramInfo::Binaries => get_program_info_binaries(program).map(ProgramInfoResult::Binaries),
        _ => {
            let result = get_program_info_raw(program, request)?;
            ProgramInfoResult::from_bytes(request, result)
        }
    }
}

/// Returns the build log of `device`, replacing invalid UTF-8.
fn get_program_build_log_raw(program: &Program, device: DeviceId) -> OclResult<String> {
    let api = api()?;

    let mut result = get_info_raw("clGetProgramBuildInfo", |size, value, size_ret| unsafe {
        (api.clGetProgramBuildInfo)(program.as_ptr(), device.as_ptr(),
            ProgramBuildInfo::BuildLog as cl_program_build_info, size, value, size_ret)
    })?;

    if result.last() == Some(&0u8) {
        result.pop();
    }

    Ok(String::from_utf8_lossy(&result).into_owned())
}

/// Get program build info.
pub fn get_program_build_info(program: &Program, device: DeviceId, request: ProgramBuildInfo)
        -> OclResult<ProgramBuildInfoResult>
{
    let api = api()?;

    let result = get_info_raw("clGetProgramBuildInfo", |size, value, size_ret| unsafe {
        (api.clGetProgramBuildInfo)(program.as_ptr(), device.as_ptr(),
            request as cl_program_build_info, size, value, size_ret)
    })?;

    ProgramBuildInfoResult::from_bytes(request, result)
}

//============================================================================
//========================== Kernel Object APIs ==============================
//============================================================================

/// Returns a new kernel.
pub fn create_kernel<S: AsRef<str>>(program: &Program, name: S) -> OclResult<Kernel> {
    let api = api()?;
    let c_name = CString::new(name.as_ref().as_bytes())?;
    let mut errcode: cl_int = 0;

    let kernel_ptr = unsafe { (api.clCreateKernel)(program.as_ptr(), c_name.as_ptr(), &mut errcode) };

    let kernel_ptr = eval_errcode(errcode, kernel_ptr, "clCreateKernel", Some(name.as_ref()))?;
    log::debug!("Created kernel '{}' ({:?}).", name.as_ref(), kernel_ptr);
    Ok(unsafe { Kernel::from_raw_create_ptr(kernel_ptr) })
}

/// Creates a kernel for every kernel function in `program`.
///
/// Kernels whose definitions differ between the program's devices are not
/// created by the runtime and are absent from the result.
pub fn create_kernels_in_program(program: &Program) -> OclResult<Vec<Kernel>> {
    let api = api()?;
    let mut num_kernels: cl_uint = 0;

    let errcode = unsafe { (api.clCreateKernelsInProgram)(
        program.as_ptr(), 0, ptr::null_mut(), &mut num_kernels) };
    eval_errcode(errcode, (), "clCreateKernelsInProgram", None::<String>)?;

    if num_kernels == 0 {
        return Ok(Vec::new());
    }

    let mut kernel_ptrs: Vec<cl_kernel> = vec![ptr::null_mut(); num_kernels as usize];
    let mut num_kernels_ret: cl_uint = 0;

    let errcode = unsafe { (api.clCreateKernelsInProgram)(
        program.as_ptr(), num_kernels, kernel_ptrs.as_mut_ptr(), &mut num_kernels_ret) };
    eval_errcode(errcode, (), "clCreateKernelsInProgram", None::<String>)?;

    kernel_ptrs.truncate(num_kernels_ret.min(num_kernels) as usize);
    log::debug!("Created {} kernel(s) in program {:?}.", kernel_ptrs.len(), program.as_ptr());

    Ok(kernel_ptrs.into_iter()
        .map(|ptr| unsafe { Kernel::from_raw_create_ptr(ptr) })
        .collect())
}

pub(crate) unsafe fn retain_kernel_raw(kernel: cl_kernel) -> OclResult<()> {
    let api = api()?;
    eval_errcode((api.clRetainKernel)(kernel), (), "clRetainKernel", None::<String>)
}

/// Increments a kernel reference counter.
///
/// Returns `false` if the handle is invalid.
///
/// ### Safety
///
/// Every retain must be balanced by exactly one release.
pub unsafe fn retain_kernel(kernel: &Kernel) -> bool {
    retain_kernel_raw(kernel.as_ptr()).is_ok()
}

/// Decrements a kernel reference counter.
///
/// Returns `false` if the handle is invalid.
///
/// ### Safety
///
/// `kernel` must not be used after its last reference has been released.
pub unsafe fn release_kernel(kernel: &Kernel) -> bool {
    match api() {
        Ok(api) => (api.clReleaseKernel)(kernel.as_ptr()) == Status::CL_SUCCESS as i32,
        Err(_) => false,
    }
}

/// Sets the argument value for a specific argument of a kernel.
///
/// The size passed to the runtime always comes from the argument's type.
/// Memory objects and samplers are not retained: the caller keeps them alive
/// while the kernel may run.
///
/// [SDK Documentation](https://www.khronos.org/registry/cl/sdk/1.2/docs/man/xhtml/clSetKernelArg.html)
pub fn set_kernel_arg<T: OclPrm>(kernel: &Kernel, arg_index: u32, arg: KernelArg<T>) -> OclResult<()> {
    let api = api()?;

    let (arg_size, arg_value): (size_t, *const c_void) = match arg {
        KernelArg::Mem(mem_ref) => (
            mem::size_of::<cl_mem>(),
            mem_ref as *const _ as *const c_void,
        ),
        KernelArg::MemNull => (mem::size_of::<cl_mem>(), ptr::null()),
        KernelArg::Sampler(smplr_ref) => (
            mem::size_of::<cl_sampler>(),
            smplr_ref as *const _ as *const c_void,
        ),
        KernelArg::SamplerNull => (mem::size_of::<cl_sampler>(), ptr::null()),
        KernelArg::Scalar(ref scalar) => (mem::size_of::<T>(), scalar as *const T as *const c_void),
        KernelArg::Vector(ref vector) => (mem::size_of::<T>(), vector as *const T as *const c_void),
        KernelArg::Local(length) => {
            let elem_size = mem::size_of::<T>();
            let size = elem_size.checked_mul(*length).ok_or(
                ApiWrapperError::LocalArgSizeOverflow { len: *length, elem_size })?;
            (size, ptr::null())
        }
    };

    log::trace!("clSetKernelArg: kernel: {:?}, index: {}, size: {}",
        kernel.as_ptr(), arg_index, arg_size);

    let errcode = unsafe { (api.clSetKernelArg)(kernel.as_ptr(), arg_index, arg_size, arg_value) };

    if errcode != Status::CL_SUCCESS as i32 {
        let name = get_kernel_name(kernel).ok()
            .map(|name| format!("{} [arg {}]", name, arg_index));
        eval_errcode(errcode, (), "clSetKernelArg", name)
    } else {
        Ok(())
    }
}

/// Get kernel info.
pub fn get_kernel_info(kernel: &Kernel, request: KernelInfo) -> OclResult<KernelInfoResult> {
    let api = api()?;

    let result = get_info_raw("clGetKernelInfo", |size, value, size_ret| unsafe {
        (api.clGetKernelInfo)(kernel.as_ptr(), request as cl_kernel_info, size, value, size_ret)
    })?;

    KernelInfoResult::from_bytes(request, result)
}

/// Returns the function name of `kernel`.
pub fn get_kernel_name(kernel: &Kernel) -> OclResult<String> {
    match get_kernel_info(kernel, KernelInfo::FunctionName)? {
        KernelInfoResult::FunctionName(name) => Ok(name),
        other => Err(unexpected_variant("KernelInfoResult", other)),
    }
}

/// Get kernel arg info.
///
/// Requires an OpenCL 1.2 runtime. Argument info is only available for
/// programs built from source.
pub fn get_kernel_arg_info(kernel: &Kernel, arg_index: u32, request: KernelArgInfo)
        -> OclResult<KernelArgInfoResult>
{
    let api = api()?;
    let get_arg_info = api.clGetKernelArgInfo
        .ok_or(ApiWrapperError::EntryPointUnavailable("clGetKernelArgInfo"))?;

    let result = get_info_raw("clGetKernelArgInfo", |size, value, size_ret| unsafe {
        get_arg_info(kernel.as_ptr(), arg_index, request as cl_kernel_arg_info, size, value,
            size_ret)
    })?;

    KernelArgInfoResult::from_bytes(request, result)
}

/// Get kernel work group info.
///
/// Errors (including those some platforms report for
/// `KernelWorkGroupInfo::GlobalWorkSize` on non-builtin kernels) are returned
/// as-is.
pub fn get_kernel_work_group_info(kernel: &Kernel, device: DeviceId, request: KernelWorkGroupInfo)
        -> OclResult<KernelWorkGroupInfoResult>
{
    let api = api()?;

    let result = get_info_raw("clGetKernelWorkGroupInfo", |size, value, size_ret| unsafe {
        (api.clGetKernelWorkGroupInfo)(kernel.as_ptr(), device.as_ptr(),
            request as cl_kernel_work_group_info, size, value, size_ret)
    })?;

    KernelWorkGroupInfoResult::from_bytes(request, result)
}
