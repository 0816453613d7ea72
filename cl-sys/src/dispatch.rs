//! Runtime dispatch table for the program and kernel entry points.
//!
//! The table is filled either by resolving symbols from the vendor OpenCL
//! library (`ClApi::load`) or by hand from in-process functions, the way an
//! ICD fills its `cl_icd_dispatch`.

#![allow(non_snake_case)]

use std::env;
use std::fmt;
use std::path::PathBuf;

use libloading::Library;

use crate::cl_h::*;

/// Environment variable overriding the library path used by `ClApi::load`.
pub const LIBRARY_PATH_ENV_VAR: &str = "OCL_LIBRARY_PATH";

#[cfg(target_os = "macos")]
static LIBRARY_NAMES: &[&str] = &["/System/Library/Frameworks/OpenCL.framework/OpenCL"];
#[cfg(target_os = "windows")]
static LIBRARY_NAMES: &[&str] = &["OpenCL.dll"];
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
static LIBRARY_NAMES: &[&str] = &["libOpenCL.so.1", "libOpenCL.so"];

/// An error encountered while loading the OpenCL library.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Unable to load an OpenCL library (tried: {tried:?}): {source}")]
    LibraryNotFound {
        tried: Vec<PathBuf>,
        #[source]
        source: libloading::Error,
    },
    #[error("The OpenCL library does not export '{name}': {source}")]
    MissingSymbol {
        name: &'static str,
        #[source]
        source: libloading::Error,
    },
}

/// Function pointers for every program and kernel entry point.
///
/// Optional fields are entry points which are either deprecated
/// (`clUnloadCompiler`) or only exist on OpenCL 1.2+ libraries.
pub struct ClApi {
    pub clCreateProgramWithSource: clCreateProgramWithSource_fn,
    pub clCreateProgramWithBinary: clCreateProgramWithBinary_fn,
    pub clRetainProgram: clRetainProgram_fn,
    pub clReleaseProgram: clReleaseProgram_fn,
    pub clBuildProgram: clBuildProgram_fn,
    pub clUnloadCompiler: Option<clUnloadCompiler_fn>,
    pub clGetProgramInfo: clGetProgramInfo_fn,
    pub clGetProgramBuildInfo: clGetProgramBuildInfo_fn,
    pub clCreateKernel: clCreateKernel_fn,
    pub clCreateKernelsInProgram: clCreateKernelsInProgram_fn,
    pub clRetainKernel: clRetainKernel_fn,
    pub clReleaseKernel: clReleaseKernel_fn,
    pub clSetKernelArg: clSetKernelArg_fn,
    pub clGetKernelInfo: clGetKernelInfo_fn,
    pub clGetKernelArgInfo: Option<clGetKernelArgInfo_fn>,
    pub clGetKernelWorkGroupInfo: clGetKernelWorkGroupInfo_fn,
    /// Keeps the vendor library mapped for as long as the pointers above are
    /// in use. `None` for tables built from in-process functions.
    pub library: Option<Library>,
}

/// Resolves a required symbol.
macro_rules! required {
    ($lib:expr, $sym:ident: $fn_ty:ty) => {
        *$lib
            .get::<$fn_ty>(concat!(stringify!($sym), "\0").as_bytes())
            .map_err(|source| LoadError::MissingSymbol {
                name: stringify!($sym),
                source,
            })?
    };
}

/// Resolves an optional symbol.
macro_rules! optional {
    ($lib:expr, $sym:ident: $fn_ty:ty) => {
        $lib.get::<$fn_ty>(concat!(stringify!($sym), "\0").as_bytes())
            .ok()
            .map(|sym| *sym)
    };
}

impl ClApi {
    /// Loads the OpenCL library and resolves every entry point.
    ///
    /// The path in `OCL_LIBRARY_PATH` is tried first when set, followed by
    /// the platform's usual library names.
    pub fn load() -> Result<ClApi, LoadError> {
        let mut tried = Vec::with_capacity(4);
        let mut candidates: Vec<PathBuf> = Vec::with_capacity(4);

        if let Some(path) = env::var_os(LIBRARY_PATH_ENV_VAR) {
            candidates.push(PathBuf::from(path));
        }
        candidates.extend(LIBRARY_NAMES.iter().map(PathBuf::from));

        let mut last_err = None;

        for path in candidates {
            match unsafe { Library::new(&path) } {
                Ok(lib) => {
                    log::debug!("Loaded OpenCL library: '{}'", path.display());
                    return unsafe { ClApi::from_library(lib) };
                }
                Err(err) => {
                    log::warn!("Unable to load OpenCL library '{}': {}", path.display(), err);
                    tried.push(path);
                    last_err = Some(err);
                }
            }
        }

        Err(LoadError::LibraryNotFound {
            tried,
            source: last_err.unwrap_or(libloading::Error::DlOpenUnknown),
        })
    }

    /// Resolves every entry point from an already opened library.
    ///
    /// ### Safety
    ///
    /// `lib` must be an OpenCL library whose exported symbols match the
    /// signatures in `cl_h`.
    pub unsafe fn from_library(lib: Library) -> Result<ClApi, LoadError> {
        let api = ClApi {
            clCreateProgramWithSource: required!(lib, clCreateProgramWithSource: clCreateProgramWithSource_fn),
            clCreateProgramWithBinary: required!(lib, clCreateProgramWithBinary: clCreateProgramWithBinary_fn),
            clRetainProgram: required!(lib, clRetainProgram: clRetainProgram_fn),
            clReleaseProgram: required!(lib, clReleaseProgram: clReleaseProgram_fn),
            clBuildProgram: required!(lib, clBuildProgram: clBuildProgram_fn),
            clUnloadCompiler: optional!(lib, clUnloadCompiler: clUnloadCompiler_fn),
            clGetProgramInfo: required!(lib, clGetProgramInfo: clGetProgramInfo_fn),
            clGetProgramBuildInfo: required!(lib, clGetProgramBuildInfo: clGetProgramBuildInfo_fn),
            clCreateKernel: required!(lib, clCreateKernel: clCreateKernel_fn),
            clCreateKernelsInProgram: required!(lib, clCreateKernelsInProgram: clCreateKernelsInProgram_fn),
            clRetainKernel: required!(lib, clRetainKernel: clRetainKernel_fn),
            clReleaseKernel: required!(lib, clReleaseKernel: clReleaseKernel_fn),
            clSetKernelArg: required!(lib, clSetKernelArg: clSetKernelArg_fn),
            clGetKernelInfo: required!(lib, clGetKernelInfo: clGetKernelInfo_fn),
            clGetKernelArgInfo: kernel_arg_info_sym(&lib),
            clGetKernelWorkGroupInfo: required!(lib, clGetKernelWorkGroupInfo: clGetKernelWorkGroupInfo_fn),
            library: None,
        };

        Ok(ClApi { library: Some(lib), ..api })
    }

    /// Returns true if this table was resolved from a dynamically loaded
    /// library.
    pub fn is_loaded_library(&self) -> bool {
        self.library.is_some()
    }
}

#[cfg(feature = "opencl_version_1_2")]
unsafe fn kernel_arg_info_sym(lib: &Library) -> Option<clGetKernelArgInfo_fn> {
    optional!(lib, clGetKernelArgInfo: clGetKernelArgInfo_fn)
}

#[cfg(not(feature = "opencl_version_1_2"))]
unsafe fn kernel_arg_info_sym(_lib: &Library) -> Option<clGetKernelArgInfo_fn> {
    None
}

impl fmt::Debug for ClApi {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ClApi")
            .field("library", &self.library)
            .field("clUnloadCompiler", &self.clUnloadCompiler.is_some())
            .field("clGetKernelArgInfo", &self.clGetKernelArgInfo.is_some())
            .finish()
    }
}
