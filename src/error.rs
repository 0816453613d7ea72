//! Standard error type for ocl-program.
//!

use crate::ffi::LoadError;
use crate::functions::{ApiError, ApiWrapperError, ProgramBuildError};
use crate::util::UtilError;
use crate::{EmptyInfoResultError, Status};

/// Ocl-program error result type.
pub type Result<T> = ::std::result::Result<T, Error>;

/// An enum one of several error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // FfiNul: Ffi string conversion error:
    #[error("{0}")]
    FfiNul(#[from] ::std::ffi::NulError),
    // Io: std::io error:
    #[error("{0}")]
    Io(#[from] ::std::io::Error),
    // Load: Unable to load the OpenCL library:
    #[error("{0}")]
    Load(#[from] LoadError),
    // EmptyInfoResult:
    #[error("{0}")]
    EmptyInfoResult(EmptyInfoResultError),
    // Util:
    #[error("{0}")]
    Util(UtilError),
    // Api:
    #[error("{0}")]
    Api(ApiError),
    // ProgramBuild:
    #[error("{0}")]
    ProgramBuild(ProgramBuildError),
    // ApiWrapper:
    #[error("{0}")]
    ApiWrapper(ApiWrapperError),
}

impl Error {
    /// Returns the error status code for `Status` variants.
    ///
    /// A failed build carrying its logs reports `CL_BUILD_PROGRAM_FAILURE`.
    pub fn api_status(&self) -> Option<Status> {
        match *self {
            Error::Api(ref err) => err.status(),
            Error::ProgramBuild(ProgramBuildError::BuildLog(_)) => {
                Some(Status::CL_BUILD_PROGRAM_FAILURE)
            }
            _ => None,
        }
    }
}

impl From<UtilError> for Error {
    fn from(err: UtilError) -> Self {
        Error::Util(err)
    }
}

impl From<EmptyInfoResultError> for Error {
    fn from(err: EmptyInfoResultError) -> Self {
        Error::EmptyInfoResult(err)
    }
}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        Error::Api(err)
    }
}

impl From<ProgramBuildError> for Error {
    fn from(err: ProgramBuildError) -> Self {
        Error::ProgramBuild(err)
    }
}

impl From<ApiWrapperError> for Error {
    fn from(err: ApiWrapperError) -> Self {
        Error::ApiWrapper(err)
    }
}
