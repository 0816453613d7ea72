//! Byte decoding and source text utilities.
//!
//! Info queries hand back raw byte buffers. These functions turn them into
//! the scalars, arrays and strings the result enums expose.

use std::ffi::{CString, NulError};
use std::mem;
use std::ptr;
use std::string::FromUtf8Error;

//=============================================================================
//=========================== UTILITY FUNCTIONS ===============================
//=============================================================================

/// An error caused by a utility function.
#[derive(Debug, thiserror::Error)]
pub enum UtilError {
    #[error(
        "The size of the source byte slice ({src} bytes) does not match \
        the size of the destination type ({dst} bytes)."
    )]
    BytesTo { src: usize, dst: usize },
    #[error(
        "The size of the source byte vector ({src} bytes) does not match \
        the size of the destination type ({dst} bytes)."
    )]
    BytesInto { src: usize, dst: usize },
    #[error(
        "The size of the source byte vector ({src} bytes) is not evenly \
        divisible by the size of the destination type ({dst} bytes)."
    )]
    BytesIntoVec { src: usize, dst: usize },
    #[error(
        "The size of the source byte slice ({src} bytes) is not evenly \
        divisible by the size of the destination type ({dst} bytes)."
    )]
    BytesToVec { src: usize, dst: usize },
    #[error("Unable to convert bytes into string: {0}")]
    BytesIntoString(#[from] FromUtf8Error),
}

/// Copies a slice of bytes to a new value of arbitrary type.
///
/// ### Safety
///
/// Every bit pattern of `bytes` must be a valid `T`.
///
pub unsafe fn bytes_to<T>(bytes: &[u8]) -> Result<T, UtilError> {
    if mem::size_of::<T>() == bytes.len() {
        let mut new_val = mem::MaybeUninit::<T>::uninit();
        ptr::copy_nonoverlapping(bytes.as_ptr(), new_val.as_mut_ptr() as *mut u8, bytes.len());
        Ok(new_val.assume_init())
    } else {
        Err(UtilError::BytesTo {
            src: bytes.len(),
            dst: mem::size_of::<T>(),
        })
    }
}

/// Converts a vector of bytes into a value of arbitrary type.
///
/// ### Safety
///
/// Every bit pattern of `vec` must be a valid `T`.
///
pub unsafe fn bytes_into<T>(vec: Vec<u8>) -> Result<T, UtilError> {
    if mem::size_of::<T>() == vec.len() {
        let mut new_val = mem::MaybeUninit::<T>::uninit();
        ptr::copy_nonoverlapping(vec.as_ptr(), new_val.as_mut_ptr() as *mut u8, vec.len());
        Ok(new_val.assume_init())
    } else {
        Err(UtilError::BytesInto {
            src: vec.len(),
            dst: mem::size_of::<T>(),
        })
    }
}

/// Converts a vector of bytes into a vector of arbitrary type.
///
/// The bytes are copied into a freshly allocated, correctly aligned vector.
///
/// ### Safety
///
/// Every `size_of::<T>()` chunk of `vec` must be a valid `T`.
///
pub unsafe fn bytes_into_vec<T>(vec: Vec<u8>) -> Result<Vec<T>, UtilError> {
    if mem::size_of::<T>() == 0 || vec.len() % mem::size_of::<T>() != 0 {
        return Err(UtilError::BytesIntoVec {
            src: vec.len(),
            dst: mem::size_of::<T>(),
        });
    }

    bytes_to_vec(&vec).map_err(|_| UtilError::BytesIntoVec {
        src: vec.len(),
        dst: mem::size_of::<T>(),
    })
}

/// Copies a slice of bytes into a vector of arbitrary type.
///
/// ### Safety
///
/// Every `size_of::<T>()` chunk of `bytes` must be a valid `T`.
///
pub unsafe fn bytes_to_vec<T>(bytes: &[u8]) -> Result<Vec<T>, UtilError> {
    if mem::size_of::<T>() != 0 && bytes.len() % mem::size_of::<T>() == 0 {
        let new_len = bytes.len() / mem::size_of::<T>();
        let mut new_vec: Vec<T> = Vec::with_capacity(new_len);
        ptr::copy_nonoverlapping(bytes.as_ptr(), new_vec.as_mut_ptr() as *mut u8, bytes.len());
        new_vec.set_len(new_len);
        Ok(new_vec)
    } else {
        Err(UtilError::BytesToVec {
            src: bytes.len(),
            dst: mem::size_of::<T>(),
        })
    }
}

/// Converts a byte Vec into a string, removing the trailing null byte if it
/// exists.
///
/// Whitespace is preserved: build options must echo back byte-for-byte.
pub fn bytes_into_string(mut bytes: Vec<u8>) -> Result<String, UtilError> {
    if bytes.last() == Some(&0u8) {
        bytes.pop();
    }

    String::from_utf8(bytes).map_err(UtilError::BytesIntoString)
}

/// Splits program source into one C string per line.
///
/// Each unit keeps its trailing `'\n'` so that the runtime's concatenation of
/// the units reproduces `src`. Embedded null bytes are stripped.
pub fn source_lines(src: &str) -> Result<Vec<CString>, NulError> {
    src.split_inclusive('\n')
        .map(|line| CString::new(line.replace('\0', "")))
        .collect()
}

/// Splits a semicolon separated name list (`CL_PROGRAM_KERNEL_NAMES`).
pub fn split_name_list(list: &str) -> Vec<String> {
    list.split(';')
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_to_scalar() {
        let bytes = 0x0102_0304u32.to_ne_bytes();
        let val: u32 = unsafe { super::bytes_to(&bytes).unwrap() };
        assert_eq!(val, 0x0102_0304);

        let err = unsafe { super::bytes_to::<u64>(&bytes) };
        match err {
            Err(UtilError::BytesTo { src: 4, dst: 8 }) => (),
            other => panic!("util::tests::bytes_to_scalar(): {:?}", other),
        }
    }

    #[test]
    fn bytes_into_vec_unaligned() {
        let vals: Vec<usize> = vec![3, 1 << 20, 7];
        let bytes: Vec<u8> = vals.iter().flat_map(|v| v.to_ne_bytes().to_vec()).collect();
        let decoded: Vec<usize> = unsafe { super::bytes_into_vec(bytes).unwrap() };
        assert_eq!(decoded, vals);

        let short = vec![0u8; mem::size_of::<usize>() + 1];
        assert!(unsafe { super::bytes_into_vec::<usize>(short) }.is_err());
    }

    #[test]
    fn bytes_into_string_keeps_whitespace() {
        let s = super::bytes_into_string(b" -D FOO=1 \0".to_vec()).unwrap();
        assert_eq!(s, " -D FOO=1 ");

        assert_eq!(super::bytes_into_string(vec![0u8]).unwrap(), "");
        assert_eq!(super::bytes_into_string(Vec::new()).unwrap(), "");
        assert!(super::bytes_into_string(vec![0xff, 0xfe, 0]).is_err());
    }

    #[test]
    fn source_lines_concat() {
        let src = "__kernel void a() {}\n\n__kernel\0 void b() {}";
        let lines = super::source_lines(src).unwrap();
        assert_eq!(lines.len(), 3);

        let joined: String = lines
            .iter()
            .map(|l| l.to_str().unwrap())
            .collect();
        assert_eq!(joined, src.replace('\0', ""));
    }

    #[test]
    fn split_names() {
        assert_eq!(super::split_name_list("duparray;triparray"), vec!["duparray", "triparray"]);
        assert!(super::split_name_list("").is_empty());
    }
}
