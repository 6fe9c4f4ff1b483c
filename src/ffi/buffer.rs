//! Null-terminated native buffer implementation.

use crate::{error::BadArg, ffi::string::HostString, sys};
use std::{
    ffi::CStr,
    fmt::{self, Debug, Formatter},
    mem::ManuallyDrop,
    os::raw::c_char,
    ptr::{self, NonNull},
    slice,
};

/// A null-terminated byte buffer allocated with the compiler's allocator.
///
/// The buffer holds `len` content bytes followed by a single NUL terminator,
/// so its allocation is exactly `len + 1` bytes. The content never contains a
/// NUL byte.
pub struct NativeBuffer {
    ptr: NonNull<c_char>,
    len: usize,
}

impl NativeBuffer {
    /// Copies `bytes` into a new native buffer and appends the terminator.
    pub fn new(bytes: &[u8]) -> Result<Self, BadArg> {
        if let Some(index) = bytes.iter().position(|b| *b == 0) {
            return Err(BadArg::InteriorNul(index));
        }

        let size = bytes.len().checked_add(1).ok_or(BadArg::Alloc(usize::MAX))?;
        let ptr = unsafe { sys::sass_alloc_memory(size) }.cast::<c_char>();
        let ptr = NonNull::new(ptr).ok_or(BadArg::Alloc(size))?;

        // SAFETY: The allocation is `size` bytes long, which leaves exactly
        // one byte past the copied content for the terminator.
        unsafe {
            ptr::copy_nonoverlapping(bytes.as_ptr(), ptr.as_ptr().cast::<u8>(), bytes.len());
            ptr.as_ptr().add(bytes.len()).write(0);
        }

        Ok(Self {
            ptr,
            len: bytes.len(),
        })
    }

    /// Marshals a host character sequence into a new native buffer as UTF-8.
    pub fn from_host(value: &(impl HostString + ?Sized)) -> Result<Self, BadArg> {
        let string = super::string::to_utf8(value)?;
        Self::new(string.as_bytes())
    }

    /// Returns the number of content bytes, excluding the terminator.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the buffer holds no content bytes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the content bytes, excluding the terminator.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: `ptr` points to `len` initialized content bytes.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr().cast(), self.len) }
    }

    /// Returns the buffer as a C string.
    pub fn as_c_str(&self) -> &CStr {
        // SAFETY: The content has no NUL bytes and is followed by exactly one.
        unsafe {
            CStr::from_bytes_with_nul_unchecked(slice::from_raw_parts(
                self.ptr.as_ptr().cast(),
                self.len + 1,
            ))
        }
    }

    /// Returns a raw pointer to the start of the buffer.
    pub fn as_ptr(&self) -> *mut c_char {
        self.ptr.as_ptr()
    }

    /// Gives up ownership of the buffer without freeing it.
    ///
    /// The caller becomes responsible for releasing the memory through the
    /// compiler, typically by handing it to a context that frees it on delete.
    pub fn into_raw(self) -> *mut c_char {
        ManuallyDrop::new(self).ptr.as_ptr()
    }
}

impl Drop for NativeBuffer {
    fn drop(&mut self) {
        unsafe { sys::sass_free_memory(self.ptr.as_ptr().cast()) }
    }
}

impl Debug for NativeBuffer {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Debug::fmt(self.as_c_str(), f)
    }
}
