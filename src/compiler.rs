//! Compile context management on top of the libsass context API.
//!
//! Both entry points share one protocol: build a context for the [`Source`],
//! apply the fixed [`Options`], compile, extract the [`Outcome`] and release
//! the context. Release happens in `Context`'s `Drop`, so it runs on every
//! path once a context exists.

use crate::{error::InvokeError, ffi::buffer::NativeBuffer, sys};
use std::{
    env,
    ffi::{CStr, CString},
    io,
    os::raw::{c_char, c_int},
    path::{Path, PathBuf},
    ptr::NonNull,
};

/// Diagnostic used when compilation failed without an error message.
pub const NO_ERROR_MESSAGE: &str = "An error occured; no error message available.";

/// Diagnostic used when compilation succeeded without producing output.
pub const NO_OUTPUT: &str = "Unknown internal error.";

/// CSS output formatting styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputStyle {
    Nested,
    Expanded,
    Compact,
    Compressed,
}

impl OutputStyle {
    fn to_raw(self) -> sys::Sass_Output_Style {
        match self {
            OutputStyle::Nested => sys::SASS_STYLE_NESTED,
            OutputStyle::Expanded => sys::SASS_STYLE_EXPANDED,
            OutputStyle::Compact => sys::SASS_STYLE_COMPACT,
            OutputStyle::Compressed => sys::SASS_STYLE_COMPRESSED,
        }
    }
}

/// Compiler options applied to every context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    pub style: OutputStyle,
    /// Number of decimal digits kept in numeric output.
    pub precision: u8,
}

impl Options {
    /// The policy shared by both entry points.
    pub const FIXED: Options = Options {
        style: OutputStyle::Nested,
        precision: 5,
    };
}

/// What to compile.
#[derive(Debug)]
pub enum Source {
    /// Stylesheet source text.
    Inline(NativeBuffer),
    /// Path to a stylesheet, relative to the working directory.
    File(NativeBuffer),
}

/// The result of a single compilation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Compiled CSS.
    Css(Vec<u8>),
    /// A human readable diagnostic.
    Error(Vec<u8>),
}

enum Handle {
    Data(NonNull<sys::Sass_Data_Context>),
    File(NonNull<sys::Sass_File_Context>),
}

/// An owned libsass compile context. Deleted with the matching destructor
/// when dropped.
pub struct Context {
    handle: Handle,
}

impl Context {
    /// Creates a data context that takes ownership of `source`.
    pub fn from_source(source: NativeBuffer) -> Result<Self, InvokeError> {
        let ctx = unsafe { sys::sass_make_data_context(source.as_ptr()) };
        // NOTE: On failure the buffer is still ours and is freed on return.
        let ctx = NonNull::new(ctx).ok_or(InvokeError::ContextAlloc)?;
        let _ = source.into_raw();

        Ok(Self {
            handle: Handle::Data(ctx),
        })
    }

    /// Creates a file context for the absolute stylesheet `path`. The context
    /// keeps its own copy of the path.
    pub fn from_path(path: &CStr) -> Result<Self, InvokeError> {
        let ctx = unsafe { sys::sass_make_file_context(path.as_ptr()) };
        let ctx = NonNull::new(ctx).ok_or(InvokeError::ContextAlloc)?;

        Ok(Self {
            handle: Handle::File(ctx),
        })
    }

    fn raw(&self) -> *mut sys::Sass_Context {
        unsafe {
            match self.handle {
                Handle::Data(ctx) => sys::sass_data_context_get_context(ctx.as_ptr()),
                Handle::File(ctx) => sys::sass_file_context_get_context(ctx.as_ptr()),
            }
        }
    }

    /// Applies `options` to the context.
    pub fn configure(&mut self, options: &Options) {
        unsafe {
            let raw = sys::sass_context_get_options(self.raw());
            sys::sass_option_set_output_style(raw, options.style.to_raw());
            sys::sass_option_set_precision(raw, c_int::from(options.precision));
        }
    }

    /// Runs the compiler to completion.
    pub fn compile(&mut self) {
        unsafe {
            match self.handle {
                Handle::Data(ctx) => sys::sass_compile_data_context(ctx.as_ptr()),
                Handle::File(ctx) => sys::sass_compile_file_context(ctx.as_ptr()),
            };
        }
    }

    /// Copies the result of compilation out of the context.
    pub fn outcome(&self) -> Outcome {
        let ctx = self.raw();
        unsafe {
            if sys::sass_context_get_error_status(ctx) != 0 {
                let message = copy_c_str(sys::sass_context_get_error_message(ctx));
                Outcome::Error(message.unwrap_or_else(|| NO_ERROR_MESSAGE.into()))
            } else if let Some(output) = copy_c_str(sys::sass_context_get_output_string(ctx)) {
                Outcome::Css(output)
            } else {
                Outcome::Error(NO_OUTPUT.into())
            }
        }
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        unsafe {
            match self.handle {
                Handle::Data(ctx) => sys::sass_delete_data_context(ctx.as_ptr()),
                Handle::File(ctx) => sys::sass_delete_file_context(ctx.as_ptr()),
            }
        }
    }
}

/// Compiles `source` with `options`.
pub fn invoke(source: Source, options: &Options) -> Result<Outcome, InvokeError> {
    invoke_in(source, options, env::current_dir())
}

fn invoke_in(
    source: Source,
    options: &Options,
    cwd: io::Result<PathBuf>,
) -> Result<Outcome, InvokeError> {
    let mut context = match source {
        Source::Inline(buffer) => {
            log::debug!("compiling {} bytes of inline source", buffer.len());
            Context::from_source(buffer)?
        }
        Source::File(buffer) => {
            let path = resolve(buffer.as_bytes(), cwd)?;
            log::debug!("compiling file {:?}", path);
            Context::from_path(&path)?
        }
    };

    context.configure(options);
    context.compile();
    Ok(context.outcome())
}

/// Resolves a stylesheet path against the working directory.
fn resolve(path: &[u8], cwd: io::Result<PathBuf>) -> Result<CString, InvokeError> {
    let cwd = cwd.map_err(InvokeError::WorkingDirectory)?;
    let path = cwd.join(bytes_to_path(path));
    // NOTE: Only reachable off unix, for a working directory that is not
    // valid Unicode.
    path_to_c_string(&path).ok_or(InvokeError::InvalidPath(path))
}

#[cfg(unix)]
fn bytes_to_path(bytes: &[u8]) -> PathBuf {
    use std::{ffi::OsStr, os::unix::ffi::OsStrExt};
    Path::new(OsStr::from_bytes(bytes)).to_path_buf()
}

#[cfg(not(unix))]
fn bytes_to_path(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

#[cfg(unix)]
fn path_to_c_string(path: &Path) -> Option<CString> {
    use std::os::unix::ffi::OsStrExt;
    CString::new(path.as_os_str().as_bytes()).ok()
}

#[cfg(not(unix))]
fn path_to_c_string(path: &Path) -> Option<CString> {
    CString::new(path.to_str()?).ok()
}

/// Copies a compiler owned C string, if there is one.
unsafe fn copy_c_str(ptr: *const c_char) -> Option<Vec<u8>> {
    if ptr.is_null() {
        None
    } else {
        Some(CStr::from_ptr(ptr).to_bytes().to_vec())
    }
}

/// Returns the version string of the linked compiler.
pub fn libsass_version() -> String {
    unsafe { CStr::from_ptr(sys::libsass_version()) }
        .to_string_lossy()
        .into_owned()
}
