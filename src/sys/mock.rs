//! Mock libsass bindings.
//!
//! The mock keeps per-thread books on every allocation and context it hands
//! out so that tests can check that each call releases what it acquired. Its
//! "compiler" echoes the source (or the file contents) back as output, unless
//! an outcome was scripted with [`script`].

#![allow(non_camel_case_types)]
#![cfg_attr(not(test), allow(dead_code))]

use super::{Sass_Output_Style, SASS_STYLE_NESTED};
use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    ffi::{CStr, CString},
    fs,
    os::raw::{c_char, c_int, c_void},
    path::Path,
    ptr,
};

pub struct Sass_Options {
    output_style: Sass_Output_Style,
    precision: c_int,
}

pub struct Sass_Context {
    options: Sass_Options,
    error_status: c_int,
    error_message: Option<CString>,
    output_string: Option<CString>,
}

impl Sass_Context {
    fn new() -> Self {
        Self {
            // NOTE: These mirror the libsass defaults.
            options: Sass_Options {
                output_style: SASS_STYLE_NESTED,
                precision: 10,
            },
            error_status: 0,
            error_message: None,
            output_string: None,
        }
    }
}

pub struct Sass_Data_Context {
    ctx: Sass_Context,
    source: *mut c_char,
}

pub struct Sass_File_Context {
    ctx: Sass_Context,
    path: CString,
}

/// An outcome forced onto the next compilation on the current thread.
#[derive(Clone, Debug)]
pub enum Script {
    /// Succeed with the given output.
    Output(String),
    /// Fail with the given status, optionally carrying a message.
    Error {
        status: c_int,
        message: Option<String>,
    },
    /// Report success but leave the output string unset.
    NoOutput,
}

/// The options a context carried when it was compiled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppliedOptions {
    pub output_style: Sass_Output_Style,
    pub precision: c_int,
}

thread_local! {
    static ALLOCATIONS: RefCell<HashMap<usize, Box<[u8]>>> = RefCell::new(HashMap::new());
    static CONTEXTS: Cell<usize> = Cell::new(0);
    static SCRIPT: RefCell<Option<Script>> = RefCell::new(None);
    static LAST_OPTIONS: Cell<Option<AppliedOptions>> = Cell::new(None);
    static FAIL_ALLOC: Cell<bool> = Cell::new(false);
    static FAIL_CONTEXT: Cell<bool> = Cell::new(false);
}

/// Forces the outcome of the next compilation on this thread.
pub fn script(script: Script) {
    SCRIPT.with(|s| *s.borrow_mut() = Some(script));
}

/// Makes the next `sass_alloc_memory` call on this thread return null.
pub fn fail_next_alloc() {
    FAIL_ALLOC.with(|f| f.set(true));
}

/// Makes the next context constructor call on this thread return null.
pub fn fail_next_context() {
    FAIL_CONTEXT.with(|f| f.set(true));
}

/// Number of `sass_alloc_memory` blocks not yet freed on this thread.
pub fn live_allocations() -> usize {
    ALLOCATIONS.with(|a| a.borrow().len())
}

/// Number of contexts created and not yet deleted on this thread.
pub fn live_contexts() -> usize {
    CONTEXTS.with(Cell::get)
}

/// Options of the most recently compiled context on this thread.
pub fn last_options() -> Option<AppliedOptions> {
    LAST_OPTIONS.with(Cell::get)
}

pub unsafe fn sass_alloc_memory(size: usize) -> *mut c_void {
    if FAIL_ALLOC.with(|f| f.replace(false)) {
        return ptr::null_mut();
    }

    let mut block = vec![0u8; size.max(1)].into_boxed_slice();
    let ptr = block.as_mut_ptr();
    ALLOCATIONS.with(|a| a.borrow_mut().insert(ptr as usize, block));
    ptr.cast()
}

pub unsafe fn sass_free_memory(ptr: *mut c_void) {
    if ptr.is_null() {
        return;
    }
    let block = ALLOCATIONS.with(|a| a.borrow_mut().remove(&(ptr as usize)));
    assert!(block.is_some(), "mocked free of unknown pointer {:p}", ptr);
}

pub unsafe fn sass_make_data_context(source_string: *mut c_char) -> *mut Sass_Data_Context {
    if FAIL_CONTEXT.with(|f| f.replace(false)) {
        return ptr::null_mut();
    }

    CONTEXTS.with(|c| c.set(c.get() + 1));
    Box::into_raw(Box::new(Sass_Data_Context {
        ctx: Sass_Context::new(),
        source: source_string,
    }))
}

pub unsafe fn sass_make_file_context(input_path: *const c_char) -> *mut Sass_File_Context {
    if FAIL_CONTEXT.with(|f| f.replace(false)) {
        return ptr::null_mut();
    }

    CONTEXTS.with(|c| c.set(c.get() + 1));
    Box::into_raw(Box::new(Sass_File_Context {
        ctx: Sass_Context::new(),
        path: CStr::from_ptr(input_path).to_owned(),
    }))
}

pub unsafe fn sass_compile_data_context(ctx: *mut Sass_Data_Context) -> c_int {
    let ctx = &mut *ctx;
    let source = CStr::from_ptr(ctx.source).to_bytes().to_vec();
    run(&mut ctx.ctx, Ok(source))
}

pub unsafe fn sass_compile_file_context(ctx: *mut Sass_File_Context) -> c_int {
    let ctx = &mut *ctx;
    let path = Path::new(ctx.path.to_str().unwrap_or_default());
    let input = fs::read(path)
        .map_err(|_| format!("File to read not found or unreadable: {}", path.display()));
    run(&mut ctx.ctx, input)
}

fn run(ctx: &mut Sass_Context, input: Result<Vec<u8>, String>) -> c_int {
    LAST_OPTIONS.with(|o| {
        o.set(Some(AppliedOptions {
            output_style: ctx.options.output_style,
            precision: ctx.options.precision,
        }))
    });

    match SCRIPT.with(|s| s.borrow_mut().take()) {
        Some(Script::Output(output)) => ctx.output_string = CString::new(output).ok(),
        Some(Script::Error { status, message }) => {
            ctx.error_status = status;
            ctx.error_message = message.and_then(|m| CString::new(m).ok());
        }
        Some(Script::NoOutput) => {}
        None => match input {
            Ok(bytes) => ctx.output_string = CString::new(bytes).ok(),
            Err(message) => {
                ctx.error_status = 1;
                ctx.error_message = CString::new(message).ok();
            }
        },
    }

    ctx.error_status
}

pub unsafe fn sass_delete_data_context(ctx: *mut Sass_Data_Context) {
    let ctx = Box::from_raw(ctx);
    sass_free_memory(ctx.source.cast());
    CONTEXTS.with(|c| c.set(c.get() - 1));
}

pub unsafe fn sass_delete_file_context(ctx: *mut Sass_File_Context) {
    drop(Box::from_raw(ctx));
    CONTEXTS.with(|c| c.set(c.get() - 1));
}

pub unsafe fn sass_data_context_get_context(ctx: *mut Sass_Data_Context) -> *mut Sass_Context {
    &mut (*ctx).ctx
}

pub unsafe fn sass_file_context_get_context(ctx: *mut Sass_File_Context) -> *mut Sass_Context {
    &mut (*ctx).ctx
}

pub unsafe fn sass_context_get_options(ctx: *mut Sass_Context) -> *mut Sass_Options {
    &mut (*ctx).options
}

pub unsafe fn sass_context_get_error_status(ctx: *mut Sass_Context) -> c_int {
    (*ctx).error_status
}

pub unsafe fn sass_context_get_error_message(ctx: *mut Sass_Context) -> *const c_char {
    (*ctx)
        .error_message
        .as_ref()
        .map_or(ptr::null(), |m| m.as_ptr())
}

pub unsafe fn sass_context_get_output_string(ctx: *mut Sass_Context) -> *const c_char {
    (*ctx)
        .output_string
        .as_ref()
        .map_or(ptr::null(), |o| o.as_ptr())
}

pub unsafe fn sass_option_set_output_style(options: *mut Sass_Options, style: Sass_Output_Style) {
    (*options).output_style = style;
}

pub unsafe fn sass_option_set_precision(options: *mut Sass_Options, precision: c_int) {
    (*options).precision = precision;
}

pub unsafe fn libsass_version() -> *const c_char {
    b"mock\0".as_ptr().cast()
}
