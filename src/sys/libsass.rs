//! The libsass C API bindings.

#![allow(non_camel_case_types)]

use super::Sass_Output_Style;
use std::os::raw::{c_char, c_int, c_void};

/// Opaque `struct Sass_Data_Context`.
#[repr(C)]
pub struct Sass_Data_Context {
    _private: [u8; 0],
}

/// Opaque `struct Sass_File_Context`.
#[repr(C)]
pub struct Sass_File_Context {
    _private: [u8; 0],
}

/// Opaque `struct Sass_Context`, shared by both context kinds.
#[repr(C)]
pub struct Sass_Context {
    _private: [u8; 0],
}

/// Opaque `struct Sass_Options`.
#[repr(C)]
pub struct Sass_Options {
    _private: [u8; 0],
}

#[link(name = "sass")]
extern "C" {
    pub fn sass_alloc_memory(size: usize) -> *mut c_void;
    pub fn sass_free_memory(ptr: *mut c_void);

    pub fn sass_make_data_context(source_string: *mut c_char) -> *mut Sass_Data_Context;
    pub fn sass_make_file_context(input_path: *const c_char) -> *mut Sass_File_Context;

    pub fn sass_compile_data_context(ctx: *mut Sass_Data_Context) -> c_int;
    pub fn sass_compile_file_context(ctx: *mut Sass_File_Context) -> c_int;

    pub fn sass_delete_data_context(ctx: *mut Sass_Data_Context);
    pub fn sass_delete_file_context(ctx: *mut Sass_File_Context);

    pub fn sass_data_context_get_context(ctx: *mut Sass_Data_Context) -> *mut Sass_Context;
    pub fn sass_file_context_get_context(ctx: *mut Sass_File_Context) -> *mut Sass_Context;

    pub fn sass_context_get_options(ctx: *mut Sass_Context) -> *mut Sass_Options;
    pub fn sass_context_get_error_status(ctx: *mut Sass_Context) -> c_int;
    pub fn sass_context_get_error_message(ctx: *mut Sass_Context) -> *const c_char;
    pub fn sass_context_get_output_string(ctx: *mut Sass_Context) -> *const c_char;

    pub fn sass_option_set_output_style(options: *mut Sass_Options, style: Sass_Output_Style);
    pub fn sass_option_set_precision(options: *mut Sass_Options, precision: c_int);

    pub fn libsass_version() -> *const c_char;
}
