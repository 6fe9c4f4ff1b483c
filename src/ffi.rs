//! Module containing FFI utilities for moving host data into memory owned by
//! the native compiler.
//!
//! # Ownership
//!
//! Host values are borrowed for the duration of a call only, so everything the
//! compiler needs is copied out of them before any native call is made. A
//! [`buffer::NativeBuffer`] is allocated with the compiler's own allocator:
//! once handed to a data context, the context frees it, and it must not be
//! freed again from Rust.

pub mod buffer;
pub mod string;
