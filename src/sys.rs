//! Compiler import function bindings.

#[cfg(feature = "libsass")]
#[path = "sys/libsass.rs"]
mod bindings;

#[cfg(not(feature = "libsass"))]
#[path = "sys/mock.rs"]
mod bindings;

pub use self::bindings::*;

/// libsass `enum Sass_Output_Style` values.
pub const SASS_STYLE_NESTED: Sass_Output_Style = 0;
pub const SASS_STYLE_EXPANDED: Sass_Output_Style = 1;
pub const SASS_STYLE_COMPACT: Sass_Output_Style = 2;
pub const SASS_STYLE_COMPRESSED: Sass_Output_Style = 3;

#[allow(non_camel_case_types)]
pub type Sass_Output_Style = std::os::raw::c_int;
