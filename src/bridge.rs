//! Host entry points.
//!
//! Each entry point takes the host argument vector, which must hold exactly
//! one character sequence. Argument contract violations are returned as
//! [`BadArg`]; everything that happens after marshaling, including failures
//! to set up compilation, becomes a [`ResultPair`].

use crate::{
    compiler::{self, Options, Source},
    error::BadArg,
    ffi::{buffer::NativeBuffer, string::HostString},
    result::ResultPair,
};

/// Compiles literal stylesheet source text.
pub fn compile<T: HostString>(args: &[T]) -> Result<ResultPair, BadArg> {
    let source = marshal(args)?;
    Ok(run(Source::Inline(source)))
}

/// Compiles the stylesheet at a path relative to the working directory.
pub fn compile_file<T: HostString>(args: &[T]) -> Result<ResultPair, BadArg> {
    let path = marshal(args)?;
    Ok(run(Source::File(path)))
}

fn marshal<T: HostString>(args: &[T]) -> Result<NativeBuffer, BadArg> {
    match args {
        [arg] => NativeBuffer::from_host(arg),
        _ => Err(BadArg::Arity(args.len())),
    }
}

fn run(source: Source) -> ResultPair {
    match compiler::invoke(source, &Options::FIXED) {
        Ok(outcome) => outcome.into(),
        Err(err) => {
            log::warn!("compilation not attempted: {}", err);
            err.into()
        }
    }
}

#[cfg(all(test, not(feature = "libsass")))]
mod tests {
    use super::*;
    use crate::{
        compiler::{NO_ERROR_MESSAGE, NO_OUTPUT},
        result::Tag,
        sys::{self, Script},
    };
    use std::fs;

    struct Integer;

    impl HostString for Integer {
        fn code_points(&self) -> Option<Vec<i64>> {
            None
        }
    }

    fn assert_released() {
        assert_eq!(sys::live_contexts(), 0);
        assert_eq!(sys::live_allocations(), 0);
    }

    #[test]
    fn compile_returns_ok_pair() {
        let pair = compile(&[".a { color: red; }"]).unwrap();
        assert_eq!(pair, ResultPair::ok(".a { color: red; }"));
        assert_released();
    }

    #[test]
    fn empty_source_yields_empty_payload() {
        let pair = compile(&[""]).unwrap();
        assert_eq!(pair.tag(), Tag::Ok);
        assert!(pair.payload().is_empty());
    }

    #[test]
    fn arity_is_checked() {
        assert_eq!(compile::<&str>(&[]), Err(BadArg::Arity(0)));
        assert_eq!(compile(&["a", "b"]), Err(BadArg::Arity(2)));
        assert_eq!(compile_file::<&str>(&[]), Err(BadArg::Arity(0)));
        assert_eq!(compile_file(&["a", "b"]), Err(BadArg::Arity(2)));
        assert_released();
    }

    #[test]
    fn non_strings_are_rejected() {
        assert_eq!(compile(&[Integer]), Err(BadArg::NotAString));
        assert_eq!(compile_file(&[Integer]), Err(BadArg::NotAString));
        assert_eq!(compile(&[vec![0x61_i64, -5]]), Err(BadArg::NotAString));
    }

    #[test]
    fn nul_is_rejected() {
        assert_eq!(compile(&["a\0b"]), Err(BadArg::InteriorNul(1)));
        assert_released();
    }

    #[test]
    fn allocation_failure_is_a_bad_argument() {
        sys::fail_next_alloc();
        assert_eq!(compile(&["abc"]), Err(BadArg::Alloc(4)));
        assert_released();
    }

    #[test]
    fn ok_payload_is_the_compiler_output() {
        sys::script(Script::Output(".a {\n  color: red; }\n".to_owned()));
        let pair = compile(&[".a { color: red; }"]).unwrap();
        assert_eq!(pair, ResultPair::ok(".a {\n  color: red; }\n"));
        assert_released();
    }

    #[test]
    fn compile_errors_become_error_pairs() {
        sys::script(Script::Error {
            status: 1,
            message: Some("Error: property \"color\" must be followed by a ':'".to_owned()),
        });
        let pair = compile(&[".a { color }"]).unwrap();
        assert_eq!(pair.tag(), Tag::Error);
        assert!(pair.payload_lossy().to_lowercase().contains("error"));
        assert_released();
    }

    #[test]
    fn fallback_messages() {
        sys::script(Script::Error {
            status: 1,
            message: None,
        });
        assert_eq!(compile(&["x"]).unwrap(), ResultPair::error(NO_ERROR_MESSAGE));

        sys::script(Script::NoOutput);
        assert_eq!(compile(&["x"]).unwrap(), ResultPair::error(NO_OUTPUT));
        assert_released();
    }

    #[test]
    fn context_failure_is_an_error_pair() {
        sys::fail_next_context();
        let pair = compile(&["x"]).unwrap();
        assert_eq!(pair, ResultPair::error("Unable to allocate a compile context."));
        assert_released();
    }

    #[test]
    fn compile_file_reads_absolute_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.scss");
        fs::write(&path, ".site { e: f }").unwrap();

        let pair = compile_file(&[path.to_str().unwrap()]).unwrap();
        assert_eq!(pair, ResultPair::ok(".site { e: f }"));
        assert_released();
    }

    #[test]
    fn compile_file_never_succeeds_for_missing_files() {
        let pair = compile_file(&["definitely/not/here.scss"]).unwrap();
        assert_eq!(pair.tag(), Tag::Error);
        assert!(pair.payload_lossy().contains("definitely/not/here.scss"));
        assert_released();
    }

    #[test]
    fn compile_is_idempotent() {
        let source = ".a { .b { c: d } }";
        assert_eq!(compile(&[source]).unwrap(), compile(&[source]).unwrap());
    }

    #[test]
    fn repeated_calls_release_everything() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.scss");
        fs::write(&path, "x").unwrap();
        let path = path.to_str().unwrap().to_owned();

        for i in 0..1000 {
            match i % 5 {
                0 => {
                    compile(&[format!(".c{} {{ d: e }}", i)]).unwrap();
                }
                1 => {
                    sys::script(Script::Error {
                        status: 1,
                        message: Some("Error: bad".to_owned()),
                    });
                    compile(&["bad"]).unwrap();
                }
                2 => {
                    compile_file(&[path.as_str()]).unwrap();
                }
                3 => {
                    compile_file(&["missing.scss"]).unwrap();
                }
                _ => {
                    compile::<&str>(&[]).unwrap_err();
                }
            }
            assert_eq!(sys::live_contexts(), 0);
        }
        assert_released();
    }
}

#[cfg(all(test, feature = "libsass"))]
mod libsass_tests {
    use super::*;
    use crate::result::Tag;

    #[test]
    fn compiles_nested_style() {
        let pair = compile(&[".a { color: red; }"]).unwrap();
        assert_eq!(pair, ResultPair::ok(".a {\n  color: red; }\n"));
    }

    #[test]
    fn keeps_five_digits_of_precision() {
        let pair = compile(&[".a { width: (1 / 3) * 1px; }"]).unwrap();
        assert_eq!(pair, ResultPair::ok(".a {\n  width: 0.33333px; }\n"));
    }

    #[test]
    fn empty_source_compiles_to_nothing() {
        let pair = compile(&[""]).unwrap();
        assert_eq!(pair.tag(), Tag::Ok);
        assert!(pair.payload().is_empty());
    }

    #[test]
    fn syntax_errors_are_reported() {
        let pair = compile(&[".a { color }"]).unwrap();
        assert_eq!(pair.tag(), Tag::Error);
        assert!(pair.payload_lossy().to_lowercase().contains("error"));
    }

    #[test]
    fn missing_file_is_named() {
        let pair = compile_file(&["no-such-stylesheet.scss"]).unwrap();
        assert_eq!(pair.tag(), Tag::Error);
        assert!(pair.payload_lossy().contains("no-such-stylesheet.scss"));
    }

    #[test]
    fn output_is_stable_across_calls() {
        let source = "$w: 10px; .a { .b { width: $w * 2; } }";
        assert_eq!(compile(&[source]).unwrap(), compile(&[source]).unwrap());
    }
}
