//! Sass stylesheet compilation for the BEAM, backed by
//! [libsass](https://sass-lang.com/libsass).
//!
//! The library exposes two blocking entry points, [`compile`] and
//! [`compile_file`], each answering with a [`ResultPair`] or rejecting its
//! argument with [`BadArg`]. With the `nif` feature they are registered as
//! `Elixir.Sass.Compiler.compile/1` and `Elixir.Sass.Compiler.compile_file/1`.

mod abort;
pub mod bridge;
pub mod compiler;
pub mod error;
pub mod ffi;
mod logger;
pub mod result;
mod sys;

pub use self::{
    bridge::{compile, compile_file},
    error::BadArg,
    ffi::string::HostString,
    result::{ResultPair, Tag},
};
pub use log;

/// Module containing the NIF surface registered with the host.
#[cfg(feature = "nif")]
#[doc(hidden)]
pub mod exports {
    use crate::{abort, bridge, compiler, error::BadArg, logger, HostString, ResultPair};
    use rustler::{Atom, Encoder, Env, Error, NifResult, OwnedBinary, Term};

    impl HostString for Term<'_> {
        fn code_points(&self) -> Option<Vec<i64>> {
            self.decode::<Vec<i64>>().ok()
        }
    }

    /// Runs once when the host loads the library.
    fn load(_env: Env, _info: Term) -> bool {
        abort::set_panic_hook();
        logger::init();
        log::info!("loaded libsass {}", compiler::libsass_version());
        true
    }

    // NOTE: A compilation blocks its thread for as long as the stylesheet
    // takes, so both functions run on the dirty CPU schedulers.

    #[rustler::nif(name = "compile", schedule = "DirtyCpu")]
    fn compile_nif<'a>(env: Env<'a>, source: Term<'a>) -> NifResult<Term<'a>> {
        let pair = bridge::compile(&[source]).map_err(badarg)?;
        encode(env, &pair)
    }

    #[rustler::nif(name = "compile_file", schedule = "DirtyCpu")]
    fn compile_file_nif<'a>(env: Env<'a>, path: Term<'a>) -> NifResult<Term<'a>> {
        let pair = bridge::compile_file(&[path]).map_err(badarg)?;
        encode(env, &pair)
    }

    fn badarg(err: BadArg) -> Error {
        log::debug!("rejected argument: {}", err);
        Error::BadArg
    }

    /// Encodes the pair as `{tag, binary}`, copying the payload into a fresh
    /// host binary.
    fn encode<'a>(env: Env<'a>, pair: &ResultPair) -> NifResult<Term<'a>> {
        let payload = pair.payload();
        let mut binary = OwnedBinary::new(payload.len()).ok_or_else(|| {
            log::error!("failed to allocate a {} byte result binary", payload.len());
            Error::BadArg
        })?;
        binary.as_mut_slice().copy_from_slice(payload);

        let tag = Atom::from_str(env, pair.tag().as_str())?;
        Ok((tag, binary.release(env)).encode(env))
    }

    rustler::init!("Elixir.Sass.Compiler", load = load);
}

/// Without the `nif` feature nothing calls the logger and panic hook setup,
/// since only the host's `load` callback installs them. Referencing them here
/// keeps them compiled and lint-clean in that configuration.
#[cfg(not(feature = "nif"))]
fn unused_exports() {
    #![allow(unused)]
    let _ = abort::set_panic_hook;
    let _ = logger::init;
}
