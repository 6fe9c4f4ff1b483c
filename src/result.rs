//! Tagged result pair returned to the host.

use crate::{compiler::Outcome, error::InvokeError};
use std::{
    borrow::Cow,
    fmt::{self, Debug, Formatter},
};

/// Discriminates a successful compilation from a failed one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    Ok,
    Error,
}

impl Tag {
    /// Returns the host atom name for the tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Tag::Ok => "ok",
            Tag::Error => "error",
        }
    }
}

/// A `(tag, payload)` pair: compiled CSS on `ok`, a diagnostic on `error`.
///
/// The payload is always owned by the pair and never points into compiler
/// memory.
#[derive(Clone, PartialEq, Eq)]
pub struct ResultPair {
    tag: Tag,
    payload: Vec<u8>,
}

impl ResultPair {
    /// Creates a pair holding a copy of `message`.
    pub fn new(tag: Tag, message: impl AsRef<[u8]>) -> Self {
        Self {
            tag,
            payload: message.as_ref().to_vec(),
        }
    }

    pub fn ok(css: impl AsRef<[u8]>) -> Self {
        Self::new(Tag::Ok, css)
    }

    pub fn error(message: impl AsRef<[u8]>) -> Self {
        Self::new(Tag::Error, message)
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn is_ok(&self) -> bool {
        self.tag == Tag::Ok
    }

    /// Returns the payload bytes. May be empty.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Returns the payload as text, replacing invalid UTF-8 sequences.
    pub fn payload_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }
}

impl From<Outcome> for ResultPair {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Css(payload) => Self {
                tag: Tag::Ok,
                payload,
            },
            Outcome::Error(payload) => Self {
                tag: Tag::Error,
                payload,
            },
        }
    }
}

impl From<InvokeError> for ResultPair {
    fn from(err: InvokeError) -> Self {
        Self::error(err.to_string())
    }
}

impl Debug for ResultPair {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_tuple("")
            .field(&self.tag)
            .field(&self.payload_lossy())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn payload_is_an_owned_copy() {
        let message = String::from("a { b: c; }");
        let pair = ResultPair::ok(&message);
        drop(message);
        assert_eq!(pair.payload(), b"a { b: c; }");
        assert_eq!(pair.tag(), Tag::Ok);
    }

    #[test]
    fn empty_payload_is_allowed() {
        let pair = ResultPair::ok("");
        assert!(pair.is_ok());
        assert!(pair.payload().is_empty());
    }

    #[test]
    fn from_outcome() {
        assert_eq!(
            ResultPair::from(Outcome::Css(b"x".to_vec())),
            ResultPair::ok("x")
        );
        assert_eq!(
            ResultPair::from(Outcome::Error(b"y".to_vec())),
            ResultPair::error("y")
        );
    }

    #[test]
    fn from_invoke_error() {
        let err = InvokeError::WorkingDirectory(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let pair = ResultPair::from(err);
        assert_eq!(pair.tag(), Tag::Error);
        assert_eq!(
            pair.payload_lossy(),
            "Unable to resolve the current working directory: gone"
        );
    }

    #[test]
    fn tag_names() {
        assert_eq!(Tag::Ok.as_str(), "ok");
        assert_eq!(Tag::Error.as_str(), "error");
    }
}
