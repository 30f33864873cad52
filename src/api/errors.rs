use crate::types::errors::{Error, ErrorKind};

// Stable identifiers carried in failure facts and mapped to CLI exit codes.
#[allow(non_camel_case_types, reason = "Error IDs are emitted verbatim")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorId {
    E_INPUT,
    E_PREFIX,
    E_LOCATION,
    E_FORMAT,
    E_KEY,
    E_COLLISION,
    E_PARSE,
    E_IO,
    E_GENERIC,
}

impl From<ErrorKind> for ErrorId {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::InvalidInput => ErrorId::E_INPUT,
            ErrorKind::InvalidPrefix => ErrorId::E_PREFIX,
            ErrorKind::InvalidLocation => ErrorId::E_LOCATION,
            ErrorKind::UnsupportedFormat => ErrorId::E_FORMAT,
            ErrorKind::KeyNotFound => ErrorId::E_KEY,
            ErrorKind::LinkCollision => ErrorId::E_COLLISION,
            ErrorKind::Parse => ErrorId::E_PARSE,
            ErrorKind::Io => ErrorId::E_IO,
        }
    }
}

impl From<&Error> for ErrorId {
    fn from(e: &Error) -> Self {
        e.kind.into()
    }
}

#[must_use]
pub const fn id_str(id: ErrorId) -> &'static str {
    match id {
        ErrorId::E_INPUT => "E_INPUT",
        ErrorId::E_PREFIX => "E_PREFIX",
        ErrorId::E_LOCATION => "E_LOCATION",
        ErrorId::E_FORMAT => "E_FORMAT",
        ErrorId::E_KEY => "E_KEY",
        ErrorId::E_COLLISION => "E_COLLISION",
        ErrorId::E_PARSE => "E_PARSE",
        ErrorId::E_IO => "E_IO",
        ErrorId::E_GENERIC => "E_GENERIC",
    }
}

/// Process exit status for an error id; 75 is reserved for safe-mode refusals.
#[must_use]
pub const fn exit_code_for(id: ErrorId) -> u8 {
    match id {
        ErrorId::E_INPUT => 10,
        ErrorId::E_PREFIX => 11,
        ErrorId::E_LOCATION => 12,
        ErrorId::E_FORMAT => 20,
        ErrorId::E_KEY => 21,
        ErrorId::E_PARSE => 22,
        ErrorId::E_COLLISION => 30,
        ErrorId::E_IO => 40,
        ErrorId::E_GENERIC => 1,
    }
}
