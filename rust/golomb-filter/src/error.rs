use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_parameter(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidParameter {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn empty_set() -> Error {
        Error(ErrorKind::EmptySet.into())
    }

    pub fn modulus_overflow(count: usize, power: u32) -> Error {
        Error(ErrorKind::ModulusOverflow { count, power }.into())
    }

    pub fn truncated_input(position: usize, needed: usize, available: usize) -> Error {
        Error(
            ErrorKind::TruncatedInput {
                position,
                needed,
                available,
            }
            .into(),
        )
    }

    pub fn invalid_format(element: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidFormat {
                element: element.into(),
                message: message.into(),
            }
            .into(),
        )
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter { name: String, message: String },

    #[error("cannot build a filter from an empty set of values")]
    EmptySet,

    #[error("modulus {count} * 2^{power} does not fit in 32 bits")]
    ModulusOverflow { count: usize, power: u32 },

    #[error(
        "truncated input at bit {position}: needed {needed} more bits, {available} available"
    )]
    TruncatedInput {
        position: usize,
        needed: usize,
        available: usize,
    },

    #[error("invalid encoding for '{element}': {message}")]
    InvalidFormat { element: String, message: String },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}
