use std::fmt;

#[derive(Debug, Clone)]
pub struct TlvError {
    backing: Backing,
}

#[derive(Debug, Clone)]
struct Backing {
    code: ErrorCode,
    reason: String,
    file: String,
    line: u32,
}

impl TlvError {
    pub fn new(code: ErrorCode, reason: String, file: String, line: u32) -> Self {
        TlvError {
            backing: Backing {
                code,
                reason,
                file,
                line,
            },
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.backing.code
    }

    pub fn reason(&self) -> &str {
        &self.backing.reason
    }
}

impl PartialEq for TlvError {
    fn eq(&self, other: &Self) -> bool {
        self.backing.code == other.backing.code
            && self.backing.reason == other.backing.reason
            && self.backing.file == other.backing.file
            && self.backing.line == other.backing.line
    }
}

impl Eq for TlvError {}

impl std::hash::Hash for TlvError {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.backing.code.hash(state);
        self.backing.reason.hash(state);
        self.backing.file.hash(state);
        self.backing.line.hash(state);
    }
}

impl fmt::Display for TlvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TlvError.{:?}: {} {}:{}",
            self.backing.code, self.backing.reason, self.backing.file, self.backing.line
        )
    }
}

impl std::error::Error for TlvError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    BufferUnderflow,
    EndOfStream,
    Io,
    LengthOverflow,
    TagTooLong,
    IndefiniteLengthForbidden,
    ConstructedForPrimitive,
    InvalidArgument,
    NestingTooDeep,
    TrailingData,
}

#[macro_export]
macro_rules! tlv_err {
    ($code:expr, $msg:expr) => {
        $crate::errors::TlvError::new($code, $msg.to_string(), file!().to_string(), line!())
    };
    ($code:expr, $fmt:expr, $($arg:tt)+) => {
        $crate::errors::TlvError::new(
            $code,
            format!($fmt, $($arg)+),
            file!().to_string(),
            line!(),
        )
    };
}
