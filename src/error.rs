use thiserror::Error;

/// Error type for every fallible codec operation.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config artifact could not be parsed.
    #[error("malformed config: {message}")]
    ConfigFormat {
        message: String,
    },

    /// The encoded stream ran out of bits before the expected sample count
    /// was reached.
    #[error("encoded stream too short: decoded {decoded} of {expected} samples")]
    StreamTooShort {
        expected: usize,
        decoded: usize,
    },

    /// The accumulated bit prefix never matched a codeword.
    #[error("no codeword matches the bits at offset {bit_offset}")]
    UnmatchedCode {
        bit_offset: usize,
    },

    /// An input sample does not fit in one byte.
    #[error("sample at index {index} is outside [0, 255]")]
    SampleRange {
        index: usize,
    },

    /// The sample buffer does not match the descriptor dimensions.
    #[error("sample buffer holds {actual} samples, descriptor expects {expected}")]
    ShapeMismatch {
        expected: usize,
        actual: usize,
    },
}
