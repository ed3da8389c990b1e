use mongodb::error::{Error, ErrorKind, WriteFailure};

/// Server error code for a unique-index violation.
pub const DUPLICATE_KEY_CODE: i32 = 11000;

/// True when `err` is a single-document write rejected by a unique index.
///
/// Repositories use this to turn races on unique fields (participant email,
/// one roster per event) into domain conflicts instead of infrastructure errors.
pub fn is_duplicate_key_error(err: &Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}
