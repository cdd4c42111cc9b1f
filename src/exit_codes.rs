//! Exit code constants for the templatify CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable file, argument binding)
//! - 2: Definition error (missing docstring, syntax, parameter mismatch)
//! - 3: Render failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable definitions file, or a call that
/// does not fit the function signature.
pub const USER_ERROR: i32 = 1;

/// Definition error: a template function could not be decorated.
pub const DEFINITION_ERROR: i32 = 2;

/// Render failure: the engine failed while rendering a valid definition.
pub const RENDER_FAILURE: i32 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, DEFINITION_ERROR, RENDER_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn success_is_zero() {
        assert_eq!(SUCCESS, 0);
    }
}
