//! Error handling and exit codes for the jira-bridge CLI

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// General error or warnings found
pub const EXIT_WARNING: i32 = 1;

/// Convert a command result to an exit code, printing the error chain on failure
pub fn handle_command_result(result: anyhow::Result<()>) -> i32 {
    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {cause}");
            }
            EXIT_WARNING
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_maps_to_success() {
        assert_eq!(handle_command_result(Ok(())), EXIT_SUCCESS);
    }

    #[test]
    fn test_error_maps_to_warning() {
        assert_eq!(
            handle_command_result(Err(anyhow::anyhow!("boom"))),
            EXIT_WARNING
        );
    }
}
