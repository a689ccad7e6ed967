//! Reporting surface of the CI host.
//!
//! GitHub Actions reads workflow commands such as `::error::message` from
//! stdout and marks the step failed with that message.

/// Format a failure as an `::error::` workflow command.
pub fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

/// Escape command data so multi-line messages survive as one annotation.
fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_message() {
        assert_eq!(
            error_command("Reviewer alice needs to approve the PR"),
            "::error::Reviewer alice needs to approve the PR"
        );
    }

    #[test]
    fn test_escapes_newlines_and_percent() {
        assert_eq!(error_command("100%\r\ndone"), "::error::100%25%0D%0Adone");
    }
}
