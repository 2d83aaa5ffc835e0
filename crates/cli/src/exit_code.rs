// Consistent exit codes for the relatum CLI.
//
//   0  = success
//   1  = general error
//   2  = usage/argument error
//   3  = empty commit window (nothing written)
//   11 = authentication/credential error
//   13 = network error
//   14 = document layout mismatch

use std::process;

use relatum_common::plan::PlanError;

/// Named exit codes for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    Error = 1,
    Usage = 2,
    NoCommits = 3,
    Auth = 11,
    Network = 13,
    Layout = 14,
}

impl ExitCode {
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Map an anyhow error to an exit code by inspecting the error chain.
    pub fn from_error(err: &anyhow::Error) -> Self {
        // Walk the error chain for typed errors we recognize.
        for cause in err.chain() {
            if cause.downcast_ref::<PlanError>().is_some() {
                return Self::Layout;
            }
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>() {
                return match io_err.kind() {
                    std::io::ErrorKind::ConnectionRefused | std::io::ErrorKind::TimedOut => {
                        Self::Network
                    }
                    _ => Self::Error,
                };
            }
        }

        // Check the display string for common patterns.
        let msg = format!("{err:#}").to_ascii_lowercase();
        if msg.contains("unauthorized")
            || msg.contains("forbidden")
            || msg.contains("401")
            || msg.contains("403")
            || msg.contains("token")
        {
            return Self::Auth;
        }
        if msg.contains("timed out")
            || msg.contains("error sending request")
            || msg.contains("connection")
        {
            return Self::Network;
        }
        if msg.contains("must be configured") || msg.contains("specify --range") {
            return Self::Usage;
        }

        Self::Error
    }

    /// Exit the process with this code.
    pub fn exit(self) -> ! {
        process::exit(self.code())
    }
}

impl From<ExitCode> for process::ExitCode {
    fn from(code: ExitCode) -> Self {
        process::ExitCode::from(code.code() as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_values() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(ExitCode::Error.code(), 1);
        assert_eq!(ExitCode::Usage.code(), 2);
        assert_eq!(ExitCode::NoCommits.code(), 3);
        assert_eq!(ExitCode::Auth.code(), 11);
        assert_eq!(ExitCode::Network.code(), 13);
        assert_eq!(ExitCode::Layout.code(), 14);
    }

    #[test]
    fn layout_mismatch_in_chain_maps_to_layout() {
        let err = anyhow::Error::new(PlanError::CellCountMismatch { expected: 4, actual: 3 })
            .context("failed to plan table fill");
        assert_eq!(ExitCode::from_error(&err), ExitCode::Layout);
    }

    #[test]
    fn io_timeout_maps_to_network() {
        let err = anyhow::Error::new(std::io::Error::new(
            std::io::ErrorKind::TimedOut,
            "connection timed out",
        ));
        assert_eq!(ExitCode::from_error(&err), ExitCode::Network);
    }

    #[test]
    fn unauthorized_message_maps_to_auth() {
        let err = anyhow::anyhow!("document service returned 401 Unauthorized: bad token");
        assert_eq!(ExitCode::from_error(&err), ExitCode::Auth);
    }

    #[test]
    fn unconfigured_message_maps_to_usage() {
        let err = anyhow::anyhow!("bitbucket workspace and repo_slug must be configured");
        assert_eq!(ExitCode::from_error(&err), ExitCode::Usage);
    }

    #[test]
    fn generic_error_maps_to_error() {
        let err = anyhow::anyhow!("something went wrong");
        assert_eq!(ExitCode::from_error(&err), ExitCode::Error);
    }

    #[test]
    fn exit_code_to_process_exit_code() {
        let code: process::ExitCode = ExitCode::Success.into();
        let _ = code;
    }
}
