use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test harness for running CLI commands with temporary databases
pub struct CliTestHarness {
    _temp_dir: TempDir,
    db_path: PathBuf,
}

impl CliTestHarness {
    /// Create a new test harness with a temporary database
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");

        Self {
            _temp_dir: temp_dir,
            db_path,
        }
    }

    /// Get a Command instance configured for testing
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("alarmchat").expect("Failed to find alarmchat binary");

        // Point the binary at the temporary database and pin the timezone
        cmd.env("ALARMCHAT_DATABASE_PATH", &self.db_path);
        cmd.env("ALARMCHAT_TIMEZONE", "UTC");

        cmd
    }

    /// Helper to run a command and assert success
    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }
}
