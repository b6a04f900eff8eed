//! External command execution with a wall-clock timeout.
//!
//! Commands are split with shell-words (no shell) and run in a given
//! directory. Stdout and stderr go to anonymous temp files so a chatty
//! process can never block on a full pipe while we poll for exit.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Result of running one external command. Never an error: spawn failures
/// and timeouts are recorded as a failed outcome.
#[derive(Debug, Clone, Default)]
pub struct CommandOutcome {
    /// The command string as configured.
    pub command: String,
    /// Exit code (None if killed, timed out, or never started).
    pub exit_code: Option<i32>,
    /// Whether the process was killed due to timeout.
    pub timed_out: bool,
    /// Why the command could not be started, if it could not.
    pub spawn_error: Option<String>,
    /// Combined stdout and stderr.
    pub output: String,
    pub duration: Duration,
}

impl CommandOutcome {
    fn not_started(command: &str, reason: String) -> Self {
        Self {
            command: command.to_string(),
            spawn_error: Some(reason),
            ..Default::default()
        }
    }

    pub fn is_success(&self) -> bool {
        !self.timed_out && self.spawn_error.is_none() && self.exit_code == Some(0)
    }

    /// One-line status for reports.
    pub fn describe(&self) -> String {
        if let Some(reason) = &self.spawn_error {
            return format!("could not run: {}", reason);
        }
        if self.timed_out {
            return format!("timed out after {}s", self.duration.as_secs());
        }
        match self.exit_code {
            Some(0) => "passed".to_string(),
            Some(code) => format!("failed (exit code {})", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Run `command` in `cwd`, killing it after `timeout`.
pub fn run_command(command: &str, cwd: &Path, timeout: Duration) -> CommandOutcome {
    run_command_with_env(command, cwd, timeout, &[])
}

/// Like [`run_command`], with extra environment variables.
pub fn run_command_with_env(
    command: &str,
    cwd: &Path,
    timeout: Duration,
    env: &[(&str, &str)],
) -> CommandOutcome {
    let trimmed = command.trim();
    if trimmed.is_empty() {
        return CommandOutcome::not_started(command, "command is empty".to_string());
    }

    let args = match shell_words::split(trimmed) {
        Ok(args) if !args.is_empty() => args,
        Ok(_) => {
            return CommandOutcome::not_started(command, "command is empty after parsing".to_string());
        }
        Err(e) => {
            return CommandOutcome::not_started(
                command,
                format!("failed to parse command: {} (check for unmatched quotes)", e),
            );
        }
    };

    let (stdout_file, stderr_file) = match (tempfile::tempfile(), tempfile::tempfile()) {
        (Ok(out), Ok(err)) => (out, err),
        (Err(e), _) | (_, Err(e)) => {
            return CommandOutcome::not_started(command, format!("failed to create capture file: {}", e));
        }
    };

    let (child_stdout, child_stderr) = match (stdout_file.try_clone(), stderr_file.try_clone()) {
        (Ok(out), Ok(err)) => (out, err),
        (Err(e), _) | (_, Err(e)) => {
            return CommandOutcome::not_started(command, format!("failed to create capture file: {}", e));
        }
    };

    let mut cmd = Command::new(&args[0]);
    cmd.args(&args[1..])
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::from(child_stdout))
        .stderr(Stdio::from(child_stderr));
    for (key, value) in env {
        cmd.env(key, value);
    }

    let start = Instant::now();
    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => {
            return CommandOutcome::not_started(
                command,
                format!("failed to execute '{}': {} (is it installed and in PATH?)", args[0], e),
            );
        }
    };

    let (exit_code, timed_out) = wait_with_timeout(&mut child, timeout);
    let duration = start.elapsed();

    let stdout = read_capture(stdout_file);
    let stderr = read_capture(stderr_file);
    let output = if stderr.is_empty() {
        stdout
    } else if stdout.is_empty() {
        stderr
    } else {
        format!("{}\n{}", stdout, stderr)
    };

    log::debug!(
        "ran `{}` in {} -> {:?} (timed out: {}) in {:?}",
        trimmed,
        cwd.display(),
        exit_code,
        timed_out,
        duration
    );

    CommandOutcome {
        command: command.to_string(),
        exit_code,
        timed_out,
        spawn_error: None,
        output,
        duration,
    }
}

/// Wait for a child process with timeout.
///
/// Returns (exit_code, timed_out).
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> (Option<i32>, bool) {
    let start = Instant::now();

    loop {
        match child.try_wait() {
            Ok(Some(status)) => return (status.code(), false),
            Ok(None) => {
                if start.elapsed() >= timeout {
                    kill_process(child);
                    return (None, true);
                }
                std::thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                log::debug!("failed to check process status: {e}");
                kill_process(child);
                return (None, false);
            }
        }
    }
}

/// Kill a process and reap it.
fn kill_process(child: &mut Child) {
    // On Unix this is SIGKILL; on Windows it is TerminateProcess.
    let _ = child.kill();
    let _ = child.wait();
}

fn read_capture(mut file: File) -> String {
    let mut bytes = Vec::new();
    if let Err(e) = file
        .seek(SeekFrom::Start(0))
        .and_then(|_| file.read_to_end(&mut bytes))
    {
        log::debug!("failed to read captured output: {e}");
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TIMEOUT: Duration = Duration::from_secs(10);

    #[test]
    fn test_successful_command_captures_stdout() {
        let temp = TempDir::new().unwrap();
        let outcome = run_command("echo hello", temp.path(), TIMEOUT);

        assert!(outcome.is_success());
        assert_eq!(outcome.exit_code, Some(0));
        assert_eq!(outcome.output.trim(), "hello");
        assert_eq!(outcome.describe(), "passed");
    }

    #[test]
    fn test_nonzero_exit_combines_streams() {
        let temp = TempDir::new().unwrap();
        let outcome = run_command("sh -c \"echo out; echo err >&2; exit 3\"", temp.path(), TIMEOUT);

        assert!(!outcome.is_success());
        assert_eq!(outcome.exit_code, Some(3));
        assert!(outcome.output.contains("out"));
        assert!(outcome.output.contains("err"));
        assert_eq!(outcome.describe(), "failed (exit code 3)");
    }

    #[test]
    fn test_runs_in_given_directory() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("marker.txt"), "").unwrap();
        let outcome = run_command("ls", temp.path(), TIMEOUT);
        assert!(outcome.output.contains("marker.txt"));
    }

    #[test]
    fn test_timeout_kills_process() {
        let temp = TempDir::new().unwrap();
        let outcome = run_command("sleep 10", temp.path(), Duration::from_millis(200));

        assert!(!outcome.is_success());
        assert!(outcome.timed_out);
        assert!(outcome.exit_code.is_none());
        assert!(outcome.duration < Duration::from_secs(5));
    }

    #[test]
    fn test_missing_program_is_failed_outcome() {
        let temp = TempDir::new().unwrap();
        let outcome = run_command("nonexistent_command_xyz_123", temp.path(), TIMEOUT);

        assert!(!outcome.is_success());
        assert!(outcome.spawn_error.as_deref().unwrap().contains("failed to execute"));
    }

    #[test]
    fn test_unparsable_and_empty_commands() {
        let temp = TempDir::new().unwrap();

        let outcome = run_command("echo \"unmatched", temp.path(), TIMEOUT);
        assert!(outcome.spawn_error.unwrap().contains("failed to parse"));

        let outcome = run_command("   ", temp.path(), TIMEOUT);
        assert_eq!(outcome.spawn_error.as_deref(), Some("command is empty"));
    }

    #[test]
    fn test_environment_is_passed() {
        let temp = TempDir::new().unwrap();
        let outcome = run_command_with_env(
            "sh -c \"echo $AFTERCARE_TEST_VAR\"",
            temp.path(),
            TIMEOUT,
            &[("AFTERCARE_TEST_VAR", "value-42")],
        );
        assert!(outcome.output.contains("value-42"));
    }
}
