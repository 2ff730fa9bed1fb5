//! External process execution
//!
//! Commands are always given as a program plus a structured argument list.
//! A non-zero exit is not an error here: it is reported in [`CommandOutput`]
//! and each caller decides whether the step may fail.

use crate::core::error::{GitError, PodResult, ResultExt};
use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

/// Captured result of one external command
#[derive(Debug, Clone)]
pub struct CommandOutput {
  pub program: String,
  pub args: Vec<String>,
  /// Exit code, `None` when terminated by a signal
  pub status: Option<i32>,
  pub success: bool,
  pub stdout: String,
  pub stderr: String,
}

impl CommandOutput {
  /// The invoked command line, for display
  pub fn command_line(&self) -> String {
    command_line(&self.program, &self.args)
  }

  /// Turn an unsuccessful run into a `GitError::CommandFailed`
  pub fn into_checked(self) -> PodResult<Self> {
    if self.success {
      return Ok(self);
    }
    Err(
      GitError::CommandFailed {
        command: self.command_line(),
        status: self.status,
        stderr: self.stderr,
      }
      .into(),
    )
  }
}

/// Run `cmd` to completion, capturing stdout and stderr
///
/// With `echo`, prints `running: "<command line>"` before and the captured
/// stdout (when non-empty) after.
pub fn run_command(mut cmd: Command, echo: bool) -> PodResult<CommandOutput> {
  let program = cmd.get_program().to_string_lossy().into_owned();
  let args: Vec<String> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
  let line = command_line(&program, &args);

  if echo {
    println!("running: \"{}\"", line);
  }

  let output = cmd.output().with_context(|| format!("Failed to execute {}", line))?;

  let result = CommandOutput {
    program,
    args,
    status: output.status.code(),
    success: output.status.success(),
    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
  };

  tracing::debug!(
    command = %line,
    status = ?result.status,
    stdout_bytes = result.stdout.len(),
    stderr_bytes = result.stderr.len(),
    "command finished"
  );

  if echo && !result.stdout.is_empty() {
    println!("{}", result.stdout);
  }

  Ok(result)
}

/// Run `program args...` inside `dir`
pub fn run<I, S>(dir: &Path, program: &str, args: I, echo: bool) -> PodResult<CommandOutput>
where
  I: IntoIterator<Item = S>,
  S: AsRef<OsStr>,
{
  let mut cmd = Command::new(program);
  cmd.current_dir(dir).args(args);
  run_command(cmd, echo)
}

fn command_line(program: &str, args: &[String]) -> String {
  let mut line = program.to_string();
  for arg in args {
    line.push(' ');
    line.push_str(arg);
  }
  line
}
