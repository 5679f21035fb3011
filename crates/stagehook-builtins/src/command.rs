//! `command.run_command`: runs an external command.

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;

use serde::Deserialize;
use serde_json::json;
use stagehook_engine::prelude::*;
use tokio::process::Command;

/// A command given either as a shell line or as an argument vector.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CommandLine {
    /// Run through the platform shell.
    Shell(String),
    /// Run directly; the first element is the program.
    Argv(Vec<String>),
}

/// Arguments of `run_command`.
#[derive(Debug, Clone, Deserialize)]
pub struct RunCommandArgs {
    /// Command to run.
    pub command: CommandLine,
    /// Working directory.
    #[serde(default)]
    pub cwd: Option<PathBuf>,
    /// Extra environment variables.
    #[serde(default)]
    pub env: HashMap<String, String>,
    /// Return stdout and stderr in the result.
    #[serde(default)]
    pub capture_output: bool,
    /// Succeed even when the command exits non-zero.
    #[serde(default)]
    pub ignore_status: bool,
    /// Discard output that is not captured.
    #[serde(default)]
    pub quiet: bool,
}

impl RunCommandArgs {
    fn build(&self) -> AppResult<Command> {
        let mut cmd = match &self.command {
            CommandLine::Shell(line) if cfg!(target_os = "windows") => {
                let mut cmd = Command::new("cmd");
                cmd.arg("/C").arg(line);
                cmd
            }
            CommandLine::Shell(line) => {
                let mut cmd = Command::new("sh");
                cmd.arg("-c").arg(line);
                cmd
            }
            CommandLine::Argv(argv) => {
                let (program, rest) = argv
                    .split_first()
                    .ok_or_else(|| AppError::invocation("command must not be empty"))?;
                let mut cmd = Command::new(program);
                cmd.args(rest);
                cmd
            }
        };

        let output = || {
            if self.capture_output {
                Stdio::piped()
            } else if self.quiet {
                Stdio::null()
            } else {
                Stdio::inherit()
            }
        };

        cmd.stdin(Stdio::null())
            .stdout(output())
            .stderr(output())
            .envs(&self.env)
            .kill_on_drop(true);

        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }

        Ok(cmd)
    }
}

/// Runs a command and returns `{returncode, stdout?, stderr?}`.
///
/// A non-zero exit is a failure unless `ignore_status` is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunCommand;

#[async_trait]
impl HookFunction for RunCommand {
    async fn call(&self, call: HookCall<'_>) -> AppResult<Value> {
        let args: RunCommandArgs = serde_json::from_value(Value::Object(call.args))
            .map_err(|e| AppError::invocation(format!("Invalid run_command args: {e}")))?;

        tracing::info!(command = ?args.command, cwd = ?args.cwd, "Running command");

        let output = args.build()?.output().await.map_err(|e| {
            AppError::invocation(format!("Failed to run command {:?}: {e}", args.command))
        })?;

        let returncode = output.status.code().unwrap_or(-1);
        if !output.status.success() && !args.ignore_status {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::error!(
                command = ?args.command,
                returncode,
                stderr = %stderr.chars().take(500).collect::<String>(),
                "Command failed"
            );
            return Err(AppError::invocation(format!(
                "Command {:?} exited with status {returncode}",
                args.command
            )));
        }

        let mut result = json!({ "returncode": returncode });
        if args.capture_output {
            result["stdout"] = Value::String(String::from_utf8_lossy(&output.stdout).into_owned());
            result["stderr"] = Value::String(String::from_utf8_lossy(&output.stderr).into_owned());
        }
        Ok(result)
    }
}
