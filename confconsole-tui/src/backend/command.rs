//! 外部命令执行

use std::process::{Command, Output};

use confconsole_core::{CoreError, CoreResult};

/// 运行命令并返回 stdout；非零退出视为失败
pub fn output(program: &str, args: &[&str]) -> CoreResult<String> {
    let out = run(program, args)?;
    if !out.status.success() {
        return Err(CoreError::Collaborator(failure_message(program, args, &out)));
    }
    Ok(String::from_utf8_lossy(&out.stdout).into_owned())
}

/// 运行命令；失败时返回给操作员看的消息而不是错误
pub fn refusal(program: &str, args: &[&str]) -> CoreResult<Option<String>> {
    let out = run(program, args)?;
    if out.status.success() {
        Ok(None)
    } else {
        Ok(Some(failure_message(program, args, &out)))
    }
}

fn run(program: &str, args: &[&str]) -> CoreResult<Output> {
    log::debug!("Running {program} {}", args.join(" "));
    Command::new(program)
        .args(args)
        .output()
        .map_err(|e| CoreError::Collaborator(format!("cannot run {program}: {e}")))
}

fn failure_message(program: &str, args: &[&str], out: &Output) -> String {
    let stderr = String::from_utf8_lossy(&out.stderr);
    let stderr = stderr.trim();
    let command = format!("{program} {}", args.join(" "));
    if stderr.is_empty() {
        format!("{} failed ({})", command.trim_end(), out.status)
    } else {
        format!("{} failed: {stderr}", command.trim_end())
    }
}
