use crate::error::{MediaError, Result};
use std::ffi::OsStr;
use std::process::{ExitStatus, Output, Stdio};
use tokio::process::Command;

/// 运行外部程序并收集输出
pub(crate) async fn capture<I, S>(program: &str, args: I) -> Result<Output>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    tracing::debug!("Running {}", program);
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|source| MediaError::Spawn {
            program: program.to_string(),
            source,
        })
}

/// 运行外部程序, 输出直接继承到终端
pub(crate) async fn status<I, S>(program: &str, args: I) -> Result<ExitStatus>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    tracing::debug!("Running {}", program);
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .status()
        .await
        .map_err(|source| MediaError::Spawn {
            program: program.to_string(),
            source,
        })
}

pub(crate) fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}
