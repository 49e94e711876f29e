//! The ffmpeg transform invoker.
//!
//! Each job gets its own temporary directory: the input voice file is staged
//! there, ffmpeg writes its output there, and dropping the directory removes
//! both on every exit path (success, engine failure, timeout). The caller
//! receives owned output bytes, so no temporary outlives the call.

use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use crate::config::AppConfig;
use crate::effects::Effect;
use crate::error::{BotError, Result};

pub struct Transformer {
    ffmpeg_path: String,
    timeout: Duration,
}

impl Transformer {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            ffmpeg_path: config.ffmpeg_path.clone(),
            timeout: Duration::from_secs(config.transform_timeout_secs),
        }
    }

    /// Apply `effect` to an OGG/Opus voice recording, returning the
    /// transformed OGG/Opus bytes.
    pub async fn apply(&self, effect: &Effect, input: &[u8]) -> Result<Vec<u8>> {
        let dir = tempfile::tempdir()?;
        let input_path = dir.path().join("input.ogg");
        let output_path = dir.path().join("output.ogg");

        tokio::fs::write(&input_path, input).await?;

        let mut cmd = Command::new(&self.ffmpeg_path);
        cmd.args(ffmpeg_args(effect, &input_path, &output_path))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| BotError::Transform("timeout".to_string()))?
            .map_err(|e| BotError::Transform(format!("failed to launch ffmpeg: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BotError::Transform(format!(
                "ffmpeg exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let bytes = tokio::fs::read(&output_path)
            .await
            .map_err(|_| BotError::Transform("ffmpeg produced no output file".to_string()))?;

        Ok(bytes)
    }
}

/// The full ffmpeg argument list for one transform job.
fn ffmpeg_args(effect: &Effect, input: &Path, output: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-hide_banner".into(),
        "-loglevel".into(),
        "error".into(),
        "-y".into(),
        "-i".into(),
        input.as_os_str().to_os_string(),
        "-af".into(),
        effect.filter_graph().into(),
        "-acodec".into(),
        "libopus".into(),
        "-f".into(),
        "ogg".into(),
    ];
    args.push(output.as_os_str().to_os_string());
    args
}
