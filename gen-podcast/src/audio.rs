// Audio assembly via ffmpeg

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::NamedTempFile;

/// Audio-assembly collaborator: collect clips in order, then compile them
/// into one file.
pub trait AudioAssembler: Send + Sync {
    /// Add a clip to the end of the timeline. Fails if the file is absent.
    fn add_clip(&mut self, path: &Path) -> Result<()>;

    /// Concatenate the added clips into `output`. Consumes the added clips,
    /// leaving the assembler empty for reuse.
    fn compile(&mut self, output: &Path) -> Result<()>;
}

/// Assembler backed by ffmpeg's concat demuxer
#[derive(Debug, Default)]
pub struct FfmpegTimeline {
    clips: Vec<PathBuf>,
}

impl FfmpegTimeline {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioAssembler for FfmpegTimeline {
    fn add_clip(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            bail!("Clip not found: {}", path.display());
        }

        // Absolute paths so the concat list works regardless of cwd
        let clip = path
            .canonicalize()
            .with_context(|| format!("Failed to resolve clip path: {}", path.display()))?;
        self.clips.push(clip);
        Ok(())
    }

    fn compile(&mut self, output: &Path) -> Result<()> {
        let clips: Vec<PathBuf> = self.clips.drain(..).collect();
        if clips.is_empty() {
            bail!("No clips to compile");
        }

        let mut list = String::new();
        for clip in &clips {
            list.push_str(&concat_entry(clip));
        }

        let list_file =
            NamedTempFile::with_suffix(".txt").context("Failed to create concat list file")?;
        std::fs::write(list_file.path(), &list).context("Failed to write concat list file")?;

        let result = Command::new("ffmpeg")
            .args(["-f", "concat", "-safe", "0", "-i"])
            .arg(list_file.path())
            .args(["-c:a", "libmp3lame", "-q:a", "2", "-y"])
            .arg(output)
            .output()
            .context("Failed to run ffmpeg. Is ffmpeg installed?")?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            bail!("ffmpeg compilation failed: {}", stderr);
        }

        Ok(())
    }
}

/// One line of an ffmpeg concat list, with single quotes escaped
fn concat_entry(path: &Path) -> String {
    let escaped = path.display().to_string().replace('\'', "'\\''");
    format!("file '{}'\n", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn ffmpeg_available() -> bool {
        Command::new("ffmpeg")
            .arg("-version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn generate_tone(path: &Path) -> bool {
        Command::new("ffmpeg")
            .args(["-f", "lavfi", "-i", "sine=frequency=440:duration=0.2", "-y"])
            .arg(path)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    #[test]
    fn test_add_clip_missing_file_fails() {
        let mut timeline = FfmpegTimeline::new();
        let result = timeline.add_clip(Path::new("/nonexistent/clip.mp3"));
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Clip not found"));
    }

    #[test]
    fn test_add_clip_existing_file() {
        let dir = TempDir::new().unwrap();
        let clip = dir.path().join("clip.mp3");
        fs::write(&clip, b"fake").unwrap();

        let mut timeline = FfmpegTimeline::new();
        timeline.add_clip(&clip).unwrap();
        assert_eq!(timeline.clips.len(), 1);
    }

    #[test]
    fn test_compile_with_no_clips_fails() {
        let dir = TempDir::new().unwrap();
        let mut timeline = FfmpegTimeline::new();
        let result = timeline.compile(&dir.path().join("out.mp3"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("No clips"));
    }

    #[test]
    fn test_concat_entry_escapes_single_quotes() {
        let entry = concat_entry(Path::new("/tmp/it's here.mp3"));
        assert_eq!(entry, "file '/tmp/it'\\''s here.mp3'\n");
    }

    #[test]
    fn test_compile_concatenates_clips() {
        if !ffmpeg_available() {
            return;
        }

        let dir = TempDir::new().unwrap();
        let first = dir.path().join("first.mp3");
        let second = dir.path().join("second.mp3");
        if !generate_tone(&first) || !generate_tone(&second) {
            return;
        }

        let mut timeline = FfmpegTimeline::new();
        timeline.add_clip(&first).unwrap();
        timeline.add_clip(&second).unwrap();

        let output = dir.path().join("compiled.mp3");
        timeline.compile(&output).unwrap();

        assert!(output.exists());
        assert!(fs::metadata(&output).unwrap().len() > 0);
        // Clips were consumed by the compile
        assert!(timeline.clips.is_empty());
    }
}
