// Podcast pipeline: script generation, audio assembly, finalization

use anyhow::{Context, Result, anyhow};
use openai_client::{CompletionProvider, CompletionRequest, SpeechProvider, SpeechRequest};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::assets;
use crate::audio::AudioAssembler;
use crate::config::PodcastConfig;
use crate::prompts;
use crate::script::{Script, ToolCall};

const SCRIPT_PROMPT_ASSET: &str = "scripts/ai_script_gen_prompt.md";
const USER_PROMPT_ASSET: &str = "scripts/user_prompt.md";
const INTRO_ASSET: &str = "sounds/intro.mp3";
const OUTRO_ASSET: &str = "sounds/outro.mp3";

/// Sampling temperature for both completion calls
const COMPLETION_TEMPERATURE: f32 = 0.2;
/// Speech is synthesized slightly faster than normal
const TTS_SPEED: f32 = 1.05;
/// Used when sanitization leaves nothing of the generated title
const FALLBACK_TITLE: &str = "untitled-podcast";

/// The podcast pipeline.
///
/// Stages run strictly in order: `generate_script`, `assemble_audio`,
/// `finalize`. State between stages lives on the instance: the validated
/// script, the retained topic text for title generation, and the temporary
/// clips owned until cleanup.
pub struct PodcastMaker {
    completion: Box<dyn CompletionProvider>,
    speech: Box<dyn SpeechProvider>,
    assembler: Box<dyn AudioAssembler>,
    assets_dir: PathBuf,
    staging_dir: PathBuf,
    output_dir: PathBuf,
    script_model: String,
    title_model: String,
    tts_model: String,
    script: Option<Script>,
    title_context: Option<String>,
    temp_clips: Vec<PathBuf>,
}

impl PodcastMaker {
    pub fn new(
        completion: Box<dyn CompletionProvider>,
        speech: Box<dyn SpeechProvider>,
        assembler: Box<dyn AudioAssembler>,
        config: &PodcastConfig,
    ) -> Self {
        Self {
            completion,
            speech,
            assembler,
            assets_dir: config.assets_dir.clone(),
            staging_dir: config.staging_dir.clone(),
            output_dir: config.output_dir.clone(),
            script_model: config.script_model.clone(),
            title_model: config.title_model.clone(),
            tts_model: config.tts_model.clone(),
            script: None,
            title_context: None,
            temp_clips: Vec::new(),
        }
    }

    /// Generate and validate a podcast script for the topic.
    ///
    /// Retains the topic and key points for later title generation. A reply
    /// that fails validation surfaces as a [`crate::script::ScriptError`];
    /// the caller decides whether to abort or retry.
    pub async fn generate_script(
        &mut self,
        topic: &str,
        length: &str,
        key_points: &[String],
    ) -> Result<&Script> {
        let length = length.to_lowercase();
        let system_prompt = assets::load_asset(
            &self.assets_dir,
            SCRIPT_PROMPT_ASSET,
            &[("LEN_DEF_WORD_ENGLISH", length.as_str())],
        )?;
        let mut user_prompt = assets::load_asset(
            &self.assets_dir,
            USER_PROMPT_ASSET,
            &[
                ("PODCAST_TOPIC", topic),
                ("LEN_DEF_WORD_ENGLISH", length.as_str()),
            ],
        )?;
        user_prompt.push_str(&prompts::key_points_block(key_points));

        log::debug!("Requesting script from {}", self.completion.name());
        let response = self
            .completion
            .complete(CompletionRequest {
                system_prompt,
                user_prompt,
                model: self.script_model.clone(),
                temperature: COMPLETION_TEMPERATURE,
            })
            .await
            .context("Script generation request failed")?;

        if let Some(usage) = response.usage {
            log::debug!(
                "Script tokens: {} in, {} out",
                usage.input_tokens,
                usage.output_tokens
            );
        }

        let script = Script::parse(&response.content)?;

        let mut title_context = topic.to_string();
        for point in key_points {
            title_context.push_str(", ");
            title_context.push_str(point);
        }
        self.title_context = Some(title_context);

        Ok(self.script.insert(script))
    }

    /// Synthesize every spoken line, look up sound effects, and compile
    /// intro + generated clips + outro into one mp3 in the staging
    /// directory.
    ///
    /// A missing clip file is skipped with a warning so one bad sfx
    /// reference does not abort the compilation.
    pub async fn assemble_audio(&mut self) -> Result<PathBuf> {
        let calls: Vec<ToolCall> = self
            .script
            .as_ref()
            .ok_or_else(|| anyhow!("No script generated yet"))?
            .calls()
            .to_vec();
        log::debug!(
            "Dispatching {} tool calls via {}",
            calls.len(),
            self.speech.name()
        );

        fs::create_dir_all(&self.staging_dir).with_context(|| {
            format!(
                "Failed to create staging directory: {}",
                self.staging_dir.display()
            )
        })?;

        let mut clips = vec![self.assets_dir.join(INTRO_ASSET)];

        for call in calls {
            match call {
                ToolCall::Speak { speaker, text } => {
                    let clip = self.staging_dir.join(format!("{}.mp3", Uuid::new_v4()));
                    let request = SpeechRequest {
                        model: self.tts_model.clone(),
                        input: text,
                        voice: voice_for_speaker(&speaker).to_string(),
                        speed: TTS_SPEED,
                    };
                    self.speech
                        .synthesize(request, &clip)
                        .await
                        .with_context(|| format!("Speech synthesis failed for '{}'", speaker))?;
                    clips.push(clip.clone());
                    self.temp_clips.push(clip);
                }
                ToolCall::Sfx { sound } => {
                    if !sound.is_empty() {
                        clips.push(self.assets_dir.join(sfx_asset(&sound)));
                    }
                }
            }
        }

        clips.push(self.assets_dir.join(OUTRO_ASSET));

        let mut skipped = 0usize;
        for clip in &clips {
            if let Err(err) = self.assembler.add_clip(clip) {
                log::warn!("Skipping clip {}: {}", clip.display(), err);
                skipped += 1;
            }
        }
        if skipped > 0 {
            log::warn!(
                "{} of {} clips were skipped during assembly",
                skipped,
                clips.len()
            );
        }

        let compiled = self
            .staging_dir
            .join(format!("compiled-{}.mp3", Uuid::new_v4()));
        self.assembler
            .compile(&compiled)
            .context("Audio compilation failed")?;

        Ok(compiled)
    }

    /// Title the podcast and move it into the output directory.
    ///
    /// Temporary clips are deleted whether or not the title request or the
    /// move succeeds; cleanup failures are logged, never escalated. A failed
    /// move leaves the compiled file in place and returns its path.
    pub async fn finalize(&mut self, compiled: &Path) -> Result<PathBuf> {
        let result = self.title_and_move(compiled).await;
        self.remove_temp_clips();
        result
    }

    async fn title_and_move(&mut self, compiled: &Path) -> Result<PathBuf> {
        let title_context = self
            .title_context
            .clone()
            .ok_or_else(|| anyhow!("No script generated yet"))?;

        let response = self
            .completion
            .complete(CompletionRequest {
                system_prompt: prompts::TITLE_SYSTEM_PROMPT.to_string(),
                user_prompt: title_context,
                model: self.title_model.clone(),
                temperature: COMPLETION_TEMPERATURE,
            })
            .await
            .context("Title generation request failed")?;

        if let Some(usage) = response.usage {
            log::debug!(
                "Title tokens: {} in, {} out",
                usage.input_tokens,
                usage.output_tokens
            );
        }

        let mut title = sanitize_title(&response.content);
        if title.is_empty() {
            title = FALLBACK_TITLE.to_string();
        }

        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "Failed to create output directory: {}",
                self.output_dir.display()
            )
        })?;

        let final_path = self.output_dir.join(format!("{}.mp3", title));
        match fs::rename(compiled, &final_path) {
            Ok(()) => Ok(final_path),
            Err(err) => {
                log::warn!(
                    "Failed to move {} to {}: {}",
                    compiled.display(),
                    final_path.display(),
                    err
                );
                Ok(compiled.to_path_buf())
            }
        }
    }

    fn remove_temp_clips(&mut self) {
        for clip in self.temp_clips.drain(..) {
            if let Err(err) = fs::remove_file(&clip) {
                log::warn!(
                    "Failed to remove temporary clip {}: {}",
                    clip.display(),
                    err
                );
            }
        }
    }
}

/// Map a host name to a TTS voice, defaulting for unknown hosts
fn voice_for_speaker(speaker: &str) -> &'static str {
    match speaker.to_lowercase().as_str() {
        "jake" => "onyx",
        "luna" => "nova",
        _ => "alloy",
    }
}

/// Relative asset path for a named sound effect
fn sfx_asset(sound: &str) -> String {
    format!("sounds/sfx/{}.mp3", sound)
}

/// Keep only alphanumerics, spaces, underscores, and hyphens, then trim
fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect::<String>()
        .trim()
        .to_string()
}
