// Script validation and tool-call types
//
// The model replies with a JSON array of {tool_name, tool_params} records.
// Parsing turns that into a closed set of tool calls up front so dispatch
// never runs against unvalidated input.

use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

/// One instruction in a generated script
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    /// Synthesize a spoken line for a host
    Speak { speaker: String, text: String },
    /// Insert a named sound effect
    Sfx { sound: String },
}

/// Wire shape of a script entry as produced by the model
#[derive(Debug, Deserialize)]
struct RawToolCall {
    tool_name: String,
    #[serde(default)]
    tool_params: HashMap<String, String>,
}

/// Script validation errors
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("invalid script JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("tool call {index} ({tool_name}) is missing required parameter '{param}'")]
    MissingParam {
        index: usize,
        tool_name: String,
        param: String,
    },
}

/// A validated script: the ordered tool calls plus any warnings recorded
/// while interpreting them
#[derive(Debug, Clone)]
pub struct Script {
    calls: Vec<ToolCall>,
    warnings: Vec<String>,
}

impl Script {
    /// Parse and validate a raw model reply.
    ///
    /// Unknown tool names are skipped with a recorded warning; a recognized
    /// tool missing a required parameter rejects the whole script.
    pub fn parse(raw: &str) -> Result<Self, ScriptError> {
        let raw_calls: Vec<RawToolCall> = serde_json::from_str(raw)?;

        let mut calls = Vec::with_capacity(raw_calls.len());
        let mut warnings = Vec::new();

        for (index, mut raw_call) in raw_calls.into_iter().enumerate() {
            match raw_call.tool_name.as_str() {
                "speak" => {
                    let speaker = take_param(&mut raw_call.tool_params, index, "speak", "speaker")?;
                    let text = take_param(&mut raw_call.tool_params, index, "speak", "text")?;
                    calls.push(ToolCall::Speak { speaker, text });
                }
                "sfx" => {
                    let sound = take_param(&mut raw_call.tool_params, index, "sfx", "sound")?;
                    calls.push(ToolCall::Sfx { sound });
                }
                other => {
                    warnings.push(format!("Unknown tool '{}' at index {} skipped", other, index));
                }
            }
        }

        Ok(Self { calls, warnings })
    }

    /// Tool calls in script order
    pub fn calls(&self) -> &[ToolCall] {
        &self.calls
    }

    /// Warnings recorded during validation
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Number of spoken lines
    pub fn speak_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, ToolCall::Speak { .. }))
            .count()
    }

    /// Number of sound effects
    pub fn sfx_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, ToolCall::Sfx { .. }))
            .count()
    }
}

fn take_param(
    params: &mut HashMap<String, String>,
    index: usize,
    tool_name: &str,
    param: &str,
) -> Result<String, ScriptError> {
    params.remove(param).ok_or_else(|| ScriptError::MissingParam {
        index,
        tool_name: tool_name.to_string(),
        param: param.to_string(),
    })
}
