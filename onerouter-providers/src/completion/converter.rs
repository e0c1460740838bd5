//! Request conversion for the completion endpoint

use crate::completion::prompt::{convert_to_completion_prompt, CompletionPrompt};
use crate::completion::settings::CompletionSettings;
use crate::traits::{RequestArgs, RequestConverter};
use onerouter_core::{CallOptions, Error, Mode};
use serde_json::{Map, Value};

/// Converts call options to the completion request body
#[derive(Debug, Clone)]
pub struct CompletionConverter {
    pub(crate) model_id: String,
    pub(crate) settings: CompletionSettings,
    pub(crate) extra_body: Map<String, Value>,
}

impl CompletionConverter {
    /// Create a converter for one model
    pub fn new(
        model_id: impl Into<String>,
        settings: CompletionSettings,
        extra_body: Map<String, Value>,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            settings,
            extra_body,
        }
    }
}

impl RequestConverter for CompletionConverter {
    fn convert_request(&self, options: &CallOptions) -> Result<RequestArgs, Error> {
        let CompletionPrompt {
            prompt,
            stop_sequences,
        } = convert_to_completion_prompt(&options.prompt, options.input_format)?;

        let mut args = RequestArgs::default();

        // model id
        args.set("model", Some(&self.model_id))?;

        // model specific settings
        args.set("echo", self.settings.echo)?;
        args.set("logit_bias", self.settings.logit_bias.as_ref())?;
        args.set("logprobs", self.settings.logprobs_value())?;
        args.set("suffix", self.settings.suffix.as_deref())?;
        args.set("user", self.settings.user.as_deref())?;

        // standardized settings
        args.set("max_tokens", options.max_tokens)?;
        args.set("temperature", options.temperature)?;
        args.set("top_p", options.top_p)?;
        args.set("frequency_penalty", options.frequency_penalty)?;
        args.set("presence_penalty", options.presence_penalty)?;
        args.set("seed", options.seed)?;
        if options.top_k.is_some() {
            args.warn_unsupported("top_k");
        }

        args.set("prompt", Some(prompt))?;

        let stop: Vec<String> = stop_sequences
            .into_iter()
            .chain(options.stop_sequences.iter().cloned())
            .collect();
        args.set("stop", (!stop.is_empty()).then_some(stop))?;

        args.merge(&self.extra_body);

        match &options.mode {
            Mode::Regular { tools, tool_choice } => {
                if !tools.is_empty() {
                    return Err(Error::unsupported("tools"));
                }
                if tool_choice.is_some() {
                    return Err(Error::unsupported("toolChoice"));
                }
                Ok(args)
            }
            Mode::ObjectJson { .. } => Err(Error::unsupported("object-json mode")),
            Mode::ObjectTool { .. } => Err(Error::unsupported("object-tool mode")),
            Mode::ObjectGrammar { .. } => Err(Error::unsupported("object-grammar mode")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logprobs::Logprobs;
    use onerouter_core::{CallWarning, Message, Tool, ToolChoice};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashMap;

    fn converter(settings: CompletionSettings) -> CompletionConverter {
        CompletionConverter::new("openai/gpt-3.5-turbo-instruct", settings, Map::new())
    }

    #[test]
    fn test_sampling_parameters_map_to_upstream_fields() {
        let options = CallOptions::builder()
            .prompt("Hello")
            .max_tokens(64)
            .temperature(0.3)
            .top_p(0.8)
            .frequency_penalty(0.25)
            .presence_penalty(-0.5)
            .seed(7)
            .build();

        let args = converter(CompletionSettings::default())
            .convert_request(&options)
            .unwrap();

        assert_eq!(
            args.to_value(),
            json!({
                "model": "openai/gpt-3.5-turbo-instruct",
                "prompt": "Hello",
                "max_tokens": 64,
                "temperature": 0.3,
                "top_p": 0.8,
                "frequency_penalty": 0.25,
                "presence_penalty": -0.5,
                "seed": 7
            })
        );
        assert!(args.warnings.is_empty());
    }

    #[test]
    fn test_absent_parameters_are_omitted() {
        let args = converter(CompletionSettings::default())
            .convert_request(&CallOptions::from_prompt("Hi"))
            .unwrap();

        assert_eq!(
            args.to_value(),
            json!({"model": "openai/gpt-3.5-turbo-instruct", "prompt": "Hi"})
        );
    }

    #[test]
    fn test_model_settings() {
        let settings = CompletionSettings::new()
            .with_echo(true)
            .with_logit_bias(HashMap::from([("50256".to_string(), -100.0)]))
            .with_logprobs(Logprobs::Enabled(true))
            .with_suffix("END")
            .with_user("user-1");

        let args = converter(settings)
            .convert_request(&CallOptions::from_prompt("Hi"))
            .unwrap();

        assert_eq!(args.body["echo"], json!(true));
        assert_eq!(args.body["logit_bias"], json!({"50256": -100.0}));
        assert_eq!(args.body["logprobs"], json!(0));
        assert_eq!(args.body["suffix"], json!("END"));
        assert_eq!(args.body["user"], json!("user-1"));
    }

    #[test]
    fn test_stop_sequences_follow_prompt_conversion() {
        let options = CallOptions::builder()
            .message(Message::user("Hi"))
            .stop_sequences(["###"])
            .build();

        let args = converter(CompletionSettings::default())
            .convert_request(&options)
            .unwrap();

        assert_eq!(args.body["prompt"], json!("user:\nHi\n\nassistant:\n"));
        assert_eq!(args.body["stop"], json!(["\nuser:", "###"]));
    }

    #[test]
    fn test_extra_body_is_merged() {
        let extra = json!({"transforms": ["middle-out"], "temperature": 1.0});
        let converter = CompletionConverter::new(
            "m",
            CompletionSettings::default(),
            extra.as_object().unwrap().clone(),
        );
        let options = CallOptions::builder().prompt("Hi").temperature(0.1).build();

        let args = converter.convert_request(&options).unwrap();
        assert_eq!(args.body["transforms"], json!(["middle-out"]));
        assert_eq!(args.body["temperature"], json!(1.0));
    }

    #[test]
    fn test_top_k_produces_warning() {
        let options = CallOptions::builder().prompt("Hi").top_k(40).build();
        let args = converter(CompletionSettings::default())
            .convert_request(&options)
            .unwrap();

        assert!(!args.body.contains_key("top_k"));
        assert_eq!(
            args.warnings,
            vec![CallWarning::UnsupportedSetting {
                setting: "top_k".into(),
                details: None
            }]
        );
    }

    #[test]
    fn test_unsupported_modes_fail() {
        let converter = converter(CompletionSettings::default());
        let unsupported = |options: CallOptions| match converter.convert_request(&options) {
            Err(Error::UnsupportedFunctionality { functionality }) => functionality,
            other => panic!("Expected UnsupportedFunctionality, got {:?}", other),
        };

        let tool = Tool::function("lookup", json!({"type": "object"}));

        assert_eq!(
            unsupported(CallOptions::builder().prompt("Hi").tool(tool.clone()).build()),
            "tools"
        );
        assert_eq!(
            unsupported(
                CallOptions::builder()
                    .prompt("Hi")
                    .tool_choice(ToolChoice::Auto)
                    .build()
            ),
            "toolChoice"
        );
        assert_eq!(
            unsupported(
                CallOptions::builder()
                    .prompt("Hi")
                    .mode(Mode::ObjectJson {
                        schema: None,
                        name: None,
                        description: None
                    })
                    .build()
            ),
            "object-json mode"
        );
        assert_eq!(
            unsupported(
                CallOptions::builder()
                    .prompt("Hi")
                    .mode(Mode::ObjectTool { tool })
                    .build()
            ),
            "object-tool mode"
        );
        assert_eq!(
            unsupported(
                CallOptions::builder()
                    .prompt("Hi")
                    .mode(Mode::ObjectGrammar {
                        grammar: "root ::= \"yes\"".into()
                    })
                    .build()
            ),
            "object-grammar mode"
        );
    }
}
