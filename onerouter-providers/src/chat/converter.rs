//! Request conversion for the chat endpoint

use crate::chat::prompt::convert_to_chat_messages;
use crate::chat::settings::ChatSettings;
use crate::traits::{RequestArgs, RequestConverter};
use onerouter_core::{CallOptions, Error, Mode, Tool, ToolChoice};
use serde_json::{json, Map, Value};

/// Converts call options to the chat request body
#[derive(Debug, Clone)]
pub struct ChatConverter {
    pub(crate) model_id: String,
    pub(crate) settings: ChatSettings,
    pub(crate) extra_body: Map<String, Value>,
}

impl ChatConverter {
    /// Create a converter for one model
    pub fn new(model_id: impl Into<String>, settings: ChatSettings, extra_body: Map<String, Value>) -> Self {
        Self {
            model_id: model_id.into(),
            settings,
            extra_body,
        }
    }
}

impl RequestConverter for ChatConverter {
    fn convert_request(&self, options: &CallOptions) -> Result<RequestArgs, Error> {
        let mut args = RequestArgs::default();

        args.set("model", Some(&self.model_id))?;

        args.set("logit_bias", self.settings.logit_bias.as_ref())?;
        args.set("logprobs", self.settings.logprobs_enabled())?;
        args.set("top_logprobs", self.settings.top_logprobs())?;
        args.set("user", self.settings.user.as_deref())?;
        args.set("parallel_tool_calls", self.settings.parallel_tool_calls)?;

        args.set("max_tokens", options.max_tokens)?;
        args.set("temperature", options.temperature)?;
        args.set("top_p", options.top_p)?;
        args.set("frequency_penalty", options.frequency_penalty)?;
        args.set("presence_penalty", options.presence_penalty)?;
        args.set("seed", options.seed)?;
        if options.top_k.is_some() {
            args.warn_unsupported("top_k");
        }
        args.set(
            "stop",
            (!options.stop_sequences.is_empty()).then_some(&options.stop_sequences),
        )?;

        args.set("messages", Some(convert_to_chat_messages(&options.prompt)))?;

        match &options.mode {
            Mode::Regular { tools, tool_choice } => {
                if !tools.is_empty() {
                    let tools: Vec<Value> = tools.iter().map(convert_tool).collect();
                    args.set("tools", Some(tools))?;
                    args.set("tool_choice", tool_choice.as_ref().map(convert_tool_choice))?;
                }
            }
            Mode::ObjectJson { .. } => {
                args.set("response_format", Some(json!({"type": "json_object"})))?;
            }
            Mode::ObjectTool { tool } => {
                args.set("tools", Some(vec![convert_tool(tool)]))?;
                args.set(
                    "tool_choice",
                    Some(convert_tool_choice(&ToolChoice::Tool {
                        tool_name: tool.name.clone(),
                    })),
                )?;
            }
            Mode::ObjectGrammar { .. } => {
                return Err(Error::unsupported("object-grammar mode"));
            }
        }

        args.merge(&self.extra_body);

        Ok(args)
    }
}

fn convert_tool(tool: &Tool) -> Value {
    let mut function = json!({
        "name": tool.name,
        "parameters": tool.parameters,
    });
    if let Some(description) = &tool.description {
        function["description"] = json!(description);
    }
    json!({"type": "function", "function": function})
}

fn convert_tool_choice(choice: &ToolChoice) -> Value {
    match choice {
        ToolChoice::Auto => json!("auto"),
        ToolChoice::None => json!("none"),
        ToolChoice::Required => json!("required"),
        ToolChoice::Tool { tool_name } => json!({
            "type": "function",
            "function": {"name": tool_name}
        }),
    }
}
