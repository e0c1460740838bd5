//! Mapping of upstream finish reasons

use onerouter_core::FinishReason;

/// Map an upstream `finish_reason` string
pub fn map_finish_reason(reason: Option<&str>) -> FinishReason {
    match reason {
        Some("stop") => FinishReason::Stop,
        Some("length") => FinishReason::Length,
        Some("content_filter") => FinishReason::ContentFilter,
        Some("function_call" | "tool_calls") => FinishReason::ToolCalls,
        _ => FinishReason::Unknown,
    }
}
