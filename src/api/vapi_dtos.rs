use serde::{Deserialize, Serialize};

// Inbound webhook wire types. VAPI wraps every event in a `message` object
// with a `type` discriminant.

#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    pub message: WebhookMessage,
}

#[derive(Debug, Deserialize)]
pub struct WebhookMessage {
    #[serde(rename = "type")]
    pub message_type: String,
    #[serde(rename = "toolCalls")]
    pub tool_calls: Option<Vec<ToolCall>>,
    pub call: Option<PhoneCall>,
    pub customer: Option<Customer>,
}

#[derive(Debug, Deserialize)]
pub struct PhoneCall {
    pub id: String,
    #[serde(rename = "assistantId")]
    pub assistant_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Customer {
    pub name: Option<String>,
    pub number: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub r#type: String,
    pub function: Function,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Function {
    pub name: String,
    pub arguments: FunctionArguments,
}

/// Arguments a tool call may carry. Only `createAssistant` is meaningful
/// today, so only its `assistant` description argument is modeled.
#[derive(Debug, Clone, Deserialize)]
pub struct FunctionArguments {
    pub assistant: Option<String>,
}

impl WebhookPayload {
    pub fn get_phone_number(&self) -> Option<String> {
        self.message
            .customer
            .as_ref()
            .and_then(|c| c.number.clone())
    }

    pub fn get_request_type(&self) -> String {
        self.message.message_type.clone()
    }

    pub fn get_tool_calls(&self) -> Option<&Vec<ToolCall>> {
        self.message.tool_calls.as_ref()
    }
}

// Outbound wire types.

#[derive(Debug, Serialize)]
pub struct AssistantRequestResponse {
    pub assistant: Assistant,
}

#[derive(Debug, Serialize)]
pub struct ToolCallResults {
    pub results: Vec<ToolCallResult>,
}

#[derive(Debug, Serialize)]
pub struct ToolCallResult {
    #[serde(rename = "toolCallId")]
    pub tool_call_id: String,
    pub result: String,
}

/// A transient assistant configuration, serialized in the shape VAPI expects
/// for an `assistant-request` response. Built fresh per request and never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assistant {
    pub name: String,
    pub model: ModelConfig,
    pub voice: VoiceConfig,
    pub transcriber: TranscriberConfig,
    #[serde(rename = "firstMessage", skip_serializing_if = "Option::is_none")]
    pub first_message: Option<String>,
    #[serde(rename = "firstMessageMode", skip_serializing_if = "Option::is_none")]
    pub first_message_mode: Option<FirstMessageMode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FirstMessageMode {
    AssistantSpeaksFirst,
    AssistantSpeaksFirstWithModelGeneratedMessage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub model: String,
    pub provider: String,
    pub messages: Vec<SystemMessage>,
    #[serde(rename = "toolIds")]
    pub tool_ids: Vec<String>,
    pub tools: Vec<TransferTool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferTool {
    pub r#type: String,
    pub destinations: Vec<TransferDestination>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferDestination {
    pub r#type: String,
    pub number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceConfig {
    pub model: String,
    #[serde(rename = "voiceId")]
    pub voice_id: String,
    pub provider: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriberConfig {
    pub model: String,
    pub language: String,
    pub provider: String,
}
