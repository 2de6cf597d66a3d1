use crate::api::vapi_dtos::{
    Assistant, FirstMessageMode, ModelConfig, SystemMessage, TranscriberConfig, TransferDestination,
    TransferTool, VoiceConfig,
};

const COMPLETION_MODEL: &str = "gpt-4o-mini";
const MODEL_PROVIDER: &str = "openai";

// VAPI tool id of the createAssistant tool, attached to both variants.
const CREATE_ASSISTANT_TOOL_ID: &str = "d137092e-0250-4151-abf0-205ff2b0a438";

const VOICE_MODEL: &str = "sonic-english";
const VOICE_ID: &str = "248be419-c632-4f23-adf1-5324ed7dbf1d";
const VOICE_PROVIDER: &str = "cartesia";

const TRANSCRIBER_MODEL: &str = "general";
const TRANSCRIBER_LANGUAGE: &str = "en";
const TRANSCRIBER_PROVIDER: &str = "deepgram";

pub const GENERATOR_GREETING: &str = "Hello! How can I assist you today?";

/// System turn sent to the chat-completion API when turning a cached caller
/// description into a custom system prompt.
pub const PROMPT_ENGINEER_INSTRUCTION: &str = "You are a prompt engineer. Generate a system prompt \
    for an AI assistant based on this description. The prompt should be concise and clear.";

/// The default assistant handed out when no description is cached for the
/// caller. Its whole job is to collect a description, call createAssistant
/// and transfer the caller back so the next resolve picks the custom one.
pub fn generator_assistant(return_number: &str) -> Assistant {
    let prompt = format!(
        "You are a helpful assistant. Greet the caller and ask how you can help them today. \
         They will tell you an agent that they want to speak to.\n\
         After the createAssistant tool call is successful, transfer the caller to {return_number}. \
         Don't transfer the call until the createAssistant tool call is successful.",
    );

    assistant_from_prompt(
        "AssistantGenerator",
        prompt,
        return_number,
        Some(GENERATOR_GREETING.to_string()),
        FirstMessageMode::AssistantSpeaksFirst,
    )
}

/// The assistant variant synthesized from a generated prompt. No literal
/// first message; the model improvises the opening line from the prompt.
pub fn custom_assistant(generated_prompt: &str, return_number: &str) -> Assistant {
    let prompt = compose_custom_prompt(generated_prompt, return_number);

    assistant_from_prompt(
        "CustomAssistant",
        prompt,
        return_number,
        None,
        FirstMessageMode::AssistantSpeaksFirstWithModelGeneratedMessage,
    )
}

pub fn compose_custom_prompt(generated_prompt: &str, return_number: &str) -> String {
    format!(
        "{generated_prompt}\n\
         For your first message, introduce yourself and state your purpose. Be concise and clear.\n\
         Then, the caller will describe an assistant that they want to speak to. \
         Call the createAssistant tool with the description.\n\
         After the createAssistant tool call is successful, transfer the caller to {return_number}.",
    )
}

// Both variants share everything except name, prompt and first-message
// fields, so they are built through this one skeleton to keep the fixed
// voice/transcriber/tool blocks from drifting apart.
fn assistant_from_prompt(
    name: &str,
    system_prompt: String,
    return_number: &str,
    first_message: Option<String>,
    first_message_mode: FirstMessageMode,
) -> Assistant {
    Assistant {
        name: name.to_string(),
        model: ModelConfig {
            model: COMPLETION_MODEL.to_string(),
            provider: MODEL_PROVIDER.to_string(),
            messages: vec![SystemMessage {
                role: "system".to_string(),
                content: system_prompt,
            }],
            tool_ids: vec![CREATE_ASSISTANT_TOOL_ID.to_string()],
            tools: vec![TransferTool {
                r#type: "transferCall".to_string(),
                destinations: vec![TransferDestination {
                    r#type: "number".to_string(),
                    number: return_number.to_string(),
                }],
            }],
        },
        voice: VoiceConfig {
            model: VOICE_MODEL.to_string(),
            voice_id: VOICE_ID.to_string(),
            provider: VOICE_PROVIDER.to_string(),
        },
        transcriber: TranscriberConfig {
            model: TRANSCRIBER_MODEL.to_string(),
            language: TRANSCRIBER_LANGUAGE.to_string(),
            provider: TRANSCRIBER_PROVIDER.to_string(),
        },
        first_message,
        first_message_mode: Some(first_message_mode),
    }
}
