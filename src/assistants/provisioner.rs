use std::sync::Arc;
use tracing::{error, info};

use crate::api::openai::PromptClient;
use crate::api::vapi_dtos::Assistant;
use crate::assistants::cache::AssistantCache;
use crate::assistants::templates::{
    custom_assistant, generator_assistant, PROMPT_ENGINEER_INSTRUCTION,
};

/// Decides which assistant configuration an inbound call gets.
///
/// Callers with no cached description get the generator assistant, which
/// collects one. Callers with a cached description get a custom assistant
/// whose system prompt is synthesized from it; if prompt generation fails
/// for any reason the caller gets the generator assistant again rather than
/// an error. No retries.
pub struct AssistantProvisioner {
    cache: Arc<AssistantCache>,
    prompt_client: PromptClient,
}

impl AssistantProvisioner {
    pub fn new(cache: Arc<AssistantCache>, prompt_client: PromptClient) -> Self {
        Self {
            cache,
            prompt_client,
        }
    }

    pub async fn resolve(&self, caller_number: &str, return_number: &str) -> Assistant {
        let Some(description) = self.cache.get(caller_number).await else {
            info!("no cached assistant description, returning generator assistant");
            return generator_assistant(return_number);
        };

        info!("found cached assistant description: {}", description);
        match self
            .prompt_client
            .generate_prompt(PROMPT_ENGINEER_INSTRUCTION, &description)
            .await
        {
            Ok(generated) => custom_assistant(&generated, return_number),
            Err(e) => {
                error!("failed to generate prompt, falling back to generator: {}", e);
                generator_assistant(return_number)
            }
        }
    }
}
