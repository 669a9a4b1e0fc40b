use crate::error::{Error, Result};
use crate::friendliai::FriendliAiAdapter;
use crate::openai::{OpenAiAdapter, VllmAdapter};
use crate::tgi::TgiAdapter;
use crate::traits::EndpointAdapter;
use crate::triton::TritonAdapter;

/// Static description of a registered endpoint type, independent of any
/// particular adapter instance.
#[derive(Debug, Clone, Copy)]
pub struct EndpointMetadata {
    pub name: &'static str,
    pub description: &'static str,
}

const ENDPOINTS: &[EndpointMetadata] = &[
    EndpointMetadata { name: "openai", description: "OpenAI chat-completions API" },
    EndpointMetadata { name: "vllm", description: "vLLM OpenAI-compatible server" },
    EndpointMetadata { name: "tgi", description: "Hugging Face Text Generation Inference" },
    EndpointMetadata { name: "friendliai", description: "FriendliAI streaming completions" },
    EndpointMetadata { name: "triton", description: "NVIDIA Triton Inference Server" },
];

pub fn endpoint_names() -> Vec<&'static str> {
    ENDPOINTS.iter().map(|e| e.name).collect()
}

pub fn endpoint_metadata(name: &str) -> Option<&'static EndpointMetadata> {
    ENDPOINTS.iter().find(|e| e.name == name)
}

/// Instantiates the adapter registered under `name`.
pub fn create_adapter(name: &str) -> Result<Box<dyn EndpointAdapter>> {
    match name {
        "openai" => Ok(Box::new(OpenAiAdapter)),
        "vllm" => Ok(Box::new(VllmAdapter)),
        "tgi" => Ok(Box::new(TgiAdapter)),
        "friendliai" => Ok(Box::new(FriendliAiAdapter)),
        "triton" => Ok(Box::new(TritonAdapter)),
        other => Err(Error::UnknownEndpoint(other.to_string())),
    }
}
