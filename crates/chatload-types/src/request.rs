use serde::{Deserialize, Serialize};

/// Generation parameters forwarded to the endpoint adapter for a single request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenParams {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub stop: Vec<String>,
}

impl Default for GenParams {
    fn default() -> Self {
        Self { max_tokens: None, temperature: None, top_p: None, stop: Vec::new() }
    }
}

/// A single simulated request within a visit.
///
/// Exactly one of `content` or `dep_id` must be set: a literal turn supplies
/// its own text, while a dependent turn reuses the rendered output of an
/// earlier request in the same visit (see [`crate::visit::validate_visit`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimReq {
    pub id: String,
    pub content: Option<String>,
    pub dep_id: Option<String>,
    pub gen_params: GenParams,
}

impl SimReq {
    pub fn literal(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: Some(content.into()),
            dep_id: None,
            gen_params: GenParams::default(),
        }
    }

    pub fn dependent(id: impl Into<String>, dep_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: None,
            dep_id: Some(dep_id.into()),
            gen_params: GenParams::default(),
        }
    }

    pub fn with_gen_params(mut self, gen_params: GenParams) -> Self {
        self.gen_params = gen_params;
        self
    }
}
