// Resume generation: prompt construction, reply extraction, improvement classification.
// All model calls go through llm_client; settings arrive as explicit arguments.

pub mod extractor;
pub mod generator;
pub mod handlers;
pub mod improvements;
pub mod prompts;
