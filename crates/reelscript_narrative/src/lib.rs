//! Prompt templates and the script generation pipeline.
//!
//! [`ScriptGenerator`] asks the chat model for a title, researches the
//! subject, and asks the model again for a structured script grounded in
//! the research. Research never fails the pipeline; unusable lookups are
//! replaced with a fallback notice from [`research_text`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod generator;
mod prompts;
mod template;

pub use generator::{SCRIPT_STAGE, ScriptGenerator, TITLE_STAGE};
pub use prompts::{
    FAILED_FALLBACK_SUFFIX, NETWORK_FALLBACK, NOT_FOUND_FALLBACK, SCRIPT_PROMPT, TIMEOUT_FALLBACK,
    TITLE_PROMPT, research_text,
};
pub use template::PromptTemplate;
