use crate::compose::CompletionError;
use std::path::Path;

/// Reads the background document handed to the model
///
/// A missing file is reported as [`CompletionError::ContextMissing`] so the
/// caller can print a message instead of failing.
pub fn load_context(path: &Path) -> Result<String, CompletionError> {
    match std::fs::read_to_string(path) {
        Ok(context) => Ok(context),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(CompletionError::ContextMissing(path.to_path_buf()))
        }
        Err(e) => Err(CompletionError::Io(e)),
    }
}

/// Formats the user message from the context document and the operator's topic
pub fn build_prompt(context: &str, topic: &str) -> String {
    format!("Context: {}\n\nUser request: {}\n", context, topic)
}
