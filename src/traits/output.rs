#[cfg(test)]
use std::sync::Mutex;

/// Output message captured by MockOutput for testing
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum OutputMessage {
    Body(String),
    Warning(String),
    Error(String),
}

/// Trait for terminal output operations to enable testing with mocks
pub trait Output: Send + Sync {
    /// Emit the rendered summary exactly as given
    fn body(&self, text: &str);

    /// Print a warning message
    fn warning(&self, message: &str);

    /// Print an error message
    fn error(&self, message: &str);
}

/// Real terminal output implementation using the output module
pub struct TerminalOutput;

impl Output for TerminalOutput {
    fn body(&self, text: &str) {
        crate::output::body(text);
    }

    fn warning(&self, message: &str) {
        crate::output::warning(message);
    }

    fn error(&self, message: &str) {
        crate::output::error(message);
    }
}

/// Mock output implementation for testing (captures output)
#[cfg(test)]
pub struct MockOutput {
    messages: Mutex<Vec<OutputMessage>>,
}

#[cfg(test)]
impl MockOutput {
    /// Create new mock output
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
        }
    }

    /// Get all captured messages
    pub fn get_messages(&self) -> Vec<OutputMessage> {
        self.messages.lock().unwrap().clone()
    }

    /// Concatenation of everything emitted as body
    pub fn body_text(&self) -> String {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter_map(|m| {
                if let OutputMessage::Body(text) = m {
                    Some(text.as_str())
                } else {
                    None
                }
            })
            .collect()
    }

    /// Get all warning messages
    pub fn get_warnings(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter_map(|m| {
                if let OutputMessage::Warning(msg) = m {
                    Some(msg.clone())
                } else {
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
impl Default for MockOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl Output for MockOutput {
    fn body(&self, text: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(OutputMessage::Body(text.to_string()));
    }

    fn warning(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(OutputMessage::Warning(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(OutputMessage::Error(message.to_string()));
    }
}
