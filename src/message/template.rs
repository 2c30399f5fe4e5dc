//! Message templates and per-token message construction

/// Command used when no template arguments are given
pub const DEFAULT_COMMAND: &str = "drop";

/// Fixed argument list every token is combined into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    args: Vec<String>,
    marker: Option<String>,
}

impl MessageTemplate {
    /// Create a template from positional arguments and an optional marker
    ///
    /// With no arguments the template is `["drop"]`, or `["drop", marker]`
    /// when a marker is configured.
    pub fn new(args: Vec<String>, marker: Option<String>) -> Self {
        let args = if args.is_empty() {
            let mut default = vec![DEFAULT_COMMAND.to_string()];
            default.extend(marker.clone());
            default
        } else {
            args
        };
        Self { args, marker }
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn marker(&self) -> Option<&str> {
        self.marker.as_deref()
    }

    /// True when a marker is configured but no slot contains it
    pub fn missing_marker(&self) -> bool {
        match &self.marker {
            Some(marker) => !self.args.iter().any(|arg| arg.contains(marker.as_str())),
            None => false,
        }
    }

    /// Builder for this template, in append or substitute mode
    pub fn builder(&self) -> MessageBuilder {
        match &self.marker {
            None => {
                let mut message = Vec::with_capacity(self.args.len() + 1);
                message.extend(self.args.iter().cloned());
                message.push(String::new());
                MessageBuilder::Append { message }
            }
            Some(marker) => MessageBuilder::Substitute {
                template: self.args.clone(),
                marker: marker.clone(),
                message: vec![String::new(); self.args.len()],
            },
        }
    }
}

/// Builds one message per token, reusing its backing storage
///
/// The returned slice borrows the builder, so a message has to be written
/// out before the next one can be built.
#[derive(Debug, Clone)]
pub enum MessageBuilder {
    /// template ++ [token]
    Append { message: Vec<String> },
    /// template with every marker occurrence replaced by the token
    Substitute {
        template: Vec<String>,
        marker: String,
        message: Vec<String>,
    },
}

impl MessageBuilder {
    /// Build the message for `item`
    pub fn build(&mut self, item: &str) -> &[String] {
        match self {
            MessageBuilder::Append { message } => {
                if let Some(last) = message.last_mut() {
                    last.clear();
                    last.push_str(item);
                }
                message.as_slice()
            }
            MessageBuilder::Substitute {
                template,
                marker,
                message,
            } => {
                for (slot, source) in message.iter_mut().zip(template.iter()) {
                    slot.clear();
                    replace_into(slot, source, marker, item);
                }
                message.as_slice()
            }
        }
    }
}

/// Append `source` to `out` with every `marker` replaced by `item`
///
/// An empty marker matches nothing.
fn replace_into(out: &mut String, source: &str, marker: &str, item: &str) {
    if marker.is_empty() {
        out.push_str(source);
        return;
    }

    let mut last = 0;
    for (idx, _) in source.match_indices(marker) {
        out.push_str(&source[last..idx]);
        out.push_str(item);
        last = idx + marker.len();
    }
    out.push_str(&source[last..]);
}
