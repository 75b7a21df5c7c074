use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MessageKind {
    Success,
    Warning,
    Error,
}

impl MessageKind {
    fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Warning => "warning",
            MessageKind::Error => "error",
        }
    }
}

/// Writes command results to stdout in the selected format.
///
/// Human mode prints decorated lines; JSON modes print one JSON document per
/// message. Everything except errors is suppressed by `--quiet`.
pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        self.message(MessageKind::Success, msg.as_ref());
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        self.message(MessageKind::Warning, msg.as_ref());
    }

    /// Shown even in quiet mode
    pub fn error(&self, msg: impl AsRef<str>) {
        self.message(MessageKind::Error, msg.as_ref());
    }

    /// Plain human-mode line (tables, charts, empty-result notes); ignored in
    /// JSON modes so a result stays a single document
    pub fn println(&self, msg: impl AsRef<str>) {
        if !self.prints_plain_lines() {
            return;
        }
        println!("{}", msg.as_ref());
    }

    fn prints_plain_lines(&self) -> bool {
        !self.quiet && self.is_human()
    }

    /// Structured result document; ignored in human mode
    pub fn json<T: Serialize + ?Sized>(&self, data: &T) {
        if self.quiet || self.is_human() {
            return;
        }
        self.print_json(data);
    }

    fn print_json<T: Serialize + ?Sized>(&self, data: &T) {
        let rendered = match self.format {
            OutputFormat::JsonPretty => serde_json::to_string_pretty(data),
            _ => serde_json::to_string(data),
        };
        match rendered {
            Ok(text) => println!("{}", text),
            Err(e) => tracing::error!(error = %e, "Failed to serialize output"),
        }
    }

    fn message(&self, kind: MessageKind, msg: &str) {
        if self.quiet && kind != MessageKind::Error {
            return;
        }

        match self.format {
            OutputFormat::Human => match kind {
                MessageKind::Success => println!("{} {}", "✓".green(), msg),
                MessageKind::Warning => println!("{} {}", "⚠".yellow(), msg),
                MessageKind::Error => eprintln!("{} {}", "✗".red(), msg),
            },
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": kind.as_str(),
                    "message": msg,
                }));
            }
        }
    }
}
