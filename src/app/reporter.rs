use console::Style;
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum MsgType {
    Info,
    Warn,
    Error,
}

/// User-facing status lines. Informational messages go to stdout, everything else to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    quiet: bool,
}

impl Reporter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn quiet(&self) -> bool {
        self.quiet
    }

    pub fn message_style(&self, msg_type: MsgType) -> Style {
        match msg_type {
            MsgType::Info => Style::new(),
            MsgType::Warn => Style::new().yellow().for_stderr(),
            MsgType::Error => Style::new().red().for_stderr(),
        }
    }

    /// The line as it is printed, without the trailing newline.
    pub fn format_message(&self, msg_type: MsgType, msg: &str) -> String {
        let prefix = self.message_style(msg_type).apply_to(format!("[{msg_type}]"));
        format!("{prefix} {msg}")
    }

    pub fn print_message<S: ToString>(&self, msg_type: MsgType, msg: S) {
        if self.quiet {
            return;
        }

        let line = self.format_message(msg_type, &msg.to_string());
        if matches!(msg_type, MsgType::Info) {
            println!("{line}");
        } else {
            eprintln!("{line}");
        }
    }

    pub fn report_error<S: ToString>(&self, msg: S) {
        self.print_message(MsgType::Error, msg);
    }

    pub fn report_warn<S: ToString>(&self, msg: S) {
        self.print_message(MsgType::Warn, msg);
    }

    pub fn report_info<S: ToString>(&self, msg: S) {
        self.print_message(MsgType::Info, msg);
    }
}
