use crate::config::ActionFlags;
use crate::domain::model::OutputFormat;
use std::collections::BTreeSet;

/// What a single invocation has to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// No action flag given.
    Nothing,
    /// Delete every known output file.
    Remove,
    /// Generate these outputs, in generation order, each once.
    Generate(Vec<OutputFormat>),
}

impl Command {
    pub fn from_flags(flags: &ActionFlags) -> Self {
        if flags.remove {
            return Command::Remove;
        }

        let mut formats = BTreeSet::new();
        if flags.all {
            formats.extend(OutputFormat::ALL);
        }
        let selected = [
            (flags.users, OutputFormat::Users),
            (flags.cisco, OutputFormat::Cisco),
            (flags.yealink, OutputFormat::Yealink),
            (flags.fanvil, OutputFormat::Fanvil),
            (flags.other, OutputFormat::Other),
            (flags.dapnet, OutputFormat::Dapnet),
        ];
        formats.extend(
            selected
                .into_iter()
                .filter(|(enabled, _)| *enabled)
                .map(|(_, format)| format),
        );

        if formats.is_empty() {
            Command::Nothing
        } else {
            Command::Generate(formats.into_iter().collect())
        }
    }

    /// Whether the directory document has to be downloaded.
    pub fn needs_document(&self) -> bool {
        matches!(self, Command::Generate(_))
    }
}
