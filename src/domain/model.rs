use serde::Serialize;
use std::fmt;

/// Routing class of a directory entry, derived from its extension length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionKind {
    /// Personal line, exactly three digits.
    User,
    /// Group, repeater or system line, four or more digits.
    Other,
}

/// One row of the published extension directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryRecord {
    pub extension: String,
    pub callsign: String,
    pub name: String,
}

impl DirectoryRecord {
    pub fn new(
        extension: impl Into<String>,
        callsign: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            extension: extension.into(),
            callsign: callsign.into(),
            name: name.into(),
        }
    }

    pub fn kind(&self) -> ExtensionKind {
        if self.extension.len() == 3 {
            ExtensionKind::User
        } else {
            ExtensionKind::Other
        }
    }

    pub fn is_user(&self) -> bool {
        self.kind() == ExtensionKind::User
    }

    pub fn is_other(&self) -> bool {
        self.kind() == ExtensionKind::Other
    }

    pub fn has_callsign(&self) -> bool {
        !self.callsign.is_empty()
    }

    /// Numeric value used for sorting; extensions too long for u64 sort last.
    pub fn extension_number(&self) -> u64 {
        self.extension.parse().unwrap_or(u64::MAX)
    }

    /// Label shown on phone displays: `CALL - Name`, or whichever part exists.
    pub fn display_name(&self) -> String {
        match (self.callsign.is_empty(), self.name.is_empty()) {
            (false, false) => format!("{} - {}", self.callsign, self.name),
            (false, true) => self.callsign.clone(),
            _ => self.name.clone(),
        }
    }
}

/// The six generated files. Declaration order is the generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OutputFormat {
    Users,
    Cisco,
    Yealink,
    Fanvil,
    Other,
    Dapnet,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 6] = [
        OutputFormat::Users,
        OutputFormat::Cisco,
        OutputFormat::Yealink,
        OutputFormat::Fanvil,
        OutputFormat::Other,
        OutputFormat::Dapnet,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            OutputFormat::Users => "hamvoip_users.csv",
            OutputFormat::Cisco => "hamvoip_cisco.xml",
            OutputFormat::Yealink => "hamvoip_yealink.csv",
            OutputFormat::Fanvil => "hamvoip_fanvil.csv",
            OutputFormat::Other => "hamvoip_other.csv",
            OutputFormat::Dapnet => "hamvoip_dapnet.csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Users => "users",
            OutputFormat::Cisco => "cisco",
            OutputFormat::Yealink => "yealink",
            OutputFormat::Fanvil => "fanvil",
            OutputFormat::Other => "other",
            OutputFormat::Dapnet => "dapnet",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_classification() {
        assert_eq!(DirectoryRecord::new("101", "AB1CD", "John").kind(), ExtensionKind::User);
        assert_eq!(DirectoryRecord::new("1001", "", "Node").kind(), ExtensionKind::Other);
        assert!(DirectoryRecord::new("123456", "", "Conference").is_other());
    }

    #[test]
    fn test_display_name() {
        assert_eq!(
            DirectoryRecord::new("301", "PA1ABC", "Jan").display_name(),
            "PA1ABC - Jan"
        );
        assert_eq!(DirectoryRecord::new("302", "PA2XYZ", "").display_name(), "PA2XYZ");
        assert_eq!(DirectoryRecord::new("1002", "", "Repeater Node").display_name(), "Repeater Node");
    }

    #[test]
    fn test_file_names_are_unique() {
        let mut names: Vec<_> = OutputFormat::ALL.iter().map(|f| f.file_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 6);
    }
}
