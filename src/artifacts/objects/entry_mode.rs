use crate::artifacts::objects::object_type::ObjectType;

#[derive(Debug, Clone, Copy, Eq, Ord, Default, PartialEq, PartialOrd, Hash)]
pub enum FileMode {
    #[default]
    Regular,
    Executable,
}

/// Mode of a tree entry, serialized as an octal string.
#[derive(Debug, Clone, Copy, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub enum EntryMode {
    File(FileMode),
    Directory,
}

impl EntryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryMode::File(FileMode::Regular) => "100644",
            EntryMode::File(FileMode::Executable) => "100755",
            EntryMode::Directory => "40000",
        }
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, EntryMode::Directory)
    }

    /// Kind of the object an entry with this mode points at.
    pub fn object_type(&self) -> ObjectType {
        match self {
            EntryMode::File(_) => ObjectType::Blob,
            EntryMode::Directory => ObjectType::Tree,
        }
    }

    pub fn from_octal_str(value: &str) -> Option<Self> {
        match value {
            "100644" => Some(EntryMode::File(FileMode::Regular)),
            "100755" => Some(EntryMode::File(FileMode::Executable)),
            "40000" => Some(EntryMode::Directory),
            _ => None,
        }
    }
}

impl From<FileMode> for EntryMode {
    fn from(mode: FileMode) -> Self {
        EntryMode::File(mode)
    }
}

impl std::fmt::Display for EntryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(EntryMode::File(FileMode::Regular))]
    #[case(EntryMode::File(FileMode::Executable))]
    #[case(EntryMode::Directory)]
    fn octal_text_names_the_mode(#[case] mode: EntryMode) {
        assert_eq!(EntryMode::from_octal_str(mode.as_str()), Some(mode));
    }

    #[test]
    fn unknown_modes_are_rejected() {
        assert_eq!(EntryMode::from_octal_str("120000"), None);
        assert_eq!(EntryMode::from_octal_str("040000"), None);
    }
}
