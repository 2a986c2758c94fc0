use std::collections::HashSet;

/// Names excluded from a directory snapshot
///
/// One name per line, matched exactly against an entry's file name (no glob
/// semantics). Lines starting with `#` and blank lines are skipped; surrounding
/// whitespace is trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreList {
    names: HashSet<String>,
}

impl IgnoreList {
    pub fn parse(content: &str) -> Self {
        let names = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();

        IgnoreList { names }
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}
