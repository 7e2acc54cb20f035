// Chunk: docs/chunks/status_line - Status text under the tab list
//! Status text shown under the tab list and in the settings panel.

/// How the status should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    Info,
    Error,
}

/// A status message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Status {
    pub text: String,
    pub kind: StatusKind,
}

impl Status {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Info,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }

    /// Status after filtering: `No tabs found.`, `1 tab.` or `N tabs.`
    pub fn tab_count(count: usize) -> Self {
        match count {
            0 => Self::info("No tabs found."),
            1 => Self::info("1 tab."),
            n => Self::info(format!("{n} tabs.")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_count_pluralizes() {
        assert_eq!(Status::tab_count(0).text, "No tabs found.");
        assert_eq!(Status::tab_count(1).text, "1 tab.");
        assert_eq!(Status::tab_count(12).text, "12 tabs.");
        assert!(!Status::tab_count(0).is_error());
    }
}
