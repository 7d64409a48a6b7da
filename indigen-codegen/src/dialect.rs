use std::{fmt, path::Path};

/// Source dialect of the stub files.
///
/// Selected per run. A stub's current dialect is read from its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    /// C with a local-buffer helper, `calloc`/`free` streams (`.c`)
    Legacy,
    /// C++ with a ring-buffer helper, `new`/`delete` streams (`.cc`)
    #[default]
    Modern,
}

impl Dialect {
    pub const ALL: [Dialect; 2] = [Dialect::Legacy, Dialect::Modern];

    pub fn from_legacy_flag(legacy: bool) -> Self {
        if legacy { Dialect::Legacy } else { Dialect::Modern }
    }

    /// File extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Dialect::Legacy => "c",
            Dialect::Modern => "cc",
        }
    }

    /// The dialect a stub could otherwise be written in.
    pub fn other(&self) -> Self {
        match self {
            Dialect::Legacy => Dialect::Modern,
            Dialect::Modern => Dialect::Legacy,
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.extension() == ext)
    }

    /// Dialect implied by a stub path's extension.
    pub fn of_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Legacy => f.write_str("legacy"),
            Dialect::Modern => f.write_str("modern"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extensions() {
        assert_eq!(Dialect::Legacy.extension(), "c");
        assert_eq!(Dialect::Modern.extension(), "cc");
        assert_eq!(Dialect::from_extension("cc"), Some(Dialect::Modern));
        assert_eq!(Dialect::from_extension("cpp"), None);
        assert_eq!(Dialect::Legacy.other(), Dialect::Modern);
    }

    #[test]
    fn test_of_path() {
        assert_eq!(Dialect::of_path(Path::new("indicators/sma.c")), Some(Dialect::Legacy));
        assert_eq!(Dialect::of_path(Path::new("indicators/sma.cc")), Some(Dialect::Modern));
        assert_eq!(Dialect::of_path(Path::new("indicators/sma")), None);
    }

    #[test]
    fn test_legacy_flag() {
        assert_eq!(Dialect::from_legacy_flag(true), Dialect::Legacy);
        assert_eq!(Dialect::from_legacy_flag(false), Dialect::Modern);
    }
}
