use std::io::ErrorKind;
use std::path::Path;

use tracing::{info, warn};

use crate::{CoreError, Symbol};

/// Used when the symbol file does not exist.
pub const DEFAULT_SYMBOLS: [&str; 10] = [
    "AAPL", "GOOGL", "MSFT", "AMZN", "TSLA", "FB", "NVDA", "JPM", "V", "WMT",
];

/// Where a symbol list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolSource {
    File,
    Defaults,
}

/// Symbols loaded for one run, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolList {
    pub symbols: Vec<Symbol>,
    pub source: SymbolSource,
}

impl SymbolList {
    /// Keeps at most `limit` symbols from the front of the list.
    pub fn capped(mut self, limit: usize) -> Self {
        self.symbols.truncate(limit);
        self
    }
}

pub fn default_symbols() -> Vec<Symbol> {
    DEFAULT_SYMBOLS
        .iter()
        .filter_map(|value| Symbol::parse(value).ok())
        .collect()
}

/// Parses one symbol per line. Blank lines and `#` comments are skipped;
/// every other line is a symbol.
pub fn parse_symbols(contents: &str) -> Vec<Symbol> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .filter_map(|line| Symbol::parse(line).ok())
        .collect()
}

/// Reads the symbol file, falling back to [`DEFAULT_SYMBOLS`] when it does not
/// exist. Any other read failure is an error.
pub fn load_symbols(path: &Path) -> Result<SymbolList, CoreError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let symbols = parse_symbols(&contents);
            info!(path = %path.display(), count = symbols.len(), "loaded symbol file");
            Ok(SymbolList {
                symbols,
                source: SymbolSource::File,
            })
        }
        Err(error) if error.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "symbol file not found; using default symbols");
            Ok(SymbolList {
                symbols: default_symbols(),
                source: SymbolSource::Defaults,
            })
        }
        Err(source) => Err(CoreError::SymbolFile {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_strs(symbols: &[Symbol]) -> Vec<&str> {
        symbols.iter().map(Symbol::as_str).collect()
    }

    #[test]
    fn skips_only_blank_lines_and_comments() {
        let contents = "# watchlist\nAAPL\n\n  msft  \n   # indented comment\n^GSPC\nBRK/B\nBF B\n";
        assert_eq!(
            as_strs(&parse_symbols(contents)),
            vec!["AAPL", "MSFT", "^GSPC", "BRK/B", "BF B"]
        );
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let list = load_symbols(&dir.path().join("absent.txt")).expect("fallback");

        assert_eq!(list.source, SymbolSource::Defaults);
        assert_eq!(list.symbols.len(), 10);
        assert_eq!(list.symbols[0].as_str(), "AAPL");
        assert_eq!(list.symbols[9].as_str(), "WMT");
    }

    #[test]
    fn existing_file_is_read_in_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("symbols.txt");
        std::fs::write(&path, "TSLA\nNVDA\n").expect("write symbols");

        let list = load_symbols(&path).expect("load");
        assert_eq!(list.source, SymbolSource::File);
        assert_eq!(as_strs(&list.symbols), vec!["TSLA", "NVDA"]);
    }

    #[test]
    fn directory_path_is_an_error_not_a_fallback() {
        let dir = tempfile::tempdir().expect("tempdir");
        let error = load_symbols(dir.path()).expect_err("directory cannot be read");
        assert!(matches!(error, CoreError::SymbolFile { .. }));
    }

    #[test]
    fn cap_keeps_the_front_of_the_list() {
        let list = SymbolList {
            symbols: default_symbols(),
            source: SymbolSource::Defaults,
        };
        assert_eq!(as_strs(&list.clone().capped(3).symbols), vec!["AAPL", "GOOGL", "MSFT"]);
        assert_eq!(list.capped(50).symbols.len(), 10);
    }
}
