//! Lexical vocabulary of the configuration language.
//!
//! ```text
//! __xyc__
//! __file__: <path>.csv: x1,y1[,label1]; x2,y2[,label2]; ...
//! __params__: xLabel, yLabel, title;
//! __format__: f1[, f2, ...];
//! __end__
//! ```

use std::fmt;

/// Header token; must be the first non-empty logical line.
pub const HEADER: &str = "__xyc__";
/// File declaration token.
pub const FILE: &str = "__file__";
/// Terminator token.
pub const END: &str = "__end__";
/// Graph parameters token.
pub const PARAMS: &str = "__params__";
/// Format specifiers token.
pub const FORMAT: &str = "__format__";

/// Starts a comment running to the end of the physical line.
pub const COMMENT: char = '#';
/// Trailing line continuation marker.
pub const CONTINUATION: char = '\\';
/// Splits a directive from its remainder (major split).
pub const MAJOR_SEPARATOR: char = ':';
/// Splits series clauses (minor split).
pub const MINOR_SEPARATOR: char = ';';
/// Splits the fields of a clause (series split).
pub const SERIES_SEPARATOR: char = ',';

/// Required suffix of every data file path.
pub const CSV_SUFFIX: &str = ".csv";
/// Required suffix of configuration files.
pub const CONFIG_SUFFIX: &str = ".xyc";
/// Single format value that lets the renderer choose styles.
pub const AUTO_FORMAT: &str = "auto";
/// Maximum length of an explicit format specifier.
pub const MAX_FORMAT_LEN: usize = 2;

/// The closed set of structural directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    /// `__xyc__`
    Header,
    /// `__file__`
    FileDecl,
    /// `__end__`
    End,
    /// `__params__`
    Params,
    /// `__format__`
    Format,
}

impl Directive {
    /// All directives in declaration order of the grammar.
    pub const ALL: [Directive; 5] = [
        Directive::Header,
        Directive::FileDecl,
        Directive::End,
        Directive::Params,
        Directive::Format,
    ];

    /// Recognizes a whitespace-free leading token.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.token() == token)
    }

    /// Source spelling of the directive.
    pub fn token(self) -> &'static str {
        match self {
            Directive::Header => HEADER,
            Directive::FileDecl => FILE,
            Directive::End => END,
            Directive::Params => PARAMS,
            Directive::Format => FORMAT,
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Removes every whitespace character, producing the text used for token
/// recognition.
pub fn collapse_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Splits on `sep` and drops a single trailing empty piece, which is what
/// makes the final `;` of a list optional.
pub fn split_optional_trailing(text: &str, sep: char) -> Vec<&str> {
    let mut parts: Vec<&str> = text.split(sep).collect();
    if parts.last().is_some_and(|p| p.is_empty()) {
        parts.pop();
    }
    parts
}
