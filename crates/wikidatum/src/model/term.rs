//! Terms, sitelinks and the language/site codes used to look them up.

use std::fmt;

/// A language or site code in symbolic form, e.g. `Code::new("enwiki")`.
///
/// Lookups accept a `Code`, a `&str` or a `String` interchangeably; all of
/// them are compared through [`normalize_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Code(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl AsRef<str> for Code {
    fn as_ref(&self) -> &str {
        self.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Well-known codes.
pub mod codes {
    use super::Code;

    pub const EN: Code = Code::new("en");
    pub const DE: Code = Code::new("de");
    pub const FR: Code = Code::new("fr");
    pub const ES: Code = Code::new("es");
    pub const ENWIKI: Code = Code::new("enwiki");
    pub const DEWIKI: Code = Code::new("dewiki");
    pub const FRWIKI: Code = Code::new("frwiki");
    pub const ESWIKI: Code = Code::new("eswiki");
    pub const COMMONSWIKI: Code = Code::new("commonswiki");
}

/// Coerces a language or site code to the string form used for comparison.
///
/// Comparison is exact: no case folding or trimming.
pub fn normalize_code<C: AsRef<str> + ?Sized>(code: &C) -> &str {
    code.as_ref()
}

/// A language-tagged string used for labels, descriptions and aliases.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Term {
    pub lang: String,
    pub value: String,
}

impl Term {
    pub fn new(lang: impl Into<String>, value: impl Into<String>) -> Self {
        Term {
            lang: lang.into(),
            value: value.into(),
        }
    }
}

/// A link from an item to a page on a Wikimedia site.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sitelink {
    /// Site shortcode, e.g. "enwiki".
    pub site: String,
    /// Page title on that site.
    pub title: String,
    /// Badge item ids (e.g., featured article).
    pub badges: Vec<String>,
    pub url: Option<String>,
}

impl Sitelink {
    pub fn new(site: impl Into<String>, title: impl Into<String>) -> Self {
        Sitelink {
            site: site.into(),
            title: title.into(),
            badges: Vec::new(),
            url: None,
        }
    }
}
