//! Dialect descriptions for the keyed file formats.
//!
//! Three dialects occur in practice: the folder-path mapping file, the
//! dust-code input deck, and the gas-code input deck. Their grammar
//! differences (comment leaders, inline-comment rule, inactive-line marker,
//! repeatable keys, key case) are expressed as data on [`DialectSpec`] and
//! injected into the parsers, so adding a fourth dialect is a localized
//! change rather than format-name branching scattered through the code.

/// How inline comments are recognized on a key-value line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineComment {
    /// No inline comments; the value runs verbatim to end of line.
    None,
    /// A comment starts at the first occurrence of any of these characters.
    Chars(&'static [char]),
    /// The value is the first whitespace-delimited token after `=`;
    /// anything after the next run of whitespace is an annotation.
    TrailingWhitespace,
}

/// Key comparison rule for a dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCase {
    /// Keys match exactly as written.
    Sensitive,
    /// Keys are uppercased on store and lookup.
    Insensitive,
}

/// Grammar facts for one keyed file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectSpec {
    name: &'static str,
    comment_leaders: &'static [char],
    inline: InlineComment,
    inactive_prefix: Option<char>,
    repeatable: &'static [&'static str],
    key_case: KeyCase,
}

impl DialectSpec {
    /// Folder-path mapping files: `#` full-line comments, no inline
    /// comments (a trailing `#...` is part of the value), case-sensitive.
    pub fn path_mapping() -> Self {
        DialectSpec {
            name: "path-mapping",
            comment_leaders: &['#'],
            inline: InlineComment::None,
            inactive_prefix: None,
            repeatable: &[],
            key_case: KeyCase::Sensitive,
        }
    }

    /// Dust-code input decks: `*` leads comments, section bars, and
    /// inactive alternative lines; the value is the first token after `=`
    /// and anything beyond the next whitespace run is an annotation.
    pub fn dust_deck() -> Self {
        DialectSpec {
            name: "dust-deck",
            comment_leaders: &['*'],
            inline: InlineComment::TrailingWhitespace,
            inactive_prefix: Some('*'),
            repeatable: &[],
            key_case: KeyCase::Sensitive,
        }
    }

    /// Gas-code input decks: `!` starts inline comments, declaration keys
    /// (molecules, transitions, line specs) repeat and are collected in
    /// order, keys are case-insensitive and stored uppercase.
    pub fn gas_deck() -> Self {
        DialectSpec {
            name: "gas-deck",
            comment_leaders: &['#', '!', '*'],
            inline: InlineComment::Chars(&['!']),
            inactive_prefix: None,
            repeatable: &["MOLECULE", "TRANSITION", "LINE_SPEC"],
            key_case: KeyCase::Insensitive,
        }
    }

    /// Short dialect name for log lines.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The inline-comment rule for this dialect.
    pub fn inline(&self) -> InlineComment {
        self.inline
    }

    /// Marker that turns a `key=value` line into an inactive alternative,
    /// if the dialect has one.
    pub fn inactive_prefix(&self) -> Option<char> {
        self.inactive_prefix
    }

    /// Whether a trimmed line is a full-line comment in this dialect.
    pub fn is_full_line_comment(&self, trimmed: &str) -> bool {
        trimmed
            .chars()
            .next()
            .is_some_and(|c| self.comment_leaders.contains(&c))
    }

    /// Cut an inline comment or annotation off a raw value.
    pub fn strip_inline<'a>(&self, raw_value: &'a str) -> &'a str {
        match self.inline {
            InlineComment::None => raw_value,
            InlineComment::Chars(markers) => match raw_value.find(|c| markers.contains(&c)) {
                Some(idx) => &raw_value[..idx],
                None => raw_value,
            },
            InlineComment::TrailingWhitespace => {
                raw_value.split_whitespace().next().unwrap_or("")
            }
        }
    }

    /// Canonical form of a key under this dialect's case rule.
    pub fn canonical_key(&self, key: &str) -> String {
        match self.key_case {
            KeyCase::Sensitive => key.to_string(),
            KeyCase::Insensitive => key.to_ascii_uppercase(),
        }
    }

    /// Whether a canonical key may appear multiple times and is collected
    /// as an ordered sequence.
    pub fn is_repeatable(&self, canonical_key: &str) -> bool {
        self.repeatable.contains(&canonical_key)
    }
}
