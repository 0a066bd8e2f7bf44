use globset::{GlobBuilder, GlobMatcher};

/// A pattern that failed to compile as a glob and was demoted to a literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileWarning {
    /// 1-based line number in the pattern source.
    pub line: usize,
    /// The pattern text as written.
    pub pattern: String,
    pub message: String,
}

/// One compiled ignore directive.
#[derive(Debug, Clone)]
pub struct PatternRule {
    line: usize,
    original: String,
    glob: String,
    negated: bool,
    directory_only: bool,
    anchored: bool,
    matcher: Option<GlobMatcher>,
}

impl PatternRule {
    /// Compile one raw pattern line.
    ///
    /// Returns `None` for blank lines and comments. A glob that fails to compile
    /// is matched literally instead and a [`CompileWarning`] is returned with it.
    pub(crate) fn compile(
        line_number: usize,
        raw: &str,
        case_insensitive: bool,
    ) -> Option<(Self, Option<CompileWarning>)> {
        let parsed = ParsedLine::parse(raw)?;
        let original = raw.trim_end_matches(['\r', '\n']).to_string();

        let (glob, matcher, warning) = match parsed.glob() {
            Some(glob) => match build_matcher(&glob, case_insensitive) {
                Ok(matcher) => (glob, Some(matcher), None),
                Err(e) => {
                    let literal =
                        format!("{}{}", parsed.prefix(), globset::escape(parsed.body));
                    let warning = CompileWarning {
                        line: line_number,
                        pattern: original.clone(),
                        message: e.kind().to_string(),
                    };
                    (
                        glob,
                        build_matcher(&literal, case_insensitive).ok(),
                        Some(warning),
                    )
                }
            },
            // Only a bracket expression of slashes: nothing can match.
            None => (format!("{}{}", parsed.prefix(), parsed.body), None, None),
        };

        let rule = Self {
            line: line_number,
            original,
            glob,
            negated: parsed.negated,
            directory_only: parsed.directory_only,
            anchored: parsed.anchored,
            matcher,
        };
        Some((rule, warning))
    }

    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// The pattern as it appeared in the source.
    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The glob actually compiled, relative to the ignore root.
    #[must_use]
    pub fn glob(&self) -> &str {
        &self.glob
    }

    #[must_use]
    pub const fn is_negated(&self) -> bool {
        self.negated
    }

    #[must_use]
    pub const fn is_directory_only(&self) -> bool {
        self.directory_only
    }

    #[must_use]
    pub const fn is_anchored(&self) -> bool {
        self.anchored
    }

    /// Whether this rule matches `relative` (a `/`-separated path below the
    /// ignore root) or any of its ancestor directories.
    pub(crate) fn matches_relative(&self, relative: &str, is_dir: bool) -> bool {
        let Some(matcher) = &self.matcher else {
            return false;
        };

        if (is_dir || !self.directory_only) && matcher.is_match(relative) {
            return true;
        }

        relative
            .match_indices('/')
            .any(|(idx, _)| matcher.is_match(&relative[..idx]))
    }
}

impl PartialEq for PatternRule {
    /// Rules compare by source and flags; the compiled matcher follows from them.
    fn eq(&self, other: &Self) -> bool {
        self.line == other.line
            && self.original == other.original
            && self.glob == other.glob
            && self.negated == other.negated
            && self.directory_only == other.directory_only
            && self.anchored == other.anchored
    }
}

impl Eq for PatternRule {}

fn build_matcher(glob: &str, case_insensitive: bool) -> Result<GlobMatcher, globset::Error> {
    GlobBuilder::new(glob)
        .literal_separator(true)
        .backslash_escape(true)
        .case_insensitive(case_insensitive)
        .build()
        .map(|g| g.compile_matcher())
}

/// Syntax-level breakdown of a pattern line.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ParsedLine<'a> {
    pub body: &'a str,
    pub negated: bool,
    pub directory_only: bool,
    pub anchored: bool,
}

impl<'a> ParsedLine<'a> {
    pub(crate) fn parse(raw: &'a str) -> Option<Self> {
        let line = raw.trim_end_matches(['\r', '\n']);
        if line.trim_start().starts_with('#') {
            return None;
        }

        let mut line = trim_unescaped_trailing_whitespace(line);
        if line.is_empty() {
            return None;
        }

        let mut negated = false;
        if line.starts_with("\\!") || line.starts_with("\\#") {
            line = &line[1..];
        } else if let Some(rest) = line.strip_prefix('!') {
            negated = true;
            line = rest;
        }

        let mut directory_only = false;
        if line.ends_with('/') && !line.ends_with("\\/") {
            directory_only = true;
            line = line.trim_end_matches('/');
        }

        let (body, anchored) = match line.strip_prefix('/') {
            Some(rest) => (rest, true),
            None => (line, line.contains('/')),
        };

        if body.is_empty() {
            return None;
        }

        Some(Self {
            body,
            negated,
            directory_only,
            anchored,
        })
    }

    /// Prefix that lets an unanchored pattern match at any depth.
    pub(crate) fn prefix(&self) -> &'static str {
        if self.anchored || self.body == "**" || self.body.starts_with("**/") {
            ""
        } else {
            "**/"
        }
    }

    /// The globset form of this line, or `None` when it can never match.
    pub(crate) fn glob(&self) -> Option<String> {
        let body = to_globset_syntax(&collapse_inner_double_stars(self.body))?;
        Some(format!("{}{}", self.prefix(), body))
    }
}

/// Strip trailing spaces and tabs unless the last one is escaped with `\`.
fn trim_unescaped_trailing_whitespace(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut end = bytes.len();

    while end > 0 && matches!(bytes[end - 1], b' ' | b'\t') {
        let backslashes = bytes[..end - 1]
            .iter()
            .rev()
            .take_while(|&&b| b == b'\\')
            .count();
        if backslashes % 2 == 1 {
            break;
        }
        end -= 1;
    }

    &line[..end]
}

/// `**` only crosses directories as a whole segment; elsewhere it is a plain `*`.
fn collapse_inner_double_stars(body: &str) -> String {
    body.split('/')
        .map(|segment| {
            if segment == "**" || !segment.contains("**") {
                return segment.to_string();
            }
            let mut out = String::with_capacity(segment.len());
            let mut escaped = false;
            let mut prev_star = false;
            for c in segment.chars() {
                if escaped {
                    out.push(c);
                    escaped = false;
                    prev_star = false;
                    continue;
                }
                match c {
                    '\\' => {
                        escaped = true;
                        prev_star = false;
                        out.push(c);
                    }
                    '*' if prev_star => {}
                    '*' => {
                        prev_star = true;
                        out.push(c);
                    }
                    _ => {
                        prev_star = false;
                        out.push(c);
                    }
                }
            }
            out
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Rewrite a pattern body into globset syntax.
///
/// Braces and commas stay literal and bracket expressions never match `/`.
/// Returns `None` when a bracket expression admits nothing but `/`.
fn to_globset_syntax(body: &str) -> Option<String> {
    let chars: Vec<char> = body.chars().collect();
    let mut out = String::with_capacity(body.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        i += 1;
        match c {
            '\\' => {
                out.push(c);
                if let Some(&next) = chars.get(i) {
                    out.push(next);
                    i += 1;
                }
            }
            '{' | '}' | ',' => {
                out.push('\\');
                out.push(c);
            }
            '[' => match BracketExpr::parse(&chars[i..]) {
                Some((expr, consumed)) => {
                    match expr.without_separator()?.render() {
                        Some(spelled) => out.push_str(&spelled),
                        None => out.extend(&chars[i - 1..i + consumed]),
                    }
                    i += consumed;
                }
                // Unclosed; globset rejects it and the literal fallback applies.
                None => out.push(c),
            },
            _ => out.push(c),
        }
    }

    Some(out)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClassItem {
    Char(char),
    Range(char, char),
}

/// A `[...]` bracket expression.
#[derive(Debug, PartialEq, Eq)]
struct BracketExpr {
    negated: bool,
    items: Vec<ClassItem>,
}

impl BracketExpr {
    /// Parse the text after `[`. Returns the expression and the number of chars
    /// consumed including the closing `]`, or `None` if it is never closed.
    fn parse(chars: &[char]) -> Option<(Self, usize)> {
        let negated = matches!(chars.first(), Some('!' | '^'));
        let mut i = usize::from(negated);
        let mut items = Vec::new();

        loop {
            if chars.get(i) == Some(&']') && !items.is_empty() {
                return Some((Self { negated, items }, i + 1));
            }
            let (lo, next) = class_char(chars, i)?;
            if chars.get(next) == Some(&'-') && chars.get(next + 1).is_some_and(|&c| c != ']') {
                let (hi, after) = class_char(chars, next + 1)?;
                items.push(ClassItem::Range(lo, hi));
                i = after;
            } else {
                items.push(ClassItem::Char(lo));
                i = next;
            }
        }
    }

    /// Remove `/` from the members, or exclude it when negated.
    fn without_separator(mut self) -> Option<Self> {
        if self.negated {
            self.items.push(ClassItem::Char('/'));
            return Some(self);
        }
        self.items = self
            .items
            .into_iter()
            .flat_map(split_at_separator)
            .collect();
        (!self.items.is_empty()).then_some(self)
    }

    /// Spell the expression for globset, which reads `]` and `-` as members only
    /// in first position and has no escapes inside brackets. `None` if it cannot.
    fn render(&self) -> Option<String> {
        let mut leader = None;
        let mut rest = String::new();

        for item in &self.items {
            match *item {
                ClassItem::Char(c @ (']' | '-')) => {
                    if leader.is_some_and(|l| l != c) {
                        return None;
                    }
                    leader = Some(c);
                }
                ClassItem::Range(lo, hi) if matches!(lo, ']' | '-') || hi == ']' => return None,
                ClassItem::Char(c) => rest.push(c),
                ClassItem::Range(lo, hi) => {
                    rest.push(lo);
                    rest.push('-');
                    rest.push(hi);
                }
            }
        }

        if !self.negated && leader.is_none() && rest.starts_with(['!', '^']) {
            return None;
        }

        let mut out = String::from("[");
        if self.negated {
            out.push('!');
        }
        out.extend(leader);
        out.push_str(&rest);
        out.push(']');
        Some(out)
    }
}

/// One member at `i`, unescaping `\x`. Returns it and the next index.
fn class_char(chars: &[char], i: usize) -> Option<(char, usize)> {
    match chars.get(i)? {
        '\\' => chars.get(i + 1).map(|&c| (c, i + 2)),
        &c => Some((c, i + 1)),
    }
}

fn split_at_separator(item: ClassItem) -> Vec<ClassItem> {
    match item {
        ClassItem::Char('/') => Vec::new(),
        ClassItem::Range(lo, hi) if lo <= '/' && '/' <= hi => {
            let mut parts = Vec::new();
            if lo < '/' {
                parts.push(ClassItem::Range(lo, '.'));
            }
            if hi > '/' {
                parts.push(ClassItem::Range('0', hi));
            }
            parts
        }
        item => vec![item],
    }
}

#[cfg(test)]
#[path = "rule_tests.rs"]
mod tests;
