// Redis key namespacing
//
// Every logical key is stored as "{prefix}:{key}". Enumeration uses a glob
// pattern built from the escaped prefix, and results are filtered again so a
// map never reports keys outside its own namespace.

/// Separator appended to a non-empty prefix
pub const PREFIX_SEPARATOR: char = ':';

/// Characters with special meaning in Redis glob patterns
const GLOB_SPECIAL: [char; 5] = ['*', '?', '[', ']', '\\'];

/// Immutable key prefix for one logical map
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyPrefix {
    prefix: String,
}

impl KeyPrefix {
    /// Normalizes an optional namespace
    ///
    /// - `None` → no prefix
    /// - `Some("ns")` → `"ns:"`
    pub fn new(namespace: Option<&str>) -> Self {
        let prefix = match namespace {
            Some(ns) => format!("{}{}", ns, PREFIX_SEPARATOR),
            None => String::new(),
        };
        Self { prefix }
    }

    /// The prefix as stored, separator included
    pub fn as_str(&self) -> &str {
        &self.prefix
    }

    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty()
    }

    /// Physical key for a logical key
    pub fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// Logical key for a physical key, or None if it is outside this namespace
    pub fn strip<'a>(&self, full_key: &'a str) -> Option<&'a str> {
        full_key.strip_prefix(self.prefix.as_str())
    }

    /// Glob pattern matching every key in this namespace
    ///
    /// # Format
    /// - `"ns:"` → `"ns:*"`
    /// - `"a*b:"` → `"a\*b:*"`
    /// - no prefix → `"*"`
    pub fn pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.prefix.len() + 1);
        for c in self.prefix.chars() {
            if GLOB_SPECIAL.contains(&c) {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('*');
        pattern
    }
}
