// Tue Jan 13 2026 - Alex

use ahash::AHashSet;
use once_cell::sync::Lazy;

/// C++ keywords and the Windows SDK macros that break generated headers.
pub static DEFAULT_RESERVED_WORDS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break",
        "case", "catch", "char", "char8_t", "char16_t", "char32_t", "class", "compl", "concept",
        "const", "consteval", "constexpr", "constinit", "const_cast", "continue", "co_await",
        "co_return", "co_yield", "decltype", "default", "delete", "do", "double", "dynamic_cast",
        "else", "enum", "explicit", "export", "extern", "false", "float", "for", "friend", "goto",
        "if", "inline", "int", "long", "mutable", "namespace", "new", "noexcept", "not", "not_eq",
        "nullptr", "operator", "or", "or_eq", "private", "protected", "public", "register",
        "reinterpret_cast", "requires", "return", "short", "signed", "sizeof", "static",
        "static_assert", "static_cast", "struct", "switch", "template", "this", "thread_local",
        "throw", "true", "try", "typedef", "typeid", "typename", "union", "unsigned", "using",
        "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
        "TRUE", "FALSE", "IN", "OUT", "OPTIONAL", "CONST", "DELETE", "NULL", "TEXT", "ERROR",
        "PURE", "min", "max",
    ]
});

/// Words no resolved identifier may equal.
#[derive(Debug, Clone, Default)]
pub struct ReservedWords {
    words: AHashSet<String>,
}

impl ReservedWords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    pub fn defaults() -> Self {
        Self::new(DEFAULT_RESERVED_WORDS.iter().copied())
    }

    pub fn insert(&mut self, word: impl Into<String>) {
        self.words.insert(word.into());
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
