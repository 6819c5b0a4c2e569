//! Nesting state shared by [`JsonReader`](crate::JsonReader) and
//! [`JsonWriter`](crate::JsonWriter).
//!
//! Both keep a stack of scopes that starts as `[Root]`:
//!
//! - a value at `Root` turns it into `Closed`, so a document holds one root value
//! - `EmptyList` becomes `List` at the first value, `EmptyMap` becomes `Map` at the
//!   first key
//! - `Key` is pushed by a key and popped by the value that follows it

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Root,
    List,
    EmptyList,
    Map,
    EmptyMap,
    Key,
    Closed,
}

impl Scope {
    pub const fn is_map(self) -> bool {
        matches!(self, Self::Map | Self::EmptyMap)
    }

    pub const fn is_list(self) -> bool {
        matches!(self, Self::List | Self::EmptyList)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Root => "ROOT",
            Self::List => "LIST",
            Self::EmptyList => "EMPTY_LIST",
            Self::Map => "MAP",
            Self::EmptyMap => "EMPTY_MAP",
            Self::Key => "KEY",
            Self::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stack of open scopes. Never empty: the bottom is `Root` or `Closed`.
#[derive(Debug, Clone)]
pub(crate) struct ScopeStack {
    scopes: Vec<Scope>,
}

impl ScopeStack {
    pub(crate) fn new() -> Self {
        Self {
            scopes: vec![Scope::Root],
        }
    }

    pub(crate) fn top(&self) -> Scope {
        self.scopes.last().copied().unwrap_or(Scope::Closed)
    }

    pub(crate) fn push(&mut self, scope: Scope) {
        self.scopes.push(scope);
    }

    pub(crate) fn pop(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    pub(crate) fn replace_top(&mut self, scope: Scope) {
        if let Some(top) = self.scopes.last_mut() {
            *top = scope;
        }
    }

    /// Open containers, not counting the root.
    pub(crate) fn depth(&self) -> usize {
        self.scopes.len() - 1
    }

    /// Open maps and lists. Pending keys are not counted.
    pub(crate) fn containers(&self) -> usize {
        self.scopes
            .iter()
            .filter(|scope| scope.is_map() || scope.is_list())
            .count()
    }
}
