//! Recognition and rendering of `[specifiers] Type var[size]? = { ... };`
//! statements.
//!
//! The recognizer is a non-greedy regex: an initializer is taken up to the
//! first `}` followed by `;`. A string or comment inside the initializer that
//! contains `};` ends it early.

use regex::Regex;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ArraySize {
    /// `name[]`
    Unsized,
    /// `name[N]`, with `N` kept as written.
    Fixed(String),
}

impl fmt::Display for ArraySize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArraySize::Unsized => f.write_str("[]"),
            ArraySize::Fixed(size) => write!(f, "[{}]", size),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    /// Leading words such as `static const`, space-joined. May be empty.
    pub specifiers: String,
    pub type_name:  String,
    pub var_name:   String,
    pub array_size: Option<ArraySize>,
    /// The initializer including its outer braces.
    pub init_block: String,
}

/// Finds every declaration of `type_name` in `text`, in order of appearance.
/// Specifiers must start a line, after optional indentation.
pub fn extract_declarations(text: &str, type_name: &str) -> Vec<Declaration> {
    let pattern = format!(
        r"(?ms)^[ \t]*(?P<spec>(?:\w+\s+)*?){}\s+(?P<var>\w+)\s*(?P<dims>\[\s*(?P<size>\d*)\s*\])?\s*=\s*(?P<init>\{{.*?\}})\s*;",
        regex::escape(type_name)
    );
    let Ok(rx) = Regex::new(&pattern) else {
        return Vec::new();
    };

    rx.captures_iter(text)
        .filter_map(|caps| {
            let array_size = caps.name("dims").map(|_| match caps.name("size") {
                Some(size) if !size.as_str().is_empty() => ArraySize::Fixed(size.as_str().to_owned()),
                _ => ArraySize::Unsized,
            });
            Some(Declaration {
                specifiers: caps.name("spec")?.as_str().split_whitespace().collect::<Vec<_>>().join(" "),
                type_name:  type_name.to_owned(),
                var_name:   caps.name("var")?.as_str().to_owned(),
                array_size,
                init_block: caps.name("init")?.as_str().to_owned(),
            })
        })
        .collect()
}

/// How a converted declaration is written back out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Type written in front of the variable. `None` keeps the source type.
    pub type_name:          Option<String>,
    /// Replaces the variable name when set.
    pub var_name:           Option<String>,
    /// Placed between the declarator and `=`, e.g. `PROGMEM`.
    pub trailing_specifier: Option<String>,
    /// Inserts `const` before the type unless the specifiers already have it.
    pub force_const:        bool,
}

impl Declaration {
    /// Writes this declaration with `initializer` in place of its own block.
    pub fn render(&self, initializer: &str, options: &RenderOptions) -> String {
        let mut words: Vec<&str> = self.specifiers.split_whitespace().collect();
        if options.force_const && !words.contains(&"const") {
            words.push("const");
        }
        words.push(options.type_name.as_deref().unwrap_or(&self.type_name));

        let var_name = options.var_name.as_deref().unwrap_or(&self.var_name);
        let declarator = match &self.array_size {
            Some(size) => format!("{}{}", var_name, size),
            None => var_name.to_owned(),
        };
        words.push(&declarator);

        if let Some(trailing) = options.trailing_specifier.as_deref().filter(|s| !s.trim().is_empty()) {
            words.push(trailing.trim());
        }

        format!("{} = {};", words.join(" "), initializer)
    }
}
