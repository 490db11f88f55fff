use indexmap::IndexMap;
use regex::{NoExpand, Regex};

/// Patches rendered declarations into `existing` header text.
///
/// For each variable, every `[specifiers] const <Type> <var>[..]? [attrs] = {..};`
/// statement is replaced by the new text. Variables with no such statement are
/// appended as `"\n" + decl + "\n"`. Everything else is kept verbatim.
pub fn merge_declarations(existing: &str, declarations: &IndexMap<String, String>) -> String {
    let mut content = existing.to_owned();

    for (var, declaration) in declarations {
        let pattern = format!(
            r"(?s)(?:\w+[ \t]+)*const\s+\S+\s+{}\s*(?:\[[^\]]*\])?(?:\s+\w+)*\s*=\s*\{{.*?\}}\s*;",
            regex::escape(var)
        );
        let existing_rx = Regex::new(&pattern).ok();

        match existing_rx {
            Some(rx) if rx.is_match(&content) => {
                content = rx.replace_all(&content, NoExpand(declaration)).into_owned();
            }
            _ => {
                content.push('\n');
                content.push_str(declaration);
                content.push('\n');
            }
        }
    }

    content
}
