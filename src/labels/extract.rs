use crate::labels::{Directive, DirectivePattern};

/// Extracts all label directives from `description`, in the order in which they appear.
///
/// Matches never overlap, each search starts where the previous match ended. Duplicate label
/// names are kept, resolving them is up to [`reconcile`](crate::labels::reconcile).
pub fn extract_directives(description: &str, pattern: &DirectivePattern) -> Vec<Directive> {
    let regex = pattern.regex();
    let mut directives = Vec::new();
    let mut position = 0;

    while position <= description.len() {
        let Some(captures) = regex.captures_at(description, position) else {
            break;
        };
        // Group 0 always participates in a match.
        let Some(whole) = captures.get(0) else {
            break;
        };

        position = if whole.is_empty() {
            // Step over the next character so that an empty match cannot stall the loop.
            match description[whole.end()..].chars().next() {
                Some(c) => whole.end() + c.len_utf8(),
                None => description.len() + 1,
            }
        } else {
            whole.end()
        };

        let mark = captures.get(1).map_or("", |m| m.as_str());
        let Some(name) = captures
            .get(2)
            .map(|m| m.as_str().trim())
            .filter(|name| !name.is_empty())
        else {
            continue;
        };
        directives.push(Directive::new(name.to_string(), is_checked(mark)));
    }
    directives
}

/// A checkbox is ticked only if its mark is a single `x` or `X`, optionally surrounded by
/// whitespace.
fn is_checked(mark: &str) -> bool {
    mark.trim().eq_ignore_ascii_case("x")
}
