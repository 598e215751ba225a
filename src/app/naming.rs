use crate::app::models::{DirectoryEntry, RunConfig};

fn is_separator(c: char) -> bool {
    !(c.is_alphanumeric() || c == '$')
}

/// Splits a file stem into words at separators (`-`, `_`, `.`, spaces and
/// other non-identifier characters) and at case changes. An uppercase run
/// followed by a lowercase letter breaks before its last capital, so
/// `XMLParser` becomes `XML` + `Parser`.
fn split_words(stem: &str) -> Vec<String> {
    let chars: Vec<char> = stem.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if is_separator(c) {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if !prev.is_uppercase() || next_is_lower {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn lower_camel_case(stem: &str) -> String {
    split_words(stem)
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let lower = word.to_lowercase();
            if i == 0 {
                lower
            } else {
                capitalize(&lower)
            }
        })
        .collect()
}

pub fn upper_camel_case(stem: &str) -> String {
    capitalize(&lower_camel_case(stem))
}

/// Identifier under which `entry` is imported and exported.
pub fn module_identifier(entry: &DirectoryEntry, runcom: &RunConfig) -> String {
    if runcom.keep_names.contains(&entry.base) {
        return entry.name.clone();
    }

    let starts_upper = entry.name.chars().next().is_some_and(char::is_uppercase);
    if runcom.force_class_naming || starts_upper {
        upper_camel_case(&entry.name)
    } else {
        lower_camel_case(&entry.name)
    }
}
