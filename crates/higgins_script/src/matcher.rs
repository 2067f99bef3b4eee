use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::ScriptError;

/// Captured word groups, one per `*` or `@root` part.
pub(crate) type Groups = Vec<Vec<String>>;

lazy_static! {
    static ref PUNCTUATION: [(Regex, &'static str); 4] = [
        (Regex::new(r"\s*\.+\s*").expect("valid regex"), " . "),
        (Regex::new(r"\s*,+\s*").expect("valid regex"), " , "),
        (Regex::new(r"\s*\?+\s*").expect("valid regex"), " ? "),
        (Regex::new(r"\s*;+\s*").expect("valid regex"), " ; "),
    ];
}

/// Words a group insert stops at.
const CLAUSE_BREAKS: [&str; 3] = [",", ".", ";"];

/// Splits input into words, with each punctuation run as its own word.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    let mut spaced = text.to_string();
    for (pattern, replacement) in PUNCTUATION.iter() {
        spaced = pattern.replace_all(&spaced, *replacement).into_owned();
    }
    spaced.split_whitespace().map(str::to_owned).collect()
}

/// Replaces each word found in `table` (case-insensitively) with its expansion.
pub(crate) fn substitute(words: &[String], table: &HashMap<String, Vec<String>>) -> Vec<String> {
    let mut output = Vec::with_capacity(words.len());
    for word in words {
        match table.get(&word.to_lowercase()) {
            Some(expansion) => output.extend(expansion.iter().cloned()),
            None => output.push(word.clone()),
        }
    }
    output
}

/// Matches decomposition `parts` against `words`, returning the captured groups.
pub(crate) fn match_decomp(
    parts: &[String],
    words: &[String],
    synons: &HashMap<String, Vec<String>>,
) -> Result<Option<Groups>, ScriptError> {
    let mut groups = Vec::new();
    if match_parts(parts, words, synons, &mut groups)? {
        Ok(Some(groups))
    } else {
        Ok(None)
    }
}

fn match_parts(
    parts: &[String],
    words: &[String],
    synons: &HashMap<String, Vec<String>>,
    groups: &mut Groups,
) -> Result<bool, ScriptError> {
    let Some((part, rest)) = parts.split_first() else {
        return Ok(words.is_empty());
    };

    if part == "*" {
        // Longest capture first.
        for split in (0..=words.len()).rev() {
            groups.push(words[..split].to_vec());
            if match_parts(rest, &words[split..], synons, groups)? {
                return Ok(true);
            }
            groups.pop();
        }
        return Ok(false);
    }

    let Some((word, remaining)) = words.split_first() else {
        return Ok(false);
    };

    if let Some(root) = part.strip_prefix('@') {
        let synonyms = synons
            .get(&root.to_lowercase())
            .ok_or_else(|| ScriptError::UnknownSynonym(root.to_string()))?;
        if !synonyms.contains(&word.to_lowercase()) {
            return Ok(false);
        }
        groups.push(vec![word.clone()]);
        if match_parts(rest, remaining, synons, groups)? {
            return Ok(true);
        }
        groups.pop();
        return Ok(false);
    }

    if part.to_lowercase() != word.to_lowercase() {
        return Ok(false);
    }
    match_parts(rest, remaining, synons, groups)
}

/// Parses a `(n)` group reference.
pub(crate) fn group_reference(word: &str) -> Option<usize> {
    word.strip_prefix('(')?.strip_suffix(')')?.parse().ok()
}

/// Builds output words from a reassembly template and captured groups.
pub(crate) fn reassemble(reasmb: &[String], groups: &Groups) -> Result<Vec<String>, ScriptError> {
    let mut output = Vec::new();
    for word in reasmb {
        match group_reference(word) {
            Some(index) => {
                let group = index
                    .checked_sub(1)
                    .and_then(|i| groups.get(i))
                    .ok_or(ScriptError::InvalidResultIndex(index))?;
                let end = group
                    .iter()
                    .position(|w| CLAUSE_BREAKS.contains(&w.as_str()))
                    .unwrap_or(group.len());
                output.extend(group[..end].iter().cloned());
            }
            None => output.push(word.clone()),
        }
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_owned).collect()
    }

    #[test]
    fn tokenize_separates_punctuation() {
        assert_eq!(
            tokenize("Well... I think, maybe?yes;no"),
            words("Well . I think , maybe ? yes ; no")
        );
    }

    #[test]
    fn star_captures_longest_prefix_first() {
        let synons = HashMap::new();
        let groups = match_decomp(&words("* you *"), &words("I think you like you"), &synons)
            .unwrap()
            .unwrap();
        assert_eq!(groups, vec![words("I think you like"), Vec::<String>::new()]);
    }

    #[test]
    fn synonym_part_captures_the_word() {
        let mut synons = HashMap::new();
        synons.insert("sad".to_string(), words("sad unhappy depressed"));
        let groups = match_decomp(&words("* i am @sad *"), &words("today I am Unhappy"), &synons)
            .unwrap()
            .unwrap();
        assert_eq!(groups[1], vec!["Unhappy".to_string()]);
    }

    #[test]
    fn literal_parts_are_case_insensitive() {
        let synons = HashMap::new();
        assert!(match_decomp(&words("HELLO *"), &words("hello there"), &synons)
            .unwrap()
            .is_some());
        assert!(match_decomp(&words("hello"), &words("hello there"), &synons)
            .unwrap()
            .is_none());
    }

    #[test]
    fn reassemble_truncates_group_at_clause_break() {
        let groups = vec![words("my dog , and my cat")];
        let output = reassemble(&words("Tell me about (1) ."), &groups).unwrap();
        assert_eq!(output, words("Tell me about my dog ."));
    }
}
