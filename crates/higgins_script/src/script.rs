use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use higgins_logging::{higgins_debug, higgins_trace};

use crate::ScriptError;

/// Key consulted when nothing else in the input matches.
pub const FALLBACK_KEY: &str = "xnone";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomp {
    pub parts: Vec<String>,
    /// Output goes to memory instead of being returned.
    pub save: bool,
    pub reasmbs: Vec<Vec<String>>,
}

impl Decomp {
    /// Number of groups a successful match captures.
    fn group_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|part| *part == "*" || part.starts_with('@'))
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    pub word: String,
    pub weight: i32,
    pub decomps: Vec<Decomp>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    pub(crate) initials: Vec<String>,
    pub(crate) finals: Vec<String>,
    pub(crate) quits: BTreeSet<String>,
    pub(crate) delegates: BTreeSet<String>,
    pub(crate) pres: HashMap<String, Vec<String>>,
    pub(crate) posts: HashMap<String, Vec<String>>,
    pub(crate) synons: HashMap<String, Vec<String>>,
    pub(crate) keys: HashMap<String, Key>,
}

impl Script {
    /// Parses and validates a single script.
    pub fn parse(text: &str) -> Result<Self, ScriptError> {
        let mut builder = ScriptBuilder::new();
        builder.add_source("<inline>", text)?;
        builder.build()
    }

    pub fn key(&self, word: &str) -> Option<&Key> {
        self.keys.get(word)
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Delegate names declared with `lambda:` lines.
    pub fn delegates(&self) -> impl Iterator<Item = &str> {
        self.delegates.iter().map(String::as_str)
    }

    fn validate(&self) -> Result<(), ScriptError> {
        match self.keys.get(FALLBACK_KEY) {
            Some(key) if !key.decomps.is_empty() => {}
            _ => return Err(ScriptError::MissingFallback),
        }

        for key in self.keys.values() {
            for decomp in &key.decomps {
                if decomp.reasmbs.is_empty() {
                    return Err(ScriptError::EmptyDecomp {
                        key: key.word.clone(),
                    });
                }
                for part in &decomp.parts {
                    if let Some(root) = part.strip_prefix('@') {
                        if !self.synons.contains_key(&root.to_lowercase()) {
                            return Err(ScriptError::UnknownSynonym(root.to_string()));
                        }
                    }
                }
                for reasmb in &decomp.reasmbs {
                    self.validate_reasmb(reasmb, decomp.group_count())?;
                }
            }
        }
        Ok(())
    }

    fn validate_reasmb(&self, reasmb: &[String], groups: usize) -> Result<(), ScriptError> {
        match reasmb.first().map(String::as_str) {
            Some("goto") => {
                let target = reasmb.get(1).map(String::as_str).unwrap_or_default();
                if !self.keys.contains_key(&target.to_lowercase()) {
                    return Err(ScriptError::UnknownGotoKey(target.to_string()));
                }
            }
            Some("lambda") => {
                let name = reasmb.get(1).map(String::as_str).unwrap_or_default();
                if !self.delegates.contains(name) {
                    return Err(ScriptError::UnknownDelegate(name.to_string()));
                }
            }
            _ => {
                for word in reasmb {
                    if let Some(index) = crate::matcher::group_reference(word) {
                        if index < 1 || index > groups {
                            return Err(ScriptError::InvalidResultIndex(index));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Accumulates script sources, then validates the merged result.
#[derive(Debug, Default)]
pub struct ScriptBuilder {
    script: Script,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads one script file.
    pub fn add_file(&mut self, path: &Path) -> Result<&mut Self, ScriptError> {
        let text = fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        higgins_debug!("Loading script {:?}", path);
        self.add_source(&path.display().to_string(), &text)
    }

    /// Reads every regular file in `dir`, in file-name order.
    pub fn add_dir(&mut self, dir: &Path) -> Result<&mut Self, ScriptError> {
        let io_err = |source| ScriptError::Io {
            path: dir.to_path_buf(),
            source,
        };
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();
        for path in paths {
            self.add_file(&path)?;
        }
        Ok(self)
    }

    /// Parses `text` into the script. `origin` names the source in errors.
    pub fn add_source(&mut self, origin: &str, text: &str) -> Result<&mut Self, ScriptError> {
        let script = &mut self.script;
        // Decomps and reasmbs attach to the most recent key of this source.
        let mut current_key: Option<String> = None;

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            if raw.trim().is_empty() {
                continue;
            }
            let Some((tag, content)) = raw.split_once(':') else {
                return Err(ScriptError::MalformedLine {
                    origin: origin.to_string(),
                    line,
                    text: raw.to_string(),
                });
            };
            let tag = tag.trim();
            let content = content.trim();
            let words: Vec<String> = content.split_whitespace().map(str::to_owned).collect();

            match tag {
                "initial" => script.initials.push(content.to_string()),
                "final" => script.finals.push(content.to_string()),
                "quit" => {
                    script.quits.insert(content.to_lowercase());
                }
                "lambda" => {
                    script.delegates.insert(content.to_string());
                }
                "pre" | "post" => {
                    let Some((word, replacement)) = words.split_first() else {
                        continue;
                    };
                    let table = if tag == "pre" {
                        &mut script.pres
                    } else {
                        &mut script.posts
                    };
                    table.insert(word.to_lowercase(), replacement.to_vec());
                }
                "synon" => {
                    if let Some(root) = words.first() {
                        let synonyms = words.iter().map(|w| w.to_lowercase()).collect();
                        script.synons.insert(root.to_lowercase(), synonyms);
                    }
                }
                "key" => {
                    let Some(word) = words.first() else {
                        return Err(ScriptError::MalformedLine {
                            origin: origin.to_string(),
                            line,
                            text: raw.to_string(),
                        });
                    };
                    let weight = match words.get(1) {
                        Some(value) => value.parse().map_err(|_| ScriptError::InvalidWeight {
                            origin: origin.to_string(),
                            line,
                            value: value.clone(),
                        })?,
                        None => 1,
                    };
                    // Input words are looked up lowercased.
                    let word = word.to_lowercase();
                    script.keys.insert(
                        word.clone(),
                        Key {
                            word: word.clone(),
                            weight,
                            decomps: Vec::new(),
                        },
                    );
                    current_key = Some(word);
                }
                "decomp" => {
                    let key = current_key
                        .as_ref()
                        .and_then(|word| script.keys.get_mut(word))
                        .ok_or_else(|| ScriptError::DecompWithoutKey {
                            origin: origin.to_string(),
                            line,
                        })?;
                    let save = words.first().is_some_and(|word| word == "$");
                    let parts = if save { words[1..].to_vec() } else { words };
                    key.decomps.push(Decomp {
                        parts,
                        save,
                        reasmbs: Vec::new(),
                    });
                }
                "reasmb" => {
                    let decomp = current_key
                        .as_ref()
                        .and_then(|word| script.keys.get_mut(word))
                        .and_then(|key| key.decomps.last_mut())
                        .ok_or_else(|| ScriptError::ReasmbWithoutDecomp {
                            origin: origin.to_string(),
                            line,
                        })?;
                    decomp.reasmbs.push(words);
                }
                "follow" => {}
                other => higgins_trace!("{}:{}: ignoring unknown tag {:?}", origin, line, other),
            }
        }
        Ok(self)
    }

    pub fn build(self) -> Result<Script, ScriptError> {
        self.script.validate()?;
        higgins_debug!("Script ready with {} keys", self.script.keys.len());
        Ok(self.script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = "\
key: xnone
decomp: *
reasmb: Please go on.
";

    #[test]
    fn parses_weights_and_save_marker() {
        let text = format!(
            "{MINIMAL}\nkey: remember 5\ndecomp: $ * i remember *\nreasmb: Do you often think of (2) ?\n"
        );
        let script = Script::parse(&text).unwrap();
        let key = script.key("remember").unwrap();
        assert_eq!(key.weight, 5);
        assert!(key.decomps[0].save);
        assert_eq!(key.decomps[0].parts, vec!["*", "i", "remember", "*"]);
        assert_eq!(script.key("xnone").unwrap().weight, 1);
    }

    #[test]
    fn rejects_reasmb_without_decomp() {
        let err = Script::parse("key: xnone\nreasmb: hi\n").unwrap_err();
        assert!(matches!(
            err,
            ScriptError::ReasmbWithoutDecomp { line: 2, .. }
        ));
    }

    #[test]
    fn rejects_out_of_range_group_reference() {
        let text = format!("{MINIMAL}key: dream\ndecomp: * dream\nreasmb: About (2) ?\n");
        let err = Script::parse(&text).unwrap_err();
        assert!(matches!(err, ScriptError::InvalidResultIndex(2)));
    }

    #[test]
    fn key_words_match_regardless_of_case() {
        let text = format!(
            "{MINIMAL}key: Hello\ndecomp: *\nreasmb: Hi.\nkey: greet\ndecomp: *\nreasmb: goto HELLO\n"
        );
        let script = Script::parse(&text).unwrap();
        assert_eq!(script.key("hello").unwrap().word, "hello");
        assert!(script.key("Hello").is_none());
    }

    #[test]
    fn lambda_needs_a_declared_delegate() {
        let undeclared = format!("{MINIMAL}key: weather\ndecomp: *\nreasmb: lambda forecast\n");
        let err = Script::parse(&undeclared).unwrap_err();
        assert!(matches!(err, ScriptError::UnknownDelegate(name) if name == "forecast"));

        let declared = format!("lambda: forecast\n{undeclared}");
        let script = Script::parse(&declared).unwrap();
        assert_eq!(script.delegates().collect::<Vec<_>>(), vec!["forecast"]);
    }

    #[test]
    fn missing_fallback_is_an_error() {
        let err = Script::parse("key: hello\ndecomp: *\nreasmb: Hi.\n").unwrap_err();
        assert!(matches!(err, ScriptError::MissingFallback));
    }
}
