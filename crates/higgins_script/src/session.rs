use std::cmp::Reverse;
use std::collections::HashMap;

use higgins_logging::higgins_debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::matcher::{match_decomp, reassemble, substitute, tokenize};
use crate::script::FALLBACK_KEY;
use crate::{Script, ScriptError};

const MAX_GOTO_DEPTH: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Say(String),
    /// Answer must come from the named delegate function.
    Delegate(String),
    /// Input was a quit phrase.
    Quit,
}

enum KeyOutcome {
    Words(Vec<String>),
    Delegate(String),
}

/// Conversation state over a loaded script.
#[derive(Debug)]
pub struct Session {
    script: Script,
    /// Next reassembly per (key, decomp index).
    rotation: HashMap<(String, usize), usize>,
    memory: Vec<Vec<String>>,
    rng: StdRng,
}

impl Session {
    pub fn new(script: Script) -> Self {
        Self::with_rng(script, StdRng::from_entropy())
    }

    /// Deterministic session for reproducible runs.
    pub fn with_seed(script: Script, seed: u64) -> Self {
        Self::with_rng(script, StdRng::seed_from_u64(seed))
    }

    fn with_rng(script: Script, rng: StdRng) -> Self {
        Self {
            script,
            rotation: HashMap::new(),
            memory: Vec::new(),
            rng,
        }
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn memory_len(&self) -> usize {
        self.memory.len()
    }

    /// Random greeting, if the script declares any.
    pub fn initial(&mut self) -> Option<String> {
        self.script.initials.choose(&mut self.rng).cloned()
    }

    /// Random farewell, if the script declares any.
    pub fn farewell(&mut self) -> Option<String> {
        self.script.finals.choose(&mut self.rng).cloned()
    }

    pub fn respond(&mut self, text: &str) -> Result<Reply, ScriptError> {
        if self.script.quits.contains(&text.trim().to_lowercase()) {
            return Ok(Reply::Quit);
        }

        let words = substitute(&tokenize(text), &self.script.pres);
        higgins_debug!("Input after pre-substitution: {:?}", words);

        let mut keys: Vec<(String, i32)> = words
            .iter()
            .filter_map(|word| self.script.keys.get(&word.to_lowercase()))
            .map(|key| (key.word.clone(), key.weight))
            .collect();
        keys.sort_by_key(|(_, weight)| Reverse(*weight));
        higgins_debug!("Sorted keys: {:?}", keys);

        for (key, _) in &keys {
            match self.match_key(&words, key, 0)? {
                Some(KeyOutcome::Delegate(name)) => return Ok(Reply::Delegate(name)),
                Some(KeyOutcome::Words(output)) if !output.is_empty() => {
                    higgins_debug!("Output from key {:?}: {:?}", key, output);
                    return Ok(Reply::Say(output.join(" ")));
                }
                _ => {}
            }
        }

        let output = if self.memory.is_empty() {
            let reasmb = self.next_reasmb(FALLBACK_KEY, 0)?;
            higgins_debug!("Output from {}: {:?}", FALLBACK_KEY, reasmb);
            reasmb
        } else {
            let index = self.rng.gen_range(0..self.memory.len());
            let remembered = self.memory.remove(index);
            higgins_debug!("Output from memory: {:?}", remembered);
            remembered
        };
        Ok(Reply::Say(output.join(" ")))
    }

    fn next_reasmb(&mut self, key: &str, decomp_index: usize) -> Result<Vec<String>, ScriptError> {
        let reasmbs = self
            .script
            .keys
            .get(key)
            .and_then(|k| k.decomps.get(decomp_index))
            .map(|decomp| &decomp.reasmbs)
            .ok_or(ScriptError::MissingFallback)?;
        let counter = self
            .rotation
            .entry((key.to_string(), decomp_index))
            .or_insert(0);
        let reasmb = reasmbs[*counter % reasmbs.len()].clone();
        *counter += 1;
        Ok(reasmb)
    }

    fn match_key(
        &mut self,
        words: &[String],
        key: &str,
        depth: usize,
    ) -> Result<Option<KeyOutcome>, ScriptError> {
        if depth > MAX_GOTO_DEPTH {
            return Err(ScriptError::GotoLoop(MAX_GOTO_DEPTH));
        }
        let decomp_count = self
            .script
            .keys
            .get(key)
            .map_or(0, |k| k.decomps.len());

        for index in 0..decomp_count {
            let (groups, save) = {
                let decomp = &self.script.keys[key].decomps[index];
                match match_decomp(&decomp.parts, words, &self.script.synons)? {
                    Some(groups) => (groups, decomp.save),
                    None => continue,
                }
            };
            let groups: Vec<Vec<String>> = groups
                .iter()
                .map(|group| substitute(group, &self.script.posts))
                .collect();
            let reasmb = self.next_reasmb(key, index)?;
            higgins_debug!("Key {:?} decomp {} matched, using {:?}", key, index, reasmb);

            match reasmb.first().map(String::as_str) {
                Some("goto") => {
                    let target = reasmb
                        .get(1)
                        .map(|word| word.to_lowercase())
                        .unwrap_or_default();
                    if !self.script.keys.contains_key(&target) {
                        return Err(ScriptError::UnknownGotoKey(target));
                    }
                    return self.match_key(words, &target, depth + 1);
                }
                Some("lambda") => {
                    let name = reasmb.get(1).cloned().unwrap_or_default();
                    return Ok(Some(KeyOutcome::Delegate(name)));
                }
                _ => {}
            }

            let output = reassemble(&reasmb, &groups)?;
            if save {
                higgins_debug!("Saved to memory: {:?}", output);
                self.memory.push(output);
                continue;
            }
            return Ok(Some(KeyOutcome::Words(output)));
        }
        Ok(None)
    }
}
