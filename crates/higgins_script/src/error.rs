use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{origin}:{line}: expected `tag: content`, got {text:?}")]
    MalformedLine {
        origin: String,
        line: usize,
        text: String,
    },
    #[error("{origin}:{line}: decomp before any key")]
    DecompWithoutKey { origin: String, line: usize },
    #[error("{origin}:{line}: reasmb before any decomp")]
    ReasmbWithoutDecomp { origin: String, line: usize },
    #[error("{origin}:{line}: invalid key weight {value:?}")]
    InvalidWeight {
        origin: String,
        line: usize,
        value: String,
    },
    #[error("script has no `xnone` fallback key")]
    MissingFallback,
    #[error("key {key:?} has a decomp without reassemblies")]
    EmptyDecomp { key: String },
    #[error("unknown goto key {0:?}")]
    UnknownGotoKey(String),
    #[error("lambda names undeclared delegate {0:?}")]
    UnknownDelegate(String),
    #[error("unknown synonym root {0:?}")]
    UnknownSynonym(String),
    #[error("invalid result index {0}")]
    InvalidResultIndex(usize),
    #[error("goto chain deeper than {0} keys")]
    GotoLoop(usize),
}
