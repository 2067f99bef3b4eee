#![allow(dead_code)]

use std::sync::Once;

pub const SCRIPT: &str = "\
initial: Hello.
final: Goodbye.
quit: bye
pre: i'm i am
post: my your
post: i you
synon: sad unhappy depressed
key: xnone
decomp: *
reasmb: Please go on.
reasmb: Tell me more.
key: sorry
decomp: *
reasmb: No need to apologise.
key: apologise
decomp: *
reasmb: goto sorry
key: am 2
decomp: * i am @sad *
reasmb: Why are you (2) ?
decomp: * i am *
reasmb: How long have you been (2) ?
key: my
decomp: $ * my *
reasmb: Earlier you said your (2) .
lambda: forecast
key: weather
decomp: *
reasmb: lambda forecast
";

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(higgins_logging::initialize_for_tests);
}
