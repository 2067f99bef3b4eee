mod common;

use higgins_script::{Reply, Script, Session};
use pretty_assertions::assert_eq;

fn session() -> Session {
    common::init_logging();
    Session::with_seed(Script::parse(common::SCRIPT).unwrap(), 7)
}

fn say(text: &str) -> Reply {
    Reply::Say(text.to_string())
}

#[test]
fn synonym_decomp_wins_over_generic_one() {
    let mut session = session();
    assert_eq!(
        session.respond("I'm unhappy.").unwrap(),
        say("Why are you unhappy ?")
    );
    assert_eq!(
        session.respond("I'm tired").unwrap(),
        say("How long have you been tired ?")
    );
}

#[test]
fn fallback_reassemblies_rotate() {
    let mut session = session();
    assert_eq!(session.respond("blah").unwrap(), say("Please go on."));
    assert_eq!(session.respond("blah").unwrap(), say("Tell me more."));
    assert_eq!(session.respond("blah").unwrap(), say("Please go on."));
}

#[test]
fn goto_redirects_to_another_key() {
    let mut session = session();
    assert_eq!(
        session.respond("I apologise").unwrap(),
        say("No need to apologise.")
    );
}

#[test]
fn saved_decomp_output_is_recalled_from_memory() {
    let mut session = session();
    assert_eq!(
        session.respond("my dog is loud").unwrap(),
        say("Earlier you said your dog is loud .")
    );
    assert_eq!(session.memory_len(), 0);
}

#[test]
fn quit_phrase_is_case_and_space_insensitive() {
    let mut session = session();
    assert_eq!(session.respond("  BYE ").unwrap(), Reply::Quit);
}

#[test]
fn lambda_reassembly_delegates() {
    let mut session = session();
    assert_eq!(
        session.respond("how is the weather").unwrap(),
        Reply::Delegate("forecast".to_string())
    );
    assert_eq!(
        session.script().delegates().collect::<Vec<_>>(),
        vec!["forecast"]
    );
}

#[test]
fn greeting_and_farewell_come_from_script() {
    let mut session = session();
    assert_eq!(session.initial().as_deref(), Some("Hello."));
    assert_eq!(session.farewell().as_deref(), Some("Goodbye."));
}

#[test]
fn capitalised_key_still_matches_input() {
    common::init_logging();
    let text = format!("{}key: Hello 3\ndecomp: *\nreasmb: Hi there.\n", common::SCRIPT);
    let mut session = Session::with_seed(Script::parse(&text).unwrap(), 7);
    assert_eq!(session.respond("hello you").unwrap(), say("Hi there."));
    assert_eq!(session.respond("HELLO").unwrap(), say("Hi there."));
}
