use higgins_core::{AppViewModel, OutputState};

/// One change to apply to the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    ShowThinking,
    ShowOutput(String),
    ShowError(String),
    Prompt,
}

/// Commands that move the console from `previous` to `current`.
///
/// The terminal echoes typed input itself, so only output transitions are drawn.
pub fn render(previous: &AppViewModel, current: &AppViewModel) -> Vec<ConsoleCommand> {
    let mut cmds = Vec::new();

    match current.output_state {
        OutputState::Thinking => {
            // A new submit while already thinking restarts the indicator.
            if previous.output_state != OutputState::Thinking
                || current.outstanding > previous.outstanding
            {
                cmds.push(ConsoleCommand::ShowThinking);
            }
        }
        OutputState::Idle => {
            if previous.output_state != OutputState::Idle || previous.output != current.output {
                cmds.push(ConsoleCommand::ShowOutput(current.output.clone()));
            }
        }
        OutputState::Failed => {
            if previous.output_state != OutputState::Failed || previous.error != current.error {
                let error = current.error.clone().unwrap_or_default();
                cmds.push(ConsoleCommand::ShowError(error));
            }
        }
    }

    cmds
}
