use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use higgins_core::{update, AppState, AppViewModel, Effect, Msg, OutputState};
use higgins_engine::{EngineHandle, HttpInvoker, Invoker, LocalInvoker};
use higgins_logging::higgins_info;
use higgins_script::{ScriptBuilder, Session};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::ui::console::Console;
use super::ui::render::{render, ConsoleCommand};

/// Longest wait for a message before a render tick.
const TICK: Duration = Duration::from_millis(75);

pub fn run_chat(config: &AppConfig) -> Result<()> {
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let (invoker, greeting) = build_invoker(config)?;
    let console = Console::new(io::stdout());
    let mut frontend = Frontend::start(config, invoker, msg_tx.clone(), true, console)?;

    if let Some(greeting) = greeting {
        frontend.console.apply([ConsoleCommand::ShowOutput(greeting)])?;
    }
    frontend.console.apply([ConsoleCommand::Prompt])?;

    let input_closed = Arc::new(AtomicBool::new(false));
    spawn_key_listener(msg_tx, input_closed.clone());

    loop {
        // Read before pumping: everything the listener sent is then queued.
        let closed = input_closed.load(Ordering::SeqCst);
        frontend.pump(&msg_rx)?;
        if closed && frontend.state.output_state() != OutputState::Thinking {
            break;
        }
    }
    higgins_info!("Input closed, leaving chat");
    Ok(())
}

pub fn run_ask(config: &AppConfig, text: String) -> Result<()> {
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let (invoker, _greeting) = build_invoker(config)?;
    let console = Console::new(io::stdout());
    let mut frontend = Frontend::start(config, invoker, msg_tx, false, console)?;

    frontend.dispatch(Msg::Ask(text))?;
    loop {
        frontend.pump(&msg_rx)?;
        match frontend.state.output_state() {
            OutputState::Thinking => continue,
            OutputState::Idle => return Ok(()),
            OutputState::Failed => {
                let error = frontend.state.view().error.unwrap_or_default();
                return Err(anyhow!("invocation failed: {error}"));
            }
        }
    }
}

/// Script-backed invoker when a local script is configured, HTTP otherwise.
fn build_invoker(config: &AppConfig) -> Result<(Arc<dyn Invoker>, Option<String>)> {
    let Some(local) = &config.local else {
        let invoker = HttpInvoker::new(config.invoke_settings())?;
        return Ok((Arc::new(invoker), None));
    };

    let mut builder = ScriptBuilder::new();
    builder.add_file(&local.core)?;
    if let Some(addons) = &local.addons {
        builder.add_dir(addons)?;
    }
    let script = builder.build()?;
    higgins_info!("Answering locally from {:?}", local.core);

    let mut invoker = LocalInvoker::new(Session::new(script));
    if !config.delegates.is_empty() {
        let remote = HttpInvoker::new(config.invoke_settings())?;
        invoker = invoker.with_delegates(config.delegate_map(), Arc::new(remote));
    }
    let greeting = invoker.greeting();
    Ok((Arc::new(invoker), greeting))
}

/// Every stdin line is typed text followed by Enter, delivered as one message.
fn spawn_key_listener(msg_tx: mpsc::Sender<Msg>, input_closed: Arc<AtomicBool>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            let text = line.trim_end_matches('\r').to_string();
            if msg_tx.send(Msg::LineEntered(text)).is_err() {
                break;
            }
        }
        input_closed.store(true, Ordering::SeqCst);
    });
}

struct Frontend<W: Write> {
    state: AppState,
    shown: AppViewModel,
    runner: EffectRunner,
    console: Console<W>,
    interactive: bool,
}

impl<W: Write> Frontend<W> {
    fn start(
        config: &AppConfig,
        invoker: Arc<dyn Invoker>,
        msg_tx: mpsc::Sender<Msg>,
        interactive: bool,
        console: Console<W>,
    ) -> Result<Self> {
        let engine = EngineHandle::new(invoker, config.function_name.clone())
            .context("failed to start invocation runtime")?;
        let state = AppState::new();
        Ok(Self {
            shown: state.view(),
            state,
            runner: EffectRunner::new(engine, msg_tx),
            console,
            interactive,
        })
    }

    /// Waits up to one tick for a message, then drains the rest of the queue.
    fn pump(&mut self, msg_rx: &mpsc::Receiver<Msg>) -> Result<()> {
        let first = msg_rx.recv_timeout(TICK).unwrap_or(Msg::Tick);
        self.dispatch(first)?;
        while let Ok(msg) = msg_rx.try_recv() {
            self.dispatch(msg)?;
        }
        Ok(())
    }

    fn dispatch(&mut self, msg: Msg) -> Result<()> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        let ui_effects = self.runner.enqueue(effects);

        if self.state.consume_dirty() {
            let view = self.state.view();
            let mut cmds = render(&self.shown, &view);
            self.shown = view;
            if !self.interactive {
                // One-shot mode prints only the answer; failures become the exit error.
                cmds.retain(|cmd| matches!(cmd, ConsoleCommand::ShowOutput(_)));
            }
            self.console.apply(cmds)?;
        }

        if self.interactive && ui_effects.contains(&Effect::FocusInput) {
            self.console.apply([ConsoleCommand::Prompt])?;
        }
        Ok(())
    }
}
