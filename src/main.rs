use std::env;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use jobportal::cli::{execute, Command, Outcome, HELP};
use jobportal::config::PortalConfig;
use jobportal::identity::{MockAuthProvider, SessionStore};
use jobportal::portal::Portal;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program}                      # interactive shell\n  {program} -c \"<command>\" [-c ...]   # run commands and exit\n  {program} -h | --help\n\nEnvironment:\n  JOBPORTAL_GATE_POLICY   blank (default) | redirect\n  JOBPORTAL_LOGIN_PATH    login location used by the redirect policy (default /login)\n  JOBPORTAL_LANDING_PATH  location after logout (default /)\n  JOBPORTAL_LOG           log filter when RUST_LOG is unset (default info)\n  JOBPORTAL_HISTORY       file for interactive history\n\n{HELP}"
    );
}

/// Run one line. Returns false when the shell should exit.
fn run_line(portal: &mut Portal, line: &str) -> bool {
    match Command::parse(line).and_then(|c| match c {
        Some(cmd) => execute(portal, cmd).map(Some),
        None => Ok(None),
    }) {
        Ok(Some(Outcome::Quit)) => false,
        Ok(Some(Outcome::Print(text))) => { println!("{}", text); true }
        Ok(None) => true,
        Err(e) => {
            warn!(target: "cli", "command failed: {}", e);
            println!("[!] {}", e.notice());
            true
        }
    }
}

fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().collect();
    let program = args.remove(0);
    let mut commands: Vec<String> = Vec::new();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--command" => {
                if i + 1 >= args.len() { eprintln!("-c requires a value"); print_usage(&program); std::process::exit(2); }
                commands.push(args[i + 1].clone());
                i += 2; continue;
            }
            "-h" | "--help" => { print_usage(&program); return Ok(()); }
            unk => { eprintln!("Unrecognized argument: {}", unk); print_usage(&program); std::process::exit(2); }
        }
    }

    let config = PortalConfig::from_env().map_err(|e| anyhow!(e))?;

    // Init logging; RUST_LOG wins over the configured default
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .context("invalid log filter")?;
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    info!(
        target: "startup",
        "jobportal starting: gate_policy={:?}, login_path='{}', landing_path='{}', history={:?}",
        config.gate_policy, config.login_path, config.landing_path, config.history_file
    );

    let store = Arc::new(SessionStore::new(Box::new(MockAuthProvider)));
    let mut portal = Portal::new(store, &config);

    if !commands.is_empty() {
        for c in &commands {
            if !run_line(&mut portal, c) { break; }
        }
        return Ok(());
    }

    let mut rl = DefaultEditor::new().context("failed to start line editor")?;
    if let Some(h) = &config.history_file {
        // Missing history on first run is expected
        let _ = rl.load_history(h);
    }
    println!("JobPortal shell. Type 'help' for commands.");
    loop {
        let prompt = format!("{}> ", portal.location());
        match rl.readline(&prompt) {
            Ok(line) => {
                if !line.trim().is_empty() { let _ = rl.add_history_entry(line.as_str()); }
                if !run_line(&mut portal, &line) { break; }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(anyhow!("readline failed: {}", e)),
        }
    }
    if let Some(h) = &config.history_file {
        if let Err(e) = rl.save_history(h) { warn!(target: "cli", "could not save history to {}: {}", h, e); }
    }
    Ok(())
}
