//! Glimpse CLI - a line-oriented stand-in for the popup surface.
//!
//! The controller only ever talks to a [`UiSurface`]; this binary provides
//! one backed by the terminal. Typed text is the prompt field, `:key`
//! fills and saves the API key field, and the response/banner areas print
//! as lines.

use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

use glimpse_client::GeminiClient;
use glimpse_engine::{BannerKind, Controller, UiSurface};
use glimpse_store::FileKeyStore;

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

/// Terminal implementation of the popup surface.
///
/// Field values live behind mutexes; display updates print immediately.
/// `hide_banner` only clears the tracked state - printed lines cannot be
/// retracted from a scrollback terminal.
#[derive(Default)]
struct ConsoleSurface {
    prompt: Mutex<String>,
    api_key: Mutex<String>,
    banner_visible: Mutex<bool>,
}

impl ConsoleSurface {
    fn set_prompt_value(&self, value: &str) {
        *lock(&self.prompt) = value.to_string();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

impl UiSurface for ConsoleSurface {
    fn prompt_value(&self) -> String {
        lock(&self.prompt).clone()
    }

    fn api_key_value(&self) -> String {
        lock(&self.api_key).clone()
    }

    fn set_api_key_value(&self, value: &str) {
        *lock(&self.api_key) = value.to_string();
    }

    fn set_busy(&self, busy: bool) {
        if busy {
            println!("{DIM}thinking...{RESET}");
        }
    }

    fn set_response(&self, text: &str) {
        if !text.is_empty() {
            println!("{text}");
        }
    }

    fn show_banner(&self, kind: BannerKind, message: &str) {
        *lock(&self.banner_visible) = true;
        match kind {
            BannerKind::Error => println!("{RED}{message}{RESET}"),
            BannerKind::Info => println!("{GREEN}{message}{RESET}"),
        }
    }

    fn hide_banner(&self) {
        *lock(&self.banner_visible) = false;
    }
}

fn print_help() {
    println!("Type a prompt and press enter to send it.");
    println!("  :key <value>   save your Gemini API key");
    println!("  :help          show this help");
    println!("  :quit          exit");
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let ui = Arc::new(ConsoleSurface::default());
    let controller = Controller::new(Arc::clone(&ui), FileKeyStore::new(), GeminiClient::new());

    tracing::debug!("glimpse starting");

    // Popup-open behavior: pick up the key persisted by earlier sessions.
    controller.init().await;
    if ui.api_key_value().is_empty() {
        println!("No API key saved yet. Set one with :key <value>");
    } else {
        println!("{DIM}Loaded saved API key.{RESET}");
    }

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let input = line.trim();

        match input {
            ":quit" | ":q" => break,
            ":help" => print_help(),
            _ if input.starts_with(":key") => {
                let value = input.strip_prefix(":key").unwrap_or_default();
                ui.set_api_key_value(value.trim());
                controller.save_key().await;
            }
            _ => {
                ui.set_prompt_value(input);
                controller.submit().await;
            }
        }
    }

    Ok(())
}
