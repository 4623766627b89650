//! Pasteboard - Paste text or images, click to copy them back
//!
//! Reads the system clipboard when a paste is triggered, keeps recognized
//! items (plain text and PNG images) newest first, and writes any of them
//! back to the clipboard on request.

pub mod board;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod console;
pub mod errors;
pub mod trigger;

use board::{LogNotifier, PasteView};
use clipboard::ArboardClipboard;
use trigger::{Trigger, TriggerHub};

/// Application main entry point
pub fn run() {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("Pasteboard starting...");

    config::init_settings();
    let settings = config::get_settings();
    let trigger = match settings.trigger() {
        Ok(trigger) => trigger,
        Err(e) => {
            log::warn!("Invalid shortcut '{}': {}, using defaults", settings.shortcut, e);
            Trigger::default_hotkeys()
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            log::error!("Failed to start runtime: {}", e);
            return;
        }
    };

    runtime.block_on(async {
        let hub = TriggerHub::new();
        let mut view = PasteView::new(ArboardClipboard::new(), LogNotifier, trigger, &settings);
        view.mount(&hub);
        if let Some(error) = view.state().error() {
            log::error!("{} ({})", error.message, error.link.as_deref().unwrap_or("-"));
        }

        println!("Paste text or an image with CTRL+V or CMD+V. Type 'help' for commands.");
        let input = tokio::io::BufReader::new(tokio::io::stdin());
        let mut out = std::io::stdout();
        if let Err(e) = console::run_console(&mut view, &hub, input, &mut out).await {
            log::error!("Console error: {}", e);
        }

        view.unmount();
    });

    log::info!("Pasteboard stopped");
}
