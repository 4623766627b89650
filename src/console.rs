//! Pasteboard - Console front end
//!
//! Line-oriented stand-in for a UI: key combos and `paste` become input
//! events, everything else maps onto a command

use std::io::Write;
use std::str::FromStr;

use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::board::{Notifier, PasteView};
use crate::clipboard::ClipboardHost;
use crate::commands;
use crate::trigger::{InputEvent, KeyCombo, TriggerHub};

const HELP: &str = "\
commands:
  ctrl+v | command+v   press a key combination
  paste                fire a native paste event
  list                 show the paste history
  show N               show history item N in full
  copy N               copy history item N back to the clipboard
  count                number of history items
  error                current error banner
  settings             current settings
  set KEY VALUE        change a setting (trigger_mode, shortcut, history_limit,
                       preview_length, thumbnail_size)
  help                 this text
  quit | exit          leave";

/// A parsed console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Key(KeyCombo),
    Paste,
    List,
    Show(usize),
    Copy(usize),
    Count,
    Error,
    Settings,
    Set(String, String),
    Help,
    Quit,
}

impl FromStr for ConsoleCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let head = words.next().ok_or_else(|| "empty command".to_string())?;
        let index = |arg: Option<&str>| -> Result<usize, String> {
            arg.ok_or_else(|| format!("'{}' needs an item index", head))?
                .parse::<usize>()
                .map_err(|e| format!("invalid index: {}", e))
        };

        match head.to_lowercase().as_str() {
            "paste" => Ok(ConsoleCommand::Paste),
            "list" => Ok(ConsoleCommand::List),
            "show" => Ok(ConsoleCommand::Show(index(words.next())?)),
            "copy" => Ok(ConsoleCommand::Copy(index(words.next())?)),
            "count" => Ok(ConsoleCommand::Count),
            "error" => Ok(ConsoleCommand::Error),
            "settings" => Ok(ConsoleCommand::Settings),
            "set" => match (words.next(), words.next()) {
                (Some(key), Some(value)) => Ok(ConsoleCommand::Set(key.to_string(), value.to_string())),
                _ => Err("usage: set KEY VALUE".to_string()),
            },
            "help" => Ok(ConsoleCommand::Help),
            "quit" | "exit" => Ok(ConsoleCommand::Quit),
            combo if combo.contains('+') => combo
                .parse::<KeyCombo>()
                .map(ConsoleCommand::Key)
                .map_err(|e| e.to_string()),
            other => Err(format!("unknown command '{}', try 'help'", other)),
        }
    }
}

fn print_json<T: Serialize, W: Write>(out: &mut W, value: &T) -> std::io::Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)
}

async fn dispatch_event<H: ClipboardHost, N: Notifier, W: Write>(
    view: &mut PasteView<H, N>,
    hub: &TriggerHub,
    mut event: InputEvent,
    out: &mut W,
) -> std::io::Result<()> {
    if hub.dispatch(&mut event) == 0 {
        writeln!(out, "no paste trigger registered for this input")?;
        return Ok(());
    }
    view.process_pending().await;
    if let Some(error) = view.state().error() {
        print_json(out, error)?;
    }
    print_json(out, &commands::get_paste_history(view, None))
}

/// Drive the view from console input until `quit` or end of input
pub async fn run_console<H, N, R, W>(
    view: &mut PasteView<H, N>,
    hub: &TriggerHub,
    input: R,
    out: &mut W,
) -> std::io::Result<()>
where
    H: ClipboardHost,
    N: Notifier,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let command = match line.parse::<ConsoleCommand>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{}", e)?;
                continue;
            }
        };

        match command {
            ConsoleCommand::Key(combo) => {
                dispatch_event(view, hub, InputEvent::key_down(combo), out).await?
            }
            ConsoleCommand::Paste => dispatch_event(view, hub, InputEvent::paste(), out).await?,
            ConsoleCommand::List => print_json(out, &commands::get_paste_history(view, None))?,
            ConsoleCommand::Show(index) => print_json(out, &commands::get_paste_item(view, index))?,
            ConsoleCommand::Copy(index) => print_json(out, &commands::copy_item(view, index).await)?,
            ConsoleCommand::Count => print_json(out, &commands::get_history_count(view))?,
            ConsoleCommand::Error => print_json(out, &commands::get_error_state(view))?,
            ConsoleCommand::Settings => print_json(out, &commands::get_settings())?,
            ConsoleCommand::Set(key, value) => {
                let result = match commands::SettingsUpdate::from_pair(&key, &value) {
                    Ok(update) => commands::update_settings(update),
                    Err(e) => commands::CommandResult::err(e),
                };
                if let Some(settings) = &result.data {
                    if let Err(e) = view.apply_settings(settings, hub) {
                        log::error!("Failed to apply settings: {}", e);
                    }
                }
                print_json(out, &result)?
            }
            ConsoleCommand::Help => writeln!(out, "{}", HELP)?,
            ConsoleCommand::Quit => break,
        }
        out.flush()?;
    }
    Ok(())
}
