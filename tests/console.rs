mod common;

use common::*;
use pasteboard_lib::console::run_console;
use pasteboard_lib::trigger::TriggerHub;

async fn run_script(view: &mut TestView, hub: &TriggerHub, script: &str) -> String {
    let mut out = Vec::new();
    run_console(view, hub, script.as_bytes(), &mut out)
        .await
        .unwrap();
    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn paste_then_copy_back() {
    let host = FakeClipboard::new();
    host.push_read(vec![text("hello")]);

    let hub = TriggerHub::new();
    let mut view = hotkey_view(host);
    view.mount(&hub);

    let output = run_script(&mut view, &hub, "ctrl+v\ncopy 0\ncount\nquit\ncopy 0\n").await;

    assert!(output.contains("\"preview\": \"hello\""));
    assert!(output.contains("\"data\": 1"));
    assert_eq!(view.host().writes(), vec![vec![text("hello")]]);
    assert_eq!(view.notifier().successes.lock().len(), 1);
}

#[tokio::test]
async fn reports_unknown_commands_and_missing_items() {
    let hub = TriggerHub::new();
    let mut view = hotkey_view(FakeClipboard::new());
    view.mount(&hub);

    let output = run_script(&mut view, &hub, "bogus\n\nshow 4\n").await;

    assert!(output.contains("unknown command 'bogus'"));
    assert!(output.contains("Item not found: 4"));
}

#[tokio::test]
async fn input_without_trigger_is_reported() {
    let host = FakeClipboard::new();
    host.push_read(vec![text("never read")]);

    let hub = TriggerHub::new();
    let mut view = hotkey_view(host);
    view.mount(&hub);

    let output = run_script(&mut view, &hub, "paste\nerror\n").await;

    assert!(output.contains("no paste trigger registered"));
    assert!(output.contains("\"data\": null"));
    assert!(view.state().history().is_empty());
}

#[tokio::test]
async fn failed_read_prints_banner() {
    let host = FakeClipboard::new();
    host.push_read_failure("Permission denied");

    let hub = TriggerHub::new();
    let mut view = hotkey_view(host);
    view.mount(&hub);

    let output = run_script(&mut view, &hub, "command+v\n").await;

    assert!(output.contains("\"message\": \"Permission denied\""));
    assert!(output.contains("\"kind\": \"operation_failed\""));
}

#[tokio::test]
async fn set_updates_file_and_live_view() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::env::set_var(pasteboard_lib::config::settings::CONFIG_ENV, &path);

    let host = FakeClipboard::new();
    host.push_read(vec![text("from paste event")]);

    let hub = TriggerHub::new();
    let mut view = hotkey_view(host);
    view.mount(&hub);

    let output = run_script(
        &mut view,
        &hub,
        "set trigger_mode paste_event\nset history_limit 200\nset shortcut hyper+v\nctrl+v\npaste\n",
    )
    .await;

    assert!(output.contains("\"history_limit\": 200"));
    assert!(output.contains("Invalid shortcut format: hyper+v"));
    assert!(output.contains("no paste trigger registered"));
    assert!(output.contains("\"preview\": \"from paste event\""));

    let saved = pasteboard_lib::config::Settings::load_from(&path).unwrap();
    assert_eq!(saved.trigger_mode, pasteboard_lib::config::TriggerMode::PasteEvent);
    assert_eq!(saved.history_limit, pasteboard_lib::config::HistoryLimit::Limit200);
    assert_eq!(saved.shortcut, "ctrl+v,command+v");
}
