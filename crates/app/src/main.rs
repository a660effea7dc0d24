//! GlassPeek - floating, live peek windows over any region of a document

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

#[cfg_attr(not(windows), allow(dead_code))]
mod document;
#[cfg_attr(not(windows), allow(dead_code))]
mod state;
#[cfg(windows)]
mod editor;
#[cfg(windows)]
mod sync;
#[cfg(windows)]
mod tray;
#[cfg(windows)]
mod trigger;
#[cfg(windows)]
mod ui;

#[cfg(windows)]
fn main() -> anyhow::Result<()> {
    use crate::document::Document;
    use crate::ui::{post_update_state, MainWindow};
    use anyhow::Context;
    use windows::Win32::UI::HiDpi::{SetProcessDpiAwarenessContext, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Set DPI awareness
    unsafe {
        let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
    }

    let document = std::env::args_os()
        .nth(1)
        .map(|path| Document::open(&path).context("Failed to open the document given on the command line"))
        .transpose()?;

    let main_window = MainWindow::create().context("Failed to create the editor window")?;
    match document {
        Some(document) => sync::load(document),
        None => log::info!("No document given, open one from the tray menu"),
    }
    post_update_state(main_window.hwnd());

    main_window.show();
    let exit_code = MainWindow::run_message_loop();
    log::info!("Exiting with code {}", exit_code);

    Ok(())
}

#[cfg(not(windows))]
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    anyhow::bail!("GlassPeek needs Windows")
}
