//! TUI rendering and event handling.
//!
//! The panel is shown as a dialog layer inside a [`Cursive`] instance.
//! While the UI runs, the panel state lives in the Cursive user-data
//! slot as a [`UiSession`]; handlers pull it out, mutate it, and the
//! owning call takes it back when the loop ends.

/// UI components and editors for the different field kinds.
pub mod components;

use cursive::{Cursive, CursiveExt, event::Key, view::Position, views::Dialog,
    views::LayerPosition, views::RadioGroup};
use log::info;

use crate::{
    data::panel::Panel,
    error::{PanelError, Result},
};

/// UI-session state kept in the Cursive user-data slot.
pub(crate) struct UiSession {
    /// The authoritative panel state while the UI runs.
    pub panel: Panel,
    /// Radio groups by field key; these are handles, not views.
    pub radios: Vec<(String, RadioGroup<usize>)>,
    /// Whether the close handler should quit the event loop.
    pub owns_loop: bool,
}

/// Run the panel in an owned event loop, blocking until dismissed.
pub(crate) fn run_owned(panel: &mut Panel) -> Result<()> {
    let mut siv = Cursive::default();
    if let Some(theme) = &panel.theme {
        siv.load_toml(theme)
            .map_err(|e| PanelError::Theme(format!("{e:?}")))?;
    }
    install(&mut siv, panel.clone(), true);
    fire_open(&mut siv);
    siv.run();

    let session = siv.take_user_data::<UiSession>().unwrap();
    *panel = session.panel;
    if panel.is_open() {
        // The loop ended without going through the close handler.
        panel.close();
    }
    Ok(())
}

/// Install the panel layer, session state, and global key bindings.
pub(crate) fn install(siv: &mut Cursive, panel: Panel, owns_loop: bool) {
    let (view, radios) = components::panel::panel_view(&panel);
    siv.set_user_data(UiSession {
        panel,
        radios,
        owns_loop,
    });
    siv.add_global_callback('s', handle_save);
    siv.add_global_callback('S', handle_save);
    siv.add_global_callback('q', handle_close);
    siv.add_global_callback('Q', handle_close);
    siv.add_global_callback(Key::Esc, handle_close);
    siv.add_global_callback('~', Cursive::toggle_debug_console);
    siv.add_layer(view);
}

/// Fire the `on_open` hook inside the running session.
pub(crate) fn fire_open(siv: &mut Cursive) {
    let _ = siv.with_user_data(|s: &mut UiSession| s.panel.mark_opened());
}

/// Take the panel state back out of an embedded UI session.
///
/// Companion to [`Panel::open_with`]; returns `None` when no panel
/// session is installed.
pub fn take_panel(siv: &mut Cursive) -> Option<Panel> {
    siv.take_user_data::<UiSession>().map(|s| s.panel)
}

/// Collect all editor contents, apply them, and persist.
///
/// Bad input (unparsable numbers, out-of-range values) is shown as an
/// info dialog and nothing is saved.
pub fn handle_save(siv: &mut Cursive) {
    let inputs = components::editors::collect_inputs(siv);
    let outcome = siv.with_user_data(|s: &mut UiSession| {
        for (key, raw) in inputs {
            s.panel.apply_input(&key, raw)?;
        }
        s.panel.save()
    });
    match outcome {
        Some(Err(e)) => {
            siv.add_layer(Dialog::info(e.to_string()));
        }
        Some(Ok(())) => info!("configuration saved"),
        None => {}
    }
}

/// Dismiss the panel; quits the event loop when the panel owns it.
pub fn handle_close(siv: &mut Cursive) {
    let owns = siv
        .with_user_data(|s: &mut UiSession| {
            s.panel.close();
            s.owns_loop
        })
        .unwrap_or(false);
    components::panel::remove_panel(siv);
    if owns {
        siv.quit();
    }
}

/// Restore defaults and rebuild the panel layer to show them.
pub fn handle_reset(siv: &mut Cursive) {
    if siv
        .with_user_data(|s: &mut UiSession| s.panel.reset())
        .is_none()
    {
        return;
    }
    refresh(siv);
}

/// Re-center the panel layer on the screen.
pub fn center(siv: &mut Cursive) {
    siv.screen_mut()
        .reposition_layer(LayerPosition::FromFront(0), Position::center());
}

/// Rebuild the panel layer from the current session state.
pub(crate) fn refresh(siv: &mut Cursive) {
    let Some(panel) = siv.with_user_data(|s: &mut UiSession| s.panel.clone()) else {
        return;
    };
    let (view, radios) = components::panel::panel_view(&panel);
    components::panel::remove_panel(siv);
    siv.add_layer(view);
    if let Some(s) = siv.user_data::<UiSession>() {
        s.radios = radios;
    }
}
