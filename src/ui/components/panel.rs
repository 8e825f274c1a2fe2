//! Panel dialog assembly and layer management.

use cursive::{
    Cursive,
    theme::Effect,
    traits::{Nameable, Scrollable},
    utils::markup::StyledString,
    views::{Dialog, DummyView, LinearLayout, NamedView, RadioGroup, TextView},
};

use crate::{
    data::panel::Panel,
    ui::{components::editors, handle_close, handle_reset, handle_save},
};

/// View name of the panel's root dialog.
pub const PANEL_LAYER: &str = "cfgpanel.panel";

/// Build the complete panel dialog for the given panel state.
///
/// Returns the dialog together with the radio-group handles created
/// for the panel's radio fields; the handles must be kept in the UI
/// session so selections can be read back on save.
pub fn panel_view(panel: &Panel) -> (NamedView<Dialog>, Vec<(String, RadioGroup<usize>)>) {
    let mut radios = Vec::new();
    let mut list = LinearLayout::vertical();
    let mut first = true;

    for field in panel.fields() {
        if let Some(section) = &field.section {
            if !first {
                list.add_child(DummyView);
            }
            list.add_child(TextView::new(StyledString::styled(
                section.heading.as_str(),
                Effect::Bold,
            )));
            if let Some(subheading) = &section.subheading {
                list.add_child(TextView::new(StyledString::styled(
                    subheading.as_str(),
                    Effect::Dim,
                )));
            }
        }
        if !field.rendered() {
            continue;
        }
        list.add_child(editors::field_row(&panel.id, field, &mut radios));
        first = false;
    }

    let dialog = Dialog::around(list.scrollable())
        .title(panel.title.as_str())
        .button("Save", handle_save)
        .button("Reset", handle_reset)
        .button("Close", handle_close)
        .with_name(PANEL_LAYER);

    (dialog, radios)
}

/// Remove the panel layer from the screen.
///
/// The panel state stays in the session; [`crate::ui::take_panel`]
/// retrieves it.
pub fn remove_panel(siv: &mut Cursive) {
    siv.pop_layer();
}
