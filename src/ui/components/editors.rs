//! Per-field editor views and input collection.

use std::sync::Arc;

use cursive::{
    Cursive,
    traits::{Nameable, Resizable},
    view::View,
    views::{
        Button, Checkbox, DummyView, EditView, LinearLayout, RadioGroup, SelectView, TextArea,
        TextView,
    },
};

use crate::{
    data::field::{Field, FieldKind, LabelPos, RawInput},
    ui::UiSession,
};

/// Name under which a field's editor view is registered.
pub(crate) fn view_name(panel_id: &str, key: &str) -> String {
    format!("{panel_id}.{key}")
}

/// Build the editor row for one field: label plus editor, arranged
/// according to the field's label position.
pub(crate) fn field_row(
    panel_id: &str,
    field: &Field,
    radios: &mut Vec<(String, RadioGroup<usize>)>,
) -> Box<dyn View> {
    let name = view_name(panel_id, &field.key);
    let editor: Box<dyn View> = match &field.kind {
        FieldKind::Text { .. }
        | FieldKind::Int { .. }
        | FieldKind::Unsigned { .. }
        | FieldKind::Float { .. } => {
            let content = field.current().map(|v| v.to_string()).unwrap_or_default();
            Box::new(
                EditView::new()
                    .content(content)
                    .with_name(name)
                    .fixed_width(28),
            )
        }
        FieldKind::Textarea { .. } => {
            let content = field.current().map(|v| v.to_string()).unwrap_or_default();
            Box::new(
                TextArea::new()
                    .content(content)
                    .with_name(name)
                    .fixed_size((40, 4)),
            )
        }
        FieldKind::Checkbox { value, .. } => {
            let mut checkbox = Checkbox::new();
            let _ = checkbox.set_checked(*value);
            Box::new(checkbox.with_name(name))
        }
        FieldKind::Radio(choice) => {
            let mut group: RadioGroup<usize> = RadioGroup::new();
            let selected = choice.value.or(choice.default);
            let mut column = LinearLayout::vertical();
            for (i, option) in choice.options.iter().enumerate() {
                let mut button = group.button(i, option.clone());
                if selected == Some(i) {
                    let _ = button.select();
                }
                column.add_child(button);
            }
            radios.push((field.key.clone(), group));
            Box::new(column)
        }
        FieldKind::Select(choice) => {
            let mut select = SelectView::<usize>::new();
            for (i, option) in choice.options.iter().enumerate() {
                select.add_item(option.clone(), i);
            }
            if let Some(selected) = choice.value.or(choice.default) {
                let _ = select.set_selection(selected);
            }
            Box::new(select.with_name(name))
        }
        FieldKind::Button { on_click } => {
            let on_click = Arc::clone(on_click);
            // A button is its own label.
            return Box::new(Button::new(field.label.clone(), move |siv| on_click(siv)));
        }
        FieldKind::Hidden { .. } => return Box::new(DummyView),
    };

    let label = field.label.as_str();
    match field.label_pos {
        LabelPos::Left => Box::new(
            LinearLayout::horizontal()
                .child(TextView::new(format!("{label}: ")))
                .child(editor),
        ),
        LabelPos::Right => Box::new(
            LinearLayout::horizontal()
                .child(editor)
                .child(TextView::new(format!(" {label}"))),
        ),
        LabelPos::Above => Box::new(
            LinearLayout::vertical()
                .child(TextView::new(label))
                .child(editor),
        ),
        LabelPos::Below => Box::new(
            LinearLayout::vertical()
                .child(editor)
                .child(TextView::new(label)),
        ),
    }
}

enum Slot {
    Edit,
    Area,
    Check,
    Select,
    Radio(Option<usize>),
    Skip,
}

/// Read every editor's current content as raw input.
///
/// Radio selections come from the session's group handles; everything
/// else is read from the named views.
pub(crate) fn collect_inputs(siv: &mut Cursive) -> Vec<(String, RawInput)> {
    let Some(targets) = siv.with_user_data(|s: &mut UiSession| {
        let id = s.panel.id.clone();
        s.panel
            .fields()
            .iter()
            .map(|f| {
                let slot = match &f.kind {
                    FieldKind::Text { .. }
                    | FieldKind::Int { .. }
                    | FieldKind::Unsigned { .. }
                    | FieldKind::Float { .. } => Slot::Edit,
                    FieldKind::Textarea { .. } => Slot::Area,
                    FieldKind::Checkbox { .. } => Slot::Check,
                    FieldKind::Select(_) => Slot::Select,
                    FieldKind::Radio(_) => Slot::Radio(
                        s.radios
                            .iter()
                            .find(|(key, _)| key == &f.key)
                            .map(|(_, group)| *group.selection()),
                    ),
                    FieldKind::Hidden { .. } | FieldKind::Button { .. } => Slot::Skip,
                };
                (f.key.clone(), view_name(&id, &f.key), slot)
            })
            .collect::<Vec<_>>()
    }) else {
        return Vec::new();
    };

    let mut inputs = Vec::new();
    for (key, name, slot) in targets {
        let raw = match slot {
            Slot::Edit => siv
                .call_on_name(&name, |v: &mut EditView| v.get_content().to_string())
                .map(RawInput::Text),
            Slot::Area => siv
                .call_on_name(&name, |v: &mut TextArea| v.get_content().to_string())
                .map(RawInput::Text),
            Slot::Check => siv
                .call_on_name(&name, |v: &mut Checkbox| v.is_checked())
                .map(RawInput::Flag),
            Slot::Select => siv
                .call_on_name(&name, |v: &mut SelectView<usize>| {
                    v.selection().map(|rc| *rc)
                })
                .map(RawInput::Index),
            Slot::Radio(selected) => Some(RawInput::Index(selected)),
            Slot::Skip => None,
        };
        if let Some(raw) = raw {
            inputs.push((key, raw));
        }
    }
    inputs
}
