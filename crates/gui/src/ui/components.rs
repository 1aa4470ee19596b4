use iced::widget::{button, column, container, row, scrollable, text, text_input, Column, Row};
use iced::{Element, Length};

use crate::app::{Message, Panel, PanelId};
use crate::utils::display;

pub fn panel_button(label: &str, id: PanelId, is_selected: bool) -> button::Button<'static, Message> {
    button(text(label.to_string()).size(16))
        .width(Length::Fill)
        .padding(10)
        .style(if is_selected {
            button::primary
        } else {
            button::secondary
        })
        .on_press(Message::PanelSelected(id))
}

pub fn labeled_input<'a>(
    label: &str,
    placeholder: &str,
    value: &str,
    on_input: impl Fn(String) -> Message + 'a,
) -> Column<'a, Message> {
    Column::new()
        .spacing(5)
        .push(text(label.to_string()).size(14))
        .push(
            text_input(placeholder, value)
                .on_input(on_input)
                .padding(8)
                .size(16),
        )
}

/// Run and cancel buttons. Run is disabled while a session is in flight.
pub fn action_buttons(id: PanelId, run_label: &str, panel: &Panel) -> Row<'static, Message> {
    let loading = panel.session.is_loading();

    row![
        button(text(run_label.to_string()).size(16))
            .padding([10, 20])
            .style(button::success)
            .on_press_maybe((!loading).then_some(Message::Submit(id))),
        button(text("Cancel").size(16))
            .padding([10, 20])
            .style(button::danger)
            .on_press_maybe(panel.session.handle().map(|_| Message::Cancel(id))),
        text(display::session_status(&panel.session)).size(14),
    ]
    .spacing(10)
    .align_y(iced::Center)
}

pub fn install_notice<'a>(id: PanelId, missing: &[String], source_link: &str) -> Element<'a, Message> {
    let notice = column![
        text(format!("Not installed: {}", missing.join(", ")))
            .size(16)
            .color([0.8, 0.2, 0.2]),
        text(format!("Install it before running this panel. See {source_link}")).size(14),
        button(text("Dismiss").size(14))
            .style(button::secondary)
            .on_press(Message::DismissInstallNotice(id)),
    ]
    .spacing(8);

    container(notice)
        .padding(10)
        .width(Length::Fill)
        .style(container::bordered_box)
        .into()
}

pub fn console_view<'a>(id: PanelId, panel: &Panel) -> Element<'a, Message> {
    let mut output = text(panel.session.output()).size(14);
    if let Some(color) = display::status_color(panel.session.state()) {
        output = output.color(color);
    }

    column![
        row![
            text("Output").size(18).width(Length::Fill),
            button(text("Clear").size(14))
                .style(button::secondary)
                .on_press(Message::ClearOutput(id)),
        ]
        .align_y(iced::Center),
        container(scrollable(output).width(Length::Fill).height(Length::Fill))
            .padding(10)
            .style(container::bordered_box)
            .width(Length::Fill)
            .height(Length::Fill),
    ]
    .spacing(5)
    .height(Length::FillPortion(3))
    .into()
}

pub fn save_row<'a>(id: PanelId, panel: &Panel) -> Row<'a, Message> {
    let label = if panel.session.save_state().has_saved {
        "Saved"
    } else {
        "Save Output"
    };

    row![
        text_input("Output file", &panel.save_path)
            .on_input(move |path| Message::SavePathChanged(id, path))
            .padding(8)
            .size(14),
        button(text(label).size(14))
            .padding([8, 16])
            .style(button::primary)
            .on_press_maybe(panel.session.can_save().then_some(Message::Save(id))),
    ]
    .spacing(10)
    .align_y(iced::Center)
}

pub fn guide<'a>(steps: &'a str, source_link: &'a str, tutorial: Option<&'a str>) -> Column<'a, Message> {
    let mut guide = column![
        text(steps).size(12),
        text(format!("Source: {source_link}")).size(12),
    ]
    .spacing(4);

    if let Some(tutorial) = tutorial {
        guide = guide.push(text(format!("Tutorial: {tutorial}")).size(12));
    }

    guide
}
