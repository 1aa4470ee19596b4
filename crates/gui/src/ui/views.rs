use iced::widget::{checkbox, column, container, row, scrollable, text, Column};
use iced::{Element, Length};
use tool_panels_core::tools::Tool;

use crate::app::{Message, NbtscanField, PanelId, RtgenField, ToolPanels};
use crate::ui::components;

pub fn main_view(app: &ToolPanels) -> Element<Message> {
    let sidebar = column![
        components::panel_button("nbtscan", PanelId::Nbtscan, app.selected == PanelId::Nbtscan),
        components::panel_button("rtgen", PanelId::Rtgen, app.selected == PanelId::Rtgen),
    ]
    .spacing(5)
    .padding(10);

    let content = row![
        container(sidebar)
            .width(Length::Fixed(200.0))
            .height(Length::Fill)
            .style(container::bordered_box),
        container(panel_view(app, app.selected))
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(20)
    ];

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn panel_view(app: &ToolPanels, id: PanelId) -> Element<Message> {
    let tool = app.tool(id);
    let panel = app.panel(id);

    let mut details = Column::new()
        .spacing(15)
        .push(text(tool.title()).size(24))
        .push(text(tool.description()).size(14));

    if panel.show_install_notice() {
        details = details.push(components::install_notice(
            id,
            &panel.missing_dependencies,
            tool.source_link(),
        ));
    }

    let (form, run_label) = match id {
        PanelId::Nbtscan => (nbtscan_form(app), "Scan Subnet"),
        PanelId::Rtgen => (rtgen_form(app), "Generate Table"),
    };

    details = details
        .push(scrollable(form).height(Length::FillPortion(2)))
        .push(components::action_buttons(id, run_label, panel));

    if let Some(status) = &panel.status {
        details = details.push(text(status.clone()).size(14));
    }

    details
        .push(components::console_view(id, panel))
        .push(components::save_row(id, panel))
        .push(components::guide(tool.steps(), tool.source_link(), tool.tutorial()))
        .into()
}

/// Inputs shown for nbtscan. Advanced Mode swaps the subnet for the range.
pub fn nbtscan_fields(advanced: bool) -> &'static [NbtscanField] {
    if advanced {
        &[
            NbtscanField::ScanRange,
            NbtscanField::Timeout,
            NbtscanField::Bandwidth,
            NbtscanField::Retransmits,
        ]
    } else {
        &[NbtscanField::Subnet]
    }
}

fn nbtscan_form(app: &ToolPanels) -> Element<Message> {
    let form = &app.nbtscan_form;

    let mut inputs = Column::new()
        .spacing(10)
        .push(checkbox("Advanced Mode", app.advanced).on_toggle(Message::AdvancedToggled));

    if app.advanced {
        inputs = inputs.push(checkbox("Dump packets", form.dump_packets).on_toggle(Message::DumpPacketsToggled));
    }

    nbtscan_fields(app.advanced)
        .iter()
        .fold(inputs, |column, &field| {
            let (label, placeholder, value) = match field {
                NbtscanField::Subnet => ("Subnet", "192.168.1.0/24", &form.subnet),
                NbtscanField::ScanRange => (
                    "Scan range",
                    "xxx.xxx.xxx.xxx/xx or xxx.xxx.xxx.xxx-xxx",
                    &form.scan_range,
                ),
                NbtscanField::Timeout => ("Timeout (ms)", "1000", &form.timeout),
                NbtscanField::Bandwidth => ("Bandwidth (kB/s)", "Unlimited", &form.bandwidth),
                NbtscanField::Retransmits => ("Retransmits", "0", &form.retransmits),
            };
            column.push(components::labeled_input(
                label,
                placeholder,
                value,
                move |value| Message::NbtscanChanged(field, value),
            ))
        })
        .into()
}

fn rtgen_form(app: &ToolPanels) -> Element<Message> {
    let form = &app.rtgen_form;
    let fields = [
        ("Hash algorithm", "md5", &form.hash_algorithm, RtgenField::HashAlgorithm),
        ("Charset", "loweralpha-numeric", &form.charset, RtgenField::Charset),
        ("Plaintext length (min)", "1", &form.plaintext_length_min, RtgenField::PlaintextLengthMin),
        ("Plaintext length (max)", "7", &form.plaintext_length_max, RtgenField::PlaintextLengthMax),
        ("Table index", "0", &form.table_index, RtgenField::TableIndex),
        ("Chain length", "3800", &form.chain_length, RtgenField::ChainLength),
        ("Chain count", "33554432", &form.chain_count, RtgenField::ChainCount),
        ("Part index", "0", &form.part_index, RtgenField::PartIndex),
    ];

    fields
        .into_iter()
        .fold(Column::new().spacing(10), |column, (label, placeholder, value, field)| {
            column.push(components::labeled_input(
                label,
                placeholder,
                value,
                move |value| Message::RtgenChanged(field, value),
            ))
        })
        .into()
}
