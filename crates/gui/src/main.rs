mod app;
mod execution;
mod ui;
mod utils;

use app::ToolPanels;

pub fn main() -> iced::Result {
    tracing_subscriber::fmt::init();

    iced::application(ToolPanels::title, ToolPanels::update, ToolPanels::view)
        .centered()
        .run_with(ToolPanels::new)
}
