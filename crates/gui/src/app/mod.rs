mod messages;
mod state;

pub use messages::{Message, NbtscanField, PanelId, RtgenField};
pub use state::{Panel, ToolPanels};
