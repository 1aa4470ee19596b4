use iced::futures::stream::{self, Stream};
use tokio::sync::mpsc::UnboundedReceiver;
use tool_panels_core::execution::{Launcher, SessionEvent};
use tool_panels_core::invocation::InvocationRequest;

use crate::app::{Message, PanelId};

enum Progress {
    Starting(Launcher, InvocationRequest),
    Streaming(UnboundedReceiver<SessionEvent>),
    Done,
}

/// Launches `request` and yields its lifecycle as panel messages:
/// one `Started`, then the session's events in order.
///
/// A failed spawn yields only `Started(Err(..))`.
pub fn session_stream(
    panel: PanelId,
    launcher: Launcher,
    request: InvocationRequest,
) -> impl Stream<Item = Message> {
    stream::unfold(
        Progress::Starting(launcher, request),
        move |progress| async move {
            match progress {
                Progress::Starting(launcher, request) => match launcher.spawn(&request) {
                    Ok(session) => {
                        let (handle, events) = session.into_parts();
                        Some((
                            Message::Started(panel, Ok(handle)),
                            Progress::Streaming(events),
                        ))
                    }
                    Err(e) => Some((Message::Started(panel, Err(e.to_string())), Progress::Done)),
                },
                Progress::Streaming(mut events) => events
                    .recv()
                    .await
                    .map(|event| (Message::Session(panel, event), Progress::Streaming(events))),
                Progress::Done => None,
            }
        },
    )
}
