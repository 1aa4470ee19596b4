mod session;

pub use session::session_stream;
