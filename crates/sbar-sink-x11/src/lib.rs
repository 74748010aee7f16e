// # X11 Window Title Sink
//
// Publishes the status line as the `WM_NAME` of the root window, which is
// where dwm and similar window managers read their status text from.
//
// ## Resource Ownership
//
// The sink owns its display connection for its whole lifetime:
// - Opened once by [`X11TitleSink::connect`]; failure is fatal at startup
// - Used synchronously by `publish()`; every title update is round-tripped
//   to the server so an error surfaces on the tick that caused it
// - Released exactly once by `teardown()`, after clearing the title
//
// ## Forbidden
//
// - ❌ Reconnecting after a failure (the next tick simply tries again)
// - ❌ Sharing the connection with other components

use sbar_core::traits::StatusSink;
use sbar_core::{Error, Result};
use tracing::{debug, info};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{AtomEnum, ConnectionExt as _, PropMode, Window};
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as _;

/// Root window title sink
pub struct X11TitleSink {
    conn: Option<RustConnection>,
    root: Window,
}

impl X11TitleSink {
    /// Connect to `display`, or to `$DISPLAY` when `None`
    pub fn connect(display: Option<&str>) -> Result<Self> {
        let name = display
            .map(str::to_string)
            .or_else(|| std::env::var("DISPLAY").ok())
            .unwrap_or_default();

        let (conn, screen_num) = x11rb::connect(display)
            .map_err(|e| Error::sink(format!("Failed to open display {}: {}", name, e)))?;

        let root = conn
            .setup()
            .roots
            .get(screen_num)
            .map(|screen| screen.root)
            .ok_or_else(|| Error::sink(format!("Display {} has no screen {}", name, screen_num)))?;

        info!("Connected to X display {} (screen {})", name, screen_num);

        Ok(Self {
            conn: Some(conn),
            root,
        })
    }

    fn set_title(&self, title: &str) -> Result<()> {
        let conn = self
            .conn
            .as_ref()
            .ok_or_else(|| Error::sink("Display connection already closed"))?;

        conn.change_property8(
            PropMode::REPLACE,
            self.root,
            AtomEnum::WM_NAME,
            AtomEnum::STRING,
            title.as_bytes(),
        )
        .map_err(|e| Error::sink(format!("Failed to set root window name: {}", e)))?;

        // Round trip so the server has applied the change before returning
        conn.get_input_focus()
            .map_err(|e| Error::sink(format!("X11 request failed: {}", e)))?
            .reply()
            .map_err(|e| Error::sink(format!("X11 sync failed: {}", e)))?;

        conn.flush()
            .map_err(|e| Error::sink(format!("X11 flush failed: {}", e)))?;

        Ok(())
    }
}

impl StatusSink for X11TitleSink {
    fn publish(&mut self, line: &str) -> Result<()> {
        self.set_title(line)
    }

    fn teardown(&mut self) -> Result<()> {
        if self.conn.is_none() {
            return Ok(());
        }

        let cleared = self.set_title("");
        // Dropping the connection closes the socket
        self.conn = None;
        debug!("X display connection closed");

        cleared
    }

    fn sink_name(&self) -> &'static str {
        "x11"
    }
}
