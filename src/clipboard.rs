//! Clipboard
//!
//! Text always goes through the host's clipboard. Other formats need a
//! data backend supplied at startup; without one the clipboard is text
//! only and reports no formats.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::error::Result;
use crate::host::HostClipboard;

/// Format name for plain text
pub const TEXT_FORMAT: &str = "text/plain";

/// Data placed on the clipboard, keyed by format name
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DataTransfer {
    items: Vec<(String, Vec<u8>)>,
}

impl DataTransfer {
    /// Create an empty transfer
    pub fn new() -> Self {
        Self::default()
    }

    /// A transfer holding plain text
    pub fn with_text(text: &str) -> Self {
        let mut transfer = Self::new();
        transfer.set(TEXT_FORMAT, text.as_bytes().to_vec());
        transfer
    }

    /// Set the data for a format, replacing earlier data for it
    pub fn set(&mut self, format: &str, data: Vec<u8>) {
        match self.items.iter_mut().find(|(f, _)| f == format) {
            Some((_, existing)) => *existing = data,
            None => self.items.push((format.to_string(), data)),
        }
    }

    pub fn get(&self, format: &str) -> Option<&[u8]> {
        self.items
            .iter()
            .find(|(f, _)| f == format)
            .map(|(_, data)| data.as_slice())
    }

    pub fn formats(&self) -> Vec<String> {
        self.items.iter().map(|(f, _)| f.clone()).collect()
    }

    /// The plain text entry, if it is valid UTF-8
    pub fn text(&self) -> Option<&str> {
        self.get(TEXT_FORMAT)
            .and_then(|data| std::str::from_utf8(data).ok())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Rich clipboard data services
pub trait ClipboardDataBackend {
    /// Formats currently on the clipboard
    fn formats(&self) -> Vec<String>;

    fn get_data(&self, format: &str) -> Option<Vec<u8>>;

    fn set_data(&self, transfer: &DataTransfer) -> Result<()>;

    fn clear(&self);

    /// Persist clipboard contents beyond the process lifetime
    fn flush(&self) {}
}

/// Optional rich data backend
#[derive(Clone, Default)]
pub enum DataBackend {
    Available(Rc<dyn ClipboardDataBackend>),
    #[default]
    Unavailable,
}

impl DataBackend {
    pub fn is_available(&self) -> bool {
        matches!(self, DataBackend::Available(_))
    }
}

impl fmt::Debug for DataBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataBackend::Available(_) => f.write_str("DataBackend::Available"),
            DataBackend::Unavailable => f.write_str("DataBackend::Unavailable"),
        }
    }
}

/// Clipboard shared by every window
pub struct Clipboard {
    host: Rc<dyn HostClipboard>,
    data: DataBackend,
    /// Transfer placed by this process, while it is still current
    owned: RefCell<Option<Rc<DataTransfer>>>,
}

impl Clipboard {
    /// Create a new clipboard
    pub fn new(host: Rc<dyn HostClipboard>, data: DataBackend) -> Self {
        if !data.is_available() {
            debug!("No clipboard data backend, clipboard is text only");
        }

        Self {
            host,
            data,
            owned: RefCell::new(None),
        }
    }

    pub fn has_data_backend(&self) -> bool {
        self.data.is_available()
    }

    pub fn get_text(&self) -> Option<String> {
        self.host.get_text()
    }

    pub fn set_text(&self, text: &str) {
        self.owned.borrow_mut().take();
        self.host.set_text(text);
    }

    /// Empty the clipboard
    pub fn clear(&self) {
        self.owned.borrow_mut().take();
        self.host.set_text("");
        if let DataBackend::Available(backend) = &self.data {
            backend.clear();
        }
    }

    /// Place a data transfer on the clipboard.
    ///
    /// Text goes to the host clipboard; everything else needs the data
    /// backend and is dropped without one. A failed backend write leaves
    /// the clipboard untouched.
    pub fn set_data_object(&self, transfer: DataTransfer) -> Result<()> {
        if let DataBackend::Available(backend) = &self.data {
            backend.set_data(&transfer)?;
        }

        if let Some(text) = transfer.text() {
            self.host.set_text(text);
        }

        *self.owned.borrow_mut() = Some(Rc::new(transfer));
        Ok(())
    }

    /// Formats on the clipboard; empty without a data backend
    pub fn get_formats(&self) -> Vec<String> {
        match &self.data {
            DataBackend::Available(backend) => backend.formats(),
            DataBackend::Unavailable => Vec::new(),
        }
    }

    /// Data for one format
    pub fn get_data(&self, format: &str) -> Option<Vec<u8>> {
        if format == TEXT_FORMAT {
            return self.get_text().map(String::into_bytes);
        }

        match &self.data {
            DataBackend::Available(backend) => backend.get_data(format),
            DataBackend::Unavailable => None,
        }
    }

    /// The transfer this process placed, if the clipboard still holds it
    pub fn try_get_in_process_data(&self) -> Option<Rc<DataTransfer>> {
        let mut owned = self.owned.borrow_mut();
        let transfer = owned.as_ref()?;

        if let Some(text) = transfer.text() {
            if self.host.get_text().as_deref() != Some(text) {
                debug!("Clipboard changed outside the process, dropping owned data");
                *owned = None;
                return None;
            }
        }

        owned.clone()
    }

    /// Persist the clipboard contents
    pub fn flush(&self) {
        if let DataBackend::Available(backend) = &self.data {
            backend.flush();
        }
    }
}

impl fmt::Debug for Clipboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clipboard")
            .field("data", &self.data)
            .field("owned", &self.owned.borrow().is_some())
            .finish()
    }
}
