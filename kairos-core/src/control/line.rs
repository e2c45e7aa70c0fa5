//! Line editing for the serial shell

/// Longest command line accepted
pub const LINE_SIZE: usize = 64;

/// Effect of one input byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// Byte appended; echo it
    Insert(u8),
    /// Last byte removed; erase it on the terminal
    Erase,
    /// Line complete
    Submit,
    /// Nothing changed
    Ignore,
}

/// Line input buffer
pub struct LineBuffer {
    buf: [u8; LINE_SIZE],
    len: usize,
    after_cr: bool,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineBuffer {
    pub const fn new() -> Self {
        Self {
            buf: [0u8; LINE_SIZE],
            len: 0,
            after_cr: false,
        }
    }

    /// Feed one byte from the terminal
    ///
    /// Accepts printable ASCII, backspace/DEL and CR, LF or CR LF as line
    /// end. Bytes beyond [`LINE_SIZE`] and control characters are ignored.
    pub fn feed(&mut self, byte: u8) -> Edit {
        let after_cr = core::mem::replace(&mut self.after_cr, byte == b'\r');
        match byte {
            b'\n' if after_cr => Edit::Ignore,
            b'\r' | b'\n' => Edit::Submit,
            0x08 | 0x7f => {
                if self.len > 0 {
                    self.len -= 1;
                    Edit::Erase
                } else {
                    Edit::Ignore
                }
            }
            0x20..=0x7e if self.len < LINE_SIZE => {
                self.buf[self.len] = byte;
                self.len += 1;
                Edit::Insert(byte)
            }
            _ => Edit::Ignore,
        }
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Buffer contents; only printable ASCII is ever stored
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
