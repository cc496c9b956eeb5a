//! Incremental boundary detection for one JSON array element
//!
//! The scanner does not validate JSON. It only tracks enough lexical state
//! (nesting depth, string and escape state) to know where one element ends,
//! so the bytes can be handed to a real deserializer. Input may arrive in
//! arbitrarily small chunks; state carries over between calls.

/// Outcome of feeding one chunk to the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scan {
    /// Every byte of the chunk belongs to the element and it has not ended
    Incomplete,
    /// The element ends after this many bytes of the chunk
    Complete(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueKind {
    /// Object or array
    Compound,
    /// Top-level string
    Text,
    /// Number, `true`, `false` or `null`
    Scalar,
}

/// Tracks the extent of a single JSON value across chunk boundaries
#[derive(Debug, Default)]
pub(crate) struct ElementScanner {
    kind: Option<ValueKind>,
    depth: usize,
    in_string: bool,
    escaped: bool,
}

impl ElementScanner {
    /// Feed the next chunk
    ///
    /// The first byte ever fed must be the first byte of the value; leading
    /// whitespace is the caller's job. Returns the offending byte when the
    /// value cannot start with it.
    pub(crate) fn scan(&mut self, chunk: &[u8]) -> Result<Scan, u8> {
        for (index, &byte) in chunk.iter().enumerate() {
            let Some(kind) = self.kind else {
                self.start(byte)?;
                continue;
            };

            match kind {
                ValueKind::Compound => {
                    if self.in_string {
                        self.string_byte(byte);
                        continue;
                    }
                    match byte {
                        b'"' => self.in_string = true,
                        b'{' | b'[' => self.depth += 1,
                        b'}' | b']' => {
                            self.depth -= 1;
                            if self.depth == 0 {
                                return Ok(Scan::Complete(index + 1));
                            }
                        }
                        _ => {}
                    }
                }
                ValueKind::Text => {
                    self.string_byte(byte);
                    if !self.in_string {
                        return Ok(Scan::Complete(index + 1));
                    }
                }
                ValueKind::Scalar => {
                    // The delimiter is not part of the value
                    if is_whitespace(byte) || matches!(byte, b',' | b']' | b'}') {
                        return Ok(Scan::Complete(index));
                    }
                }
            }
        }

        Ok(Scan::Incomplete)
    }

    /// True once the first byte has been seen
    pub(crate) const fn started(&self) -> bool {
        self.kind.is_some()
    }

    fn start(&mut self, byte: u8) -> Result<(), u8> {
        let kind = match byte {
            b'{' | b'[' => {
                self.depth = 1;
                ValueKind::Compound
            }
            b'"' => {
                self.in_string = true;
                ValueKind::Text
            }
            b'-' | b'0'..=b'9' | b't' | b'f' | b'n' => ValueKind::Scalar,
            other => return Err(other),
        };
        self.kind = Some(kind);
        Ok(())
    }

    fn string_byte(&mut self, byte: u8) {
        if self.escaped {
            self.escaped = false;
        } else if byte == b'\\' {
            self.escaped = true;
        } else if byte == b'"' {
            self.in_string = false;
        }
    }
}

/// JSON insignificant whitespace (RFC 8259 section 2)
pub(crate) const fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

/// Render a byte for error messages
pub(crate) fn describe(byte: u8) -> String {
    if byte.is_ascii_graphic() {
        format!("'{}'", byte as char)
    } else {
        format!("byte 0x{byte:02x}")
    }
}
