//! Source-agnostic walk over a top-level JSON array
//!
//! [`ArrayCursor`] owns the separator rules, element extraction and poison
//! state for both bulk readers. It only ever sees borrowed chunks; the
//! readers do the I/O and tell the cursor how to proceed.

use super::decoder::RecordDecoder;
use super::errors::BulkReadError;
use super::scanner::{describe, is_whitespace, ElementScanner, Scan};
use tracing::{debug, trace};

/// Where the cursor sits between records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorState {
    /// Just past `[`, before the first element or `]`
    BeforeFirst,
    /// Just past an element, before `,` or `]`
    AfterElement,
    /// Past `]`
    Finished,
    /// A previous call failed
    Poisoned,
}

/// Lexical position while a record is being read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Looking for `[`
    Opening,
    /// Looking for an element, `,` or `]`
    Separator,
    /// Past `,`; only an element may follow
    AfterComma,
    /// Inside an element
    Element,
}

/// What one chunk moved the cursor to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// Feed the next chunk
    NeedMore,
    /// `[` consumed
    Opened,
    /// One element's bytes are buffered
    Element,
    /// `]` consumed
    Closed,
}

#[derive(Debug)]
pub(crate) struct ArrayCursor {
    state: CursorState,
    phase: Phase,
    scanner: ElementScanner,
    /// Bytes of the element being read; cleared per element
    scratch: Vec<u8>,
    position: u64,
    produced: usize,
}

impl ArrayCursor {
    pub(crate) fn new() -> Self {
        Self {
            state: CursorState::BeforeFirst,
            phase: Phase::Opening,
            scanner: ElementScanner::default(),
            scratch: Vec::new(),
            position: 0,
            produced: 0,
        }
    }

    /// Whether a read may start: `Ok(false)` once the array is exhausted
    pub(crate) fn ready(&self) -> Result<bool, BulkReadError> {
        match self.state {
            CursorState::Finished => Ok(false),
            CursorState::Poisoned => Err(BulkReadError::Poisoned),
            CursorState::BeforeFirst | CursorState::AfterElement => Ok(true),
        }
    }

    /// Feed a non-empty chunk; returns how many bytes to consume and the step reached
    ///
    /// Bytes past the returned count are left untouched for the next call.
    pub(crate) fn advance(&mut self, chunk: &[u8]) -> Result<(usize, Step), BulkReadError> {
        let (used, step) = match self.phase {
            Phase::Element => self.scan_element(chunk)?,
            _ => self.scan_token(chunk)?,
        };
        self.position += used as u64;
        Ok((used, step))
    }

    /// The error for a source that ended at the current position
    pub(crate) fn end_of_input(&self) -> BulkReadError {
        match self.phase {
            Phase::Opening => BulkReadError::MalformedInput("empty input".to_string()),
            _ => BulkReadError::UnexpectedEof {
                position: self.position,
            },
        }
    }

    /// Settle a read attempt, decoding the buffered element if there is one
    ///
    /// Any error poisons the cursor.
    pub(crate) fn finish<T, D>(
        &mut self,
        step: Result<Step, BulkReadError>,
        decoder: &D,
    ) -> Result<Option<T>, BulkReadError>
    where
        D: RecordDecoder<T>,
    {
        let result = step.and_then(|step| match step {
            Step::Element => {
                trace!(index = self.produced, bytes = self.scratch.len(), "Read element");
                decoder
                    .decode(&self.scratch)
                    .map(Some)
                    .map_err(|source| BulkReadError::Decode {
                        index: self.produced,
                        source,
                    })
            }
            Step::NeedMore | Step::Opened | Step::Closed => Ok(None),
        });

        self.state = match &result {
            Ok(Some(_)) => {
                self.produced += 1;
                CursorState::AfterElement
            }
            Ok(None) => {
                debug!(records = self.produced, "Bulk array exhausted");
                CursorState::Finished
            }
            Err(_) => CursorState::Poisoned,
        };
        result
    }

    pub(crate) const fn records_read(&self) -> usize {
        self.produced
    }

    pub(crate) const fn position(&self) -> u64 {
        self.position
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.state == CursorState::Finished
    }

    pub(crate) fn is_poisoned(&self) -> bool {
        self.state == CursorState::Poisoned
    }

    fn scan_token(&mut self, chunk: &[u8]) -> Result<(usize, Step), BulkReadError> {
        let Some(index) = chunk.iter().position(|b| !is_whitespace(*b)) else {
            return Ok((chunk.len(), Step::NeedMore));
        };
        let at = self.position + index as u64;

        match (self.phase, self.state, chunk[index]) {
            (Phase::Opening, _, b'[') => {
                self.phase = Phase::Separator;
                debug!("Opened bulk array");
                Ok((index + 1, Step::Opened))
            }
            (Phase::Opening, _, other) => Err(BulkReadError::MalformedInput(format!(
                "expected '[' at byte {at}, found {}",
                describe(other)
            ))),
            (Phase::AfterComma, _, b']') => Err(BulkReadError::Syntax {
                position: at,
                message: "trailing comma before ']'".to_string(),
            }),
            (Phase::Separator, _, b']') => Ok((index + 1, Step::Closed)),
            (Phase::Separator, CursorState::AfterElement, b',') => {
                self.phase = Phase::AfterComma;
                Ok((index + 1, Step::NeedMore))
            }
            (Phase::Separator, CursorState::AfterElement, other) => Err(BulkReadError::Syntax {
                position: at,
                message: format!("expected ',' or ']', found {}", describe(other)),
            }),
            _ => {
                self.phase = Phase::Element;
                self.scanner = ElementScanner::default();
                self.scratch.clear();
                Ok((index, Step::NeedMore))
            }
        }
    }

    fn scan_element(&mut self, chunk: &[u8]) -> Result<(usize, Step), BulkReadError> {
        match self.scanner.scan(chunk) {
            Ok(Scan::Incomplete) => {
                self.scratch.extend_from_slice(chunk);
                Ok((chunk.len(), Step::NeedMore))
            }
            Ok(Scan::Complete(end)) => {
                self.scratch.extend_from_slice(&chunk[..end]);
                self.phase = Phase::Separator;
                Ok((end, Step::Element))
            }
            Err(byte) => Err(BulkReadError::Syntax {
                position: self.position,
                message: format!("expected a JSON value, found {}", describe(byte)),
            }),
        }
    }
}
