//! Blocking counterpart of [`BulkReader`](super::BulkReader) for `std::io` sources
//!
//! Useful for dumps already on disk, where pulling in an async runtime buys
//! nothing. Both readers share one array cursor, so separators, truncation
//! and poisoning behave identically.

use super::cursor::{ArrayCursor, Step};
use super::decoder::{RecordDecoder, SerdeJsonDecoder};
use super::errors::BulkReadError;
use serde::de::DeserializeOwned;
use std::io::BufRead;
use std::marker::PhantomData;

/// Pull-based decoder for a top-level JSON array read from a `BufRead`
///
/// Yields records through [`Iterator`]; iteration stops after the closing
/// bracket or after the first error.
///
/// # Example
/// ```
/// use scryfall_client::infrastructure::bulk::BlockingBulkReader;
/// use serde::Deserialize;
/// use std::io::Cursor;
///
/// #[derive(Deserialize)]
/// struct Ruling {
///     comment: String,
/// }
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let data = Cursor::new(r#"[{"comment":"First"}, {"comment":"Second"}]"#);
/// let reader = BlockingBulkReader::<Ruling, _>::new(data)?;
///
/// for ruling in reader {
///     println!("{}", ruling?.comment);
/// }
/// # Ok(())
/// # }
/// ```
pub struct BlockingBulkReader<T, R, D = SerdeJsonDecoder> {
    source: R,
    decoder: D,
    cursor: ArrayCursor,
    _record: PhantomData<fn() -> T>,
}

impl<T, R> BlockingBulkReader<T, R, SerdeJsonDecoder>
where
    T: DeserializeOwned,
    R: BufRead,
{
    /// Open `source`, consuming everything up to and including `[`
    ///
    /// Fails with [`BulkReadError::MalformedInput`] if the source is empty or
    /// its first significant byte is anything other than `[`.
    pub fn new(source: R) -> Result<Self, BulkReadError> {
        Self::with_decoder(source, SerdeJsonDecoder)
    }
}

impl<T, R, D> BlockingBulkReader<T, R, D>
where
    R: BufRead,
    D: RecordDecoder<T>,
{
    /// Open `source` with a custom element decoder
    pub fn with_decoder(source: R, decoder: D) -> Result<Self, BulkReadError> {
        let mut reader = Self {
            source,
            decoder,
            cursor: ArrayCursor::new(),
            _record: PhantomData,
        };
        reader.step()?;
        Ok(reader)
    }

    /// Decode the next element
    ///
    /// # Returns
    /// * `Ok(Some(record))` - the next element, in array order
    /// * `Ok(None)` - the array is exhausted; repeated calls return `Ok(None)`
    /// * `Err(BulkReadError)` - decoding or reading failed; the reader is
    ///   poisoned and later calls return [`BulkReadError::Poisoned`]
    pub fn next_record(&mut self) -> Result<Option<T>, BulkReadError> {
        if !self.cursor.ready()? {
            return Ok(None);
        }

        let step = self.step();
        self.cursor.finish(step, &self.decoder)
    }

    /// Number of records produced so far
    pub const fn records_read(&self) -> usize {
        self.cursor.records_read()
    }

    /// Bytes consumed from the source so far
    pub const fn position(&self) -> u64 {
        self.cursor.position()
    }

    /// True once the closing bracket has been consumed
    pub fn is_finished(&self) -> bool {
        self.cursor.is_finished()
    }

    fn step(&mut self) -> Result<Step, BulkReadError> {
        loop {
            let chunk = self.source.fill_buf()?;
            if chunk.is_empty() {
                return Err(self.cursor.end_of_input());
            }

            let (used, step) = self.cursor.advance(chunk)?;
            self.source.consume(used);
            if step != Step::NeedMore {
                return Ok(step);
            }
        }
    }
}

impl<T, R, D> Iterator for BlockingBulkReader<T, R, D>
where
    R: BufRead,
    D: RecordDecoder<T>,
{
    type Item = Result<T, BulkReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.is_poisoned() {
            return None;
        }
        self.next_record().transpose()
    }
}
