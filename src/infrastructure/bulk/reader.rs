//! Streaming reader for bulk JSON array dumps
//!
//! Bulk dumps are a single top-level JSON array that can run to hundreds of
//! megabytes. [`BulkReader`] pulls one element at a time from any
//! `AsyncBufRead` source, keeping only the bytes of the current element in
//! memory.

use super::cursor::{ArrayCursor, Step};
use super::decoder::{RecordDecoder, SerdeJsonDecoder};
use super::errors::BulkReadError;
use futures::Stream;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Pull-based decoder for a top-level JSON array
///
/// # Example
/// ```
/// use scryfall_client::infrastructure::bulk::BulkReader;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Ruling {
///     comment: String,
/// }
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let data: &[u8] = br#"[{"comment":"First"}, {"comment":"Second"}]"#;
/// let mut reader = BulkReader::<Ruling, _>::new(data).await?;
///
/// while let Some(ruling) = reader.next().await? {
///     println!("{}", ruling.comment);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct BulkReader<T, R, D = SerdeJsonDecoder> {
    source: R,
    decoder: D,
    cursor: ArrayCursor,
    _record: PhantomData<fn() -> T>,
}

impl<T, R> BulkReader<T, R, SerdeJsonDecoder>
where
    T: DeserializeOwned,
    R: AsyncBufRead + Unpin,
{
    /// Open `source`, consuming everything up to and including `[`
    ///
    /// Fails with [`BulkReadError::MalformedInput`] if the source is empty or
    /// its first significant byte is anything other than `[`.
    pub async fn new(source: R) -> Result<Self, BulkReadError> {
        Self::with_decoder(source, SerdeJsonDecoder).await
    }
}

impl<T, R, D> BulkReader<T, R, D>
where
    R: AsyncBufRead + Unpin,
    D: RecordDecoder<T>,
{
    /// Open `source` with a custom element decoder
    pub async fn with_decoder(source: R, decoder: D) -> Result<Self, BulkReadError> {
        let mut reader = Self {
            source,
            decoder,
            cursor: ArrayCursor::new(),
            _record: PhantomData,
        };
        reader.step().await?;
        Ok(reader)
    }

    /// Decode the next element
    ///
    /// # Returns
    /// * `Ok(Some(record))` - the next element, in array order
    /// * `Ok(None)` - the array is exhausted; repeated calls return `Ok(None)`
    /// * `Err(BulkReadError)` - decoding or reading failed; the reader is
    ///   poisoned and later calls return [`BulkReadError::Poisoned`]
    pub async fn next(&mut self) -> Result<Option<T>, BulkReadError> {
        if !self.cursor.ready()? {
            return Ok(None);
        }

        let step = self.step().await;
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

    /// Adapt into a `Stream` that ends after the last record or the first error
    pub fn into_stream(self) -> impl Stream<Item = Result<T, BulkReadError>> {
        futures::stream::unfold(Some(self), |reader| async move {
            let mut reader = reader?;
            match reader.next().await {
                Ok(Some(record)) => Some((Ok(record), Some(reader))),
                Ok(None) => None,
                Err(err) => Some((Err(err), None)),
            }
        })
    }

    /// Feed buffered chunks to the cursor until it reaches a token or element
    async fn step(&mut self) -> Result<Step, BulkReadError> {
        loop {
            let chunk = self.source.fill_buf().await?;
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Record {
        id: u32,
    }

    async fn open(input: &'static str) -> Result<BulkReader<Record, &'static [u8]>, BulkReadError> {
        BulkReader::new(input.as_bytes()).await
    }

    #[tokio::test]
    async fn test_reads_records_in_order() {
        let mut reader = open(r#"[{"id":1},{"id":2},{"id":3}]"#).await.unwrap();

        assert_eq!(reader.next().await.unwrap(), Some(Record { id: 1 }));
        assert_eq!(reader.next().await.unwrap(), Some(Record { id: 2 }));
        assert_eq!(reader.next().await.unwrap(), Some(Record { id: 3 }));
        assert_eq!(reader.next().await.unwrap(), None);
        assert_eq!(reader.records_read(), 3);
        assert!(reader.is_finished());
    }

    #[tokio::test]
    async fn test_end_of_sequence_is_sticky() {
        let mut reader = open("[]").await.unwrap();

        for _ in 0..3 {
            assert!(reader.next().await.unwrap().is_none());
        }
    }

    #[tokio::test]
    async fn test_whitespace_between_tokens() {
        let mut reader = open(" \r\n\t[ \n {\"id\" : 7} \n , \t{\"id\":8}\n]\n").await.unwrap();

        assert_eq!(reader.next().await.unwrap(), Some(Record { id: 7 }));
        assert_eq!(reader.next().await.unwrap(), Some(Record { id: 8 }));
        assert_eq!(reader.next().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_does_not_read_past_closing_bracket() {
        let mut reader = open(r#"[{"id":1}] trailing garbage"#).await.unwrap();

        assert!(reader.next().await.unwrap().is_some());
        assert!(reader.next().await.unwrap().is_none());
        assert_eq!(reader.position(), 10);
    }

    #[tokio::test]
    async fn test_malformed_input_at_construction() {
        assert!(open("").await.unwrap_err().is_malformed_input());
        assert!(open("   \n ").await.unwrap_err().is_malformed_input());
        assert!(open(r#"{"id":1}"#).await.unwrap_err().is_malformed_input());
        assert!(open("null").await.unwrap_err().is_malformed_input());
    }

    #[tokio::test]
    async fn test_decode_error_poisons_reader() {
        let mut reader = open(r#"[{"id":1},{"id":"two"},{"id":3}]"#).await.unwrap();

        assert!(reader.next().await.unwrap().is_some());

        let err = reader.next().await.unwrap_err();
        assert!(matches!(err, BulkReadError::Decode { index: 1, .. }));

        assert!(matches!(
            reader.next().await.unwrap_err(),
            BulkReadError::Poisoned
        ));
    }

    #[tokio::test]
    async fn test_missing_separator() {
        let mut reader = open(r#"[{"id":1} {"id":2}]"#).await.unwrap();

        assert!(reader.next().await.unwrap().is_some());
        assert!(matches!(
            reader.next().await.unwrap_err(),
            BulkReadError::Syntax { position: 10, .. }
        ));
    }

    #[tokio::test]
    async fn test_trailing_comma_is_rejected() {
        let mut reader = open(r#"[{"id":1},]"#).await.unwrap();

        assert!(reader.next().await.unwrap().is_some());
        assert!(matches!(
            reader.next().await.unwrap_err(),
            BulkReadError::Syntax { .. }
        ));
    }

    #[tokio::test]
    async fn test_truncated_input() {
        let mut reader = open(r#"[{"id":1},{"id":"#).await.unwrap();

        assert!(reader.next().await.unwrap().is_some());
        assert!(matches!(
            reader.next().await.unwrap_err(),
            BulkReadError::UnexpectedEof { .. }
        ));
    }

    #[tokio::test]
    async fn test_scalar_elements() {
        let mut reader = BulkReader::<i64, _>::new(&b"[1, -2,3 ]"[..]).await.unwrap();

        assert_eq!(reader.next().await.unwrap(), Some(1));
        assert_eq!(reader.next().await.unwrap(), Some(-2));
        assert_eq!(reader.next().await.unwrap(), Some(3));
        assert_eq!(reader.next().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_into_stream() {
        use futures::StreamExt;

        let reader = open(r#"[{"id":1},{"id":2}]"#).await.unwrap();
        let ids: Vec<u32> = reader
            .into_stream()
            .map(|record| record.unwrap().id)
            .collect()
            .await;

        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_stream_ends_after_error() {
        use futures::StreamExt;

        let reader = open(r#"[{"id":1},{"id":true},{"id":3}]"#).await.unwrap();
        let results: Vec<_> = reader.into_stream().collect().await;

        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].as_ref().unwrap_err().is_decode());
    }
}
