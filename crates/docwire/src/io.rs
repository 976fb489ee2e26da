//! Stream framing.
//!
//! Two layouts are supported:
//!
//! - **Delimited**: `varint(len) || record`, any number of documents back to
//!   back on one stream. [`Serializer::write`] and [`Serializer::read`].
//! - **Undelimited**: one document per file.
//!   - Uncompressed: `DOCW` magic + version byte + record
//!   - Compressed: `DOCWZ` magic + varint uncompressed size + zstd frame
//!
//!   [`Serializer::read_undelimited`] accepts both. Without a magic it also
//!   accepts a bare record or a single delimited record.

use std::io::{self, Read, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::codec::Serializer;
use crate::codec::primitives::{Reader, Writer, encode_varint};
use crate::error::{DecodeError, EncodeError, StreamError};
use crate::limits::{
    FORMAT_VERSION, MAGIC_COMPRESSED, MAGIC_UNCOMPRESSED, MAX_DOCUMENT_SIZE, MAX_VARINT_BYTES,
    MIN_FORMAT_VERSION,
};
use crate::model::Document;

fn next_byte<R: Read>(reader: &mut R) -> io::Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

/// Whether `input` is exactly one varint length prefix plus that many bytes.
fn spans_one_frame(input: &[u8]) -> bool {
    let mut reader = Reader::new(input);
    reader
        .read_varint("frame length")
        .is_ok_and(|len| len == reader.remaining().len() as u64)
}

/// Reads a frame length. `Ok(None)` means the stream ended cleanly before
/// the first byte.
fn read_frame_len<R: Read>(reader: &mut R) -> Result<Option<usize>, StreamError> {
    let mut result: u64 = 0;
    for i in 0..MAX_VARINT_BYTES {
        let Some(byte) = next_byte(reader)? else {
            if i == 0 {
                return Ok(None);
            }
            return Err(DecodeError::UnexpectedEof { context: "frame length" }.into());
        };
        if i == MAX_VARINT_BYTES - 1 && byte > 1 {
            return Err(DecodeError::VarintOverflow.into());
        }
        result |= ((byte & 0x7F) as u64) << (7 * i);
        if byte & 0x80 == 0 {
            let len = result as usize;
            if len > MAX_DOCUMENT_SIZE {
                return Err(DecodeError::LengthExceedsLimit {
                    field: "frame",
                    len,
                    max: MAX_DOCUMENT_SIZE,
                }
                .into());
            }
            return Ok(Some(len));
        }
    }
    Err(DecodeError::VarintTooLong.into())
}

fn missing_text() -> StreamError {
    io::Error::new(io::ErrorKind::InvalidInput, "document has no text").into()
}

fn decompress_zstd(compressed: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let mut reader = Reader::new(compressed);
    let declared_size = reader.read_varint("uncompressed_size")? as usize;

    if declared_size > MAX_DOCUMENT_SIZE {
        return Err(DecodeError::LengthExceedsLimit {
            field: "uncompressed_size",
            len: declared_size,
            max: MAX_DOCUMENT_SIZE,
        });
    }

    let mut decoder = zstd::Decoder::new(reader.remaining())
        .map_err(|e| DecodeError::DecompressionFailed(e.to_string()))?;

    let mut decompressed = Vec::with_capacity(declared_size);
    decoder
        .by_ref()
        .take(MAX_DOCUMENT_SIZE as u64 + 1)
        .read_to_end(&mut decompressed)
        .map_err(|e| DecodeError::DecompressionFailed(e.to_string()))?;

    if decompressed.len() != declared_size {
        warn!(
            declared = declared_size,
            actual = decompressed.len(),
            "compressed document size does not match its header"
        );
        return Err(DecodeError::UncompressedSizeMismatch {
            declared: declared_size,
            actual: decompressed.len(),
        });
    }

    Ok(decompressed)
}

impl Serializer {
    /// Writes `doc` as one length-delimited record and flushes.
    ///
    /// Returns the writer so calls can be chained. A document without text is
    /// rejected with an [`io::ErrorKind::InvalidInput`] error.
    pub fn write<W: Write>(&self, doc: &Document, mut writer: W) -> Result<W, StreamError> {
        if doc.text.is_none() {
            return Err(missing_text());
        }
        let record = self.to_bytes(doc)?;

        let mut prefix = [0u8; MAX_VARINT_BYTES];
        let n = encode_varint(record.len() as u64, &mut prefix);
        writer.write_all(&prefix[..n])?;
        writer.write_all(&record)?;
        writer.flush()?;
        Ok(writer)
    }

    /// Reads one length-delimited record.
    ///
    /// A stream that ends before the first byte yields `None`. A record cut
    /// short anywhere after that is a [`StreamError::MalformedStream`].
    pub fn read<R: Read>(&self, mut reader: R) -> Result<(Option<Document>, R), StreamError> {
        let Some(len) = read_frame_len(&mut reader)? else {
            return Ok((None, reader));
        };

        let mut record = Vec::with_capacity(len.min(64 * 1024));
        (&mut reader).take(len as u64).read_to_end(&mut record)?;
        if record.len() != len {
            return Err(DecodeError::UnexpectedEof { context: "document" }.into());
        }

        let doc = self.from_bytes(&record)?;
        Ok((Some(doc), reader))
    }

    /// Encodes `doc` in the uncompressed undelimited layout.
    pub fn to_undelimited(&self, doc: &Document) -> Result<Vec<u8>, EncodeError> {
        let record = self.to_bytes(doc)?;
        let mut writer = Writer::with_capacity(MAGIC_UNCOMPRESSED.len() + 1 + record.len());
        writer.write_bytes(MAGIC_UNCOMPRESSED);
        writer.write_byte(FORMAT_VERSION);
        writer.write_bytes(&record);
        Ok(writer.into_bytes())
    }

    /// Encodes `doc` in the compressed undelimited layout at zstd `level`.
    pub fn to_undelimited_compressed(&self, doc: &Document, level: i32) -> Result<Vec<u8>, EncodeError> {
        let record = self.to_bytes(doc)?;

        let compressed = zstd::encode_all(record.as_slice(), level)
            .map_err(|e| EncodeError::CompressionFailed(e.to_string()))?;

        let mut writer = Writer::with_capacity(MAGIC_COMPRESSED.len() + MAX_VARINT_BYTES + compressed.len());
        writer.write_bytes(MAGIC_COMPRESSED);
        writer.write_varint(record.len() as u64);
        writer.write_bytes(&compressed);
        Ok(writer.into_bytes())
    }

    pub fn write_undelimited<W: Write>(&self, doc: &Document, mut writer: W) -> Result<W, StreamError> {
        if doc.text.is_none() {
            return Err(missing_text());
        }
        writer.write_all(&self.to_undelimited(doc)?)?;
        writer.flush()?;
        Ok(writer)
    }

    pub fn write_undelimited_compressed<W: Write>(
        &self,
        doc: &Document,
        level: i32,
        mut writer: W,
    ) -> Result<W, StreamError> {
        if doc.text.is_none() {
            return Err(missing_text());
        }
        writer.write_all(&self.to_undelimited_compressed(doc, level)?)?;
        writer.flush()?;
        Ok(writer)
    }

    /// Decodes a whole undelimited file held in memory.
    ///
    /// Both magics are recognised. Anything else is tried as a bare record
    /// (the output of [`Serializer::to_bytes`]) and then as a single delimited
    /// record. A magic-prefixed file whose body does not decode gets the same
    /// retries before its own error is returned.
    pub fn read_undelimited(&self, input: &[u8]) -> Result<Document, StreamError> {
        let Some(result) = self.read_with_magic(input) else {
            return self.read_without_magic(input);
        };
        match result {
            Err(StreamError::Cancelled) => Err(StreamError::Cancelled),
            Err(err) => {
                debug!(error = %err, "magic-prefixed body did not decode, retrying without magic");
                self.read_without_magic(input).map_err(|retry| match retry {
                    StreamError::Cancelled => StreamError::Cancelled,
                    _ => err,
                })
            }
            ok => ok,
        }
    }

    fn read_with_magic(&self, input: &[u8]) -> Option<Result<Document, StreamError>> {
        if input.starts_with(MAGIC_COMPRESSED) {
            let body = &input[MAGIC_COMPRESSED.len()..];
            return Some(
                decompress_zstd(body)
                    .and_then(|record| self.from_bytes(&record))
                    .map_err(StreamError::from),
            );
        }
        if input.starts_with(MAGIC_UNCOMPRESSED) {
            return Some(self.read_versioned(input));
        }
        None
    }

    fn read_versioned(&self, input: &[u8]) -> Result<Document, StreamError> {
        let mut reader = Reader::new(input);
        reader.read_bytes(MAGIC_UNCOMPRESSED.len(), "magic")?;
        let version = reader.read_byte("version")?;
        if !(MIN_FORMAT_VERSION..=FORMAT_VERSION).contains(&version) {
            return Err(DecodeError::UnsupportedVersion { version }.into());
        }
        Ok(self.from_bytes(reader.remaining())?)
    }

    fn read_without_magic(&self, input: &[u8]) -> Result<Document, StreamError> {
        if input.is_empty() {
            return Err(DecodeError::UnexpectedEof { context: "document" }.into());
        }

        // A prefix that frames the input exactly is taken as delimited first.
        let framed = spans_one_frame(input);
        let mut delimited = None;
        if framed {
            match self.read_one_frame(input) {
                Err(err) if !matches!(err, StreamError::Cancelled) => delimited = Some(err),
                done => return done,
            }
        }

        match self.from_bytes(input) {
            Ok(doc) => return Ok(doc),
            Err(DecodeError::Cancelled) => return Err(StreamError::Cancelled),
            Err(err) => debug!(len = input.len(), error = %err, "not a bare record"),
        }

        let err = match delimited {
            Some(err) => err,
            None => match self.read_one_frame(input) {
                Err(err) if !matches!(err, StreamError::Cancelled) => err,
                done => return done,
            },
        };
        if framed {
            return Err(err);
        }
        debug!(error = %err, "not a delimited record either");
        Err(DecodeError::InvalidMagic {
            found: input[..input.len().min(MAGIC_COMPRESSED.len())].to_vec(),
        }
        .into())
    }

    fn read_one_frame(&self, input: &[u8]) -> Result<Document, StreamError> {
        match self.read(input)? {
            (Some(doc), _) => Ok(doc),
            (None, _) => Err(DecodeError::UnexpectedEof { context: "document" }.into()),
        }
    }

    /// Reads and decodes the undelimited file at `path`.
    pub fn read_undelimited_file(&self, path: impl AsRef<Path>) -> Result<Document, StreamError> {
        let data = std::fs::read(path)?;
        self.read_undelimited(&data)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::cancel::CancelToken;
    use crate::error::ErrorClass;
    use crate::model::Token;

    fn apple_doc() -> Document {
        let mut doc = Document::new("Apple is a company.");
        let sentence = doc.push_sentence(vec![
            Token::tagged("Apple", "NNP"),
            Token::tagged("is", "VBZ"),
            Token::tagged("a", "DT"),
            Token::tagged("company", "NN"),
        ]);
        sentence.text = Some("Apple is a company.".into());
        doc
    }

    #[test]
    fn test_write_then_read() {
        let serializer = Serializer::default();
        let bytes = serializer.write(&apple_doc(), Vec::new()).unwrap();

        let (doc, _) = serializer.read(Cursor::new(bytes)).unwrap();
        let doc = doc.unwrap();
        assert_eq!(doc.text.as_deref(), Some("Apple is a company."));
        assert_eq!(doc.tokens.len(), 4);
        for (got, want) in doc.tokens.iter().zip(apple_doc().tokens) {
            assert_eq!(got.word, want.word);
            assert_eq!(got.tag, want.tag);
        }
    }

    #[test]
    fn test_several_documents_on_one_stream() {
        let serializer = Serializer::default();
        let mut second = Document::new("Bye.");
        second.tokens = vec![Token::new("Bye"), Token::new(".")];

        let out = serializer.write(&apple_doc(), Vec::new()).unwrap();
        let out = serializer.write(&second, out).unwrap();

        let stream = Cursor::new(out);
        let (first, stream) = serializer.read(stream).unwrap();
        let (next, stream) = serializer.read(stream).unwrap();
        let (end, _) = serializer.read(stream).unwrap();
        assert_eq!(first.unwrap(), apple_doc());
        assert_eq!(next.unwrap(), second);
        assert!(end.is_none());
    }

    #[test]
    fn test_empty_stream() {
        let (doc, rest) = Serializer::default().read(Cursor::new(Vec::new())).unwrap();
        assert!(doc.is_none());
        assert_eq!(rest.position(), 0);
    }

    #[test]
    fn test_garbage_is_malformed() {
        let serializer = Serializer::default();
        for garbage in [[0xFF, 0xFF, 0xFF], [0x05, 0x01, 0x02], [0x02, 0xFF, 0xFF]] {
            let err = serializer.read(&garbage[..]).unwrap_err();
            assert!(
                matches!(err, StreamError::MalformedStream(_)),
                "{garbage:?} gave {err}"
            );
            assert_eq!(err.class(), ErrorClass::MalformedStream);
        }
    }

    #[test]
    fn test_write_requires_text() {
        let err = Serializer::default().write(&Document::default(), Vec::new()).unwrap_err();
        match err {
            StreamError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::InvalidInput),
            other => panic!("expected an I/O error, got {other}"),
        }
    }

    #[test]
    fn test_oversized_frame_rejected() {
        let mut prefix = [0u8; MAX_VARINT_BYTES];
        let n = encode_varint(MAX_DOCUMENT_SIZE as u64 + 1, &mut prefix);
        let err = Serializer::default().read(&prefix[..n]).unwrap_err();
        assert!(matches!(
            err,
            StreamError::MalformedStream(DecodeError::LengthExceedsLimit { field: "frame", .. })
        ));
    }

    #[test]
    fn test_undelimited_roundtrip() {
        let serializer = Serializer::default();
        let bytes = serializer.to_undelimited(&apple_doc()).unwrap();
        assert_eq!(&bytes[0..4], MAGIC_UNCOMPRESSED);
        assert_eq!(bytes[4], FORMAT_VERSION);
        assert_eq!(serializer.read_undelimited(&bytes).unwrap(), apple_doc());
    }

    #[test]
    fn test_compressed_roundtrip() {
        let serializer = Serializer::default();
        let bytes = serializer.to_undelimited_compressed(&apple_doc(), 3).unwrap();
        assert_eq!(&bytes[0..5], MAGIC_COMPRESSED);
        assert_eq!(serializer.read_undelimited(&bytes).unwrap(), apple_doc());
    }

    #[test]
    fn test_compressed_size_mismatch() {
        let serializer = Serializer::default();
        let record = serializer.to_bytes(&apple_doc()).unwrap();
        let compressed = zstd::encode_all(record.as_slice(), 3).unwrap();

        let mut writer = Writer::new();
        writer.write_bytes(MAGIC_COMPRESSED);
        writer.write_varint(record.len() as u64 + 7);
        writer.write_bytes(&compressed);

        let err = serializer.read_undelimited(writer.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            StreamError::MalformedStream(DecodeError::UncompressedSizeMismatch { .. })
        ));
    }

    #[test]
    fn test_unsupported_version() {
        let mut bytes = Serializer::default().to_undelimited(&apple_doc()).unwrap();
        bytes[4] = 99;
        let err = Serializer::default().read_undelimited(&bytes).unwrap_err();
        assert!(matches!(
            err,
            StreamError::MalformedStream(DecodeError::UnsupportedVersion { version: 99 })
        ));
    }

    #[test]
    fn test_undelimited_falls_back_to_delimited() {
        let serializer = Serializer::default();
        let delimited = serializer.write(&apple_doc(), Vec::new()).unwrap();
        assert_eq!(serializer.read_undelimited(&delimited).unwrap(), apple_doc());

        assert!(matches!(
            serializer.read_undelimited(&[]),
            Err(StreamError::MalformedStream(DecodeError::UnexpectedEof { .. }))
        ));
    }

    #[test]
    fn test_undelimited_accepts_bare_record() {
        let serializer = Serializer::default();
        let record = serializer.to_bytes(&apple_doc()).unwrap();
        assert_eq!(serializer.read_undelimited(&record).unwrap(), apple_doc());
    }

    #[test]
    fn test_undelimited_unrecognized_layout() {
        let serializer = Serializer::default();
        let err = serializer.read_undelimited(&[0xFF, 0xFF, 0xFF]).unwrap_err();
        match err {
            StreamError::MalformedStream(DecodeError::InvalidMagic { found }) => {
                assert_eq!(found, vec![0xFF, 0xFF, 0xFF]);
            }
            other => panic!("expected InvalidMagic, got {other}"),
        }

        // One exact frame with a corrupt body keeps the delimited error.
        let err = serializer.read_undelimited(&[0x02, 0xFF, 0xFF]).unwrap_err();
        assert!(matches!(
            err,
            StreamError::MalformedStream(ref e) if !matches!(e, DecodeError::InvalidMagic { .. })
        ));
    }

    #[test]
    fn test_corrupt_body_after_magic_keeps_its_error() {
        let mut bytes = MAGIC_UNCOMPRESSED.to_vec();
        bytes.push(FORMAT_VERSION);
        bytes.push(0xFF);
        let err = Serializer::default().read_undelimited(&bytes).unwrap_err();
        assert!(matches!(
            err,
            StreamError::MalformedStream(DecodeError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_write_undelimited_to_file() {
        let serializer = Serializer::default();
        let path = std::env::temp_dir().join(format!("docwire-{}.docwz", std::process::id()));
        let file = std::fs::File::create(&path).unwrap();
        serializer.write_undelimited_compressed(&apple_doc(), 3, file).unwrap();

        let doc = serializer.read_undelimited_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(doc, apple_doc());
    }

    #[test]
    fn test_cancelled_read() {
        let cancel = CancelToken::new();
        let serializer = Serializer::default().with_cancellation(cancel.clone());
        let bytes = serializer.write(&apple_doc(), Vec::new()).unwrap();

        cancel.cancel();
        let err = serializer.read(Cursor::new(bytes.clone())).unwrap_err();
        assert!(matches!(err, StreamError::Cancelled));
        assert_eq!(err.class(), ErrorClass::Cancelled);

        let (doc, _) = serializer.read(Cursor::new(bytes)).unwrap();
        assert!(doc.is_some());
    }
}
