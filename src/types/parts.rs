//! Multipart parts
//!
//! A [`PartData`] is one section of a `multipart/form-data` body. Binary and
//! file parts own a single-use [`PartSource`]; the multipart encoder drains it
//! exactly once and drops it afterwards, which closes any underlying file.

use crate::error::{FormError, Result};
use crate::utils::cancel::ByteStream;
use crate::utils::mime::guess_mime;
use bytes::Bytes;
use futures::Stream;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use std::fmt;
use std::path::Path;
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;

/// Owned, single-use byte source of a binary or file part.
pub struct PartSource {
    stream: ByteStream,
    len: Option<u64>,
}

impl PartSource {
    /// In-memory content.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        let len = Some(bytes.len() as u64);
        Self {
            stream: Box::pin(futures::stream::once(async move { Ok(bytes) })),
            len,
        }
    }

    /// Any tokio reader, e.g. a socket or a pipe.
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: AsyncRead + Send + 'static,
    {
        Self {
            stream: Box::pin(ReaderStream::new(reader)),
            len: None,
        }
    }

    /// A stream of chunks. An error item aborts the body it is part of.
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = std::io::Result<Bytes>> + Send + 'static,
    {
        Self {
            stream: Box::pin(stream),
            len: None,
        }
    }

    /// Open a file for streaming.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = tokio::fs::File::open(path.as_ref()).await?;
        let len = file.metadata().await.ok().map(|m| m.len());
        Ok(Self {
            stream: Box::pin(ReaderStream::new(file)),
            len,
        })
    }

    /// Declared length, when known up front.
    pub fn len(&self) -> Option<u64> {
        self.len
    }

    pub(crate) fn into_stream(self) -> ByteStream {
        self.stream
    }
}

impl fmt::Debug for PartSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartSource")
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

/// One section of a multipart body.
#[derive(Debug)]
pub enum PartData {
    /// Plain text field.
    FormItem {
        name: String,
        value: String,
        headers: HeaderMap,
    },
    /// Binary content with an optional file name.
    BinaryItem {
        name: String,
        filename: Option<String>,
        source: PartSource,
        headers: HeaderMap,
    },
    /// File content; always has a file name.
    FileItem {
        name: String,
        filename: String,
        source: PartSource,
        headers: HeaderMap,
    },
}

impl PartData {
    pub fn form_item(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::FormItem {
            name: name.into(),
            value: value.into(),
            headers: HeaderMap::new(),
        }
    }

    pub fn binary_item(
        name: impl Into<String>,
        filename: Option<String>,
        source: PartSource,
    ) -> Self {
        Self::BinaryItem {
            name: name.into(),
            filename,
            source,
            headers: HeaderMap::new(),
        }
    }

    pub fn file_item(
        name: impl Into<String>,
        filename: impl Into<String>,
        source: PartSource,
    ) -> Self {
        Self::FileItem {
            name: name.into(),
            filename: filename.into(),
            source,
            headers: HeaderMap::new(),
        }
    }

    /// Add or replace a part header.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())?;
        let value = HeaderValue::from_str(value)?;
        self.headers_mut().insert(name, value);
        Ok(self)
    }

    pub fn with_content_type(self, content_type: &str) -> Result<Self> {
        self.with_header(CONTENT_TYPE.as_str(), content_type)
    }

    pub fn name(&self) -> &str {
        match self {
            Self::FormItem { name, .. }
            | Self::BinaryItem { name, .. }
            | Self::FileItem { name, .. } => name,
        }
    }

    pub fn filename(&self) -> Option<&str> {
        match self {
            Self::FormItem { .. } => None,
            Self::BinaryItem { filename, .. } => filename.as_deref(),
            Self::FileItem { filename, .. } => Some(filename),
        }
    }

    pub fn headers(&self) -> &HeaderMap {
        match self {
            Self::FormItem { headers, .. }
            | Self::BinaryItem { headers, .. }
            | Self::FileItem { headers, .. } => headers,
        }
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        match self {
            Self::FormItem { headers, .. }
            | Self::BinaryItem { headers, .. }
            | Self::FileItem { headers, .. } => headers,
        }
    }

    /// `form-data; name="..."[; filename="..."]` for this part.
    pub fn content_disposition(&self) -> String {
        let mut disposition = format!("form-data; name=\"{}\"", escape_quoted(self.name()));
        if let Some(filename) = self.filename() {
            disposition.push_str(&format!("; filename=\"{}\"", escape_quoted(filename)));
        }
        disposition
    }
}

// Quotes and line breaks would end the quoted-string or the header line.
fn escape_quoted(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Builder for a list of parts, appended in order.
#[derive(Debug, Default)]
pub struct FormDataBuilder {
    parts: Vec<PartData>,
}

impl FormDataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text field.
    pub fn append(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(PartData::form_item(name, value));
        self
    }

    /// In-memory binary content. The content type is sniffed from the bytes,
    /// then from the file name.
    pub fn append_bytes(
        mut self,
        name: impl Into<String>,
        filename: Option<String>,
        bytes: impl Into<Bytes>,
    ) -> Result<Self> {
        let bytes = bytes.into();
        let content_type = guess_mime(Some(bytes.as_ref()), filename.as_deref());
        let part = PartData::binary_item(name, filename, PartSource::from_bytes(bytes))
            .with_content_type(&content_type)?;
        self.parts.push(part);
        Ok(self)
    }

    /// Streamed binary content with an explicit content type.
    pub fn append_source(
        mut self,
        name: impl Into<String>,
        filename: Option<String>,
        content_type: &str,
        source: PartSource,
    ) -> Result<Self> {
        let part = PartData::binary_item(name, filename, source).with_content_type(content_type)?;
        self.parts.push(part);
        Ok(self)
    }

    /// File from disk, streamed while the body is sent.
    pub async fn append_file(
        mut self,
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Self> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .ok_or_else(|| {
                FormError::ConfigurationError(format!("Not a file path: {}", path.display()))
            })?;
        let content_type = guess_mime(None, Some(&filename));
        let source = PartSource::open(path).await?;
        let part = PartData::file_item(name, filename, source).with_content_type(&content_type)?;
        self.parts.push(part);
        Ok(self)
    }

    pub fn append_part(mut self, part: PartData) -> Self {
        self.parts.push(part);
        self
    }

    pub fn build(self) -> Vec<PartData> {
        self.parts
    }
}

/// Header block written in front of a part's content, CRLF-terminated,
/// including the blank separator line.
pub(crate) fn part_header_block(part: &PartData) -> Result<Bytes> {
    let mut headers = part.headers().clone();
    if !headers.contains_key(CONTENT_DISPOSITION) {
        headers.insert(
            CONTENT_DISPOSITION,
            HeaderValue::from_str(&part.content_disposition())?,
        );
    }
    match part {
        PartData::FormItem { .. } => {}
        PartData::BinaryItem { .. } | PartData::FileItem { .. } => {
            if !headers.contains_key(CONTENT_TYPE) {
                let content_type = guess_mime(None, part.filename());
                headers.insert(CONTENT_TYPE, HeaderValue::from_str(&content_type)?);
            }
        }
    }

    let mut block = Vec::new();
    // Content-Disposition first; receivers rely on seeing it before the rest.
    for (name, value) in std::iter::once((&CONTENT_DISPOSITION, &headers[CONTENT_DISPOSITION]))
        .chain(headers.iter().filter(|(name, _)| **name != CONTENT_DISPOSITION))
    {
        block.extend_from_slice(canonical_header_name(name.as_str()).as_bytes());
        block.extend_from_slice(b": ");
        block.extend_from_slice(value.as_bytes());
        block.extend_from_slice(b"\r\n");
    }
    block.extend_from_slice(b"\r\n");
    Ok(Bytes::from(block))
}

// HeaderMap lowercases names; multipart receivers expect the usual casing.
fn canonical_header_name(name: &str) -> String {
    name.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_item_disposition() {
        let part = PartData::form_item("name", "Bob");
        assert_eq!(part.content_disposition(), "form-data; name=\"name\"");
        assert_eq!(part.filename(), None);
    }

    #[test]
    fn file_item_disposition_escapes_quotes() {
        let part = PartData::file_item("doc", "a\"b.txt", PartSource::from_bytes("x"));
        assert_eq!(
            part.content_disposition(),
            "form-data; name=\"doc\"; filename=\"a%22b.txt\""
        );
    }

    #[test]
    fn header_block_for_text_field() {
        let part = PartData::form_item("name", "Bob");
        let block = part_header_block(&part).unwrap();
        assert_eq!(
            &block[..],
            b"Content-Disposition: form-data; name=\"name\"\r\n\r\n"
        );
    }

    #[test]
    fn header_block_defaults_binary_content_type() {
        let part = PartData::binary_item("blob", None, PartSource::from_bytes(vec![1u8, 2, 3]));
        let block = String::from_utf8(part_header_block(&part).unwrap().to_vec()).unwrap();
        assert!(block.starts_with("Content-Disposition: form-data; name=\"blob\"\r\n"));
        assert!(block.contains("Content-Type: application/octet-stream\r\n"));
        assert!(block.ends_with("\r\n\r\n"));
    }

    #[test]
    fn explicit_disposition_is_kept() {
        let part = PartData::form_item("ignored", "v")
            .with_header("content-disposition", "form-data; name=\"custom\"")
            .unwrap();
        let block = String::from_utf8(part_header_block(&part).unwrap().to_vec()).unwrap();
        assert_eq!(block, "Content-Disposition: form-data; name=\"custom\"\r\n\r\n");
    }

    #[test]
    fn builder_sniffs_content_types() {
        let parts = FormDataBuilder::new()
            .append("title", "hello")
            .append_bytes("data", Some("data.json".to_string()), "{}")
            .unwrap()
            .build();

        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].name(), "title");
        assert_eq!(
            parts[1].headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn invalid_header_value_is_rejected() {
        let err = PartData::form_item("a", "b")
            .with_header("x-note", "line\nbreak")
            .unwrap_err();
        assert!(matches!(err, FormError::InvalidHeader(_)));
    }

    #[tokio::test]
    async fn append_file_uses_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        tokio::fs::write(&path, b"contents").await.unwrap();

        let parts = FormDataBuilder::new()
            .append_file("upload", &path)
            .await
            .unwrap()
            .build();

        assert_eq!(parts[0].filename(), Some("report.txt"));
        assert_eq!(parts[0].headers().get(CONTENT_TYPE).unwrap(), "text/plain");
        match &parts[0] {
            PartData::FileItem { source, .. } => assert_eq!(source.len(), Some(8)),
            other => panic!("unexpected part: {other:?}"),
        }
    }
}
