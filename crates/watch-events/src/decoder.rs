//! Streaming decoder bound to an open watch connection.

use crate::event::RawEvent;
use serde::de::Error as _;
use serde_json::de::{IoRead, StreamDeserializer};
use serde_json::value::RawValue;
use serde_json::Deserializer;
use std::io::Read;

/// Source of framed watch envelopes
///
/// `None` means the input closed cleanly with no partial value pending.
/// `Some(Err(_))` covers syntax errors, truncated values, I/O failures and
/// frames that are valid JSON but not an envelope.
pub trait EventSource {
    /// Decode the next envelope
    fn next_raw(&mut self) -> Option<serde_json::Result<RawEvent>>;
}

/// Reads one JSON envelope at a time from a byte stream
///
/// Envelopes may be separated by whitespace or simply concatenated. The
/// decoder keeps its position between calls and never rewinds.
///
/// Each frame is split off the stream before it is read as an envelope, so
/// a well-formed frame with an unexpected shape fails alone and the next
/// call moves on to the following frame. A syntax, truncation or I/O error
/// loses the frame boundary: every later call then fails as well and the
/// decoder never reports a clean end.
pub struct WatchDecoder<R: Read> {
    frames: StreamDeserializer<'static, IoRead<R>, Box<RawValue>>,
    failure: Option<String>,
}

impl<R: Read> WatchDecoder<R> {
    /// Binds a decoder to an open byte stream
    pub fn new(reader: R) -> Self {
        Self {
            frames: Deserializer::from_reader(reader).into_iter(),
            failure: None,
        }
    }

    /// Number of bytes consumed so far
    pub fn byte_offset(&self) -> usize {
        self.frames.byte_offset()
    }

    /// A framing failure has stopped the decoder
    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }
}

impl<R: Read> EventSource for WatchDecoder<R> {
    fn next_raw(&mut self) -> Option<serde_json::Result<RawEvent>> {
        if let Some(failure) = &self.failure {
            return Some(Err(serde_json::Error::custom(format!(
                "watch decoder stopped after previous failure: {failure}"
            ))));
        }

        match self.frames.next()? {
            Ok(frame) => Some(serde_json::from_str(frame.get())),
            Err(e) => {
                self.failure = Some(e.to_string());
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> std::fmt::Debug for WatchDecoder<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchDecoder")
            .field("byte_offset", &self.byte_offset())
            .field("failure", &self.failure)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;
    use std::io::Cursor;

    #[test]
    fn test_empty_input_ends_cleanly() {
        let mut decoder = WatchDecoder::new(Cursor::new(b"".to_vec()));
        assert!(decoder.next_raw().is_none());
    }

    #[test]
    fn test_trailing_whitespace_ends_cleanly() {
        let mut decoder = WatchDecoder::new(Cursor::new(
            b"{\"Type\":\"ADDED\",\"Object\":{}}\n\n  ".to_vec(),
        ));

        let first = decoder.next_raw().expect("one event").expect("valid event");
        assert_eq!(first.event_type, EventKind::Added);
        assert!(decoder.next_raw().is_none());
    }

    #[test]
    fn test_concatenated_envelopes() {
        let mut decoder = WatchDecoder::new(Cursor::new(
            br#"{"Type":"ADDED","Object":1}{"Type":"DELETED","Object":2}"#.to_vec(),
        ));

        let first = decoder.next_raw().unwrap().unwrap();
        let offset = decoder.byte_offset();
        let second = decoder.next_raw().unwrap().unwrap();

        assert_eq!(first.event_type, EventKind::Added);
        assert_eq!(first.object.get(), "1");
        assert_eq!(offset, r#"{"Type":"ADDED","Object":1}"#.len());
        assert_eq!(second.event_type, EventKind::Deleted);
        assert_eq!(second.object.get(), "2");
        assert!(decoder.next_raw().is_none());
    }

    #[test]
    fn test_partial_value_is_an_error() {
        let mut decoder = WatchDecoder::new(Cursor::new(br#"{"Type":"ADD"#.to_vec()));

        let err = decoder.next_raw().expect("partial value").unwrap_err();
        assert!(err.is_eof());
        assert!(decoder.is_failed());
    }

    #[test]
    fn test_wrong_shape_frame_does_not_stop_decoder() {
        let input = concat!(
            r#"{"Type":"BOOKMARK","Object":{}}"#,
            "\n[1,2]\n",
            r#"{"Type":"ADDED","Object":3}"#,
        );
        let mut decoder = WatchDecoder::new(Cursor::new(input.as_bytes().to_vec()));

        assert!(decoder.next_raw().expect("bookmark frame").is_err());
        assert!(decoder.next_raw().expect("array frame").is_err());
        assert!(!decoder.is_failed());

        let added = decoder.next_raw().expect("added frame").expect("valid event");
        assert_eq!(added.event_type, EventKind::Added);
        assert_eq!(added.object.get(), "3");
        assert!(decoder.next_raw().is_none());
    }

    #[test]
    fn test_syntax_error_never_reports_clean_end() {
        let mut decoder = WatchDecoder::new(Cursor::new(
            b"{oops}\n{\"Type\":\"ADDED\",\"Object\":{}}".to_vec(),
        ));

        let first = decoder.next_raw().expect("syntax error").unwrap_err();
        assert!(first.is_syntax());
        assert!(decoder.is_failed());

        for _ in 0..3 {
            let err = decoder.next_raw().expect("still failing").unwrap_err();
            assert!(err.to_string().contains("stopped after previous failure"));
        }
    }
}
