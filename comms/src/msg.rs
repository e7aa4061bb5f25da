use std::{borrow::Cow, io};

use crate::{
    Deserialize, Serialize,
    specs::fit::{FitRequest, FitResponse},
};

type Header = u32;
const HEADER_SIZE: usize = size_of::<Header>();

const ERR: Header = 0;
const REQUEST: Header = 1;
const RESPONSE: Header = 2;

/// The application layer message for the entire system.
#[derive(Debug)]
pub enum Msg<'a> {
    Request(FitRequest),
    Response(FitResponse),
    Err(Cow<'a, str>),
}

impl Msg<'_> {
    /// Returns a short name for the kind of this message, for logging purposes.
    pub fn kind(&self) -> &'static str {
        match self {
            Msg::Request(_) => "request",
            Msg::Response(_) => "response",
            Msg::Err(_) => "err",
        }
    }

    fn buf_is_too_small<T>(size: usize) -> io::Result<T> {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("The given buffer is too small {size}, must at least be {HEADER_SIZE} bytes"),
        ))
    }

    fn invalid_kind<T>(kind: Header) -> io::Result<T> {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Received an invalid message kind {kind}"),
        ))
    }
}

// Truncated JSON bodies included, `UnexpectedEof` is reserved for the transport.
fn invalid_data<E>(err: E) -> io::Error
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    io::Error::new(io::ErrorKind::InvalidData, err)
}

impl<'a> Serialize<'a> for Msg<'a> {
    fn serialize(&'a self, buf: &mut Vec<u8>) -> io::Result<Option<&'a [u8]>> {
        match self {
            Msg::Err(e) => {
                buf.extend_from_slice(&ERR.to_be_bytes());
                Ok(Some(e.as_bytes()))
            }
            Msg::Request(req) => {
                buf.extend_from_slice(&REQUEST.to_be_bytes());
                serde_json::to_writer(buf, req)?;
                Ok(None)
            }
            Msg::Response(res) => {
                buf.extend_from_slice(&RESPONSE.to_be_bytes());
                serde_json::to_writer(buf, res)?;
                Ok(None)
            }
        }
    }
}

impl<'a> Deserialize<'a> for Msg<'a> {
    fn deserialize(buf: &'a [u8]) -> io::Result<Self> {
        let Some((kind_buf, rest)) = buf.split_first_chunk::<HEADER_SIZE>() else {
            return Self::buf_is_too_small(buf.len());
        };

        match Header::from_be_bytes(*kind_buf) {
            ERR => {
                let string = std::str::from_utf8(rest).map_err(invalid_data)?;

                Ok(Self::Err(Cow::Borrowed(string)))
            }
            REQUEST => serde_json::from_slice(rest)
                .map(Self::Request)
                .map_err(invalid_data),
            RESPONSE => serde_json::from_slice(rest)
                .map(Self::Response)
                .map_err(invalid_data),
            kind => Self::invalid_kind(kind),
        }
    }
}
