//! Line Protocol Framing
//!
//! Every protocol token travels as one `\n`-terminated line. Lines are
//! handled as raw bytes; only text meant for humans is decoded.

use crate::error::{PowError, PowResult};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// Longest accepted line, including its terminator
pub const MAX_LINE_LEN: usize = 64 * 1024;

pub const QUOTE_PREFIX: &str = "Quote: ";
pub const CHALLENGE_PREFIX: &str = "Challenge: ";
pub const REJECTION_NOTICE: &str = "Invalid solution. Try again.";

/// Buffered line reader/writer over a byte stream
#[derive(Debug)]
pub struct LineStream<S> {
    inner: BufReader<S>,
}

impl<S> LineStream<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S) -> Self {
        Self {
            inner: BufReader::new(stream),
        }
    }

    /// Read one line as raw bytes, without its terminator.
    ///
    /// Returns `None` on EOF before any byte of a new line. A final line
    /// without a trailing `\n` is still returned. `\r\n` and `\n` both
    /// count toward [`MAX_LINE_LEN`].
    pub async fn read_line_bytes(&mut self) -> PowResult<Option<Vec<u8>>> {
        let mut buf = Vec::new();
        let limit = MAX_LINE_LEN as u64;
        let read = (&mut self.inner).take(limit).read_until(b'\n', &mut buf).await?;

        if read == 0 {
            return Ok(None);
        }

        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        } else if buf.len() >= MAX_LINE_LEN {
            return Err(PowError::LineTooLong {
                limit: MAX_LINE_LEN,
            });
        }

        Ok(Some(buf))
    }

    /// Read one line, replacing invalid UTF-8 sequences
    pub async fn read_line(&mut self) -> PowResult<Option<String>> {
        let line = self.read_line_bytes().await?;
        Ok(line.map(|buf| String::from_utf8_lossy(&buf).into_owned()))
    }

    /// Read one line, treating EOF as [`PowError::ConnectionClosed`]
    pub async fn expect_line(&mut self) -> PowResult<String> {
        self.read_line().await?.ok_or(PowError::ConnectionClosed)
    }

    /// Write `lines` as one message, each followed by `\n`, then flush
    pub async fn write_lines(&mut self, lines: &[&str]) -> PowResult<()> {
        let capacity = lines.iter().map(|l| l.len() + 1).sum();
        let mut message = String::with_capacity(capacity);
        for line in lines {
            message.push_str(line);
            message.push('\n');
        }

        let stream = self.inner.get_mut();
        stream.write_all(message.as_bytes()).await?;
        stream.flush().await?;
        Ok(())
    }

    /// Write one line of raw bytes followed by `\n`, then flush
    pub async fn write_line_bytes(&mut self, line: &[u8]) -> PowResult<()> {
        let mut message = Vec::with_capacity(line.len() + 1);
        message.extend_from_slice(line);
        message.push(b'\n');

        let stream = self.inner.get_mut();
        stream.write_all(&message).await?;
        stream.flush().await?;
        Ok(())
    }

    /// Close the write side of the stream
    pub async fn shutdown(&mut self) -> PowResult<()> {
        self.inner.get_mut().shutdown().await?;
        Ok(())
    }

    pub fn into_inner(self) -> S {
        self.inner.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tokio::io::duplex;

    #[tokio::test]
    async fn test_read_lines_strips_terminators() {
        let (mut peer, local) = duplex(1024);
        let mut stream = LineStream::new(local);

        peer.write_all(b"first\nsecond\r\n\nlast").await.unwrap();
        drop(peer);

        assert_eq!(stream.read_line().await.unwrap().as_deref(), Some("first"));
        assert_eq!(stream.read_line().await.unwrap().as_deref(), Some("second"));
        assert_eq!(stream.read_line().await.unwrap().as_deref(), Some(""));
        assert_eq!(stream.read_line().await.unwrap().as_deref(), Some("last"));
        assert_eq!(stream.read_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expect_line_on_eof() {
        let (peer, local) = duplex(64);
        drop(peer);
        let mut stream = LineStream::new(local);

        let err = stream.expect_line().await.unwrap_err();
        assert!(matches!(err, PowError::ConnectionClosed));
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[tokio::test]
    async fn test_overlong_line_rejected() {
        let (mut peer, local) = duplex(MAX_LINE_LEN * 2 + 16);
        let mut stream = LineStream::new(local);

        let long = vec![b'7'; MAX_LINE_LEN + 10];
        peer.write_all(&long).await.unwrap();
        peer.write_all(b"\n").await.unwrap();

        let err = stream.read_line().await.unwrap_err();
        assert!(matches!(err, PowError::LineTooLong { .. }));
    }

    #[tokio::test]
    async fn test_line_at_limit_accepted() {
        let (mut peer, local) = duplex(MAX_LINE_LEN * 2);
        let mut stream = LineStream::new(local);

        let mut line = vec![b'1'; MAX_LINE_LEN - 1];
        line.push(b'\n');
        peer.write_all(&line).await.unwrap();

        let read = stream.read_line().await.unwrap().unwrap();
        assert_eq!(read.len(), MAX_LINE_LEN - 1);
    }

    #[tokio::test]
    async fn test_limit_counts_terminator() {
        let (mut peer, local) = duplex(MAX_LINE_LEN * 4);
        let mut stream = LineStream::new(local);

        // fills the limit exactly with a CRLF terminator
        let mut crlf = vec![b'2'; MAX_LINE_LEN - 2];
        crlf.extend_from_slice(b"\r\n");
        peer.write_all(&crlf).await.unwrap();
        let read = stream.read_line_bytes().await.unwrap().unwrap();
        assert_eq!(read.len(), MAX_LINE_LEN - 2);

        // one byte over once the `\n` is counted
        let mut lf = vec![b'3'; MAX_LINE_LEN];
        lf.push(b'\n');
        peer.write_all(&lf).await.unwrap();
        let err = stream.read_line_bytes().await.unwrap_err();
        assert!(matches!(err, PowError::LineTooLong { limit } if limit == MAX_LINE_LEN));
    }

    #[tokio::test]
    async fn test_raw_line_keeps_invalid_utf8() {
        let (peer, local) = duplex(64);
        let mut stream = LineStream::new(local);
        let mut peer = LineStream::new(peer);

        peer.write_line_bytes(b"\xff17").await.unwrap();
        let line = stream.read_line_bytes().await.unwrap().unwrap();
        assert_eq!(line, b"\xff17");
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_lossy() {
        let (mut peer, local) = duplex(64);
        let mut stream = LineStream::new(local);

        peer.write_all(b"ab\xffcd\n").await.unwrap();
        let line = stream.read_line().await.unwrap().unwrap();
        assert_eq!(line, "ab\u{fffd}cd");
    }

    #[tokio::test]
    async fn test_write_lines() {
        let (peer, local) = duplex(1024);
        let mut stream = LineStream::new(local);
        let mut peer = LineStream::new(peer);

        stream.write_lines(&["abc", "10"]).await.unwrap();
        stream.shutdown().await.unwrap();

        assert_eq!(peer.expect_line().await.unwrap(), "abc");
        assert_eq!(peer.expect_line().await.unwrap(), "10");
        assert_eq!(peer.read_line().await.unwrap(), None);
    }
}
