/// Carry-over buffer turning arbitrary byte chunks into complete lines.
///
/// Splitting happens on raw bytes. `\n` never occurs inside a multi-byte
/// UTF-8 sequence, so a character cut by a chunk boundary simply waits in
/// the pending tail until its remaining bytes arrive. A line is complete
/// only once its terminator has been seen.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    /// Appends a chunk and drains every line it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);
        match self.pending.iter().rposition(|b| *b == b'\n') {
            None => Vec::new(),
            Some(last) => {
                let tail = self.pending.split_off(last + 1);
                let complete = std::mem::replace(&mut self.pending, tail);
                complete[..last]
                    .split(|b| *b == b'\n')
                    .map(|line| String::from_utf8_lossy(line).into_owned())
                    .collect()
            }
        }
    }
    /// Bytes of the unterminated last line.
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn holds_partial_line() {
        let mut buffer = LineBuffer::default();
        assert!(buffer.push(b"data: {\"a\"").is_empty());
        assert_eq!(buffer.push(b":1}\nda"), vec!["data: {\"a\":1}"]);
        assert_eq!(buffer.pending(), b"da");
    }
    #[test]
    fn emits_blank_lines() {
        let mut buffer = LineBuffer::default();
        assert_eq!(buffer.push(b"a\n\nb\n"), vec!["a", "", "b"]);
        assert!(buffer.pending().is_empty());
    }
    #[test]
    fn multibyte_split_survives() {
        let text = "reasoning: ♥ trump\n".as_bytes();
        let cut = text.iter().position(|b| *b == 0xE2).unwrap() + 1;
        let mut buffer = LineBuffer::default();
        assert!(buffer.push(&text[..cut]).is_empty());
        assert_eq!(buffer.push(&text[cut..]), vec!["reasoning: ♥ trump"]);
    }
    #[test]
    fn unterminated_tail_is_never_emitted() {
        let mut buffer = LineBuffer::default();
        assert!(buffer.push(b"data: {}").is_empty());
        assert!(buffer.push(b"").is_empty());
        assert_eq!(buffer.pending(), b"data: {}");
    }
}
