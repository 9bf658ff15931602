use crate::*;

/// Classification of one complete line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame<'a> {
    /// A `data: ` line; holds the payload after the prefix.
    Data(&'a str),
    /// Blank lines, comments, and other SSE fields.
    Ignored,
}

impl<'a> From<&'a str> for Frame<'a> {
    fn from(line: &'a str) -> Self {
        line.strip_prefix(FRAME_PREFIX)
            .map(Self::Data)
            .unwrap_or(Self::Ignored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn data_lines_yield_payload() {
        assert_eq!(Frame::from("data: {\"x\":1}"), Frame::Data("{\"x\":1}"));
    }
    #[test]
    fn everything_else_is_ignored() {
        for line in ["", "   ", "\t", ": keepalive", "event: message", "id: 4", "data:{}", " data: {}"] {
            assert_eq!(Frame::from(line), Frame::Ignored, "{:?}", line);
        }
    }
}
