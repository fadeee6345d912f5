use std::ops::Range;

/// The input text with all whitespace removed, along with a map from each byte of the stripped
/// text back to its offset in the original text.
#[derive(Debug, Clone)]
pub struct Source {
    /// The stripped text.
    text: String,

    /// `offsets[i]` is the offset in the original text of byte `i` of the stripped text.
    offsets: Vec<usize>,

    /// Length of the original text.
    original_len: usize,
}

impl Source {
    /// Strips the whitespace from the given text.
    pub fn new(original: &str) -> Self {
        let mut text = String::with_capacity(original.len());
        let mut offsets = Vec::with_capacity(original.len());
        for (offset, ch) in original.char_indices().filter(|(_, ch)| !ch.is_whitespace()) {
            text.push(ch);
            offsets.extend(offset..offset + ch.len_utf8());
        }

        Self { text, offsets, original_len: original.len() }
    }

    /// The stripped text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The stripped text as bytes.
    pub fn bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Length of the stripped text.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns true if nothing but whitespace was given.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Converts a range of the stripped text into the range of the original text it came from.
    /// An empty range becomes an empty span at the corresponding position.
    pub fn span(&self, range: Range<usize>) -> Range<usize> {
        if range.is_empty() {
            let at = self.offsets.get(range.start).copied().unwrap_or(self.original_len);
            return at..at;
        }
        self.offsets[range.start]..self.offsets[range.end - 1] + 1
    }
}
