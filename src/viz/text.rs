//! Text measurement and wrapping for legend labels.
//!
//! Plotters cannot measure text without a registered font, so widths are
//! estimated from the character count.

const ELLIPSIS: char = '…';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextMetrics {
    pub font_px: u32,
}

impl TextMetrics {
    pub fn new(font_px: u32) -> Self {
        Self { font_px }
    }

    /// Estimated pixel width of `text`.
    pub fn width(&self, text: &str) -> u32 {
        // 0.6 em per character, rounded up
        (text.chars().count() as u32 * self.font_px * 3).div_ceil(5)
    }

    /// Widest line of `lines`, in pixels.
    pub fn max_width(&self, lines: &[String]) -> u32 {
        lines.iter().map(|l| self.width(l)).max().unwrap_or(0)
    }

    /// Cut `text` so it fits `max_px`, ending in an ellipsis when shortened.
    pub fn truncate(&self, text: &str, max_px: u32) -> String {
        if self.width(text) <= max_px {
            return text.to_string();
        }
        let mut kept: Vec<char> = text.chars().collect();
        while !kept.is_empty() {
            kept.pop();
            let candidate: String = kept.iter().chain(std::iter::once(&ELLIPSIS)).collect();
            if self.width(&candidate) <= max_px {
                return candidate;
            }
        }
        String::new()
    }

    /// Greedy word wrap into lines no wider than `max_px`; overlong words are hard-broken.
    pub fn wrap(&self, text: &str, max_px: u32) -> Vec<String> {
        let per_line = (max_px * 5 / (self.font_px * 3).max(1)) as usize;
        if per_line < 2 {
            return vec![self.truncate(text, max_px)];
        }
        let mut lines: Vec<String> = Vec::new();
        let mut cur = String::new();
        for word in text.split_whitespace() {
            let needed = if cur.is_empty() {
                word.chars().count()
            } else {
                cur.chars().count() + 1 + word.chars().count()
            };
            if needed <= per_line {
                if !cur.is_empty() {
                    cur.push(' ');
                }
                cur.push_str(word);
                continue;
            }
            if !cur.is_empty() {
                lines.push(std::mem::take(&mut cur));
            }
            let chars: Vec<char> = word.chars().collect();
            let mut chunks = chars.chunks(per_line).peekable();
            while let Some(chunk) = chunks.next() {
                let piece: String = chunk.iter().collect();
                if chunks.peek().is_some() {
                    lines.push(piece);
                } else {
                    cur = piece;
                }
            }
        }
        if !cur.is_empty() || lines.is_empty() {
            lines.push(cur);
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_on_words_then_characters() {
        let m = TextMetrics::new(10); // 6px per char
        assert_eq!(m.wrap("Blue pill", 200), vec!["Blue pill"]);
        assert_eq!(m.wrap("Blue pill", 30), vec!["Blue", "pill"]);
        assert_eq!(m.wrap("abcdefgh", 24), vec!["abcd", "efgh"]);
    }

    #[test]
    fn truncate_adds_ellipsis() {
        let m = TextMetrics::new(10);
        assert_eq!(m.truncate("short", 100), "short");
        assert_eq!(m.truncate("abcdefgh", 30), "abcd…");
    }
}
