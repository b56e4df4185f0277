//! Fragment splitting for oversized statements

use crate::config::FragmentStrategy;

/// Splits text into fragments no longer than a character limit
pub struct FragmentSplitter {
    strategy: FragmentStrategy,
    max_fragment_size: usize,
}

impl FragmentSplitter {
    /// Create a new fragment splitter
    pub fn new(strategy: FragmentStrategy, max_fragment_size: usize) -> Self {
        Self {
            strategy,
            max_fragment_size: max_fragment_size.max(1),
        }
    }

    /// Split the given text
    ///
    /// Text within the limit comes back as a single fragment. Fragments never
    /// overlap. An element over the limit is broken on line boundaries first
    /// and only cut mid-line when a single line is itself too long.
    pub fn split(&self, text: &str) -> Vec<String> {
        if text.chars().count() <= self.max_fragment_size {
            return vec![text.to_string()];
        }

        match self.strategy {
            FragmentStrategy::ByParagraph => self.pack(text.split("\n\n"), "\n\n"),
            FragmentStrategy::ByLine => self.pack(text.split('\n'), "\n"),
        }
    }

    /// Combine elements until they reach the size limit
    fn pack<'a>(&self, elements: impl Iterator<Item = &'a str>, separator: &str) -> Vec<String> {
        let sep_len = separator.chars().count();
        let mut fragments = Vec::new();
        let mut current = String::new();
        let mut current_len = 0;

        for element in elements {
            let element_len = element.chars().count();
            let joined_len = if current.is_empty() {
                element_len
            } else {
                current_len + sep_len + element_len
            };

            if joined_len <= self.max_fragment_size {
                if !current.is_empty() {
                    current.push_str(separator);
                }
                current.push_str(element);
                current_len = joined_len;
                continue;
            }

            if !current.is_empty() {
                fragments.push(std::mem::take(&mut current));
                current_len = 0;
            }

            if element_len > self.max_fragment_size {
                fragments.extend(self.split_oversized(element, separator));
            } else {
                current.push_str(element);
                current_len = element_len;
            }
        }

        if !current.is_empty() {
            fragments.push(current);
        }

        fragments
    }

    /// Break an element larger than the limit, keeping whole lines together
    fn split_oversized(&self, element: &str, separator: &str) -> Vec<String> {
        if separator != "\n" && element.contains('\n') {
            return self.pack(element.split('\n'), "\n");
        }
        self.cut(element)
    }

    /// Cut an element at character boundaries
    fn cut(&self, element: &str) -> Vec<String> {
        let chars: Vec<char> = element.chars().collect();
        chars
            .chunks(self.max_fragment_size)
            .map(|piece| piece.iter().collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_split_needed_for_small_text() {
        let splitter = FragmentSplitter::new(FragmentStrategy::ByParagraph, 100);
        let text = "Short text here.";
        assert_eq!(splitter.split(text), vec![text.to_string()]);
    }

    #[test]
    fn test_empty_text() {
        let splitter = FragmentSplitter::new(FragmentStrategy::ByLine, 100);
        assert_eq!(splitter.split(""), vec![String::new()]);
    }

    #[test]
    fn test_split_by_paragraph() {
        let splitter = FragmentSplitter::new(FragmentStrategy::ByParagraph, 50);
        let text = "First paragraph here.\n\nSecond paragraph here.\n\nThird paragraph here.";
        let fragments = splitter.split(text);

        assert_eq!(
            fragments,
            vec![
                "First paragraph here.\n\nSecond paragraph here.".to_string(),
                "Third paragraph here.".to_string(),
            ]
        );
    }

    #[test]
    fn test_split_by_line_respects_limit() {
        let splitter = FragmentSplitter::new(FragmentStrategy::ByLine, 12);
        let text = "line one\nline two\nline three\nfour";
        let fragments = splitter.split(text);

        assert_eq!(fragments, vec!["line one", "line two", "line three", "four"]);
        for fragment in &fragments {
            assert!(fragment.chars().count() <= 12);
        }
    }

    #[test]
    fn test_no_overlap_and_nothing_lost() {
        let splitter = FragmentSplitter::new(FragmentStrategy::ByLine, 20);
        let lines: Vec<String> = (0..30).map(|i| format!("row {}", i)).collect();
        let text = lines.join("\n");
        let fragments = splitter.split(&text);

        assert!(fragments.len() > 1);
        assert_eq!(fragments.join("\n"), text);
    }

    #[test]
    fn test_very_long_single_line() {
        let splitter = FragmentSplitter::new(FragmentStrategy::ByLine, 20);
        let text = "a".repeat(100);
        let fragments = splitter.split(&text);

        assert_eq!(fragments.len(), 5);
        assert!(fragments.iter().all(|f| f.len() == 20));
    }

    #[test]
    fn test_oversized_paragraph_splits_on_lines() {
        let splitter = FragmentSplitter::new(FragmentStrategy::ByParagraph, 20);
        let rows: Vec<String> = (0..10).map(|i| format!("row {}", i)).collect();
        let text = format!("intro\n\n{}", rows.join("\n"));
        let fragments = splitter.split(&text);

        assert_eq!(fragments[0], "intro");
        assert_eq!(fragments[1], "row 0\nrow 1\nrow 2");
        assert_eq!(fragments[1..].join("\n"), rows.join("\n"));
        for fragment in &fragments {
            assert!(fragment.chars().count() <= 20);
            assert!(fragment.split('\n').all(|line| line == "intro" || rows.contains(&line.to_string())));
        }
    }

    #[test]
    fn test_cut_respects_char_boundaries() {
        let splitter = FragmentSplitter::new(FragmentStrategy::ByLine, 3);
        let fragments = splitter.split("₹₹₹₹₹");
        assert_eq!(fragments, vec!["₹₹₹", "₹₹"]);
    }
}
