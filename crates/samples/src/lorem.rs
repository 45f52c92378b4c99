//! Lorem-ipsum text generator.
//!
//! Deterministic for a given seed, so two runs benchmark the same bytes.

/// Word pool sentences are drawn from.
const WORDS: &[&str] = &[
    "ad", "adipisicing", "aliqua", "aliquip", "amet", "anim", "aute", "cillum", "commodo",
    "consectetur", "consequat", "culpa", "cupidatat", "deserunt", "do", "dolor", "dolore",
    "duis", "ea", "eiusmod", "elit", "enim", "esse", "est", "et", "eu", "ex", "excepteur",
    "exercitation", "fugiat", "id", "in", "incididunt", "ipsum", "irure", "labore", "laboris",
    "laborum", "lorem", "magna", "minim", "mollit", "nisi", "non", "nostrud", "nulla",
    "occaecat", "officia", "pariatur", "proident", "qui", "quis", "reprehenderit", "sint",
    "sit", "sunt", "tempor", "ullamco", "ut", "velit", "veniam", "voluptate",
];

/// Shortest sentence, in words
pub const MIN_WORDS_PER_SENTENCE: usize = 5;

/// Longest sentence, in words
pub const MAX_WORDS_PER_SENTENCE: usize = 15;

/// Seeded lorem-ipsum generator.
#[derive(Debug, Clone)]
pub struct LoremGenerator {
    state: u64,
}

impl LoremGenerator {
    /// Create a generator; a zero seed is remapped since xorshift would stall on it.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed };
        Self { state }
    }

    /// xorshift64*
    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Uniform value in `0..range`
    #[allow(clippy::cast_possible_truncation)]
    fn below(&mut self, range: usize) -> usize {
        ((u128::from(self.next_u64()) * range as u128) >> 64) as usize
    }

    /// One capitalized sentence terminated by a period.
    pub fn sentence(&mut self) -> String {
        let span = MAX_WORDS_PER_SENTENCE - MIN_WORDS_PER_SENTENCE + 1;
        let words = MIN_WORDS_PER_SENTENCE + self.below(span);

        let mut sentence = String::with_capacity(words * 8);
        for i in 0..words {
            let word = WORDS[self.below(WORDS.len())];
            if i == 0 {
                let mut chars = word.chars();
                if let Some(first) = chars.next() {
                    sentence.extend(first.to_uppercase());
                    sentence.push_str(chars.as_str());
                }
            } else {
                sentence.push(' ');
                sentence.push_str(word);
            }
        }
        sentence.push('.');
        sentence
    }

    /// `count` sentences separated by single spaces.
    pub fn sentences(&mut self, count: usize) -> String {
        let mut text = String::with_capacity(count * 64);
        for i in 0..count {
            if i > 0 {
                text.push(' ');
            }
            text.push_str(&self.sentence());
        }
        text
    }
}

/// Generate `count` sentences with the given seed.
#[must_use]
pub fn generate(count: usize, seed: u64) -> String {
    LoremGenerator::new(seed).sentences(count)
}
