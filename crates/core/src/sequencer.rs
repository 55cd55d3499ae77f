//! Sequencer module - turns an external list of size requests into pieces
//!
//! Each request pairs a piece size with an opaque token (for example the run
//! that produced the size). Draws walk the list in order and wrap around; the
//! cursor is not touched by game restarts. With no requests every draw is a
//! uniformly random catalog piece and carries no token.

use crate::pieces::{self, Piece};
use crate::rng::SimpleRng;

/// One externally supplied piece-size request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeRequest<T> {
    pub size: u32,
    pub token: T,
}

impl<T> SizeRequest<T> {
    pub fn new(size: u32, token: T) -> Self {
        Self { size, token }
    }
}

/// Result of one draw
#[derive(Debug, Clone, PartialEq)]
pub struct Drawn<T> {
    pub piece: Piece,
    /// `None` in random mode
    pub token: Option<T>,
}

/// Cycling piece source
#[derive(Debug, Clone)]
pub struct Sequencer<T> {
    requests: Vec<SizeRequest<T>>,
    cursor: usize,
    rng: SimpleRng,
}

impl<T: Clone> Sequencer<T> {
    /// Random-mode sequencer
    pub fn new(seed: u32) -> Self {
        Self::with_requests(Vec::new(), seed)
    }

    pub fn with_requests(requests: Vec<SizeRequest<T>>, seed: u32) -> Self {
        Self {
            requests,
            cursor: 0,
            rng: SimpleRng::new(seed),
        }
    }

    /// Swap in a new request list and rewind to its start.
    pub fn replace(&mut self, requests: Vec<SizeRequest<T>>) {
        log::debug!(
            "sequencer: replaced {} requests with {}",
            self.requests.len(),
            requests.len()
        );
        self.requests = requests;
        self.cursor = 0;
    }

    /// True when draws come from the random catalog
    pub fn is_random(&self) -> bool {
        self.requests.is_empty()
    }

    /// Index of the request the next draw will use
    #[cfg(test)]
    fn cursor(&self) -> usize {
        self.cursor
    }

    /// Size the next draw will request, if not in random mode
    #[cfg(test)]
    fn peek_size(&self) -> Option<u32> {
        self.requests.get(self.cursor).map(|r| r.size)
    }

    /// Draw the next piece and advance.
    pub fn draw(&mut self) -> Drawn<T> {
        if self.requests.is_empty() {
            return Drawn {
                piece: pieces::random(&mut self.rng),
                token: None,
            };
        }

        let idx = self.cursor % self.requests.len();
        self.cursor = (idx + 1) % self.requests.len();
        let request = &self.requests[idx];
        Drawn {
            piece: pieces::by_size(request.size),
            token: Some(request.token.clone()),
        }
    }
}

impl<T: Clone> Default for Sequencer<T> {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Requests without tokens, for callers that only have sizes
pub fn untagged(sizes: impl IntoIterator<Item = u32>) -> Vec<SizeRequest<()>> {
    sizes.into_iter().map(|size| SizeRequest::new(size, ())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(pairs: &[(u32, &'static str)]) -> Vec<SizeRequest<&'static str>> {
        pairs.iter().map(|&(s, t)| SizeRequest::new(s, t)).collect()
    }

    #[test]
    fn test_cycles_in_order_with_tokens() {
        let mut seq = Sequencer::with_requests(tagged(&[(3, "a"), (7, "b"), (1, "c")]), 1);

        let drawn: Vec<_> = (0..5).map(|_| seq.draw()).collect();
        let sizes: Vec<u32> = drawn.iter().map(|d| d.piece.cell_count()).collect();
        let tokens: Vec<_> = drawn.iter().map(|d| d.token.unwrap()).collect();

        assert_eq!(sizes, vec![3, 7, 1, 3, 7]);
        assert_eq!(tokens, vec!["a", "b", "c", "a", "b"]);
    }

    #[test]
    fn test_empty_list_draws_random_without_token() {
        let mut seq: Sequencer<&str> = Sequencer::new(5);
        assert!(seq.is_random());
        for _ in 0..10 {
            let d = seq.draw();
            assert!(d.token.is_none());
            assert!(d.piece.cell_count() >= 1);
        }
    }

    #[test]
    fn test_replace_resets_cursor() {
        let mut seq = Sequencer::with_requests(tagged(&[(2, "a"), (4, "b")]), 1);
        seq.draw();
        assert_eq!(seq.cursor(), 1);

        seq.replace(tagged(&[(9, "z")]));
        assert_eq!(seq.cursor(), 0);
        assert_eq!(seq.peek_size(), Some(9));
        assert_eq!(seq.draw().token, Some("z"));
    }

    #[test]
    fn test_out_of_range_sizes_are_clamped() {
        let mut seq = Sequencer::with_requests(untagged([0, 99]), 1);
        assert_eq!(seq.draw().piece.cell_count(), 1);
        assert_eq!(seq.draw().piece.cell_count(), 42);
    }

    #[test]
    fn test_replace_with_empty_switches_to_random() {
        let mut seq = Sequencer::with_requests(untagged([5]), 1);
        seq.replace(Vec::new());
        assert!(seq.is_random());
        assert_eq!(seq.peek_size(), None);
        assert_eq!(seq.draw().token, None);
    }
}
