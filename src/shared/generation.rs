//! Generation tags for superseded requests.
//!
//! A session that issues several requests for the same slot (e.g. paging a
//! row quickly) tags each one with a fresh [`Generation`]. When a response
//! arrives, only the one carrying the latest tag is applied.

/// Tag attached to a single in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Issues generations for one request slot. Owned by a single task.
#[derive(Debug, Default)]
pub struct RequestGenerations {
    latest: u64,
}

impl RequestGenerations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supersedes every previously issued generation.
    pub fn next(&mut self) -> Generation {
        self.latest += 1;
        Generation(self.latest)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        generation.0 == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_is_current() {
        let mut gens = RequestGenerations::new();
        let first = gens.next();
        assert!(gens.is_current(first));

        let second = gens.next();
        assert!(!gens.is_current(first));
        assert!(gens.is_current(second));
    }

    #[test]
    fn late_response_from_older_request_is_stale() {
        let mut gens = RequestGenerations::new();
        let page_two = gens.next();
        let page_three = gens.next();
        // page three resolves first, then page two
        assert!(gens.is_current(page_three));
        assert!(!gens.is_current(page_two));
        assert!(page_two < page_three);
    }
}
