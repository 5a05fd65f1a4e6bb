//! Stable icon assignment and the announcements carousel.

/// Icons cycled through for training programs without an explicit one.
pub const SERVICE_ICONS: &[&str] = &[
    "plane",
    "helicopter",
    "compass",
    "radar",
    "headset",
    "graduation-cap",
    "map",
    "cloud",
];

/// Deterministic bucket for an identifier: the sum of its character codes
/// modulo `buckets`. Zero buckets always yields 0.
pub fn pick(id: &str, buckets: usize) -> usize {
    if buckets == 0 {
        return 0;
    }
    let sum = id
        .chars()
        .fold(0u64, |acc, c| acc.wrapping_add(c as u64));
    (sum % buckets as u64) as usize
}

pub fn service_icon(slug: &str) -> &'static str {
    SERVICE_ICONS[pick(slug, SERVICE_ICONS.len())]
}

/// Array-backed slider. `next` and `prev` wrap around.
#[derive(Debug, Clone, PartialEq)]
pub struct Carousel<T> {
    items: Vec<T>,
    index: usize,
}

impl<T> Default for Carousel<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: 0,
        }
    }
}

impl<T> Carousel<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn current(&self) -> Option<&T> {
        self.items.get(self.index)
    }

    pub fn next(&mut self) {
        if !self.items.is_empty() {
            self.index = (self.index + 1) % self.items.len();
        }
    }

    pub fn prev(&mut self) {
        if !self.items.is_empty() {
            self.index = (self.index + self.items.len() - 1) % self.items.len();
        }
    }

    /// Up to `n` items starting at the current one, wrapping, without repeats.
    pub fn visible(&self, n: usize) -> Vec<&T> {
        let len = self.items.len();
        (0..n.min(len))
            .map(|offset| &self.items[(self.index + offset) % len])
            .collect()
    }
}
