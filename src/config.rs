#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const DEFAULT_MAX_ELEMENT_COUNT: usize = 1024;
const DEFAULT_ARENA_CAPACITY: usize = 16 * 1024;
const DEFAULT_DESIGN_SIZE: f32 = 1000.0;
const DEFAULT_SORT_ORDER_RANGE: f32 = 128.0;

/// Engine-wide tunables, fixed for the lifetime of a [`UiContext`](crate::UiContext).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct UiConfig {
    /// Elements per frame. Further `begin` calls are dropped.
    pub max_elements: usize,
    /// Bytes of per-frame string storage.
    pub arena_capacity: usize,
    /// Side length of the virtual design square.
    pub design_size: f32,
    /// Sort orders are clamped to `-sort_order_range..=sort_order_range`.
    pub sort_order_range: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            max_elements: DEFAULT_MAX_ELEMENT_COUNT,
            arena_capacity: DEFAULT_ARENA_CAPACITY,
            design_size: DEFAULT_DESIGN_SIZE,
            sort_order_range: DEFAULT_SORT_ORDER_RANGE,
        }
    }
}

impl UiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn max_elements(&mut self, count: usize) -> &mut Self {
        self.max_elements = count;
        self
    }

    #[inline]
    pub fn arena_capacity(&mut self, bytes: usize) -> &mut Self {
        self.arena_capacity = bytes;
        self
    }

    #[inline]
    pub fn design_size(&mut self, size: f32) -> &mut Self {
        self.design_size = size;
        self
    }

    #[inline]
    pub fn sort_order_range(&mut self, range: f32) -> &mut Self {
        self.sort_order_range = range;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let mut config = UiConfig::new();
        config.max_elements(8).design_size(500.0);
        assert_eq!(config.max_elements, 8);
        assert_eq!(config.design_size, 500.0);
        assert_eq!(config.arena_capacity, DEFAULT_ARENA_CAPACITY);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_config_from_json() {
        let config: UiConfig = serde_json::from_str(r#"{ "max_elements": 64 }"#).unwrap();
        assert_eq!(config.max_elements, 64);
        assert_eq!(config.design_size, DEFAULT_DESIGN_SIZE);
    }
}
