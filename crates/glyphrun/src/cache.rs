use std::num::NonZeroUsize;
use std::sync::Arc;

use glyphrun_core::text::{ScaleContext, ShapeOptions, ShapeResult};
use lru::LruCache;

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
struct ShapeKey {
    text: String,
    font: String,
    size: u64,
    options: ShapeOptions,
    scale: ScaleContext,
}

/// A bounded cache of shape results, owned by the caller.
///
/// The key is everything a shape result depends on, so a hit can be measured
/// and drawn in place of shaping again.
#[derive(Debug)]
pub struct ShapeCache {
    entries: LruCache<ShapeKey, Arc<ShapeResult>>,
}

impl ShapeCache {
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new(capacity: usize) -> ShapeCache {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        ShapeCache {
            entries: LruCache::new(capacity),
        }
    }

    pub fn get_or_try_insert<E>(
        &mut self,
        font: &str,
        size: f64,
        text: &str,
        options: &ShapeOptions,
        scale: ScaleContext,
        shape: impl FnOnce() -> Result<ShapeResult, E>,
    ) -> Result<Arc<ShapeResult>, E> {
        let key = ShapeKey {
            text: text.to_owned(),
            font: font.to_owned(),
            size: size.to_bits(),
            options: options.clone(),
            scale,
        };

        if let Some(v) = self.entries.get(&key) {
            return Ok(Arc::clone(v));
        }

        log::trace!("Shape cache miss for {:?} in {:?} at {}pt", text, font, size);

        let result = Arc::new(shape()?);
        self.entries.put(key, Arc::clone(&result));
        Ok(result)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for ShapeCache {
    fn default() -> Self {
        ShapeCache::new(ShapeCache::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphrun_core::text::Direction;

    fn dummy() -> Result<ShapeResult, ()> {
        Ok(ShapeResult::new(
            Vec::new(),
            ScaleContext::default(),
            Direction::LeftToRight,
            0,
        ))
    }

    #[test]
    fn hits_skip_shaping() {
        let mut cache = ShapeCache::new(4);
        let options = ShapeOptions::new();
        let scale = ScaleContext::default();

        let a = cache
            .get_or_try_insert("serif", 12.0, "AV", &options, scale, dummy)
            .unwrap();
        let b = cache
            .get_or_try_insert("serif", 12.0, "AV", &options, scale, || -> Result<ShapeResult, ()> {
                panic!("should be cached")
            })
            .unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn any_key_change_misses() {
        let mut cache = ShapeCache::new(16);
        let options = ShapeOptions::new();
        let scale = ScaleContext::default();

        cache.get_or_try_insert("serif", 12.0, "AV", &options, scale, dummy).unwrap();
        cache.get_or_try_insert("serif", 12.5, "AV", &options, scale, dummy).unwrap();
        cache.get_or_try_insert("mono", 12.0, "AV", &options, scale, dummy).unwrap();
        cache.get_or_try_insert("serif", 12.0, "VA", &options, scale, dummy).unwrap();
        let no_kern = options.clone().with_feature(b"kern", false);
        cache.get_or_try_insert("serif", 12.0, "AV", &no_kern, scale, dummy).unwrap();
        cache
            .get_or_try_insert("serif", 12.0, "AV", &options, ScaleContext::new(100_000), dummy)
            .unwrap();

        assert_eq!(cache.len(), 6);
    }

    #[test]
    fn errors_are_not_cached() {
        let mut cache = ShapeCache::new(4);
        let options = ShapeOptions::new();
        let scale = ScaleContext::default();

        let result =
            cache.get_or_try_insert("serif", 12.0, "AV", &options, scale, || Err("no font"));
        assert_eq!(result.unwrap_err(), "no font");
        assert!(cache.is_empty());
    }

    #[test]
    fn capacity_is_bounded() {
        let mut cache = ShapeCache::new(2);
        let options = ShapeOptions::new();
        let scale = ScaleContext::default();

        for text in ["a", "b", "c"] {
            cache.get_or_try_insert("serif", 12.0, text, &options, scale, dummy).unwrap();
        }
        assert_eq!(cache.len(), 2);
    }
}
