use vello_cpu::peniko;

use crate::render::dab::DabSpec;

/// Paint of one dab, expressed around the origin.
#[derive(Clone, Debug, PartialEq)]
pub enum DotPattern {
    Solid(peniko::Color),
    Radial(peniko::Gradient),
}

/// Parameters a cached pattern was built from. A slot whose key differs is rebuilt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PatternKey {
    internal_radius: u64,
    external_radius: u64,
    opacity: u64,
    build_up: bool,
}

impl PatternKey {
    pub fn new(spec: &DabSpec, build_up: bool) -> Self {
        Self {
            internal_radius: spec.internal_radius.to_bits(),
            external_radius: spec.external_radius.to_bits(),
            opacity: spec.opacity.to_bits(),
            build_up,
        }
    }
}

/// One radial pattern slot per quantized pressure level, kept by a paint stroke across
/// incremental renders.
///
/// A cache must not be shared by two renders at the same time; the caller serializes renders
/// of the same stroke.
#[derive(Clone, Debug)]
pub struct DotPatternCache {
    slots: Vec<Option<(PatternKey, DotPattern)>>,
}

impl DotPatternCache {
    pub fn new(levels: usize) -> Self {
        Self {
            slots: vec![None; levels.max(1)],
        }
    }

    pub fn levels(&self) -> usize {
        self.slots.len()
    }

    /// Number of populated slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn get(&self, level: usize) -> Option<&DotPattern> {
        self.slots.get(level)?.as_ref().map(|(_, p)| p)
    }

    pub fn get_or_insert_with(
        &mut self,
        level: usize,
        key: PatternKey,
        build: impl FnOnce() -> DotPattern,
    ) -> DotPattern {
        let Some(slot) = self.slots.get_mut(level) else {
            return build();
        };
        match slot {
            Some((k, pattern)) if *k == key => pattern.clone(),
            _ => {
                let pattern = build();
                *slot = Some((key, pattern.clone()));
                pattern
            }
        }
    }

    /// Drop every cached pattern.
    pub fn purge(&mut self) {
        let released = self.len();
        self.slots.iter_mut().for_each(|s| *s = None);
        tracing::debug!(released, "purged dot pattern cache");
    }
}

impl Default for DotPatternCache {
    fn default() -> Self {
        Self::new(crate::render::mask::DEFAULT_PRESSURE_LEVELS)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pattern_cache.rs"]
mod tests;
