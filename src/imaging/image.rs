use crate::foundation::core::RectI;
use crate::foundation::error::{RotoError, RotoResult};

/// Sample storage type of an [`Image`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BitDepth {
    Byte,
    Short,
    Float,
}

impl BitDepth {
    /// Value that represents full intensity.
    pub fn max_value(self) -> f32 {
        match self {
            Self::Byte => 255.0,
            Self::Short => 65535.0,
            Self::Float => 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ImageData {
    Byte(Vec<u8>),
    Short(Vec<u16>),
    Float(Vec<f32>),
}

impl ImageData {
    fn zeroed(depth: BitDepth, len: usize) -> Self {
        match depth {
            BitDepth::Byte => Self::Byte(vec![0; len]),
            BitDepth::Short => Self::Short(vec![0; len]),
            BitDepth::Float => Self::Float(vec![0.0; len]),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Byte(v) => v.len(),
            Self::Short(v) => v.len(),
            Self::Float(v) => v.len(),
        }
    }
}

/// Interleaved, row-major image covering `bounds` in canvas pixel space.
///
/// Samples are raw values in `[0, depth.max_value()]` (float images are not clamped).
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    bounds: RectI,
    components: usize,
    data: ImageData,
}

impl Image {
    pub fn new(bounds: RectI, components: usize, depth: BitDepth) -> RotoResult<Self> {
        if !(1..=4).contains(&components) {
            return Err(RotoError::validation(format!(
                "image component count must be 1..=4, got {components}"
            )));
        }
        let len = (bounds.width() as usize)
            .checked_mul(bounds.height() as usize)
            .and_then(|px| px.checked_mul(components))
            .ok_or_else(|| RotoError::validation("image size overflows usize"))?;
        Ok(Self {
            bounds,
            components,
            data: ImageData::zeroed(depth, len),
        })
    }

    /// Wrap existing samples; `data` must hold exactly `width * height * components` values.
    pub fn from_data(bounds: RectI, components: usize, data: ImageData) -> RotoResult<Self> {
        let mut img = Self::new(bounds, components, depth_of(&data))?;
        if data.len() != img.data.len() {
            return Err(RotoError::validation(format!(
                "image data has {} samples, expected {}",
                data.len(),
                img.data.len()
            )));
        }
        img.data = data;
        Ok(img)
    }

    pub fn bounds(&self) -> RectI {
        self.bounds
    }

    pub fn components(&self) -> usize {
        self.components
    }

    pub fn depth(&self) -> BitDepth {
        depth_of(&self.data)
    }

    pub fn data(&self) -> &ImageData {
        &self.data
    }

    fn index(&self, x: i32, y: i32, c: usize) -> Option<usize> {
        if !self.bounds.contains_point(x, y) || c >= self.components {
            return None;
        }
        let col = (x - self.bounds.x1) as usize;
        let row = (y - self.bounds.y1) as usize;
        Some((row * self.bounds.width() as usize + col) * self.components + c)
    }

    /// Raw sample at canvas pixel `(x, y)`, channel `c`; `None` outside the bounds.
    pub fn get(&self, x: i32, y: i32, c: usize) -> Option<f32> {
        let i = self.index(x, y, c)?;
        Some(match &self.data {
            ImageData::Byte(v) => f32::from(v[i]),
            ImageData::Short(v) => f32::from(v[i]),
            ImageData::Float(v) => v[i],
        })
    }

    /// Store a raw sample; integer depths round and clamp. Returns `false` outside the bounds.
    pub fn set(&mut self, x: i32, y: i32, c: usize, value: f32) -> bool {
        let Some(i) = self.index(x, y, c) else {
            return false;
        };
        match &mut self.data {
            ImageData::Byte(v) => v[i] = value.round().clamp(0.0, 255.0) as u8,
            ImageData::Short(v) => v[i] = value.round().clamp(0.0, 65535.0) as u16,
            ImageData::Float(v) => v[i] = value,
        }
        true
    }

    /// Copy every sample of `src` that falls inside `rect` and both bounds.
    pub fn copy_region_from(&mut self, src: &Image, rect: RectI) {
        let Some(r) = rect
            .intersect(self.bounds)
            .and_then(|r| r.intersect(src.bounds))
        else {
            return;
        };
        let comps = self.components.min(src.components);
        for y in r.y1..r.y2 {
            for x in r.x1..r.x2 {
                for c in 0..comps {
                    if let Some(v) = src.get(x, y, c) {
                        self.set(x, y, c, v);
                    }
                }
            }
        }
    }

    pub fn has_nan(&self) -> bool {
        match &self.data {
            ImageData::Float(v) => v.iter().any(|s| s.is_nan()),
            _ => false,
        }
    }
}

fn depth_of(data: &ImageData) -> BitDepth {
    match data {
        ImageData::Byte(_) => BitDepth::Byte,
        ImageData::Short(_) => BitDepth::Short,
        ImageData::Float(_) => BitDepth::Float,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/imaging/image.rs"]
mod tests;
