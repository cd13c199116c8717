use std::time::Duration;

/// One content unit in the carousel's ordered sequence.
///
/// The index is not stored here; it is assigned by position every time
/// the slide set changes, so the registry stays contiguous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideDescriptor {
    pub title: String,
    /// Per-slide autoplay interval, overriding the configured play speed
    /// while this slide is current
    pub duration: Option<Duration>,
}

impl SlideDescriptor {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            duration: None,
        }
    }

    pub fn with_duration(title: impl Into<String>, duration: Duration) -> Self {
        Self {
            title: title.into(),
            duration: Some(duration),
        }
    }
}

/// An entry in the rendered slide buffer. Clones are synthetic entries
/// shifted by ± the slide count; they exist only in the buffer, never in
/// the authoritative registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSlide {
    /// Rendered index; clones sit outside `[0, count)`
    pub index: i64,
    /// Position of the backing slide in the registry
    pub source: usize,
    pub is_clone: bool,
}

/// Ordered, contiguously indexed slide set.
#[derive(Debug, Clone, Default)]
pub struct SlideRegistry {
    slides: Vec<SlideDescriptor>,
}

impl SlideRegistry {
    pub fn new(slides: Vec<SlideDescriptor>) -> Self {
        Self { slides }
    }

    pub fn set_slides(&mut self, slides: Vec<SlideDescriptor>) {
        self.slides = slides;
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SlideDescriptor> {
        self.slides.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SlideDescriptor> {
        self.slides.iter()
    }

    /// The buffer handed to the view layer: the real slides, wrapped in a
    /// full clone buffer on both sides when infinite scroll is enabled.
    pub fn render_buffer(&self, infinite_scroll: bool) -> Vec<RenderSlide> {
        let count = self.slides.len() as i64;
        let real = (0..self.slides.len()).map(|i| RenderSlide {
            index: i as i64,
            source: i,
            is_clone: false,
        });

        if !infinite_scroll {
            return real.collect();
        }

        let before = (0..self.slides.len()).map(|i| RenderSlide {
            index: i as i64 - count,
            source: i,
            is_clone: true,
        });
        let after = (0..self.slides.len()).map(|i| RenderSlide {
            index: i as i64 + count,
            source: i,
            is_clone: true,
        });

        before.chain(real).chain(after).collect()
    }
}
