/// Bounds and step for the reading font size, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FontSizeLimits {
    pub min: u32,
    pub max: u32,
    /// Size used until the reader picks one
    pub default: u32,
    /// Increment applied by [`increase`](Self::increase)/[`decrease`](Self::decrease)
    pub step: u32,
}
impl FontSizeLimits {
    pub const fn new(min: u32, max: u32, default: u32, step: u32) -> Self {
        Self { min, max, default, step }
    }

    /// Force `size` into `[min, max]`.
    ///
    /// Unlike [`u32::clamp`], doesn't panic on inverted bounds (`min` wins).
    pub fn clamp(&self, size: u32) -> u32 {
        self.min.max(size.min(self.max))
    }

    pub fn increase(&self, size: u32) -> u32 {
        self.clamp(size.saturating_add(self.step))
    }

    pub fn decrease(&self, size: u32) -> u32 {
        self.clamp(size.saturating_sub(self.step))
    }

    pub fn can_increase(&self, size: u32) -> bool {
        size < self.max
    }

    pub fn can_decrease(&self, size: u32) -> bool {
        size > self.min
    }
}
impl Default for FontSizeLimits {
    fn default() -> Self {
        Self::new(12, 36, 16, 2)
    }
}
