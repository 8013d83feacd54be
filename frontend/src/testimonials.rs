#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTransform {
    pub scale: f64,
    pub z_index: i32,
}

impl CardTransform {
    pub const HIGHLIGHTED: CardTransform = CardTransform { scale: 1.05, z_index: 10 };
    pub const NORMAL: CardTransform = CardTransform { scale: 1.0, z_index: 1 };

    /// Transform of card `index` while `highlighted` is the current card.
    pub fn for_card(index: usize, highlighted: Option<usize>) -> CardTransform {
        if Some(index) == highlighted {
            CardTransform::HIGHLIGHTED
        } else {
            CardTransform::NORMAL
        }
    }

    pub fn style(&self) -> String {
        format!("transform: scale({}); z-index: {};", self.scale, self.z_index)
    }
}

/// Round-robin highlight over the testimonial cards. The first card is
/// highlighted before the first rotation.
#[derive(Debug, Clone)]
pub struct TestimonialRotator {
    len: usize,
    current: usize,
}

impl TestimonialRotator {
    pub fn new(len: usize) -> Self {
        Self { len, current: 0 }
    }

    pub fn highlighted(&self) -> Option<usize> {
        (self.len > 0).then_some(self.current)
    }

    /// Moves the highlight to the next card, wrapping around.
    pub fn rotate(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        self.current = (self.current + 1) % self.len;
        Some(self.current)
    }
}
