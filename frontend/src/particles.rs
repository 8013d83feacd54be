#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleColor {
    Cyan,
    Pink,
}

impl ParticleColor {
    pub fn hex(self) -> &'static str {
        match self {
            ParticleColor::Cyan => "#00f0ff",
            ParticleColor::Pink => "#ff2a6d",
        }
    }
}

/// Randomized style of one decorative particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleStyle {
    pub left_pct: f64,
    pub top_pct: f64,
    pub delay_s: f64,
    pub duration_s: f64,
    pub opacity: f64,
    pub color: ParticleColor,
}

impl ParticleStyle {
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        Self {
            left_pct: rng.f64() * 100.0,
            top_pct: rng.f64() * 100.0,
            delay_s: rng.f64() * 6.0,
            duration_s: rng.f64() * 4.0 + 4.0,
            opacity: rng.f64() * 0.5 + 0.3,
            color: if rng.f64() > 0.5 {
                ParticleColor::Cyan
            } else {
                ParticleColor::Pink
            },
        }
    }

    pub fn style_attr(&self) -> String {
        format!(
            "left: {:.2}%; top: {:.2}%; animation-delay: {:.2}s; animation-duration: {:.2}s; opacity: {:.2}; background: {};",
            self.left_pct,
            self.top_pct,
            self.delay_s,
            self.duration_s,
            self.opacity,
            self.color.hex()
        )
    }
}

pub fn generate_particles(rng: &mut fastrand::Rng, count: usize) -> Vec<ParticleStyle> {
    (0..count).map(|_| ParticleStyle::random(rng)).collect()
}
