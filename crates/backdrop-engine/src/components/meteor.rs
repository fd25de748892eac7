use glam::Vec2;

/// A shooting star. Lives until its opacity decays to zero or it leaves the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Meteor {
    /// Head position in logical pixels.
    pub pos: Vec2,
    /// Velocity in logical pixels per pass.
    pub vel: Vec2,
    /// Trail length in logical pixels, drawn opposite to `vel`.
    pub trail_len: f32,
    /// Current opacity in [0, 1], derived from `age`.
    pub opacity: f32,
    /// Opacity lost per pass.
    pub decay: f32,
    /// Passes lived so far.
    pub age: u32,
}

impl Meteor {
    pub fn new(pos: Vec2, vel: Vec2, trail_len: f32, decay: f32) -> Self {
        Self {
            pos,
            vel,
            trail_len,
            opacity: 1.0,
            decay,
            age: 0,
        }
    }

    /// Age by one pass. Returns false once the meteor has fully faded.
    /// A decay that divides 1.0 fades out on exactly pass `1 / decay`.
    pub fn age_one_pass(&mut self) -> bool {
        self.age = self.age.saturating_add(1);
        let faded = self.age as f32 * self.decay;
        self.opacity = (1.0 - faded).max(0.0);
        faded < 1.0 - f32::EPSILON
    }

    /// Tail end of the trail.
    pub fn tail(&self) -> Vec2 {
        self.pos - self.vel.normalize_or_zero() * self.trail_len
    }

    /// Whether the head is within the surface grown by `margin` on every side.
    pub fn within(&self, width: f32, height: f32, margin: f32) -> bool {
        self.pos.x >= -margin
            && self.pos.x <= width + margin
            && self.pos.y >= -margin
            && self.pos.y <= height + margin
    }
}
