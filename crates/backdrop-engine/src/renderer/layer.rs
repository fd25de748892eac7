/// Draw layer. Layers are drawn back-to-front: Nebula first, Meteors last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DrawLayer {
    Nebula,
    Stars,
    Debris,
    Asteroids,
    Satellites,
    Particles,
    Meteors,
}

impl DrawLayer {
    /// Total number of draw layers.
    pub const COUNT: usize = 7;

    /// Every layer in draw order.
    pub const ALL: [DrawLayer; Self::COUNT] = [
        DrawLayer::Nebula,
        DrawLayer::Stars,
        DrawLayer::Debris,
        DrawLayer::Asteroids,
        DrawLayer::Satellites,
        DrawLayer::Particles,
        DrawLayer::Meteors,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_back_to_front() {
        assert!(DrawLayer::Nebula < DrawLayer::Stars);
        assert!(DrawLayer::Stars < DrawLayer::Debris);
        assert!(DrawLayer::Debris < DrawLayer::Asteroids);
        assert!(DrawLayer::Asteroids < DrawLayer::Satellites);
        assert!(DrawLayer::Satellites < DrawLayer::Particles);
        assert!(DrawLayer::Particles < DrawLayer::Meteors);
    }

    #[test]
    fn all_is_sorted_and_complete() {
        assert_eq!(DrawLayer::ALL.len(), DrawLayer::COUNT);
        assert!(DrawLayer::ALL.windows(2).all(|w| w[0] < w[1]));
    }
}
