use crate::components::asteroid::Asteroid;
use crate::components::meteor::Meteor;
use crate::components::nebula::Nebula;
use crate::components::point::PointObject;
use crate::components::satellite::Satellite;

/// Every simulated object the backdrop owns, one flat Vec per kind.
/// Field order is draw order, back to front.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Populations {
    pub nebula: Option<Nebula>,
    pub stars: Vec<PointObject>,
    pub debris: Vec<PointObject>,
    pub asteroids: Vec<Asteroid>,
    pub satellites: Vec<Satellite>,
    pub particles: Vec<PointObject>,
    pub meteors: Vec<Meteor>,
}

/// Per-kind object counts, for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopulationCounts {
    pub stars: usize,
    pub debris: usize,
    pub asteroids: usize,
    pub satellites: usize,
    pub particles: usize,
    pub meteors: usize,
}

impl Populations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counts(&self) -> PopulationCounts {
        PopulationCounts {
            stars: self.stars.len(),
            debris: self.debris.len(),
            asteroids: self.asteroids.len(),
            satellites: self.satellites.len(),
            particles: self.particles.len(),
            meteors: self.meteors.len(),
        }
    }

    /// Total object count, the nebula included.
    pub fn len(&self) -> usize {
        let c = self.counts();
        usize::from(self.nebula.is_some())
            + c.stars
            + c.debris
            + c.asteroids
            + c.satellites
            + c.particles
            + c.meteors
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
