//! Ready-made starting scenes

use std::f64::consts::PI;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::body::BodyTemplate;

const RING_PARTICLES: usize = 20;

/// A named starting configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// A heavy sun with two planets on roughly circular orbits
    SolarSystem,
    /// Two stars circling their common centre
    BinaryStar,
    /// A ringed planet surrounded by light particles
    PlanetaryRing,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::SolarSystem, Preset::BinaryStar, Preset::PlanetaryRing];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::SolarSystem => "solar-system",
            Preset::BinaryStar => "binary-star",
            Preset::PlanetaryRing => "planetary-ring",
        }
    }

    /// Look a preset up by its kebab-case name
    ///
    /// # Examples
    ///
    /// ```
    /// use spacetime::presets::Preset;
    ///
    /// assert_eq!(Preset::from_name("binary-star"), Some(Preset::BinaryStar));
    /// assert_eq!(Preset::from_name("galaxy"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Preset> {
        Preset::ALL.into_iter().find(|preset| preset.name() == name)
    }

    /// Bodies making up the scene, in insertion order
    ///
    /// Only `PlanetaryRing` draws from `rng` (one orbit radius per particle).
    pub fn templates<R: Rng>(&self, rng: &mut R) -> Vec<BodyTemplate> {
        match self {
            Preset::SolarSystem => vec![
                BodyTemplate::new("Sun", 20.0, 1.5, [0.0, 0.0, 0.0]).with_color("#FDB813"),
                BodyTemplate::new("Earth", 3.0, 0.4, [5.0, 0.0, 0.0])
                    .with_velocity([0.0, 0.0, 0.3])
                    .with_color("#6B93D6"),
                BodyTemplate::new("Mars", 2.0, 0.3, [8.0, 0.0, 0.0])
                    .with_velocity([0.0, 0.0, 0.25])
                    .with_color("#CD5C5C"),
            ],
            Preset::BinaryStar => vec![
                BodyTemplate::new("Star A", 15.0, 1.2, [-3.0, 0.0, 0.0])
                    .with_velocity([0.0, 0.0, 0.2])
                    .with_color("#FFD700"),
                BodyTemplate::new("Star B", 12.0, 1.0, [3.0, 0.0, 0.0])
                    .with_velocity([0.0, 0.0, -0.2])
                    .with_color("#FF6B35"),
            ],
            Preset::PlanetaryRing => {
                let mut templates = vec![
                    BodyTemplate::new("Central Planet", 15.0, 1.0, [0.0, 0.0, 0.0])
                        .with_color("#8A2BE2")
                        .with_rings(true),
                ];
                templates.extend((0..RING_PARTICLES).map(|i| ring_particle(i, rng)));
                templates
            }
        }
    }
}

fn ring_particle<R: Rng>(i: usize, rng: &mut R) -> BodyTemplate {
    let angle = i as f64 / RING_PARTICLES as f64 * PI * 2.0;
    let orbit = rng.random_range(3.0..5.0);
    let (sin, cos) = angle.sin_cos();

    BodyTemplate::new(
        format!("Ring Particle {}", i + 1),
        0.5,
        0.1,
        [cos * orbit, 0.0, sin * orbit],
    )
    .with_velocity([-sin * 0.15, 0.0, cos * 0.15])
    .with_color("#C0C0C0")
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
