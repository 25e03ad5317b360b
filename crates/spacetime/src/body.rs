use std::collections::VecDeque;

use nalgebra::{Point3, Vector3};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

/// Bounded history of past positions, oldest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trail {
    points: VecDeque<Point3<f64>>,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a position, then evict from the front until `len <= max_len`
    ///
    /// # Examples
    ///
    /// ```
    /// use spacetime::body::Trail;
    /// use nalgebra::Point3;
    ///
    /// let mut trail = Trail::new();
    /// for i in 0..5 {
    ///     trail.push(Point3::new(i as f64, 0.0, 0.0), 3);
    /// }
    ///
    /// assert_eq!(trail.len(), 3);
    /// assert_eq!(trail.iter().next().unwrap().x, 2.0);
    /// ```
    pub fn push(&mut self, point: Point3<f64>, max_len: usize) {
        self.points.push_back(point);
        while self.points.len() > max_len {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn latest(&self) -> Option<&Point3<f64>> {
        self.points.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point3<f64>> {
        self.points.iter()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

/// A massive sphere taking part in the simulation
///
/// `y` is the fabric-normal axis; bodies move in the `x`/`z` plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub id: BodyId,
    pub name: String,
    pub position: Point3<f64>,
    pub velocity: Vector3<f64>,
    pub mass: f64,   // strictly positive
    pub radius: f64, // strictly positive
    /// Net force from the most recent accumulation; overwritten every tick
    pub forces: Vector3<f64>,
    pub trail: Trail,
    pub color: String,
    pub has_rings: bool,
}

impl Body {
    /// Creates an unnamed body with zero forces and an empty trail
    pub fn new(
        id: BodyId,
        mass: f64,
        radius: f64,
        position: Point3<f64>,
        velocity: Vector3<f64>,
    ) -> Self {
        Self {
            id,
            name: String::new(),
            position,
            velocity,
            mass,
            radius,
            forces: Vector3::zeros(),
            trail: Trail::new(),
            color: String::from("#ffffff"),
            has_rings: false,
        }
    }

    pub fn momentum(&self) -> Vector3<f64> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (other.position - self.position).magnitude()
    }

    pub fn distance_from_origin(&self) -> f64 {
        self.position.coords.magnitude()
    }

    /// Angular momentum about the origin, `r × (m v)`
    pub fn angular_momentum(&self) -> Vector3<f64> {
        self.position.coords.cross(&self.momentum())
    }

    pub fn force_magnitude(&self) -> f64 {
        self.forces.magnitude()
    }

    /// Radius cubed; proportional to volume for equal-density spheres
    pub fn volume_scale(&self) -> f64 {
        self.radius.powi(3)
    }
}

/// Mass given to a body placed by holding for `hold_seconds`
pub fn mass_for_hold(hold_seconds: f64) -> f64 {
    (hold_seconds * 3.0 + 1.0).clamp(0.5, 20.0)
}

/// Display and collision radius for a freshly placed body of mass `mass`
pub fn radius_for_mass(mass: f64) -> f64 {
    (mass.cbrt() * 0.3).clamp(0.1, 2.0)
}

/// Launch velocity for a placement drag; the vertical component is dropped
pub fn launch_velocity(drag: Vector3<f64>) -> Vector3<f64> {
    Vector3::new(drag.x * 0.5, 0.0, drag.z * 0.5)
}

/// Everything an external creator supplies for a new body
///
/// The controller assigns the id; forces start at zero and the trail empty.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyTemplate {
    pub name: String,
    pub position: Point3<f64>,
    pub velocity: Vector3<f64>,
    pub mass: f64,
    pub radius: f64,
    pub color: String,
    pub has_rings: bool,
}

impl BodyTemplate {
    pub fn new(name: impl Into<String>, mass: f64, radius: f64, position: [f64; 3]) -> Self {
        Self {
            name: name.into(),
            position: Point3::from(position),
            velocity: Vector3::zeros(),
            mass,
            radius,
            color: String::from("#ffffff"),
            has_rings: false,
        }
    }

    pub fn with_velocity(mut self, velocity: [f64; 3]) -> Self {
        self.velocity = Vector3::from(velocity);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_rings(mut self, has_rings: bool) -> Self {
        self.has_rings = has_rings;
        self
    }

    /// Template for a body placed with a press-drag-release gesture
    ///
    /// The body sits on the plane (`y = 0`) at `anchor`; holding longer makes
    /// it heavier, dragging gives it an initial velocity.
    ///
    /// # Examples
    ///
    /// ```
    /// use spacetime::body::BodyTemplate;
    /// use nalgebra::{Point3, Vector3};
    /// use rand::SeedableRng;
    /// use rand_chacha::ChaChaRng;
    ///
    /// let mut rng = ChaChaRng::seed_from_u64(7);
    /// let template = BodyTemplate::from_placement(
    ///     Point3::new(1.0, 3.0, 2.0),
    ///     Vector3::new(2.0, 5.0, -4.0),
    ///     1.0,
    ///     "Planet 0001",
    ///     &mut rng,
    /// );
    ///
    /// assert_eq!(template.mass, 4.0);
    /// assert_eq!(template.position, Point3::new(1.0, 0.0, 2.0));
    /// assert_eq!(template.velocity, Vector3::new(1.0, 0.0, -2.0));
    /// ```
    pub fn from_placement<R: Rng>(
        anchor: Point3<f64>,
        drag: Vector3<f64>,
        hold_seconds: f64,
        name: impl Into<String>,
        rng: &mut R,
    ) -> Self {
        let mass = mass_for_hold(hold_seconds);
        let hue: f64 = rng.random::<f64>() * 360.0;

        Self {
            name: name.into(),
            position: Point3::new(anchor.x, 0.0, anchor.z),
            velocity: launch_velocity(drag),
            mass,
            radius: radius_for_mass(mass),
            color: format!("hsl({:.0}, 70%, 60%)", hue),
            has_rings: rng.random::<f64>() > 0.9,
        }
    }

    pub fn into_body(self, id: BodyId) -> Body {
        Body {
            id,
            name: self.name,
            position: self.position,
            velocity: self.velocity,
            mass: self.mass,
            radius: self.radius,
            forces: Vector3::zeros(),
            trail: Trail::new(),
            color: self.color,
            has_rings: self.has_rings,
        }
    }
}

/// Manual edit of an existing body; `None` fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BodyUpdate {
    pub name: Option<String>,
    pub position: Option<Point3<f64>>,
    pub velocity: Option<Vector3<f64>>,
    pub mass: Option<f64>,
    pub radius: Option<f64>,
    pub color: Option<String>,
    pub has_rings: Option<bool>,
}

impl BodyUpdate {
    pub fn apply_to(self, body: &mut Body) {
        if let Some(name) = self.name {
            body.name = name;
        }
        if let Some(position) = self.position {
            body.position = position;
        }
        if let Some(velocity) = self.velocity {
            body.velocity = velocity;
        }
        if let Some(mass) = self.mass {
            body.mass = mass;
        }
        if let Some(radius) = self.radius {
            body.radius = radius;
        }
        if let Some(color) = self.color {
            body.color = color;
        }
        if let Some(has_rings) = self.has_rings {
            body.has_rings = has_rings;
        }
    }
}
