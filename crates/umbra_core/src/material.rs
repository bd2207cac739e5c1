//! Phong materials with an energy split between absorption, reflection and
//! transmission.

use umbra_math::Vec3;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Tolerance for the advisory transport-coefficient check.
const TRANSPORT_TOLERANCE: f32 = 1e-4;

/// How a surface interacts with light.
///
/// `absorptive + reflective + transparency` is expected to be 1. This is a
/// modeling convention: [`Material::with_transport`] warns when it is broken,
/// but the tracer renders whatever it is given.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    /// Phong specular exponent
    pub shininess: f32,
    /// Share of the locally shaded color
    pub absorptive: f32,
    /// Share of the mirror-reflected color
    pub reflective: f32,
    /// Share of the refracted color
    pub transparency: f32,
    /// Only meaningful when `transparency > 0`; expected to be >= 1
    pub refractive_index: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self::new(Color::splat(0.5), 1.0, 10.0)
    }
}

impl Material {
    /// Build a material from a base color scaled by `brightness`.
    ///
    /// Ambient is a grey of `brightness / 4`, specular is white, and the
    /// transport split defaults to 75% absorptive / 25% reflective.
    pub fn new(color: Color, brightness: f32, shininess: f32) -> Self {
        Self {
            ambient: Color::splat(brightness / 4.0),
            diffuse: color * brightness,
            specular: Color::ONE,
            shininess,
            absorptive: 0.75,
            reflective: 0.25,
            transparency: 0.0,
            refractive_index: 1.0,
        }
    }

    /// Override the transport coefficients and refractive index.
    pub fn with_transport(
        mut self,
        absorptive: f32,
        reflective: f32,
        transparency: f32,
        refractive_index: f32,
    ) -> Self {
        self.absorptive = absorptive;
        self.reflective = reflective;
        self.transparency = transparency;
        self.refractive_index = refractive_index;

        if !self.is_energy_conserving() {
            log::warn!(
                "Material transport coefficients sum to {} (absorptive {}, reflective {}, transparency {}), expected 1",
                self.transport_sum(),
                absorptive,
                reflective,
                transparency
            );
        }
        self
    }

    /// Sum of the three transport coefficients.
    pub fn transport_sum(&self) -> f32 {
        self.absorptive + self.reflective + self.transparency
    }

    /// True if the transport coefficients sum to 1.
    pub fn is_energy_conserving(&self) -> bool {
        (self.transport_sum() - 1.0).abs() <= TRANSPORT_TOLERANCE
    }

    /// True if the surface neither reflects nor transmits, so no secondary
    /// rays are spawned from it.
    pub fn is_opaque(&self) -> bool {
        self.reflective == 0.0 && self.transparency == 0.0
    }
}
