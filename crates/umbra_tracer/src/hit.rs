//! Hit records produced by the intersection routines.

use umbra_math::{Interval, Vec2, Vec3};

/// Record of one ray-surface crossing, in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub point: Vec3,
    /// Outward surface normal (unit length)
    pub normal: Vec3,
    /// Texture coordinates
    pub uv: Vec2,
}

/// Up to two crossings of a ray through one solid object.
///
/// `enter` is the crossing with the smaller t. Either side may be missing, and
/// either may lie behind the ray origin; callers decide which is usable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectHit {
    pub enter: Option<HitRecord>,
    pub exit: Option<HitRecord>,
}

impl ObjectHit {
    /// The ray does not touch the object.
    pub const MISS: ObjectHit = ObjectHit {
        enter: None,
        exit: None,
    };

    pub fn new(enter: Option<HitRecord>, exit: Option<HitRecord>) -> Self {
        Self { enter, exit }
    }

    pub fn is_miss(&self) -> bool {
        self.enter.is_none() && self.exit.is_none()
    }

    /// The first crossing in front of the ray origin, and whether it is the
    /// entering one.
    ///
    /// A valid enter crossing wins; otherwise the exit crossing is used,
    /// which happens when the ray starts inside the object.
    pub fn first_forward(&self) -> Option<(HitRecord, bool)> {
        let forward = |record: &HitRecord| Interval::FORWARD.contains(record.t);

        match (self.enter, self.exit) {
            (Some(enter), _) if forward(&enter) => Some((enter, true)),
            (_, Some(exit)) if forward(&exit) => Some((exit, false)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(t: f32) -> HitRecord {
        HitRecord {
            t,
            point: Vec3::ZERO,
            normal: Vec3::Z,
            uv: Vec2::ZERO,
        }
    }

    #[test]
    fn test_miss() {
        assert!(ObjectHit::MISS.is_miss());
        assert!(ObjectHit::MISS.first_forward().is_none());
    }

    #[test]
    fn test_first_forward_prefers_enter() {
        let hit = ObjectHit::new(Some(record(1.0)), Some(record(2.0)));
        let (first, is_enter) = hit.first_forward().unwrap();
        assert_eq!(first.t, 1.0);
        assert!(is_enter);
    }

    #[test]
    fn test_first_forward_from_inside() {
        let hit = ObjectHit::new(Some(record(-1.0)), Some(record(2.0)));
        let (first, is_enter) = hit.first_forward().unwrap();
        assert_eq!(first.t, 2.0);
        assert!(!is_enter);
    }

    #[test]
    fn test_first_forward_behind() {
        let hit = ObjectHit::new(Some(record(-3.0)), Some(record(-1.0)));
        assert!(hit.first_forward().is_none());

        let nan = ObjectHit::new(Some(record(f32::NAN)), None);
        assert!(nan.first_forward().is_none());
    }
}
