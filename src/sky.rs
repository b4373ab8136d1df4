//! Procedural sky model.
//!
//! Rays that escape the scene get a vertical horizon-to-zenith gradient plus
//! a sun disc with a soft glow around it.

use glam::Vec3A;

use crate::material::Color;

/// Sky gradient with a sun disc.
#[derive(Debug, Clone, Copy)]
pub struct Skybox {
    horizon_color: Color,
    zenith_color: Color,
    sun_color: Color,
    sun_direction: Vec3A,
}

impl Skybox {
    /// Default daytime sky: blue gradient, warm sun up and to the side.
    pub fn new() -> Self {
        Self::with_colors(
            Vec3A::new(135.0 / 255.0, 206.0 / 255.0, 235.0 / 255.0),
            Vec3A::new(30.0 / 255.0, 144.0 / 255.0, 1.0),
            Vec3A::new(1.0, 1.0, 200.0 / 255.0),
            Vec3A::new(0.3, 0.8, 0.5),
        )
    }

    /// Custom sky; the sun direction is normalized here.
    pub fn with_colors(
        horizon_color: Color,
        zenith_color: Color,
        sun_color: Color,
        sun_direction: Vec3A,
    ) -> Self {
        Self {
            horizon_color,
            zenith_color,
            sun_color,
            sun_direction: sun_direction.normalize(),
        }
    }

    /// Sky color for a ray direction.
    ///
    /// The vertical component of the re-normalized direction, clamped to
    /// [0, 1], blends horizon into zenith. On top of that a sun term adds
    /// `sun_color * (sunDot^16 + sunDot^4 * 0.3)` when the disc or glow is
    /// noticeable, with each channel clamped to the valid range.
    pub fn sky_color(&self, direction: Vec3A) -> Color {
        let direction = direction.normalize();

        let t = direction.y.clamp(0.0, 1.0);
        let mut color = self.horizon_color.lerp(self.zenith_color, t);

        let sun_dot = direction.dot(self.sun_direction).max(0.0);
        let disc = sun_dot.powi(16);
        let glow = sun_dot.powi(4) * 0.3;
        if disc > 0.1 || glow > 0.0 {
            color = (color + self.sun_color * (disc + glow)).min(Vec3A::ONE);
        }

        color
    }
}

impl Default for Skybox {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sun_on_horizon() -> Skybox {
        Skybox::with_colors(
            Vec3A::new(0.5, 0.7, 0.9),
            Vec3A::new(0.1, 0.3, 0.8),
            Vec3A::ONE,
            Vec3A::new(1.0, 0.0, 0.0),
        )
    }

    #[test]
    fn straight_up_is_exactly_the_zenith_color() {
        let sky = sun_on_horizon();
        let color = sky.sky_color(Vec3A::new(0.0, 1.0, 0.0));
        assert_eq!(color, Vec3A::new(0.1, 0.3, 0.8));
    }

    #[test]
    fn horizontal_away_from_the_sun_is_the_horizon_color() {
        let sky = sun_on_horizon();
        let color = sky.sky_color(Vec3A::new(-1.0, 0.0, 0.0));
        assert_eq!(color, Vec3A::new(0.5, 0.7, 0.9));
    }

    #[test]
    fn looking_into_the_sun_brightens_the_sky() {
        let sky = sun_on_horizon();
        let toward = sky.sky_color(Vec3A::new(1.0, 0.001, 0.0));
        let away = sky.sky_color(Vec3A::new(0.0, 0.001, 1.0));
        assert!(toward.x > away.x);
        assert!(toward.max_element() <= 1.0);
    }

    #[test]
    fn downward_directions_stay_at_the_horizon_color() {
        let sky = sun_on_horizon();
        let color = sky.sky_color(Vec3A::new(0.0, -1.0, 0.0));
        assert_eq!(color, Vec3A::new(0.5, 0.7, 0.9));
    }
}
