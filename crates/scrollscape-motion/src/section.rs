use crate::config::SectionRotationConfig;
use crate::stage::SceneObject;
use crate::tween::RotationTween;

/// Fires and drives the rotation burst of the newly active section.
///
/// At most one tween per section. Re-triggering a section whose tween is in
/// flight replaces it; the replacement carries over whatever rotation the old
/// one had not applied yet (see [`RotationTween::superseding`]).
#[derive(Debug, Clone, PartialEq)]
pub struct SectionRotator {
    config: SectionRotationConfig,
    tweens: Vec<Option<RotationTween>>,
}

impl SectionRotator {
    pub fn new(config: SectionRotationConfig, section_count: usize) -> Self {
        Self {
            config,
            tweens: vec![None; section_count],
        }
    }

    /// Starts a rotation on `section`.
    ///
    /// Returns `true` if an in-flight tween was superseded. Out-of-range
    /// sections are ignored.
    pub fn trigger(&mut self, section: usize) -> bool {
        let SectionRotationConfig { duration, delta, easing } = self.config;

        let Some(slot) = self.tweens.get_mut(section) else {
            log::warn!("rotation trigger for unknown section {section}");
            return false;
        };

        match slot.take() {
            Some(prev) if !prev.is_finished() => {
                *slot = Some(RotationTween::superseding(&prev, delta, duration, easing));
                true
            }
            _ => {
                *slot = Some(RotationTween::new(delta, duration, easing));
                false
            }
        }
    }

    /// Advances every in-flight tween and adds its increment to the matching object.
    ///
    /// Finished tweens are dropped after their final increment.
    pub fn tick(&mut self, dt: f32, objects: &mut [SceneObject]) {
        for (slot, object) in self.tweens.iter_mut().zip(objects.iter_mut()) {
            let Some(tween) = slot.as_mut() else { continue };

            object.rotation += tween.advance(dt);

            if tween.is_finished() {
                *slot = None;
            }
        }
    }

    #[inline]
    pub fn is_animating(&self, section: usize) -> bool {
        self.tweens.get(section).is_some_and(Option::is_some)
    }

    pub fn active_count(&self) -> usize {
        self.tweens.iter().filter(|t| t.is_some()).count()
    }

    /// Rotation still pending on `section`, if a tween is in flight.
    pub fn pending(&self, section: usize) -> Option<glam::Vec3> {
        self.tweens.get(section)?.as_ref().map(RotationTween::remaining)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::stage::ShaderUniforms;
    use crate::viewport::Viewport;

    fn objects(n: usize) -> Vec<SceneObject> {
        (0..n)
            .map(|i| SceneObject::new(format!("s{i}"), Vec3::ZERO, ShaderUniforms::new(Viewport::new(1.0, 1.0))))
            .collect()
    }

    fn run_to_completion(rotator: &mut SectionRotator, objs: &mut [SceneObject]) {
        for _ in 0..600 {
            rotator.tick(1.0 / 60.0, objs);
        }
    }

    #[test]
    fn trigger_rotates_only_target_section() {
        let mut rotator = SectionRotator::new(SectionRotationConfig::default(), 3);
        let mut objs = objects(3);

        assert!(!rotator.trigger(1));
        run_to_completion(&mut rotator, &mut objs);

        assert_eq!(objs[0].rotation, Vec3::ZERO);
        assert!((objs[1].rotation - Vec3::new(6.0, 3.0, 0.0)).length() < 1e-4);
        assert_eq!(objs[2].rotation, Vec3::ZERO);
        assert_eq!(rotator.active_count(), 0);
    }

    #[test]
    fn rotation_is_relative_to_value_at_start() {
        let mut rotator = SectionRotator::new(SectionRotationConfig::default(), 1);
        let mut objs = objects(1);
        objs[0].rotation = Vec3::new(0.785, 0.0, 0.0);

        let _ = rotator.trigger(0);
        run_to_completion(&mut rotator, &mut objs);

        assert!((objs[0].rotation - Vec3::new(6.785, 3.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn retrigger_in_flight_supersedes_and_conserves_delta() {
        let mut rotator = SectionRotator::new(SectionRotationConfig::default(), 1);
        let mut objs = objects(1);

        let _ = rotator.trigger(0);
        for _ in 0..20 {
            rotator.tick(1.0 / 60.0, &mut objs);
        }
        assert!(rotator.trigger(0));
        assert_eq!(rotator.active_count(), 1);

        run_to_completion(&mut rotator, &mut objs);
        assert!((objs[0].rotation - Vec3::new(12.0, 6.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn retrigger_after_completion_starts_fresh() {
        let mut rotator = SectionRotator::new(SectionRotationConfig::default(), 1);
        let mut objs = objects(1);

        let _ = rotator.trigger(0);
        run_to_completion(&mut rotator, &mut objs);
        assert!(!rotator.is_animating(0));
        assert!(!rotator.trigger(0));
        assert_eq!(rotator.pending(0), Some(Vec3::new(6.0, 3.0, 0.0)));
    }

    #[test]
    fn out_of_range_section_is_ignored() {
        let mut rotator = SectionRotator::new(SectionRotationConfig::default(), 2);
        assert!(!rotator.trigger(5));
        assert_eq!(rotator.active_count(), 0);
    }
}
