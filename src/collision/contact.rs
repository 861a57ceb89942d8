use glam::Vec3;

/// Whether two bodies overlap enough to merge.
///
/// The threshold is `collision_factor * (radius_a + radius_b)`, measured on the
/// centre separation `difference`. Coincident centres always merge.
#[inline]
pub fn is_merge_contact(difference: Vec3, radius_a: f32, radius_b: f32, collision_factor: f32) -> bool {
    let threshold = collision_factor * (radius_a + radius_b);
    let distance_sq = difference.length_squared();
    distance_sq < threshold * threshold || distance_sq == 0.0
}
