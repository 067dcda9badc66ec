use std::f32::consts::PI;

use glam::{Quat, Vec3, vec3};
use globe_common::GeoCoord;

use super::data::MeshVertex;

pub const GLOBE_RADIUS: f32 = 250.0;
pub const OVERLAY_RING_RADIUS: f32 = GLOBE_RADIUS + 20.0;
pub const GUIDE_RADIUS: f32 = 200.0;
pub const MARKER_RAY_LENGTH: f32 = 300.0;
pub const POLYLINE_RAY_LENGTH: f32 = 275.0;
pub const RING_SEGMENTS: u32 = 32;

/// Re-orients `v` on its sphere by the given angular offsets in degrees:
/// `phi_degrees` is added to the azimuth, `theta_degrees` to the polar
/// inclination. The length of `v` is preserved.
///
/// With `fix` set the inclination is kept inside (0, 180] degrees. Snapping
/// all the way to 0 would leave the azimuth undefined and make the camera
/// jump, so the low end lands on 0.1 degrees instead; 180 degrees has no
/// such problem.
///
/// A zero-length vector has no defined azimuth either and is returned as is
/// rather than turned into NaNs.
pub fn rotate_vector(v: Vec3, phi_degrees: f32, theta_degrees: f32, fix: bool) -> Vec3 {
    let radius = v.length();
    if radius == 0.0 {
        return v;
    }

    let mut theta = (v.y / radius).acos() + theta_degrees.to_radians();
    let phi = v.x.atan2(v.z) + phi_degrees.to_radians();

    if fix {
        if theta <= 0.0 {
            theta = 0.1f32.to_radians();
        } else if theta > PI {
            theta = PI;
        }
    }

    vec3(
        radius * theta.sin() * phi.sin(),
        radius * theta.cos(),
        radius * theta.sin() * phi.cos(),
    )
}

/// The endpoint of a ray of the given length from the globe center through
/// the latitude/longitude pair.
pub fn surface_ray(length: f32, coord: GeoCoord) -> Vec3 {
    rotate_vector(
        vec3(length, 0.0, 0.0),
        coord.longitude,
        -coord.latitude,
        false,
    )
}

pub struct Mesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Appends another mesh, rebasing its indices onto this one's vertices.
    pub fn append(&mut self, other: Mesh) {
        let base = self.vertices.len() as u32;
        self.vertices.extend(other.vertices);
        self.indices
            .extend(other.indices.into_iter().map(|index| base + index));
    }
}

/// A uniform latitude/longitude sphere centered on the origin.
pub fn sphere(radius: f32, sectors: u32, stacks: u32, color: [f32; 4]) -> Mesh {
    let mut vertices = Vec::with_capacity(((stacks + 1) * (sectors + 1)) as usize);
    for i in 0..=stacks {
        let theta = PI * i as f32 / stacks as f32;
        for j in 0..=sectors {
            let phi = 2.0 * PI * j as f32 / sectors as f32;
            let position = vec3(
                radius * theta.sin() * phi.sin(),
                radius * theta.cos(),
                radius * theta.sin() * phi.cos(),
            );
            vertices.push(MeshVertex::new(position, color));
        }
    }

    let mut indices = Vec::new();
    for i in 0..stacks {
        for j in 0..sectors {
            let row = i * (sectors + 1) + j;
            let next_row = (i + 1) * (sectors + 1) + j;
            // the first and last stack rings collapse into the poles
            if i > 0 {
                indices.extend([row, next_row, row + 1]);
            }
            if i + 1 < stacks {
                indices.extend([row + 1, next_row, next_row + 1]);
            }
        }
    }

    Mesh { vertices, indices }
}

/// A filled disc sector in the XY plane, fanned around the origin and then
/// rotated into place.
pub fn disc(
    radius: f32,
    segments: u32,
    theta_start: f32,
    theta_length: f32,
    rotation: Quat,
    color: [f32; 4],
) -> Mesh {
    let mut vertices = Vec::with_capacity(segments as usize + 2);
    vertices.push(MeshVertex::new(Vec3::ZERO, color));
    for j in 0..=segments {
        let theta = theta_start + theta_length * j as f32 / segments as f32;
        let position = rotation * vec3(radius * theta.cos(), radius * theta.sin(), 0.0);
        vertices.push(MeshVertex::new(position, color));
    }

    let indices = (1..=segments).flat_map(|j| [0, j, j + 1]).collect();

    Mesh { vertices, indices }
}

/// Points of a circle outline in the XY plane, rotated into place.
pub fn ring(radius: f32, segments: u32, rotation: Quat) -> Vec<Vec3> {
    (0..segments)
        .map(|j| {
            let theta = 2.0 * PI * j as f32 / segments as f32;
            rotation * vec3(radius * theta.cos(), radius * theta.sin(), 0.0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::{assert_relative_eq, assert_ulps_eq};
    use rstest::rstest;

    use super::*;

    fn inclination_degrees(v: Vec3) -> f32 {
        (v.y / v.length()).acos().to_degrees()
    }

    #[rstest]
    #[case(vec3(300.0, 0.0, 0.0), 20.0, -10.0, false)]
    #[case(vec3(500.0, 500.0, 500.0), -135.5, 62.0, true)]
    #[case(vec3(0.0, 1.0, 0.0), 90.0, 45.0, false)]
    #[case(vec3(-3.0, 7.5, 0.25), 721.0, -300.0, true)]
    fn rotation_preserves_length(
        #[case] v: Vec3,
        #[case] phi: f32,
        #[case] theta: f32,
        #[case] fix: bool,
    ) {
        let rotated = rotate_vector(v, phi, theta, fix);

        assert_relative_eq!(rotated.length(), v.length(), max_relative = 1e-5);
    }

    #[test]
    fn rotation_by_zero_is_identity() {
        let v = vec3(120.0, -35.0, 80.0);

        let rotated = rotate_vector(v, 0.0, 0.0, false);

        assert_relative_eq!(rotated.x, v.x, max_relative = 1e-4);
        assert_relative_eq!(rotated.y, v.y, max_relative = 1e-4);
        assert_relative_eq!(rotated.z, v.z, max_relative = 1e-4);
    }

    #[test]
    fn azimuth_rotation_round_trips() {
        let v = vec3(40.0, 10.0, -25.0);

        let rotated = rotate_vector(rotate_vector(v, 73.0, 0.0, false), -73.0, 0.0, false);

        assert_relative_eq!(rotated.x, v.x, max_relative = 1e-4);
        assert_relative_eq!(rotated.y, v.y, max_relative = 1e-4);
        assert_relative_eq!(rotated.z, v.z, max_relative = 1e-4);
    }

    #[test]
    fn fix_clamps_low_inclination_to_a_tenth_of_a_degree() {
        // raw inclination is 45 degrees, the offset pushes it below zero
        let rotated = rotate_vector(vec3(0.0, 100.0, 100.0), 0.0, -60.0, true);

        assert_relative_eq!(inclination_degrees(rotated), 0.1, max_relative = 1e-3);
    }

    #[test]
    fn fix_clamps_high_inclination_to_180_degrees() {
        let rotated = rotate_vector(vec3(0.0, 100.0, 100.0), 0.0, 150.0, true);

        assert_relative_eq!(inclination_degrees(rotated), 180.0, max_relative = 1e-4);
    }

    #[test]
    fn without_fix_the_inclination_is_left_alone() {
        // 45 - 60 degrees folds over the pole instead of clamping
        let rotated = rotate_vector(vec3(0.0, 100.0, 100.0), 0.0, -60.0, false);

        assert_relative_eq!(inclination_degrees(rotated), 15.0, max_relative = 1e-3);
    }

    #[test]
    fn zero_vector_maps_to_zero_vector() {
        assert_eq!(rotate_vector(Vec3::ZERO, 30.0, 40.0, true), Vec3::ZERO);
    }

    #[rstest]
    #[case::on_the_equator(GeoCoord::new(0.0, 0.0))]
    #[case::north(GeoCoord::new(51.5, -0.13))]
    #[case::south(GeoCoord::new(-33.9, 151.2))]
    fn surface_rays_have_the_requested_length(#[case] coord: GeoCoord) {
        let ray = surface_ray(MARKER_RAY_LENGTH, coord);

        assert_relative_eq!(ray.length(), MARKER_RAY_LENGTH, max_relative = 1e-5);
    }

    #[test]
    fn northern_latitudes_point_up() {
        let ray = surface_ray(POLYLINE_RAY_LENGTH, GeoCoord::new(45.0, 0.0));

        assert!(ray.y > 0.0);
        assert_ulps_eq!(
            inclination_degrees(ray),
            45.0,
            epsilon = 1e-3,
            max_ulps = 10
        );
    }

    #[test]
    fn appending_meshes_rebases_indices() {
        let mut mesh = disc(1.0, 4, 0.0, PI, Quat::IDENTITY, [1.0, 0.0, 0.0, 1.0]);
        let first_vertices = mesh.vertices.len() as u32;

        mesh.append(disc(2.0, 4, 0.0, PI, Quat::IDENTITY, [0.0, 1.0, 0.0, 1.0]));

        assert_eq!(mesh.vertices.len() as u32, 2 * first_vertices);
        assert!(
            mesh.indices[mesh.indices.len() / 2..]
                .iter()
                .all(|&index| index >= first_vertices),
        );
    }

    #[test]
    fn sphere_indices_stay_in_bounds() {
        let mesh = sphere(GLOBE_RADIUS, 32, 32, [0.4, 0.4, 1.0, 1.0]);

        let vertex_count = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&index| index < vertex_count));
        assert_eq!(mesh.indices.len() % 3, 0);
    }

    #[test]
    fn ring_points_lie_on_the_circle() {
        let points = ring(GUIDE_RADIUS, RING_SEGMENTS, Quat::from_rotation_x(-PI / 2.0));

        assert_eq!(points.len(), RING_SEGMENTS as usize);
        for point in points {
            assert_relative_eq!(point.length(), GUIDE_RADIUS, max_relative = 1e-5);
            // rotated into the horizontal plane
            assert_relative_eq!(point.y, 0.0, epsilon = 1e-3);
        }
    }
}
