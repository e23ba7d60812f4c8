//! Unit-sphere tessellation with per-vertex tangent data.
//!
//! The shading model perturbs normals procedurally and needs a
//! tangent-space basis, so every vertex carries an analytic tangent
//! (`dP/dθ`) alongside position, normal, and UV. Geometry is immutable
//! after construction; the displaced silhouette comes entirely from the
//! vertex shader.

use glam::Vec3;

/// Default tessellation: dense enough that the procedural displacement
/// reads as a smooth surface.
pub const DEFAULT_SEGMENTS: u32 = 512;

/// One sphere vertex as uploaded to the GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Outward unit normal.
    pub normal: [f32; 3],
    /// Unit tangent along increasing azimuth; `w` is the handedness sign.
    pub tangent: [f32; 4],
    /// Texture coordinates.
    pub uv: [f32; 2],
}

/// An immutable latitude/longitude sphere mesh.
#[derive(Debug)]
pub struct SphereGeometry {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    radius: f32,
    segments: u32,
}

impl SphereGeometry {
    /// Tessellate a sphere of the given radius into a `segments` ×
    /// `segments` latitude/longitude grid. `segments` below 2 is raised
    /// to 2 (the minimum closed grid).
    #[must_use]
    pub fn build(radius: f32, segments: u32) -> Self {
        let segments = segments.max(2);
        let ring = segments + 1;

        let mut vertices = Vec::with_capacity((ring * ring) as usize);
        for iy in 0..ring {
            let v = iy as f32 / segments as f32;
            let phi = v * std::f32::consts::PI;
            let (sin_phi, cos_phi) = phi.sin_cos();
            for ix in 0..ring {
                let u = ix as f32 / segments as f32;
                let theta = u * std::f32::consts::TAU;
                let (sin_theta, cos_theta) = theta.sin_cos();

                // Same y-up convention as the light positions.
                let normal = Vec3::new(
                    sin_phi * sin_theta,
                    cos_phi,
                    sin_phi * cos_theta,
                );
                // dP/dθ, normalized; well-defined at the poles too.
                let tangent = Vec3::new(cos_theta, 0.0, -sin_theta);

                vertices.push(Vertex {
                    position: (normal * radius).to_array(),
                    normal: normal.to_array(),
                    tangent: [tangent.x, tangent.y, tangent.z, 1.0],
                    uv: [u, 1.0 - v],
                });
            }
        }

        let mut indices = Vec::with_capacity((segments * segments * 6) as usize);
        for iy in 0..segments {
            for ix in 0..segments {
                let a = iy * ring + ix;
                let b = a + ring;
                indices.extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
            }
        }

        Self {
            vertices,
            indices,
            radius,
            segments,
        }
    }

    /// Unit sphere at the default tessellation.
    #[must_use]
    pub fn unit() -> Self {
        Self::build(1.0, DEFAULT_SEGMENTS)
    }

    /// The vertex array.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// The triangle-list index array.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Sphere radius.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Grid resolution per axis.
    #[must_use]
    pub fn segments(&self) -> u32 {
        self.segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_counts() {
        let geo = SphereGeometry::build(1.0, 8);
        assert_eq!(geo.vertices().len(), 9 * 9);
        assert_eq!(geo.indices().len(), 8 * 8 * 6);
    }

    #[test]
    fn positions_lie_on_the_sphere() {
        let geo = SphereGeometry::build(2.0, 6);
        for v in geo.vertices() {
            let p = Vec3::from_array(v.position);
            assert!((p.length() - 2.0).abs() < 1e-5, "off-sphere: {p:?}");
        }
    }

    #[test]
    fn normals_are_unit_and_outward() {
        let geo = SphereGeometry::build(3.0, 6);
        for v in geo.vertices() {
            let n = Vec3::from_array(v.normal);
            let p = Vec3::from_array(v.position);
            assert!((n.length() - 1.0).abs() < 1e-5);
            assert!(n.dot(p) > 0.0 || p.length() < 1e-6);
        }
    }

    #[test]
    fn tangents_are_unit_and_orthogonal_to_normals() {
        let geo = SphereGeometry::build(1.0, 12);
        for v in geo.vertices() {
            let n = Vec3::from_array(v.normal);
            let t = Vec3::new(v.tangent[0], v.tangent[1], v.tangent[2]);
            assert!((t.length() - 1.0).abs() < 1e-5);
            assert!(n.dot(t).abs() < 1e-5, "tangent not in surface plane");
            assert_eq!(v.tangent[3], 1.0);
        }
    }

    #[test]
    fn indices_stay_in_bounds() {
        let geo = SphereGeometry::build(1.0, 5);
        let count = geo.vertices().len() as u32;
        assert!(geo.indices().iter().all(|&i| i < count));
    }

    #[test]
    fn tiny_segment_counts_are_clamped() {
        let geo = SphereGeometry::build(1.0, 0);
        assert_eq!(geo.segments(), 2);
        assert_eq!(geo.vertices().len(), 9);
    }
}
