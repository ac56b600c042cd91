//! Conversion from the rig file's coordinate system to the engine's. The file
//! has its second and third axes the other way round, which also flips
//! handedness.

use nalgebra_glm as glm;

/// Permutation swapping the Y and Z axes. It is its own inverse.
#[must_use]
pub fn handed_flip() -> glm::Mat4 {
    glm::mat4(
        1.0, 0.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Position from file order (x, y, z) to engine order (x, z, y)
#[must_use]
pub fn swap_position(position: [f32; 3]) -> glm::Vec3 {
    glm::vec3(position[0], position[2], position[1])
}

/// Rotation from Euler angles in radians, applied X first, then Y, then Z
#[must_use]
pub fn euler_rotation(angles: [f32; 3]) -> glm::Mat4 {
    let [rx, ry, rz] = angles;
    glm::rotation(rz, &glm::vec3(0.0, 0.0, 1.0))
        * glm::rotation(ry, &glm::vec3(0.0, 1.0, 0.0))
        * glm::rotation(rx, &glm::vec3(1.0, 0.0, 0.0))
}

/// Local bone rotation from file Euler angles: `transpose(F * R * F)` where
/// `F` is `handed_flip` and `R` is `euler_rotation`
#[must_use]
pub fn convert_rotation(angles: [f32; 3]) -> glm::Mat4 {
    let flip = handed_flip();
    glm::transpose(&(flip * euler_rotation(angles) * flip))
}
