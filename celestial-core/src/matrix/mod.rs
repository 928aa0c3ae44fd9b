pub mod matrix4;
pub mod vector3;

pub use matrix4::Matrix4;
pub use vector3::Vector3;
