//! Bounding volumes and their clip tests.
//!
//! Every `container.clip_xxx(&volume)` method answers where `volume` lies
//! relative to `container` as a [`ClipResult`].

mod clip;
mod plane;
mod sphere;
mod aabbox;
mod aabbox_ext;
mod obbox;
mod cone;
mod frustum;

pub use clip::{ClipResult, PlaneSide};
pub use plane::Plane;
pub use sphere::Sphere;
pub use aabbox::{AABBox, AABBox2, CORNER_COUNT, FACE_COUNT};
pub use aabbox_ext::AABBoxExt;
pub use obbox::{OBBox, OBBoxExt};
pub use cone::{Cone, ConeGroups, ConeTrig};
pub use frustum::{
    Frustum, PLANE_BOTTOM, PLANE_FAR, PLANE_LEFT, PLANE_NEAR, PLANE_RIGHT, PLANE_TOP,
};
