//! WGSL sources and the names the renderer resolves in them.

pub const CUBE_VERTEX: &str = include_str!("cube.vert.wgsl");
pub const CUBE_FRAGMENT: &str = include_str!("cube.frag.wgsl");

pub const QUAD_VERTEX: &str = include_str!("quad.vert.wgsl");
pub const QUAD_FRAGMENT: &str = include_str!("quad.frag.wgsl");

pub const ATTR_POSITION: &str = "a_position";
pub const ATTR_COLOR: &str = "a_color";

pub const UNIFORM_PROJECTION: &str = "u_projection";
pub const UNIFORM_MODEL_VIEW: &str = "u_model_view";
