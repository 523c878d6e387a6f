pub mod error;
pub mod evaluation;
pub mod gravity;
pub mod math;
pub mod mesh;

pub use error::{GravityError, Result};
pub use evaluation::{FieldPoint, FieldPointSource, GravityEvaluation, GravityField, GravityParams};
pub use gravity::{GravityModel, GravityValue, Method, PolyhedralGravity};
pub use mesh::ShapeModel;
