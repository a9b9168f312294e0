// Concrete migration steps
pub mod target_framework;

pub use target_framework::TargetFrameworkTransformation;
