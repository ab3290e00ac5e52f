pub mod prefabs;
pub mod script;
pub mod test_scene;

pub use script::InputScript;
pub use test_scene::{load_test_scene, TestScene};
