pub mod scene_node;
pub mod scene_registry;
