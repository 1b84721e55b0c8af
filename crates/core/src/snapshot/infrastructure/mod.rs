pub mod scene_rasterizer;
