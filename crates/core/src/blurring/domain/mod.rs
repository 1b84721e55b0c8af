pub mod blur_filter;
