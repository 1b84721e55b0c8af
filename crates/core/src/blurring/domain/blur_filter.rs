use crate::shared::bitmap::Bitmap;

/// Domain interface for the blur collaborator applied to overlay crops.
///
/// A pure image transform: implementations modify the bitmap in-place and
/// cannot fail. Overlays treat the filter as a black box.
pub trait BlurFilter: Send {
    fn blur(&self, bitmap: &mut Bitmap);
}
