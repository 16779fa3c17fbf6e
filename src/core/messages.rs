//! Messages sent back to the UI loop by background tasks

use crate::images::Bitmap;

#[derive(Debug, Clone)]
pub enum AppMessage {
    /// An image load finished; `None` means it failed and was already logged
    ImageLoaded {
        reference: String,
        bitmap: Option<Bitmap>,
    },
}
