//! Screen capture boundary.

use dashbot_core::Region;
use image::GrayImage;
use thiserror::Error;
use xcap::Monitor;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no monitor fully contains the capture region {0:?}")]
    RegionOffscreen(Region),
    #[error("screen capture failed: {0}")]
    Backend(#[from] xcap::XCapError),
    #[error("captured frame is smaller than the capture region")]
    Truncated,
}

/// Produces grayscale frames of one fixed screen region on demand.
///
/// Every call covers the exact same region. A capture failure is fatal for
/// the run: downstream matching cannot operate on a missing frame.
pub trait FrameSource {
    fn capture(&mut self) -> Result<GrayImage, CaptureError>;
}

/// xcap-backed frame source.
///
/// Captures the monitor that contains the configured region and crops the
/// region out of each shot.
pub struct ScreenSource {
    monitor: Monitor,
    region: Region,
}

impl ScreenSource {
    /// Locate the monitor containing `region`.
    ///
    /// The region must lie entirely within one monitor; a capture that
    /// silently clipped it would break the fixed-region contract.
    pub fn new(region: Region) -> Result<Self, CaptureError> {
        for monitor in Monitor::all()? {
            let x = monitor.x()?;
            let y = monitor.y()?;
            let width = monitor.width()? as i32;
            let height = monitor.height()? as i32;

            if region.x >= x
                && region.y >= y
                && region.right() <= x + width
                && region.bottom() <= y + height
            {
                return Ok(Self { monitor, region });
            }
        }

        Err(CaptureError::RegionOffscreen(region))
    }
}

impl FrameSource for ScreenSource {
    fn capture(&mut self) -> Result<GrayImage, CaptureError> {
        let shot = self.monitor.capture_image()?;

        let offset_x = (self.region.x - self.monitor.x()?) as u32;
        let offset_y = (self.region.y - self.monitor.y()?) as u32;
        if offset_x + self.region.width > shot.width()
            || offset_y + self.region.height > shot.height()
        {
            return Err(CaptureError::Truncated);
        }

        let crop = image::imageops::crop_imm(
            &shot,
            offset_x,
            offset_y,
            self.region.width,
            self.region.height,
        )
        .to_image();

        Ok(image::DynamicImage::ImageRgba8(crop).to_luma8())
    }
}
