use iced::widget::{container, image, text};
use iced::{ContentFit, Element, Length};
use trimline::{Frame, PixelFormat};

/// UI-ready still converted from a sampled frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewImage {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

impl PreviewImage {
    /// Converts an RGBA frame into an iced image handle.
    pub fn from_frame(frame: &Frame) -> Option<Self> {
        if frame.format != PixelFormat::Rgba8 {
            return None;
        }

        let expected_bytes = frame.width.checked_mul(frame.height)?.checked_mul(4)? as usize;
        if frame.bytes.len() != expected_bytes {
            return None;
        }

        Some(Self {
            handle: image::Handle::from_rgba(frame.width, frame.height, frame.bytes.to_vec()),
            width: frame.width,
            height: frame.height,
        })
    }
}

/// Renders the player area.
pub fn view<'a, Message>(latest: Option<&PreviewImage>) -> Element<'a, Message>
where
    Message: 'a,
{
    match latest {
        Some(image_data) => image(image_data.handle.clone())
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => container(text("Open a video to start"))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
    }
}
