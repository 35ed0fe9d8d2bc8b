use iced::widget::canvas::{self, Path, Stroke};
use iced::widget::{Row, Space, container, image, stack};
use iced::{Color, ContentFit, Element, Length, Point, Rectangle, Size, Theme, mouse};
use trimline::{DragTarget, Gesture, TrimControl};

pub const STRIP_HEIGHT: f32 = 56.0;
const GRAB_SLOP: f64 = 6.0;
const PAN_SLOP: f64 = 4.0;

const HANDLE_COLOR: Color = Color::from_rgb(0.98, 0.80, 0.20);
const MASK_COLOR: Color = Color::from_rgba(0.0, 0.0, 0.0, 0.55);
const PLAYHEAD_COLOR: Color = Color::WHITE;

/// Control-space anchors of the draggable parts.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Anchors {
    start: f64,
    end: f64,
    playhead: f64,
}

impl Anchors {
    fn of(control: &TrimControl) -> Self {
        let origin = control.strip().origin_x;
        let state = control.range().state();
        Self {
            start: origin + state.trim_start_x,
            end: origin + control.range().width() - state.trim_end_reserved,
            playhead: origin + state.playhead_x,
        }
    }
}

/// Draggable part under control-space `x`, with the offset from the pointer
/// to the part's anchor.
///
/// Handles are grabbed on their outer side; the playhead wins everywhere else.
pub fn hit_target(control: &TrimControl, x: f64) -> Option<(DragTarget, f64)> {
    if !control.is_strip_visible() {
        return None;
    }
    let anchors = Anchors::of(control);
    let handle = control.config().handle_width;
    let playhead = control.config().playhead_width;

    if control.can_trim() {
        if (anchors.start - handle - GRAB_SLOP..=anchors.start).contains(&x) {
            return Some((DragTarget::TrimStart, anchors.start - x));
        }
        if (anchors.end..=anchors.end + handle + GRAB_SLOP).contains(&x) {
            return Some((DragTarget::TrimEnd, anchors.end - x));
        }
    }
    if (anchors.playhead - GRAB_SLOP..=anchors.playhead + playhead + GRAB_SLOP).contains(&x) {
        return Some((DragTarget::Playhead, anchors.playhead - x));
    }
    None
}

fn inside_strip(control: &TrimControl, x: f64) -> bool {
    let strip = control.strip();
    control.is_strip_visible() && (strip.origin_x..=strip.origin_x + strip.width).contains(&x)
}

#[derive(Debug, Default)]
struct StripState {
    drag: Option<(DragTarget, f64)>,
    pressed_at: Option<f64>,
}

#[derive(Debug)]
struct StripProgram<'a, Message> {
    control: &'a TrimControl,
    on_gesture: fn(Gesture) -> Message,
}

impl<Message> canvas::Program<Message> for StripProgram<'_, Message> {
    type State = StripState;

    fn update(
        &self,
        state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        let cursor_x = cursor
            .position()
            .map(|position| f64::from(position.x - bounds.x));
        let captured = |gesture| {
            (
                canvas::event::Status::Captured,
                Some((self.on_gesture)(gesture)),
            )
        };

        match event {
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let Some(x) = cursor_x.filter(|_| cursor.is_over(bounds)) else {
                    return (canvas::event::Status::Ignored, None);
                };
                if let Some((target, offset)) = hit_target(self.control, x) {
                    state.drag = Some((target, offset));
                    return captured(Gesture::DragBegan { target });
                }
                if inside_strip(self.control, x) {
                    state.pressed_at = Some(x);
                    return (canvas::event::Status::Captured, None);
                }
                (canvas::event::Status::Ignored, None)
            }
            canvas::Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                let Some(x) = cursor_x else {
                    return (canvas::event::Status::Ignored, None);
                };
                if let Some((target, offset)) = state.drag {
                    return captured(Gesture::DragMoved {
                        target,
                        x: x + offset,
                    });
                }
                match state.pressed_at {
                    Some(pressed) if (x - pressed).abs() > PAN_SLOP => {
                        state.pressed_at = None;
                        captured(Gesture::Absorbed)
                    }
                    _ => (canvas::event::Status::Ignored, None),
                }
            }
            canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                if let Some((target, _)) = state.drag.take() {
                    return captured(Gesture::DragEnded { target });
                }
                match state.pressed_at.take() {
                    Some(x) => captured(Gesture::Tapped { x }),
                    None => (canvas::event::Status::Ignored, None),
                }
            }
            canvas::Event::Mouse(mouse::Event::CursorLeft) => {
                state.pressed_at = None;
                match state.drag.take() {
                    Some((target, _)) => captured(Gesture::DragCancelled { target }),
                    None => (canvas::event::Status::Ignored, None),
                }
            }
            _ => (canvas::event::Status::Ignored, None),
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        if !self.control.is_strip_visible() {
            let background = Path::rectangle(Point::ORIGIN, frame.size());
            frame.fill(&background, Color::from_rgb8(22, 24, 29));
            return vec![frame.into_geometry()];
        }

        let strip = self.control.strip();
        let anchors = Anchors::of(self.control);
        let handle = self.control.config().handle_width as f32;
        let playhead = self.control.config().playhead_width as f32;
        let height = bounds.height;
        let (start, end) = (anchors.start as f32, anchors.end as f32);

        let leading = start - strip.origin_x as f32;
        if leading > 0.0 {
            let mask = Path::rectangle(
                Point::new(strip.origin_x as f32, 0.0),
                Size::new(leading, height),
            );
            frame.fill(&mask, MASK_COLOR);
        }
        let trailing = (strip.origin_x + strip.width) as f32 - end;
        if trailing > 0.0 {
            let mask = Path::rectangle(Point::new(end, 0.0), Size::new(trailing, height));
            frame.fill(&mask, MASK_COLOR);
        }

        frame.stroke(&Path::line(Point::new(start, 1.0), Point::new(end, 1.0)), border());
        frame.stroke(
            &Path::line(Point::new(start, height - 1.0), Point::new(end, height - 1.0)),
            border(),
        );
        frame.fill(
            &Path::rectangle(Point::new(start - handle, 0.0), Size::new(handle, height)),
            HANDLE_COLOR,
        );
        frame.fill(
            &Path::rectangle(Point::new(end, 0.0), Size::new(handle, height)),
            HANDLE_COLOR,
        );

        let playhead_bar = Path::rectangle(
            Point::new(anchors.playhead as f32, 2.0),
            Size::new(playhead, (height - 4.0).max(1.0)),
        );
        frame.fill(&playhead_bar, PLAYHEAD_COLOR);

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if state.drag.is_some() {
            return mouse::Interaction::Grabbing;
        }
        let Some(position) = cursor.position_in(bounds) else {
            return mouse::Interaction::None;
        };
        let x = f64::from(position.x);
        match hit_target(self.control, x) {
            Some((DragTarget::Playhead, _)) => mouse::Interaction::Grab,
            Some(_) => mouse::Interaction::ResizingHorizontally,
            None if inside_strip(self.control, x) => mouse::Interaction::Pointer,
            None => mouse::Interaction::None,
        }
    }
}

fn border() -> Stroke<'static> {
    Stroke::default().with_width(2.0).with_color(HANDLE_COLOR)
}

fn thumbnail_row<'a, Message>(
    control: &TrimControl,
    thumbnails: &[Option<image::Handle>],
) -> Element<'a, Message>
where
    Message: 'a,
{
    let strip = control.strip();
    let mut row = Row::new().push(Space::with_width(Length::Fixed(strip.origin_x as f32)));
    if thumbnails.is_empty() {
        return row.into();
    }

    let slot_width = (strip.width / thumbnails.len() as f64) as f32;
    for thumbnail in thumbnails {
        row = match thumbnail {
            Some(handle) => row.push(
                image(handle.clone())
                    .content_fit(ContentFit::Cover)
                    .width(Length::Fixed(slot_width))
                    .height(Length::Fixed(STRIP_HEIGHT)),
            ),
            None => row.push(Space::new(
                Length::Fixed(slot_width),
                Length::Fixed(STRIP_HEIGHT),
            )),
        };
    }
    row.into()
}

/// Renders the thumbnail strip with the trim frame and playhead on top.
pub fn view<'a, Message>(
    control: &'a TrimControl,
    thumbnails: &[Option<image::Handle>],
    on_gesture: fn(Gesture) -> Message,
) -> Element<'a, Message>
where
    Message: 'a,
{
    container(stack![
        thumbnail_row(control, thumbnails),
        canvas::Canvas::new(StripProgram {
            control,
            on_gesture,
        })
        .width(Length::Fill)
        .height(Length::Fixed(STRIP_HEIGHT)),
    ])
    .width(Length::Fill)
    .height(Length::Fixed(STRIP_HEIGHT))
    .into()
}
