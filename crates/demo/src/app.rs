use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use iced::widget::{button, column, container, horizontal_space, image, row, text, text_input};
use iced::{Element, Length, Subscription, Task, time, window};
use tracing::{info, warn};
use trimline::playback::{TICK_INTERVAL, TickAction, on_tick};
use trimline::{
    FfmpegAsset, Frame, Gesture, SharedAsset, TrimConfig, TrimControl, TrimDelegate, dispatch,
};

use crate::player::SimulatedPlayer;
use crate::widgets::preview::{self, PreviewImage};
use crate::widgets::strip;

pub const WINDOW_WIDTH: f32 = 960.0;
pub const WINDOW_HEIGHT: f32 = 560.0;
const PADDING: f32 = 16.0;
const PREVIEW_HEIGHT: f32 = 240.0;
const THUMBNAIL_HEIGHT: u32 = 56;
const THUMBNAIL_POLL_INTERVAL: Duration = Duration::from_millis(50);
const CONFIG_ENV: &str = "TRIMLINE_CONFIG";

/// UI messages handled by the iced app update loop.
#[derive(Debug, Clone)]
pub enum Message {
    PathChanged(String),
    OpenPressed,
    AssetOpened(Result<FfmpegAsset, String>),
    /// Still sampled off the update loop for preview request `request`.
    PreviewSampled {
        request: u64,
        result: Result<Frame, String>,
    },
    TogglePlay,
    PlayerTick,
    PollThumbnails,
    WindowResized(f32),
    Strip(Gesture),
}

/// What the player should do in response to one batch of control events.
#[derive(Debug, Default)]
struct HostReaction {
    pause: bool,
    range_changed: bool,
    seek: bool,
}

impl TrimDelegate for HostReaction {
    fn trim_start_changing(&mut self) {
        self.pause = true;
    }

    fn trim_range_changed(&mut self) {
        self.range_changed = true;
    }

    fn playhead_moved(&mut self) {
        self.seek = true;
    }
}

/// Host window: a simulated player above a trim control.
pub struct AppState {
    control: TrimControl,
    player: SimulatedPlayer,
    path_input: String,
    thumbnails: Vec<Option<image::Handle>>,
    preview: Option<PreviewImage>,
    preview_request: u64,
    status: String,
}

impl AppState {
    /// Boots the app, applying `TRIMLINE_CONFIG` and opening the path given
    /// as the first argument.
    pub fn boot() -> (Self, Task<Message>) {
        let mut control = TrimControl::default();
        let mut status = String::from("open a video to start");
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            match TrimConfig::load(&path).and_then(|config| control.set_config(config)) {
                Ok(_) => info!(path = ?path, "trim config loaded"),
                Err(error) => {
                    warn!(%error, "trim config ignored");
                    status = format!("config error: {error}");
                }
            }
        }
        control.set_control_width(f64::from(WINDOW_WIDTH - 2.0 * PADDING));

        let mut app = Self::from_control(control);
        app.status = status;
        let task = match std::env::args().nth(1) {
            Some(path) => {
                app.path_input = path.clone();
                open_asset(PathBuf::from(path))
            }
            None => Task::none(),
        };
        (app, task)
    }

    fn from_control(control: TrimControl) -> Self {
        Self {
            control,
            player: SimulatedPlayer::default(),
            path_input: String::new(),
            thumbnails: Vec::new(),
            preview: None,
            preview_request: 0,
            status: String::new(),
        }
    }

    /// Handles one UI message.
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PathChanged(path) => {
                self.path_input = path;
            }
            Message::OpenPressed => {
                let path = self.path_input.trim().to_owned();
                if path.is_empty() {
                    self.status = String::from("media path is empty");
                } else {
                    self.status = format!("opening {path}");
                    return open_asset(PathBuf::from(path));
                }
            }
            Message::AssetOpened(Ok(asset)) => {
                let name = asset.path().display().to_string();
                return self.install_asset(Arc::new(asset), name);
            }
            Message::AssetOpened(Err(error)) => {
                warn!(%error, "asset open failed");
                self.status = format!("error: {error}");
            }
            Message::PreviewSampled { request, result } => {
                if request != self.preview_request {
                    return Task::none();
                }
                match result {
                    Ok(frame) => self.preview = PreviewImage::from_frame(&frame),
                    Err(error) => warn!(%error, "preview sample failed"),
                }
            }
            Message::TogglePlay => return self.toggle_play(),
            Message::PlayerTick => return self.tick(),
            Message::PollThumbnails => {
                if self.control.poll_thumbnails() {
                    self.refresh_thumbnails();
                }
            }
            Message::WindowResized(width) => {
                self.control
                    .set_control_width(f64::from(width - 2.0 * PADDING).max(0.0));
            }
            Message::Strip(gesture) => return self.apply_gesture(gesture),
        }

        Task::none()
    }

    fn install_asset(&mut self, asset: SharedAsset, name: String) -> Task<Message> {
        self.player = SimulatedPlayer::new(asset.duration().timescale);
        self.control.set_asset(Some(asset));
        self.thumbnails = vec![None; self.control.thumbnails().len()];
        self.status = format!("loaded {name} ({})", self.control.labels().total);
        self.refresh_preview()
    }

    fn toggle_play(&mut self) -> Task<Message> {
        if self.control.asset().is_none() {
            self.status = String::from("nothing to play");
            return Task::none();
        }
        if self.player.is_playing() {
            self.player.pause();
            return self.refresh_preview();
        }
        self.player.play();
        self.control.set_current_time(self.player.position());
        Task::none()
    }

    fn tick(&mut self) -> Task<Message> {
        if !self.player.is_playing() {
            return Task::none();
        }
        self.player.advance(TICK_INTERVAL);
        self.control.set_current_time(self.player.position());

        match on_tick(self.player.position(), self.control.range()) {
            TickAction::PauseAndSeek(start) => {
                self.player.pause();
                self.player.seek(start);
                self.control.set_current_time(self.player.position());
                self.refresh_preview()
            }
            TickAction::Continue => Task::none(),
        }
    }

    fn apply_gesture(&mut self, gesture: Gesture) -> Task<Message> {
        let events = self.control.handle(gesture);
        let mut reaction = HostReaction::default();
        dispatch(&events, &mut reaction);

        if reaction.pause {
            self.player.pause();
        }
        let mut refresh = false;
        if reaction.seek {
            self.player.seek(self.control.absolute_play_time());
            refresh = !self.control.is_dragging();
        }
        if reaction.range_changed {
            let (start, end) = (self.control.start_time(), self.control.end_time());
            info!(
                start_seconds = start.seconds(),
                end_seconds = end.seconds(),
                "trim range changed"
            );
            self.status = format!("trim {:.2}s to {:.2}s", start.seconds(), end.seconds());
            refresh = true;
        }
        if refresh {
            self.refresh_preview()
        } else {
            Task::none()
        }
    }

    /// Updates the preview for the current playhead.
    ///
    /// Asset stills are sampled on the executor; caller-provided images are
    /// looked up in place. Replies to superseded requests are dropped.
    fn refresh_preview(&mut self) -> Task<Message> {
        self.preview_request += 1;
        let Some(asset) = self.control.asset().cloned() else {
            match self.control.current_image() {
                Ok(frame) => self.preview = frame.as_ref().and_then(PreviewImage::from_frame),
                Err(error) => warn!(%error, "preview lookup failed"),
            }
            return Task::none();
        };

        let request = self.preview_request;
        let at = self.control.absolute_play_time();
        Task::perform(
            async move { asset.sample_image(at).map_err(|error| error.to_string()) },
            move |result| Message::PreviewSampled { request, result },
        )
    }

    fn refresh_thumbnails(&mut self) {
        self.thumbnails = self
            .control
            .thumbnails()
            .slots()
            .iter()
            .map(|slot| {
                slot.image
                    .as_ref()
                    .and_then(PreviewImage::from_frame)
                    .map(|preview| preview.handle)
            })
            .collect();
    }

    /// Renders the UI tree.
    pub fn view(&self) -> Element<'_, Message> {
        let open_row = row![
            text_input("video path", &self.path_input)
                .on_input(Message::PathChanged)
                .on_submit(Message::OpenPressed),
            button("Open").on_press(Message::OpenPressed),
            button(if self.player.is_playing() { "Pause" } else { "Play" })
                .on_press(Message::TogglePlay),
        ]
        .spacing(12);

        let labels = self.control.labels();
        let label_row = if labels.visible {
            row![
                text(labels.play.clone()),
                horizontal_space(),
                text(labels.total.clone())
            ]
        } else {
            row![]
        };

        column![
            open_row,
            container(preview::view(self.preview.as_ref())).height(Length::Fixed(PREVIEW_HEIGHT)),
            label_row,
            strip::view(&self.control, &self.thumbnails, Message::Strip),
            text(format!("Status: {}", self.status)),
        ]
        .spacing(12)
        .padding(PADDING)
        .into()
    }

    /// Window resizes, plus the player clock and thumbnail polling while active.
    pub fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions =
            vec![window::resize_events().map(|(_id, size)| Message::WindowResized(size.width))];
        if self.control.thumbnails().is_loading() {
            subscriptions.push(time::every(THUMBNAIL_POLL_INTERVAL).map(|_| Message::PollThumbnails));
        }
        if self.player.is_playing() {
            subscriptions.push(time::every(TICK_INTERVAL).map(|_| Message::PlayerTick));
        }
        Subscription::batch(subscriptions)
    }
}

fn open_asset(path: PathBuf) -> Task<Message> {
    Task::perform(
        async move {
            FfmpegAsset::open(&path)
                .map(|asset| asset.with_sample_height(THUMBNAIL_HEIGHT))
                .map_err(|error| error.to_string())
        },
        Message::AssetOpened,
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use trimline::{Asset, DragTarget, Frame, Gesture, RationalTime, TrimControl};

    use super::{AppState, Message};

    #[derive(Debug)]
    struct ClipAsset;

    impl Asset for ClipAsset {
        fn duration(&self) -> RationalTime {
            RationalTime::new(36_000, 600).expect("valid")
        }

        fn sample_image(&self, _at: RationalTime) -> trimline::Result<Frame> {
            Ok(still(10))
        }
    }

    fn still(red: u8) -> Frame {
        Frame::from_rgba(1, 1, vec![red, 20, 30, 255]).expect("frame")
    }

    fn app_with_clip() -> AppState {
        let mut control = TrimControl::default();
        control.set_control_width(400.0);
        let mut app = AppState::from_control(control);
        let _ = app.install_asset(Arc::new(ClipAsset), String::from("clip"));
        app
    }

    #[test]
    fn open_without_path_reports_status() {
        let mut app = AppState::from_control(TrimControl::default());

        let _ = app.update(Message::PathChanged(String::from("   ")));
        let _ = app.update(Message::OpenPressed);

        assert_eq!(app.status, "media path is empty");
    }

    #[test]
    fn grabbing_a_handle_pauses_playback() {
        let mut app = app_with_clip();
        let _ = app.update(Message::TogglePlay);
        assert!(app.player.is_playing());

        let _ = app.update(Message::Strip(Gesture::DragBegan {
            target: DragTarget::TrimStart,
        }));

        assert!(!app.player.is_playing());
    }

    #[test]
    fn tap_seeks_player_to_absolute_play_time() {
        let mut app = app_with_clip();
        let origin = app.control.strip().origin_x;

        let _ = app.update(Message::Strip(Gesture::Tapped { x: origin + 150.0 }));

        assert!(!app.control.absolute_play_time().is_zero());
        assert_eq!(app.player.position(), app.control.absolute_play_time());
    }

    #[test]
    fn preview_keeps_only_the_latest_sample() {
        let mut app = app_with_clip();
        let origin = app.control.strip().origin_x;
        let before = app.preview_request;

        let _ = app.update(Message::Strip(Gesture::Tapped { x: origin + 150.0 }));
        let latest = app.preview_request;
        assert_eq!(latest, before + 1);

        let _ = app.update(Message::PreviewSampled {
            request: before,
            result: Ok(still(99)),
        });
        assert!(app.preview.is_none());

        let _ = app.update(Message::PreviewSampled {
            request: latest,
            result: Ok(still(10)),
        });
        assert!(app.preview.is_some());
    }

    #[test]
    fn playback_loops_back_to_trim_start_at_the_end() {
        let mut app = app_with_clip();
        app.control
            .set_end_time(RationalTime::new(6_000, 600).expect("valid"));
        app.player.seek(RationalTime::new(5_940, 600).expect("valid"));
        app.player.play();

        let _ = app.update(Message::PlayerTick);

        assert!(!app.player.is_playing());
        assert!(app.player.position().is_zero());
        assert_eq!(app.control.range().state().playhead_x, 0.0);
    }

    #[test]
    fn playback_feeds_the_control_without_events() {
        let mut app = app_with_clip();
        app.player.seek(RationalTime::from_secs(3));
        app.player.play();

        let _ = app.update(Message::PlayerTick);

        assert!(app.player.is_playing());
        assert_eq!(
            app.player.position(),
            RationalTime::new(1_980, 600).expect("valid")
        );
        assert!((app.control.absolute_play_time().value - 1_980).abs() <= 1);
    }

    #[test]
    fn window_resize_lays_out_the_control() {
        let mut app = app_with_clip();

        let _ = app.update(Message::WindowResized(432.0));

        assert_eq!(app.control.control_width(), 400.0);
        assert_eq!(app.control.strip().width, 364.0);
    }

    #[test]
    fn polling_publishes_thumbnails() {
        let mut app = app_with_clip();
        let deadline = Instant::now() + Duration::from_secs(2);

        while app.thumbnails.iter().any(Option::is_none) && Instant::now() < deadline {
            let _ = app.update(Message::PollThumbnails);
            std::thread::sleep(Duration::from_millis(10));
        }

        assert_eq!(app.thumbnails.len(), 20);
        assert!(app.thumbnails.iter().all(Option::is_some));
    }
}
