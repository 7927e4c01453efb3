// SPDX-License-Identifier: MPL-2.0
//! One crop session: a fixed source image, an editable transform and a live
//! preview rendered by the same rasterizer used for the final artifact.

use crate::app::config::CropperConfig;
use crate::domain::editing::{CropDrag, CropTransform, Offset};
use crate::domain::ids::MediaId;
use crate::domain::media::RawImage;
use crate::media::crop_raster::{self, CropError, CropGeometry, SourceSurface};
use crate::media::ImageData;
use iced::Point;

/// Identity of a crop session. Completions carrying another id are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    fn next() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Viewport, output size and encoding quality of crop sessions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropSettings {
    pub geometry: CropGeometry,
    pub jpeg_quality: u8,
}

impl CropSettings {
    #[must_use]
    pub fn from_config(config: &CropperConfig) -> Self {
        Self {
            geometry: CropGeometry::new(
                config.aspect_ratio(),
                config.reference_width(),
                config.output_width(),
            ),
            jpeg_quality: config.jpeg_quality(),
        }
    }
}

impl Default for CropSettings {
    fn default() -> Self {
        Self::from_config(&CropperConfig::default())
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    SourceLoaded(ImageData),
    SourceFailed(String),
    ZoomIn,
    ZoomOut,
    ScaleChanged(f32),
    RotateClockwise,
    RotateCounterClockwise,
    RotationChanged(f32),
    Reset,
    PointerMoved(Point),
    PointerPressed,
    PointerReleased,
    PointerLeft,
    Apply,
    Cancel,
}

/// Work the host performs for the session.
#[derive(Debug, Clone)]
pub enum Event {
    None,
    /// Rasterize and encode off the UI thread, then report back with
    /// [`Session::complete`].
    Apply(CropJob),
    Cancelled,
    Failed(CropError),
}

/// Everything needed to produce the cropped JPEG.
#[derive(Debug, Clone)]
pub struct CropJob {
    pub session: SessionId,
    pub target: MediaId,
    pub source: Option<RawImage>,
    pub transform: CropTransform,
    pub settings: CropSettings,
}

impl CropJob {
    /// Runs both rasterization passes and the JPEG encoder.
    ///
    /// # Errors
    ///
    /// Any [`CropError`] from [`crop_raster::apply_crop`].
    pub fn run(&self) -> Result<Vec<u8>, CropError> {
        crop_raster::apply_crop(
            self.source.as_ref(),
            &self.transform,
            &self.settings.geometry,
            self.settings.jpeg_quality,
        )
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    target: MediaId,
    source_url: String,
    settings: CropSettings,
    source: Option<ImageData>,
    /// `source` converted for drawing, built once per load.
    surface: Option<SourceSurface>,
    load_error: Option<String>,
    transform: CropTransform,
    pointer: Option<Offset>,
    drag: Option<CropDrag>,
    preview: Option<ImageData>,
    applying: bool,
}

impl Session {
    /// Opens a session for the media entry `target`; the source is loaded by
    /// the host and delivered with [`Message::SourceLoaded`].
    #[must_use]
    pub fn open(target: MediaId, source_url: impl Into<String>, settings: CropSettings) -> Self {
        let source_url = source_url.into();
        let id = SessionId::next();
        log::debug!("crop session {id:?} opened for {source_url}");
        Self {
            id,
            target,
            source_url,
            settings,
            source: None,
            surface: None,
            load_error: None,
            transform: CropTransform::new(),
            pointer: None,
            drag: None,
            preview: None,
            applying: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn target(&self) -> MediaId {
        self.target
    }

    #[must_use]
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    #[must_use]
    pub fn settings(&self) -> &CropSettings {
        &self.settings
    }

    #[must_use]
    pub fn transform(&self) -> &CropTransform {
        &self.transform
    }

    #[must_use]
    pub fn preview(&self) -> Option<&ImageData> {
        self.preview.as_ref()
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.source.is_some()
    }

    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Whether the converted source used by the preview is ready.
    #[must_use]
    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    #[must_use]
    pub fn is_applying(&self) -> bool {
        self.applying
    }

    /// Controls are live once the source is in and no encode is running.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.is_loaded() && !self.applying
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::SourceLoaded(image) => {
                self.surface = None;
                self.load_error = None;
                match SourceSurface::from_raw(image.raw()) {
                    Ok(surface) => self.surface = Some(surface),
                    Err(err) => {
                        log::warn!("crop source {} unusable: {err}", self.source_url);
                        self.source = None;
                        self.preview = None;
                        return Event::Failed(err);
                    }
                }
                self.source = Some(image);
                self.refresh_preview()
            }
            Message::SourceFailed(reason) => {
                log::warn!("crop source {} failed to load: {reason}", self.source_url);
                self.load_error = Some(reason);
                Event::None
            }
            Message::Cancel => {
                log::debug!("crop session {:?} cancelled", self.id);
                Event::Cancelled
            }
            Message::Apply => self.apply(),
            _ if !self.is_interactive() => Event::None,
            Message::ZoomIn => self.mutate(CropTransform::zoom_in),
            Message::ZoomOut => self.mutate(CropTransform::zoom_out),
            Message::ScaleChanged(value) => self.mutate(|t| t.set_scale(value)),
            Message::RotateClockwise => self.mutate(CropTransform::rotate_clockwise),
            Message::RotateCounterClockwise => {
                self.mutate(CropTransform::rotate_counter_clockwise)
            }
            Message::RotationChanged(degrees) => self.mutate(|t| t.set_rotation(degrees)),
            Message::Reset => self.mutate(CropTransform::reset),
            Message::PointerMoved(position) => {
                let pointer = Offset::new(position.x, position.y);
                self.pointer = Some(pointer);
                match self.drag {
                    Some(drag) => {
                        drag.update(pointer, &mut self.transform);
                        self.refresh_preview()
                    }
                    None => Event::None,
                }
            }
            Message::PointerPressed => {
                if let Some(pointer) = self.pointer {
                    self.drag = Some(CropDrag::begin(pointer, &self.transform));
                }
                Event::None
            }
            Message::PointerReleased => {
                self.drag = None;
                Event::None
            }
            Message::PointerLeft => {
                self.drag = None;
                self.pointer = None;
                Event::None
            }
        }
    }

    fn mutate(&mut self, change: impl FnOnce(&mut CropTransform)) -> Event {
        change(&mut self.transform);
        self.refresh_preview()
    }

    fn refresh_preview(&mut self) -> Event {
        let Some(surface) = &self.surface else {
            return Event::None;
        };
        match crop_raster::render_surface(surface, &self.transform, &self.settings.geometry) {
            Ok(raw) => {
                self.preview = Some(ImageData::from_raw(raw));
                Event::None
            }
            Err(err) => {
                log::warn!("crop preview failed: {err}");
                self.preview = None;
                Event::Failed(err)
            }
        }
    }

    fn apply(&mut self) -> Event {
        if self.applying {
            return Event::None;
        }
        let Some(source) = &self.source else {
            return Event::Failed(CropError::SourceNotLoaded);
        };
        self.applying = true;
        self.drag = None;
        log::debug!("crop session {:?} applying", self.id);
        Event::Apply(CropJob {
            session: self.id,
            target: self.target,
            source: Some(source.raw().clone()),
            transform: self.transform,
            settings: self.settings,
        })
    }

    /// Feeds back the result of a [`CropJob`] and its upload. Returns `false`
    /// when the completion belongs to another session.
    pub fn complete<E: std::fmt::Display>(&mut self, session: SessionId, result: &Result<(), E>) -> bool {
        if session != self.id {
            log::debug!("ignoring stale crop completion {session:?}");
            return false;
        }
        self.applying = false;
        if let Err(err) = result {
            log::warn!("crop session {:?} failed: {err}", self.id);
        }
        true
    }
}
