// SPDX-License-Identifier: MPL-2.0
//! Media editor component: the reorderable list, pointer drag-and-drop and an
//! eagerly loaded thumbnail per image tile.

use crate::domain::ids::MediaId;
use crate::domain::media::{MediaEntry, MediaKind, ReorderableMediaList};
use crate::ui::lazy_image::{self, LazyImage, LoadMode};
use std::collections::HashMap;
use std::time::Instant;

#[derive(Debug, Clone)]
pub enum Message {
    /// Pointer went down on a tile body.
    TilePressed(MediaId),
    TileEntered(MediaId),
    TileExited(MediaId),
    /// Pointer went up anywhere over the editor.
    Released,
    Remove(MediaId),
    Crop(MediaId),
    Thumbnail { id: MediaId, message: lazy_image::Message },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    Thumbnail { id: MediaId, effect: lazy_image::Effect },
    /// The operator asked to crop an image entry.
    CropRequested { id: MediaId, url: String },
    Reordered,
    Removed(MediaId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DragState {
    source: MediaId,
    hovered: Option<MediaId>,
}

#[derive(Debug, Clone)]
pub struct MediaEditor {
    list: ReorderableMediaList,
    placeholder: String,
    thumbnails: HashMap<MediaId, LazyImage>,
    drag: Option<DragState>,
}

impl MediaEditor {
    #[must_use]
    pub fn new(list: ReorderableMediaList, placeholder: impl Into<String>) -> Self {
        let placeholder = placeholder.into();
        let thumbnails = list
            .iter()
            .filter(|entry| entry.kind == MediaKind::Image)
            .map(|entry| (entry.id, thumbnail(&entry.url, &placeholder)))
            .collect();
        Self {
            list,
            placeholder,
            thumbnails,
            drag: None,
        }
    }

    /// Initial thumbnail fetches.
    pub fn start(&mut self) -> Vec<(MediaId, lazy_image::Effect)> {
        self.thumbnails
            .iter_mut()
            .map(|(id, image)| (*id, image.start()))
            .filter(|(_, effect)| *effect != lazy_image::Effect::None)
            .collect()
    }

    #[must_use]
    pub fn list(&self) -> &ReorderableMediaList {
        &self.list
    }

    #[must_use]
    pub fn thumbnail(&self, id: MediaId) -> Option<&LazyImage> {
        self.thumbnails.get(&id)
    }

    #[must_use]
    pub fn drag_source(&self) -> Option<MediaId> {
        self.drag.map(|drag| drag.source)
    }

    /// Tile currently under the pointer while a drag is in progress.
    #[must_use]
    pub fn drop_target(&self) -> Option<MediaId> {
        self.drag
            .and_then(|drag| drag.hovered)
            .filter(|target| Some(*target) != self.drag_source())
    }

    /// Adds an uploaded entry and starts its thumbnail.
    pub fn append(&mut self, kind: MediaKind, url: &str) -> Option<(MediaId, lazy_image::Effect)> {
        let id = self.list.append(kind, url)?;
        let effect = match kind {
            MediaKind::Image => {
                let mut image = thumbnail(url, &self.placeholder);
                let effect = image.start();
                self.thumbnails.insert(id, image);
                effect
            }
            MediaKind::Video => lazy_image::Effect::None,
        };
        Some((id, effect))
    }

    /// Points an entry at a new url (after a crop) and reloads its thumbnail.
    pub fn replace_url(&mut self, id: MediaId, url: &str) -> Option<lazy_image::Effect> {
        if !self.list.replace_url(id, url) {
            return None;
        }
        let mut image = thumbnail(url, &self.placeholder);
        let effect = image.start();
        self.thumbnails.insert(id, image);
        Some(effect)
    }

    #[must_use]
    pub fn is_fading(&self, now: Instant) -> bool {
        self.thumbnails.values().any(|image| image.is_fading(now))
    }

    pub fn update(&mut self, message: Message, now: Instant) -> Event {
        match message {
            Message::TilePressed(id) => {
                self.drag = Some(DragState {
                    source: id,
                    hovered: Some(id),
                });
                Event::None
            }
            Message::TileEntered(id) => {
                if let Some(drag) = &mut self.drag {
                    drag.hovered = Some(id);
                }
                Event::None
            }
            Message::TileExited(id) => {
                if let Some(drag) = &mut self.drag {
                    if drag.hovered == Some(id) {
                        drag.hovered = None;
                    }
                }
                Event::None
            }
            Message::Released => self.finish_drag(),
            Message::Remove(id) => match self.list.remove(id) {
                Some(_) => {
                    self.thumbnails.remove(&id);
                    if self.drag_source() == Some(id) {
                        self.drag = None;
                    }
                    Event::Removed(id)
                }
                None => Event::None,
            },
            Message::Crop(id) => match self.list.get(id) {
                Some(MediaEntry {
                    kind: MediaKind::Image,
                    url,
                    ..
                }) => Event::CropRequested {
                    id,
                    url: url.clone(),
                },
                _ => Event::None,
            },
            Message::Thumbnail { id, message } => match self.thumbnails.get_mut(&id) {
                Some(image) => match image.update(message, now) {
                    lazy_image::Effect::None => Event::None,
                    effect => Event::Thumbnail { id, effect },
                },
                None => Event::None,
            },
        }
    }

    fn finish_drag(&mut self) -> Event {
        let Some(drag) = self.drag.take() else {
            return Event::None;
        };
        let Some(target) = drag.hovered else {
            return Event::None;
        };
        let (Some(from), Some(to)) = (self.list.position(drag.source), self.list.position(target))
        else {
            return Event::None;
        };
        if self.list.move_item(from, to) {
            log::debug!("media moved from {from} to {to}");
            Event::Reordered
        } else {
            Event::None
        }
    }
}

fn thumbnail(url: &str, placeholder: &str) -> LazyImage {
    LazyImage::new(url, placeholder, LoadMode::Eager)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> MediaEditor {
        let list = ReorderableMediaList::from_parts(
            &["A".into(), "B".into(), "C".into()],
            &["V".into()],
        );
        MediaEditor::new(list, "ph")
    }

    fn ids(editor: &MediaEditor) -> Vec<MediaId> {
        editor.list().iter().map(|entry| entry.id).collect()
    }

    fn urls(editor: &MediaEditor) -> Vec<String> {
        editor.list().iter().map(|entry| entry.url.clone()).collect()
    }

    #[test]
    fn start_fetches_every_image_thumbnail() {
        let mut editor = editor();
        let effects = editor.start();
        assert_eq!(effects.len(), 3);
        assert!(effects
            .iter()
            .all(|(_, effect)| matches!(effect, lazy_image::Effect::Fetch(_))));
    }

    #[test]
    fn release_over_another_tile_moves() {
        let mut editor = editor();
        let now = Instant::now();
        let ids = ids(&editor);

        editor.update(Message::TilePressed(ids[2]), now);
        editor.update(Message::TileExited(ids[2]), now);
        editor.update(Message::TileEntered(ids[0]), now);
        assert_eq!(editor.drop_target(), Some(ids[0]));
        assert_eq!(editor.update(Message::Released, now), Event::Reordered);
        assert_eq!(urls(&editor), ["C", "A", "B", "V"]);
        assert_eq!(editor.drag_source(), None);
    }

    #[test]
    fn release_on_source_or_outside_cancels() {
        let mut editor = editor();
        let now = Instant::now();
        let ids = ids(&editor);

        editor.update(Message::TilePressed(ids[1]), now);
        assert_eq!(editor.update(Message::Released, now), Event::None);

        editor.update(Message::TilePressed(ids[1]), now);
        editor.update(Message::TileExited(ids[1]), now);
        assert_eq!(editor.update(Message::Released, now), Event::None);
        assert_eq!(urls(&editor), ["A", "B", "C", "V"]);
    }

    #[test]
    fn crop_is_offered_for_images_only() {
        let mut editor = editor();
        let now = Instant::now();
        let ids = ids(&editor);
        assert_eq!(
            editor.update(Message::Crop(ids[0]), now),
            Event::CropRequested {
                id: ids[0],
                url: "A".into()
            }
        );
        assert_eq!(editor.update(Message::Crop(ids[3]), now), Event::None);
    }

    #[test]
    fn replace_url_restarts_thumbnail() {
        let mut editor = editor();
        editor.start();
        let id = ids(&editor)[1];
        assert_eq!(
            editor.replace_url(id, "B2"),
            Some(lazy_image::Effect::Fetch("B2".into()))
        );
        assert_eq!(urls(&editor), ["A", "B2", "C", "V"]);
        assert_eq!(editor.replace_url(MediaId::new(), "x"), None);
    }

    #[test]
    fn remove_drops_thumbnail() {
        let mut editor = editor();
        let now = Instant::now();
        let id = ids(&editor)[0];
        assert_eq!(editor.update(Message::Remove(id), now), Event::Removed(id));
        assert!(editor.thumbnail(id).is_none());
        assert_eq!(editor.update(Message::Remove(id), now), Event::None);
    }

    #[test]
    fn appended_video_has_no_thumbnail() {
        let mut editor = editor();
        let (id, effect) = editor.append(MediaKind::Video, "v2.mp4").expect("appended");
        assert_eq!(effect, lazy_image::Effect::None);
        assert!(editor.thumbnail(id).is_none());
        assert_eq!(editor.list().len(), 5);
    }
}
