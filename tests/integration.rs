// SPDX-License-Identifier: MPL-2.0
use boutique_showcase::app::config::{self, Config};
use boutique_showcase::domain::editing::{CropTransform, Offset};
use boutique_showcase::domain::media::{MediaKind, MediaSequence, ReorderableMediaList};
use boutique_showcase::domain::video::PlaybackEvent;
use boutique_showcase::i18n::fluent::I18n;
use boutique_showcase::ui::carousel::{
    Carousel, CarouselSettings, CarouselState, Effect, Message, VideoCommand,
};
use iced::Point;
use std::time::Instant;
use tempfile::tempdir;

const PLACEHOLDER: &str = "placeholder://card";

fn carousel(images: &[&str], videos: &[&str]) -> Carousel {
    Carousel::new(
        MediaSequence::build(images, videos),
        PLACEHOLDER,
        CarouselSettings::default(),
    )
}

#[test]
fn test_language_change_via_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let mut initial = Config::default();
    initial.general.language = Some("en-US".to_string());
    config::save_to_path(&initial, &path).expect("Failed to write initial config file");
    let loaded = config::load_from_path(&path).expect("Failed to load initial config");
    assert_eq!(I18n::new(None, &loaded).current_locale().to_string(), "en-US");

    let mut french = Config::default();
    french.general.language = Some("fr".to_string());
    config::save_to_path(&french, &path).expect("Failed to write french config file");
    let loaded = config::load_from_path(&path).expect("Failed to load french config");
    let i18n = I18n::new(None, &loaded);
    assert_eq!(i18n.current_locale().to_string(), "fr");
    assert_eq!(i18n.tr("status-sold-out"), "Épuisé");
}

#[test]
fn test_cli_language_overrides_config() {
    let mut config = Config::default();
    config.general.language = Some("fr".to_string());
    let i18n = I18n::new(Some("en-US".to_string()), &config);
    assert_eq!(i18n.current_locale().to_string(), "en-US");
}

#[test]
fn sequence_puts_images_before_videos() {
    let sequence = MediaSequence::build(["a.jpg", " ", "b.jpg"], ["v.mp4", ""]);
    let urls: Vec<&str> = sequence.iter().map(|item| item.url()).collect();
    assert_eq!(urls, ["a.jpg", "b.jpg", "v.mp4"]);
    assert!(sequence.get(2).is_some_and(|item| item.is_video()));
}

#[test]
fn next_and_previous_are_cyclic() {
    for len in 1..6 {
        let mut state = CarouselState::new(len);
        for _ in 0..len {
            state.next();
        }
        assert_eq!(state.current_index(), Some(0), "next x{len}");
        for _ in 0..len {
            state.previous();
        }
        assert_eq!(state.current_index(), Some(0), "previous x{len}");
    }
}

#[test]
fn carousel_scenario_with_two_images_and_a_video() {
    let now = Instant::now();
    let mut carousel = carousel(&["img1.jpg", "img2.jpg"], &["video1.mp4"]);
    assert_eq!(carousel.state().current_index(), Some(0));
    assert!(carousel.state().is_muted());

    carousel.handle(Message::Next, now);
    carousel.handle(Message::Next, now);
    assert_eq!(carousel.state().current_index(), Some(2));
    assert!(carousel.current_item().is_some_and(|item| item.is_video()));
    assert!(!carousel.state().is_playing());

    let effect = carousel.handle(Message::TogglePlayPause, now);
    assert!(matches!(
        effect,
        Effect::Video(ref commands)
            if matches!(commands.as_slice(), [VideoCommand::Play { index: 2, muted: true, .. }])
    ));
    carousel.handle(
        Message::Playback {
            index: 2,
            event: PlaybackEvent::Started,
        },
        now,
    );
    assert!(carousel.state().is_playing());

    // Leaving the playing video stops it and resets playback.
    let effect = carousel.handle(Message::Next, now);
    assert_eq!(
        effect,
        Effect::Video(vec![VideoCommand::Stop {
            url: "video1.mp4".to_string()
        }])
    );
    assert_eq!(carousel.state().current_index(), Some(0));
    assert!(!carousel.state().is_playing());
}

#[test]
fn empty_sequence_renders_nothing_to_navigate() {
    let now = Instant::now();
    let mut carousel = carousel(&[], &[]);
    assert_eq!(carousel.state().current_index(), None);
    assert!(!carousel.state().has_navigation());
    assert_eq!(carousel.handle(Message::Next, now), Effect::None);
    assert_eq!(carousel.handle(Message::TogglePlayPause, now), Effect::None);
    assert!(carousel.shutdown().is_empty());
}

fn swipe(carousel: &mut Carousel, from: f32, to: f32) {
    let now = Instant::now();
    carousel.handle(Message::PointerMoved(Point::new(from, 10.0)), now);
    carousel.handle(Message::PointerPressed, now);
    carousel.handle(Message::PointerMoved(Point::new(to, 10.0)), now);
    carousel.handle(Message::PointerReleased, now);
}

#[test]
fn swipe_threshold_boundary() {
    let mut exact = carousel(&["a.jpg", "b.jpg", "c.jpg"], &[]);
    swipe(&mut exact, 200.0, 150.0);
    assert_eq!(exact.state().current_index(), Some(0));

    let mut left = carousel(&["a.jpg", "b.jpg", "c.jpg"], &[]);
    swipe(&mut left, 200.0, 149.99);
    assert_eq!(left.state().current_index(), Some(1));

    let mut right = carousel(&["a.jpg", "b.jpg", "c.jpg"], &[]);
    swipe(&mut right, 149.99, 200.0);
    assert_eq!(right.state().current_index(), Some(2));
}

#[test]
fn single_item_never_swipes() {
    let mut single = carousel(&["a.jpg"], &[]);
    swipe(&mut single, 400.0, 0.0);
    assert_eq!(single.state().current_index(), Some(0));
}

#[test]
fn crop_scale_is_clamped_and_reset_restores_identity() {
    let mut transform = CropTransform::new();
    transform.set_scale(5.0);
    assert!((transform.scale().value() - 3.0).abs() < f32::EPSILON);
    transform.set_scale(-1.0);
    assert!((transform.scale().value() - 0.1).abs() < f32::EPSILON);

    transform.set_rotation(450.0);
    transform.rotate_counter_clockwise();
    transform.set_translation(Offset::new(-40.0, 12.5));
    transform.zoom_in();
    transform.reset();
    assert!(transform.is_identity());
    assert_eq!(transform, CropTransform::default());
}

#[test]
fn reorder_scenario_keeps_identities() {
    let mut list = ReorderableMediaList::new();
    let a = list.append(MediaKind::Image, "A.jpg").expect("A");
    let b = list.append(MediaKind::Image, "B.jpg").expect("B");
    let c = list.append(MediaKind::Image, "C.jpg").expect("C");

    assert!(list.move_item(0, 2));
    let order: Vec<_> = list.iter().map(|entry| entry.id).collect();
    assert_eq!(order, [b, c, a]);

    assert!(list.move_item(2, 0));
    let urls: Vec<&str> = list.iter().map(|entry| entry.url.as_str()).collect();
    assert_eq!(urls, ["A.jpg", "B.jpg", "C.jpg"]);

    assert!(list.move_item(0, 2));
    assert!(list.remove(c).is_some());
    let order: Vec<_> = list.iter().map(|entry| entry.id).collect();
    assert_eq!(order, [b, a]);
    assert!(list.remove(c).is_none());

    assert!(list.replace_url(b, "B-cropped.jpg"));
    assert_eq!(list.position(b), Some(0));
    let (images, videos) = list.split();
    assert_eq!(images, ["B-cropped.jpg", "A.jpg"]);
    assert!(videos.is_empty());
}
