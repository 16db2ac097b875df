/// One launch as a clickable card
///
/// The whole card links to the launch's detail page. The star inside it
/// toggles the favourite flag instead; iced delivers the press to the
/// innermost button only, so a star press never navigates.
use chrono::{DateTime, Utc};
use iced::alignment::Horizontal;
use iced::widget::{button, column, container, image, row, stack, text, Space};
use iced::{Border, ContentFit, Element, Length, Shadow, Theme};

use super::format::{format_local_date, time_ago};
use super::{pill_style, GRAY, GREEN, RED, YELLOW};
use crate::images::CardImages;
use crate::route::Route;
use crate::state::data::LaunchRecord;
use crate::state::favourites::Favourites;
use crate::Message;

pub const CARD_WIDTH: f32 = 360.0;
const HERO_HEIGHT: f32 = 260.0;
const PATCH_HEIGHT: f32 = 75.0;
/// Titles longer than this are cut with an ellipsis
const TITLE_MAX_CHARS: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: &'static str,
    pub tone: Tone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarTone {
    /// Yellow star
    Favourite,
    /// Gray star
    Neutral,
}

/// Prefer the first Flickr photo at the "large" size, else the mission patch
pub fn hero_image_url(launch: &LaunchRecord) -> Option<String> {
    match launch.links.flickr_images.first() {
        Some(photo) => Some(photo.replacen("_o.jpg", "_z.jpg", 1)),
        None => launch.links.mission_patch_small.clone(),
    }
}

/// Unknown outcomes render as "Failed"
pub fn status_badge(launch: &LaunchRecord) -> StatusBadge {
    if launch.is_successful() {
        StatusBadge {
            label: "Successful",
            tone: Tone::Positive,
        }
    } else {
        StatusBadge {
            label: "Failed",
            tone: Tone::Negative,
        }
    }
}

pub fn caption(launch: &LaunchRecord) -> String {
    format!(
        "{} \u{2022} {}",
        launch.rocket.rocket_name, launch.launch_site.site_name
    )
}

pub fn truncate_title(title: &str, max_chars: usize) -> String {
    if title.chars().count() <= max_chars {
        return title.to_string();
    }
    let mut cut: String = title.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('\u{2026}');
    cut
}

pub fn detail_route(launch: &LaunchRecord) -> Route {
    Route::Launch(launch.flight_number)
}

pub fn star_tone(launch: &LaunchRecord, favourites: &Favourites) -> StarTone {
    if favourites.contains(launch.flight_number) {
        StarTone::Favourite
    } else {
        StarTone::Neutral
    }
}

/// Message sent when the card body is pressed
pub fn on_card_press(launch: &LaunchRecord) -> Message {
    Message::Navigate(detail_route(launch))
}

/// Message sent when the star is pressed
pub fn on_star_press(launch: &LaunchRecord) -> Message {
    Message::ToggleFavourite(launch.clone())
}

/// Absolute date in local time and how long ago it was
pub fn date_line(launch: &LaunchRecord, now: DateTime<Utc>) -> (String, String) {
    (
        format_local_date(launch.launch_date_utc),
        time_ago(launch.launch_date_utc, now),
    )
}

/// Favourite star button, shared with the detail page and drawer
pub fn star_button<'a>(launch: &LaunchRecord, favourites: &Favourites) -> Element<'a, Message> {
    let color = match star_tone(launch, favourites) {
        StarTone::Favourite => YELLOW,
        StarTone::Neutral => GRAY,
    };

    button(text("\u{2605}").size(22))
        .padding([2, 8])
        .on_press(on_star_press(launch))
        .style(move |theme: &Theme, status| {
            let mut style = button::text(theme, status);
            style.text_color = color;
            style
        })
        .into()
}

pub fn view<'a>(
    launch: &'a LaunchRecord,
    favourites: &Favourites,
    images: &CardImages,
    now: DateTime<Utc>,
) -> Element<'a, Message> {
    let hero_url = hero_image_url(launch);
    let hero: Element<'a, Message> = match hero_url.as_deref().and_then(|url| images.handle(url)) {
        Some(handle) => image(handle.clone())
            .width(Length::Fill)
            .height(HERO_HEIGHT)
            .content_fit(ContentFit::Cover)
            .into(),
        None if hero_url.as_deref().is_some_and(|url| images.is_loading(url)) => {
            container(text("Loading image...").size(12).color(GRAY))
                .width(Length::Fill)
                .height(HERO_HEIGHT)
                .center_x(Length::Fill)
                .center_y(HERO_HEIGHT)
                .into()
        }
        None => Space::new(Length::Fill, HERO_HEIGHT).into(),
    };

    // Patch badge sits in the top right corner whatever the hero shows
    let patch: Element<'a, Message> = match launch
        .links
        .mission_patch_small
        .as_deref()
        .and_then(|url| images.handle(url))
    {
        Some(handle) => container(
            image(handle.clone())
                .height(PATCH_HEIGHT)
                .content_fit(ContentFit::Contain),
        )
        .width(Length::Fill)
        .align_x(Horizontal::Right)
        .padding(20)
        .into(),
        None => Space::new(Length::Shrink, Length::Shrink).into(),
    };

    let badge = status_badge(launch);
    let badge_color = match badge.tone {
        Tone::Positive => GREEN,
        Tone::Negative => RED,
    };

    let status = row![
        container(text(badge.label).size(12))
            .padding([2, 8])
            .style(move |_theme: &Theme| pill_style(badge_color)),
        text(caption(launch).to_uppercase()).size(12).color(GRAY),
    ]
    .spacing(8)
    .align_y(iced::Alignment::Center);

    let title = row![
        text(truncate_title(&launch.mission_name, TITLE_MAX_CHARS))
            .size(18)
            .width(Length::FillPortion(9)),
        container(star_button(launch, favourites))
            .width(Length::FillPortion(1))
            .align_x(Horizontal::Right),
    ]
    .align_y(iced::Alignment::Center);

    let (date, relative) = date_line(launch, now);
    let dates = row![text(date).size(14), text(relative).size(14).color(GRAY)].spacing(8);

    let body = column![status, title, dates].spacing(6).padding(24);

    button(column![stack![hero, patch], body])
        .padding(0)
        .width(CARD_WIDTH)
        .on_press(on_card_press(launch))
        .style(card_style)
        .into()
}

fn card_style(theme: &Theme, status: button::Status) -> button::Style {
    let palette = theme.extended_palette();
    let background = match status {
        button::Status::Hovered => palette.background.weak.color,
        _ => palette.background.base.color,
    };

    button::Style {
        background: Some(background.into()),
        text_color: palette.background.base.text,
        border: Border {
            color: palette.background.strong.color,
            width: 1.0,
            radius: 8.0.into(),
        },
        shadow: Shadow::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::fixtures::launch;
    use chrono::TimeZone;

    #[test]
    fn test_hero_prefers_large_flickr_photo() {
        let mut record = launch(1, "Demo");
        record.links.flickr_images = vec![
            "https://live.staticflickr.com/65535/49023434262_9cd0c6f0a6_o.jpg".to_string(),
            "https://live.staticflickr.com/65535/second_o.jpg".to_string(),
        ];

        assert_eq!(
            hero_image_url(&record).as_deref(),
            Some("https://live.staticflickr.com/65535/49023434262_9cd0c6f0a6_z.jpg")
        );
    }

    #[test]
    fn test_hero_falls_back_to_mission_patch() {
        let record = launch(1, "Demo");
        assert_eq!(hero_image_url(&record), record.links.mission_patch_small);

        let mut bare = launch(2, "Bare");
        bare.links.mission_patch_small = None;
        assert_eq!(hero_image_url(&bare), None);
    }

    #[test]
    fn test_hero_leaves_other_sizes_alone() {
        let mut record = launch(1, "Demo");
        record.links.flickr_images = vec!["https://farm5.staticflickr.com/123_b.jpg".to_string()];

        assert_eq!(
            hero_image_url(&record).as_deref(),
            Some("https://farm5.staticflickr.com/123_b.jpg")
        );
    }

    #[test]
    fn test_status_badge() {
        let mut record = launch(1, "Demo");

        record.launch_success = Some(false);
        assert_eq!(status_badge(&record).label, "Failed");
        assert_eq!(status_badge(&record).tone, Tone::Negative);

        record.launch_success = Some(true);
        assert_eq!(status_badge(&record).label, "Successful");
        assert_eq!(status_badge(&record).tone, Tone::Positive);

        record.launch_success = None;
        assert_eq!(status_badge(&record).label, "Failed");
    }

    #[test]
    fn test_caption() {
        assert_eq!(caption(&launch(1, "Demo")), "Falcon 9 \u{2022} CCAFS SLC 40");
    }

    #[test]
    fn test_truncate_title() {
        assert_eq!(truncate_title("Starlink 1", 32), "Starlink 1");
        assert_eq!(truncate_title("abcdefghij", 5), "abcd\u{2026}");
        assert_eq!(truncate_title("abcde", 5), "abcde");
    }

    #[test]
    fn test_star_tone_follows_favourites() {
        let record = launch(42, "CRS-20");
        let mut favourites = Favourites::new();
        assert_eq!(star_tone(&record, &favourites), StarTone::Neutral);

        favourites.toggle(&record);
        assert_eq!(star_tone(&record, &favourites), StarTone::Favourite);
    }

    #[test]
    fn test_star_press_never_navigates() {
        let record = launch(42, "CRS-20");

        match on_star_press(&record) {
            Message::ToggleFavourite(toggled) => assert_eq!(toggled.flight_number, 42),
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[test]
    fn test_card_press_navigates_to_flight() {
        let record = launch(42, "CRS-20");

        match on_card_press(&record) {
            Message::Navigate(route) => {
                assert_eq!(route, Route::Launch(42));
                assert!(route.path().contains("42"));
            }
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[test]
    fn test_date_line_relative_part() {
        let record = launch(1, "Demo");
        let now = Utc.with_ymd_and_hms(2019, 11, 14, 14, 56, 0).unwrap();

        let (date, relative) = date_line(&record, now);
        assert!(date.contains("2019"));
        assert_eq!(relative, "3 days ago");
    }
}
