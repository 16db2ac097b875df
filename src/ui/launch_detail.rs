/// Detail page for a single launch
///
/// Renders from the records already on hand; nothing is refetched.
use chrono::{DateTime, Utc};
use iced::widget::{button, column, container, image, row, scrollable, text, Space};
use iced::{ContentFit, Element, Length, Theme};

use super::format::{format_date_time, time_ago};
use super::launch_card::{caption, hero_image_url, star_button, status_badge, Tone};
use super::{pill_style, GRAY, GREEN, RED};
use crate::images::CardImages;
use crate::route::Route;
use crate::state::data::LaunchRecord;
use crate::state::favourites::Favourites;
use crate::Message;

/// Rows of (label, value) shown under the title
pub fn facts(launch: &LaunchRecord) -> Vec<(&'static str, String)> {
    let mut facts = vec![
        ("Flight", format!("#{}", launch.flight_number)),
        ("Rocket", launch.rocket.rocket_name.clone()),
        (
            "Launch site",
            launch
                .launch_site
                .site_name_long
                .clone()
                .unwrap_or_else(|| launch.launch_site.site_name.clone()),
        ),
        ("Launch date", format_date_time(&launch.launch_date_utc)),
    ];
    if let Some(wikipedia) = &launch.links.wikipedia {
        facts.push(("Wikipedia", wikipedia.clone()));
    }
    if let Some(video) = &launch.links.video_link {
        facts.push(("Video", video.clone()));
    }
    facts
}

pub fn view<'a>(
    flight_number: u32,
    launch: Option<&'a LaunchRecord>,
    favourites: &'a Favourites,
    images: &'a CardImages,
    now: DateTime<Utc>,
) -> Element<'a, Message> {
    let back = button(text("\u{2190} Back to launches").size(14))
        .style(button::text)
        .on_press(Message::Navigate(Route::Launches));

    let Some(launch) = launch else {
        return container(
            column![
                back,
                text(format!("Launch #{} is not loaded.", flight_number)).size(20),
            ]
            .spacing(16),
        )
        .padding(24)
        .into();
    };

    let hero: Element<'a, Message> = match hero_image_url(launch)
        .as_deref()
        .and_then(|url| images.handle(url))
    {
        Some(handle) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fixed(360.0))
            .content_fit(ContentFit::Cover)
            .into(),
        None => Space::with_height(Length::Fixed(24.0)).into(),
    };

    let badge = status_badge(launch);
    let badge_color = match badge.tone {
        Tone::Positive => GREEN,
        Tone::Negative => RED,
    };

    let title = row![
        text(&launch.mission_name).size(32),
        Space::with_width(Length::Fill),
        star_button(launch, favourites),
    ]
    .align_y(iced::Alignment::Center);

    let status = row![
        container(text(badge.label).size(14))
            .padding([2, 8])
            .style(move |_theme: &Theme| pill_style(badge_color)),
        text(caption(launch).to_uppercase()).size(14).color(GRAY),
        text(time_ago(launch.launch_date_utc, now)).size(14).color(GRAY),
    ]
    .spacing(12)
    .align_y(iced::Alignment::Center);

    let mut facts_column = column![].spacing(6);
    for (label, value) in facts(launch) {
        facts_column = facts_column.push(
            row![
                text(label).size(14).color(GRAY).width(Length::Fixed(120.0)),
                text(value).size(14),
            ]
            .spacing(12),
        );
    }

    let mut content = column![back, hero, title, status, facts_column]
        .spacing(16)
        .padding(24);
    if let Some(details) = &launch.details {
        content = content.push(text(details).size(16));
    }

    scrollable(content).height(Length::Fill).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::fixtures::launch;

    #[test]
    fn test_facts_use_long_site_name() {
        let record = launch(86, "Starlink 1");
        let facts = facts(&record);

        assert_eq!(facts[0], ("Flight", "#86".to_string()));
        assert_eq!(
            facts[2].1,
            "Cape Canaveral Air Force Station Space Launch Complex 40"
        );
        assert_eq!(facts.len(), 4);
    }

    #[test]
    fn test_facts_include_links_when_present() {
        let mut record = launch(86, "Starlink 1");
        record.launch_site.site_name_long = None;
        record.links.wikipedia = Some("https://en.wikipedia.org/wiki/Starlink".to_string());

        let facts = facts(&record);
        assert_eq!(facts[2].1, "CCAFS SLC 40");
        assert_eq!(facts.last().map(|f| f.0), Some("Wikipedia"));
    }
}
