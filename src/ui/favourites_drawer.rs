/// Side panel with the user's favourite launches
use iced::widget::{button, column, container, row, scrollable, text, Space};
use iced::{Element, Length, Theme};

use super::format::format_local_date;
use super::launch_card::{detail_route, star_button, truncate_title};
use super::GRAY;
use crate::state::data::LaunchRecord;
use crate::state::favourites::Favourites;
use crate::Message;

const DRAWER_WIDTH: f32 = 340.0;

/// Same local-time date the launch's card shows
pub fn entry_date(launch: &LaunchRecord) -> String {
    format_local_date(launch.launch_date_utc)
}

pub fn view<'a>(favourites: &'a Favourites) -> Element<'a, Message> {
    let heading = row![
        text(format!("Favourite launches ({})", favourites.len())).size(20),
        Space::with_width(Length::Fill),
        button(text("Close").size(14))
            .style(button::text)
            .on_press(Message::ToggleDrawer),
    ]
    .align_y(iced::Alignment::Center);

    let mut list = column![].spacing(12);
    if favourites.is_empty() {
        list = list.push(text("You have no favourite launches yet.").size(14).color(GRAY));
    }

    for launch in favourites.iter() {
        let entry = column![
            text(truncate_title(&launch.mission_name, 28)).size(16),
            text(entry_date(launch)).size(12).color(GRAY),
        ]
        .spacing(2);

        let open = button(entry)
            .width(Length::Fill)
            .style(button::text)
            .on_press(Message::Navigate(detail_route(launch)));

        list = list.push(
            row![open, star_button(launch, favourites)].align_y(iced::Alignment::Center),
        );
    }

    container(column![heading, scrollable(list)].spacing(16))
        .padding(20)
        .width(DRAWER_WIDTH)
        .height(Length::Fill)
        .style(|theme: &Theme| {
            let palette = theme.extended_palette();
            container::Style {
                background: Some(palette.background.weak.color.into()),
                ..container::Style::default()
            }
        })
        .into()
}
