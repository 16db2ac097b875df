/// User interface module
///
/// Views are plain functions from state to `Element`; interaction is
/// reported back as `Message`s:
/// - Launch grid with pagination (launch_list.rs)
/// - Single launch card (launch_card.rs)
/// - Launch detail page (launch_detail.rs)
/// - Favourites side panel (favourites_drawer.rs)
/// - Date formatting (format.rs)

pub mod favourites_drawer;
pub mod format;
pub mod launch_card;
pub mod launch_detail;
pub mod launch_list;

use iced::widget::{button, container, row, text, Space};
use iced::{Border, Color, Element, Length, Theme};

use crate::route::Route;
use crate::Message;

pub const GRAY: Color = Color::from_rgb(0.44, 0.5, 0.59);
pub const YELLOW: Color = Color::from_rgb(0.93, 0.79, 0.29);
pub const GREEN: Color = Color::from_rgb(0.22, 0.63, 0.41);
pub const RED: Color = Color::from_rgb(0.9, 0.24, 0.24);

/// Coloured pill behind a short label
pub fn pill_style(background: Color) -> container::Style {
    container::Style {
        background: Some(background.into()),
        text_color: Some(Color::WHITE),
        border: Border {
            radius: 4.0.into(),
            ..Border::default()
        },
        ..container::Style::default()
    }
}

/// Generic failure banner. Carries no detail about what went wrong.
pub fn error_banner<'a>() -> Element<'a, Message> {
    container(text("There was an error processing your request").size(16))
        .padding(12)
        .width(Length::Fill)
        .style(|_theme: &Theme| pill_style(RED))
        .into()
}

/// "Home / Launches" trail plus the favourites toggle
pub fn header<'a>(route: Route, favourite_count: usize) -> Element<'a, Message> {
    let mut trail = row![].spacing(8);
    let crumbs = route.breadcrumbs();
    let last = crumbs.len().saturating_sub(1);

    for (index, (label, target)) in crumbs.into_iter().enumerate() {
        let crumb: Element<'a, Message> = match target {
            Some(target) => button(text(label).size(14))
                .padding(0)
                .style(button::text)
                .on_press(Message::Navigate(target))
                .into(),
            None => text(label).size(14).into(),
        };
        trail = trail.push(crumb);
        if index < last {
            trail = trail.push(text("/").size(14).color(GRAY));
        }
    }

    let favourites = button(text(format!("Favourites ({})", favourite_count)).size(14))
        .padding([6, 12])
        .style(button::secondary)
        .on_press(Message::ToggleDrawer);

    row![trail, Space::with_width(Length::Fill), favourites]
        .align_y(iced::Alignment::Center)
        .padding([12, 24])
        .into()
}
