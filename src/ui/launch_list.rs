/// Grid of past launches with incremental loading
use chrono::{DateTime, Utc};
use iced::widget::{button, column, container, scrollable, text};
use iced::{Element, Length, Pixels};
use iced_aw::Wrap;

use super::{error_banner, launch_card};
use crate::api::{PageQuery, SortOrder};
use crate::images::CardImages;
use crate::state::favourites::Favourites;
use crate::state::pages::Paginator;
use crate::Message;

pub const PAGE_SIZE: u32 = 12;
pub const RESOURCE: &str = "/launches/past";

/// Most recent launches first
pub fn query() -> PageQuery {
    PageQuery {
        limit: PAGE_SIZE,
        order: SortOrder::Desc,
        sort: "launch_date_utc",
    }
}

/// What the load-more control shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMore {
    Loading,
    ReachedEnd,
    Ready,
}

impl LoadMore {
    pub fn of(paginator: &Paginator) -> Self {
        if paginator.is_validating() {
            LoadMore::Loading
        } else if paginator.is_reaching_end(PAGE_SIZE as usize) {
            LoadMore::ReachedEnd
        } else {
            LoadMore::Ready
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LoadMore::Loading => "Loading...",
            LoadMore::ReachedEnd => "That's all!",
            LoadMore::Ready => "Load more...",
        }
    }

    /// Message to send on press; None leaves the control disabled
    pub fn on_press(self) -> Option<Message> {
        match self {
            LoadMore::Ready => Some(Message::LoadMore),
            LoadMore::Loading | LoadMore::ReachedEnd => None,
        }
    }
}

pub fn view<'a>(
    paginator: &'a Paginator,
    favourites: &'a Favourites,
    images: &'a CardImages,
    now: DateTime<Utc>,
) -> Element<'a, Message> {
    let mut content = column![].spacing(24).padding(24).width(Length::Fill);

    // Shown next to whatever was already loaded
    if paginator.error().is_some() {
        content = content.push(error_banner());
    }

    let cards: Vec<Element<'a, Message>> = paginator
        .flattened()
        .map(|launch| launch_card::view(launch, favourites, images, now))
        .collect();
    content = content.push(
        Wrap::with_elements(cards)
            .spacing(Pixels(16.0))
            .line_spacing(Pixels(16.0)),
    );

    let state = LoadMore::of(paginator);
    let load_more = button(text(state.label()).size(16))
        .padding([10, 24])
        .on_press_maybe(state.on_press());
    content = content.push(container(load_more).width(Length::Fill).center_x(Length::Fill));

    scrollable(content).height(Length::Fill).into()
}
