use chrono::{DateTime, Utc};
use iced::widget::{column, row};
use iced::{Element, Length, Subscription, Task, Theme};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod images;
mod route;
mod state;
mod ui;

use api::{FetchError, SpaceXClient};
use config::Config;
use images::{CardImages, ImageError};
use route::Route;
use state::data::LaunchRecord;
use state::favourites::{Favourites, Toggled};
use state::library::Library;
use state::pages::Paginator;
use ui::launch_card::hero_image_url;
use ui::launch_list::{self, RESOURCE};

/// Main application state
struct LaunchDeck {
    client: SpaceXClient,
    /// Favourites persistence; None when no database could be opened
    library: Option<Library>,
    /// Owned here and lent to every view that shows a star
    favourites: Favourites,
    paginator: Paginator,
    images: CardImages,
    image_cache_dir: PathBuf,
    route: Route,
    drawer_open: bool,
    /// Reference instant for "time ago" labels
    now: DateTime<Utc>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// A launches page came back (page index, outcome)
    PageLoaded(u32, Result<Vec<LaunchRecord>, FetchError>),
    /// User pressed "Load more..."
    LoadMore,
    /// User pressed a star
    ToggleFavourite(LaunchRecord),
    Navigate(Route),
    ToggleDrawer,
    /// A card image finished downloading (url, cached file)
    ImageLoaded(String, Result<PathBuf, ImageError>),
    /// Refresh relative dates
    Tick,
}

impl LaunchDeck {
    fn new(config: Config, client: SpaceXClient, route: Route) -> (Self, Task<Message>) {
        let library = open_library(&config);
        let favourites = match library.as_ref().map(Library::load_favourites) {
            Some(Ok(records)) => Favourites::from_records(records),
            Some(Err(err)) => {
                tracing::warn!(error = %err, "could not load favourites");
                Favourites::new()
            }
            None => Favourites::new(),
        };
        tracing::info!(count = favourites.len(), "favourites loaded");

        let mut app = LaunchDeck {
            client,
            library,
            favourites,
            paginator: Paginator::new(),
            images: CardImages::new(),
            image_cache_dir: config
                .image_cache_dir
                .unwrap_or_else(images::default_cache_dir),
            route,
            drawer_open: false,
            now: Utc::now(),
        };

        let first_page = match app.paginator.start() {
            Some(page) => app.fetch_page(page),
            None => Task::none(),
        };
        // Opened straight onto a favourite from an earlier session
        let detail_images = match route {
            Route::Launch(flight_number) => {
                let urls = app
                    .find_launch(flight_number)
                    .map(|launch| card_image_urls(std::slice::from_ref(launch)))
                    .unwrap_or_default();
                app.load_images(urls)
            }
            Route::Launches => Task::none(),
        };
        (app, Task::batch([first_page, detail_images]))
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PageLoaded(page, Ok(records)) => {
                let urls = card_image_urls(&records);
                self.paginator.page_loaded(page, records);
                self.log_list_state();
                self.load_images(urls)
            }
            Message::PageLoaded(page, Err(error)) => {
                self.paginator.page_failed(page, error);
                self.log_list_state();
                Task::none()
            }
            Message::LoadMore => match self.paginator.load_more() {
                Some(page) => self.fetch_page(page),
                None => Task::none(),
            },
            Message::ToggleFavourite(launch) => {
                let toggled = self.favourites.toggle(&launch);
                tracing::info!(flight = launch.flight_number, ?toggled, "favourite toggled");
                self.persist_favourite(&launch, toggled);
                Task::none()
            }
            Message::Navigate(route) => {
                tracing::debug!(path = %route.path(), "navigating");
                self.route = route;
                match route {
                    Route::Launch(flight_number) => {
                        let urls = self
                            .find_launch(flight_number)
                            .map(|launch| card_image_urls(std::slice::from_ref(launch)))
                            .unwrap_or_default();
                        self.load_images(urls)
                    }
                    Route::Launches => Task::none(),
                }
            }
            Message::ToggleDrawer => {
                self.drawer_open = !self.drawer_open;
                Task::none()
            }
            Message::ImageLoaded(url, result) => {
                self.images.finish(url, result);
                Task::none()
            }
            Message::Tick => {
                self.now = Utc::now();
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<Message> {
        let body = match self.route {
            Route::Launches => {
                launch_list::view(&self.paginator, &self.favourites, &self.images, self.now)
            }
            Route::Launch(flight_number) => ui::launch_detail::view(
                flight_number,
                self.find_launch(flight_number),
                &self.favourites,
                &self.images,
                self.now,
            ),
        };

        let main = column![ui::header(self.route, self.favourites.len()), body]
            .width(Length::Fill)
            .height(Length::Fill);

        if self.drawer_open {
            row![main, ui::favourites_drawer::view(&self.favourites)].into()
        } else {
            main.into()
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        iced::time::every(Duration::from_secs(30)).map(|_| Message::Tick)
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn fetch_page(&self, page: u32) -> Task<Message> {
        let client = self.client.clone();
        Task::perform(
            async move {
                client
                    .fetch_page(RESOURCE, &launch_list::query(), page)
                    .await
            },
            move |result| Message::PageLoaded(page, result),
        )
    }

    /// Download every image not already loading or loaded
    fn load_images(&mut self, urls: Vec<String>) -> Task<Message> {
        let tasks = self.images.claim(urls).into_iter().map(|url| {
            let future = images::load_card_image(
                self.client.clone(),
                url.clone(),
                self.image_cache_dir.clone(),
            );
            Task::perform(future, move |result| Message::ImageLoaded(url.clone(), result))
        });
        Task::batch(tasks)
    }

    /// Loaded pages first, then favourites from earlier sessions
    fn find_launch(&self, flight_number: u32) -> Option<&LaunchRecord> {
        self.paginator.find(flight_number).or_else(|| {
            self.favourites
                .iter()
                .find(|launch| launch.flight_number == flight_number)
        })
    }

    fn persist_favourite(&self, launch: &LaunchRecord, toggled: Toggled) {
        let Some(library) = &self.library else {
            return;
        };

        let result = match toggled {
            Toggled::Added => library.save_favourite(launch),
            Toggled::Removed => library.remove_favourite(launch.flight_number).map(|_| ()),
        };
        if let Err(err) = result {
            tracing::warn!(flight = launch.flight_number, error = %err, "could not save favourite");
        }
    }

    fn log_list_state(&self) {
        tracing::debug!(
            size = self.paginator.size(),
            items = self.paginator.total_items(),
            validating = self.paginator.is_validating(),
            error = ?self.paginator.error(),
            "launch list state"
        );
    }
}

/// Hero and patch images a card needs
fn card_image_urls(records: &[LaunchRecord]) -> Vec<String> {
    records
        .iter()
        .flat_map(|launch| [hero_image_url(launch), launch.links.mission_patch_small.clone()])
        .flatten()
        .collect()
}

/// Open the configured database, falling back to an in-memory one
fn open_library(config: &Config) -> Option<Library> {
    let opened = match config.database_path.clone().or_else(Library::default_path) {
        Some(path) => Library::open(&path),
        None => Library::open_in_memory(),
    };

    match opened.or_else(|err| {
        tracing::warn!(error = %err, "favourites will not persist across restarts");
        Library::open_in_memory()
    }) {
        Ok(library) => Some(library),
        Err(err) => {
            tracing::error!(error = %err, "no favourites database available");
            None
        }
    }
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_env("LAUNCH_DECK_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> iced::Result {
    let config = Config::load();
    init_tracing(&config);

    let client = match SpaceXClient::new(config.api_base_url.clone()) {
        Ok(client) => client,
        Err(err) => {
            tracing::error!(error = %err, "could not build HTTP client");
            std::process::exit(1);
        }
    };
    // Optional start path, e.g. `launch-deck /launches/86`
    let route = match std::env::args().nth(1) {
        Some(path) => Route::parse(&path).unwrap_or_else(|| {
            tracing::warn!(%path, "unknown start path, showing launches");
            Route::Launches
        }),
        None => Route::Launches,
    };
    tracing::info!(api = %config.api_base_url, path = %route.path(), "starting launch deck");

    iced::application("Launch Deck", LaunchDeck::update, LaunchDeck::view)
        .subscription(LaunchDeck::subscription)
        .theme(LaunchDeck::theme)
        .window_size((1280.0, 860.0))
        .centered()
        .run_with(move || LaunchDeck::new(config, client, route))
}
