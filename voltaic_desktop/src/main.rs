//! Voltaic Desktop - entry point for the iced application.

use std::time::Instant;

use iced::alignment::Horizontal;
use iced::event::{self, Event};
use iced::time::{self, Duration};
use iced::widget::canvas::{Cache, Canvas};
use iced::widget::{container, stack, text};
use iced::{keyboard, mouse, window};
use iced::{Color, Element, Font, Length, Point, Size, Subscription, Task, Theme};
use tracing_subscriber::EnvFilter;

use voltaic_core::{EffectsConfig, LightningEngine, ParticleField, Rgba};
use voltaic_desktop::canvas::{ParticleLayer, StormLayer};
use voltaic_desktop::theme::{palette, storm_theme, PaletteColors};
use voltaic_desktop::{
    FpsCounter, DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH, TICK_INTERVAL_MS,
};

/// Application state.
struct App {
    field: ParticleField,
    storm: LightningEngine,
    field_cache: Cache,
    storm_cache: Cache,
    palette: PaletteColors,
    bolt_color: Color,
    bolt_glow: Color,
    /// Last known pointer position, used to aim click bolts
    cursor: Option<Point>,
    surface: Size,
    /// Gates the Tick subscription; Space toggles it
    paused: bool,
    fps: FpsCounter,
    show_fps: bool,
    last_tick: Instant,
}

/// Application messages.
#[derive(Debug, Clone)]
enum Message {
    Tick,
    PointerMoved(Point),
    PointerLeft,
    SurfacePressed,
    WindowResized(Size),
    ToggleLightning,
    TogglePause,
}

/// Maps runtime events to messages: pointer tracking, the click trigger,
/// resize, and the keyboard toggles.
fn map_runtime_event(event: Event, _status: event::Status, _window: window::Id) -> Option<Message> {
    match event {
        Event::Mouse(mouse::Event::CursorMoved { position }) => {
            Some(Message::PointerMoved(position))
        }
        Event::Mouse(mouse::Event::CursorLeft) => Some(Message::PointerLeft),
        Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
            Some(Message::SurfacePressed)
        }
        Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized(size)),
        Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => match key.as_ref() {
            keyboard::Key::Character("l") => Some(Message::ToggleLightning),
            keyboard::Key::Named(keyboard::key::Named::Space) => Some(Message::TogglePause),
            _ => None,
        },
        _ => None,
    }
}

/// Loads the effects config, attaching the path context the core error
/// lacks.
fn load_config() -> anyhow::Result<EffectsConfig> {
    use anyhow::Context;
    EffectsConfig::load_or_default().context("reading ~/.voltaic/config.toml")
}

/// Parses a configured hex color, falling back to the palette on failure.
fn color_or(hex: &str, fallback: Color) -> Color {
    match Rgba::from_hex(hex) {
        Ok(rgba) => Color::from_rgba(rgba.r, rgba.g, rgba.b, rgba.a),
        Err(err) => {
            tracing::warn!("falling back to palette color: {err}");
            fallback
        }
    }
}

impl App {
    /// Initializes the application from the config file, falling back to
    /// defaults when it cannot be loaded.
    fn init() -> (Self, Task<Message>) {
        let config = load_config().unwrap_or_else(|err| {
            tracing::warn!("could not load config, using defaults: {err:#}");
            EffectsConfig::default()
        });

        let pal = palette();
        let bolt_color = color_or(&config.lightning.color, pal.bolt);
        let bolt_glow = color_or(&config.lightning.glow_color, pal.bolt_glow);

        let field = ParticleField::new(
            config.particles.clone(),
            DEFAULT_SURFACE_WIDTH,
            DEFAULT_SURFACE_HEIGHT,
        );
        let storm = LightningEngine::new(
            config.lightning.clone(),
            DEFAULT_SURFACE_WIDTH,
            DEFAULT_SURFACE_HEIGHT,
        );

        let app = Self {
            field,
            storm,
            field_cache: Cache::new(),
            storm_cache: Cache::new(),
            palette: pal,
            bolt_color,
            bolt_glow,
            cursor: None,
            surface: Size::new(DEFAULT_SURFACE_WIDTH, DEFAULT_SURFACE_HEIGHT),
            paused: false,
            fps: FpsCounter::new(),
            show_fps: std::env::var("VOLTAIC_DEBUG").unwrap_or_default() == "1",
            last_tick: Instant::now(),
        };
        (app, Task::none())
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => {
                let now = Instant::now();
                let dt = now - self.last_tick;
                self.last_tick = now;

                self.field.tick();
                self.storm.tick(dt);

                self.field_cache.clear();
                self.storm_cache.clear();
                self.fps.frame();
            }
            Message::PointerMoved(position) => {
                self.cursor = Some(position);
                self.field.pointer_moved(position.x, position.y);
            }
            Message::PointerLeft => {
                self.cursor = None;
                self.field.pointer_left();
            }
            Message::SurfacePressed => {
                // A click hurls a bolt from the pointer toward screen center.
                if let Some(position) = self.cursor {
                    self.storm.create_bolt(
                        position.x,
                        position.y,
                        self.surface.width / 2.0,
                        self.surface.height / 2.0,
                    );
                }
            }
            Message::WindowResized(size) => {
                self.surface = size;
                self.field.resize(size.width, size.height);
                self.storm.resize(size.width, size.height);
                self.field_cache.clear();
                self.storm_cache.clear();
            }
            Message::ToggleLightning => {
                if self.storm.is_running() {
                    self.storm.stop();
                } else {
                    self.storm.start();
                }
            }
            Message::TogglePause => {
                self.paused = !self.paused;
                if !self.paused {
                    // Skip the paused span so the scheduler does not fire a
                    // backlog of bolts on resume.
                    self.last_tick = Instant::now();
                }
            }
        }
        Task::none()
    }

    fn subscription(&self) -> Subscription<Message> {
        let events = event::listen_with(map_runtime_event);
        if self.paused {
            return events;
        }
        let ticks = time::every(Duration::from_millis(TICK_INTERVAL_MS)).map(|_| Message::Tick);
        Subscription::batch(vec![events, ticks])
    }

    fn view(&self) -> Element<'_, Message> {
        let particles = Canvas::new(ParticleLayer::<Message>::new(
            &self.field,
            &self.field_cache,
            self.palette,
        ))
        .width(Length::Fill)
        .height(Length::Fill);

        let storm = Canvas::new(StormLayer::<Message>::new(
            &self.storm,
            &self.storm_cache,
            self.bolt_color,
            self.bolt_glow,
            self.palette,
        ))
        .width(Length::Fill)
        .height(Length::Fill);

        let mut layers: Vec<Element<'_, Message>> = vec![particles.into(), storm.into()];
        if self.show_fps {
            layers.push(self.fps_overlay());
        }

        container(stack(layers))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn fps_overlay(&self) -> Element<'_, Message> {
        let pal = self.palette;
        container(
            text(format!("FPS: {}", self.fps.fps()))
                .size(12)
                .font(Font::MONOSPACE)
                .style(move |_| iced::widget::text::Style {
                    color: Some(pal.accent),
                }),
        )
        .padding(10)
        .width(Length::Fill)
        .align_x(Horizontal::Right)
        .into()
    }
}

fn main() -> iced::Result {
    fn get_theme(_: &App) -> Theme {
        storm_theme()
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    iced::application(App::init, App::update, App::view)
        .title("Voltaic")
        .subscription(App::subscription)
        .theme(get_theme)
        .antialiasing(true)
        .run()
}
