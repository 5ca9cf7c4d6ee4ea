use std::marker::PhantomData;

use iced::advanced::graphics::gradient;
use iced::mouse;
use iced::widget::canvas::{self, Cache, Geometry, Path, Stroke};
use iced::{Color, Point, Rectangle, Theme};

use voltaic_core::ParticleField;

use crate::constants::{LINK_WIDTH, PARTICLE_GLOW_ALPHA, PARTICLE_GLOW_RADIUS_FACTOR};
use crate::theme::{hsla, PaletteColors};

/// Canvas program for the drifting particle field and its proximity links.
///
/// Draw-only: all state lives in the [`ParticleField`] and the cache is
/// cleared by the tick handler, so every frame re-renders the current state.
pub struct ParticleLayer<'a, Message> {
    field: &'a ParticleField,
    cache: &'a Cache,
    palette: PaletteColors,
    _marker: PhantomData<Message>,
}

impl<'a, Message> ParticleLayer<'a, Message> {
    pub fn new(field: &'a ParticleField, cache: &'a Cache, palette: PaletteColors) -> Self {
        Self {
            field,
            cache,
            palette,
            _marker: PhantomData,
        }
    }
}

impl<'a, Message> canvas::Program<Message> for ParticleLayer<'a, Message> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let layer = self.cache.draw(renderer, bounds.size(), |frame| {
            // Night-sky backdrop, slightly lifted toward the bottom.
            let backdrop = Path::rectangle(Point::ORIGIN, bounds.size());
            let sky = gradient::Linear::new(Point::ORIGIN, Point::new(0.0, bounds.height))
                .add_stop(0.0, self.palette.background)
                .add_stop(1.0, self.palette.surface);
            frame.fill(&backdrop, sky);

            for particle in self.field.particles() {
                let center = Point::new(particle.x, particle.y);
                let color = hsla(particle.hue, 1.0, 0.6, particle.opacity);

                frame.fill(&Path::circle(center, particle.size), color);

                // Soft glow: a wider fill at a fraction of the alpha.
                frame.fill(
                    &Path::circle(center, particle.size * PARTICLE_GLOW_RADIUS_FACTOR),
                    Color {
                        a: particle.opacity * PARTICLE_GLOW_ALPHA,
                        ..color
                    },
                );
            }

            for link in self.field.links() {
                let stroke = Stroke {
                    style: canvas::Style::Solid(Color {
                        a: link.alpha,
                        ..self.palette.link
                    }),
                    width: LINK_WIDTH,
                    line_cap: canvas::LineCap::Round,
                    ..Stroke::default()
                };
                frame.stroke(
                    &Path::line(
                        Point::new(link.ax, link.ay),
                        Point::new(link.bx, link.by),
                    ),
                    stroke,
                );
            }
        });
        vec![layer]
    }
}
