use std::marker::PhantomData;

use iced::mouse;
use iced::widget::canvas::{self, Cache, Geometry, Path, Stroke};
use iced::{Color, Point, Rectangle, Theme};

use voltaic_core::{LightningBolt, LightningEngine};

use crate::constants::{BOLT_CORE_WIDTH_FACTOR, BOLT_GLOW_WIDTH_FACTOR};
use crate::theme::PaletteColors;

/// Canvas program for the lightning layer.
///
/// Every live bolt is stroked three times: a wide low-alpha glow pass, the
/// main colored pass, and a narrow white-hot core. Each pass's alpha is
/// scaled by the bolt's current opacity, so fading needs no ambient alpha
/// state on the frame.
pub struct StormLayer<'a, Message> {
    engine: &'a LightningEngine,
    cache: &'a Cache,
    stroke_color: Color,
    glow_color: Color,
    palette: PaletteColors,
    _marker: PhantomData<Message>,
}

impl<'a, Message> StormLayer<'a, Message> {
    pub fn new(
        engine: &'a LightningEngine,
        cache: &'a Cache,
        stroke_color: Color,
        glow_color: Color,
        palette: PaletteColors,
    ) -> Self {
        Self {
            engine,
            cache,
            stroke_color,
            glow_color,
            palette,
            _marker: PhantomData,
        }
    }

    fn bolt_path(bolt: &LightningBolt) -> Path {
        Path::new(|builder| {
            let mut points = bolt.points().iter();
            if let Some(first) = points.next() {
                builder.move_to(Point::new(first.x, first.y));
                for point in points {
                    builder.line_to(Point::new(point.x, point.y));
                }
            }
        })
    }
}

impl<'a, Message> canvas::Program<Message> for StormLayer<'a, Message> {
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
            for bolt in self.engine.bolts() {
                let opacity = bolt.opacity();
                if opacity <= 0.0 {
                    continue;
                }
                let path = Self::bolt_path(bolt);

                let passes = [
                    // Wide glow stands in for a blur around the bolt.
                    (
                        bolt.width() * BOLT_GLOW_WIDTH_FACTOR,
                        Color {
                            a: self.glow_color.a * opacity,
                            ..self.glow_color
                        },
                    ),
                    (
                        bolt.width(),
                        Color {
                            a: opacity,
                            ..self.stroke_color
                        },
                    ),
                    // Luminous center.
                    (
                        bolt.width() * BOLT_CORE_WIDTH_FACTOR,
                        Color {
                            a: opacity,
                            ..self.palette.bolt_core
                        },
                    ),
                ];

                for (width, color) in passes {
                    frame.stroke(
                        &path,
                        Stroke {
                            style: canvas::Style::Solid(color),
                            width,
                            line_cap: canvas::LineCap::Round,
                            line_join: canvas::LineJoin::Round,
                            ..Stroke::default()
                        },
                    );
                }
            }
        });
        vec![layer]
    }
}
