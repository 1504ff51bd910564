//! Surface Events for Dot Field RS
//! Host input becomes plain event values, so the engine holds no window or
//! listener references and tests can drive it with a hand-built stream

use egui::Rect;

/// One input notification for a dot field surface.
///
/// Coordinates are surface-local. `PointerMoved` may carry positions
/// outside the surface (the pointer is tracked page-wide); the interaction
/// falloff zeroes those out naturally.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfaceEvent {
    PointerMoved { x: f32, y: f32 },
    PointerLeft,
    Resized { width: f32, height: f32 },
}

/// Translates egui input into `SurfaceEvent`s for one field instance.
///
/// Emits a `Resized` every frame (the field absorbs unchanged sizes), a
/// `PointerMoved` whenever a pointer position is known, and a single
/// `PointerLeft` when the pointer disappears.
#[derive(Default)]
pub struct EventTranslator {
    pointer_was_present: bool,
}

impl EventTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collect(&mut self, ctx: &egui::Context, rect: Rect, out: &mut Vec<SurfaceEvent>) {
        out.push(SurfaceEvent::Resized {
            width: rect.width(),
            height: rect.height(),
        });

        match ctx.input(|i| i.pointer.latest_pos()) {
            Some(pos) => {
                self.pointer_was_present = true;
                out.push(SurfaceEvent::PointerMoved {
                    x: pos.x - rect.left(),
                    y: pos.y - rect.top(),
                });
            }
            None => {
                if self.pointer_was_present {
                    self.pointer_was_present = false;
                    out.push(SurfaceEvent::PointerLeft);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn surface_rect() -> Rect {
        Rect::from_min_size(pos2(100.0, 200.0), vec2(300.0, 150.0))
    }

    fn run_frame(ctx: &egui::Context, events: Vec<egui::Event>) {
        let input = egui::RawInput {
            events,
            ..Default::default()
        };
        let _ = ctx.run(input, |_| {});
    }

    #[test]
    fn reports_size_every_frame_and_no_phantom_leave() {
        let ctx = egui::Context::default();
        run_frame(&ctx, vec![]);

        let mut translator = EventTranslator::new();
        let mut out = Vec::new();
        translator.collect(&ctx, surface_rect(), &mut out);
        assert_eq!(
            out,
            vec![SurfaceEvent::Resized {
                width: 300.0,
                height: 150.0
            }]
        );
    }

    #[test]
    fn pointer_positions_become_surface_local() {
        let ctx = egui::Context::default();
        run_frame(&ctx, vec![egui::Event::PointerMoved(pos2(160.0, 240.0))]);

        let mut translator = EventTranslator::new();
        let mut out = Vec::new();
        translator.collect(&ctx, surface_rect(), &mut out);
        assert!(out.contains(&SurfaceEvent::PointerMoved { x: 60.0, y: 40.0 }));
    }

    #[test]
    fn pointer_gone_emits_a_single_leave() {
        let ctx = egui::Context::default();
        run_frame(&ctx, vec![egui::Event::PointerMoved(pos2(160.0, 240.0))]);

        let mut translator = EventTranslator::new();
        let mut out = Vec::new();
        translator.collect(&ctx, surface_rect(), &mut out);

        run_frame(&ctx, vec![egui::Event::PointerGone]);
        out.clear();
        translator.collect(&ctx, surface_rect(), &mut out);
        assert!(out.contains(&SurfaceEvent::PointerLeft));

        // Still gone next frame: no repeated leave events.
        run_frame(&ctx, vec![]);
        out.clear();
        translator.collect(&ctx, surface_rect(), &mut out);
        assert!(!out.contains(&SurfaceEvent::PointerLeft));
    }
}
