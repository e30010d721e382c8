use duet_engine::core::{App, AppControl, FrameCtx};
use duet_engine::input::Key;

use crate::scene::camera::OrbitCamera;
use crate::scene::renderer::TriangleRenderer;

/// The two-triangle demo application.
///
/// Owns the camera and the renderer; the runtime owns the window, the GPU
/// context, and the iteration itself.
pub struct DemoApp {
    camera: OrbitCamera,
    renderer: TriangleRenderer,
}

impl DemoApp {
    pub fn new() -> Self {
        Self {
            camera: OrbitCamera::new(),
            renderer: TriangleRenderer::new(),
        }
    }
}

impl Default for DemoApp {
    fn default() -> Self {
        Self::new()
    }
}

impl App for DemoApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        // One transform per frame, shared by both triangles.
        let transform = self.camera.transform_at(ctx.time.elapsed);

        let renderer = &mut self.renderer;
        let control = ctx.render(wgpu::Color::BLACK, |rctx, target| {
            renderer.render(rctx, target, transform);
        });

        if control == AppControl::Exit {
            return AppControl::Exit;
        }

        // Exit key is sampled after the frame is presented.
        if ctx.input.key_down(Key::Escape) {
            return AppControl::Exit;
        }

        AppControl::Continue
    }
}
