use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;
use imgui::Condition;
use winit::dpi::LogicalSize;

use imhost_engine::coords::ColorRgba;
use imhost_engine::core::App;
use imhost_engine::device::GpuInit;
use imhost_engine::gui::ImguiContext;
use imhost_engine::host::{OverlayConfig, OverlayHost};
use imhost_engine::logging::{LoggingConfig, init_logging};
use imhost_engine::render::GpuTexture;
use imhost_engine::window::{Runtime, RuntimeConfig};

/// The "scene" under the overlay is just the clear color the overlay edits.
struct Studio {
    clear: Rc<Cell<[f32; 3]>>,
}

impl App for Studio {
    fn clear_color(&self) -> ColorRgba {
        let [r, g, b] = self.clear.get();
        ColorRgba::new(r, g, b, 1.0)
    }
}

fn build_overlay(clear: Rc<Cell<[f32; 3]>>) -> OverlayHost<ImguiContext, GpuTexture> {
    let mut overlay = OverlayHost::new(OverlayConfig::default(), || {
        let mut gui = ImguiContext::new()?;
        gui.style_mut().window_rounding = 4.0;
        Ok(gui)
    });

    let mut frames = 0u64;
    overlay.register_callback(move |ui: &mut imgui::Ui| {
        frames += 1;
        ui.window("imhost")
            .size([320.0, 180.0], Condition::FirstUseEver)
            .position([24.0, 24.0], Condition::FirstUseEver)
            .build(|| {
                ui.text(format!("frame {frames}"));
                ui.text(format!("{:.1} fps", ui.io().framerate));
                let mut rgb = clear.get();
                if ui.color_edit3("clear color", &mut rgb) {
                    clear.set(rgb);
                }
            });
        Ok(())
    });

    overlay.register_callback(|ui: &mut imgui::Ui| {
        let mut open = true;
        ui.show_demo_window(&mut open);
        Ok(())
    });

    overlay
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    log::info!("studio: starting");

    let clear = Rc::new(Cell::new([0.07, 0.07, 0.09]));
    let overlay = build_overlay(Rc::clone(&clear));

    let config = RuntimeConfig {
        title: "imhost studio".to_string(),
        initial_size: LogicalSize::new(1280.0, 720.0),
    };

    Runtime::run(config, GpuInit::default(), overlay, Studio { clear })
}
