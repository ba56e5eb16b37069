// main.rs
mod app;
mod utils;

use app::App;
use eframe::{IconData, NativeOptions};
use image::{Rgba, RgbaImage};

const ICON_SIZE: u32 = 64;

/// Window icon: a rounded tile in the accent colour around a dark frame.
fn app_icon() -> IconData {
    let accent = Rgba([100u8, 200, 250, 255]);
    let frame = Rgba([30u8, 30, 40, 255]);
    let clear = Rgba([0u8, 0, 0, 0]);
    let radius = 12i64;
    let max = i64::from(ICON_SIZE) - 1;

    let icon = RgbaImage::from_fn(ICON_SIZE, ICON_SIZE, |x, y| {
        let (x, y) = (i64::from(x), i64::from(y));
        let dx = (radius - x).max(x - (max - radius)).max(0);
        let dy = (radius - y).max(y - (max - radius)).max(0);
        if dx * dx + dy * dy > radius * radius {
            clear
        } else if (16..48).contains(&x) && (16..48).contains(&y) {
            frame
        } else {
            accent
        }
    });

    IconData {
        rgba: icon.into_raw(),
        width: ICON_SIZE,
        height: ICON_SIZE,
    }
}

fn main() {
    env_logger::init();

    let native_options = NativeOptions {
        initial_window_size: Some(egui::Vec2::new(1600.0, 1000.0)),
        min_window_size: Some(egui::Vec2::new(800.0, 600.0)),
        resizable: true,
        drag_and_drop_support: true,
        icon_data: Some(app_icon()),
        ..Default::default()
    };
    eframe::run_native(
        "PNG to WebP",
        native_options,
        Box::new(|_cc| Box::new(App::default())),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_has_rounded_corners_and_frame() {
        let icon = app_icon();
        assert_eq!((icon.width, icon.height), (ICON_SIZE, ICON_SIZE));
        assert_eq!(icon.rgba.len(), (ICON_SIZE * ICON_SIZE * 4) as usize);

        let pixel = |x: u32, y: u32| {
            let i = ((y * ICON_SIZE + x) * 4) as usize;
            icon.rgba[i..i + 4].to_vec()
        };
        assert_eq!(pixel(0, 0), vec![0, 0, 0, 0]);
        assert_eq!(pixel(32, 2), vec![100, 200, 250, 255]);
        assert_eq!(pixel(32, 32), vec![30, 30, 40, 255]);
    }
}
