use crate::app::file_dialogs;
use crate::app::thumbnails::{fit_within, Thumbnail};
use crate::app::{App, GRID_COLUMNS, MAX_QUALITY, MIN_QUALITY};
use egui::{
    Align, Align2, Color32, FontId, Frame, Id, Layout, LayerId, Order, ProgressBar, RichText,
    Rounding, Sense, Slider, Stroke, Vec2,
};

const ACCENT: Color32 = Color32::from_rgb(100, 200, 250);
const PLACEHOLDER: &str = "Drop PNG images here to convert";
const GRID_SPACING: f32 = 5.0;
// Room left below the grid for the count label, controls, progress bar and log.
const BOTTOM_AREA_HEIGHT: f32 = 330.0;

pub fn render(app: &mut App, ctx: &egui::Context) {
    let frame = Frame {
        fill: Color32::from_rgb(30, 30, 40),
        rounding: Rounding::same(10.0),
        stroke: Stroke::new(1.0, ACCENT),
        inner_margin: egui::style::Margin::same(20.0),
        ..Default::default()
    };

    egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
        ui.heading(RichText::new("PNG to WebP").size(28.0).color(ACCENT));
        ui.add_space(10.0);

        let grid_height = (ui.available_height() - BOTTOM_AREA_HEIGHT).max(160.0);
        if app.selection.is_empty() {
            render_placeholder(ui, grid_height);
        } else {
            egui::ScrollArea::vertical()
                .id_source("selection_scroll")
                .auto_shrink([false; 2])
                .max_height(grid_height)
                .show(ui, |ui| render_selection_grid(app, ui));
        }

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            ui.label(format!("{} images selected", app.selection.len()));
        });
        ui.add_space(5.0);

        render_controls(app, ui);
        ui.add_space(5.0);

        ui.add(
            ProgressBar::new(f32::from(app.progress.percent) / 100.0).text(app.progress.text()),
        );
        ui.add_space(10.0);

        render_log(app, ui);
    });

    preview_files_being_dropped(ctx);
}

fn render_placeholder(ui: &mut egui::Ui, height: f32) {
    let (rect, _) = ui.allocate_exact_size(Vec2::new(ui.available_width(), height), Sense::hover());
    let painter = ui.painter();
    painter.rect_filled(rect, 6.0, Color32::from_rgb(60, 60, 70));
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        PLACEHOLDER,
        FontId::proportional(22.0),
        Color32::LIGHT_GRAY,
    );
}

fn render_selection_grid(app: &mut App, ui: &mut egui::Ui) {
    let ctx = ui.ctx().clone();
    let converting = app.is_converting();
    let columns = GRID_COLUMNS as f32;
    // Frame::group adds a margin and stroke on each side of the cell.
    let cell_width = ((ui.available_width() - GRID_SPACING * (columns - 1.0)) / columns - 16.0).max(48.0);
    let paths = app.selection.paths().to_vec();
    let mut removed = None;

    egui::Grid::new("selection_grid")
        .spacing([GRID_SPACING, GRID_SPACING])
        .show(ui, |ui| {
            for (index, path) in paths.iter().enumerate() {
                Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(cell_width);
                    ui.vertical_centered(|ui| match app.thumbnails.get_or_load(&ctx, path) {
                        Thumbnail::Ready(texture) => {
                            let size = fit_within(texture.size_vec2(), cell_width);
                            ui.image(texture.id(), size);
                        }
                        Thumbnail::Failed(error) => {
                            ui.label(RichText::new("Preview unavailable").color(Color32::RED))
                                .on_hover_text(error.as_str());
                        }
                    });
                    ui.horizontal(|ui| {
                        let name = path
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_default();
                        ui.label(RichText::new(name).small()).on_hover_text(path.display().to_string());
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            if ui.add_enabled(!converting, egui::Button::new("x")).clicked() {
                                removed = Some(path.clone());
                            }
                        });
                    });
                });

                if (index + 1) % GRID_COLUMNS == 0 {
                    ui.end_row();
                }
            }
        });

    if let Some(path) = removed {
        app.remove_file(&path);
    }
}

fn render_controls(app: &mut App, ui: &mut egui::Ui) {
    let converting = app.is_converting();
    ui.horizontal(|ui| {
        ui.spacing_mut().slider_width = (ui.available_width() - 560.0).max(120.0);
        ui.add(Slider::new(&mut app.quality, MIN_QUALITY..=MAX_QUALITY).show_value(false));
        ui.add_sized([200.0, 30.0], egui::Label::new(format!("Quality: {}%", app.quality)));

        ui.add_enabled_ui(!converting, |ui| {
            if ui.add_sized([150.0, 30.0], egui::Button::new("Select Images")).clicked() {
                if let Some(files) = file_dialogs::select_images() {
                    app.add_files(files);
                }
            }
            if ui.add_sized([150.0, 30.0], egui::Button::new("Convert")).clicked() {
                if app.start_conversion() {
                    ui.ctx().request_repaint();
                }
            }
        });
    });
}

fn render_log(app: &App, ui: &mut egui::Ui) {
    ui.group(|ui| {
        ui.set_min_width(ui.available_width());
        ui.label(RichText::new("Conversion Log").size(16.0).color(ACCENT));

        egui::ScrollArea::vertical()
            .id_source("log_scroll")
            .max_height(150.0)
            .auto_shrink([false; 2])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                let logs = app.log_messages.lock();
                for log in logs.iter() {
                    if log.contains("error") || log.contains("failed") {
                        ui.label(RichText::new(log).color(Color32::RED));
                    } else {
                        ui.label(log);
                    }
                }
            });
    });
}

fn preview_files_being_dropped(ctx: &egui::Context) {
    if ctx.input().raw.hovered_files.is_empty() {
        return;
    }

    let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
    let screen_rect = ctx.input().screen_rect();
    painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
    painter.text(
        screen_rect.center(),
        Align2::CENTER_CENTER,
        "Drop PNG images to add them",
        FontId::proportional(28.0),
        Color32::WHITE,
    );
}
