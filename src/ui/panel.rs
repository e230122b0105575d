// src/ui/panel.rs
//! Panels drawn over the room: the portfolio overlay, the angle readout and
//! the initialization error screen.

use crate::content::{Block, PortfolioEntry};
use crate::gfx::resources::material::hex_to_rgb;

/// Title colour of the overlay panel.
pub const ACCENT: u32 = 0x663399;

fn rgba(hex: u32) -> [f32; 4] {
    let [r, g, b] = hex_to_rgb(hex);
    [r, g, b, 1.0]
}

/// Centered panel showing one portfolio entry.
///
/// Returns `true` when the close button was pressed this frame.
pub fn overlay_panel(ui: &imgui::Ui, entry: &PortfolioEntry) -> bool {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return false;
    }
    let width = (display_size[0] * 0.8).min(640.0);
    let height = (display_size[1] * 0.8).min(560.0);
    let mut close = false;

    ui.window("Portfolio Entry")
        .size([width, height], imgui::Condition::Always)
        .position(
            [display_size[0] * 0.5, display_size[1] * 0.5],
            imgui::Condition::Always,
        )
        .position_pivot([0.5, 0.5])
        .title_bar(false)
        .resizable(false)
        .movable(false)
        .collapsible(false)
        .build(|| {
            ui.text_colored(rgba(ACCENT), entry.title);
            ui.same_line_with_pos(width - 40.0);
            if ui.button("×") {
                close = true;
            }
            ui.separator();
            ui.child_window("entry_body").build(|| render_blocks(ui, entry.body));
        });

    close
}

fn render_blocks(ui: &imgui::Ui, blocks: &[Block]) {
    for block in blocks {
        match *block {
            Block::Heading(text) => {
                ui.spacing();
                ui.text_colored(rgba(ACCENT), text);
                ui.separator();
            }
            Block::Subheading(text) => {
                ui.spacing();
                ui.text_colored([0.75, 0.75, 0.75, 1.0], text);
            }
            Block::Bullet { lead, text } => {
                ui.bullet();
                if let Some(lead) = lead {
                    ui.text_colored([1.0, 1.0, 1.0, 1.0], lead);
                    ui.same_line();
                }
                ui.text_wrapped(text);
            }
            Block::Paragraph(text) => ui.text_wrapped(text),
            Block::Emphasis(text) => {
                ui.spacing();
                ui.text_disabled(text);
            }
            Block::Columns(columns) => {
                ui.columns(columns.len() as i32, "entry_columns", false);
                for column in columns {
                    render_blocks(ui, column);
                    ui.next_column();
                }
                ui.columns(1, "entry_columns_end", false);
            }
        }
    }
}

/// The two HUD lines for a pair of camera angles in radians.
pub fn format_angle_readout(azimuth: f32, polar: f32) -> [String; 2] {
    [
        format!(
            "Azimuth Angle: {azimuth:.2} rad ({:.2}°)",
            azimuth.to_degrees()
        ),
        format!("Polar Angle: {polar:.2} rad ({:.2}°)", polar.to_degrees()),
    ]
}

/// Bottom-left readout of the orbit angles.
pub fn angle_readout(ui: &imgui::Ui, azimuth: f32, polar: f32) {
    let display_size = ui.io().display_size;
    ui.window("Camera Angles")
        .position([10.0, display_size[1] - 10.0], imgui::Condition::Always)
        .position_pivot([0.0, 1.0])
        .always_auto_resize(true)
        .no_decoration()
        .no_inputs()
        .bg_alpha(0.4)
        .build(|| {
            for line in format_angle_readout(azimuth, polar) {
                ui.text(line);
            }
        });
}

pub fn error_message(reason: &str) -> String {
    format!("Error initializing scene: {reason}")
}

/// Replaces the whole view with a plain error message.
pub fn error_screen(ui: &imgui::Ui, reason: &str) {
    let display_size = ui.io().display_size;
    ui.window("Error")
        .position([0.0, 0.0], imgui::Condition::Always)
        .size(display_size, imgui::Condition::Always)
        .no_decoration()
        .movable(false)
        .build(|| {
            ui.text_wrapped(error_message(reason));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readout_matches_overview_angles() {
        let polar = (1.0_f32 / 3.0_f32.sqrt()).acos();
        let [azimuth_line, polar_line] = format_angle_readout(std::f32::consts::FRAC_PI_4, polar);
        assert_eq!(azimuth_line, "Azimuth Angle: 0.79 rad (45.00°)");
        assert_eq!(polar_line, "Polar Angle: 0.96 rad (54.74°)");
    }

    #[test]
    fn error_text() {
        assert_eq!(
            error_message("no compatible graphics adapter found"),
            "Error initializing scene: no compatible graphics adapter found"
        );
    }

    #[test]
    fn accent_is_rebeccapurple() {
        assert_eq!(rgba(ACCENT), [0.4, 0.2, 0.6, 1.0]);
    }
}
