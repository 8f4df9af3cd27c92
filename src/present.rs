use crate::canvas::Canvas;
use crate::input::Hud;
use std::io::Write;

/// Writes a canvas to a truecolor terminal, two pixels per cell.
pub struct Presenter {
    bg_color: (u8, u8, u8),
    output_buf: Vec<u8>,
}

impl Presenter {
    pub fn new(bg_color: (u8, u8, u8)) -> Self {
        Self {
            bg_color,
            output_buf: Vec::new(),
        }
    }

    pub fn render<W: Write>(
        &mut self,
        canvas: &Canvas,
        hud: &Hud,
        out: &mut W,
    ) -> std::io::Result<()> {
        let (width, height) = (canvas.columns(), canvas.rows());
        self.output_buf.clear();
        self.output_buf.reserve(width * height * 20);
        self.output_buf.extend_from_slice(b"\x1b[H");

        let mut prev_top_color: Option<(u8, u8, u8)> = None;
        let mut prev_bot_color: Option<(u8, u8, u8)> = None;

        for y in (0..height).step_by(2) {
            for x in 0..width {
                let top_color = canvas.shade(x, y, self.bg_color);
                let bot_color = if y + 1 < height {
                    canvas.shade(x, y + 1, self.bg_color)
                } else {
                    top_color
                };

                if prev_top_color != Some(top_color) {
                    write!(
                        self.output_buf,
                        "\x1b[48;2;{};{};{}m",
                        top_color.0, top_color.1, top_color.2
                    )?;
                    prev_top_color = Some(top_color);
                }
                if prev_bot_color != Some(bot_color) {
                    write!(
                        self.output_buf,
                        "\x1b[38;2;{};{};{}m",
                        bot_color.0, bot_color.1, bot_color.2
                    )?;
                    prev_bot_color = Some(bot_color);
                }

                self.output_buf.extend_from_slice("▄".as_bytes());
            }
            self.output_buf.extend_from_slice(b"\x1b[0m");
            prev_top_color = None;
            prev_bot_color = None;
            if y + 2 < height {
                self.output_buf.extend_from_slice(b"\r\n");
            }
        }

        // Controls are drawn over the canvas
        let button = hud.burst;
        write!(
            self.output_buf,
            "\x1b[{};{}H\x1b[38;2;255;255;255m\x1b[48;2;40;40;60m{}\x1b[0m",
            button.row + 1,
            button.column + 1,
            button.label
        )?;

        out.write_all(&self.output_buf)?;
        out.flush()?;
        Ok(())
    }
}
