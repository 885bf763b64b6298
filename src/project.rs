use crate::column::{Column, ColumnState};
use crate::engine::Geometry;

/// Anything dimmer than this is not worth drawing.
pub const MIN_VISIBLE: i32 = 5;
const GRADIENT_FLOOR: i32 = 50;

pub const HEAD_COLOR: Rgb = Rgb {
    r: 200,
    g: 244,
    b: 248,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn green(g: u8) -> Self {
        Self { r: 0, g, b: 0 }
    }

    fn scaled(self, factor: f32) -> Self {
        let scale = |c: u8| (c as f32 * factor).clamp(0.0, 255.0) as u8;
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    Ghost,
    Trail,
    /// Highlighted lead glyph of a falling trail.
    Head,
}

/// One glyph for the display surface to paint, in pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawInstruction {
    pub column_index: usize,
    pub x_pixel: i32,
    pub row_pixel: i32,
    pub glyph: char,
    pub color: Rgb,
    pub layer: Layer,
}

impl DrawInstruction {
    /// Green channel; the whole colour for ghost and trail glyphs.
    pub fn brightness(&self) -> u8 {
        self.color.g
    }
}

/// Maps column state to draw instructions. Ghosts come first so falling
/// trails paint over them. Pure: calling it twice yields the same list.
pub fn project(columns: &[Column], geometry: Geometry) -> Vec<DrawInstruction> {
    let mut out = Vec::new();
    let cell_h = geometry.cell_height;

    for (index, column) in columns.iter().enumerate() {
        let x_pixel = geometry.column_x(index);
        for ghost in column.ghosts().iter() {
            let len = ghost.trail_length();
            for (k, &glyph) in ghost.symbols.iter().enumerate() {
                let row_pixel = ghost.anchor_row_pixel.saturating_sub(row_offset(k, cell_h));
                if !geometry.row_visible(row_pixel) {
                    continue;
                }
                let brightness = faded(gradient(k, len), ghost.opacity);
                if brightness < MIN_VISIBLE {
                    continue;
                }
                out.push(DrawInstruction {
                    column_index: index,
                    x_pixel,
                    row_pixel,
                    glyph,
                    color: Rgb::green(brightness as u8),
                    layer: Layer::Ghost,
                });
            }
        }
    }

    for (index, column) in columns.iter().enumerate() {
        if column.state() != ColumnState::Falling {
            continue;
        }
        let x_pixel = geometry.column_x(index);
        let head_row = column.fall_position().saturating_mul(cell_h);
        let len = column.trail_length();

        for (j, &glyph) in column.symbols().iter().enumerate() {
            let row_pixel = head_row.saturating_sub(row_offset(j, cell_h));
            if !geometry.row_visible(row_pixel) {
                continue;
            }
            let brightness = faded(gradient(j, len), column.opacity());
            if brightness < MIN_VISIBLE {
                continue;
            }
            out.push(DrawInstruction {
                column_index: index,
                x_pixel,
                row_pixel,
                glyph,
                color: Rgb::green(brightness as u8),
                layer: Layer::Trail,
            });
        }

        if 255.0 * column.opacity() >= MIN_VISIBLE as f32 {
            if let Some(&glyph) = column.symbols().first() {
                out.push(DrawInstruction {
                    column_index: index,
                    x_pixel,
                    row_pixel: head_row,
                    glyph,
                    color: HEAD_COLOR.scaled(column.opacity()),
                    layer: Layer::Head,
                });
            }
        }
    }

    out
}

/// Glyph `index` of a trail sits `index + 1` cells above the anchor.
fn row_offset(index: usize, cell_height: i32) -> i32 {
    (index as i32).saturating_add(1).saturating_mul(cell_height)
}

/// Linear falloff from the head, never dimmer than the floor.
pub fn gradient(index: usize, trail_length: usize) -> i32 {
    let step = 255 / trail_length.max(1) as i32;
    (255 - (index as i32).saturating_mul(step)).clamp(GRADIENT_FLOOR, 255)
}

fn faded(base: i32, opacity: f32) -> i32 {
    ((base as f32 * opacity) as i32).clamp(0, 255)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ghost::FrozenGhost;
    use rstest::rstest;

    fn ghost(symbols: &[char], anchor_row_pixel: i32, opacity: f32) -> FrozenGhost {
        FrozenGhost {
            symbols: symbols.to_vec(),
            anchor_row_pixel,
            opacity,
        }
    }

    fn draw(column_index: usize, row_pixel: i32, glyph: char, color: Rgb, layer: Layer) -> DrawInstruction {
        DrawInstruction {
            column_index,
            x_pixel: column_index as i32 * 20,
            row_pixel,
            glyph,
            color,
            layer,
        }
    }

    #[rstest]
    #[case(0, 30, 255)]
    #[case(1, 30, 247)]
    #[case(10, 30, 175)]
    #[case(29, 30, 50)]
    #[case(0, 1, 255)]
    #[case(3, 300, 255)]
    fn gradient_values(#[case] index: usize, #[case] len: usize, #[case] expected: i32) {
        assert_eq!(gradient(index, len), expected);
    }

    #[test]
    fn head_color_scales_with_opacity() {
        assert_eq!(HEAD_COLOR.scaled(1.0), HEAD_COLOR);
        assert_eq!(
            HEAD_COLOR.scaled(0.5),
            Rgb {
                r: 100,
                g: 122,
                b: 124
            }
        );
        assert_eq!(HEAD_COLOR.scaled(0.0), Rgb { r: 0, g: 0, b: 0 });
    }

    #[test]
    fn faded_truncates_and_clamps() {
        assert_eq!(faded(255, 0.5), 127);
        assert_eq!(faded(50, 0.09), 4);
        assert_eq!(faded(255, 0.0), 0);
    }

    #[test]
    fn projects_exact_rows_glyphs_and_colours() {
        let geometry = Geometry {
            width: 100,
            height: 100,
            cell_width: 20,
            cell_height: 20,
        };
        let columns = [
            Column::with_parts(
                ColumnState::Frozen,
                -5,
                &['0', '1', 'А'],
                1.0,
                vec![
                    ghost(&['ア', 'イ', 'ウ'], 100, 0.5),
                    ghost(&['エ', 'オ', 'カ'], 120, 1.0),
                ],
            ),
            Column::with_parts(ColumnState::Falling, 1, &['0', '1', 'А'], 1.0, Vec::new()),
            Column::with_parts(ColumnState::Falling, 3, &['Б', 'В', 'Г'], 0.03125, Vec::new()),
            Column::with_parts(
                ColumnState::Inactive,
                -5,
                &['0', '1', 'А'],
                1.0,
                vec![
                    ghost(&['キ', 'ク', 'ケ'], 20, 1.0),
                    ghost(&['コ', 'サ', 'シ'], 160, 1.0),
                ],
            ),
            Column::with_parts(ColumnState::Falling, 6, &['Д', 'Е', 'Ж'], 1.0, Vec::new()),
        ];

        let g = Rgb::green;
        let expected = vec![
            draw(0, 80, 'ア', g(127), Layer::Ghost),
            draw(0, 60, 'イ', g(85), Layer::Ghost),
            draw(0, 40, 'ウ', g(42), Layer::Ghost),
            // Anchored below the canvas: the first glyph lands on the bottom edge.
            draw(0, 100, 'エ', g(255), Layer::Ghost),
            draw(0, 80, 'オ', g(170), Layer::Ghost),
            draw(0, 60, 'カ', g(85), Layer::Ghost),
            // Ghosts draw whatever the column state; rows off the canvas are dropped.
            draw(3, 0, 'キ', g(255), Layer::Ghost),
            draw(3, 100, 'シ', g(85), Layer::Ghost),
            draw(1, 0, '0', g(255), Layer::Trail),
            draw(1, 20, '0', HEAD_COLOR, Layer::Head),
            // Third glyph would be 85 / 32 = 2, under the visibility floor.
            draw(2, 40, 'Б', g(7), Layer::Trail),
            draw(2, 20, 'В', g(5), Layer::Trail),
            draw(2, 60, 'Б', Rgb { r: 6, g: 7, b: 7 }, Layer::Head),
            draw(4, 100, 'Д', g(255), Layer::Trail),
            draw(4, 80, 'Е', g(170), Layer::Trail),
            draw(4, 60, 'Ж', g(85), Layer::Trail),
            // Head past the bottom edge is still emitted; the surface clips it.
            draw(4, 120, 'Д', HEAD_COLOR, Layer::Head),
        ];

        assert_eq!(project(&columns, geometry), expected);
    }
}
