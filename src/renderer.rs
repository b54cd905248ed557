//! macroquad backend: draws a [`QuadBatch`] and reads pointer and viewport
//! state back in the engine's y-up pixel space.

use macroquad::color::Color as MqColor;
use macroquad::prelude::{
    draw_rectangle, draw_texture_ex, is_mouse_button_pressed, is_mouse_button_released, mouse_position,
    screen_height, screen_width, DrawTextureParams, MouseButton, Rect, Texture2D, Vec2,
};

use crate::batch::{Quad, QuadBatch, TexCoords};
use crate::color::Color;
use crate::input::PointerInput;
use crate::math::{Dimensions, Vector2};

fn to_macroquad_color(color: &Color) -> MqColor {
    MqColor::new(color.r, color.g, color.b, color.a)
}

/// Destination rectangle in macroquad's y-down screen space.
fn screen_rect(quad: &Quad, screen_height: f32) -> Rect {
    let bb = quad.bounds();
    Rect::new(bb.x, screen_height - (bb.y + bb.height), bb.width, bb.height)
}

/// Source rectangle in texels of a `width` x `height` texture. Texture
/// coordinates are v-up; texels are y-down.
fn source_rect(coords: &TexCoords, width: f32, height: f32) -> Rect {
    let min = coords.bottom_left;
    let max = coords.top_right;
    Rect::new(
        min.x * width,
        (1.0 - max.y) * height,
        (max.x - min.x) * width,
        (max.y - min.y) * height,
    )
}

/// Draws `batch` back to front. Quad `texture` values index `textures`;
/// quads whose slot is missing are drawn as flat rectangles.
pub fn draw_batch(batch: &QuadBatch, textures: &[Texture2D]) {
    let height = screen_height();
    let mut order: Vec<&Quad> = batch.quads().iter().collect();
    order.sort_by(|a, b| a.sort_order.total_cmp(&b.sort_order));

    for quad in order {
        let dest = screen_rect(quad, height);
        let tint = to_macroquad_color(&quad.color);
        match textures.get(quad.texture as usize) {
            Some(texture) => {
                let source = source_rect(&quad.tex_coords, texture.width(), texture.height());
                draw_texture_ex(
                    texture,
                    dest.x,
                    dest.y,
                    tint,
                    DrawTextureParams {
                        dest_size: Some(Vec2::new(dest.w, dest.h)),
                        source: Some(source),
                        ..Default::default()
                    },
                );
            }
            None => draw_rectangle(dest.x, dest.y, dest.w, dest.h, tint),
        }
    }
}

fn flip_pointer(position: (f32, f32), screen_height: f32) -> Vector2 {
    Vector2::new(position.0, screen_height - position.1)
}

/// The primary mouse button as this frame's [`PointerInput`].
pub fn pointer_input() -> PointerInput {
    PointerInput {
        position: flip_pointer(mouse_position(), screen_height()),
        pressed: is_mouse_button_pressed(MouseButton::Left),
        released: is_mouse_button_released(MouseButton::Left),
    }
}

pub fn viewport_size() -> Dimensions {
    Dimensions::new(screen_width(), screen_height())
}
