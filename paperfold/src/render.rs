//! Text rasterizer for element trees.
//!
//! Children stack vertically. A fixed height clips or pads to whole rows,
//! `top` shifts content down (negative: up) and `bottom` aligns content to
//! the containing box's bottom edge.
//!
//! Layout runs in fractional rows. Only box edges are rounded, each at its
//! absolute position, so adjacent boxes never gain or lose a row between them.

use std::time::Instant;

use unicode_width::UnicodeWidthChar;

use crate::animation::AnimationState;
use crate::element::{Content, Element};
use crate::fold::HIDDEN;

/// Render `root` into at most `width` columns per row.
///
/// Heights with a running transition in `animation` are sampled at `now`.
pub fn render_lines(
    root: &Element,
    animation: &AnimationState,
    now: Instant,
    width: u16,
) -> Vec<String> {
    let ctx = Context { animation, now };
    render_element(&ctx, root, 0.0, None)
        .lines
        .into_iter()
        .map(|line| fit_width(&line, width as usize))
        .collect()
}

struct Context<'a> {
    animation: &'a AnimationState,
    now: Instant,
}

/// Vertical edges of a box, in fractional rows from the top of the root.
#[derive(Clone, Copy)]
struct Span {
    top: f32,
    height: f32,
}

impl Span {
    fn bottom(self) -> f32 {
        self.top + self.height
    }
}

/// Rendered rows of an element, starting at `edge(origin)`.
struct Block {
    lines: Vec<String>,
    /// Space the element takes in its parent's flow.
    extent: f32,
}

fn render_element(
    ctx: &Context<'_>,
    element: &Element,
    origin: f32,
    containing: Option<Span>,
) -> Block {
    if element.has_class(HIDDEN) {
        return Block {
            lines: Vec::new(),
            extent: 0.0,
        };
    }

    let own = ctx
        .animation
        .height_at(&element.id, ctx.now)
        .or(element.height)
        .map(|h| h.max(0.0));
    let frame = own.map(|height| Span {
        top: origin,
        height,
    });

    let content_origin = match (element.top, element.bottom, containing) {
        (Some(top), ..) => origin + top,
        // Content bottom sits `bottom` rows above the containing box's bottom.
        (None, Some(bottom), Some(cb)) => {
            cb.bottom() - bottom - element.content.intrinsic_height()
        }
        _ => origin,
    };
    let content = render_content(ctx, &element.content, content_origin, frame.or(containing));
    let base = edge(content_origin);

    let first = edge(origin);
    let rows = match (own, element.top, element.bottom, containing) {
        (Some(height), ..) => edge(origin + height) - first,
        (None, None, Some(_), Some(cb)) => edge(cb.bottom()) - first,
        _ => base + content.lines.len() as i64 - first,
    };

    let lines = (first..first + rows.max(0))
        .map(|row| line_at(&content.lines, row - base))
        .collect();
    Block {
        lines,
        extent: own.unwrap_or(content.extent),
    }
}

fn render_content(
    ctx: &Context<'_>,
    content: &Content,
    origin: f32,
    containing: Option<Span>,
) -> Block {
    match content {
        Content::None => Block {
            lines: Vec::new(),
            extent: 0.0,
        },
        Content::Text(text) => {
            let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
            if lines.is_empty() {
                lines.push(String::new());
            }
            let extent = lines.len() as f32;
            Block { lines, extent }
        }
        Content::Children(children) => {
            let base = edge(origin);
            let mut lines = Vec::new();
            let mut cursor = origin;
            for child in children {
                let block = render_element(ctx, child, cursor, containing);
                place(&mut lines, edge(cursor) - base, block.lines);
                cursor += block.extent;
            }
            Block {
                lines,
                extent: cursor - origin,
            }
        }
    }
}

/// Write `block` into `lines` starting at row `at`, overwriting overlaps.
fn place(lines: &mut Vec<String>, at: i64, block: Vec<String>) {
    for (i, line) in block.into_iter().enumerate() {
        let Ok(row) = usize::try_from(at + i as i64) else {
            continue;
        };
        if row >= lines.len() {
            lines.resize(row + 1, String::new());
        }
        lines[row] = line;
    }
}

fn line_at(lines: &[String], index: i64) -> String {
    usize::try_from(index)
        .ok()
        .and_then(|i| lines.get(i))
        .cloned()
        .unwrap_or_default()
}

/// Whole row a fractional edge snaps to.
fn edge(position: f32) -> i64 {
    position.round() as i64
}

/// Truncate to `width` display columns.
fn fit_width(line: &str, width: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for ch in line.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}
