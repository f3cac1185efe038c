use std::collections::HashMap;

use crate::element::{Content, Element};
use crate::text::display_width;
use crate::types::{Direction, Position, Size, Wrap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    pub fn shrink(self, top: u16, right: u16, bottom: u16, left: u16) -> Self {
        Self {
            x: self.x.saturating_add(left),
            y: self.y.saturating_add(top),
            width: self.width.saturating_sub(left + right),
            height: self.height.saturating_sub(top + bottom),
        }
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn intersection(&self, other: Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Rect::new(x, y, right.saturating_sub(x), bottom.saturating_sub(y))
    }
}

pub type LayoutResult = HashMap<String, Rect>;

/// Lay out `root` inside `available`.
///
/// Elements whose first row falls outside their clip region (the screen,
/// or the viewport of a scrollable ancestor) get no rect, which also makes
/// them invisible to rendering and hit testing.
pub fn layout(root: &Element, available: Rect) -> LayoutResult {
    let mut result = LayoutResult::new();
    let frame = Frame {
        screen: available,
        clip: available,
    };
    place(
        root,
        i32::from(available.x),
        i32::from(available.y),
        available.width,
        frame,
        &mut result,
    );
    result
}

/// Intrinsic outer size of an element, ignoring absolutely positioned children.
pub fn measure(element: &Element) -> (u16, u16) {
    let (content_w, content_h) = match &element.content {
        Content::None => (0, 0),
        Content::Text(text) => (clamp_u16(display_width(text)), 1),
        Content::Input { value, placeholder } => {
            let widest = display_width(value).max(display_width(placeholder));
            // One extra column for the cursor.
            (clamp_u16(widest).saturating_add(1), 1)
        }
        Content::Children(children) => {
            let sizes: Vec<(u16, u16)> = children
                .iter()
                .filter(|c| c.position != Position::Absolute)
                .map(measure)
                .collect();
            let gaps = element
                .gap
                .saturating_mul(clamp_u16(sizes.len().saturating_sub(1)));
            match element.direction {
                Direction::Row => (
                    sizes
                        .iter()
                        .fold(0u16, |acc, (w, _)| acc.saturating_add(*w))
                        .saturating_add(gaps),
                    sizes.iter().map(|(_, h)| *h).max().unwrap_or(0),
                ),
                Direction::Column => (
                    sizes.iter().map(|(w, _)| *w).max().unwrap_or(0),
                    sizes
                        .iter()
                        .fold(0u16, |acc, (_, h)| acc.saturating_add(*h))
                        .saturating_add(gaps),
                ),
            }
        }
    };

    let width = match element.width {
        Size::Fixed(n) => n,
        Size::Fill | Size::Auto => content_w.saturating_add(element.padding.width()),
    };
    let mut height = match element.height {
        Size::Fixed(n) => n,
        Size::Fill | Size::Auto => content_h.saturating_add(element.padding.height()),
    };
    if let Some(max) = element.max_height {
        height = height.min(max);
    }

    (width, height)
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    screen: Rect,
    clip: Rect,
}

fn place(
    element: &Element,
    x: i32,
    y: i32,
    available_width: u16,
    frame: Frame,
    result: &mut LayoutResult,
) {
    let width = flow_width(element, available_width);

    // An element is placed only if its first row lies inside the clip
    // region; whatever hangs past the bottom edge is cut off.
    let clip = frame.clip;
    let visible =
        x >= i32::from(clip.x) && y >= i32::from(clip.y) && y < i32::from(clip.bottom());
    if !visible {
        log::trace!("layout: {} clipped at ({x}, {y})", element.id);
        return;
    }

    // `visible` guarantees both coordinates fit in u16.
    let (x, y) = (x as u16, y as u16);
    let height = height_within(element, width).min(clip.bottom() - y);
    let rect = Rect::new(x, y, width, height);
    result.insert(element.id.clone(), rect);

    let children = element.child_elements();
    if children.is_empty() {
        return;
    }

    let inner = rect.shrink(
        element.padding.top,
        element.padding.right,
        element.padding.bottom,
        element.padding.left,
    );
    let child_frame = if element.scrollable {
        Frame {
            screen: frame.screen,
            clip: clip.intersection(inner),
        }
    } else {
        frame
    };
    let offset = if element.scrollable {
        i32::from(element.scroll_offset)
    } else {
        0
    };

    let flow: Vec<&Element> = children
        .iter()
        .filter(|c| c.position != Position::Absolute)
        .collect();

    match element.direction {
        Direction::Column => {
            let mut cursor_y = i32::from(inner.y) - offset;
            for child in flow {
                let child_w = flow_width(child, inner.width);
                place(child, i32::from(inner.x), cursor_y, inner.width, child_frame, result);
                cursor_y += i32::from(height_within(child, child_w)) + i32::from(element.gap);
            }
        }
        Direction::Row => {
            let widths = row_widths(element, &flow, inner.width);
            let mut cursor_y = i32::from(inner.y) - offset;
            for line in break_lines(element, &widths, inner.width) {
                let mut cursor_x = i32::from(inner.x);
                let mut line_h = 0u16;
                for index in line {
                    let (child, child_w) = (flow[index], widths[index]);
                    place(child, cursor_x, cursor_y, child_w, child_frame, result);
                    cursor_x += i32::from(child_w) + i32::from(element.gap);
                    line_h = line_h.max(height_within(child, child_w));
                }
                cursor_y += i32::from(line_h) + i32::from(element.gap);
            }
        }
    }

    // Overlays escape the parent's clip and are bounded by the screen only.
    for child in children.iter().filter(|c| c.position == Position::Absolute) {
        let ax = i32::from(rect.x) + i32::from(child.left);
        let ay = i32::from(rect.y) + i32::from(child.top);
        let available = (i32::from(frame.screen.right()) - ax).max(0);
        let overlay_frame = Frame {
            screen: frame.screen,
            clip: frame.screen,
        };
        place(child, ax, ay, clamp_u16(available as usize), overlay_frame, result);
    }
}

/// Width an element takes when offered `available` columns.
fn flow_width(element: &Element, available: u16) -> u16 {
    match element.width {
        Size::Fixed(n) => n,
        Size::Fill => available,
        Size::Auto => measure(element).0.min(available),
    }
}

/// Outer height of `element` laid out `width` columns wide. Only differs
/// from `measure` for wrapping rows and the containers around them.
fn height_within(element: &Element, width: u16) -> u16 {
    let Content::Children(children) = &element.content else {
        return measure(element).1;
    };
    let inner_w = width.saturating_sub(element.padding.width());
    let flow: Vec<&Element> = children
        .iter()
        .filter(|c| c.position != Position::Absolute)
        .collect();
    let content_h = match element.direction {
        Direction::Column => flow
            .iter()
            .fold(0u16, |acc, c| {
                acc.saturating_add(height_within(c, flow_width(c, inner_w)))
            })
            .saturating_add(
                element
                    .gap
                    .saturating_mul(clamp_u16(flow.len().saturating_sub(1))),
            ),
        Direction::Row => {
            let widths = row_widths(element, &flow, inner_w);
            let lines = break_lines(element, &widths, inner_w);
            lines
                .iter()
                .map(|line| {
                    line.iter()
                        .map(|&i| height_within(flow[i], widths[i]))
                        .max()
                        .unwrap_or(0)
                })
                .fold(0u16, u16::saturating_add)
                .saturating_add(
                    element
                        .gap
                        .saturating_mul(clamp_u16(lines.len().saturating_sub(1))),
                )
        }
    };

    let mut height = match element.height {
        Size::Fixed(n) => n,
        Size::Fill | Size::Auto => content_h.saturating_add(element.padding.height()),
    };
    if let Some(max) = element.max_height {
        height = height.min(max);
    }
    height
}

/// Widths of a row's flow children. Fill children share what the others
/// leave; in a wrapping row they take a whole line instead.
fn row_widths(row: &Element, flow: &[&Element], inner_width: u16) -> Vec<u16> {
    if row.wrap == Wrap::Wrap {
        return flow
            .iter()
            .map(|c| match c.width {
                Size::Fill => inner_width,
                _ => measure(c).0.min(inner_width),
            })
            .collect();
    }

    let fill_count = flow.iter().filter(|c| c.width == Size::Fill).count();
    let fixed_total = flow
        .iter()
        .filter(|c| c.width != Size::Fill)
        .fold(0u16, |acc, c| acc.saturating_add(measure(c).0))
        .saturating_add(
            row.gap
                .saturating_mul(clamp_u16(flow.len().saturating_sub(1))),
        );
    let fill_share = if fill_count == 0 {
        0
    } else {
        inner_width.saturating_sub(fixed_total) / clamp_u16(fill_count)
    };
    flow.iter()
        .map(|c| {
            if c.width == Size::Fill {
                fill_share
            } else {
                measure(c).0
            }
        })
        .collect()
}

/// Split a row's children into lines of indices. A non-wrapping row is a
/// single line; a wrapping one starts a new line whenever the next child
/// would cross the right edge.
fn break_lines(row: &Element, widths: &[u16], inner_width: u16) -> Vec<Vec<usize>> {
    if row.wrap == Wrap::NoWrap {
        return vec![(0..widths.len()).collect()];
    }

    let mut lines: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut used = 0u16;
    for (index, &w) in widths.iter().enumerate() {
        let needed = if current.is_empty() {
            w
        } else {
            used.saturating_add(row.gap).saturating_add(w)
        };
        if !current.is_empty() && needed > inner_width {
            lines.push(std::mem::take(&mut current));
            used = w;
        } else {
            used = needed;
        }
        current.push(index);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn clamp_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
