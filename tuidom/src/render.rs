use crate::buffer::Buffer;
use crate::element::{Content, Element};
use crate::layout::{LayoutResult, Rect};
use crate::text::{char_width, display_width, truncate_to_width};
use crate::types::{Position, Rgb, Style};

const CURSOR: char = '▏';

pub fn render_to_buffer(root: &Element, layout: &LayoutResult, buf: &mut Buffer) {
    render_flow(root, layout, buf);

    // Overlays are painted after the normal flow, lowest z first.
    let mut overlays = Vec::new();
    collect_overlays(root, &mut overlays);
    overlays.sort_by_key(|o| o.z_index);
    for overlay in overlays {
        render_flow(overlay, layout, buf);
    }
}

fn collect_overlays<'a>(element: &'a Element, out: &mut Vec<&'a Element>) {
    for child in element.child_elements() {
        if child.position == Position::Absolute {
            out.push(child);
        }
        collect_overlays(child, out);
    }
}

fn render_flow(element: &Element, layout: &LayoutResult, buf: &mut Buffer) {
    let Some(rect) = layout.get(&element.id).copied() else {
        return;
    };
    let style = element.effective_style();

    if let Some(bg) = style.background {
        fill_rect(buf, rect, bg);
    }

    let inner = rect.shrink(
        element.padding.top,
        element.padding.right,
        element.padding.bottom,
        element.padding.left,
    );

    match &element.content {
        Content::None => {}
        Content::Text(text) => draw_text(buf, inner, text, &style),
        Content::Input { value, placeholder } => {
            if value.is_empty() && !placeholder.is_empty() {
                draw_text(buf, inner, placeholder, &style.merge(&Style::new().dim()));
            } else {
                draw_text(buf, inner, value, &style);
            }
            if element.focused {
                let cursor_x = inner.x.saturating_add(display_width(value) as u16);
                if cursor_x < inner.right() {
                    if let Some(cell) = buf.get_mut(cursor_x, inner.y) {
                        cell.char = CURSOR;
                    }
                }
            }
        }
        Content::Children(children) => {
            for child in children.iter().filter(|c| c.position != Position::Absolute) {
                render_flow(child, layout, buf);
            }
        }
    }
}

fn fill_rect(buf: &mut Buffer, rect: Rect, bg: Rgb) {
    for y in rect.y..rect.bottom().min(buf.height()) {
        for x in rect.x..rect.right().min(buf.width()) {
            if let Some(cell) = buf.get_mut(x, y) {
                cell.bg = bg;
            }
        }
    }
}

fn draw_text(buf: &mut Buffer, area: Rect, text: &str, style: &Style) {
    if area.is_empty() {
        return;
    }
    let fg = style.foreground.unwrap_or(Rgb::WHITE);
    let visible = truncate_to_width(text, area.width as usize);

    let mut x = area.x;
    for ch in visible.chars() {
        let width = char_width(ch) as u16;
        if width == 0 {
            continue;
        }
        if x.saturating_add(width) > area.right() {
            break;
        }
        if let Some(cell) = buf.get_mut(x, area.y) {
            cell.char = ch;
            cell.fg = fg;
            if let Some(bg) = style.background {
                cell.bg = bg;
            }
            cell.style = style.text_style;
            cell.wide_continuation = false;
        }
        if width == 2 {
            if let Some(cell) = buf.get_mut(x + 1, area.y) {
                cell.wide_continuation = true;
            }
        }
        x += width;
    }
}
